pub mod errors;
pub mod level;
pub mod linked_list;
pub mod parser;
pub mod priority_queue;
pub mod queue;
pub mod shell;
pub mod stack;
pub mod tree;
