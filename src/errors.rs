use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TreeError {
    #[error("NotFound no node holds the given data")]
    NotFound,
    #[error("ParentNotFound couldn't find the parent node")]
    ParentNotFound,
    #[error("RootRemoval unable to remove the root node")]
    RootRemoval,
}

#[derive(Error, Debug, PartialEq)]
pub enum ShellError {
    #[error("UnknownCommand unknown command '{0}'")]
    UnknownCommand(String),
    #[error("Serialize couldn't serialize the queue stats: {0}")]
    Serialize(String),
}
