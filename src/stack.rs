#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    contents: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            contents: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.contents.clear();
    }

    /// Pushes onto the top and returns the new length.
    pub fn push(&mut self, item: T) -> usize {
        self.contents.push(item);
        self.contents.len()
    }

    pub fn pop(&mut self) -> Option<T> {
        self.contents.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.contents.last()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
