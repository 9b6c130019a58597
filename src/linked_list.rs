//! Doubly linked list over an index arena.
//!
//! Nodes live in a `Vec` of slots and refer to their neighbours by slot index,
//! so the list needs neither `unsafe` nor reference counting. Freed slots are
//! recycled by later insertions.

#[derive(Debug, Clone)]
struct Node<T> {
    data: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DoublyLinkedList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> DoublyLinkedList<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Adds to the back and returns the new length.
    pub fn append(&mut self, data: T) -> usize {
        let idx = self.alloc(Node {
            data,
            prev: self.tail,
            next: None,
        });

        match self.tail.and_then(|tail| self.node_mut(tail)) {
            Some(tail) => tail.next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
        self.len
    }

    /// Adds to the front and returns the new length.
    pub fn prepend(&mut self, data: T) -> usize {
        let idx = self.alloc(Node {
            data,
            prev: None,
            next: self.head,
        });

        match self.head.and_then(|head| self.node_mut(head)) {
            Some(head) => head.prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
        self.len
    }

    /// Removes the last element.
    pub fn pop(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.unlink(tail)
    }

    /// Removes the first element.
    pub fn shift(&mut self) -> Option<T> {
        let head = self.head?;
        self.unlink(head)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        let idx = self.slot_of(index)?;
        self.node(idx).map(|node| &node.data)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let idx = self.slot_of(index)?;
        self.node_mut(idx).map(|node| &mut node.data)
    }

    /// Overwrites the element at `index`. Returns false when out of range.
    pub fn set(&mut self, index: usize, data: T) -> bool {
        match self.get_mut(index) {
            Some(slot) => {
                *slot = data;
                true
            }
            None => false,
        }
    }

    /// Inserts so that the new element ends up at `index` and returns the new
    /// length. `index == len` appends; anything beyond returns `None`.
    pub fn insert(&mut self, index: usize, data: T) -> Option<usize> {
        if index > self.len {
            return None;
        }
        if index == self.len {
            return Some(self.append(data));
        }
        if index == 0 {
            return Some(self.prepend(data));
        }

        let next = self.slot_of(index)?;
        let prev = self.node(next)?.prev?;
        let idx = self.alloc(Node {
            data,
            prev: Some(prev),
            next: Some(next),
        });

        self.node_mut(prev)?.next = Some(idx);
        self.node_mut(next)?.prev = Some(idx);
        self.len += 1;
        Some(self.len)
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        let idx = self.slot_of(index)?;
        self.unlink(idx)
    }

    /// Reverses the list in place by swapping every node's links.
    pub fn reverse(&mut self) {
        let mut cursor = self.head;
        while let Some(node) = cursor.and_then(|idx| self.slots.get_mut(idx)).and_then(Option::as_mut) {
            std::mem::swap(&mut node.prev, &mut node.next);
            cursor = node.prev;
        }

        std::mem::swap(&mut self.head, &mut self.tail);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Slot index of the element at list position `index`, walking from
    /// whichever end is closer.
    fn slot_of(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }

        if index < self.len / 2 {
            let mut idx = self.head?;
            for _ in 0..index {
                idx = self.node(idx)?.next?;
            }
            Some(idx)
        } else {
            let mut idx = self.tail?;
            for _ in 0..(self.len - 1 - index) {
                idx = self.node(idx)?.prev?;
            }
            Some(idx)
        }
    }

    fn unlink(&mut self, idx: usize) -> Option<T> {
        let node = self.slots.get_mut(idx)?.take()?;

        match node.prev.and_then(|prev| self.node_mut(prev)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|next| self.node_mut(next)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(idx);
        self.len -= 1;
        Some(node.data)
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.append(item);
        }
        list
    }
}

pub struct Iter<'a, T> {
    list: &'a DoublyLinkedList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
