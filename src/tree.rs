//! General tree with a fixed root.
//!
//! Nodes are stored in an arena and addressed by [`NodeId`]. Lookups compare
//! payloads, so the first node holding equal data wins. Traversals are
//! iterative and run over the crate's own [`Stack`] and [`Queue`].

use tracing::warn;

use crate::errors::TreeError;
use crate::queue::{Fifo, Queue};
use crate::stack::Stack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct TreeNode<T> {
    data: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<Option<TreeNode<T>>>,
    free: Vec<usize>,
    root: NodeId,
    len: usize,
}

impl<T> Tree<T> {
    pub fn new(data: T) -> Self {
        Self {
            nodes: vec![Some(TreeNode {
                data,
                parent: None,
                children: Vec::new(),
            })],
            free: Vec::new(),
            root: NodeId(0),
            len: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.data)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Visits every node after all of its children (post-order).
    pub fn for_each_depth_first<F: FnMut(&T)>(&self, mut visit: F) {
        let mut pending = Stack::new();
        let mut order = Stack::new();
        pending.push(self.root);

        while let Some(id) = pending.pop() {
            if let Some(node) = self.node(id) {
                order.push(id);
                for child in &node.children {
                    pending.push(*child);
                }
            }
        }

        while let Some(id) = order.pop() {
            if let Some(data) = self.get(id) {
                visit(data);
            }
        }
    }

    /// Visits nodes level by level, starting at the root.
    pub fn for_each_breadth_first<F: FnMut(&T)>(&self, mut visit: F) {
        let mut pending = Queue::new();
        pending.push(self.root);

        while let Some(id) = pending.pop() {
            if let Some(node) = self.node(id) {
                visit(&node.data);
                for child in &node.children {
                    pending.push(*child);
                }
            }
        }
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode<T>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode<T>> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn alloc(&mut self, node: TreeNode<T>) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                NodeId(idx)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release_subtree(&mut self, id: NodeId) {
        let mut pending = Stack::new();
        pending.push(id);

        while let Some(id) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) {
                for child in node.children {
                    pending.push(child);
                }
                self.free.push(id.0);
                self.len -= 1;
            }
        }
    }
}

impl<T: PartialEq> Tree<T> {
    /// Depth-first (pre-order) search for the first node holding `data`.
    pub fn find(&self, data: &T) -> Option<NodeId> {
        let mut pending = Stack::new();
        pending.push(self.root);

        while let Some(id) = pending.pop() {
            let node = match self.node(id) {
                Some(node) => node,
                None => continue,
            };
            if node.data == *data {
                return Some(id);
            }
            for child in node.children.iter().rev() {
                pending.push(*child);
            }
        }

        None
    }

    /// Adds `data` as the last child of the first node holding `parent`.
    pub fn add(&mut self, data: T, parent: &T) -> Result<NodeId, TreeError> {
        let parent = self.find(parent).ok_or(TreeError::ParentNotFound)?;
        let id = self.alloc(TreeNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });

        self.node_mut(parent)
            .ok_or(TreeError::ParentNotFound)?
            .children
            .push(id);
        Ok(id)
    }

    /// Removes the first node holding `data` together with its descendants.
    /// The root can't be removed.
    pub fn remove(&mut self, data: &T) -> Result<(), TreeError> {
        let id = self.find(data).ok_or(TreeError::NotFound)?;
        if id == self.root {
            warn!("unable to remove root tree node");
            return Err(TreeError::RootRemoval);
        }

        if let Some(parent) = self.parent(id).and_then(|parent| self.node_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }
        self.release_subtree(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //        root
    //       /    \
    //      a      b
    //     / \      \
    //    a1  a2     b1
    fn sample() -> Tree<&'static str> {
        let mut tree = Tree::new("root");
        tree.add("a", &"root").unwrap();
        tree.add("b", &"root").unwrap();
        tree.add("a1", &"a").unwrap();
        tree.add("a2", &"a").unwrap();
        tree.add("b1", &"b").unwrap();
        tree
    }

    fn depth_first(tree: &Tree<&'static str>) -> Vec<&'static str> {
        let mut seen = Vec::new();
        tree.for_each_depth_first(|data| seen.push(*data));
        seen
    }

    fn breadth_first(tree: &Tree<&'static str>) -> Vec<&'static str> {
        let mut seen = Vec::new();
        tree.for_each_breadth_first(|data| seen.push(*data));
        seen
    }

    #[test]
    fn test_find() {
        let tree = sample();

        let a2 = tree.find(&"a2").unwrap();
        assert_eq!(tree.get(a2), Some(&"a2"));
        assert_eq!(tree.get(tree.parent(a2).unwrap()), Some(&"a"));
        assert_eq!(tree.find(&"root"), Some(tree.root()));
        assert_eq!(tree.find(&"missing"), None);
    }

    #[test]
    fn test_add_to_missing_parent() {
        let mut tree = sample();

        assert_eq!(tree.add("x", &"nowhere"), Err(TreeError::ParentNotFound));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let tree = sample();
        let names: Vec<_> = tree
            .children(tree.root())
            .iter()
            .filter_map(|id| tree.get(*id))
            .copied()
            .collect();

        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_depth_first_visits_children_before_parent() {
        assert_eq!(depth_first(&sample()), vec!["a1", "a2", "a", "b1", "b", "root"]);
    }

    #[test]
    fn test_breadth_first() {
        assert_eq!(breadth_first(&sample()), vec!["root", "a", "b", "a1", "a2", "b1"]);
    }

    #[test]
    fn test_remove_subtree() {
        let mut tree = sample();

        assert_eq!(tree.remove(&"a"), Ok(()));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.find(&"a1"), None);
        assert_eq!(breadth_first(&tree), vec!["root", "b", "b1"]);

        tree.add("c", &"b1").unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(depth_first(&tree), vec!["c", "b1", "b", "root"]);
    }

    #[test]
    fn test_remove_root_is_rejected() {
        let mut tree = sample();

        assert_eq!(tree.remove(&"root"), Err(TreeError::RootRemoval));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_remove_missing() {
        let mut tree = sample();
        assert_eq!(tree.remove(&"ghost"), Err(TreeError::NotFound));
    }
}
