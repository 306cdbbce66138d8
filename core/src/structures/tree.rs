use std::fmt;

use super::NodeIndex;
use crate::error::{check_index, RecurError, Result};
use crate::node::{MultiRecursive, Node, Recursive, CHILDREN, PARENTS};
use crate::options::Order;
use crate::traversal::{IntoTraversal, RecursiveIterator};

struct Slot<T> {
    value: T,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

/// A forest of values. Every node starts as a root; attaching it under
/// another node makes it a child, and a child can never be attached twice.
/// Attachments that would close a cycle are rejected, so each component is a
/// proper tree.
pub struct Tree<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            slots: Vec::with_capacity(node_count),
        }
    }

    /// Store a new root node holding `value`.
    pub fn insert(&mut self, value: T) -> NodeIndex {
        self.slots.push(Slot {
            value,
            parent: None,
            children: Vec::new(),
        });
        self.slots.len() - 1
    }

    /// Attach root `child` as the last child of `parent`.
    ///
    /// Fails with `AlreadyAttached` if `child` is not a root, and with
    /// `WouldCycle` if `child` is `parent` or one of its ancestors.
    pub fn add(&mut self, parent: NodeIndex, child: NodeIndex) -> Result<()> {
        check_index(parent, self.slots.len())?;
        check_index(child, self.slots.len())?;

        if self.slots[child].parent.is_some() {
            return Err(RecurError::AlreadyAttached { index: child });
        }

        let mut current = Some(parent);
        while let Some(index) = current {
            if index == child {
                return Err(RecurError::WouldCycle { parent, child });
            }
            current = self.slots[index].parent;
        }

        self.slots[child].parent = Some(parent);
        self.slots[parent].children.push(child);
        Ok(())
    }

    /// Insert `value` and attach it under `parent` in one step.
    pub fn push_child(&mut self, parent: NodeIndex, value: T) -> Result<NodeIndex> {
        check_index(parent, self.slots.len())?;
        let child = self.insert(value);
        self.add(parent, child)?;
        Ok(child)
    }

    /// Handle for traversing from `index`.
    pub fn node(&self, index: NodeIndex) -> Result<TreeNode<'_, T>> {
        check_index(index, self.slots.len())?;
        Ok(TreeNode { tree: self, index })
    }

    pub fn value(&self, index: NodeIndex) -> Option<&T> {
        self.slots.get(index).map(|s| &s.value)
    }

    pub fn value_mut(&mut self, index: NodeIndex) -> Option<&mut T> {
        self.slots.get_mut(index).map(|s| &mut s.value)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Indices of every node that is not attached under another node.
    pub fn roots(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.parent.is_none())
            .map(|(i, _)| i)
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.slots.len())
            .field("roots", &self.roots().count())
            .finish()
    }
}

/// Borrowed handle to one node of a [`Tree`].
pub struct TreeNode<'a, T> {
    tree: &'a Tree<T>,
    index: NodeIndex,
}

impl<T> Clone for TreeNode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TreeNode<'_, T> {}

impl<'a, T> TreeNode<'a, T> {
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn value(&self) -> &'a T {
        &self.tree.slots[self.index].value
    }

    pub fn is_leaf(&self) -> bool {
        self.tree.slots[self.index].children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.tree.slots[self.index].parent.is_none()
    }

    pub fn parent(&self) -> Option<TreeNode<'a, T>> {
        self.tree.slots[self.index].parent.map(|index| self.at(index))
    }

    pub fn children(&self) -> impl Iterator<Item = TreeNode<'a, T>> + 'a {
        let tree = self.tree;
        tree.slots[self.index]
            .children
            .iter()
            .map(move |&index| TreeNode { tree, index })
    }

    fn at(&self, index: NodeIndex) -> TreeNode<'a, T> {
        TreeNode {
            tree: self.tree,
            index,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeNode<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("index", &self.index)
            .field("value", self.value())
            .finish()
    }
}

impl<T> Node for TreeNode<'_, T> {
    type Id = NodeIndex;

    fn id(&self) -> NodeIndex {
        self.index
    }
}

impl<T> Recursive for TreeNode<'_, T> {
    fn recur(&self) -> Vec<Self> {
        self.children().collect()
    }
}

impl<T> MultiRecursive for TreeNode<'_, T> {
    fn multi_recur(&self, relation: usize) -> Vec<Self> {
        match relation {
            CHILDREN => self.recur(),
            PARENTS => self.parent().into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl<'a, T> IntoTraversal for TreeNode<'a, T> {
    type Node = Self;
    type IntoTrav = RecursiveIterator<Self>;

    fn into_traversal(self) -> Self::IntoTrav {
        RecursiveIterator::new(self, Order::Pre)
    }
}

/// Iterating a node walks its subtree in pre-order.
impl<'a, T> IntoIterator for TreeNode<'a, T> {
    type Item = Self;
    type IntoIter = RecursiveIterator<Self>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_traversal()
    }
}

/// Leaves below `node` (or `node` itself if it has no children), pre-order.
pub fn leaves<'a, T>(node: TreeNode<'a, T>) -> impl Iterator<Item = TreeNode<'a, T>> {
    node.into_iter().filter(|n| n.is_leaf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::{ancestors, postorder};

    /// root -> branch -> {left, right}, returned as (tree, [root, branch, left, right])
    fn make_branch() -> (Tree<&'static str>, [NodeIndex; 4]) {
        let mut tree = Tree::new();
        let root = tree.insert("root");
        let branch = tree.push_child(root, "branch").unwrap();
        let left = tree.push_child(branch, "left").unwrap();
        let right = tree.push_child(branch, "right").unwrap();
        (tree, [root, branch, left, right])
    }

    fn values<'a>(iter: impl Iterator<Item = TreeNode<'a, &'static str>>) -> Vec<&'static str> {
        iter.map(|n| *n.value()).collect()
    }

    #[test]
    fn test_iter_pre_order() {
        let (tree, [root, ..]) = make_branch();
        let node = tree.node(root).unwrap();
        assert_eq!(
            values(node.into_iter()),
            vec!["root", "branch", "left", "right"]
        );
    }

    #[test]
    fn test_postorder() {
        let (tree, [root, ..]) = make_branch();
        let node = tree.node(root).unwrap();
        assert_eq!(
            values(postorder(node, None)),
            vec!["left", "right", "branch", "root"]
        );
    }

    #[test]
    fn test_leaf_and_root_flags() {
        let (tree, [root, branch, left, _]) = make_branch();
        assert!(tree.node(root).unwrap().is_root());
        assert!(!tree.node(root).unwrap().is_leaf());
        assert!(!tree.node(branch).unwrap().is_root());
        assert!(tree.node(left).unwrap().is_leaf());
    }

    #[test]
    fn test_leaves() {
        let (tree, [root, branch, left, _]) = make_branch();
        assert_eq!(values(leaves(tree.node(root).unwrap())), vec!["left", "right"]);
        assert_eq!(values(leaves(tree.node(left).unwrap())), vec!["left"]);
        assert_eq!(leaves(tree.node(branch).unwrap()).count(), 2);
    }

    #[test]
    fn test_add_rejects_attached_child() {
        let (mut tree, [root, branch, _, _]) = make_branch();
        let other = tree.insert("other");
        assert_eq!(
            tree.add(other, branch),
            Err(RecurError::AlreadyAttached { index: branch })
        );
        assert!(tree.add(root, other).is_ok());
    }

    #[test]
    fn test_add_rejects_cycle() {
        let (mut tree, [root, _, left, _]) = make_branch();
        assert_eq!(
            tree.add(left, root),
            Err(RecurError::WouldCycle {
                parent: left,
                child: root
            })
        );
        let lone = tree.insert("lone");
        assert_eq!(
            tree.add(lone, lone),
            Err(RecurError::WouldCycle {
                parent: lone,
                child: lone
            })
        );
    }

    #[test]
    fn test_unknown_index() {
        let (mut tree, [root, ..]) = make_branch();
        assert_eq!(
            tree.add(root, 42),
            Err(RecurError::UnknownNode { index: 42, len: 4 })
        );
        assert!(tree.node(4).is_err());
        assert!(tree.push_child(9, "x").is_err());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_ancestors_via_parent_relation() {
        let (tree, [_, _, _, right]) = make_branch();
        assert_eq!(
            values(ancestors(tree.node(right).unwrap())),
            vec!["right", "branch", "root"]
        );
    }

    #[test]
    fn test_roots() {
        let (mut tree, [root, ..]) = make_branch();
        let other = tree.insert("other");
        assert_eq!(tree.roots().collect::<Vec<_>>(), vec![root, other]);
    }

    #[test]
    fn test_value_mut() {
        let mut tree = Tree::new();
        let a = tree.insert(1u32);
        *tree.value_mut(a).unwrap() += 1;
        assert_eq!(tree.value(a), Some(&2));
        assert_eq!(tree.value(1), None);
    }
}
