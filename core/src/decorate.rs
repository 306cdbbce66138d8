//! Lift a per-node callback into a callback over a whole structure.
//!
//! ```
//! use recur_core::structures::{Tree, TreeNode};
//! use recur_core::preorder_fn;
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(1);
//! let branch = tree.push_child(root, 2).unwrap();
//! tree.push_child(branch, 3).unwrap();
//!
//! let mut flatten = preorder_fn::<TreeNode<i32>, _, _>(|node: TreeNode<i32>, out: &mut Vec<i32>| {
//!     out.push(*node.value())
//! });
//! let mut flat = Vec::new();
//! flatten(tree.node(root).unwrap(), &mut flat);
//! assert_eq!(flat, vec![1, 2, 3]);
//! ```

use crate::traversal::{postorder, preorder, IntoTraversal};

/// Wrap `visit` so that calling it on a root visits every node below it in
/// pre-order, handing `args` to each call unchanged.
pub fn preorder_fn<R, A, F>(mut visit: F) -> impl FnMut(R, &mut A)
where
    R: IntoTraversal,
    F: FnMut(R::Node, &mut A),
{
    move |root: R, args: &mut A| {
        for node in preorder(root, None) {
            visit(node, args);
        }
    }
}

/// Post-order counterpart of [`preorder_fn`].
pub fn postorder_fn<R, A, F>(mut visit: F) -> impl FnMut(R, &mut A)
where
    R: IntoTraversal,
    F: FnMut(R::Node, &mut A),
{
    move |root: R, args: &mut A| {
        for node in postorder(root, None) {
            visit(node, args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::{Tree, TreeNode};
    use crate::traversal::{descendants, MultiRecursiveIterator};

    fn make_tree<T: Copy>(values: [T; 4]) -> (Tree<T>, usize) {
        let mut tree = Tree::new();
        let root = tree.insert(values[0]);
        let branch = tree.push_child(root, values[1]).unwrap();
        tree.push_child(branch, values[2]).unwrap();
        tree.push_child(branch, values[3]).unwrap();
        (tree, root)
    }

    #[test]
    fn test_preorder_fn() {
        let (tree, root) = make_tree([1, 2, 3, 4]);
        let mut flatten = preorder_fn::<TreeNode<i32>, _, _>(|n, out: &mut Vec<i32>| {
            out.push(*n.value())
        });
        let mut flat = Vec::new();
        flatten(tree.node(root).unwrap(), &mut flat);
        assert_eq!(flat, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_postorder_fn() {
        let (tree, root) = make_tree(['d', 'c', 'a', 'b']);
        let mut flatten = postorder_fn::<TreeNode<char>, _, _>(|n, out: &mut String| {
            out.push(*n.value())
        });
        let mut flat = String::new();
        flatten(tree.node(root).unwrap(), &mut flat);
        assert_eq!(flat, "abcd");
    }

    #[test]
    fn test_callback_reusable_across_roots() {
        let (tree, root) = make_tree([1, 2, 3, 4]);
        let mut sum = preorder_fn::<TreeNode<i32>, _, _>(|n: TreeNode<i32>, total: &mut i32| {
            *total += *n.value()
        });
        let mut total = 0;
        sum(tree.node(root).unwrap(), &mut total);
        sum(tree.node(1).unwrap(), &mut total);
        assert_eq!(total, 10 + 9);
    }

    #[test]
    fn test_decorator_over_iterator() {
        let (tree, root) = make_tree([1, 2, 3, 4]);
        let mut count =
            postorder_fn::<MultiRecursiveIterator<TreeNode<i32>>, _, _>(|_, n: &mut usize| *n += 1);
        let mut n = 0;
        count(descendants(tree.node(root).unwrap()), &mut n);
        assert_eq!(n, 4);
    }
}
