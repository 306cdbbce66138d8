//! recur-core: ordered, cycle-safe traversal of self-referential structures.
//!
//! A type becomes traversable by reporting its identity ([`Node`]) and its
//! related nodes, either through one adjacency list ([`Recursive`]) or
//! several indexed ones ([`MultiRecursive`]). The iterators then walk it
//! depth-first in pre- or post-order, forward or with sibling order reversed,
//! skipping pruned subtrees and never yielding a node twice, even when the
//! structure has cycles.
//!
//! Traversal is lazy and single-threaded. Every iterator spawned from one
//! traversal shares a single [`Visited`] set. Changing a structure while a
//! traversal over it is running is not detected; the output is then
//! unspecified.
//!
//! ```
//! use recur_core::structures::Digraph;
//! use recur_core::{ancestors, descendants};
//!
//! let mut g = Digraph::new();
//! g.load_edges([(0, 1), (1, 2), (2, 0)]);
//! let ids: Vec<_> = descendants(g.node(1).unwrap()).map(|n| n.id()).collect();
//! assert_eq!(ids, vec![1, 2, 0]);
//! let ids: Vec<_> = ancestors(g.node(1).unwrap()).map(|n| n.id()).collect();
//! assert_eq!(ids, vec![1, 0, 2]);
//! ```

mod decorate;
mod error;
mod node;
mod options;
mod traversal;
mod visited;

pub mod structures;

pub use decorate::{postorder_fn, preorder_fn};
pub use error::{RecurError, Result};
pub use node::{address_of, MultiRecursive, Node, Recursive, CHILDREN, PARENTS};
pub use options::{prune, Direction, Order, Prune, TraversalOptions};
pub use traversal::{
    ancestors, descendants, postorder, preorder, IntoTraversal, MultiRecursiveIterator,
    RecursiveIterator, Traversal,
};
pub use visited::Visited;
