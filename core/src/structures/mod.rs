//! Ready-made traversable structures.
//!
//! All three are arena-backed: nodes live in the structure and are addressed
//! by index, and traversal runs over small `Copy` handles borrowing the
//! structure. Node identity is the index, so handles from two different
//! structures must not be mixed in one traversal.

mod graph;
mod tree;
mod undirected;

pub use graph::{Digraph, GraphNode, NodeId, NodeInfo};
pub use tree::{leaves, Tree, TreeNode};
pub use undirected::{Undirected, UndirectedNode};

/// Position of a node in a [`Tree`] or [`Undirected`] arena.
pub type NodeIndex = usize;
