use std::hash::Hash;

/// Relation index of the primary adjacency list (children).
pub const CHILDREN: usize = 0;

/// Relation index of the secondary adjacency list (parents).
pub const PARENTS: usize = 1;

/// Identity of a traversable node.
///
/// The engine never compares node contents. Two handles with the same `id`
/// are the same node as far as cycle detection is concerned, so `id` must be
/// stable for as long as a traversal runs: a pointer address for shared
/// references, an arena index for arena-backed structures.
pub trait Node {
    type Id: Hash + Eq;

    fn id(&self) -> Self::Id;
}

/// A node with a single adjacency list (trees, undirected graphs).
///
/// `recur` must be a pure query. Changing the structure while a traversal is
/// in progress is the caller's responsibility; the engine does not detect it.
pub trait Recursive: Node + Sized {
    /// Related nodes in the order they should be visited. Empty for a leaf.
    fn recur(&self) -> Vec<Self>;
}

/// A node with several independent adjacency lists, selected by index.
///
/// By convention [`CHILDREN`] (0) selects the children and [`PARENTS`] (1)
/// the parents. The engine attaches no meaning to the index beyond passing it
/// through; an index the type does not model should return an empty list.
pub trait MultiRecursive: Node + Sized {
    fn multi_recur(&self, relation: usize) -> Vec<Self>;
}

/// Address of a shared value, usable as a reference-identity [`Node::Id`].
pub fn address_of<T: ?Sized>(value: &T) -> usize {
    value as *const T as *const () as usize
}
