use std::collections::HashMap;

use crate::node::{MultiRecursive, Node, Recursive, CHILDREN, PARENTS};
use crate::traversal::{descendants, IntoTraversal, MultiRecursiveIterator};

/// External node identifier.
pub type NodeId = u64;

/// Metadata about a node.
#[derive(Debug, Clone, Default)]
pub struct NodeInfo {
    pub label: String,
}

/// Directed graph: adjacency lists + node metadata.
///
/// Edges are stored on both ends: `outgoing[a]` holds the targets of edges
/// from a, `incoming[b]` the sources of edges into b. As a multi-relation
/// structure, relation 0 follows outgoing edges (children) and relation 1
/// follows incoming edges (parents). Parallel edges are kept; traversal
/// descends through them once.
#[derive(Debug, Default)]
pub struct Digraph {
    outgoing: HashMap<NodeId, Vec<NodeId>>,
    incoming: HashMap<NodeId, Vec<NodeId>>,
    nodes: HashMap<NodeId, NodeInfo>,
}

impl Digraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            outgoing: HashMap::with_capacity(node_count),
            incoming: HashMap::with_capacity(node_count),
            nodes: HashMap::with_capacity(node_count),
        }
    }

    /// Register a node, replacing its label if it already exists.
    pub fn add_node(&mut self, id: NodeId, label: impl Into<String>) {
        self.nodes.insert(id, NodeInfo { label: label.into() });
    }

    /// Add a directed edge. Unregistered endpoints are registered unlabeled.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.nodes.entry(from).or_default();
        self.nodes.entry(to).or_default();
        self.outgoing.entry(from).or_default().push(to);
        self.incoming.entry(to).or_default().push(from);
    }

    /// Bulk load from `(from, to)` pairs.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }

    /// Handle for traversing from `id`, or None if the node is unknown.
    pub fn node(&self, id: NodeId) -> Option<GraphNode<'_>> {
        self.nodes.contains_key(&id).then_some(GraphNode { graph: self, id })
    }

    pub fn info(&self, id: NodeId) -> Option<&NodeInfo> {
        self.nodes.get(&id)
    }

    pub fn neighbors_out(&self, id: NodeId) -> &[NodeId] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn neighbors_in(&self, id: NodeId) -> &[NodeId] {
        self.incoming.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(|v| v.len()).sum()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let nodes_mem = self.nodes.len() * (size_of::<NodeId>() + size_of::<NodeInfo>() + 16);
        let edges_mem = 2 * self.edge_count() * size_of::<NodeId>();
        nodes_mem + edges_mem
    }
}

/// Borrowed handle to one node of a [`Digraph`].
#[derive(Debug, Clone, Copy)]
pub struct GraphNode<'a> {
    graph: &'a Digraph,
    id: NodeId,
}

impl<'a> GraphNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &'a str {
        self.graph
            .nodes
            .get(&self.id)
            .map(|n| n.label.as_str())
            .unwrap_or_default()
    }

    fn wrap(&self, ids: &[NodeId]) -> Vec<Self> {
        ids.iter()
            .map(|&id| GraphNode {
                graph: self.graph,
                id,
            })
            .collect()
    }
}

impl Node for GraphNode<'_> {
    type Id = NodeId;

    fn id(&self) -> NodeId {
        self.id
    }
}

/// Single-relation view: outgoing edges.
impl Recursive for GraphNode<'_> {
    fn recur(&self) -> Vec<Self> {
        self.wrap(self.graph.neighbors_out(self.id))
    }
}

impl MultiRecursive for GraphNode<'_> {
    fn multi_recur(&self, relation: usize) -> Vec<Self> {
        match relation {
            CHILDREN => self.wrap(self.graph.neighbors_out(self.id)),
            PARENTS => self.wrap(self.graph.neighbors_in(self.id)),
            _ => Vec::new(),
        }
    }
}

impl<'a> IntoTraversal for GraphNode<'a> {
    type Node = Self;
    type IntoTrav = MultiRecursiveIterator<Self>;

    fn into_traversal(self) -> Self::IntoTrav {
        descendants(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{prune, Direction, Order};
    use crate::traversal::{ancestors, postorder, RecursiveIterator};

    fn make_chain(n: u64) -> Digraph {
        let mut g = Digraph::new();
        g.load_edges((0..n - 1).map(|i| (i, i + 1)));
        g
    }

    fn make_star(center: u64, leaves: u64) -> Digraph {
        let mut g = Digraph::new();
        g.add_node(center, "Hub");
        g.load_edges((1..=leaves).map(|i| (center, center + i)));
        g
    }

    fn make_cycle(n: u64) -> Digraph {
        let mut g = Digraph::new();
        g.load_edges((0..n).map(|i| (i, (i + 1) % n)));
        g
    }

    fn ids<'a>(iter: impl Iterator<Item = GraphNode<'a>>) -> Vec<NodeId> {
        iter.map(|n| n.id()).collect()
    }

    #[test]
    fn test_descendants_and_ancestors_chain() {
        let g = make_chain(5);
        assert_eq!(ids(descendants(g.node(0).unwrap())), vec![0, 1, 2, 3, 4]);
        assert_eq!(ids(ancestors(g.node(4).unwrap())), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_middle_of_chain() {
        let g = make_chain(5);
        let mid = g.node(2).unwrap();
        assert_eq!(ids(descendants(mid)), vec![2, 3, 4]);
        assert_eq!(ids(ancestors(mid)), vec![2, 1, 0]);
    }

    #[test]
    fn test_star_post_order() {
        let g = make_star(0, 3);
        assert_eq!(ids(postorder(g.node(0).unwrap(), None)), vec![1, 2, 3, 0]);
        let rev = descendants(g.node(0).unwrap()).with_direction(Direction::Reverse);
        assert_eq!(ids(rev), vec![0, 3, 2, 1]);
        assert_eq!(g.node(0).unwrap().label(), "Hub");
        assert_eq!(g.node(1).unwrap().label(), "");
    }

    #[test]
    fn test_cycle_no_infinite_loop() {
        let g = make_cycle(5);
        assert_eq!(ids(descendants(g.node(3).unwrap())), vec![3, 4, 0, 1, 2]);
        assert_eq!(ids(ancestors(g.node(3).unwrap())), vec![3, 2, 1, 0, 4]);
    }

    #[test]
    fn test_parallel_edges() {
        let mut g = Digraph::new();
        g.load_edges(vec![(0, 1), (0, 1), (0, 1)]);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(ids(g.node(0).unwrap().into_traversal()), vec![0, 1]);
    }

    #[test]
    fn test_recursive_view_follows_outgoing() {
        let g = make_chain(3);
        let it = RecursiveIterator::new(g.node(1).unwrap(), Order::Post);
        assert_eq!(ids(it), vec![2, 1]);
    }

    #[test]
    fn test_prune_ancestors() {
        // Diamond: 0 -> {1, 2} -> 3
        let mut g = Digraph::new();
        g.load_edges(vec![(0, 1), (0, 2), (1, 3), (2, 3)]);
        let it = ancestors(g.node(3).unwrap()).with_prune(prune(|n: &GraphNode| n.id() == 1));
        assert_eq!(ids(it), vec![3, 2, 0]);
    }

    #[test]
    fn test_unknown_node() {
        let g = make_chain(3);
        assert!(g.node(99).is_none());
        assert!(g.neighbors_out(99).is_empty());
        assert!(g.neighbors_in(0).is_empty());
        assert!(g.info(0).is_some());
    }

    #[test]
    fn test_counts() {
        let g = make_star(0, 100);
        assert_eq!(g.node_count(), 101);
        assert_eq!(g.edge_count(), 100);
        assert!(g.memory_usage() > 0);
    }
}
