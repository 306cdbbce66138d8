use super::NodeIndex;
use crate::error::{check_index, Result};
use crate::node::{Node, Recursive};
use crate::options::Order;
use crate::traversal::{IntoTraversal, RecursiveIterator};

/// Undirected graph where every node is a traversal entry point.
///
/// Links are symmetric and have set semantics: linking two nodes twice is a
/// no-op. Neighbors are returned in the order links were first made.
/// Traversal from any node covers its connected component exactly once,
/// however many cycles it contains.
#[derive(Debug, Default)]
pub struct Undirected {
    links: Vec<Vec<NodeIndex>>,
}

impl Undirected {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            links: Vec::with_capacity(node_count),
        }
    }

    /// Add an unlinked node.
    pub fn add_node(&mut self) -> NodeIndex {
        self.links.push(Vec::new());
        self.links.len() - 1
    }

    /// Link `a` and `b` in both directions.
    pub fn link(&mut self, a: NodeIndex, b: NodeIndex) -> Result<&mut Self> {
        check_index(a, self.links.len())?;
        check_index(b, self.links.len())?;

        if !self.links[a].contains(&b) {
            self.links[a].push(b);
        }
        if !self.links[b].contains(&a) {
            self.links[b].push(a);
        }
        Ok(self)
    }

    /// Add a node already linked to `existing`.
    pub fn add_linked(&mut self, existing: NodeIndex) -> Result<NodeIndex> {
        check_index(existing, self.links.len())?;
        let node = self.add_node();
        self.link(existing, node)?;
        Ok(node)
    }

    pub fn node(&self, index: NodeIndex) -> Result<UndirectedNode<'_>> {
        check_index(index, self.links.len())?;
        Ok(UndirectedNode { graph: self, index })
    }

    pub fn neighbors(&self, index: NodeIndex) -> &[NodeIndex] {
        self.links.get(index).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.links.len()
    }

    /// Number of undirected links (a self link counts once).
    pub fn link_count(&self) -> usize {
        let ends: usize = self.links.iter().map(|v| v.len()).sum();
        let self_links = self
            .links
            .iter()
            .enumerate()
            .filter(|(i, v)| v.contains(i))
            .count();
        (ends + self_links) / 2
    }
}

/// Borrowed handle to one node of an [`Undirected`] graph.
#[derive(Debug, Clone, Copy)]
pub struct UndirectedNode<'a> {
    graph: &'a Undirected,
    index: NodeIndex,
}

impl UndirectedNode<'_> {
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn degree(&self) -> usize {
        self.graph.neighbors(self.index).len()
    }
}

impl Node for UndirectedNode<'_> {
    type Id = NodeIndex;

    fn id(&self) -> NodeIndex {
        self.index
    }
}

impl Recursive for UndirectedNode<'_> {
    fn recur(&self) -> Vec<Self> {
        self.graph
            .neighbors(self.index)
            .iter()
            .map(|&index| UndirectedNode {
                graph: self.graph,
                index,
            })
            .collect()
    }
}

impl<'a> IntoTraversal for UndirectedNode<'a> {
    type Node = Self;
    type IntoTrav = RecursiveIterator<Self>;

    fn into_traversal(self) -> Self::IntoTrav {
        RecursiveIterator::new(self, Order::Pre)
    }
}

impl<'a> IntoIterator for UndirectedNode<'a> {
    type Item = Self;
    type IntoIter = RecursiveIterator<Self>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_traversal()
    }
}
