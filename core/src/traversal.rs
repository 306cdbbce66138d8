use std::fmt;

use tracing::{debug, trace};

use crate::node::{MultiRecursive, Node, Recursive, CHILDREN, PARENTS};
use crate::options::{Direction, Order, Prune, TraversalOptions};
use crate::visited::Visited;

/// One node being expanded: its remaining related nodes, plus the node itself
/// if it still owes a post-order yield.
struct Frame<N> {
    pending: Option<N>,
    related: std::vec::IntoIter<N>,
}

/// Depth-first state machine shared by both iterator flavours.
///
/// Equivalent to a recursive generator that, per node, marks it visited,
/// applies the prune predicate, yields it (pre-order), descends into every
/// unvisited related node, then yields it (post-order). The recursion is
/// replaced by an explicit frame stack so depth is bounded only by memory.
struct Walk<N: Node> {
    start: Option<N>,
    stack: Vec<Frame<N>>,
    order: Order,
    direction: Direction,
    prune: Option<Prune<N>>,
    visited: Visited<N::Id>,
    exhausted: bool,
}

impl<N: Node> Walk<N> {
    fn new(root: N, order: Order) -> Self {
        Self {
            start: Some(root),
            stack: Vec::new(),
            order,
            direction: Direction::Forward,
            prune: None,
            visited: Visited::new(),
            exhausted: false,
        }
    }

    /// Fresh walk from `root` with the same policy and the same visited set.
    fn branch(&self, root: N) -> Self {
        Self {
            start: Some(root),
            stack: Vec::new(),
            order: self.order,
            direction: self.direction,
            prune: self.prune.clone(),
            visited: self.visited.clone(),
            exhausted: false,
        }
    }

    /// Enter `node`. Returns it when pre-order wants it yielded right away.
    ///
    /// The node is marked visited before the prune check and before its
    /// related nodes are fetched, so a pruned node still blocks other paths
    /// and a node linking back to itself cannot recurse.
    fn descend<F>(&mut self, node: N, expand: &F) -> Option<N>
    where
        F: Fn(&N) -> Vec<N>,
    {
        if !self.visited.insert(node.id()) {
            return None;
        }

        if let Some(prune) = &self.prune {
            if prune(&node) {
                trace!(depth = self.stack.len(), "pruned subtree");
                return None;
            }
        }

        let mut related = expand(&node);
        if self.direction == Direction::Reverse {
            related.reverse();
        }

        match self.order {
            Order::Pre => {
                self.stack.push(Frame {
                    pending: None,
                    related: related.into_iter(),
                });
                Some(node)
            }
            Order::Post => {
                self.stack.push(Frame {
                    pending: Some(node),
                    related: related.into_iter(),
                });
                None
            }
        }
    }

    fn advance<F>(&mut self, expand: F) -> Option<N>
    where
        F: Fn(&N) -> Vec<N>,
    {
        if let Some(root) = self.start.take() {
            if let Some(node) = self.descend(root, &expand) {
                return Some(node);
            }
        }

        loop {
            let next = match self.stack.last_mut() {
                Some(frame) => frame.related.next(),
                None => {
                    self.finish();
                    return None;
                }
            };

            match next {
                Some(related) => {
                    if let Some(node) = self.descend(related, &expand) {
                        return Some(node);
                    }
                }
                None => {
                    // Frames opened under post-order still yield here even if
                    // the order was flipped since, so nothing is dropped.
                    if let Some(node) = self.stack.pop().and_then(|frame| frame.pending) {
                        return Some(node);
                    }
                }
            }
        }
    }

    fn finish(&mut self) {
        if !self.exhausted {
            self.exhausted = true;
            debug!(
                order = %self.order,
                direction = %self.direction,
                visited = self.visited.len(),
                "traversal exhausted"
            );
        }
    }

    fn fmt_fields(&self, s: &mut fmt::DebugStruct<'_, '_>) {
        s.field("order", &self.order)
            .field("direction", &self.direction)
            .field("pruned", &self.prune.is_some())
            .field("depth", &self.stack.len())
            .field("visited", &self.visited.len())
            .field("exhausted", &self.exhausted);
    }
}

/// An iterator whose order and prune predicate can be reconfigured in place.
pub trait Traversal: Iterator + Sized {
    fn order(&self) -> Order;

    /// Change the order. Only nodes not yet entered are affected.
    fn set_order(&mut self, order: Order);

    fn direction(&self) -> Direction;

    /// Replace (or clear) the prune predicate for nodes not yet entered.
    fn set_prune(&mut self, prune: Option<Prune<Self::Item>>);

    /// Flip pre-order and post-order from this point on.
    fn reverse(&mut self) {
        let order = self.order().flipped();
        self.set_order(order);
    }

    /// Consuming form of [`Traversal::reverse`].
    fn reversed(mut self) -> Self {
        self.reverse();
        self
    }
}

/// Anything that can start a traversal: iterators themselves, and node
/// handles of structures that pick a default relation.
pub trait IntoTraversal {
    type Node: Node;
    type IntoTrav: Traversal<Item = Self::Node>;

    fn into_traversal(self) -> Self::IntoTrav;
}

/// Depth-first traversal of a single-relation structure.
///
/// Each reachable node is yielded exactly once even when the structure has
/// cycles. The iterator is lazy: the related nodes of a node are fetched when
/// the walk enters it, and nothing further is computed until the next pull.
pub struct RecursiveIterator<N: Node> {
    walk: Walk<N>,
}

impl<N: Recursive> RecursiveIterator<N> {
    pub fn new(root: N, order: Order) -> Self {
        Self {
            walk: Walk::new(root, order),
        }
    }

    pub fn with_options(root: N, options: &TraversalOptions) -> Self {
        Self::new(root, options.order).with_direction(options.direction)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.walk.direction = direction;
        self
    }

    pub fn with_prune(mut self, prune: Prune<N>) -> Self {
        self.walk.prune = Some(prune);
        self
    }

    /// Join an existing traversal's visited set. Nodes already in it are
    /// skipped, including the root.
    pub fn with_visited(mut self, visited: Visited<N::Id>) -> Self {
        self.walk.visited = visited;
        self
    }

    /// Iterator over another root that shares this one's order, direction,
    /// prune predicate and visited set.
    pub fn branch(&self, root: N) -> Self {
        Self {
            walk: self.walk.branch(root),
        }
    }

    pub fn visited(&self) -> &Visited<N::Id> {
        &self.walk.visited
    }
}

impl<N: Recursive> Iterator for RecursiveIterator<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        self.walk.advance(N::recur)
    }
}

impl<N: Recursive> Traversal for RecursiveIterator<N> {
    fn order(&self) -> Order {
        self.walk.order
    }

    fn set_order(&mut self, order: Order) {
        self.walk.order = order;
    }

    fn direction(&self) -> Direction {
        self.walk.direction
    }

    fn set_prune(&mut self, prune: Option<Prune<N>>) {
        self.walk.prune = prune;
    }
}

impl<N: Recursive> IntoTraversal for RecursiveIterator<N> {
    type Node = N;
    type IntoTrav = Self;

    fn into_traversal(self) -> Self {
        self
    }
}

impl<N: Node> fmt::Debug for RecursiveIterator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("RecursiveIterator");
        self.walk.fmt_fields(&mut s);
        s.finish()
    }
}

/// Depth-first traversal following one relation of a multi-relation
/// structure. Branches keep following the same relation.
pub struct MultiRecursiveIterator<N: Node> {
    walk: Walk<N>,
    relation: usize,
}

impl<N: MultiRecursive> MultiRecursiveIterator<N> {
    pub fn new(root: N, relation: usize, order: Order) -> Self {
        Self {
            walk: Walk::new(root, order),
            relation,
        }
    }

    pub fn with_options(root: N, relation: usize, options: &TraversalOptions) -> Self {
        Self::new(root, relation, options.order).with_direction(options.direction)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.walk.direction = direction;
        self
    }

    pub fn with_prune(mut self, prune: Prune<N>) -> Self {
        self.walk.prune = Some(prune);
        self
    }

    pub fn with_visited(mut self, visited: Visited<N::Id>) -> Self {
        self.walk.visited = visited;
        self
    }

    pub fn branch(&self, root: N) -> Self {
        Self {
            walk: self.walk.branch(root),
            relation: self.relation,
        }
    }

    pub fn relation(&self) -> usize {
        self.relation
    }

    pub fn visited(&self) -> &Visited<N::Id> {
        &self.walk.visited
    }
}

impl<N: MultiRecursive> Iterator for MultiRecursiveIterator<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let relation = self.relation;
        self.walk.advance(|node: &N| node.multi_recur(relation))
    }
}

impl<N: MultiRecursive> Traversal for MultiRecursiveIterator<N> {
    fn order(&self) -> Order {
        self.walk.order
    }

    fn set_order(&mut self, order: Order) {
        self.walk.order = order;
    }

    fn direction(&self) -> Direction {
        self.walk.direction
    }

    fn set_prune(&mut self, prune: Option<Prune<N>>) {
        self.walk.prune = prune;
    }
}

impl<N: MultiRecursive> IntoTraversal for MultiRecursiveIterator<N> {
    type Node = N;
    type IntoTrav = Self;

    fn into_traversal(self) -> Self {
        self
    }
}

impl<N: Node> fmt::Debug for MultiRecursiveIterator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("MultiRecursiveIterator");
        s.field("relation", &self.relation);
        self.walk.fmt_fields(&mut s);
        s.finish()
    }
}

/// `node` followed by everything reachable through relation 0, pre-order.
pub fn descendants<N: MultiRecursive>(node: N) -> MultiRecursiveIterator<N> {
    MultiRecursiveIterator::new(node, CHILDREN, Order::Pre)
}

/// `node` followed by everything reachable through relation 1, pre-order.
pub fn ancestors<N: MultiRecursive>(node: N) -> MultiRecursiveIterator<N> {
    MultiRecursiveIterator::new(node, PARENTS, Order::Pre)
}

/// Force pre-order and the given prune predicate on a traversal.
///
/// On an iterator that has already yielded, only later output changes.
pub fn preorder<T: IntoTraversal>(iterable: T, prune: Option<Prune<T::Node>>) -> T::IntoTrav {
    let mut traversal = iterable.into_traversal();
    traversal.set_order(Order::Pre);
    traversal.set_prune(prune);
    traversal
}

/// Force post-order and the given prune predicate on a traversal.
pub fn postorder<T: IntoTraversal>(iterable: T, prune: Option<Prune<T::Node>>) -> T::IntoTrav {
    let mut traversal = iterable.into_traversal();
    traversal.set_order(Order::Post);
    traversal.set_prune(prune);
    traversal
}
