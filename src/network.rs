use petgraph::graphmap::DiGraphMap;

use crate::amount::Amount;
use crate::edge::Edge;
use crate::error::Error;
use crate::id::NodeId;

/// The attributes carried by every edge of a [`FlowNetwork`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeAttrs<A> {
    pub capacity: A,
    pub cost: A,
    pub lower_bound: A,
}

/// A directed graph with per-edge capacity, cost and lower-bound attributes.
///
/// The store is set up once and treated as read-only by the flow engines;
/// flow assignments and residual graphs are derived values and never mutate
/// it. Outgoing-edge lookup is O(out-degree); iteration order is not part of
/// the contract.
#[derive(Debug, Clone)]
pub struct FlowNetwork<N: NodeId, A: Amount> {
    graph: DiGraphMap<N, EdgeAttrs<A>>,
}

impl<N: NodeId, A: Amount> Default for FlowNetwork<N, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId, A: Amount> FlowNetwork<N, A> {
    pub fn new() -> Self {
        Self {
            graph: DiGraphMap::new(),
        }
    }

    /// Builds a network from validated edges, rejecting duplicates.
    pub fn from_edges<I>(edges: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Edge<N, A>>,
    {
        let mut network = Self::new();
        for edge in edges {
            network.add_edge(edge)?;
        }
        Ok(network)
    }

    /// Adds an isolated node; a no-op if the node is already present.
    pub fn add_node(&mut self, node: N) {
        self.graph.add_node(node);
    }

    /// Adds a validated edge; at most one edge per ordered node pair.
    pub fn add_edge(&mut self, edge: Edge<N, A>) -> Result<(), Error> {
        let (from, to) = edge.endpoints();
        if self.graph.contains_edge(from, to) {
            return Err(Error::DuplicateEdge);
        }
        self.graph.add_edge(
            from,
            to,
            EdgeAttrs {
                capacity: edge.capacity(),
                cost: edge.cost(),
                lower_bound: edge.lower_bound(),
            },
        );
        Ok(())
    }

    pub fn contains_node(&self, node: N) -> bool {
        self.graph.contains_node(node)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.graph.nodes()
    }

    pub fn edges(&self) -> impl Iterator<Item = (N, N, &EdgeAttrs<A>)> + '_ {
        self.graph.all_edges()
    }

    /// The edges leaving `node`.
    pub fn outgoing(&self, node: N) -> impl Iterator<Item = (N, N, &EdgeAttrs<A>)> + '_ {
        self.graph.edges(node)
    }

    pub fn attrs(&self, from: N, to: N) -> Option<&EdgeAttrs<A>> {
        self.graph.edge_weight(from, to)
    }

    /// Whether any edge carries a nonzero lower bound.
    pub fn has_lower_bounds(&self) -> bool {
        self.edges().any(|(_, _, attrs)| attrs.lower_bound > A::zero())
    }

    /// A pair of nodes connected by edges in both directions, if any.
    ///
    /// The pair-keyed residual graph cannot carry two distinct arc costs for
    /// one ordered pair, so the cost-aware engine refuses such networks up
    /// front.
    pub fn antiparallel_pair(&self) -> Option<(N, N)> {
        self.edges()
            .map(|(u, v, _)| (u, v))
            .find(|&(u, v)| self.graph.contains_edge(v, u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &'static str, to: &'static str, capacity: i64) -> Edge<&'static str, i64> {
        Edge::new(from, to, capacity, 0, 0).unwrap()
    }

    #[test]
    fn rejects_duplicate_edges() {
        let mut network = FlowNetwork::new();
        network.add_edge(edge("a", "b", 1)).unwrap();
        assert_eq!(
            network.add_edge(edge("a", "b", 2)),
            Err(Error::DuplicateEdge)
        );
    }

    #[test]
    fn finds_antiparallel_pairs() {
        let mut network = FlowNetwork::new();
        network.add_edge(edge("a", "b", 1)).unwrap();
        network.add_edge(edge("b", "c", 1)).unwrap();
        assert_eq!(network.antiparallel_pair(), None);
        network.add_edge(edge("b", "a", 1)).unwrap();
        assert!(network.antiparallel_pair().is_some());
    }

    #[test]
    fn outgoing_lookup_is_per_node() {
        let network = FlowNetwork::from_edges([
            edge("a", "b", 1),
            edge("a", "c", 2),
            edge("b", "c", 3),
        ])
        .unwrap();
        assert_eq!(network.outgoing("a").count(), 2);
        assert_eq!(network.outgoing("c").count(), 0);
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 3);
        assert!(!network.has_lower_bounds());
    }
}
