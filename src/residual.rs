use core::cmp::min;

use petgraph::graphmap::DiGraphMap;

use crate::amount::Amount;
use crate::error::Error;
use crate::flow::FlowAssignment;
use crate::id::NodeId;
use crate::network::FlowNetwork;

/// An arc of a residual graph: the remaining capacity in this direction and
/// the cost of sending a unit along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidualEdge<A> {
    pub capacity: A,
    pub cost: A,
}

/// The residual graph of a flow network under a given flow assignment.
///
/// For every primal edge (u, v) carrying flow f there is a forward arc
/// (u, v) with capacity `capacity - f` and the primal cost, and a backward
/// arc (v, u) with capacity `f - lower_bound` and the negated cost; arcs are
/// only materialized with positive capacity. The graph is fully determined
/// by (network, flow) and is rebuilt after every flow change rather than
/// patched in place.
#[derive(Debug, Clone)]
pub struct ResidualGraph<N: NodeId, A: Amount> {
    graph: DiGraphMap<N, ResidualEdge<A>>,
}

impl<N: NodeId, A: Amount> ResidualGraph<N, A> {
    /// Derives the residual graph of `network` under `flow`.
    ///
    /// A flow outside `[lower_bound, capacity]` on any edge is a
    /// precondition failure and is reported, never corrected.
    pub fn build(network: &FlowNetwork<N, A>, flow: &FlowAssignment<N, A>) -> Result<Self, Error> {
        let mut graph = DiGraphMap::new();
        for node in network.nodes() {
            graph.add_node(node);
        }
        for (u, v, attrs) in network.edges() {
            let f = flow.get(&(u, v)).copied().unwrap_or_else(A::zero);
            if f < attrs.lower_bound || f > attrs.capacity {
                return Err(Error::FlowOutOfBounds);
            }
            let forward = attrs.capacity - f;
            if forward > A::zero() {
                accumulate(&mut graph, u, v, forward, attrs.cost);
            }
            let backward = f - attrs.lower_bound;
            if backward > A::zero() {
                accumulate(&mut graph, v, u, backward, -attrs.cost);
            }
        }
        Ok(Self { graph })
    }

    pub(crate) fn with_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
    {
        let mut graph = DiGraphMap::new();
        for node in nodes {
            graph.add_node(node);
        }
        Self { graph }
    }

    pub(crate) fn insert_arc(&mut self, from: N, to: N, arc: ResidualEdge<A>) {
        self.graph.add_edge(from, to, arc);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn contains_node(&self, node: N) -> bool {
        self.graph.contains_node(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.graph.nodes()
    }

    pub fn arcs(&self) -> impl Iterator<Item = (N, N, &ResidualEdge<A>)> + '_ {
        self.graph.all_edges()
    }

    /// The arcs leaving `node`.
    pub fn outgoing(&self, node: N) -> impl Iterator<Item = (N, N, &ResidualEdge<A>)> + '_ {
        self.graph.edges(node)
    }

    pub fn capacity(&self, from: N, to: N) -> Option<A> {
        self.graph.edge_weight(from, to).map(|arc| arc.capacity)
    }

    pub fn cost(&self, from: N, to: N) -> Option<A> {
        self.graph.edge_weight(from, to).map(|arc| arc.cost)
    }
}

// A forward arc and the backward arc of an antiparallel partner may fall on
// the same ordered pair; capacities accumulate and the first cost is kept.
fn accumulate<N: NodeId, A: Amount>(
    graph: &mut DiGraphMap<N, ResidualEdge<A>>,
    from: N,
    to: N,
    capacity: A,
    cost: A,
) {
    match graph.edge_weight_mut(from, to) {
        Some(arc) => arc.capacity += capacity,
        None => {
            graph.add_edge(from, to, ResidualEdge { capacity, cost });
        }
    }
}

/// Applies an augmentation of `delta` along the path given as `edges`.
///
/// Forward primal headroom is consumed first; any remainder cancels flow on
/// the antiparallel primal edge. With `delta` at most the path bottleneck
/// this leaves every edge inside its bounds.
pub fn augment<N: NodeId, A: Amount>(
    network: &FlowNetwork<N, A>,
    flow: &mut FlowAssignment<N, A>,
    edges: &[(N, N)],
    delta: A,
) {
    for &(u, v) in edges {
        let mut remaining = delta;
        if let Some(attrs) = network.attrs(u, v) {
            let current = flow.get(&(u, v)).copied().unwrap_or_else(A::zero);
            let step = min(remaining, attrs.capacity - current);
            if step > A::zero() {
                *flow.entry((u, v)).or_default() += step;
                remaining -= step;
            }
        }
        if remaining > A::zero() {
            *flow.entry((v, u)).or_default() -= remaining;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;

    use super::*;
    use crate::edge::Edge;

    fn network() -> FlowNetwork<&'static str, i64> {
        FlowNetwork::from_edges([
            Edge::new("s", "a", 4, 2, 0).unwrap(),
            Edge::new("a", "t", 4, 5, 1).unwrap(),
            Edge::new("s", "t", 0, 1, 0).unwrap(),
        ])
        .unwrap()
    }

    fn arcs_of(residual: &ResidualGraph<&'static str, i64>) -> BTreeMap<(&'static str, &'static str), (i64, i64)> {
        residual
            .arcs()
            .map(|(u, v, arc)| ((u, v), (arc.capacity, arc.cost)))
            .collect()
    }

    #[test]
    fn forward_and_backward_arcs() {
        let mut flow = FlowAssignment::new();
        flow.insert(("s", "a"), 3);
        flow.insert(("a", "t"), 3);
        let residual = ResidualGraph::build(&network(), &flow).unwrap();

        assert_eq!(residual.capacity("s", "a"), Some(1));
        assert_eq!(residual.cost("s", "a"), Some(2));
        assert_eq!(residual.capacity("a", "s"), Some(3));
        assert_eq!(residual.cost("a", "s"), Some(-2));
        // the backward arc stops at the lower bound
        assert_eq!(residual.capacity("t", "a"), Some(2));
        assert_eq!(residual.cost("t", "a"), Some(-5));
    }

    #[test]
    fn zero_capacity_arcs_are_not_materialized() {
        let flow = FlowAssignment::new();
        let network = FlowNetwork::from_edges([Edge::new("s", "t", 0, 1, 0).unwrap()]).unwrap();
        let residual = ResidualGraph::build(&network, &flow).unwrap();
        assert_eq!(residual.capacity("s", "t"), None);
        assert_eq!(residual.capacity("t", "s"), None);
        assert!(residual.contains_node("s") && residual.contains_node("t"));
    }

    #[test]
    fn out_of_bounds_flow_is_a_precondition_failure() {
        let mut flow = FlowAssignment::new();
        flow.insert(("s", "a"), 5);
        assert_eq!(
            ResidualGraph::build(&network(), &flow).err(),
            Some(Error::FlowOutOfBounds)
        );

        // below the lower bound is just as invalid
        let flow = FlowAssignment::new();
        assert_eq!(
            ResidualGraph::build(&network(), &flow).err(),
            Some(Error::FlowOutOfBounds)
        );
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let mut flow = FlowAssignment::new();
        flow.insert(("s", "a"), 2);
        flow.insert(("a", "t"), 2);
        let network = network();
        let first = ResidualGraph::build(&network, &flow).unwrap();
        let second = ResidualGraph::build(&network, &flow).unwrap();
        assert_eq!(arcs_of(&first), arcs_of(&second));
    }

    #[test]
    fn augment_updates_primal_flow_through_backward_arcs() {
        let network = FlowNetwork::from_edges([
            Edge::new("s", "a", 4, 0, 0).unwrap(),
            Edge::new("a", "t", 4, 0, 0).unwrap(),
            Edge::new("s", "b", 4, 0, 0).unwrap(),
            Edge::new("b", "a", 4, 0, 0).unwrap(),
        ])
        .unwrap();
        let mut flow = FlowAssignment::new();
        flow.insert(("s", "a"), 2);
        flow.insert(("a", "t"), 2);

        // reroute one unit via b, cancelling flow on (s, a)
        let path: Vec<(&str, &str)> = [("s", "b"), ("b", "a"), ("a", "s")].into();
        augment(&network, &mut flow, &path, 1);
        assert_eq!(flow.get(&("s", "b")), Some(&1));
        assert_eq!(flow.get(&("b", "a")), Some(&1));
        assert_eq!(flow.get(&("s", "a")), Some(&1));
    }
}
