use alloc::collections::BTreeMap;

use crate::algo::ensure_endpoints;
use crate::algo::max_flow::ford_fulkerson;
use crate::amount::Amount;
use crate::edge::Edge;
use crate::error::Error;
use crate::flow::{net_flow, FlowAssignment};
use crate::id::NodeId;
use crate::network::FlowNetwork;
use crate::node::Node;
use crate::search::PathSearch;

/// The result of the feasible-flow engine.
#[derive(Debug, Clone)]
pub struct FeasibleFlowOutcome<N: NodeId, A: Amount> {
    pub flow: FlowAssignment<N, A>,
    pub value: A,
}

/// Finds a circulation respecting every edge's `[lower_bound, capacity]`
/// interval and conserving flow at every node, or reports
/// [`Error::InfeasibleFlow`].
///
/// Lower bounds are eliminated by forcing them: every node owes its forced
/// inflow to a super-source and its forced outflow to a super-sink, inner
/// capacities shrink to `capacity - lower_bound`, and a maximum flow between
/// the synthetic endpoints settles the debts. The circulation exists exactly
/// when all super-source arcs saturate; a partial result is never returned.
pub fn feasible_circulation<N, A, S>(
    network: &FlowNetwork<N, A>,
    search: &mut S,
) -> Result<FlowAssignment<N, A>, Error>
where
    N: NodeId,
    A: Amount,
    S: PathSearch<Node<N>, A>,
{
    let mut forced_in: BTreeMap<N, A> = BTreeMap::new();
    let mut forced_out: BTreeMap<N, A> = BTreeMap::new();
    for (u, v, attrs) in network.edges() {
        if attrs.lower_bound > A::zero() {
            *forced_out.entry(u).or_default() += attrs.lower_bound;
            *forced_in.entry(v).or_default() += attrs.lower_bound;
        }
    }

    let mut auxiliary: FlowNetwork<Node<N>, A> = FlowNetwork::new();
    auxiliary.add_node(Node::Source);
    auxiliary.add_node(Node::Sink);
    for node in network.nodes() {
        auxiliary.add_node(node.into());
    }
    let mut demand = A::zero();
    for (&node, &amount) in &forced_in {
        auxiliary.add_edge(Edge::new(
            Node::Source,
            Node::WithId(node),
            amount,
            A::zero(),
            A::zero(),
        )?)?;
        demand += amount;
    }
    for (&node, &amount) in &forced_out {
        auxiliary.add_edge(Edge::new(
            Node::WithId(node),
            Node::Sink,
            amount,
            A::zero(),
            A::zero(),
        )?)?;
    }
    for (u, v, attrs) in network.edges() {
        auxiliary.add_edge(Edge::new(
            Node::WithId(u),
            Node::WithId(v),
            attrs.capacity - attrs.lower_bound,
            A::zero(),
            A::zero(),
        )?)?;
    }

    let outcome = ford_fulkerson(&auxiliary, Node::Source, Node::Sink, search, None)?;
    if outcome.value != demand {
        log::debug!("super-source arcs not saturated: {} of {demand}", outcome.value);
        return Err(Error::InfeasibleFlow);
    }

    // restore the original edge identities: forced lower bound plus whatever
    // the auxiliary flow routed on top of it
    let mut flow = FlowAssignment::new();
    for (u, v, attrs) in network.edges() {
        let routed = outcome
            .flow
            .get(&(Node::WithId(u), Node::WithId(v)))
            .copied()
            .unwrap_or_else(A::zero);
        flow.insert((u, v), routed + attrs.lower_bound);
    }
    Ok(flow)
}

/// Finds any flow from `source` to `sink` respecting every edge's bounds,
/// or reports [`Error::InfeasibleFlow`].
///
/// An unbounded sink-to-source return edge turns the problem into a
/// circulation; the value carried by the return edge is the value of the
/// flow.
pub fn feasible_flow<N, A, S>(
    network: &FlowNetwork<N, A>,
    source: N,
    sink: N,
    search: &mut S,
) -> Result<FeasibleFlowOutcome<N, A>, Error>
where
    N: NodeId,
    A: Amount,
    S: PathSearch<Node<N>, A>,
{
    ensure_endpoints(network, source, sink)?;
    let mut closed = network.clone();
    closed.add_edge(Edge::new(
        sink,
        source,
        A::unbounded(),
        A::zero(),
        A::zero(),
    )?)?;

    let mut flow = feasible_circulation(&closed, search)?;
    let value = flow.remove(&(sink, source)).unwrap_or_else(A::zero);
    Ok(FeasibleFlowOutcome { flow, value })
}

/// Finds a flow satisfying per-node supplies and demands, or reports
/// [`Error::InfeasibleFlow`].
///
/// Positive `supplies` entries are producers, negative ones consumers; every
/// node's net flow must equal its declared supply. Nodes absent from the map
/// conserve flow.
pub fn feasible_supply_flow<N, A, S>(
    network: &FlowNetwork<N, A>,
    supplies: &BTreeMap<N, A>,
    search: &mut S,
) -> Result<FlowAssignment<N, A>, Error>
where
    N: NodeId,
    A: Amount,
    S: PathSearch<Node<N>, A>,
{
    if supplies.keys().any(|&n| !network.contains_node(n)) {
        return Err(Error::MissingNode);
    }

    // forcing the lower bounds first leaves each node with a residual
    // supply; with all-zero lower bounds this is the declared supply itself
    let mut residual_supply: BTreeMap<N, A> = supplies.clone();
    for (u, v, attrs) in network.edges() {
        if attrs.lower_bound > A::zero() {
            *residual_supply.entry(u).or_default() -= attrs.lower_bound;
            *residual_supply.entry(v).or_default() += attrs.lower_bound;
        }
    }

    let mut auxiliary: FlowNetwork<Node<N>, A> = FlowNetwork::new();
    auxiliary.add_node(Node::Source);
    auxiliary.add_node(Node::Sink);
    for node in network.nodes() {
        auxiliary.add_node(node.into());
    }
    for (u, v, attrs) in network.edges() {
        auxiliary.add_edge(Edge::new(
            Node::WithId(u),
            Node::WithId(v),
            attrs.capacity - attrs.lower_bound,
            A::zero(),
            A::zero(),
        )?)?;
    }
    for (&node, &supply) in &residual_supply {
        if supply > A::zero() {
            auxiliary.add_edge(Edge::new(
                Node::Source,
                Node::WithId(node),
                supply,
                A::zero(),
                A::zero(),
            )?)?;
        } else if supply < A::zero() {
            auxiliary.add_edge(Edge::new(
                Node::WithId(node),
                Node::Sink,
                -supply,
                A::zero(),
                A::zero(),
            )?)?;
        }
    }

    let outcome = ford_fulkerson(&auxiliary, Node::Source, Node::Sink, search, None)?;

    let mut flow = FlowAssignment::new();
    for (u, v, attrs) in network.edges() {
        let routed = outcome
            .flow
            .get(&(Node::WithId(u), Node::WithId(v)))
            .copied()
            .unwrap_or_else(A::zero);
        flow.insert((u, v), routed + attrs.lower_bound);
    }

    // feasible exactly when every node's net flow meets its declared supply
    for node in network.nodes() {
        let declared = supplies.get(&node).copied().unwrap_or_else(A::zero);
        if net_flow(&flow, node) != declared {
            return Err(Error::InfeasibleFlow);
        }
    }
    Ok(flow)
}
