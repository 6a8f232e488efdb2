use crate::algo::feasible_flow::feasible_flow;
use crate::algo::max_flow::ford_fulkerson;
use crate::amount::Amount;
use crate::error::Error;
use crate::flow::{net_flow, FlowAssignment};
use crate::id::NodeId;
use crate::network::FlowNetwork;
use crate::node::Node;
use crate::search::PathSearch;

/// The result of the minimum-flow engine.
#[derive(Debug, Clone)]
pub struct MinFlowOutcome<N: NodeId, A: Amount> {
    pub flow: FlowAssignment<N, A>,
    pub value: A,
}

/// Finds the feasible flow of least value from `source` to `sink`.
///
/// The feasible-flow engine supplies a starting point (its
/// [`Error::InfeasibleFlow`] propagates unchanged); the objective is then
/// reversed by swapping the endpoint roles, so the augmentation loop drains
/// every unit the lower bounds do not pin down. The lower-bound-aware
/// residual graph guarantees no edge is ever drained below its bound.
pub fn minimum_flow<N, A, S>(
    network: &FlowNetwork<N, A>,
    source: N,
    sink: N,
    search: &mut S,
) -> Result<MinFlowOutcome<N, A>, Error>
where
    N: NodeId,
    A: Amount,
    S: PathSearch<N, A> + PathSearch<Node<N>, A>,
{
    let feasible = feasible_flow(network, source, sink, search)?;
    minimum_flow_from(network, source, sink, feasible.flow, search)
}

/// Like [`minimum_flow`], starting from a caller-provided feasible flow.
pub fn minimum_flow_from<N, A, S>(
    network: &FlowNetwork<N, A>,
    source: N,
    sink: N,
    feasible: FlowAssignment<N, A>,
    search: &mut S,
) -> Result<MinFlowOutcome<N, A>, Error>
where
    N: NodeId,
    A: Amount,
    S: PathSearch<N, A>,
{
    let drained = ford_fulkerson(network, sink, source, search, Some(feasible))?;
    let value = net_flow(&drained.flow, source);
    log::debug!("minimum flow from {source:?} to {sink:?}: value {value}");
    Ok(MinFlowOutcome {
        flow: drained.flow,
        value,
    })
}
