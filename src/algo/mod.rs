//! The flow engines: maximum flow, feasible flow, minimum-cost flow and
//! minimum feasible flow.

pub mod feasible_flow;
pub mod max_flow;
pub mod min_cost_flow;
pub mod min_flow;

use crate::amount::Amount;
use crate::error::Error;
use crate::id::NodeId;
use crate::network::FlowNetwork;

// Structural problems are detected up front, before any engine loop runs.
pub(crate) fn ensure_endpoints<N: NodeId, A: Amount>(
    network: &FlowNetwork<N, A>,
    source: N,
    sink: N,
) -> Result<(), Error> {
    if !network.contains_node(source) || !network.contains_node(sink) {
        return Err(Error::MissingNode);
    }
    if source == sink {
        return Err(Error::IdenticalEndpoints);
    }
    Ok(())
}
