use alloc::collections::BTreeMap;

use crate::amount::Amount;
use crate::id::NodeId;
use crate::network::FlowNetwork;

/// A flow assignment, keyed by ordered node pairs. A missing edge carries
/// zero flow.
pub type FlowAssignment<N, A> = BTreeMap<(N, N), A>;

/// Total outgoing flow minus total incoming flow at `node`.
///
/// Zero at every node except the endpoints is the conservation invariant;
/// at the source this is the value of the flow.
pub fn net_flow<N: NodeId, A: Amount>(flow: &FlowAssignment<N, A>, node: N) -> A {
    let outgoing: A = flow
        .iter()
        .filter(|((u, _), _)| *u == node)
        .map(|(_, f)| *f)
        .sum();
    let incoming: A = flow
        .iter()
        .filter(|((_, v), _)| *v == node)
        .map(|(_, f)| *f)
        .sum();
    outgoing - incoming
}

/// The value of a flow, measured at its source.
pub fn flow_value<N: NodeId, A: Amount>(flow: &FlowAssignment<N, A>, source: N) -> A {
    net_flow(flow, source)
}

/// The total cost of a flow assignment over `network`.
pub fn flow_cost<N: NodeId, A: Amount>(
    network: &FlowNetwork<N, A>,
    flow: &FlowAssignment<N, A>,
) -> A {
    network
        .edges()
        .map(|(u, v, attrs)| {
            let f = flow.get(&(u, v)).copied().unwrap_or_else(A::zero);
            f * attrs.cost
        })
        .sum()
}
