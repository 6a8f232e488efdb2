use alloc::collections::{BTreeSet, VecDeque};

use crate::algo::ensure_endpoints;
use crate::amount::Amount;
use crate::error::Error;
use crate::flow::{net_flow, FlowAssignment};
use crate::id::NodeId;
use crate::network::FlowNetwork;
use crate::path::{path_bottleneck, path_edges};
use crate::residual::{augment, ResidualGraph};
use crate::search::PathSearch;

/// The result of the maximum-flow engine.
#[derive(Debug, Clone)]
pub struct MaxFlowOutcome<N: NodeId, A: Amount> {
    pub flow: FlowAssignment<N, A>,
    pub value: A,
}

/// Computes a maximum flow from `source` to `sink` by the Ford-Fulkerson
/// method: rebuild the residual graph, ask `search` for an augmenting path,
/// augment by its bottleneck, repeat until no path remains.
///
/// Every augmentation strictly increases the flow value, so the loop
/// terminates for finite integral capacities; termination on graphs with
/// unbounded capacities along every source-sink path is the caller's
/// responsibility. An `initial` assignment must respect the edge bounds, or
/// the residual builder reports it.
pub fn ford_fulkerson<N, A, S>(
    network: &FlowNetwork<N, A>,
    source: N,
    sink: N,
    search: &mut S,
    initial: Option<FlowAssignment<N, A>>,
) -> Result<MaxFlowOutcome<N, A>, Error>
where
    N: NodeId,
    A: Amount,
    S: PathSearch<N, A>,
{
    ensure_endpoints(network, source, sink)?;
    let mut flow = initial.unwrap_or_default();

    loop {
        let residual = ResidualGraph::build(network, &flow)?;
        let Some(path) = search.find_augmenting_path(&residual, source, sink) else {
            break;
        };
        let edges = path_edges(&path);
        let delta = path_bottleneck(&residual, &edges)?;
        log::trace!("augmenting by {delta} along {path:?}");
        augment(network, &mut flow, &edges, delta);
    }

    let value = net_flow(&flow, source);
    log::debug!("maximum flow from {source:?} to {sink:?}: value {value}");
    Ok(MaxFlowOutcome { flow, value })
}

/// The cut induced by a maximum flow: nodes residually reachable from the
/// source against the rest. Its crossing capacity equals the max-flow value.
pub fn minimum_cut<N: NodeId, A: Amount>(
    network: &FlowNetwork<N, A>,
    flow: &FlowAssignment<N, A>,
    source: N,
) -> Result<(BTreeSet<N>, BTreeSet<N>), Error> {
    if !network.contains_node(source) {
        return Err(Error::MissingNode);
    }
    let residual = ResidualGraph::build(network, flow)?;

    let mut reachable = BTreeSet::new();
    reachable.insert(source);
    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(u) = queue.pop_front() {
        for (_, v, _) in residual.outgoing(u) {
            if reachable.insert(v) {
                queue.push_back(v);
            }
        }
    }

    let far_side = network
        .nodes()
        .filter(|n| !reachable.contains(n))
        .collect();
    Ok((reachable, far_side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::search::{Bfs, Dfs, Widest};

    fn network(
        edges: &[(&'static str, &'static str, i64)],
    ) -> FlowNetwork<&'static str, i64> {
        FlowNetwork::from_edges(
            edges
                .iter()
                .map(|&(u, v, c)| Edge::new(u, v, c, 0, 0).unwrap()),
        )
        .unwrap()
    }

    fn diamond() -> FlowNetwork<&'static str, i64> {
        network(&[("s", "a", 5), ("s", "b", 5), ("a", "t", 5), ("b", "t", 5)])
    }

    // Two disjoint source-sink paths, capacity 5 each.
    #[test]
    fn saturates_both_paths_of_the_diamond() {
        let network = diamond();
        let outcome = ford_fulkerson(&network, "s", "t", &mut Bfs, None).unwrap();
        assert_eq!(outcome.value, 10);
        assert_eq!(outcome.flow.get(&("s", "a")), Some(&5));
        assert_eq!(outcome.flow.get(&("s", "b")), Some(&5));
        assert_eq!(outcome.flow.get(&("a", "t")), Some(&5));
        assert_eq!(outcome.flow.get(&("b", "t")), Some(&5));
    }

    fn textbook() -> FlowNetwork<&'static str, i64> {
        network(&[
            ("s", "a", 8),
            ("s", "b", 3),
            ("a", "p", 7),
            ("b", "a", 2),
            ("b", "c", 2),
            ("b", "d", 4),
            ("c", "d", 1),
            ("c", "h", 3),
            ("d", "t", 5),
            ("h", "d", 1),
            ("h", "t", 3),
            ("p", "d", 5),
            ("p", "t", 3),
        ])
    }

    #[test]
    fn all_strategies_agree_on_the_maximum() {
        let network = textbook();
        let bfs = ford_fulkerson(&network, "s", "t", &mut Bfs, None).unwrap();
        let dfs = ford_fulkerson(&network, "s", "t", &mut Dfs, None).unwrap();
        let widest = ford_fulkerson(&network, "s", "t", &mut Widest, None).unwrap();
        assert_eq!(bfs.value, 10);
        assert_eq!(dfs.value, 10);
        assert_eq!(widest.value, 10);
    }

    #[test]
    fn conservation_and_capacity_hold() {
        let network = textbook();
        let outcome = ford_fulkerson(&network, "s", "t", &mut Bfs, None).unwrap();
        for ((u, v), f) in &outcome.flow {
            let attrs = network.attrs(*u, *v).unwrap();
            assert!(*f >= 0 && *f <= attrs.capacity);
        }
        for node in network.nodes() {
            if node != "s" && node != "t" {
                assert_eq!(net_flow(&outcome.flow, node), 0);
            }
        }
        assert_eq!(net_flow(&outcome.flow, "s"), 10);
        assert_eq!(net_flow(&outcome.flow, "t"), -10);
    }

    #[test]
    fn max_flow_equals_min_cut_capacity() {
        let network = textbook();
        let outcome = ford_fulkerson(&network, "s", "t", &mut Bfs, None).unwrap();
        let (near, far) = minimum_cut(&network, &outcome.flow, "s").unwrap();
        assert!(near.contains("s"));
        assert!(far.contains("t"));

        let crossing: i64 = network
            .edges()
            .filter(|(u, v, _)| near.contains(u) && far.contains(v))
            .map(|(_, _, attrs)| attrs.capacity)
            .sum();
        assert_eq!(crossing, outcome.value);
    }

    #[test]
    fn resumes_from_an_initial_flow() {
        let network = diamond();
        let mut initial = FlowAssignment::new();
        initial.insert(("s", "a"), 3);
        initial.insert(("a", "t"), 3);
        let outcome = ford_fulkerson(&network, "s", "t", &mut Bfs, Some(initial)).unwrap();
        assert_eq!(outcome.value, 10);
    }

    #[test]
    fn structural_problems_fail_before_the_loop() {
        let network = diamond();
        assert_eq!(
            ford_fulkerson(&network, "s", "x", &mut Bfs, None).err(),
            Some(Error::MissingNode)
        );
        assert_eq!(
            ford_fulkerson(&network, "s", "s", &mut Bfs, None).err(),
            Some(Error::IdenticalEndpoints)
        );
    }
}
