use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;

use crate::amount::Amount;
use crate::error::Error;
use crate::id::NodeId;
use crate::residual::ResidualGraph;
use crate::search::ShortestPathTree;

/// The result of a Bellman-Ford run.
///
/// A negative-cost cycle is a distinguished outcome, not an error: a
/// cost-aware engine treats it as an opportunity to cancel flow, so it is
/// surfaced to the caller rather than swallowed.
#[derive(Debug, Clone)]
pub enum BellmanFordOutcome<N: NodeId, A: Amount> {
    Tree(ShortestPathTree<N, A>),
    /// A closed walk of negative total cost, first node repeated last.
    NegativeCycle(Vec<N>),
}

// One relaxation round over every arc. Returns the last node whose distance
// improved, or None at convergence.
fn relax_round<N: NodeId, A: Amount>(
    residual: &ResidualGraph<N, A>,
    distances: &mut BTreeMap<N, A>,
    parents: &mut BTreeMap<N, N>,
) -> Result<Option<N>, Error> {
    let mut improved = None;
    for (u, v, arc) in residual.arcs() {
        let Some(du) = distances.get(&u).copied() else {
            continue;
        };
        let candidate = du
            .checked_add(&arc.cost)
            .ok_or(Error::ArithmeticOverflow)?;
        if distances.get(&v).map_or(true, |&dv| candidate < dv) {
            distances.insert(v, candidate);
            parents.insert(v, u);
            improved = Some(v);
        }
    }
    Ok(improved)
}

// Runs relaxation to convergence; a witness returned from the extra round
// proves a negative cycle.
fn run_rounds<N: NodeId, A: Amount>(
    residual: &ResidualGraph<N, A>,
    distances: &mut BTreeMap<N, A>,
    parents: &mut BTreeMap<N, N>,
) -> Result<Option<N>, Error> {
    for _ in 1..residual.node_count() {
        if relax_round(residual, distances, parents)?.is_none() {
            return Ok(None);
        }
    }
    relax_round(residual, distances, parents)
}

// A witness improved on the extra round, so its predecessor chain must
// contain a cycle; hop until a node repeats, then collect the cycle in
// forward arc order.
fn extract_cycle<N: NodeId>(parents: &BTreeMap<N, N>, witness: N) -> Vec<N> {
    let mut seen = BTreeSet::new();
    let mut on_cycle = witness;
    while seen.insert(on_cycle) {
        on_cycle = parents[&on_cycle];
    }

    let mut cycle = Vec::new();
    cycle.push(on_cycle);
    let mut current = parents[&on_cycle];
    while current != on_cycle {
        cycle.push(current);
        current = parents[&current];
    }
    cycle.push(on_cycle);
    cycle.reverse();
    cycle
}

/// Single-source shortest distances tolerating negative arc costs.
pub fn bellman_ford<N: NodeId, A: Amount>(
    residual: &ResidualGraph<N, A>,
    source: N,
) -> Result<BellmanFordOutcome<N, A>, Error> {
    let mut distances = BTreeMap::new();
    distances.insert(source, A::zero());
    let mut parents = BTreeMap::new();

    match run_rounds(residual, &mut distances, &mut parents)? {
        Some(witness) => Ok(BellmanFordOutcome::NegativeCycle(extract_cycle(
            &parents, witness,
        ))),
        None => Ok(BellmanFordOutcome::Tree(ShortestPathTree {
            source,
            parents,
            distances,
        })),
    }
}

/// Bellman-Ford with a FIFO work queue: only nodes whose distance changed
/// are re-examined. Produces the same distances as [`bellman_ford`] for
/// well-defined inputs.
pub fn bellman_ford_fifo<N: NodeId, A: Amount>(
    residual: &ResidualGraph<N, A>,
    source: N,
) -> Result<BellmanFordOutcome<N, A>, Error> {
    let n = residual.node_count();
    let mut distances = BTreeMap::new();
    distances.insert(source, A::zero());
    let mut parents = BTreeMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(source);
    let mut queued = BTreeSet::new();
    queued.insert(source);
    let mut improvements: BTreeMap<N, usize> = BTreeMap::new();

    while let Some(u) = queue.pop_front() {
        queued.remove(&u);
        let du = distances[&u];
        for (_, v, arc) in residual.outgoing(u) {
            let candidate = du
                .checked_add(&arc.cost)
                .ok_or(Error::ArithmeticOverflow)?;
            if distances.get(&v).map_or(true, |&dv| candidate < dv) {
                distances.insert(v, candidate);
                parents.insert(v, u);
                let count = improvements.entry(v).or_insert(0);
                *count += 1;
                if *count > n {
                    // more improvements than nodes: a negative cycle exists;
                    // locate it with the exhaustive detector
                    let cycle = negative_cycle(residual)?
                        .expect("bug: improvement count exceeded node count without a cycle");
                    return Ok(BellmanFordOutcome::NegativeCycle(cycle));
                }
                if queued.insert(v) {
                    queue.push_back(v);
                }
            }
        }
    }

    Ok(BellmanFordOutcome::Tree(ShortestPathTree {
        source,
        parents,
        distances,
    }))
}

/// A negative-cost cycle anywhere in the residual graph, if one exists.
///
/// Zero-initializing every distance is equivalent to relaxing from a virtual
/// super-source wired to all nodes, so reachability from any particular node
/// is irrelevant.
pub fn negative_cycle<N: NodeId, A: Amount>(
    residual: &ResidualGraph<N, A>,
) -> Result<Option<Vec<N>>, Error> {
    let mut distances: BTreeMap<N, A> = residual.nodes().map(|n| (n, A::zero())).collect();
    let mut parents = BTreeMap::new();

    match run_rounds(residual, &mut distances, &mut parents)? {
        Some(witness) => Ok(Some(extract_cycle(&parents, witness))),
        None => Ok(None),
    }
}
