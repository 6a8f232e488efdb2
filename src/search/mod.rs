//! Pluggable path-search strategies over residual graphs.
//!
//! Augmenting-path strategies implement [`PathSearch`]; the cost-aware
//! searches return a [`ShortestPathTree`] instead. In both cases "no path"
//! is a normal outcome, not an error.

mod bellman_ford;
mod dijkstra;
mod traversal;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

pub use bellman_ford::{bellman_ford, bellman_ford_fifo, negative_cycle, BellmanFordOutcome};
pub use dijkstra::{dijkstra, PotentialDijkstra};
pub use traversal::{Bfs, Dfs, Widest};

use crate::amount::Amount;
use crate::id::NodeId;
use crate::residual::ResidualGraph;

/// The capability of finding an augmenting path in a residual graph.
///
/// Strategies are selected per engine call, never process-wide, so engines
/// stay reentrant and testable in isolation.
pub trait PathSearch<N: NodeId, A: Amount> {
    /// The nodes of an augmenting path from `source` to `sink`, or `None`
    /// when the sink is unreachable.
    fn find_augmenting_path(
        &mut self,
        residual: &ResidualGraph<N, A>,
        source: N,
        sink: N,
    ) -> Option<Vec<N>>;
}

/// A shortest-path tree rooted at `source`.
///
/// A node missing from `distances` is unreachable from the source.
#[derive(Debug, Clone)]
pub struct ShortestPathTree<N: NodeId, A: Amount> {
    pub source: N,
    pub parents: BTreeMap<N, N>,
    pub distances: BTreeMap<N, A>,
}

impl<N: NodeId, A: Amount> ShortestPathTree<N, A> {
    pub fn distance(&self, node: N) -> Option<A> {
        self.distances.get(&node).copied()
    }

    /// The path from the root to `target`, or `None` if unreachable.
    pub fn path_to(&self, target: N) -> Option<Vec<N>> {
        if !self.distances.contains_key(&target) {
            return None;
        }
        let mut path = Vec::new();
        path.push(target);
        let mut current = target;
        while current != self.source {
            current = *self.parents.get(&current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

// Reconstructs the node path from a predecessor map once the sink has been
// reached.
pub(crate) fn walk_parents<N: NodeId>(parents: &BTreeMap<N, N>, source: N, sink: N) -> Vec<N> {
    let mut path = Vec::new();
    path.push(sink);
    let mut current = sink;
    while current != source {
        current = parents[&current];
        path.push(current);
    }
    path.reverse();
    path
}
