use alloc::collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque};
use alloc::vec::Vec;
use core::cmp::min;

use crate::amount::Amount;
use crate::id::NodeId;
use crate::residual::ResidualGraph;
use crate::search::{walk_parents, PathSearch};

/// Breadth-first search: picks the augmenting path with the fewest edges
/// discovered first. No optimality guarantee on the path choice, only
/// correctness of the flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl<N: NodeId, A: Amount> PathSearch<N, A> for Bfs {
    fn find_augmenting_path(
        &mut self,
        residual: &ResidualGraph<N, A>,
        source: N,
        sink: N,
    ) -> Option<Vec<N>> {
        let mut parents = BTreeMap::new();
        let mut discovered = BTreeSet::new();
        discovered.insert(source);
        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            if u == sink {
                return Some(walk_parents(&parents, source, sink));
            }
            for (_, v, _) in residual.outgoing(u) {
                if discovered.insert(v) {
                    parents.insert(v, u);
                    queue.push_back(v);
                }
            }
        }
        None
    }
}

/// Depth-first search: follows the first usable arc and backtracks from
/// dead ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dfs;

impl<N: NodeId, A: Amount> PathSearch<N, A> for Dfs {
    fn find_augmenting_path(
        &mut self,
        residual: &ResidualGraph<N, A>,
        source: N,
        sink: N,
    ) -> Option<Vec<N>> {
        let mut path = Vec::new();
        path.push(source);
        let mut on_path = BTreeSet::new();
        on_path.insert(source);
        let mut dead = BTreeSet::new();

        while let Some(&u) = path.last() {
            if u == sink {
                return Some(path);
            }
            let next = residual
                .outgoing(u)
                .map(|(_, v, _)| v)
                .find(|v| !on_path.contains(v) && !dead.contains(v));
            match next {
                Some(v) => {
                    path.push(v);
                    on_path.insert(v);
                }
                None => {
                    path.pop();
                    on_path.remove(&u);
                    dead.insert(u);
                }
            }
        }
        None
    }
}

/// Maximum-bottleneck search: picks the augmenting path with the largest
/// capacity, found by a maximin variant of Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct Widest;

impl<N: NodeId, A: Amount> PathSearch<N, A> for Widest {
    fn find_augmenting_path(
        &mut self,
        residual: &ResidualGraph<N, A>,
        source: N,
        sink: N,
    ) -> Option<Vec<N>> {
        let mut parents = BTreeMap::new();
        let mut widths = BTreeMap::new();
        widths.insert(source, A::max_value());
        let mut heap = BinaryHeap::new();
        heap.push((A::max_value(), source));

        while let Some((width, u)) = heap.pop() {
            if widths.get(&u).map_or(false, |&best| width < best) {
                continue;
            }
            if u == sink {
                return Some(walk_parents(&parents, source, sink));
            }
            for (_, v, arc) in residual.outgoing(u) {
                let through = min(width, arc.capacity);
                if through > A::zero() && widths.get(&v).map_or(true, |&best| through > best) {
                    widths.insert(v, through);
                    parents.insert(v, u);
                    heap.push((through, v));
                }
            }
        }
        None
    }
}
