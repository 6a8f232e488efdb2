use alloc::collections::{BTreeMap, BinaryHeap};
use core::cmp::Reverse;

use crate::amount::Amount;
use crate::error::Error;
use crate::id::NodeId;
use crate::residual::{ResidualEdge, ResidualGraph};
use crate::search::{bellman_ford, BellmanFordOutcome, ShortestPathTree};

/// Single-source shortest distances on non-negative arc costs.
///
/// Meeting a negative cost is the caller's mistake and reported as
/// [`Error::NegativeWeight`].
pub fn dijkstra<N: NodeId, A: Amount>(
    residual: &ResidualGraph<N, A>,
    source: N,
) -> Result<ShortestPathTree<N, A>, Error> {
    let mut distances = BTreeMap::new();
    distances.insert(source, A::zero());
    let mut parents = BTreeMap::new();
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((A::zero(), source)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if distances.get(&u).map_or(false, |&best| d > best) {
            continue;
        }
        for (_, v, arc) in residual.outgoing(u) {
            if arc.cost < A::zero() {
                return Err(Error::NegativeWeight);
            }
            let candidate = d
                .checked_add(&arc.cost)
                .ok_or(Error::ArithmeticOverflow)?;
            if distances.get(&v).map_or(true, |&dv| candidate < dv) {
                distances.insert(v, candidate);
                parents.insert(v, u);
                heap.push(Reverse((candidate, v)));
            }
        }
    }

    Ok(ShortestPathTree {
        source,
        parents,
        distances,
    })
}

/// Dijkstra over Johnson-style reduced costs.
///
/// Holds per-node potentials h such that `cost(u, v) + h(u) - h(v) >= 0`,
/// runs [`dijkstra`] on the reduced costs and un-reweights the result to true
/// distances. Potentials are refreshed after every search, which keeps
/// repeated calls on an evolving residual graph correct; whenever they are
/// missing or stale (a new graph region became reachable, or a reduced cost
/// turned negative) the search falls back to Bellman-Ford and re-seeds them.
#[derive(Debug, Clone, Default)]
pub struct PotentialDijkstra<N: NodeId, A: Amount> {
    potentials: BTreeMap<N, A>,
}

impl<N: NodeId, A: Amount> PotentialDijkstra<N, A> {
    pub fn new() -> Self {
        Self {
            potentials: BTreeMap::new(),
        }
    }

    /// True shortest-path tree from `source` over the cost-aware residual
    /// graph.
    pub fn shortest_path_tree(
        &mut self,
        residual: &ResidualGraph<N, A>,
        source: N,
    ) -> Result<ShortestPathTree<N, A>, Error> {
        if self.potentials.is_empty() || !self.potentials.contains_key(&source) {
            return self.reseed(residual, source);
        }
        let Some(reduced) = self.reduced(residual) else {
            return self.reseed(residual, source);
        };

        let reduced_tree = dijkstra(&reduced, source)?;
        let offset = self.potentials[&source];
        let mut distances = BTreeMap::new();
        for (&v, &reduced_distance) in &reduced_tree.distances {
            distances.insert(v, reduced_distance + self.potentials[&v] - offset);
        }
        for (&v, &distance) in &distances {
            self.potentials.insert(v, distance);
        }

        Ok(ShortestPathTree {
            source,
            parents: reduced_tree.parents,
            distances,
        })
    }

    // The residual graph under reduced costs, or None when the potentials
    // cannot reweight it (a head node without a potential became reachable,
    // or a reduced cost is negative).
    fn reduced(&self, residual: &ResidualGraph<N, A>) -> Option<ResidualGraph<N, A>> {
        let mut reduced = ResidualGraph::with_nodes(residual.nodes());
        for (u, v, arc) in residual.arcs() {
            let Some(&hu) = self.potentials.get(&u) else {
                // arcs out of nodes that were unreachable when the
                // potentials were seeded cannot lie on a shortest path yet
                continue;
            };
            let Some(&hv) = self.potentials.get(&v) else {
                return None;
            };
            let cost = arc.cost + hu - hv;
            if cost < A::zero() {
                return None;
            }
            reduced.insert_arc(
                u,
                v,
                ResidualEdge {
                    capacity: arc.capacity,
                    cost,
                },
            );
        }
        Some(reduced)
    }

    fn reseed(
        &mut self,
        residual: &ResidualGraph<N, A>,
        source: N,
    ) -> Result<ShortestPathTree<N, A>, Error> {
        match bellman_ford(residual, source)? {
            BellmanFordOutcome::Tree(tree) => {
                self.potentials = tree.distances.clone();
                Ok(tree)
            }
            BellmanFordOutcome::NegativeCycle(_) => Err(Error::NegativeCycle),
        }
    }
}
