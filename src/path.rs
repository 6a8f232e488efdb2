use alloc::vec::Vec;

use itertools::Itertools;

use crate::amount::Amount;
use crate::error::Error;
use crate::id::NodeId;
use crate::residual::ResidualGraph;

/// Converts a path given as a list of nodes into its list of edges.
pub fn path_edges<N: NodeId>(nodes: &[N]) -> Vec<(N, N)> {
    nodes.iter().copied().tuple_windows().collect()
}

/// The bottleneck capacity of a path: the minimum residual capacity over its
/// edges.
///
/// A path with no edges has no bottleneck and is reported as an error, never
/// as a zero.
pub fn path_bottleneck<N: NodeId, A: Amount>(
    residual: &ResidualGraph<N, A>,
    edges: &[(N, N)],
) -> Result<A, Error> {
    if edges.is_empty() {
        return Err(Error::EmptyPath);
    }
    let mut bottleneck = A::max_value();
    for &(u, v) in edges {
        let capacity = residual.capacity(u, v).ok_or(Error::EdgeNotFound)?;
        if capacity < bottleneck {
            bottleneck = capacity;
        }
    }
    Ok(bottleneck)
}
