use num_traits::{Bounded, Zero};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A directed edge of a flow network together with its attributes.
///
/// Construction validates the attribute invariants: the endpoints are
/// distinct, the capacity is non-negative and the lower bound lies in
/// `[0, capacity]`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(
    try_from = "RawEdge<N, A>",
    bound(deserialize = "N: PartialEq + Deserialize<'de>, \
                    A: Zero + PartialOrd + Bounded + Deserialize<'de>")
)]
pub struct Edge<N, A> {
    from: N,
    to: N,
    capacity: A,
    cost: A,
    lower_bound: A,
}

impl<N, A> Edge<N, A>
where
    N: PartialEq,
    A: Zero + PartialOrd,
{
    pub fn new(from: N, to: N, capacity: A, cost: A, lower_bound: A) -> Result<Self, Error> {
        if from == to {
            Err(Error::SelfLoopEdge)
        } else if capacity < A::zero() {
            Err(Error::NegativeCapacity)
        } else if lower_bound < A::zero() {
            Err(Error::NegativeLowerBound)
        } else if lower_bound > capacity {
            Err(Error::LowerBoundExceedsCapacity)
        } else {
            Ok(Self {
                from,
                to,
                capacity,
                cost,
                lower_bound,
            })
        }
    }
}

impl<N, A> Edge<N, A>
where
    N: Copy,
    A: Copy,
{
    pub fn endpoints(&self) -> (N, N) {
        (self.from, self.to)
    }

    pub fn capacity(&self) -> A {
        self.capacity
    }

    pub fn cost(&self) -> A {
        self.cost
    }

    pub fn lower_bound(&self) -> A {
        self.lower_bound
    }
}

/// An unvalidated edge record, as read from an edge-list file.
///
/// An absent capacity means the edge is unbounded; an absent cost or lower
/// bound means zero.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct RawEdge<N, A> {
    pub from: N,
    pub to: N,
    pub capacity: Option<A>,
    pub cost: Option<A>,
    pub lower_bound: Option<A>,
}

impl<N, A> TryFrom<RawEdge<N, A>> for Edge<N, A>
where
    N: PartialEq,
    A: Zero + PartialOrd + Bounded,
{
    type Error = Error;

    fn try_from(e: RawEdge<N, A>) -> Result<Self, Self::Error> {
        let capacity = e.capacity.unwrap_or_else(A::max_value);
        let cost = e.cost.unwrap_or_else(A::zero);
        let lower_bound = e.lower_bound.unwrap_or_else(A::zero);
        Self::new(e.from, e.to, capacity, cost, lower_bound)
    }
}

impl<N, A> From<Edge<N, A>> for RawEdge<N, A> {
    fn from(e: Edge<N, A>) -> Self {
        Self {
            from: e.from,
            to: e.to,
            capacity: Some(e.capacity),
            cost: Some(e.cost),
            lower_bound: Some(e.lower_bound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_attributes() {
        assert_eq!(Edge::new("a", "a", 1, 0, 0), Err(Error::SelfLoopEdge));
        assert_eq!(Edge::new("a", "b", -1, 0, 0), Err(Error::NegativeCapacity));
        assert_eq!(Edge::new("a", "b", 1, 0, -1), Err(Error::NegativeLowerBound));
        assert_eq!(
            Edge::new("a", "b", 1, 0, 2),
            Err(Error::LowerBoundExceedsCapacity)
        );
        assert!(Edge::new("a", "b", 1, -3, 1).is_ok());
    }

    #[test]
    fn missing_capacity_means_unbounded() {
        let raw = RawEdge {
            from: "a",
            to: "b",
            capacity: None,
            cost: None,
            lower_bound: Some(2),
        };
        let edge = Edge::try_from(raw).unwrap();
        assert_eq!(edge.capacity(), i64::MAX);
        assert_eq!(edge.lower_bound(), 2);
    }
}
