use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use num_traits::{Bounded, CheckedAdd, One, Zero};

/// A trait representing an amount of flow, capacity or cost, typically an
/// integer.
pub trait Amount:
    Copy
    + Sum<Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Ord
    + AddAssign
    + SubAssign
    + Zero
    + One
    + Bounded
    + CheckedAdd
    + Debug
    + Display
    + Default
{
    /// Sentinel capacity for an edge with no upper limit.
    fn unbounded() -> Self {
        Self::max_value()
    }
}

impl Amount for i32 {}

impl Amount for i64 {}
