//! Fixed-arity resource vectors.
//!
//! Every feasibility check in the solver compares three dimensions at once:
//! compute, memory and accelerator. Values are integers in the normalized
//! units produced by [`crate::candidate::Normalization`]; vectors built with
//! different normalizations must never be mixed.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Number of resource dimensions tracked per vector.
pub const DIMENSIONS: usize = 3;

/// A (compute, memory, accelerator) triple in normalized units.
///
/// Arithmetic saturates at the `i64` bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceVector {
    pub compute: i64,
    pub memory: i64,
    pub accelerator: i64,
}

impl ResourceVector {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(compute: i64, memory: i64, accelerator: i64) -> Self {
        Self {
            compute,
            memory,
            accelerator,
        }
    }

    /// Components in dimension order.
    pub fn as_array(&self) -> [i64; DIMENSIONS] {
        [self.compute, self.memory, self.accelerator]
    }

    pub fn from_array(v: [i64; DIMENSIONS]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// `self ⪰ other`: every component is at least the other's.
    pub fn dominates(&self, other: &Self) -> bool {
        self.compute >= other.compute
            && self.memory >= other.memory
            && self.accelerator >= other.accelerator
    }

    /// True when no dimension is positive, i.e. a deficit is fully covered.
    pub fn is_covered(&self) -> bool {
        self.compute <= 0 && self.memory <= 0 && self.accelerator <= 0
    }

    /// Componentwise `max(self, 0)`.
    pub fn clamp_non_negative(&self) -> Self {
        Self::new(
            self.compute.max(0),
            self.memory.max(0),
            self.accelerator.max(0),
        )
    }

    /// Componentwise `max(a - b, 0)`: how much of `a` is still missing after `b`.
    pub fn positive_deficit(a: &Self, b: &Self) -> Self {
        (*a - *b).clamp_non_negative()
    }
}

impl Add for ResourceVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.compute.saturating_add(rhs.compute),
            self.memory.saturating_add(rhs.memory),
            self.accelerator.saturating_add(rhs.accelerator),
        )
    }
}

impl Sub for ResourceVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.compute.saturating_sub(rhs.compute),
            self.memory.saturating_sub(rhs.memory),
            self.accelerator.saturating_sub(rhs.accelerator),
        )
    }
}

impl AddAssign for ResourceVector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for ResourceVector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for ResourceVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a ResourceVector> for ResourceVector {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl std::fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.compute, self.memory, self.accelerator)
    }
}
