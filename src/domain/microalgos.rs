//! Integer amount of microAlgos.
//!
//! The node and indexer report every amount in µALGO. [`MicroAlgos`] keeps
//! the integer form until a value leaves the domain for display or storage.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Number of microAlgos in one ALGO.
pub const MICROALGOS_PER_ALGO: u64 = 1_000_000;

/// An amount in microAlgos.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MicroAlgos(u64);

impl MicroAlgos {
    /// Zero µALGO.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw microAlgo count.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Converts a decimal ALGO amount, rounding to the nearest µALGO.
    /// Negative and non-finite inputs become zero.
    #[must_use]
    pub fn from_algo(algo: f64) -> Self {
        if !algo.is_finite() || algo <= 0.0 {
            return Self::ZERO;
        }
        Self((algo * MICROALGOS_PER_ALGO as f64).round() as u64)
    }

    /// Returns the raw microAlgo count.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the amount in ALGO.
    #[must_use]
    pub fn as_algo(self) -> f64 {
        self.0 as f64 / MICROALGOS_PER_ALGO as f64
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Add for MicroAlgos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl Sum for MicroAlgos {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MicroAlgos> for MicroAlgos {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<u64> for MicroAlgos {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for MicroAlgos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / MICROALGOS_PER_ALGO;
        let frac = self.0 % MICROALGOS_PER_ALGO;
        write!(f, "{whole}.{frac:06} ALGO")
    }
}
