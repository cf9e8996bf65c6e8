//! Lamport version scalars
//!
//! A [`Scalar`] is a `(pid, vid)` pair establishing a partial happens-before
//! order across distributed writers. Comparison is by `vid` first; at equal
//! `vid` the smaller `pid` happens-before. A missing scalar is equivalent to
//! the zero scalar, so freshly created objects always happen-after "nothing
//! stored yet".

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A comparable version marker issued by a Lamport clock
///
/// ## Invariants
///
/// - `vid` strictly increases along one process's update chain
/// - two scalars from different processes with the same `vid` are
///   concurrent; the comparator breaks the tie on `pid` so outcomes stay
///   deterministic and auditable
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Scalar {
    /// Process (replica) identifier that issued this version
    pub pid: u32,
    /// Monotonic version counter
    pub vid: u64,
}

impl Scalar {
    /// Create a scalar from its parts
    pub const fn new(pid: u32, vid: u64) -> Self {
        Self { pid, vid }
    }

    /// The zero scalar, equivalent to "no version observed"
    pub const fn zero() -> Self {
        Self { pid: 0, vid: 0 }
    }

    /// True when this scalar carries no version information
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.pid == 0 && self.vid == 0
    }

    /// Compare two optional scalars, treating absence as zero.
    ///
    /// Returns `Less` when `a` happens-before `b`.
    pub fn compare(a: Option<Scalar>, b: Option<Scalar>) -> Ordering {
        a.unwrap_or_default().cmp(&b.unwrap_or_default())
    }
}

impl Ord for Scalar {
    /// `vid` dominates; equal `vid` falls back to `pid`, smaller first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.vid
            .cmp(&other.vid)
            .then_with(|| self.pid.cmp(&other.pid))
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.pid, self.vid)
    }
}
