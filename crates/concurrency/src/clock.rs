//! Lamport clock
//!
//! The clock hands out strictly increasing version scalars for one process
//! and folds in externally observed scalars so that everything issued
//! afterwards happens-after anything already seen. Both operations are
//! single atomic instructions; the clock is safe to share without any
//! surrounding lock, though that alone does not make a read-modify-write
//! against the engine atomic.

use std::sync::atomic::{AtomicU64, Ordering};

use honu_core::Scalar;

/// Per-process monotonic version generator
#[derive(Debug)]
pub struct LamportClock {
    pid: u32,
    vid: AtomicU64,
}

impl LamportClock {
    /// Create a clock for the given process identifier, starting at zero.
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            vid: AtomicU64::new(0),
        }
    }

    /// Process identifier this clock stamps onto issued scalars
    #[inline]
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// The most recently observed scalar, without advancing.
    pub fn current(&self) -> Scalar {
        Scalar::new(self.pid, self.vid.load(Ordering::Acquire))
    }

    /// Issue the next scalar.
    ///
    /// Concurrent callers on the same clock never observe the same vid
    /// twice.
    #[inline]
    pub fn next(&self) -> Scalar {
        let vid = self.vid.fetch_add(1, Ordering::AcqRel) + 1;
        Scalar::new(self.pid, vid)
    }

    /// Advance to at least `remote.vid` without changing the pid.
    ///
    /// Required before accepting replicated writes so that later local
    /// scalars happen-after any version the remote has issued; merges can
    /// then never regress the clock.
    #[inline]
    pub fn update(&self, remote: Scalar) {
        self.vid.fetch_max(remote.vid, Ordering::AcqRel);
    }
}
