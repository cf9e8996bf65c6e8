//! Sharded key locks
//!
//! A fixed arena of read/write mutexes indexed by `crc32(key) mod n`. The
//! arena owns no key data; it only coordinates access, bounding lock
//! memory to O(n) regardless of key-space size. Distinct keys may alias
//! to the same slot, which costs false contention but never correctness:
//! callers hold the lock for their own key across the whole critical
//! section either way.
//!
//! Every mutation must hold the write guard across the full
//! read-current, classify, encode, write sequence; readers take only the
//! read guard and run concurrently.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Default shard count when the caller passes zero
pub const DEFAULT_SHARDS: usize = 1024;

/// Hash-bucketed read/write mutex table
pub struct ShardedLock {
    shards: Vec<RwLock<()>>,
}

impl ShardedLock {
    /// Allocate `n` independent read/write mutexes; `0` maps to
    /// [`DEFAULT_SHARDS`]. The table is sized once and never resized.
    pub fn new(n: usize) -> Self {
        let n = if n == 0 { DEFAULT_SHARDS } else { n };
        let mut shards = Vec::with_capacity(n);
        shards.resize_with(n, RwLock::default);
        Self { shards }
    }

    /// Number of lock slots
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Slot index for a key; CRC32 with the fixed IEEE polynomial so the
    /// mapping is stable across processes.
    #[inline]
    pub fn shard_for(&self, key: &[u8]) -> usize {
        crc32fast::hash(key) as usize % self.shards.len()
    }

    /// Take the write lock for `key`'s slot.
    #[inline]
    pub fn write(&self, key: &[u8]) -> RwLockWriteGuard<'_, ()> {
        self.shards[self.shard_for(key)].write()
    }

    /// Take the read lock for `key`'s slot.
    #[inline]
    pub fn read(&self, key: &[u8]) -> RwLockReadGuard<'_, ()> {
        self.shards[self.shard_for(key)].read()
    }
}

impl std::fmt::Debug for ShardedLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedLock")
            .field("shards", &self.shards.len())
            .finish()
    }
}
