//! Store configuration
//!
//! The writer's identity (process id, region, owner) is explicit
//! constructor input, never ambient process-wide state: two stores in one
//! process can carry different identities, and a missing pid is impossible
//! by construction rather than a panic at first use.

use honu_concurrency::DEFAULT_SHARDS;

/// Identity and sizing for one store instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Process (replica) identifier stamped onto issued versions
    pub pid: u32,
    /// Region recorded on versions written by this store
    pub region: String,
    /// Default owner recorded on objects created by this store
    pub owner: String,
    /// Number of key-lock shards; 0 selects the default of 1024
    pub lock_shards: usize,
}

impl Config {
    /// Create a config with the required identity fields.
    pub fn new(pid: u32, region: impl Into<String>) -> Self {
        Self {
            pid,
            region: region.into(),
            owner: String::new(),
            lock_shards: DEFAULT_SHARDS,
        }
    }

    /// Set the default owner for created objects.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Override the key-lock shard count.
    pub fn with_lock_shards(mut self, shards: usize) -> Self {
        self.lock_shards = shards;
        self
    }
}
