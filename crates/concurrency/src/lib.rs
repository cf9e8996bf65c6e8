//! Concurrency primitives for the honu store
//!
//! Two coordination tools live here:
//!
//! - [`LamportClock`]: the per-process monotonic version generator
//! - [`ShardedLock`]: the hash-bucketed mutex table that serializes
//!   read-modify-write sequences per key
//!
//! Neither owns any key data; both are pure coordination indexes shared by
//! every operation against one store instance.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod sharded;

pub use clock::LamportClock;
pub use sharded::{ShardedLock, DEFAULT_SHARDS};
