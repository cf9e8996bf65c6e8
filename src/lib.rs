//! Honu - Embedded, replicable versioned object store
//!
//! Honu stores opaque payloads under logical keys and versions every write
//! with a Lamport scalar, so replicas that exchange objects out of band can
//! classify and apply each other's writes deterministically without a
//! central sequencer.
//!
//! # Quick Start
//!
//! ```
//! use honu::{Config, MemoryEngine, Options, Store};
//!
//! let store = Store::new(MemoryEngine::new(), Config::new(1, "us-east-1"));
//! let opts = Options::default();
//!
//! store.put(b"user:123", b"Alice", &opts)?;
//! let data = store.get(b"user:123", &opts)?;
//! assert_eq!(data, b"Alice");
//!
//! // Deletes write a tombstone version; a later put undeletes
//! store.delete(b"user:123", &opts)?;
//! assert!(store.get(b"user:123", &opts).is_err());
//! # Ok::<(), honu::Error>(())
//! ```
//!
//! # Architecture
//!
//! The store composes five layers, each its own crate:
//!
//! - `honu-core`: scalars, versions, metadata, the packed key format
//! - `honu-codec`: the schema-free varint binary codec
//! - `honu-concurrency`: the Lamport clock and the sharded key-lock arena
//! - `honu-engine`: the [`Engine`] trait and the in-memory engine
//! - `honu-store`: the [`Store`] orchestrating all of the above
//!
//! Any ordered key-value engine can substitute for [`MemoryEngine`] by
//! implementing [`Engine`].

pub use honu_core::{Error, Key, Metadata, Result, Scalar, Version};

pub use honu_concurrency::LamportClock;

pub use honu_engine::{Cursor, Engine, MemoryEngine};

pub use honu_store::{
    Config, Iter, Object, Options, Store, Update, VersionManager, DEFAULT_NAMESPACE,
};

/// Lower-level building blocks for engine implementors and tooling
pub mod codec {
    pub use honu_codec::*;
}
