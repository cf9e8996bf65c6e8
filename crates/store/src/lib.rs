//! The honu versioned object store
//!
//! This crate orchestrates the lower layers into the user-facing store:
//!
//! - [`Store`]: put/get/object/delete/update/iter over any [`honu_engine::Engine`]
//! - [`envelope`]: the on-disk record layout wrapping metadata and payload
//! - [`resolver`]: conflict classification and local version management
//! - [`Iter`]: tombstone-filtering, prefix-stripping iteration
//!
//! The store is the only component that knows about key locking, the
//! reserved system keyspace, and the version-history keyspace.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod envelope;
pub mod iterator;
pub mod options;
pub mod resolver;
pub mod store;

pub use config::Config;
pub use iterator::Iter;
pub use options::{Options, DEFAULT_NAMESPACE};
pub use resolver::{Update, VersionManager};
pub use store::{Object, Store};
