//! Storage engine contract for the honu store
//!
//! The store never talks to LevelDB, Pebble, or any concrete backend
//! directly; it talks to the [`Engine`] trait defined here. Any backend
//! that preserves byte-lexicographic key ordering on scans (every LSM or
//! B-tree engine does) can implement it. [`MemoryEngine`] is the
//! reference implementation kept under test in this workspace.
//!
//! Cancellation and timeouts are not handled here: callers impose
//! deadlines at the engine-call boundary of whatever backend they plug in.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod traits;

pub use memory::MemoryEngine;
pub use traits::{Cursor, Engine};
