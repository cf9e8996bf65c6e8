//! Core types for the honu versioned object store
//!
//! This crate holds the contract types shared by every layer:
//!
//! - [`Scalar`] and its happens-before comparator
//! - [`Key`], the fixed-width versioned key whose byte order equals
//!   version order
//! - [`Version`] and [`Metadata`], the versioned envelope wrapped around
//!   every stored payload
//! - the system-wide [`Error`] taxonomy
//!
//! Everything here is format: no I/O, no locking, no engine calls.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod metadata;
pub mod scalar;
pub mod version;

pub use error::{Error, Result};
pub use key::Key;
pub use metadata::{AccessControl, Compression, Encryption, Metadata, Publisher, SchemaVersion};
pub use scalar::Scalar;
pub use version::Version;
