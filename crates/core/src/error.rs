//! Error types for the honu store
//!
//! One taxonomy for the whole system, using `thiserror` for Display/Error
//! impls. Decode faults from `honu-codec` convert in via `From` so engine
//! and store code can use a single `Result` alias.
//!
//! Version-conflict refusals (`NotLater`, `NamespaceMismatch`) are business
//! outcomes, not engine faults: the resolver reports them without retrying
//! and leaves retry or force-reapply policy to the caller.

use crate::scalar::Scalar;
use thiserror::Error;

/// Result type alias for honu operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the honu store
#[derive(Debug, Error)]
pub enum Error {
    /// Key absent from the engine, or tombstoned where liveness is required
    #[error("object not found")]
    NotFound,

    /// RequireNotExists was set but a live object is already stored
    #[error("object already exists")]
    AlreadyExists,

    /// Delete aimed at an object whose current version is a tombstone
    #[error("object is already deleted")]
    AlreadyDeleted,

    /// Mutation attempted on a read-only database handle
    #[error("database is read-only")]
    ReadOnlyDb,

    /// Mutation attempted inside a read-only transaction
    #[error("transaction is read-only")]
    ReadOnlyTx,

    /// A key or envelope carries an unrecognized format-version byte
    #[error("unknown format version {0:#04x}")]
    BadVersion(u8),

    /// A key has a length that matches no known layout
    #[error("key size {0} matches no key layout")]
    BadSize(usize),

    /// An envelope or record frame could not be parsed
    #[error("malformed record: {0}")]
    Malformed(String),

    /// Candidate version does not happen-after the stored version
    #[error("candidate version {candidate} is not later than stored version {current}")]
    NotLater {
        /// Version carried by the rejected candidate
        candidate: Scalar,
        /// Version currently stored for the key
        current: Scalar,
    },

    /// Supplied namespace scope does not match the object's own namespace
    #[error("namespace mismatch: operation scoped to {expected:?} but object belongs to {actual:?}")]
    NamespaceMismatch {
        /// Namespace the operation was scoped to
        expected: String,
        /// Namespace recorded on the object
        actual: String,
    },

    /// Update or delete handed an object with no version to act on
    #[error("cannot operate on an object with no version")]
    NilVersion,

    /// Key or namespace intrudes on the reserved system keyspace
    #[error("key uses the reserved system prefix {0:?}")]
    ReservedKeyspace(String),

    /// Operation requires the Force option
    #[error("operation requires the force option")]
    ForceRequired,

    /// Binary decode fault from the codec layer
    #[error("codec error: {0}")]
    Codec(#[from] honu_codec::CodecError),

    /// Failure raised by the storage engine collaborator
    #[error("engine error: {0}")]
    Engine(String),
}

impl Error {
    /// True for refusals the replication layer may retry with Force
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::NotLater { .. } | Error::NamespaceMismatch { .. })
    }

    /// True when the condition means "no live object here"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}
