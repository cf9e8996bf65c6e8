//! Conflict resolution and version management
//!
//! The [`VersionManager`] does two jobs:
//!
//! - advance versions for local writes (`create`, `advance`, `tombstone`),
//!   stamping scalars from the store's Lamport clock; and
//! - classify replicated candidates against the stored version
//!   (`resolve`), producing an [`Update`] outcome or a refusal error.
//!
//! The resolver never retries and performs no compare-and-swap of its
//! own: a stale or conflicting candidate is refused with a descriptive
//! error, and the caller (typically the replication layer) decides
//! whether to retry, merge, or reapply with force.

use chrono::Utc;
use std::cmp::Ordering;
use std::sync::Arc;

use honu_concurrency::LamportClock;
use honu_core::{Error, Metadata, Result, Scalar, Version};

use crate::options::{canonical_namespace, Options};

/// Outcome of applying a candidate version against the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Nothing was written; always paired with a refusal error
    NoChange,
    /// The force option bypassed version and namespace checks
    Forced,
    /// The candidate is the direct successor of the stored version
    Linear,
    /// A dominant concurrent candidate overwrote a version it does not
    /// descend from
    Stomp,
    /// A later candidate that is neither Linear nor Stomp; history has a
    /// gap the replication layer may fill in later
    Skip,
}

impl std::fmt::Display for Update {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Update::NoChange => "no change",
            Update::Forced => "forced",
            Update::Linear => "linear",
            Update::Stomp => "stomp",
            Update::Skip => "skip",
        };
        f.write_str(name)
    }
}

/// Advances local versions and classifies remote candidates
#[derive(Debug)]
pub struct VersionManager {
    clock: Arc<LamportClock>,
    region: String,
    owner: String,
}

impl VersionManager {
    /// Create a manager stamping versions with this writer's identity.
    pub fn new(clock: Arc<LamportClock>, region: String, owner: String) -> Self {
        Self {
            clock,
            region,
            owner,
        }
    }

    /// The clock scalars are issued from
    pub fn clock(&self) -> &Arc<LamportClock> {
        &self.clock
    }

    /// Stamp the first version onto a freshly created object.
    ///
    /// Region and owner are set here and only here; later writes preserve
    /// the creator's identity fields.
    pub fn create(&self, meta: &mut Metadata) {
        let now = Some(Utc::now());
        let scalar = self.clock.next();
        meta.version = Some(Version {
            pid: scalar.pid,
            vid: scalar.vid,
            region: self.region.clone(),
            parent: None,
            tombstone: false,
            created: now,
            modified: now,
        });
        if meta.owner.is_empty() {
            meta.owner = self.owner.clone();
        }
        if meta.created.is_none() {
            meta.created = now;
        }
        meta.modified = now;
    }

    /// Advance an object to its next live version.
    ///
    /// The prior version becomes the parent (stripped of its own parent),
    /// the scalar comes from the local clock, and any tombstone is
    /// cleared; a put after a delete undeletes by writing forward of the
    /// tombstone.
    pub fn advance(&self, meta: &mut Metadata) -> Result<()> {
        let prior = meta.version.take().ok_or(Error::NilVersion)?;
        let now = Some(Utc::now());
        let scalar = self.clock.next();
        meta.version = Some(Version {
            pid: scalar.pid,
            vid: scalar.vid,
            region: self.region.clone(),
            parent: Some(Box::new(prior.strip())),
            tombstone: false,
            created: prior.created,
            modified: now,
        });
        meta.modified = now;
        Ok(())
    }

    /// Advance an object to a tombstoned version.
    pub fn tombstone(&self, meta: &mut Metadata) -> Result<()> {
        self.advance(meta)?;
        if let Some(version) = meta.version.as_mut() {
            version.tombstone = true;
        }
        Ok(())
    }

    /// Classify `candidate` against the presently stored object.
    ///
    /// `current == None` means nothing is stored for the key, equivalent
    /// to the zero version. Refusals return an error and imply
    /// [`Update::NoChange`]; nothing is ever mutated here.
    pub fn resolve(
        &self,
        candidate: &Metadata,
        current: Option<&Metadata>,
        opts: &Options,
    ) -> Result<Update> {
        if opts.force {
            return Ok(Update::Forced);
        }

        // A candidate with no version at all cannot be classified
        let candidate_version = candidate.version.as_ref().ok_or(Error::NilVersion)?;

        if let Some(namespace) = opts.namespace.as_deref() {
            let expected = canonical_namespace(namespace);
            if expected != canonical_namespace(&candidate.namespace) {
                return Err(Error::NamespaceMismatch {
                    expected: expected.to_string(),
                    actual: candidate.namespace.clone(),
                });
            }
        }

        let current_scalar = current.map(Metadata::scalar).unwrap_or_default();
        let candidate_scalar = candidate_version.scalar();
        if candidate_scalar.cmp(&current_scalar) != Ordering::Greater {
            return Err(Error::NotLater {
                candidate: candidate_scalar,
                current: current_scalar,
            });
        }

        let parent_scalar = candidate_version
            .parent
            .as_ref()
            .map(|p| p.scalar())
            .unwrap_or_default();
        Ok(match parent_scalar.cmp(&current_scalar) {
            // Direct successor of what we have stored
            Ordering::Equal => Update::Linear,
            // Branched before seeing our version: concurrent; the
            // dominant identity overwrites, anything else is a gap
            Ordering::Less => {
                if dominates(candidate_scalar, current_scalar) {
                    Update::Stomp
                } else {
                    Update::Skip
                }
            }
            // Descends from versions we never stored
            Ordering::Greater => Update::Skip,
        })
    }
}

/// Identity dominance for concurrent writes: larger vid, or equal vid
/// with smaller pid.
fn dominates(candidate: Scalar, current: Scalar) -> bool {
    candidate.vid > current.vid || (candidate.vid == current.vid && candidate.pid < current.pid)
}
