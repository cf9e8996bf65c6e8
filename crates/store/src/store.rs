//! The versioned object store
//!
//! [`Store`] ties the layers together: it composes record keys from
//! namespaces, guards the reserved system keyspace, serializes writers on
//! a sharded key-lock arena, classifies replicated writes through the
//! [`VersionManager`], and maintains a version-history keyspace alongside
//! the latest record for every object.
//!
//! # Data layout
//!
//! The latest record for a logical key lives at `namespace::key`, where
//! unscoped operations address the literal `default` namespace, wrapped in
//! the storage [`envelope`](crate::envelope). Every accepted write is additionally
//! appended under the reserved prefix as
//! `_honu/versions/` + [`Key`] bytes, where the key packs the object id
//! and the version scalar big-endian. Because the packed key's byte order
//! equals version order, an object's history is reconstructed with a
//! single prefix scan in version order; parents are never walked.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use honu_concurrency::{LamportClock, ShardedLock};
use honu_core::{Error, Key, Metadata, Result, Scalar, Version};
use honu_engine::Engine;

use crate::config::Config;
use crate::envelope;
use crate::iterator::Iter;
use crate::options::{canonical_namespace, Options};
use crate::resolver::{Update, VersionManager};

/// Prefix reserved for system records; user keys may not start with it
pub const RESERVED_PREFIX: &[u8] = b"_honu/";

/// Keyspace holding the per-object version history
const VERSIONS_PREFIX: &[u8] = b"_honu/versions/";

/// A stored object: its logical key, metadata, and payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    /// Logical key within the object's namespace
    pub key: Vec<u8>,
    /// Versioned metadata envelope
    pub metadata: Metadata,
    /// Opaque payload
    pub data: Vec<u8>,
}

impl Object {
    /// Version scalar of the object, zero when unversioned
    pub fn scalar(&self) -> Scalar {
        self.metadata.scalar()
    }

    /// True when the current version is a tombstone
    pub fn tombstone(&self) -> bool {
        self.metadata.tombstone()
    }
}

/// Versioned object store over an [`Engine`]
#[derive(Debug)]
pub struct Store<E: Engine> {
    engine: E,
    locks: ShardedLock,
    manager: VersionManager,
}

impl<E: Engine> Store<E> {
    /// Create a store with the given engine and writer identity.
    pub fn new(engine: E, config: Config) -> Self {
        let clock = Arc::new(LamportClock::new(config.pid));
        Self {
            engine,
            locks: ShardedLock::new(config.lock_shards),
            manager: VersionManager::new(clock, config.region, config.owner),
        }
    }

    /// The Lamport clock stamping local writes
    pub fn clock(&self) -> &Arc<LamportClock> {
        self.manager.clock()
    }

    /// Borrow the underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Fetch the payload of a live object.
    ///
    /// Tombstoned objects read as [`Error::NotFound`]; use [`object`] to
    /// observe deletion markers.
    ///
    /// [`object`]: Store::object
    pub fn get(&self, key: &[u8], opts: &Options) -> Result<Vec<u8>> {
        let object = self.object(key, opts)?;
        if object.tombstone() {
            return Err(Error::NotFound);
        }
        Ok(object.data)
    }

    /// Fetch the full record for a key, tombstoned or not.
    pub fn object(&self, key: &[u8], opts: &Options) -> Result<Object> {
        let record_key = self.record_key(key, opts)?;
        let _guard = self.locks.read(&record_key);
        self.read_object(&record_key, key)
    }

    /// Write a payload, creating the object or advancing its version.
    ///
    /// A put against a tombstoned object undeletes it by writing a live
    /// version forward of the tombstone. Returns the object as stored.
    pub fn put(&self, key: &[u8], data: &[u8], opts: &Options) -> Result<Object> {
        let record_key = self.record_key(key, opts)?;
        let _guard = self.locks.write(&record_key);

        let current = self.read_current(&record_key)?;
        check_requirements(current.as_ref(), opts)?;

        let metadata = match current {
            Some(current) => {
                let mut metadata = current;
                self.manager.advance(&mut metadata)?;
                metadata
            }
            None => {
                let mut metadata = Metadata {
                    object_id: Uuid::new_v4(),
                    namespace: opts.namespace_str().to_string(),
                    ..Metadata::default()
                };
                self.manager.create(&mut metadata);
                metadata
            }
        };

        let record = envelope::marshal(&metadata, data);
        self.write_record(&record_key, &metadata, &record)?;
        debug!(
            key = %String::from_utf8_lossy(key),
            version = %metadata.scalar(),
            "object stored"
        );

        Ok(Object {
            key: key.to_vec(),
            metadata,
            data: data.to_vec(),
        })
    }

    /// Mark an object deleted by writing a tombstone version.
    ///
    /// The payload is dropped from the latest record but survives in the
    /// version history. Deleting an absent key is [`Error::NotFound`];
    /// deleting an already-tombstoned object is [`Error::AlreadyDeleted`]
    /// unless the force option is set.
    pub fn delete(&self, key: &[u8], opts: &Options) -> Result<Object> {
        let record_key = self.record_key(key, opts)?;
        let _guard = self.locks.write(&record_key);

        let mut metadata = self.read_current(&record_key)?.ok_or(Error::NotFound)?;
        if metadata.tombstone() && !opts.force {
            return Err(Error::AlreadyDeleted);
        }
        self.manager.tombstone(&mut metadata)?;

        let record = envelope::marshal(&metadata, &[]);
        self.write_record(&record_key, &metadata, &record)?;
        debug!(
            key = %String::from_utf8_lossy(key),
            version = %metadata.scalar(),
            "object tombstoned"
        );

        Ok(Object {
            key: key.to_vec(),
            metadata,
            data: Vec::new(),
        })
    }

    /// Apply a replicated object from another replica verbatim.
    ///
    /// The candidate's version is classified against the stored one and
    /// written exactly as given when accepted; this store's clock is
    /// advanced past the candidate's scalar so later local writes
    /// happen-after it. Refusals return an error and write nothing.
    pub fn update(&self, object: &Object, opts: &Options) -> Result<Update> {
        let scoped = Options {
            namespace: Some(object.metadata.namespace.clone()),
            ..opts.clone()
        };
        let record_key = self.record_key(&object.key, &scoped)?;
        let _guard = self.locks.write(&record_key);

        let current = self.read_current(&record_key)?;
        let outcome = match self.manager.resolve(&object.metadata, current.as_ref(), opts) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    key = %String::from_utf8_lossy(&object.key),
                    version = %object.scalar(),
                    %err,
                    "update refused"
                );
                return Err(err);
            }
        };

        let record = envelope::marshal(&object.metadata, &object.data);
        self.write_record(&record_key, &object.metadata, &record)?;
        self.clock().update(object.scalar());
        debug!(
            key = %String::from_utf8_lossy(&object.key),
            version = %object.scalar(),
            %outcome,
            "replicated object applied"
        );
        Ok(outcome)
    }

    /// Iterate live objects whose keys start with `prefix`, in key order.
    ///
    /// Tombstoned objects are skipped unless the tombstones option is
    /// set; system records are never surfaced.
    pub fn iter(&self, prefix: &[u8], opts: &Options) -> Result<Iter> {
        let namespace = namespace_prefix(opts.namespace_str());
        let mut scan = namespace.clone();
        scan.extend_from_slice(prefix);
        let cursor = self.engine.iter(&scan)?;
        Ok(Iter::new(cursor, namespace, opts.tombstones))
    }

    /// The full version history of an object, oldest first.
    ///
    /// History is reconstructed by scanning the object's slice of the
    /// version keyspace; because packed key order equals version order,
    /// the scan comes back already sorted.
    pub fn versions(&self, key: &[u8], opts: &Options) -> Result<Vec<Version>> {
        let record_key = self.record_key(key, opts)?;
        let _guard = self.locks.read(&record_key);

        let metadata = self.read_current(&record_key)?.ok_or(Error::NotFound)?;
        let prefix = history_prefix(metadata.object_id);

        let mut cursor = self.engine.iter(&prefix)?;
        let mut versions = Vec::new();
        let mut ok = cursor.first();
        while ok {
            let value = cursor.value().unwrap_or_default();
            if let Some(stored) = envelope::metadata(value)? {
                if let Some(version) = stored.version {
                    versions.push(version);
                }
            }
            ok = cursor.next();
        }
        cursor.release();
        Ok(versions)
    }

    /// Irreversibly remove an object: its latest record and its entire
    /// version history. Requires the force option.
    pub fn destroy(&self, key: &[u8], opts: &Options) -> Result<()> {
        if !opts.force {
            return Err(Error::ForceRequired);
        }
        let record_key = self.record_key(key, opts)?;
        let _guard = self.locks.write(&record_key);

        let metadata = self.read_current(&record_key)?.ok_or(Error::NotFound)?;
        let prefix = history_prefix(metadata.object_id);

        let mut cursor = self.engine.iter(&prefix)?;
        let mut history = Vec::new();
        let mut ok = cursor.first();
        while ok {
            if let Some(found) = cursor.key() {
                history.push(found.to_vec());
            }
            ok = cursor.next();
        }
        cursor.release();

        for version_key in &history {
            self.engine.delete(version_key)?;
        }
        self.engine.delete(&record_key)?;
        warn!(
            key = %String::from_utf8_lossy(key),
            versions = history.len(),
            "object destroyed"
        );
        Ok(())
    }

    /// Compose the engine key for a logical key, guarding the reserved
    /// keyspace.
    fn record_key(&self, key: &[u8], opts: &Options) -> Result<Vec<u8>> {
        let namespace = opts.namespace_str();
        if namespace.as_bytes().starts_with(b"_honu") {
            return Err(Error::ReservedKeyspace(namespace.to_string()));
        }
        if key.starts_with(RESERVED_PREFIX) {
            return Err(Error::ReservedKeyspace(
                String::from_utf8_lossy(RESERVED_PREFIX).into_owned(),
            ));
        }
        let mut record_key = namespace_prefix(namespace);
        record_key.extend_from_slice(key);
        Ok(record_key)
    }

    /// Latest-record metadata for an engine key, `None` when absent
    fn read_current(&self, record_key: &[u8]) -> Result<Option<Metadata>> {
        match self.engine.get(record_key) {
            Ok(value) => envelope::metadata(&value),
            Err(Error::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn read_object(&self, record_key: &[u8], key: &[u8]) -> Result<Object> {
        let value = self.engine.get(record_key)?;
        let (metadata, data) = envelope::unmarshal(&value)?;
        let metadata = metadata
            .ok_or_else(|| Error::Malformed("record carries no metadata".to_string()))?;
        Ok(Object {
            key: key.to_vec(),
            metadata,
            data,
        })
    }

    /// Write the latest record and append the version-history record.
    fn write_record(&self, record_key: &[u8], metadata: &Metadata, record: &[u8]) -> Result<()> {
        self.engine.put(record_key, record)?;
        let history_key = history_key(metadata.object_id, metadata.scalar());
        self.engine.put(&history_key, record)?;
        Ok(())
    }
}

/// Namespace prefix prepended to record keys.
///
/// Every namespace, the default included, gets its own prefix, so a
/// namespace scan is always a true prefix scan and can never surface
/// another namespace's records.
fn namespace_prefix(namespace: &str) -> Vec<u8> {
    let namespace = canonical_namespace(namespace);
    let mut prefix = Vec::with_capacity(namespace.len() + 2);
    prefix.extend_from_slice(namespace.as_bytes());
    prefix.extend_from_slice(b"::");
    prefix
}

/// Engine key of one version-history record
fn history_key(object_id: Uuid, scalar: Scalar) -> Vec<u8> {
    let key = Key::new(object_id, Some(scalar));
    let mut out = Vec::with_capacity(VERSIONS_PREFIX.len() + key.as_bytes().len());
    out.extend_from_slice(VERSIONS_PREFIX);
    out.extend_from_slice(key.as_bytes());
    out
}

/// Engine prefix covering an object's whole version history
fn history_prefix(object_id: Uuid) -> Vec<u8> {
    let key = Key::new(object_id, None);
    let prefix = key.object_prefix();
    let mut out = Vec::with_capacity(VERSIONS_PREFIX.len() + prefix.len());
    out.extend_from_slice(VERSIONS_PREFIX);
    out.extend_from_slice(&prefix);
    out
}

fn check_requirements(current: Option<&Metadata>, opts: &Options) -> Result<()> {
    let live = current.map(|meta| !meta.tombstone()).unwrap_or(false);
    if opts.require_exists && !live {
        return Err(Error::NotFound);
    }
    if opts.require_not_exists && live {
        return Err(Error::AlreadyExists);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DEFAULT_NAMESPACE;
    use honu_engine::MemoryEngine;

    fn store() -> Store<MemoryEngine> {
        Store::new(MemoryEngine::new(), Config::new(1, "us-east-1"))
    }

    #[test]
    fn test_put_get_round_trip() {
        let store = store();
        let opts = Options::default();
        let object = store.put(b"alpha", b"first", &opts).unwrap();
        assert_eq!(object.scalar(), Scalar::new(1, 1));
        assert_eq!(store.get(b"alpha", &opts).unwrap(), b"first");
    }

    #[test]
    fn test_put_advances_version() {
        let store = store();
        let opts = Options::default();
        store.put(b"alpha", b"first", &opts).unwrap();
        let object = store.put(b"alpha", b"second", &opts).unwrap();
        assert_eq!(object.scalar(), Scalar::new(1, 2));
        let parent = object.metadata.version.as_ref().unwrap().parent.as_deref();
        assert_eq!(parent.unwrap().scalar(), Scalar::new(1, 1));
        assert_eq!(store.get(b"alpha", &opts).unwrap(), b"second");
    }

    #[test]
    fn test_get_missing() {
        let store = store();
        assert!(matches!(
            store.get(b"nope", &Options::default()),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn test_delete_then_undelete() {
        let store = store();
        let opts = Options::default();
        store.put(b"alpha", b"first", &opts).unwrap();

        let deleted = store.delete(b"alpha", &opts).unwrap();
        assert!(deleted.tombstone());
        assert_eq!(deleted.scalar(), Scalar::new(1, 2));

        // get refuses the tombstone, object surfaces it
        assert!(matches!(store.get(b"alpha", &opts), Err(Error::NotFound)));
        let object = store.object(b"alpha", &opts).unwrap();
        assert!(object.tombstone());
        assert!(object.data.is_empty());

        // a later put writes forward of the tombstone
        let revived = store.put(b"alpha", b"again", &opts).unwrap();
        assert!(!revived.tombstone());
        assert_eq!(revived.scalar(), Scalar::new(1, 3));
        assert_eq!(store.get(b"alpha", &opts).unwrap(), b"again");
    }

    #[test]
    fn test_delete_missing_and_double_delete() {
        let store = store();
        let opts = Options::default();
        assert!(matches!(store.delete(b"alpha", &opts), Err(Error::NotFound)));

        store.put(b"alpha", b"first", &opts).unwrap();
        store.delete(b"alpha", &opts).unwrap();
        assert!(matches!(
            store.delete(b"alpha", &opts),
            Err(Error::AlreadyDeleted)
        ));
        // force writes a second tombstone over the first
        let again = store.delete(b"alpha", &Options::new().force()).unwrap();
        assert!(again.tombstone());
        assert_eq!(again.scalar(), Scalar::new(1, 3));
    }

    #[test]
    fn test_require_flags() {
        let store = store();
        assert!(matches!(
            store.put(b"alpha", b"x", &Options::new().require_exists()),
            Err(Error::NotFound)
        ));
        store.put(b"alpha", b"x", &Options::default()).unwrap();
        assert!(matches!(
            store.put(b"alpha", b"y", &Options::new().require_not_exists()),
            Err(Error::AlreadyExists)
        ));
        // a tombstoned object does not count as existing
        store.delete(b"alpha", &Options::default()).unwrap();
        store
            .put(b"alpha", b"z", &Options::new().require_not_exists())
            .unwrap();
    }

    #[test]
    fn test_namespaces_are_disjoint() {
        let store = store();
        let people = Options::new().in_namespace("people");
        let things = Options::new().in_namespace("things");
        store.put(b"alpha", b"person", &people).unwrap();
        store.put(b"alpha", b"thing", &things).unwrap();

        assert_eq!(store.get(b"alpha", &people).unwrap(), b"person");
        assert_eq!(store.get(b"alpha", &things).unwrap(), b"thing");
        assert!(matches!(
            store.get(b"alpha", &Options::default()),
            Err(Error::NotFound)
        ));
        assert_eq!(
            store.object(b"alpha", &people).unwrap().metadata.namespace,
            "people"
        );
    }

    #[test]
    fn test_reserved_keyspace_guarded() {
        let store = store();
        let opts = Options::default();
        assert!(matches!(
            store.put(b"_honu/versions/x", b"data", &opts),
            Err(Error::ReservedKeyspace(_))
        ));
        assert!(matches!(
            store.get(b"_honu/anything", &opts),
            Err(Error::ReservedKeyspace(_))
        ));
        assert!(matches!(
            store.put(b"x", b"data", &Options::new().in_namespace("_honu")),
            Err(Error::ReservedKeyspace(_))
        ));
    }

    #[test]
    fn test_versions_scan_in_order() {
        let store = store();
        let opts = Options::default();
        store.put(b"alpha", b"v1", &opts).unwrap();
        store.put(b"alpha", b"v2", &opts).unwrap();
        store.delete(b"alpha", &opts).unwrap();
        store.put(b"alpha", b"v4", &opts).unwrap();

        let versions = store.versions(b"alpha", &opts).unwrap();
        let scalars: Vec<Scalar> = versions.iter().map(Version::scalar).collect();
        assert_eq!(
            scalars,
            vec![
                Scalar::new(1, 1),
                Scalar::new(1, 2),
                Scalar::new(1, 3),
                Scalar::new(1, 4)
            ]
        );
        assert!(versions[2].tombstone);
        assert!(!versions[3].tombstone);
    }

    #[test]
    fn test_versions_of_missing_object() {
        let store = store();
        assert!(matches!(
            store.versions(b"nope", &Options::default()),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn test_destroy_requires_force_and_wipes_history() {
        let store = store();
        let opts = Options::default();
        store.put(b"alpha", b"v1", &opts).unwrap();
        store.put(b"alpha", b"v2", &opts).unwrap();

        assert!(matches!(
            store.destroy(b"alpha", &opts),
            Err(Error::ForceRequired)
        ));
        store.destroy(b"alpha", &Options::new().force()).unwrap();

        assert!(matches!(store.object(b"alpha", &opts), Err(Error::NotFound)));
        // history is gone too: a recreated object starts a fresh chain
        store.put(b"alpha", b"new", &opts).unwrap();
        let versions = store.versions(b"alpha", &opts).unwrap();
        assert_eq!(versions.len(), 1);
    }

    #[test]
    fn test_update_linear_and_clock_advance() {
        let local = store();
        let remote = Store::new(MemoryEngine::new(), Config::new(2, "eu-west-3"));

        let object = remote.put(b"alpha", b"from-remote", &Options::default()).unwrap();
        let outcome = local.update(&object, &Options::default()).unwrap();
        assert_eq!(outcome, Update::Linear);

        // the record is applied verbatim, remote identity intact
        let stored = local.object(b"alpha", &Options::default()).unwrap();
        assert_eq!(stored.metadata.version, object.metadata.version);
        assert_eq!(stored.data, b"from-remote");

        // local clock moved past the remote scalar
        let next = local.put(b"beta", b"local", &Options::default()).unwrap();
        assert!(next.scalar() > object.scalar());
    }

    #[test]
    fn test_update_replay_refused() {
        let local = store();
        let remote = Store::new(MemoryEngine::new(), Config::new(2, "eu-west-3"));
        let object = remote.put(b"alpha", b"x", &Options::default()).unwrap();

        local.update(&object, &Options::default()).unwrap();
        let err = local.update(&object, &Options::default()).unwrap_err();
        assert!(matches!(err, Error::NotLater { .. }));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_update_stomp_on_concurrent_dominant() {
        let local = store();
        let opts = Options::default();
        local.put(b"alpha", b"v1", &opts).unwrap();
        let base = local.object(b"alpha", &opts).unwrap();
        local.put(b"alpha", b"v2-local", &opts).unwrap();

        // the remote branched from v1 without seeing v2 and advanced further
        let mut candidate = base.clone();
        let parent = candidate.metadata.version.clone().unwrap();
        candidate.metadata.version = Some(Version {
            pid: 2,
            vid: 3,
            region: "eu-west-3".into(),
            parent: Some(Box::new(parent.strip())),
            ..Version::default()
        });
        candidate.data = b"v3-remote".to_vec();

        let outcome = local.update(&candidate, &opts).unwrap();
        assert_eq!(outcome, Update::Stomp);
        assert_eq!(local.get(b"alpha", &opts).unwrap(), b"v3-remote");
    }

    #[test]
    fn test_update_forced_applies_stale_object() {
        let local = store();
        let opts = Options::default();
        local.put(b"alpha", b"v1", &opts).unwrap();
        let stale = local.object(b"alpha", &opts).unwrap();
        local.put(b"alpha", b"v2", &opts).unwrap();

        let outcome = local.update(&stale, &Options::new().force()).unwrap();
        assert_eq!(outcome, Update::Forced);
        assert_eq!(local.get(b"alpha", &opts).unwrap(), b"v1");
    }

    #[test]
    fn test_update_tombstone_replicates_delete() {
        let local = store();
        let remote = Store::new(MemoryEngine::new(), Config::new(2, "eu-west-3"));
        let opts = Options::default();

        let created = remote.put(b"alpha", b"x", &opts).unwrap();
        local.update(&created, &opts).unwrap();
        let deleted = remote.delete(b"alpha", &opts).unwrap();
        let outcome = local.update(&deleted, &opts).unwrap();
        assert_eq!(outcome, Update::Linear);

        assert!(matches!(local.get(b"alpha", &opts), Err(Error::NotFound)));
        assert!(local.object(b"alpha", &opts).unwrap().tombstone());
    }

    #[test]
    fn test_iter_skips_tombstones_by_default() {
        let store = store();
        let opts = Options::default();
        for i in 0..6u8 {
            store.put(&[b'k', b'0' + i], &[i], &opts).unwrap();
        }
        for i in [1u8, 3, 5] {
            store.delete(&[b'k', b'0' + i], &opts).unwrap();
        }

        let mut live = Vec::new();
        let mut iter = store.iter(b"k", &opts).unwrap();
        let mut ok = iter.first();
        while ok {
            live.push(iter.key().unwrap().to_vec());
            ok = iter.next();
        }
        assert_eq!(live, vec![b"k0".to_vec(), b"k2".to_vec(), b"k4".to_vec()]);

        let mut all = 0;
        let mut iter = store.iter(b"k", &Options::new().with_tombstones()).unwrap();
        let mut ok = iter.first();
        while ok {
            all += 1;
            ok = iter.next();
        }
        assert_eq!(all, 6);
    }

    #[test]
    fn test_iter_scoped_to_namespace() {
        let store = store();
        let people = Options::new().in_namespace("people");
        store.put(b"alice", b"1", &people).unwrap();
        store.put(b"bob", b"2", &people).unwrap();
        store.put(b"hammer", b"3", &Options::default()).unwrap();

        let mut keys = Vec::new();
        let mut iter = store.iter(b"", &people).unwrap();
        let mut ok = iter.first();
        while ok {
            keys.push(iter.key().unwrap().to_vec());
            ok = iter.next();
        }
        assert_eq!(keys, vec![b"alice".to_vec(), b"bob".to_vec()]);
    }

    #[test]
    fn test_default_namespace_scan_excludes_named() {
        let store = store();
        let people = Options::new().in_namespace("people");
        store.put(b"ann", b"1", &people).unwrap();
        store.put(b"bob", b"2", &people).unwrap();
        store.put(b"zed", b"3", &Options::default()).unwrap();

        // an unscoped scan sees only the default namespace, never the
        // raw prefixed keys of the named ones
        let mut keys = Vec::new();
        let mut iter = store.iter(b"", &Options::default()).unwrap();
        let mut ok = iter.first();
        while ok {
            keys.push(iter.key().unwrap().to_vec());
            ok = iter.next();
        }
        assert_eq!(keys, vec![b"zed".to_vec()]);

        // the default namespace is addressable by its literal name too
        let object = store.object(b"zed", &Options::default()).unwrap();
        assert_eq!(object.metadata.namespace, DEFAULT_NAMESPACE);
        let named = Options::new().in_namespace(DEFAULT_NAMESPACE);
        assert_eq!(store.get(b"zed", &named).unwrap(), b"3");
    }
}
