//! Per-operation options

/// Name of the namespace addressed when no scope is given.
///
/// Every namespace, the default included, owns a disjoint slice of the
/// record keyspace, so a scan of one namespace can never surface another's
/// records.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Canonical form of a namespace name; the empty string maps to
/// [`DEFAULT_NAMESPACE`].
pub fn canonical_namespace(namespace: &str) -> &str {
    if namespace.is_empty() {
        DEFAULT_NAMESPACE
    } else {
        namespace
    }
}

/// Options recognized by store operations.
///
/// Unset fields mean "no constraint"; `Options::default()` is valid for
/// every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Namespace scope; `None` addresses the default namespace
    pub namespace: Option<String>,
    /// Bypass version and namespace checks and always write
    pub force: bool,
    /// Include tombstoned objects in iteration
    pub tombstones: bool,
    /// Fail `NotFound` unless a live object is already stored
    pub require_exists: bool,
    /// Fail `AlreadyExists` when a live object is already stored
    pub require_not_exists: bool,
}

impl Options {
    /// Options with no constraints set
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope the operation to a namespace.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Bypass version and namespace checks.
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    /// Include tombstones in iteration, for replication and backup paths.
    pub fn with_tombstones(mut self) -> Self {
        self.tombstones = true;
        self
    }

    /// Require a live object to already exist.
    pub fn require_exists(mut self) -> Self {
        self.require_exists = true;
        self
    }

    /// Require that no live object exists yet.
    pub fn require_not_exists(mut self) -> Self {
        self.require_not_exists = true;
        self
    }

    /// Namespace scope in canonical form; [`DEFAULT_NAMESPACE`] when unset
    pub fn namespace_str(&self) -> &str {
        canonical_namespace(self.namespace.as_deref().unwrap_or(""))
    }
}
