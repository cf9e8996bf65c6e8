//! Engine and cursor capability traits

use honu_core::Result;

/// Contract every storage backend satisfies.
///
/// Keys and values are opaque bytes. Scans must return keys in
/// byte-lexicographic order; the store's version-ordering guarantees rest
/// on that property.
///
/// # Thread Safety
///
/// Engines must be `Send + Sync`: one engine instance is shared by every
/// operation against a store.
pub trait Engine: Send + Sync {
    /// Fetch the value stored at `key`, failing `NotFound` when absent.
    fn get(&self, key: &[u8]) -> Result<Vec<u8>>;

    /// Store `value` at `key`, replacing any existing value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Remove `key` from the engine. Removing an absent key is not an
    /// error; deletion semantics above this layer are tombstones, and the
    /// store only calls this for physical purges.
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Ordered cursor over every key beginning with `prefix`.
    fn iter(&self, prefix: &[u8]) -> Result<Box<dyn Cursor + Send>>;

    /// Ordered cursor over keys in `[start, end)`.
    fn range(&self, start: &[u8], end: &[u8]) -> Result<Box<dyn Cursor + Send>>;
}

/// Ordered cursor over an engine scan.
///
/// A fresh cursor is positioned before the first entry; the first `next`
/// (or `first`, `last`, `seek`) positions it. All positioning methods
/// return `false` once the cursor moves past either end or after
/// [`Cursor::release`], and `key`/`value` return `None` in that state.
pub trait Cursor {
    /// Position at the first entry with key >= `key`.
    fn seek(&mut self, key: &[u8]) -> bool;

    /// Advance to the next entry.
    fn next(&mut self) -> bool;

    /// Step back to the previous entry.
    fn prev(&mut self) -> bool;

    /// Position at the first entry of the scan.
    fn first(&mut self) -> bool;

    /// Position at the last entry of the scan.
    fn last(&mut self) -> bool;

    /// Key at the current position.
    fn key(&self) -> Option<&[u8]>;

    /// Value at the current position.
    fn value(&self) -> Option<&[u8]>;

    /// Fault encountered during iteration, if any. Idempotent: once set it
    /// is never reset by further calls.
    fn error(&self) -> Option<&honu_core::Error>;

    /// Release the cursor; every later positioning call returns `false`.
    fn release(&mut self);
}
