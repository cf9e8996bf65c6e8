//! Tombstone-aware store iteration
//!
//! [`Iter`] wraps an engine cursor and re-exposes it in store terms:
//! record keys come back with the namespace prefix stripped, envelopes are
//! decoded into metadata and payload, reserved system keys are invisible,
//! and tombstoned objects are skipped unless the caller opted in. Skipping
//! continues in the direction of travel, so `next` past a run of
//! tombstones lands on the next live object and `prev` on the previous
//! one.
//!
//! Decode faults make the iterator sticky: the first failure is retained,
//! every later movement returns `false`, and `error()` reports the fault
//! after the loop ends.

use honu_core::{Error, Metadata};
use honu_engine::Cursor;

use crate::envelope;
use crate::store::{Object, RESERVED_PREFIX};

/// Direction of the most recent movement, used to keep skipping the same
/// way when filtering.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

struct Entry {
    key: Vec<u8>,
    metadata: Metadata,
    data: Vec<u8>,
}

/// Iterator over live objects in a store
pub struct Iter {
    cursor: Box<dyn Cursor + Send>,
    prefix: Vec<u8>,
    tombstones: bool,
    current: Option<Entry>,
    error: Option<Error>,
    released: bool,
}

impl Iter {
    /// Wrap an engine cursor. `prefix` is the namespace prefix the store
    /// prepended to record keys; it is stripped from every key handed out.
    pub(crate) fn new(cursor: Box<dyn Cursor + Send>, prefix: Vec<u8>, tombstones: bool) -> Self {
        Self {
            cursor,
            prefix,
            tombstones,
            current: None,
            error: None,
            released: false,
        }
    }

    /// Move to the first admissible object at or after `key` (key given
    /// without the namespace prefix).
    pub fn seek(&mut self, key: &[u8]) -> bool {
        if self.done() {
            return false;
        }
        let mut target = self.prefix.clone();
        target.extend_from_slice(key);
        let ok = self.cursor.seek(&target);
        self.settle(ok, Direction::Forward)
    }

    /// Advance to the next admissible object.
    pub fn next(&mut self) -> bool {
        if self.done() {
            return false;
        }
        let ok = self.cursor.next();
        self.settle(ok, Direction::Forward)
    }

    /// Step back to the previous admissible object.
    pub fn prev(&mut self) -> bool {
        if self.done() {
            return false;
        }
        let ok = self.cursor.prev();
        self.settle(ok, Direction::Backward)
    }

    /// Move to the first admissible object.
    pub fn first(&mut self) -> bool {
        if self.done() {
            return false;
        }
        let ok = self.cursor.first();
        self.settle(ok, Direction::Forward)
    }

    /// Move to the last admissible object.
    pub fn last(&mut self) -> bool {
        if self.done() {
            return false;
        }
        let ok = self.cursor.last();
        self.settle(ok, Direction::Backward)
    }

    /// Key of the current object, without the namespace prefix
    pub fn key(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|entry| entry.key.as_slice())
    }

    /// Metadata of the current object
    pub fn metadata(&self) -> Option<&Metadata> {
        self.current.as_ref().map(|entry| &entry.metadata)
    }

    /// Payload of the current object
    pub fn data(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|entry| entry.data.as_slice())
    }

    /// The current object as a whole, cloned out of the iterator
    pub fn object(&self) -> Option<Object> {
        self.current.as_ref().map(|entry| Object {
            key: entry.key.clone(),
            metadata: entry.metadata.clone(),
            data: entry.data.clone(),
        })
    }

    /// First fault encountered, if any; positioning methods return false
    /// forever once this is set.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref().or_else(|| self.cursor.error())
    }

    /// Release the underlying cursor; every later movement returns false.
    pub fn release(&mut self) {
        self.released = true;
        self.current = None;
        self.cursor.release();
    }

    fn done(&self) -> bool {
        self.released || self.error.is_some()
    }

    /// Walk in `direction` until the cursor rests on an admissible record,
    /// decoding it into `current`.
    fn settle(&mut self, mut ok: bool, direction: Direction) -> bool {
        loop {
            if !ok {
                self.current = None;
                return false;
            }
            let key = match self.cursor.key() {
                Some(key) => key,
                None => {
                    self.current = None;
                    return false;
                }
            };

            // System records are never surfaced through iteration
            if key.starts_with(RESERVED_PREFIX) {
                ok = self.step(direction);
                continue;
            }

            let stripped = if key.starts_with(&self.prefix) {
                key[self.prefix.len()..].to_vec()
            } else {
                key.to_vec()
            };

            let value = self.cursor.value().unwrap_or_default();
            match envelope::unmarshal(value) {
                Ok((Some(metadata), data)) => {
                    if metadata.tombstone() && !self.tombstones {
                        ok = self.step(direction);
                        continue;
                    }
                    self.current = Some(Entry {
                        key: stripped,
                        metadata,
                        data,
                    });
                    return true;
                }
                // A record with no metadata is a stray system value
                Ok((None, _)) => {
                    ok = self.step(direction);
                    continue;
                }
                Err(err) => {
                    self.error = Some(err);
                    self.current = None;
                    return false;
                }
            }
        }
    }

    fn step(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.cursor.next(),
            Direction::Backward => self.cursor.prev(),
        }
    }
}

impl std::fmt::Debug for Iter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter")
            .field("prefix", &self.prefix)
            .field("tombstones", &self.tombstones)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}
