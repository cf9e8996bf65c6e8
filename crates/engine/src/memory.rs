//! In-memory reference engine
//!
//! A `BTreeMap` behind a `parking_lot::RwLock`, giving byte-ordered scans
//! for free. Cursors materialize their scan range at creation, so they
//! hold no lock and see a stable snapshot of the keyspace; that matches
//! the snapshot iterators the disk backends hand out.

use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use honu_core::{Error, Result};

use crate::traits::{Cursor, Engine};

/// Reference engine backed by an ordered in-memory map
#[derive(Debug, Default)]
pub struct MemoryEngine {
    map: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    read_only: bool,
}

impl MemoryEngine {
    /// Create an empty read-write engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine whose mutations fail `ReadOnlyDb`.
    pub fn read_only() -> Self {
        Self {
            map: RwLock::new(BTreeMap::new()),
            read_only: true,
        }
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// True when no keys are stored
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(Error::ReadOnlyDb);
        }
        Ok(())
    }
}

impl Engine for MemoryEngine {
    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.map.read().get(key).cloned().ok_or(Error::NotFound)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.map.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.map.write().remove(key);
        Ok(())
    }

    fn iter(&self, prefix: &[u8]) -> Result<Box<dyn Cursor + Send>> {
        let map = self.map.read();
        let entries: Vec<(Vec<u8>, Vec<u8>)> = map
            .range::<[u8], _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Box::new(MemCursor::new(entries)))
    }

    fn range(&self, start: &[u8], end: &[u8]) -> Result<Box<dyn Cursor + Send>> {
        let map = self.map.read();
        let entries: Vec<(Vec<u8>, Vec<u8>)> = map
            .range::<[u8], _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Box::new(MemCursor::new(entries)))
    }
}

/// Cursor over a materialized scan range
struct MemCursor {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    // -1 is before-first, entries.len() is after-last
    pos: isize,
    released: bool,
}

impl MemCursor {
    fn new(entries: Vec<(Vec<u8>, Vec<u8>)>) -> Self {
        Self {
            entries,
            pos: -1,
            released: false,
        }
    }

    fn valid(&self) -> bool {
        !self.released && self.pos >= 0 && (self.pos as usize) < self.entries.len()
    }

    fn entry(&self) -> Option<&(Vec<u8>, Vec<u8>)> {
        if self.valid() {
            self.entries.get(self.pos as usize)
        } else {
            None
        }
    }
}

impl Cursor for MemCursor {
    fn seek(&mut self, key: &[u8]) -> bool {
        if self.released {
            return false;
        }
        match self.entries.binary_search_by(|(k, _)| k.as_slice().cmp(key)) {
            Ok(i) | Err(i) => {
                self.pos = i as isize;
                self.valid()
            }
        }
    }

    fn next(&mut self) -> bool {
        if self.released || self.pos >= self.entries.len() as isize {
            return false;
        }
        self.pos += 1;
        self.valid()
    }

    fn prev(&mut self) -> bool {
        if self.released || self.pos < 0 {
            return false;
        }
        self.pos -= 1;
        self.valid()
    }

    fn first(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.pos = 0;
        self.valid()
    }

    fn last(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.pos = self.entries.len() as isize - 1;
        self.valid()
    }

    fn key(&self) -> Option<&[u8]> {
        self.entry().map(|(k, _)| k.as_slice())
    }

    fn value(&self) -> Option<&[u8]> {
        self.entry().map(|(_, v)| v.as_slice())
    }

    fn error(&self) -> Option<&honu_core::Error> {
        None
    }

    fn release(&mut self) {
        self.released = true;
    }
}
