//! interner.rs - Bounded string interner with memoize-once derived values.
//!
//! Interning an equal string twice yields the same [`Arc`], so callers can key
//! caches on handle identity. Each handle can compute one derived value (the
//! canonical form, in practice) at most once.
//!
//! With a capacity set, admitting a new string into a full interner first
//! evicts the oldest entry by insertion order. Eviction walks an insertion log
//! with a cursor that persists between evictions; entries that no longer match
//! the live table are skipped. Once the consumed prefix is at least as long as
//! the rest of the log, the prefix is dropped and the cursor restarts at the
//! front, so the log never holds more than twice the capacity plus one.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// An interned string and its lazily derived value.
#[derive(Debug)]
pub struct Interned {
    value: String,
    derived: OnceCell<String>,
}

impl Interned {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            derived: OnceCell::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The derived value, if it has been computed.
    pub fn derived(&self) -> Option<&str> {
        self.derived.get().map(String::as_str)
    }

    /// The derived value, computing it with `f` on first access.
    pub fn derived_or_init<F>(&self, f: F) -> &str
    where
        F: FnOnce(&str) -> String,
    {
        self.derived.get_or_init(|| f(&self.value))
    }
}

#[derive(Debug, Default)]
pub struct Interner {
    capacity: Option<NonZeroUsize>,
    entries: HashMap<String, (Arc<Interned>, u64)>,
    /// Keys in insertion order, tagged with the sequence number they were admitted under.
    log: Vec<(String, u64)>,
    cursor: usize,
    next_seq: u64,
}

impl Interner {
    /// An unbounded interner.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(value)
    }

    /// Returns the shared handle for `value`, admitting it if it is new.
    pub fn intern(&mut self, value: &str) -> Arc<Interned> {
        if let Some((handle, _)) = self.entries.get(value) {
            return Arc::clone(handle);
        }

        if let Some(capacity) = self.capacity {
            if self.entries.len() >= capacity.get() {
                self.evict_oldest();
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let handle = Arc::new(Interned::new(value));
        self.entries
            .insert(value.to_string(), (Arc::clone(&handle), seq));
        self.log.push((value.to_string(), seq));
        handle
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.log.clear();
        self.cursor = 0;
    }

    fn evict_oldest(&mut self) {
        while let Some((key, seq)) = self.log.get(self.cursor) {
            self.cursor += 1;
            let live = matches!(self.entries.get(key), Some((_, current)) if current == seq);
            if live {
                let key = key.clone();
                self.entries.remove(&key);
                debug!("Interner evicted an entry ({} live).", self.entries.len());
                break;
            }
        }
        if self.cursor >= self.log.len() - self.cursor {
            self.compact();
        }
    }

    /// Drops the consumed prefix and every log entry that no longer describes
    /// a live key, then restarts the cursor at the front.
    fn compact(&mut self) {
        self.log.drain(..self.cursor);
        let entries = &self.entries;
        self.log
            .retain(|(key, seq)| matches!(entries.get(key), Some((_, current)) if current == seq));
        self.cursor = 0;
    }
}
