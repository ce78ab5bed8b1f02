//! The phrase table seam.
//!
//! The scanner only needs "is this exact phrase present, and with what value".
//! Implementations are provided for the standard ordered collections and, with
//! the `std` feature, for the hashed ones.

extern crate alloc;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;

/// Exact-match phrase lookup.
pub trait PhraseLookup {
    type Value;

    fn lookup(&self, phrase: &str) -> Option<Self::Value>;

    /// Whether the table can match anything at all.
    fn is_empty(&self) -> bool;
}

impl<L: PhraseLookup + ?Sized> PhraseLookup for &L {
    type Value = L::Value;

    fn lookup(&self, phrase: &str) -> Option<Self::Value> {
        (**self).lookup(phrase)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

impl<V: Clone> PhraseLookup for BTreeMap<String, V> {
    type Value = V;

    fn lookup(&self, phrase: &str) -> Option<V> {
        self.get(phrase).cloned()
    }

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}

impl PhraseLookup for BTreeSet<String> {
    type Value = ();

    fn lookup(&self, phrase: &str) -> Option<()> {
        self.contains(phrase).then_some(())
    }

    fn is_empty(&self) -> bool {
        BTreeSet::is_empty(self)
    }
}

#[cfg(feature = "std")]
impl<V: Clone, S: core::hash::BuildHasher> PhraseLookup for std::collections::HashMap<String, V, S> {
    type Value = V;

    fn lookup(&self, phrase: &str) -> Option<V> {
        self.get(phrase).cloned()
    }

    fn is_empty(&self) -> bool {
        std::collections::HashMap::is_empty(self)
    }
}

#[cfg(feature = "std")]
impl<S: core::hash::BuildHasher> PhraseLookup for std::collections::HashSet<String, S> {
    type Value = ();

    fn lookup(&self, phrase: &str) -> Option<()> {
        self.contains(phrase).then_some(())
    }

    fn is_empty(&self) -> bool {
        std::collections::HashSet::is_empty(self)
    }
}
