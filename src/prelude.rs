use std::collections::BTreeMap;

pub use crate::{
    collections::*,
    error::*,
    prop_assert_changes, prop_assert_does_not_change, test_ordered_index_properties,
};

/// A map from unique, ordered keys to values.
///
/// Implemented by [`BPlusTree`] and by the standard library's `BTreeMap`, which
/// serves as the reference model in property tests.
pub trait OrderedIndex<K: Ord, V> {
    /// Inserts or overwrites `key`, returning the previous value if there was one.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    fn get(&self, key: &K) -> Option<&V>;

    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Ord, V> OrderedIndex<K, V> for BTreeMap<K, V> {
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}
