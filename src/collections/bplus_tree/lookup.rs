use super::{BPlusTree, LeafId, NodeRef};
use crate::prelude::*;

impl<K: Ord, V> BPlusTree<K, V> {
    pub fn contains(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.locate(key)
            .map(|(leaf, index)| &self.arena.leaf(leaf).values[index])
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.locate(key)
            .map(|(leaf, index)| &mut self.arena.leaf_mut(leaf).values[index])
    }

    /// Value stored under `key`, or [`Error::KeyNotFound`].
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Leaf and slot holding `key`, if present.
    fn locate(&self, key: &K) -> Option<(LeafId, usize)> {
        let id = self.descend(key)?;
        let leaf = self.arena.leaf(id);

        if leaf.is_empty() {
            return None;
        }

        let index = self.config.leaf_search().lower_bound(&leaf.keys, key);

        (leaf.keys.get(index) == Some(key)).then_some((id, index))
    }

    /// Walks exactly `depth` inner levels down to the only leaf that may hold
    /// `key`. A walk that does not land on a leaf at that depth finds nothing.
    fn descend(&self, key: &K) -> Option<LeafId> {
        #[cfg(feature = "tracing")]
        tracing::trace!(depth = self.depth, "lookup");

        let search = self.config.inner_search();
        let mut node = self.root;

        for _ in 0..self.depth {
            let NodeRef::Inner(id) = node else {
                return None;
            };
            let inner = self.arena.inner(id);
            node = inner.children[search.upper_bound(&inner.keys, key)];
        }

        match node {
            NodeRef::Leaf(id) => Some(id),
            NodeRef::Inner(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::{collection::btree_set, prelude::*};
    use test_strategy::proptest;

    use crate::{prelude::*, testing::*};

    #[test]
    fn test_missing_keys_are_reported() {
        let mut tree = BPlusTree::new(3).unwrap();
        tree.extend((0..20).map(|i| (i * 2, i)));

        for missing in [-1, 1, 7, 39, 40, 100] {
            assert!(!tree.contains(&missing));
            assert_eq!(tree.get(&missing), None);
            assert_eq!(tree.at(&missing), Err(Error::KeyNotFound));
            assert_eq!(tree.at_mut(&missing), Err(Error::KeyNotFound));
        }
    }

    #[test]
    fn test_separator_keys_are_found() {
        let mut tree = BPlusTree::new(2).unwrap();
        tree.extend((0..32).map(|i| (i, i)));

        let NodeRef::Inner(root) = tree.root() else {
            panic!("root should have split");
        };

        for separator in tree.inner(root).keys().to_vec() {
            assert_eq!(tree.at(&separator), Ok(&separator));
        }
    }

    #[test]
    fn test_lookup_stops_at_tracked_depth() {
        let mut tree = BPlusTree::new(2).unwrap();
        tree.extend((0..16).map(|i| (i, i)));
        let depth = tree.depth;

        tree.depth = depth + 1;
        assert!(!tree.contains(&3));
        assert_eq!(tree.at(&3), Err(Error::KeyNotFound));

        tree.depth = depth - 1;
        assert_eq!(tree.get(&3), None);

        tree.depth = depth;
        assert_eq!(tree.get(&3), Some(&3));
    }

    #[test]
    fn test_at_mut_updates_in_place() {
        let mut tree = BPlusTree::new(4).unwrap();
        tree.extend((0..10).map(|i| (i, i)));

        *tree.at_mut(&7).unwrap() += 100;
        if let Some(value) = tree.get_mut(&3) {
            *value = 0;
        }

        assert_eq!(tree.at(&7), Ok(&107));
        assert_eq!(tree.at(&3), Ok(&0));
        assert_eq!(tree.len(), 10);
    }

    #[proptest(fork = false)]
    fn test_contains_only_inserted_keys(
        config: Config,
        #[strategy(btree_set(any::<u16>(), 0..300))] keys: BTreeSet<u16>,
        queries: Vec<u16>,
    ) {
        let mut tree = BPlusTree::with_config(config);
        tree.extend(keys.iter().map(|key| (*key, ())));

        for query in queries.iter().chain(keys.iter()) {
            prop_assert_eq!(tree.contains(query), keys.contains(query));
            prop_assert_eq!(tree.at(query).is_ok(), keys.contains(query));
        }
    }

    #[proptest(fork = false)]
    fn test_search_strategies_give_the_same_answers(
        #[strategy(2..32usize)] fanout: usize,
        #[strategy(2..32usize)] leaf_capacity: usize,
        #[strategy(unique_keys::<i32>(0..300))] keys: Vec<i32>,
        queries: Vec<i32>,
    ) {
        let base = Config::new(fanout, leaf_capacity)?;
        let linear = base
            .with_inner_search(SearchStrategy::Linear)
            .with_leaf_search(SearchStrategy::Linear);
        let binary = base
            .with_inner_search(SearchStrategy::Binary)
            .with_leaf_search(SearchStrategy::Binary);

        let mut a = BPlusTree::with_config(linear);
        let mut b = BPlusTree::with_config(binary);
        a.extend(keys.iter().map(|key| (*key, *key)));
        b.extend(keys.iter().map(|key| (*key, *key)));

        prop_assert_eq!(a.depth(), b.depth());
        prop_assert_eq!(a.leaf_count(), b.leaf_count());

        for query in queries.iter().chain(keys.iter()) {
            prop_assert_eq!(a.get(query), b.get(query));
        }
    }
}
