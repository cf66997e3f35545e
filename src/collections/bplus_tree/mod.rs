mod config;
mod insert;
mod lookup;
mod node;
mod search;
mod validate;

use std::fmt::{Debug, Formatter};

use proptest::{collection::vec, prelude::*};

use crate::prelude::*;

pub use {
    config::{Capacity, Config},
    node::{InnerId, InnerNode, LeafId, LeafNode, NodeRef},
    search::{SearchStrategy, BINARY_SEARCH_THRESHOLD},
};

use node::Arena;

/// An in-memory B+ tree mapping unique, ordered keys to values.
///
/// Inner nodes hold up to `N` separator keys and route lookups; leaves hold up
/// to `M` key/value pairs. Every leaf sits exactly `depth` levels below the
/// root, and the tree only grows in height when the root itself splits.
///
/// Nodes are owned by an arena inside the tree and addressed by handle, so no
/// node is ever shared and dropping the tree releases every node once.
///
/// The tree is single-owner: every mutation goes through `&mut self`, and
/// concurrent use from several threads needs external synchronization (a
/// `Mutex` or `RwLock` around the whole tree).
///
/// ```
/// use bplus::prelude::*;
///
/// let mut tree = BPlusTree::new(3)?;
/// for key in [0, 2, 1, 3] {
///     tree.insert(key, key * 10);
/// }
///
/// assert!(tree.contains(&1));
/// assert_eq!(tree.at(&3)?, &30);
/// assert_eq!(tree.at(&4), Err(Error::KeyNotFound));
/// assert_eq!(tree.depth(), 1);
/// # Ok::<(), bplus::prelude::Error>(())
/// ```
#[derive(Clone)]
pub struct BPlusTree<K, V> {
    arena: Arena<K, V>,
    root: NodeRef,
    depth: usize,
    len: usize,
    config: Config,
}

impl<K, V> BPlusTree<K, V> {
    /// Empty tree using `capacity` for both the inner fanout and the leaf capacity.
    pub fn new(capacity: usize) -> Result<Self> {
        Config::uniform(capacity).map(Self::with_config)
    }

    /// Empty tree with inner fanout `fanout` and leaf capacity `leaf_capacity`.
    pub fn with_capacities(fanout: usize, leaf_capacity: usize) -> Result<Self> {
        Config::new(fanout, leaf_capacity).map(Self::with_config)
    }

    pub fn with_config(config: Config) -> Self {
        let mut arena = Arena::default();
        let root = NodeRef::Leaf(arena.alloc_leaf(LeafNode::with_capacity(config.leaf_capacity())));

        Self {
            arena,
            root,
            depth: 0,
            len: 0,
            config,
        }
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Levels between the root and the leaves; 0 while the root is a leaf.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn leaf_count(&self) -> usize {
        self.arena.leaf_count()
    }

    pub fn inner_count(&self) -> usize {
        self.arena.inner_count()
    }

    pub fn root(&self) -> NodeRef {
        self.root
    }

    pub fn leaf(&self, id: LeafId) -> &LeafNode<K, V> {
        self.arena.leaf(id)
    }

    pub fn inner(&self, id: InnerId) -> &InnerNode<K> {
        self.arena.inner(id)
    }

    /// Drops every entry, keeping the configuration.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = NodeRef::Leaf(
            self.arena
                .alloc_leaf(LeafNode::with_capacity(self.config.leaf_capacity())),
        );
        self.depth = 0;
        self.len = 0;
    }

    fn fmt_node(&self, f: &mut Formatter<'_>, node: NodeRef, level: usize) -> std::fmt::Result
    where
        K: Debug,
        V: Debug,
    {
        f.write_str(&"  ".repeat(level))?;

        match node {
            NodeRef::Leaf(id) => {
                let leaf = self.arena.leaf(id);
                f.write_str("leaf ")?;
                f.debug_map()
                    .entries(leaf.keys.iter().zip(leaf.values.iter()))
                    .finish()?;
                f.write_str("\n")
            }
            NodeRef::Inner(id) => {
                let inner = self.arena.inner(id);
                writeln!(f, "inner {:?}", inner.keys)?;
                inner
                    .children
                    .iter()
                    .try_for_each(|child| self.fmt_node(f, *child, level + 1))
            }
        }
    }
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Builds a tree from pairs sorted by strictly ascending key.
    ///
    /// This is the entry point for bulk construction; input that is not
    /// strictly ascending is rejected with [`Error::UnsortedInput`] pointing at
    /// the first offending pair.
    pub fn from_sorted<I>(config: Config, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::with_config(config);
        let mut previous: Option<K> = None;

        for (position, (key, value)) in pairs.into_iter().enumerate() {
            if previous.as_ref().is_some_and(|previous| *previous >= key) {
                return Err(Error::UnsortedInput { position });
            }

            previous = Some(key.clone());
            tree.insert(key, value);
        }

        Ok(tree)
    }
}

impl<K: Debug, V: Debug> Debug for BPlusTree<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "BPlusTree {{ len: {}, depth: {}, fanout: {}, leaf_capacity: {} }}",
            self.len,
            self.depth,
            self.config.fanout(),
            self.config.leaf_capacity()
        )?;
        self.fmt_node(f, self.root, 0)
    }
}

impl<K: Ord + Clone, V> Extend<(K, V)> for BPlusTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + Clone, V> OrderedIndex<K, V> for BPlusTree<K, V> {
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BPlusTree::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        BPlusTree::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        BPlusTree::contains(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<K, V> Arbitrary for BPlusTree<K, V>
where
    K: Arbitrary + Ord + Clone + 'static,
    V: Arbitrary + 'static,
{
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<Config>(), vec(any::<(K, V)>(), 0..200))
            .prop_map(|(config, entries)| {
                let mut tree = Self::with_config(config);
                tree.extend(entries);
                tree
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use crate::{prelude::*, testing::*};

    crate::prelude::test_ordered_index_properties!(u8);
    crate::prelude::test_ordered_index_properties!(i64);
    crate::prelude::test_ordered_index_properties!(String);

    #[test]
    fn test_capacity_three_scenario() {
        let mut tree = BPlusTree::new(3).unwrap();

        for key in [0, 2, 1, 3] {
            tree.insert(key, key);
        }

        for key in 0..4 {
            assert!(tree.contains(&key));
            assert_eq!(tree.at(&key), Ok(&key));
        }

        // Four entries in leaves of three: exactly one split.
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.len(), 4);
        tree.validate().unwrap();
    }

    #[test]
    fn test_rejects_degenerate_capacities() {
        assert!(matches!(
            BPlusTree::<u8, u8>::new(1),
            Err(Error::InvalidCapacity { capacity: 1, .. })
        ));
        assert!(matches!(
            BPlusTree::<u8, u8>::with_capacities(4, 0),
            Err(Error::InvalidCapacity {
                layer: Layer::Leaf,
                capacity: 0
            })
        ));
    }

    #[test]
    fn test_empty_tree() {
        let tree: BPlusTree<u32, u32> = BPlusTree::new(4).unwrap();

        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert!(!tree.contains(&7));
        assert_eq!(tree.get(&7), None);
        assert_eq!(tree.at(&7), Err(Error::KeyNotFound));
        tree.validate().unwrap();
    }

    #[test]
    fn test_clear_resets_to_single_leaf() {
        let mut tree = BPlusTree::new(3).unwrap();
        tree.extend((0..50).map(|i| (i, i)));
        assert!(tree.depth() > 1);

        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.inner_count(), 0);
        assert!(!tree.contains(&3));

        tree.insert(3, 3);
        assert_eq!(tree.get(&3), Some(&3));
    }

    #[test]
    fn test_from_sorted_rejects_unsorted_input() {
        let config = Config::uniform(4).unwrap();

        let result = BPlusTree::from_sorted(config, [(1, 'a'), (3, 'b'), (2, 'c')]);
        assert!(matches!(result, Err(Error::UnsortedInput { position: 2 })));

        let result = BPlusTree::from_sorted(config, [(1, 'a'), (1, 'b')]);
        assert!(matches!(result, Err(Error::UnsortedInput { position: 1 })));
    }

    #[test]
    fn test_debug_lists_every_level() {
        let mut tree = BPlusTree::new(2).unwrap();
        tree.extend([(1, "a"), (2, "b"), (3, "c")]);

        let output = format!("{tree:?}");

        assert!(output.starts_with("BPlusTree { len: 3, depth: 1"));
        assert!(output.contains("inner [2]"));
        assert!(output.contains("  leaf {1: \"a\"}"));
        assert!(output.contains("  leaf {2: \"b\", 3: \"c\"}"));
    }

    #[proptest(fork = false)]
    fn test_from_sorted_matches_input(
        config: Config,
        #[strategy(sorted_pairs::<u32, u32>(0..300))] pairs: Vec<(u32, u32)>,
    ) {
        let tree = BPlusTree::from_sorted(config, pairs.clone())?;

        tree.validate()?;
        prop_assert_eq!(tree.len(), pairs.len());

        for (key, value) in pairs.iter() {
            prop_assert_eq!(tree.at(key)?, value);
        }
    }

    #[proptest(fork = false)]
    fn test_arbitrary_trees_are_valid(tree: BPlusTree<u16, u8>) {
        tree.validate()?;
    }

    #[proptest(fork = false)]
    fn test_clone_is_independent(mut tree: BPlusTree<u16, u8>, key: u16) {
        let copy = tree.clone();
        let before = copy.get(&key).copied();

        tree.insert(key, 0);
        tree.insert(key, 1);

        prop_assert_eq!(copy.get(&key).copied(), before);
        prop_assert_eq!(tree.get(&key), Some(&1));
    }
}
