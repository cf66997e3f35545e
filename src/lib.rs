//! An in-memory B+ tree index.
//!
//! [`BPlusTree`](collections::BPlusTree) maps unique, ordered keys to values. Inner
//! nodes route lookups through separator keys, leaves hold the data, and every
//! leaf sits at the same depth. Node capacities are tunable per layer, and the
//! search used inside each node (linear scan or binary search) is picked from
//! those capacities when the tree is built.
//!
//! Enable the `tracing` feature to get `trace`/`debug` events for descents and
//! node splits.

mod error;

pub mod collections;
pub mod prelude;
pub mod testing;

#[doc(hidden)]
/// This is a hidden module to make the macros defined on this crate available for the users.
pub mod __dependencies {
    pub use itertools;
    pub use paste;
    pub use proptest;
    pub use test_strategy;
    pub use thiserror::Error;
}

/// Generates a property-test module checking an [`OrderedIndex`] keyed by
/// `$key` against `BTreeMap`.
///
/// [`OrderedIndex`]: crate::prelude::OrderedIndex
#[macro_export]
macro_rules! test_ordered_index_properties {
    ($key:ty) => {
        $crate::__dependencies::paste::paste! {
            mod [<test_ordered_index_$key:snake>] {
                use std::collections::BTreeMap;

                use $crate::__dependencies::{
                    proptest::{collection::vec, prelude::*},
                    test_strategy,
                };
                use $crate::{prelude::*, testing::*};

                type Tree = BPlusTree<$key, u64>;

                #[cfg_attr(coverage_nightly, coverage(off))]
                fn build<I: OrderedIndex<$key, u64>>(mut index: I, entries: &[($key, u64)]) -> I {
                    for (key, value) in entries.iter().cloned() {
                        index.insert(key, value);
                    }
                    index
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_crosscheck_with_btree_map(
                    #[strategy(configs())] config: Config,
                    #[strategy(vec(any::<($key, u64)>(), 0..300))] entries: Vec<($key, u64)>,
                    queries: Vec<$key>,
                ) {
                    let tree = build(Tree::with_config(config), &entries);
                    let model = build(BTreeMap::new(), &entries);

                    tree.validate()?;
                    prop_assert_eq!(tree.len(), model.len());

                    for key in entries.iter().map(|(key, _)| key).chain(queries.iter()) {
                        prop_assert_eq!(tree.get(key), model.get(key));
                        prop_assert_eq!(tree.contains(key), model.contains_key(key));
                    }
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_upsert_keeps_last_value(
                    #[strategy(configs())] config: Config,
                    key: $key,
                    #[strategy(vec(any::<u64>(), 1..20))] values: Vec<u64>,
                ) {
                    let mut tree = Tree::with_config(config);

                    for value in values.iter() {
                        tree.insert(key.clone(), *value);
                    }

                    prop_assert_eq!(tree.len(), 1);
                    prop_assert_eq!(tree.at(&key)?, values.last().unwrap());
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_every_insertion_order_round_trips(
                    #[strategy(configs())] config: Config,
                    #[strategy(insertion_orders::<$key>(0..300))] orders: [Vec<$key>; 3],
                ) {
                    let model: BTreeMap<$key, u64> = orders[0].iter().cloned().zip(0..).collect();

                    for order in orders.iter() {
                        let mut tree = Tree::with_config(config);
                        for key in order.iter() {
                            tree.insert(key.clone(), model[key]);
                        }

                        tree.validate()?;
                        prop_assert_eq!(tree.len(), model.len());

                        for (key, value) in model.iter() {
                            prop_assert!(tree.contains(key));
                            prop_assert_eq!(tree.at(key)?, value);
                        }
                    }
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_linear_and_binary_search_build_the_same_tree(
                    #[strategy(configs())] config: Config,
                    #[strategy(vec(any::<($key, u64)>(), 0..300))] entries: Vec<($key, u64)>,
                ) {
                    let linear = config
                        .with_inner_search(SearchStrategy::Linear)
                        .with_leaf_search(SearchStrategy::Linear);
                    let binary = config
                        .with_inner_search(SearchStrategy::Binary)
                        .with_leaf_search(SearchStrategy::Binary);

                    let a = build(Tree::with_config(linear), &entries);
                    let b = build(Tree::with_config(binary), &entries);

                    prop_assert_eq!(a.depth(), b.depth());
                    prop_assert_eq!(a.leaf_count(), b.leaf_count());
                    prop_assert_eq!(a.inner_count(), b.inner_count());

                    for (key, _) in entries.iter() {
                        prop_assert_eq!(a.get(key), b.get(key));
                    }
                }
            }
        }
    };
}

#[macro_export]
macro_rules! prop_assert_changes {
    ($action: expr, $value: expr) => {
        let old_value = $value.clone();

        prop_assert_eq!($value, old_value);

        $action;

        prop_assert_ne!($value, old_value);
    };
}

#[macro_export]
macro_rules! prop_assert_does_not_change {
    ($action: expr, $value: expr) => {
        let old_value = $value.clone();

        $action;

        prop_assert_eq!($value, old_value);
    };
}
