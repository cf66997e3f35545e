use std::fmt::Debug;

use itertools::Itertools;
use proptest::{
    collection::{btree_map, btree_set},
    prelude::*,
    sample::SizeRange,
};

use crate::prelude::*;

/// Any valid tree configuration, biased towards small nodes.
pub fn configs() -> impl Strategy<Value = Config> {
    any::<Config>()
}

/// Distinct keys in ascending order.
pub fn unique_keys<K>(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<K>>
where
    K: Arbitrary + Ord + Debug + Clone,
{
    btree_set(any::<K>(), size).prop_map(|keys| keys.into_iter().collect_vec())
}

/// Key/value pairs with strictly ascending keys, as bulk construction expects.
pub fn sorted_pairs<K, V>(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<(K, V)>>
where
    K: Arbitrary + Ord + Debug + Clone,
    V: Arbitrary + Debug + Clone,
{
    btree_map(any::<K>(), any::<V>(), size).prop_map(|pairs| pairs.into_iter().collect_vec())
}

/// A random permutation of `values`.
pub fn shuffled<T: Debug + Clone>(values: Vec<T>) -> impl Strategy<Value = Vec<T>> {
    Just(values).prop_shuffle()
}

/// Keys in ascending, descending and shuffled order, the three insertion
/// patterns that exercise splits differently.
pub fn insertion_orders<K>(size: impl Into<SizeRange>) -> impl Strategy<Value = [Vec<K>; 3]>
where
    K: Arbitrary + Ord + Debug + Clone,
{
    unique_keys::<K>(size).prop_flat_map(|keys| {
        let descending = keys.iter().rev().cloned().collect_vec();
        shuffled(keys.clone()).prop_map(move |random| [keys.clone(), descending.clone(), random])
    })
}
