use proptest::prelude::*;

/// Capacity at which binary search starts paying off over a linear scan.
pub const BINARY_SEARCH_THRESHOLD: usize = 15;

/// How a node locates a position within its sorted key sequence.
///
/// Both strategies return identical indices for identical inputs; the choice is
/// purely a performance policy. Linear scans win on small nodes, binary search
/// on large ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStrategy {
    Linear,
    Binary,
}

impl SearchStrategy {
    /// Picks the strategy for a node holding at most `capacity` keys.
    pub fn for_capacity(capacity: usize) -> Self {
        if capacity >= BINARY_SEARCH_THRESHOLD {
            Self::Binary
        } else {
            Self::Linear
        }
    }

    /// Index of the first key `>= target` (`keys.len()` if there is none).
    ///
    /// Used at leaves: when the key is present, it sits at the returned index.
    #[inline]
    pub fn lower_bound<K: Ord>(self, keys: &[K], target: &K) -> usize {
        match self {
            Self::Linear => keys
                .iter()
                .position(|k| k >= target)
                .unwrap_or(keys.len()),
            Self::Binary => keys.partition_point(|k| k < target),
        }
    }

    /// Index of the first key `> target` (`keys.len()` if there is none).
    ///
    /// Used at inner nodes: the returned index is the child to descend into, so
    /// a key equal to a separator is routed to the right of it.
    #[inline]
    pub fn upper_bound<K: Ord>(self, keys: &[K], target: &K) -> usize {
        match self {
            Self::Linear => keys
                .iter()
                .position(|k| k > target)
                .unwrap_or(keys.len()),
            Self::Binary => keys.partition_point(|k| k <= target),
        }
    }
}

impl Arbitrary for SearchStrategy {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![Just(Self::Linear), Just(Self::Binary)].boxed()
    }
}
