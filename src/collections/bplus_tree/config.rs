use proptest::prelude::*;

use super::SearchStrategy;
use crate::prelude::*;

/// Maximum number of keys a node may hold.
///
/// Splitting arithmetic degenerates below two keys, so smaller values are
/// rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(usize);

impl Capacity {
    pub const MIN: usize = 2;

    pub fn new(layer: Layer, capacity: usize) -> Result<Self> {
        if capacity < Self::MIN {
            return Err(Error::InvalidCapacity { layer, capacity });
        }

        Ok(Self(capacity))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Number of entries that stay in the original node when it splits.
    pub(crate) fn split_threshold(self) -> usize {
        (self.0 + 1) / 2
    }
}

/// Shape of a [`BPlusTree`], fixed for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    fanout: Capacity,
    leaf_capacity: Capacity,
    inner_search: SearchStrategy,
    leaf_search: SearchStrategy,
}

impl Config {
    /// Inner fanout `n` and leaf capacity `m`, with search strategies chosen
    /// from the capacities.
    pub fn new(fanout: usize, leaf_capacity: usize) -> Result<Self> {
        let fanout = Capacity::new(Layer::Inner, fanout)?;
        let leaf_capacity = Capacity::new(Layer::Leaf, leaf_capacity)?;

        Ok(Self {
            fanout,
            leaf_capacity,
            inner_search: SearchStrategy::for_capacity(fanout.get()),
            leaf_search: SearchStrategy::for_capacity(leaf_capacity.get()),
        })
    }

    /// Same capacity for both layers.
    pub fn uniform(capacity: usize) -> Result<Self> {
        Self::new(capacity, capacity)
    }

    pub fn with_inner_search(mut self, strategy: SearchStrategy) -> Self {
        self.inner_search = strategy;
        self
    }

    pub fn with_leaf_search(mut self, strategy: SearchStrategy) -> Self {
        self.leaf_search = strategy;
        self
    }

    pub fn fanout(&self) -> usize {
        self.fanout.get()
    }

    pub fn leaf_capacity(&self) -> usize {
        self.leaf_capacity.get()
    }

    pub fn inner_search(&self) -> SearchStrategy {
        self.inner_search
    }

    pub fn leaf_search(&self) -> SearchStrategy {
        self.leaf_search
    }

    pub(crate) fn fanout_capacity(&self) -> Capacity {
        self.fanout
    }

    pub(crate) fn leaf_capacity_limit(&self) -> Capacity {
        self.leaf_capacity
    }
}

impl Default for Config {
    fn default() -> Self {
        let capacity = Capacity(16);

        Self {
            fanout: capacity,
            leaf_capacity: capacity,
            inner_search: SearchStrategy::for_capacity(capacity.get()),
            leaf_search: SearchStrategy::for_capacity(capacity.get()),
        }
    }
}

impl Arbitrary for Config {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    /// Mostly small capacities, so that generated trees actually grow.
    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            2..24usize,
            2..24usize,
            any::<SearchStrategy>(),
            any::<SearchStrategy>(),
        )
            .prop_map(|(n, m, inner, leaf)| Self {
                fanout: Capacity(n),
                leaf_capacity: Capacity(m),
                inner_search: inner,
                leaf_search: leaf,
            })
            .boxed()
    }
}
