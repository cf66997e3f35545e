/// Handle to a leaf in the tree's leaf arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeafId(usize);

/// Handle to an inner node in the tree's inner arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InnerId(usize);

/// A child reference, tagged with the kind of node it points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Leaf(LeafId),
    Inner(InnerId),
}

/// Data node: `keys[i]` maps to `values[i]`, keys strictly ascending.
#[derive(Debug, Clone)]
pub struct LeafNode<K, V> {
    pub(super) keys: Vec<K>,
    pub(super) values: Vec<V>,
}

impl<K, V> LeafNode<K, V> {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Moves every entry from `at` onwards into `sibling`, preserving order.
    pub(super) fn split_off_into(&mut self, at: usize, sibling: &mut Self) {
        sibling.keys.extend(self.keys.drain(at..));
        sibling.values.extend(self.values.drain(at..));
    }
}

/// Routing node: `children.len() == keys.len() + 1`.
///
/// Child `i` holds every key `k` with `keys[i - 1] <= k < keys[i]`, open at
/// both ends.
#[derive(Debug, Clone)]
pub struct InnerNode<K> {
    pub(super) keys: Vec<K>,
    pub(super) children: Vec<NodeRef>,
}

impl<K> InnerNode<K> {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            children: Vec::with_capacity(capacity + 1),
        }
    }

    /// A fresh root sitting on top of a split.
    pub(super) fn root(capacity: usize, separator: K, left: NodeRef, right: NodeRef) -> Self {
        let mut node = Self::with_capacity(capacity);
        node.keys.push(separator);
        node.children.push(left);
        node.children.push(right);
        node
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Owner of every node in a tree.
///
/// Nodes are only ever appended, and are released together when the arena is
/// dropped, so teardown visits each node exactly once and never recurses.
#[derive(Debug, Clone)]
pub struct Arena<K, V> {
    leaves: Vec<LeafNode<K, V>>,
    inners: Vec<InnerNode<K>>,
}

impl<K, V> Default for Arena<K, V> {
    fn default() -> Self {
        Self {
            leaves: Vec::new(),
            inners: Vec::new(),
        }
    }
}

impl<K, V> Arena<K, V> {
    pub fn alloc_leaf(&mut self, leaf: LeafNode<K, V>) -> LeafId {
        let id = LeafId(self.leaves.len());
        self.leaves.push(leaf);
        id
    }

    pub fn alloc_inner(&mut self, inner: InnerNode<K>) -> InnerId {
        let id = InnerId(self.inners.len());
        self.inners.push(inner);
        id
    }

    pub fn leaf(&self, id: LeafId) -> &LeafNode<K, V> {
        &self.leaves[id.0]
    }

    pub fn leaf_mut(&mut self, id: LeafId) -> &mut LeafNode<K, V> {
        &mut self.leaves[id.0]
    }

    pub fn inner(&self, id: InnerId) -> &InnerNode<K> {
        &self.inners[id.0]
    }

    pub fn inner_mut(&mut self, id: InnerId) -> &mut InnerNode<K> {
        &mut self.inners[id.0]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn inner_count(&self) -> usize {
        self.inners.len()
    }

    pub fn clear(&mut self) {
        self.leaves.clear();
        self.inners.clear();
    }
}
