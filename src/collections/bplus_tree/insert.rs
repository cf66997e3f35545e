use super::{BPlusTree, InnerId, InnerNode, LeafId, LeafNode, NodeRef};

/// Report of a node that split while absorbing an insertion.
///
/// Produced by the child and consumed right away by its parent, or by the tree
/// itself when the root splits.
#[derive(Debug)]
struct Split<K> {
    separator: K,
    left: NodeRef,
    right: NodeRef,
}

#[derive(Debug)]
enum Insertion<K, V> {
    /// The key was already present; holds the overwritten value.
    Replaced(V),
    Placed,
    Split(Split<K>),
}

impl<K, V> LeafNode<K, V> {
    fn place(&mut self, index: usize, key: K, value: V) {
        self.keys.insert(index, key);
        self.values.insert(index, value);
    }
}

impl<K> InnerNode<K> {
    /// Takes in a split of the child at `index`: the separator lands at `index`
    /// and the new right sibling right after the original child.
    fn absorb(&mut self, index: usize, split: Split<K>) {
        self.keys.insert(index, split.separator);
        self.children.insert(index + 1, split.right);
        self.children[index] = split.left;
    }
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Inserts `key` with `value`, overwriting and returning the previous value
    /// if the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "tracing")]
        tracing::trace!(depth = self.depth, len = self.len, "insert");

        match self.insert_into(self.root, key, value, self.depth) {
            Insertion::Replaced(previous) => Some(previous),
            Insertion::Placed => {
                self.len += 1;
                None
            }
            Insertion::Split(split) => {
                self.len += 1;
                self.grow(split);
                None
            }
        }
    }

    /// Puts a new root on top of a split of the old one.
    fn grow(&mut self, split: Split<K>) {
        let root = InnerNode::root(self.config.fanout(), split.separator, split.left, split.right);

        self.root = NodeRef::Inner(self.arena.alloc_inner(root));
        self.depth += 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(depth = self.depth, "root split, tree grew");
    }

    fn insert_into(&mut self, node: NodeRef, key: K, value: V, depth: usize) -> Insertion<K, V> {
        match node {
            NodeRef::Leaf(id) => {
                debug_assert_eq!(depth, 0, "leaf above the bottom level");
                self.leaf_insert(id, key, value)
            }
            NodeRef::Inner(id) => {
                debug_assert_ne!(depth, 0, "inner node at the bottom level");
                self.inner_insert(id, key, value, depth)
            }
        }
    }

    fn leaf_insert(&mut self, id: LeafId, key: K, value: V) -> Insertion<K, V> {
        let capacity = self.config.leaf_capacity_limit();
        let search = self.config.leaf_search();
        let leaf = self.arena.leaf_mut(id);

        let index = if leaf.is_empty() {
            0
        } else {
            search.lower_bound(&leaf.keys, &key)
        };

        if leaf.keys.get(index) == Some(&key) {
            let previous = std::mem::replace(&mut leaf.values[index], value);
            return Insertion::Replaced(previous);
        }

        if leaf.len() < capacity.get() {
            leaf.place(index, key, value);
            return Insertion::Placed;
        }

        let threshold = capacity.split_threshold();
        let mut sibling = LeafNode::with_capacity(capacity.get());
        leaf.split_off_into(threshold, &mut sibling);

        if index < threshold {
            leaf.place(index, key, value);
        } else {
            sibling.place(index - threshold, key, value);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(left = leaf.len(), right = sibling.len(), "leaf split");

        // Leaves keep all their data: the separator is a copy of the sibling's
        // smallest key.
        let separator = sibling.keys[0].clone();
        let right = self.arena.alloc_leaf(sibling);

        Insertion::Split(Split {
            separator,
            left: NodeRef::Leaf(id),
            right: NodeRef::Leaf(right),
        })
    }

    fn inner_insert(&mut self, id: InnerId, key: K, value: V, depth: usize) -> Insertion<K, V> {
        let search = self.config.inner_search();

        let (index, child) = {
            let node = self.arena.inner(id);
            let index = search.upper_bound(&node.keys, &key);
            (index, node.children[index])
        };

        let split = match self.insert_into(child, key, value, depth - 1) {
            Insertion::Split(split) => split,
            done => return done,
        };

        let capacity = self.config.fanout_capacity();
        let node = self.arena.inner_mut(id);

        if node.len() < capacity.get() {
            node.absorb(index, split);
            return Insertion::Placed;
        }

        let threshold = capacity.split_threshold();
        let mut sibling = InnerNode::with_capacity(capacity.get());

        // The boundary child travels with the tail keys, and the key just
        // before the tail is consumed as the separator for the parent.
        sibling.keys = node.keys.split_off(threshold);
        sibling.children = node.children.split_off(threshold);
        let promoted = node.keys.remove(threshold - 1);

        if split.separator < promoted {
            node.absorb(index, split);
        } else {
            debug_assert!(index >= threshold);
            sibling.absorb(index - threshold, split);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(left = node.len(), right = sibling.len(), depth, "inner split");

        let right = self.arena.alloc_inner(sibling);

        Insertion::Split(Split {
            separator: promoted,
            left: NodeRef::Inner(id),
            right: NodeRef::Inner(right),
        })
    }
}
