use super::{BPlusTree, NodeRef};
use crate::prelude::*;

fn violation(message: impl Into<String>) -> Error {
    Error::InvariantViolation(message.into())
}

fn strictly_ascending<K: Ord>(keys: &[K]) -> bool {
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

/// `lower <= key < upper`, either bound being optional.
fn within<K: Ord>(key: &K, lower: Option<&K>, upper: Option<&K>) -> bool {
    lower.map_or(true, |lower| lower <= key) && upper.map_or(true, |upper| key < upper)
}

impl<K: Ord, V> BPlusTree<K, V> {
    /// Checks every structural invariant of the tree.
    ///
    /// Keys are strictly ascending in every node, each inner node has one more
    /// child than it has keys, every key lies inside the range its parent
    /// routes to it, no node exceeds its capacity, every leaf sits exactly
    /// `depth` levels down, and the number of stored entries matches `len`.
    pub fn validate(&self) -> Result<()> {
        let entries = self.validate_node(self.root, self.depth, None, None)?;

        if entries != self.len {
            return Err(violation(format!(
                "tree reports {} entries but leaves hold {}",
                self.len, entries
            )));
        }

        Ok(())
    }

    fn validate_node(
        &self,
        node: NodeRef,
        remaining: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<usize> {
        match node {
            NodeRef::Leaf(id) => {
                let leaf = self.arena.leaf(id);

                if remaining != 0 {
                    return Err(violation(format!("{id:?} found {remaining} levels above the bottom")));
                }
                if leaf.keys.len() != leaf.values.len() {
                    return Err(violation(format!("{id:?} has mismatched keys and values")));
                }
                if leaf.len() > self.config.leaf_capacity() {
                    return Err(violation(format!("{id:?} exceeds leaf capacity")));
                }
                if leaf.is_empty() && node != self.root {
                    return Err(violation(format!("{id:?} is an empty non-root leaf")));
                }
                if !strictly_ascending(&leaf.keys) {
                    return Err(violation(format!("{id:?} keys are not strictly ascending")));
                }
                if !leaf.keys.iter().all(|key| within(key, lower, upper)) {
                    return Err(violation(format!("{id:?} holds keys outside its range")));
                }

                Ok(leaf.len())
            }
            NodeRef::Inner(id) => {
                let inner = self.arena.inner(id);

                if remaining == 0 {
                    return Err(violation(format!("{id:?} found at the leaf level")));
                }
                if inner.children.len() != inner.keys.len() + 1 {
                    return Err(violation(format!(
                        "{id:?} has {} keys but {} children",
                        inner.keys.len(),
                        inner.children.len()
                    )));
                }
                if inner.len() > self.config.fanout() {
                    return Err(violation(format!("{id:?} exceeds fanout")));
                }
                if inner.is_empty() && node == self.root {
                    return Err(violation("inner root has no separators"));
                }
                if !strictly_ascending(&inner.keys) {
                    return Err(violation(format!("{id:?} keys are not strictly ascending")));
                }
                if !inner.keys.iter().all(|key| within(key, lower, upper)) {
                    return Err(violation(format!("{id:?} holds separators outside its range")));
                }

                inner
                    .children
                    .iter()
                    .enumerate()
                    .try_fold(0, |entries, (i, child)| -> Result<usize> {
                        let lower = if i == 0 { lower } else { inner.keys.get(i - 1) };
                        let upper = inner.keys.get(i).or(upper);

                        Ok(entries + self.validate_node(*child, remaining - 1, lower, upper)?)
                    })
            }
        }
    }
}
