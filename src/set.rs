//! The contract shared by every balancing strategy.

/// An ordered set of unique keys kept in a height-balanced search tree.
///
/// Misses are ordinary outcomes: inserting a present key or deleting an
/// absent one returns `false` and leaves the set untouched.
pub trait OrderedSet<K: Ord> {
    /// Inserts a key.
    /// Returns false without mutation if the key is already present.
    fn insert(&mut self, key: K) -> bool;

    /// Removes a key.
    /// Returns false without mutation if the key is not present.
    fn delete(&mut self, key: &K) -> bool;

    /// Returns true if the set contains the key.
    fn search(&self, key: &K) -> bool;

    /// Returns the number of keys in the set.
    fn size(&self) -> usize;

    /// Returns the number of nodes on the longest root-to-leaf path.
    /// An empty set has height 0.
    fn height(&self) -> usize;
}
