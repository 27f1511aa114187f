use super::OrderedIndex;
use crate::raw::RawOrderedIndex;

impl<K, V> OrderedIndex<K, V> {
    /// Creates an empty index with node storage for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use zset_tree::OrderedIndex;
    ///
    /// let index: OrderedIndex<String, i64> = OrderedIndex::with_capacity(32);
    /// assert!(index.is_empty());
    /// assert!(index.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedIndex {
            raw: RawOrderedIndex::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the index can hold without reallocating
    /// its node storage.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
