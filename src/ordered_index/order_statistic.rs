use core::borrow::Borrow;
use core::ops::Index;

use super::OrderedIndex;
use crate::Rank;

impl<K: Ord, V> OrderedIndex<K, V> {
    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n): the descent compares `rank` with the size of each left
    /// subtree instead of walking entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use zset_tree::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// index.insert("a", 10);
    /// index.insert("c", 30);
    /// index.insert("b", 20);
    ///
    /// assert_eq!(index.get_by_rank(1), Some((&"b", &20)));
    /// assert!(index.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use zset_tree::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// index.insert(10, "a");
    /// index.insert(20, "b");
    ///
    /// assert_eq!(index.rank_of(&10), Some(0));
    /// assert_eq!(index.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }
}

/// Indexes into the index by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use zset_tree::{OrderedIndex, Rank};
///
/// let index = OrderedIndex::from([("b", 2), ("a", 1)]);
/// assert_eq!(index[Rank(0)], 1);
/// ```
impl<K: Ord, V> Index<Rank> for OrderedIndex<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}
