//! Non-mutating range queries over an [`OrderedIndex`].
//!
//! Every query returns the matching entries as borrowed `(key, value)` pairs in
//! ascending key order. Invalid, inverted or out-of-bounds windows produce an
//! empty result rather than a panic.

use core::borrow::Borrow;
use core::ops::{Bound, RangeBounds};

use alloc::vec::Vec;

use super::OrderedIndex;
use crate::raw::in_bounds;

impl<K: Ord, V> OrderedIndex<K, V> {
    /// Returns the entries whose ranks lie in `lo..=hi`.
    ///
    /// The window must be valid and lie entirely within the index
    /// (`lo <= hi < len`); otherwise the result is empty.
    ///
    /// # Complexity
    ///
    /// O(log n + k) for k returned entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use zset_tree::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([("a", 0), ("b", 1), ("c", 2), ("d", 3)]);
    /// assert_eq!(index.range_by_rank(1, 2), [(&"b", &1), (&"c", &2)]);
    /// assert!(index.range_by_rank(2, 1).is_empty());
    /// assert!(index.range_by_rank(0, 4).is_empty());
    /// ```
    #[must_use]
    pub fn range_by_rank(&self, lo: usize, hi: usize) -> Vec<(&K, &V)> {
        let mut out = Vec::new();
        if lo <= hi && hi < self.len() {
            out.reserve(hi - lo + 1);
            self.raw.collect_by_rank(lo, hi, &mut out);
        }
        out
    }

    /// Returns the entries whose keys fall within `range`.
    ///
    /// Either end may be included, excluded or unbounded. Subtrees that lie
    /// wholly outside the range are never visited.
    ///
    /// # Complexity
    ///
    /// O(log n + k) for k returned entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::Bound;
    /// use zset_tree::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')]);
    /// assert_eq!(index.range_by_key(2..4), [(&2, &'b'), (&3, &'c')]);
    /// assert_eq!(
    ///     index.range_by_key((Bound::Excluded(1), Bound::Included(2))),
    ///     [(&2, &'b')],
    /// );
    /// ```
    pub fn range_by_key<Q, R>(&self, range: R) -> Vec<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        R: RangeBounds<Q>,
    {
        let mut out = Vec::new();
        self.raw.collect_by_key(&range, &mut out);
        out
    }

    /// Returns the entries whose values fall within `start..end`.
    ///
    /// The index is ordered by key, so this walks every entry.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::Bound;
    /// use zset_tree::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([("a", 5), ("b", 1), ("c", 3)]);
    /// let low = index.range_by_value(Bound::Unbounded, Bound::Excluded(&5));
    /// assert_eq!(low, [(&"b", &1), (&"c", &3)]);
    /// ```
    pub fn range_by_value(&self, start: Bound<&V>, end: Bound<&V>) -> Vec<(&K, &V)>
    where
        V: Ord,
    {
        self.iter().filter(|(_, value)| in_bounds(start, end, *value)).collect()
    }

    /// Returns every entry in ascending key order.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn to_vec(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}
