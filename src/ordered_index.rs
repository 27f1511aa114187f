use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::raw::{self, RawOrderedIndex};

mod capacity;
mod order_statistic;
mod range;

pub use crate::Rank;

/// An ordered map backed by a left-leaning red-black tree whose nodes carry
/// subtree sizes.
///
/// Entries are kept in key order, so besides the usual `BTreeMap`-style
/// operations the map answers positional queries: [`get_by_rank`] selects the
/// entry at a sorted position and [`rank_of`] finds the position of a key, both
/// in O(log n). Range queries by rank, by key bounds and by value bounds return
/// the matching entries in ascending key order.
///
/// Overwriting an existing key replaces its value in place: the key's position
/// never depends on its value.
///
/// # Examples
///
/// ```
/// use zset_tree::OrderedIndex;
///
/// let mut index = OrderedIndex::new();
/// index.insert("c", 2);
/// index.insert("a", 0);
/// index.insert("b", 1);
///
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.get_by_rank(1), Some((&"b", &1)));
/// assert_eq!(index.rank_of("c"), Some(2));
///
/// // Overwrites keep the entry's position.
/// assert_eq!(index.insert("a", 10), Some(0));
/// assert_eq!(index.rank_of("a"), Some(0));
/// ```
///
/// [`get_by_rank`]: OrderedIndex::get_by_rank
/// [`rank_of`]: OrderedIndex::rank_of
pub struct OrderedIndex<K, V> {
    raw: RawOrderedIndex<K, V>,
}

/// An iterator over the entries of an `OrderedIndex`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`OrderedIndex`].
///
/// # Examples
///
/// ```
/// use zset_tree::OrderedIndex;
///
/// let index = OrderedIndex::from([(1, "a"), (2, "b")]);
/// let mut iter = index.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: OrderedIndex::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: raw::Iter<'a, K, V>,
}

impl<K, V> OrderedIndex<K, V> {
    /// Makes a new, empty `OrderedIndex`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> OrderedIndex<K, V> {
        OrderedIndex {
            raw: RawOrderedIndex::new(),
        }
    }

    /// Clears the index, removing all entries.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of entries in the index.
    ///
    /// The count is kept on the root node, so this never walks the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use zset_tree::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// assert_eq!(index.len(), 0);
    /// index.insert(1, "a");
    /// index.insert(1, "b");
    /// assert_eq!(index.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the index contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Gets an iterator over the entries of the index, sorted by key.
    ///
    /// # Complexity
    ///
    /// O(1) to create, O(n) to exhaust.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.raw.iter(),
        }
    }
}

impl<K: Ord, V> OrderedIndex<K, V> {
    /// Returns a reference to the value corresponding to the key.
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
    /// index.insert(String::from("a"), 1);
    /// assert_eq!(index.get("a"), Some(&1));
    /// assert_eq!(index.get("b"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns `true` if the index contains an entry for the key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Returns the entry with the largest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Inserts a key-value pair into the index.
    ///
    /// If the key was absent, a new entry is added, the tree is rebalanced and
    /// `None` is returned. If the key was present, its value is replaced in
    /// place and the old value is returned; the key itself is not updated and
    /// its rank is unchanged.
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
    /// assert_eq!(index.insert(37, "a"), None);
    /// assert_eq!(index.insert(37, "b"), Some("a"));
    /// assert_eq!(index[&37], "b");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Removes a key from the index, returning its value if it was present.
    ///
    /// Removing an absent key is not an error and leaves the index unchanged.
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
    /// index.insert(1, "a");
    /// assert_eq!(index.remove(&1), Some("a"));
    /// assert_eq!(index.remove(&1), None);
    /// assert!(index.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the index, returning the stored key and value if the
    /// key was present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }
}

impl<K: Clone, V: Clone> Clone for OrderedIndex<K, V> {
    fn clone(&self) -> Self {
        OrderedIndex { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedIndex<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for OrderedIndex<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedIndex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for OrderedIndex<K, V> {
    fn default() -> Self {
        OrderedIndex::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedIndex<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut index = OrderedIndex::new();
        index.extend(iter);
        index
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedIndex<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OrderedIndex<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedIndex<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, Q, V> Index<&Q> for OrderedIndex<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the index.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
