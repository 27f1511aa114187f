/// A zero-based rank into the sorted order of an [`OrderedIndex`](crate::OrderedIndex).
///
/// # Examples
///
/// ```
/// use zset_tree::{OrderedIndex, Rank};
///
/// let mut index = OrderedIndex::new();
/// index.insert("a", 10);
/// index.insert("b", 20);
///
/// assert_eq!(index[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
