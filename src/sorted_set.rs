use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Bound;

use tracing::{debug, trace};

use crate::ordered_index::{self, OrderedIndex};
use crate::SortedSetError;

mod interval;

pub use interval::{parse_lex_bound, parse_score_bound};

/// The integer score attached to every member of a [`SortedSet`].
pub type Score = i64;

/// A collection of unique string members, each carrying an integer score.
///
/// Members are ordered by their own string value, not by score: ranks,
/// positional ranges and lexicographic ranges all follow member order, and
/// updating a score never moves its member. Score ranges are answered by
/// scanning the set.
///
/// Mutating operations take `&mut self` and either complete or leave the set
/// untouched. Clone the set to keep a snapshot that later changes cannot
/// affect.
///
/// Methods that report scores come in pairs: `range` returns members, while
/// `range_with_scores` returns `(score, member)` pairs, the same shape that
/// [`SortedSet::from_scored`] accepts.
///
/// # Examples
///
/// ```
/// use zset_tree::SortedSet;
///
/// let mut set = SortedSet::new();
/// set.add(3, "carol");
/// set.add(1, "alice");
/// set.add(2, "bob");
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.rank("bob"), Some(1));
/// assert_eq!(set.range_by_lex("[alice", "(carol"), ["alice", "bob"]);
/// assert_eq!(set.range_by_score("(1", "3").unwrap(), ["bob", "carol"]);
///
/// set.increment_by(5, "alice").unwrap();
/// assert_eq!(set.score("alice"), Some(6));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SortedSet {
    index: OrderedIndex<String, Score>,
    cardinality: usize,
}

/// An iterator over the members of a [`SortedSet`] and their scores, in member order.
///
/// This `struct` is created by the [`iter`](SortedSet::iter) method.
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Iter<'a> {
    inner: ordered_index::Iter<'a, String, Score>,
}

fn members<'a>(entries: Vec<(&'a String, &Score)>) -> Vec<&'a str> {
    entries.into_iter().map(|(member, _)| member.as_str()).collect()
}

fn scored<'a>(entries: Vec<(&'a String, &Score)>) -> Vec<(Score, &'a str)> {
    entries.into_iter().map(|(member, &score)| (score, member.as_str())).collect()
}

impl SortedSet {
    /// Makes a new, empty `SortedSet`.
    #[must_use]
    pub const fn new() -> Self {
        SortedSet {
            index: OrderedIndex::new(),
            cardinality: 0,
        }
    }

    /// Creates an empty set with room for at least `capacity` members.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SortedSet {
            index: OrderedIndex::with_capacity(capacity),
            cardinality: 0,
        }
    }

    /// Returns the number of members the set can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Builds a set from `(score, member)` pairs, applied in order.
    ///
    /// A member that appears more than once keeps the score of its last
    /// occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use zset_tree::SortedSet;
    ///
    /// let set = SortedSet::from_scored([(1, "a"), (2, "b"), (9, "a")]);
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.score("a"), Some(9));
    /// ```
    pub fn from_scored<M, I>(entries: I) -> Self
    where
        M: Into<String>,
        I: IntoIterator<Item = (Score, M)>,
    {
        let mut set = SortedSet::new();
        set.extend(entries);
        set
    }

    /// Returns the number of members, in O(1).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cardinality
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cardinality == 0
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.index.clear();
        self.cardinality = 0;
    }

    /// Returns `true` if `member` is in the set.
    #[must_use]
    pub fn contains(&self, member: &str) -> bool {
        self.index.contains_key(member)
    }

    /// Adds `member` with `score`, or replaces the score of an existing member.
    ///
    /// Returns the previous score, if any. Replacing a score does not change
    /// the member's rank.
    pub fn add(&mut self, score: Score, member: impl Into<String>) -> Option<Score> {
        let member = member.into();
        trace!(member = member.as_str(), score, "add");
        let previous = self.index.insert(member, score);
        self.cardinality = self.index.len();
        previous
    }

    /// Removes `member`, returning its score if it was present.
    ///
    /// Removing a member that is not in a non-empty set is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SortedSetError::NonExistentKey`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use zset_tree::{SortedSet, SortedSetError};
    ///
    /// let mut set = SortedSet::from_scored([(1, "a")]);
    /// assert_eq!(set.remove_one("zzz"), Ok(None));
    /// assert_eq!(set.remove_one("a"), Ok(Some(1)));
    /// assert_eq!(
    ///     set.remove_one("a"),
    ///     Err(SortedSetError::NonExistentKey("a".to_string())),
    /// );
    /// ```
    pub fn remove_one(&mut self, member: &str) -> Result<Option<Score>, SortedSetError> {
        if self.is_empty() {
            debug!(member, "remove from empty sorted set");
            return Err(SortedSetError::NonExistentKey(member.to_string()));
        }
        Ok(self.remove_present(member))
    }

    /// Removes each of `members` in order, returning how many were present.
    ///
    /// Emptiness is checked once, before the first removal: a batch that
    /// empties the set part-way through still completes.
    ///
    /// # Errors
    ///
    /// Returns [`SortedSetError::NonExistentKeys`] if the set is empty when the
    /// batch starts.
    pub fn remove_many<I, S>(&mut self, members: I) -> Result<usize, SortedSetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch = members.into_iter();
        if self.is_empty() {
            let keys: Vec<String> = batch.map(|m| m.as_ref().to_string()).collect();
            debug!(count = keys.len(), "batch remove from empty sorted set");
            return Err(SortedSetError::NonExistentKeys(keys));
        }
        Ok(batch.filter(|m| self.remove_present(m.as_ref()).is_some()).count())
    }

    fn remove_present(&mut self, member: &str) -> Option<Score> {
        let removed = self.index.remove(member);
        self.cardinality = self.index.len();
        trace!(member, removed = removed.is_some(), len = self.cardinality, "remove");
        removed
    }

    /// Returns the score of `member`, or `None` if it is absent.
    #[must_use]
    pub fn score(&self, member: &str) -> Option<Score> {
        self.index.get(member).copied()
    }

    /// Adds `delta` to the score of `member` and returns the new score.
    ///
    /// An absent member is treated as having score 0 and is added.
    ///
    /// # Errors
    ///
    /// Returns [`SortedSetError::ScoreOverflow`] if the new score does not fit
    /// in a [`Score`]; the set is left unchanged.
    pub fn increment_by(&mut self, delta: Score, member: impl Into<String>) -> Result<Score, SortedSetError> {
        let member = member.into();
        let score = self.score(&member).unwrap_or(0);
        let Some(updated) = score.checked_add(delta) else {
            debug!(member = member.as_str(), score, delta, "score increment overflows");
            return Err(SortedSetError::ScoreOverflow { member, score, delta });
        };
        trace!(member = member.as_str(), delta, score = updated, "increment");
        self.add(updated, member);
        Ok(updated)
    }

    /// Returns the member and score at position `index` in member order.
    ///
    /// # Errors
    ///
    /// Returns [`SortedSetError::OutOfRange`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<(&str, Score), SortedSetError> {
        self.index
            .get_by_rank(index)
            .map(|(member, &score)| (member.as_str(), score))
            .ok_or(SortedSetError::OutOfRange {
                index,
                len: self.cardinality,
            })
    }

    /// Returns the zero-based position of `member` in member order.
    #[must_use]
    pub fn rank(&self, member: &str) -> Option<usize> {
        self.index.rank_of(member)
    }

    /// Returns the members at positions `lo..=hi`.
    ///
    /// The result is empty unless `lo <= hi < len`.
    #[must_use]
    pub fn range(&self, lo: usize, hi: usize) -> Vec<&str> {
        members(self.index.range_by_rank(lo, hi))
    }

    /// Like [`range`](SortedSet::range), with each member's score.
    #[must_use]
    pub fn range_with_scores(&self, lo: usize, hi: usize) -> Vec<(Score, &str)> {
        scored(self.index.range_by_rank(lo, hi))
    }

    /// Returns the members at positions `lo..=hi` counted from the last
    /// member, in descending member order.
    ///
    /// # Examples
    ///
    /// ```
    /// use zset_tree::SortedSet;
    ///
    /// let set = SortedSet::from_scored([(0, "a"), (0, "b"), (0, "c")]);
    /// assert_eq!(set.reverse_range(0, 1), ["c", "b"]);
    /// ```
    #[must_use]
    pub fn reverse_range(&self, lo: usize, hi: usize) -> Vec<&str> {
        if lo > hi || hi >= self.cardinality {
            return Vec::new();
        }
        let last = self.cardinality - 1;
        let mut window = self.range(last - hi, last - lo);
        window.reverse();
        window
    }

    /// Returns the members whose scores lie between two interval bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SortedSetError::InvalidScoreBound`] if either bound is not an integer.
    pub fn range_by_score(&self, lo: &str, hi: &str) -> Result<Vec<&str>, SortedSetError> {
        let (lo, hi) = (parse_score_bound(lo)?, parse_score_bound(hi)?);
        Ok(members(self.index.range_by_value(lo.as_ref(), hi.as_ref())))
    }

    /// Like [`range_by_score`](SortedSet::range_by_score), with each member's score.
    ///
    /// # Errors
    ///
    /// Returns [`SortedSetError::InvalidScoreBound`] if either bound is not an integer.
    pub fn range_by_score_with_scores(&self, lo: &str, hi: &str) -> Result<Vec<(Score, &str)>, SortedSetError> {
        let (lo, hi) = (parse_score_bound(lo)?, parse_score_bound(hi)?);
        Ok(scored(self.index.range_by_value(lo.as_ref(), hi.as_ref())))
    }

    /// Counts the members whose scores lie in `lo..=hi`.
    #[must_use]
    pub fn count_by_score(&self, lo: Score, hi: Score) -> usize {
        self.index
            .range_by_value(Bound::Included(&lo), Bound::Included(&hi))
            .len()
    }

    /// Returns the members that lie between two lexicographic interval bounds.
    #[must_use]
    pub fn range_by_lex(&self, lo: &str, hi: &str) -> Vec<&str> {
        members(self.index.range_by_key::<str, _>((parse_lex_bound(lo), parse_lex_bound(hi))))
    }

    /// Like [`range_by_lex`](SortedSet::range_by_lex), with each member's score.
    #[must_use]
    pub fn range_by_lex_with_scores(&self, lo: &str, hi: &str) -> Vec<(Score, &str)> {
        scored(self.index.range_by_key::<str, _>((parse_lex_bound(lo), parse_lex_bound(hi))))
    }

    /// Returns `range_by_lex(lo, hi)` in descending order. The higher bound
    /// comes first.
    ///
    /// # Examples
    ///
    /// ```
    /// use zset_tree::SortedSet;
    ///
    /// let set = SortedSet::from_scored([(0, "a"), (0, "b"), (0, "c")]);
    /// assert_eq!(set.reverse_range_by_lex("(c", "[a"), ["b", "a"]);
    /// ```
    #[must_use]
    pub fn reverse_range_by_lex(&self, hi: &str, lo: &str) -> Vec<&str> {
        let mut window = self.range_by_lex(lo, hi);
        window.reverse();
        window
    }

    /// Counts the members in `lo..=hi`. Both bounds are raw member strings.
    #[must_use]
    pub fn count_by_lex(&self, lo: &str, hi: &str) -> usize {
        self.index
            .range_by_key::<str, _>((Bound::Included(lo), Bound::Included(hi)))
            .len()
    }

    /// Returns every member in member order.
    #[must_use]
    pub fn to_list(&self) -> Vec<&str> {
        self.iter().map(|(member, _)| member).collect()
    }

    /// Returns every `(score, member)` pair in member order.
    #[must_use]
    pub fn to_list_with_scores(&self) -> Vec<(Score, &str)> {
        self.iter().map(|(member, score)| (score, member)).collect()
    }

    /// Gets an iterator over `(member, score)` pairs in member order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.index.iter(),
        }
    }
}

impl fmt::Debug for SortedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<M: Into<String>> FromIterator<(Score, M)> for SortedSet {
    fn from_iter<T: IntoIterator<Item = (Score, M)>>(iter: T) -> Self {
        SortedSet::from_scored(iter)
    }
}

impl<M: Into<String>> Extend<(Score, M)> for SortedSet {
    fn extend<T: IntoIterator<Item = (Score, M)>>(&mut self, iter: T) {
        for (score, member) in iter {
            self.add(score, member);
        }
    }
}

impl<M: Into<String>, const N: usize> From<[(Score, M); N]> for SortedSet {
    fn from(arr: [(Score, M); N]) -> Self {
        SortedSet::from_scored(arr)
    }
}

impl<'a> IntoIterator for &'a SortedSet {
    type Item = (&'a str, Score);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Score);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(member, &score)| (member.as_str(), score))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(member, &score)| (member.as_str(), score))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
