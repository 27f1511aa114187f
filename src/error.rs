use alloc::string::String;
use alloc::vec::Vec;
use core::num::ParseIntError;

use thiserror::Error;

use crate::Score;

/// Errors returned by [`SortedSet`](crate::SortedSet) operations.
///
/// A failed operation never modifies the set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortedSetError {
    /// A single member was removed from an empty set.
    #[error("cannot remove `{0}`: the sorted set is empty")]
    NonExistentKey(String),

    /// A batch of members was removed from an empty set.
    #[error("cannot remove {0:?}: the sorted set is empty")]
    NonExistentKeys(Vec<String>),

    /// A positional lookup fell outside `0..len`.
    #[error("index {index} is out of range for a sorted set of {len} members")]
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The cardinality of the set at the time of the lookup.
        len: usize,
    },

    /// A score interval bound was not an integer.
    #[error("invalid score bound `{input}`")]
    InvalidScoreBound {
        /// The bound as supplied, including any `[` or `(` marker.
        input: String,
        /// Why the integer part failed to parse.
        #[source]
        source: ParseIntError,
    },

    /// An increment would move a score outside the `i64` range.
    #[error("incrementing `{member}` ({score}) by {delta} overflows")]
    ScoreOverflow {
        member: String,
        score: Score,
        delta: Score,
    },
}
