//! Interval-bound strings shared by the score and lexicographic range queries.
//!
//! A bound optionally starts with `[` (inclusive) or `(` (exclusive); without a
//! marker it is inclusive. The rest of the string is the bound itself: an
//! integer for score bounds, the raw member string for lex bounds.

use alloc::string::ToString;
use core::ops::Bound;

use tracing::debug;

use crate::{Score, SortedSetError};

/// Splits the optional inclusivity marker from the bound literal.
fn split_marker(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('(') {
        (false, rest)
    } else if let Some(rest) = text.strip_prefix('[') {
        (true, rest)
    } else {
        (true, text)
    }
}

fn to_bound<T>(inclusive: bool, value: T) -> Bound<T> {
    if inclusive {
        Bound::Included(value)
    } else {
        Bound::Excluded(value)
    }
}

/// Parses a score bound such as `"5"`, `"[5"` or `"(5"`.
///
/// # Errors
///
/// Returns [`SortedSetError::InvalidScoreBound`] if the text after the marker
/// is not an `i64`.
///
/// # Examples
///
/// ```
/// use core::ops::Bound;
/// use zset_tree::parse_score_bound;
///
/// assert_eq!(parse_score_bound("(2"), Ok(Bound::Excluded(2)));
/// assert_eq!(parse_score_bound("-3"), Ok(Bound::Included(-3)));
/// assert!(parse_score_bound("[two").is_err());
/// ```
pub fn parse_score_bound(text: &str) -> Result<Bound<Score>, SortedSetError> {
    let (inclusive, literal) = split_marker(text);
    match literal.parse::<Score>() {
        Ok(score) => Ok(to_bound(inclusive, score)),
        Err(source) => {
            debug!(bound = text, %source, "rejected score bound");
            Err(SortedSetError::InvalidScoreBound {
                input: text.to_string(),
                source,
            })
        }
    }
}

/// Parses a lexicographic bound such as `"a"`, `"[a"` or `"(a"`.
///
/// Every string is a valid lex bound, so this cannot fail.
///
/// # Examples
///
/// ```
/// use core::ops::Bound;
/// use zset_tree::parse_lex_bound;
///
/// assert_eq!(parse_lex_bound("(abc"), Bound::Excluded("abc"));
/// assert_eq!(parse_lex_bound("abc"), Bound::Included("abc"));
/// ```
#[must_use]
pub fn parse_lex_bound(text: &str) -> Bound<&str> {
    let (inclusive, literal) = split_marker(text);
    to_bound(inclusive, literal)
}
