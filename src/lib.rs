//! Sorted-set collections for Rust, backed by an order-statistic red-black tree.
//!
//! This crate provides two layers:
//!
//! - [`OrderedIndex`] - a generic ordered map whose nodes carry subtree sizes,
//!   answering rank, select and range queries in O(log n)
//! - [`SortedSet`] - a collection of unique string members with integer
//!   scores, built on `OrderedIndex<String, Score>`
//!
//! Members of a `SortedSet` are ordered by their own string value. Positional
//! queries ([`at`](SortedSet::at), [`rank`](SortedSet::rank),
//! [`range`](SortedSet::range)) and lexicographic ranges follow member order;
//! score ranges filter by score.
//!
//! # Example
//!
//! ```
//! use zset_tree::SortedSet;
//!
//! let mut scores = SortedSet::new();
//! scores.add(100, "Alice");
//! scores.add(85, "Bob");
//! scores.add(92, "Carol");
//!
//! assert_eq!(scores.score("Bob"), Some(85));
//! assert_eq!(scores.len(), 3);
//!
//! // Positions follow member order, not score.
//! assert_eq!(scores.at(1), Ok(("Bob", 85)));
//! assert_eq!(scores.rank("Carol"), Some(2));
//!
//! // Score and lexicographic intervals use `[` and `(` markers.
//! assert_eq!(scores.range_by_score("(85", "100").unwrap(), ["Alice", "Carol"]);
//! assert_eq!(scores.range_by_lex("[B", "(C"), ["Bob"]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) rank operations** - Subtree sizes are kept on every node
//! - **Snapshots by `Clone`** - Mutations take `&mut self`; a clone is unaffected by later changes
//!
//! # Implementation
//!
//! The tree is a left-leaning red-black tree stored in a slab of nodes addressed
//! by compact handles. Each node records the size of its subtree, so the
//! cardinality is read off the root and rank-based access never walks the
//! whole tree.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod ordered_index;
pub mod sorted_set;

pub use error::SortedSetError;
pub use order_statistic::Rank;
pub use ordered_index::OrderedIndex;
pub use sorted_set::{parse_lex_bound, parse_score_bound, Score, SortedSet};
