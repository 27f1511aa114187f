mod arena;
mod handle;
mod node;
mod raw_ordered_index;

pub(crate) use raw_ordered_index::{in_bounds, Iter, RawOrderedIndex};
