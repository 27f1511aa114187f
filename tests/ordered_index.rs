use std::collections::BTreeMap;
use std::ops::{Bound, RangeBounds};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use zset_tree::{OrderedIndex, Rank};

mod common;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Keys drawn from a range narrower than `TEST_SIZE` so that inserts collide.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    -50i64..50i64
}

fn bound_strategy() -> impl Strategy<Value = Bound<i64>> {
    prop_oneof![
        2 => key_strategy().prop_map(Bound::Included),
        2 => key_strategy().prop_map(Bound::Excluded),
        1 => Just(Bound::Unbounded),
    ]
}

fn in_range<T: Ord>(start: Bound<&T>, end: Bound<&T>, item: &T) -> bool {
    <(Bound<&T>, Bound<&T>) as RangeBounds<T>>::contains(&(start, end), item)
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum IndexOp {
    Insert(i64, i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    RankOf(i64),
    GetByRank(usize),
    FirstKeyValue,
    LastKeyValue,
}

fn index_op_strategy() -> impl Strategy<Value = IndexOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| IndexOp::Insert(k, v)),
        3 => key_strategy().prop_map(IndexOp::Remove),
        2 => key_strategy().prop_map(IndexOp::Get),
        1 => key_strategy().prop_map(IndexOp::ContainsKey),
        2 => key_strategy().prop_map(IndexOp::RankOf),
        2 => (0usize..4_500).prop_map(IndexOp::GetByRank),
        1 => Just(IndexOp::FirstKeyValue),
        1 => Just(IndexOp::LastKeyValue),
    ]
}

// ─── Core CRUD and order-statistic operations ────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both OrderedIndex and
    /// BTreeMap and asserts identical results at every step.
    #[test]
    fn index_ops_match_btreemap(ops in proptest::collection::vec(index_op_strategy(), TEST_SIZE)) {
        common::init_logs();
        let mut index: OrderedIndex<i64, i64> = OrderedIndex::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                IndexOp::Insert(k, v) => {
                    prop_assert_eq!(index.insert(*k, *v), model.insert(*k, *v), "insert({}, {})", k, v);
                }
                IndexOp::Remove(k) => {
                    prop_assert_eq!(index.remove(k), model.remove(k), "remove({})", k);
                }
                IndexOp::Get(k) => {
                    prop_assert_eq!(index.get(k), model.get(k), "get({})", k);
                }
                IndexOp::ContainsKey(k) => {
                    prop_assert_eq!(index.contains_key(k), model.contains_key(k), "contains_key({})", k);
                }
                IndexOp::RankOf(k) => {
                    let expected = model.contains_key(k).then(|| model.range(..*k).count());
                    prop_assert_eq!(index.rank_of(k), expected, "rank_of({})", k);
                }
                IndexOp::GetByRank(rank) => {
                    prop_assert_eq!(index.get_by_rank(*rank), model.iter().nth(*rank), "get_by_rank({})", rank);
                }
                IndexOp::FirstKeyValue => {
                    prop_assert_eq!(index.first_key_value(), model.first_key_value());
                }
                IndexOp::LastKeyValue => {
                    prop_assert_eq!(index.last_key_value(), model.last_key_value());
                }
            }
            prop_assert_eq!(index.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(index.is_empty(), model.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let entries: Vec<_> = index.iter().collect();
        let expected: Vec<_> = model.iter().collect();
        prop_assert_eq!(entries, expected);
    }

    /// Tests that iteration in both directions matches BTreeMap.
    #[test]
    fn iter_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let index: OrderedIndex<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.iter().copied().collect();

        let forward: Vec<_> = index.iter().collect();
        prop_assert_eq!(&forward, &model.iter().collect::<Vec<_>>(), "iter() mismatch");

        let backward: Vec<_> = index.iter().rev().collect();
        prop_assert_eq!(&backward, &model.iter().rev().collect::<Vec<_>>(), "iter().rev() mismatch");

        prop_assert_eq!(index.iter().len(), model.len());
        prop_assert_eq!(index.to_vec(), forward);
    }

    /// Tests that every rank maps back to its key.
    #[test]
    fn rank_of_get_by_rank_roundtrip(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let index: OrderedIndex<i64, i64> = entries.into_iter().collect();

        for rank in 0..index.len() {
            let (key, value) = index.get_by_rank(rank).unwrap();
            prop_assert_eq!(index.rank_of(key), Some(rank));
            prop_assert_eq!(&index[Rank(rank)], value);
        }
        prop_assert_eq!(index.get_by_rank(index.len()), None);
    }
}

// ─── Range queries ───────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Tests range_by_key against a filtered BTreeMap, including inverted bounds.
    #[test]
    fn range_by_key_matches_filter(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..1_000),
        start in bound_strategy(),
        end in bound_strategy(),
    ) {
        let index: OrderedIndex<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.into_iter().collect();

        let actual = index.range_by_key((start, end));
        let expected: Vec<_> = model
            .iter()
            .filter(|(k, _)| in_range(start.as_ref(), end.as_ref(), *k))
            .collect();
        prop_assert_eq!(actual, expected, "range_by_key({:?}, {:?})", start, end);
    }

    /// Tests range_by_rank against a slice of the sorted entries.
    #[test]
    fn range_by_rank_matches_slice(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..1_000),
        lo in 0usize..1_100,
        hi in 0usize..1_100,
    ) {
        let index: OrderedIndex<i64, i64> = entries.into_iter().collect();
        let sorted = index.to_vec();

        let actual = index.range_by_rank(lo, hi);
        if lo <= hi && hi < sorted.len() {
            prop_assert_eq!(actual, sorted[lo..=hi].to_vec());
        } else {
            prop_assert!(actual.is_empty(), "range_by_rank({}, {}) of {} entries", lo, hi, sorted.len());
        }
    }

    /// Tests range_by_value against a filtered BTreeMap.
    #[test]
    fn range_by_value_matches_filter(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..1_000),
        lo in value_strategy(),
        hi in value_strategy(),
    ) {
        let index: OrderedIndex<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.into_iter().collect();

        let bounds = [
            (Bound::Included(&lo), Bound::Included(&hi)),
            (Bound::Excluded(&lo), Bound::Excluded(&hi)),
            (Bound::Unbounded, Bound::Included(&hi)),
        ];
        for (start, end) in bounds {
            let expected: Vec<_> = model.iter().filter(|(_, v)| in_range(start, end, *v)).collect();
            prop_assert_eq!(index.range_by_value(start, end), expected);
        }
    }

    /// Tests that a clone is unaffected by later mutations of the original.
    #[test]
    fn clone_is_an_independent_snapshot(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..1_000),
        removals in proptest::collection::vec(key_strategy(), 0..500),
    ) {
        let mut index: OrderedIndex<i64, i64> = entries.into_iter().collect();
        let snapshot = index.clone();
        let before = snapshot.to_vec().into_iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>();
        prop_assert_eq!(&index, &snapshot);

        for key in &removals {
            index.remove(key);
        }
        index.insert(10_000, 0);

        let after = snapshot.to_vec().into_iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>();
        prop_assert_eq!(before, after);
        prop_assert_ne!(&index, &snapshot);
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

fn letters() -> OrderedIndex<String, i64> {
    [("a", 0), ("b", 1), ("c", 2), ("d", 3), ("e", 4), ("f", 5), ("g", 0)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn string_keys_are_queried_by_str() {
    common::init_logs();
    let index = letters();

    assert_eq!(index.len(), 7);
    assert_eq!(index.get("c"), Some(&2));
    assert_eq!(index.rank_of("g"), Some(6));
    assert_eq!(index["e"], 4);

    let window: Vec<&str> = index
        .range_by_key::<str, _>((Bound::Excluded("a"), Bound::Included("c")))
        .into_iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(window, ["b", "c"]);

    let zeros: Vec<&str> = index
        .range_by_value(Bound::Included(&0), Bound::Included(&0))
        .into_iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(zeros, ["a", "g"]);
}

#[test]
fn overwrite_replaces_value_without_moving_key() {
    let mut index = letters();
    assert_eq!(index.insert("a".to_string(), 100), Some(0));
    assert_eq!(index.len(), 7);
    assert_eq!(index.rank_of("a"), Some(0));
    assert_eq!(index.get_by_rank(0), Some((&"a".to_string(), &100)));
}

#[test]
fn removing_absent_key_is_a_no_op() {
    let mut index = letters();
    let before = index.clone();
    assert_eq!(index.remove("zzz"), None);
    assert_eq!(index, before);
}

#[test]
fn draining_every_key_leaves_an_empty_index() {
    let mut index = letters();
    for key in ["d", "a", "g", "c", "b", "f", "e"] {
        assert!(index.remove(key).is_some(), "remove({key})");
    }
    assert!(index.is_empty());
    assert_eq!(index.first_key_value(), None);
    assert!(index.range_by_rank(0, 0).is_empty());

    index.insert("z".to_string(), 1);
    assert_eq!(index.to_vec(), [(&"z".to_string(), &1)]);
}

#[test]
fn debug_lists_entries_in_key_order() {
    let index = OrderedIndex::from([(2, 'b'), (1, 'a')]);
    assert_eq!(format!("{index:?}"), "{1: 'a', 2: 'b'}");
    assert_eq!(format!("{:?}", index.iter()), "[(1, 'a'), (2, 'b')]");
}

#[test]
fn extend_and_default() {
    let mut index: OrderedIndex<i32, i32> = OrderedIndex::default();
    index.extend([(3, 30), (1, 10), (3, 31)]);
    assert_eq!(index.to_vec(), [(&1, &10), (&3, &31)]);
    assert_eq!((&index).into_iter().count(), 2);
}

#[test]
fn with_capacity_reserves_node_storage() {
    let mut index = OrderedIndex::with_capacity(64);
    let capacity = index.capacity();
    assert!(capacity >= 64);
    for i in 0..64 {
        index.insert(i, ());
    }
    assert_eq!(index.capacity(), capacity);

    index.clear();
    assert!(index.is_empty());
}

// ─── Out-of-bounds indexing panic tests ──────────────────────────────────────

#[test]
#[should_panic(expected = "rank out of bounds")]
fn index_rank_out_of_bounds_panics() {
    let index = letters();
    let _ = index[Rank(7)];
}

#[test]
#[should_panic(expected = "rank out of bounds")]
fn index_rank_empty_index_panics() {
    let index: OrderedIndex<i32, i32> = OrderedIndex::new();
    let _ = index[Rank(0)];
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_key_panics() {
    let index = letters();
    let _ = index["zzz"];
}
