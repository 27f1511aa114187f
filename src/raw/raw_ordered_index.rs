use core::borrow::Borrow;
use core::cmp::Ordering;
use core::iter::FusedIterator;
use core::mem;
use core::ops::{Bound, RangeBounds};

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::{Handle, Size};
use super::node::{Color, Node};

/// Traversal stack. A red-black tree of `n` entries is at most `2 * log2(n + 1)` deep,
/// so the inline capacity covers any tree of up to 64K entries without spilling.
type Stack = SmallVec<[Handle; 32]>;

/// Borrowed entries collected by the range queries.
pub(crate) type Entries<'a, K, V> = Vec<(&'a K, &'a V)>;

/// The left-leaning red-black tree backing `OrderedIndex`.
///
/// Every node carries the size of its subtree, so `len` is read off the root and
/// rank/select descend in O(log n).
#[derive(Clone)]
pub(crate) struct RawOrderedIndex<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// Returns true if `item` lies within `start..end`.
pub(crate) fn in_bounds<T: ?Sized + Ord>(start: Bound<&T>, end: Bound<&T>, item: &T) -> bool {
    let after_start = match start {
        Bound::Included(start) => start <= item,
        Bound::Excluded(start) => start < item,
        Bound::Unbounded => true,
    };
    let before_end = match end {
        Bound::Included(end) => item <= end,
        Bound::Excluded(end) => item < end,
        Bound::Unbounded => true,
    };
    after_start && before_end
}

impl<K, V> RawOrderedIndex<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of entries, read from the root's subtree size.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        let len = self.size_of(self.root);
        debug_assert_eq!(len, self.nodes.len(), "root size disagrees with live node count");
        len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Removes every entry, leaving the explicit empty state.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    #[inline]
    fn size_of(&self, link: Option<Handle>) -> usize {
        self.size(link).to_usize()
    }

    #[inline]
    fn size(&self, link: Option<Handle>) -> Size {
        link.map_or(Size::ZERO, |h| self.nodes[h].size)
    }

    #[inline]
    fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|h| self.nodes[h].is_red())
    }

    #[inline]
    fn left_of(&self, link: Option<Handle>) -> Option<Handle> {
        link.and_then(|h| self.nodes[h].left)
    }

    /// Recomputes the subtree size of `h` from its children.
    #[inline]
    fn resize(&mut self, h: Handle) {
        let node = &self.nodes[h];
        let size = Size::join(self.size(node.left), self.size(node.right));
        self.nodes[h].size = size;
    }

    fn rotate_left(&mut self, h: Handle) -> Handle {
        let x = self.nodes[h]
            .right
            .expect("`RawOrderedIndex::rotate_left()` - node has no right child!");
        self.nodes[h].right = self.nodes[x].left;
        self.nodes[x].left = Some(h);
        self.nodes[x].color = self.nodes[h].color;
        self.nodes[h].color = Color::Red;
        self.resize(h);
        self.resize(x);
        x
    }

    fn rotate_right(&mut self, h: Handle) -> Handle {
        let x = self.nodes[h]
            .left
            .expect("`RawOrderedIndex::rotate_right()` - node has no left child!");
        self.nodes[h].left = self.nodes[x].right;
        self.nodes[x].right = Some(h);
        self.nodes[x].color = self.nodes[h].color;
        self.nodes[h].color = Color::Red;
        self.resize(h);
        self.resize(x);
        x
    }

    fn flip_colors(&mut self, h: Handle) {
        let node = &mut self.nodes[h];
        node.color = node.color.flipped();
        let children = [node.left, node.right];
        for child in children.into_iter().flatten() {
            let child = &mut self.nodes[child];
            child.color = child.color.flipped();
        }
    }

    /// Restores the left-leaning invariants at `h` on the way back up and refreshes its size.
    fn balance(&mut self, mut h: Handle) -> Handle {
        if self.is_red(self.nodes[h].right) && !self.is_red(self.nodes[h].left) {
            h = self.rotate_left(h);
        }
        let left = self.nodes[h].left;
        if self.is_red(left) && self.is_red(self.left_of(left)) {
            h = self.rotate_right(h);
        }
        if self.is_red(self.nodes[h].left) && self.is_red(self.nodes[h].right) {
            self.flip_colors(h);
        }
        self.resize(h);
        h
    }

    /// Assuming `h` is red and both its children are black, makes `h.left` or one
    /// of its children red.
    fn move_red_left(&mut self, mut h: Handle) -> Handle {
        self.flip_colors(h);
        let right = self.nodes[h].right;
        if let Some(right) = right.filter(|&r| self.is_red(self.nodes[r].left)) {
            let right = self.rotate_right(right);
            self.nodes[h].right = Some(right);
            h = self.rotate_left(h);
            self.flip_colors(h);
        }
        h
    }

    /// Assuming `h` is red and both its children are black, makes `h.right` or one
    /// of its children red.
    fn move_red_right(&mut self, mut h: Handle) -> Handle {
        self.flip_colors(h);
        let left = self.nodes[h].left;
        if self.is_red(self.left_of(left)) {
            h = self.rotate_right(h);
            self.flip_colors(h);
        }
        h
    }

    /// Detaches the minimum entry of the subtree at `h`.
    fn remove_min_at(&mut self, mut h: Handle) -> (Option<Handle>, (K, V)) {
        let Some(left) = self.nodes[h].left else {
            let node = self.nodes.take(h);
            return (None, (node.key, node.value));
        };
        if !self.is_red(Some(left)) && !self.is_red(self.nodes[left].left) {
            h = self.move_red_left(h);
        }
        let left = self.nodes[h]
            .left
            .expect("`RawOrderedIndex::remove_min_at()` - left child vanished!");
        let (left, min) = self.remove_min_at(left);
        self.nodes[h].left = left;
        (Some(self.balance(h)), min)
    }
}

impl<K: Ord, V> RawOrderedIndex<K, V> {
    #[inline]
    fn compare<Q>(&self, key: &Q, h: Handle) -> Ordering
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        key.cmp(self.nodes[h].key.borrow())
    }

    /// Searches for a key and returns the handle of its node.
    fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(h) = current {
            match self.compare(key, h) {
                Ordering::Less => current = self.nodes[h].left,
                Ordering::Greater => current = self.nodes[h].right,
                Ordering::Equal => return Some(h),
            }
        }
        None
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = &self.nodes[self.search(key)?];
        Some((&node.key, &node.value))
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut h = self.root?;
        while let Some(left) = self.nodes[h].left {
            h = left;
        }
        let node = &self.nodes[h];
        Some((&node.key, &node.value))
    }

    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut h = self.root?;
        while let Some(right) = self.nodes[h].right {
            h = right;
        }
        let node = &self.nodes[h];
        Some((&node.key, &node.value))
    }

    /// Inserts a key-value pair into the tree.
    /// Returns the old value if the key was already present; its node stays where it is.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, previous) = self.insert_at(self.root, key, value);
        self.nodes[root].color = Color::Black;
        self.root = Some(root);
        previous
    }

    fn insert_at(&mut self, link: Option<Handle>, key: K, value: V) -> (Handle, Option<V>) {
        let Some(h) = link else {
            return (self.nodes.alloc(Node::new(key, value)), None);
        };

        match key.cmp(&self.nodes[h].key) {
            Ordering::Less => {
                let left = self.nodes[h].left;
                let (left, previous) = self.insert_at(left, key, value);
                self.nodes[h].left = Some(left);
                if previous.is_some() {
                    return (h, previous);
                }
            }
            Ordering::Greater => {
                let right = self.nodes[h].right;
                let (right, previous) = self.insert_at(right, key, value);
                self.nodes[h].right = Some(right);
                if previous.is_some() {
                    return (h, previous);
                }
            }
            // Overwrite in place: no structural change, nothing to rebalance.
            Ordering::Equal => return (h, Some(mem::replace(&mut self.nodes[h].value, value))),
        }

        (self.balance(h), None)
    }

    /// Removes a key from the tree and returns the key-value pair.
    /// An absent key leaves the tree untouched.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key)?;
        let root = self.root?;

        if !self.is_red(self.nodes[root].left) && !self.is_red(self.nodes[root].right) {
            self.nodes[root].color = Color::Red;
        }

        let mut removed = None;
        self.root = self.remove_at(root, key, &mut removed);
        match self.root {
            Some(root) => self.nodes[root].color = Color::Black,
            None => {
                debug_assert!(self.nodes.is_empty());
                // Drop the vacant slots so the free list starts over.
                self.nodes.clear();
            }
        }
        removed
    }

    /// Removes `key`, which must be present in the subtree at `h`.
    fn remove_at<Q>(&mut self, mut h: Handle, key: &Q, removed: &mut Option<(K, V)>) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.compare(key, h) == Ordering::Less {
            let left = self.nodes[h].left;
            if !self.is_red(left) && !self.is_red(self.left_of(left)) {
                h = self.move_red_left(h);
            }
            let left = self.nodes[h]
                .left
                .expect("`RawOrderedIndex::remove_at()` - key missing from left subtree!");
            self.nodes[h].left = self.remove_at(left, key, removed);
        } else {
            if self.is_red(self.nodes[h].left) {
                h = self.rotate_right(h);
            }
            if self.compare(key, h) == Ordering::Equal && self.nodes[h].right.is_none() {
                let node = self.nodes.take(h);
                *removed = Some((node.key, node.value));
                return None;
            }
            let right = self.nodes[h].right;
            if !self.is_red(right) && !self.is_red(self.left_of(right)) {
                h = self.move_red_right(h);
            }
            let right = self.nodes[h]
                .right
                .expect("`RawOrderedIndex::remove_at()` - key missing from right subtree!");
            if self.compare(key, h) == Ordering::Equal {
                // Replace this entry with its in-order successor.
                let (right, (key, value)) = self.remove_min_at(right);
                let node = &mut self.nodes[h];
                node.right = right;
                let key = mem::replace(&mut node.key, key);
                let value = mem::replace(&mut node.value, value);
                *removed = Some((key, value));
            } else {
                self.nodes[h].right = self.remove_at(right, key, removed);
            }
        }
        Some(self.balance(h))
    }

    /// Gets an entry by its rank (0-indexed position in sorted order).
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let mut current = self.root;
        let mut remaining = rank;

        while let Some(h) = current {
            let node = &self.nodes[h];
            let left_size = self.size_of(node.left);
            match remaining.cmp(&left_size) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Some((&node.key, &node.value)),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = node.right;
                }
            }
        }
        None
    }

    /// Returns the rank (0-indexed position) of a key.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut rank = 0;

        while let Some(h) = current {
            let node = &self.nodes[h];
            match self.compare(key, h) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Some(rank + self.size_of(node.left)),
                Ordering::Greater => {
                    rank += self.size_of(node.left) + 1;
                    current = node.right;
                }
            }
        }
        None
    }

    /// Collects the entries whose ranks lie in `lo..=hi`, visiting only the
    /// subtrees that overlap the window.
    pub(crate) fn collect_by_rank<'a>(&'a self, lo: usize, hi: usize, out: &mut Entries<'a, K, V>) {
        self.collect_by_rank_at(self.root, 0, lo, hi, out);
    }

    fn collect_by_rank_at<'a>(
        &'a self,
        link: Option<Handle>,
        offset: usize,
        lo: usize,
        hi: usize,
        out: &mut Entries<'a, K, V>,
    ) {
        let Some(h) = link else { return };
        let node = &self.nodes[h];
        let rank = offset + self.size_of(node.left);
        if lo < rank {
            self.collect_by_rank_at(node.left, offset, lo, hi, out);
        }
        if (lo..=hi).contains(&rank) {
            out.push((&node.key, &node.value));
        }
        if rank < hi {
            self.collect_by_rank_at(node.right, rank + 1, lo, hi, out);
        }
    }

    /// Collects the entries whose keys fall within `range`, skipping subtrees
    /// that lie wholly outside it.
    pub(crate) fn collect_by_key<'a, Q, R>(&'a self, range: &R, out: &mut Entries<'a, K, V>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        R: ?Sized + RangeBounds<Q>,
    {
        self.collect_by_key_at(self.root, range, out);
    }

    fn collect_by_key_at<'a, Q, R>(&'a self, link: Option<Handle>, range: &R, out: &mut Entries<'a, K, V>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
        R: ?Sized + RangeBounds<Q>,
    {
        let Some(h) = link else { return };
        let node = &self.nodes[h];
        let key: &Q = node.key.borrow();

        let left_may_match = match range.start_bound() {
            Bound::Included(start) | Bound::Excluded(start) => start < key,
            Bound::Unbounded => true,
        };
        let right_may_match = match range.end_bound() {
            Bound::Included(end) | Bound::Excluded(end) => key < end,
            Bound::Unbounded => true,
        };

        if left_may_match {
            self.collect_by_key_at(node.left, range, out);
        }
        if in_bounds(range.start_bound(), range.end_bound(), key) {
            out.push((&node.key, &node.value));
        }
        if right_may_match {
            self.collect_by_key_at(node.right, range, out);
        }
    }
}

/// In-order iterator over a `RawOrderedIndex`, walking explicit stacks from both ends.
pub(crate) struct Iter<'a, K, V> {
    tree: &'a RawOrderedIndex<K, V>,
    front: Stack,
    back: Stack,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a RawOrderedIndex<K, V>) -> Self {
        let mut iter = Self {
            tree,
            front: Stack::new(),
            back: Stack::new(),
            remaining: tree.len(),
        };
        iter.descend_left(tree.root);
        iter.descend_right(tree.root);
        iter
    }

    fn descend_left(&mut self, mut link: Option<Handle>) {
        while let Some(h) = link {
            self.front.push(h);
            link = self.tree.nodes[h].left;
        }
    }

    fn descend_right(&mut self, mut link: Option<Handle>) {
        while let Some(h) = link {
            self.back.push(h);
            link = self.tree.nodes[h].right;
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let node = &tree.nodes[self.front.pop()?];
        self.remaining -= 1;
        self.descend_left(node.right);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let node = &tree.nodes[self.back.pop()?];
        self.remaining -= 1;
        self.descend_right(node.left);
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
