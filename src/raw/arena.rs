use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use super::handle::Handle;

/// A slot in the arena: either a live element or a link in the free list.
#[derive(Clone)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<Handle> },
}

/// Handle-addressed storage for tree nodes.
///
/// Rotations only rewrite handles, so nodes never move once allocated. Freed
/// slots are threaded into an intrusive free list and reused before the
/// backing vector grows.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of live elements.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `element` and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `Handle::MAX` slots and none is free.
    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        self.len += 1;
        if let Some(handle) = self.free_head {
            let slot = &mut self.slots[handle.to_index()];
            let Slot::Vacant { next_free } = *slot else {
                panic!("`Arena::alloc()` - free list points at an occupied slot!");
            };
            self.free_head = next_free;
            *slot = Slot::Occupied(element);
            return handle;
        }

        // At most `Size::MAX` live nodes, so every subtree count fits in a `Size`.
        assert!(
            self.slots.len() < Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        let handle = Handle::from_index(self.slots.len());
        self.slots.push(Slot::Occupied(element));
        handle
    }

    /// Removes the element at `handle`, returning it and freeing its slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = core::mem::replace(
            &mut self.slots[handle.to_index()],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        match slot {
            Slot::Occupied(element) => {
                self.free_head = Some(handle);
                self.len -= 1;
                element
            }
            Slot::Vacant { .. } => panic!("`Arena::take()` - `handle` is invalid!"),
        }
    }

    /// Drops every element. Capacity is retained.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, handle: Handle) -> &T {
        match &self.slots[handle.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::index()` - `handle` is invalid!"),
        }
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::index_mut()` - `handle` is invalid!"),
        }
    }
}
