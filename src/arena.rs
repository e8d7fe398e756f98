//! Slot arena with stable handles.

use std::mem;
use std::ops::{Index, IndexMut};

/// An opaque index to an object allocated in an [`Arena`].
///
/// Handles are stable: unrelated allocations and frees never move an occupied
/// slot. Freeing a slot makes every outstanding handle to it invalid, and the
/// slot may later be reused for a new object.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle(usize);

enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A growable arena that allocates objects of a single type and addresses them
/// by [`Handle`].
///
/// Freed slots are threaded into a free list and reused by later allocations,
/// so a long-lived arena does not grow past its high-water mark. Vacant slots
/// hold the next free-list link in place of an object.
///
/// # Examples
///
/// ```
/// use ordered_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena.free(x), 2);
/// ```
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    head: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Constructs a new, empty `Arena<T>` with space for `capacity` objects.
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            head: None,
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns a handle to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle(self.slots.len() - 1)
            }
            Some(handle) => {
                let vacant_slot = mem::replace(&mut self.slots[handle.0], Slot::Occupied(value));
                match vacant_slot {
                    Slot::Vacant(next_handle) => {
                        self.head = next_handle;
                        handle
                    }
                    Slot::Occupied(_) => panic!("Expected a vacant slot at the free-list head."),
                }
            }
        }
    }

    /// Frees the object behind a handle and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not refer to an occupied slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.0 >= self.slots.len() {
            panic!("Error: attempting to free an invalid slot.");
        }
        let old_slot = mem::replace(&mut self.slots[handle.0], Slot::Vacant(self.head.take()));
        match old_slot {
            Slot::Vacant(_) => panic!("Error: attempting to free a vacant slot."),
            Slot::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle);
                value
            }
        }
    }

    /// Returns an immutable reference to the object behind a handle, or `None`
    /// if the slot is vacant or the handle is invalid.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object behind a handle, or `None` if
    /// the slot is vacant or the handle is invalid.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns mutable references to the objects behind two distinct handles.
    ///
    /// # Panics
    ///
    /// Panics if the handles are equal or either slot is not occupied.
    pub fn get_pair_mut(&mut self, first: Handle, second: Handle) -> (&mut T, &mut T) {
        assert!(first != second, "Error: handles must be distinct.");
        let (low, high, flipped) = if first.0 < second.0 {
            (first.0, second.0, false)
        } else {
            (second.0, first.0, true)
        };
        let (front, back) = self.slots.split_at_mut(high);
        let low_value = match &mut front[low] {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => panic!("Error: handle refers to a vacant slot."),
        };
        let high_value = match &mut back[0] {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => panic!("Error: handle refers to a vacant slot."),
        };
        if flipped {
            (high_value, low_value)
        } else {
            (low_value, high_value)
        }
    }

    /// Returns the number of occupied slots in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object and resets the arena to its empty state.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
