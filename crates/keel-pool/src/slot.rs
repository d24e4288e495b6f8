//! Shared slot representation for [`FreeListPool`] and [`ObjectPool`].
//!
//! Both pools store their elements in a `Vec<Slot<T>>` where free slots
//! double as free-list nodes. The free list is kept sorted by ascending
//! index so that iteration can skip holes with a single monotonically
//! advancing cursor instead of a membership test per slot.
//!
//! [`FreeListPool`]: crate::free_list::FreeListPool
//! [`ObjectPool`]: crate::object_pool::ObjectPool

/// Free-list terminator: no further free slot.
pub(crate) const NONE: u32 = u32::MAX;

/// One slot of a pool: either a live element or a link to the next free
/// slot (in ascending index order).
#[derive(Clone, Debug)]
pub(crate) enum Slot<T> {
    /// The slot holds a live element.
    Live(T),
    /// The slot is free; `next` is the index of the next free slot, or
    /// [`NONE`] at the end of the chain.
    Free { next: u32 },
}

impl<T> Slot<T> {
    pub(crate) fn is_live(&self) -> bool {
        matches!(self, Slot::Live(_))
    }

    pub(crate) fn as_live(&self) -> Option<&T> {
        match self {
            Slot::Live(value) => Some(value),
            Slot::Free { .. } => None,
        }
    }

    pub(crate) fn as_live_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Live(value) => Some(value),
            Slot::Free { .. } => None,
        }
    }

    /// The next-free link of a free slot.
    ///
    /// Free-list walks only ever land on free slots; a live slot here
    /// means the sorted-chain invariant has been broken.
    pub(crate) fn free_next(&self) -> u32 {
        match self {
            Slot::Free { next } => *next,
            Slot::Live(_) => unreachable!("free-list link points at a live slot"),
        }
    }
}

/// Build the slots `start..end` as a free chain in ascending order, with
/// the last slot terminating the list.
pub(crate) fn free_chain<T>(start: usize, end: usize) -> impl Iterator<Item = Slot<T>> {
    (start..end).map(move |i| Slot::Free {
        next: if i + 1 < end { (i + 1) as u32 } else { NONE },
    })
}

/// Free the slot at `index`, re-linking it into the free chain at its
/// sorted position, and return the element it held.
///
/// The scan starts from the head, so cost is linear in the number of free
/// slots in front of `index`. `index` must be in bounds and live; the
/// caller has already checked both.
pub(crate) fn release_sorted<T>(slots: &mut [Slot<T>], first_free: &mut u32, index: u32) -> T {
    let (insert_after, next) = if *first_free == NONE || index < *first_free {
        (None, *first_free)
    } else {
        let mut cur = *first_free;
        loop {
            let link = slots[cur as usize].free_next();
            if link == NONE || index < link {
                break (Some(cur), link);
            }
            cur = link;
        }
    };

    let freed = std::mem::replace(&mut slots[index as usize], Slot::Free { next });
    match insert_after {
        Some(prev) => slots[prev as usize] = Slot::Free { next: index },
        None => *first_free = index,
    }

    match freed {
        Slot::Live(value) => value,
        Slot::Free { .. } => unreachable!("released slot was checked to be live"),
    }
}

/// Forward iterator over the live slots of a pool, in ascending index
/// order, yielding `(index, &T)`.
///
/// Walks every physical slot once, carrying a cursor into the sorted free
/// chain: when the walk reaches the cursor the slot is free, so it is
/// skipped and the cursor advances to the slot's own next-free link. Total
/// cost is O(capacity) regardless of how the holes are distributed.
pub(crate) struct Iter<'a, T> {
    slots: std::slice::Iter<'a, Slot<T>>,
    current: u32,
    next_free: u32,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slots: &'a [Slot<T>], first_free: u32) -> Self {
        Self {
            slots: slots.iter(),
            current: 0,
            next_free: first_free,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (u32, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            let index = self.current;
            self.current += 1;
            if index == self.next_free {
                self.next_free = slot.free_next();
                continue;
            }
            debug_assert!(slot.is_live(), "slot {index} missing from the free chain");
            if let Slot::Live(value) = slot {
                return Some((index, value));
            }
        }
        None
    }
}

/// Mutable counterpart of [`Iter`].
pub(crate) struct IterMut<'a, T> {
    slots: std::slice::IterMut<'a, Slot<T>>,
    current: u32,
    next_free: u32,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(slots: &'a mut [Slot<T>], first_free: u32) -> Self {
        Self {
            slots: slots.iter_mut(),
            current: 0,
            next_free: first_free,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = (u32, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            let index = self.current;
            self.current += 1;
            if index == self.next_free {
                self.next_free = slot.free_next();
                continue;
            }
            debug_assert!(slot.is_live(), "slot {index} missing from the free chain");
            if let Slot::Live(value) = slot {
                return Some((index, value));
            }
        }
        None
    }
}
