use std::ops::{Index, IndexMut};

/// Slot index handed out by a `Fastbin`. Stays valid until the slot is freed.
pub type SlotIdx = usize;

enum Slot<T> {
    Used(T),
    /// Free slots form an intrusive singly linked list.
    Free(Option<SlotIdx>),
}

/// Object pool with an intrusive free list.
///
/// Freed slots are recycled before the backing vector grows, so indices stay
/// dense and an index can serve as the identity of the object stored in it.
pub struct Fastbin<T> {
    slots: Vec<Slot<T>>,
    next: Option<SlotIdx>,
    len: usize,
}

impl<T> Default for Fastbin<T> {
    fn default() -> Self {
        Fastbin {
            slots: Vec::new(),
            next: None,
            len: 0,
        }
    }
}

impl<T> Fastbin<T> {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Stores `obj`, reusing the most recently freed slot when there is one.
    #[inline]
    pub fn alloc(&mut self, obj: T) -> SlotIdx {
        self.len += 1;
        match self.next {
            Some(idx) => {
                let slot = &mut self.slots[idx];
                self.next = match *slot {
                    Slot::Free(next) => next,
                    Slot::Used(_) => unreachable!("fastbin free list points at a used slot"),
                };
                *slot = Slot::Used(obj);
                idx
            }
            None => {
                self.slots.push(Slot::Used(obj));
                self.slots.len() - 1
            }
        }
    }

    /// Releases slot `idx` and returns what it held.
    ///
    /// # Panics
    ///
    /// Panics if the slot is not in use.
    #[inline]
    pub fn del(&mut self, idx: SlotIdx) -> T {
        let slot = std::mem::replace(&mut self.slots[idx], Slot::Free(self.next));
        match slot {
            Slot::Used(obj) => {
                self.next = Some(idx);
                self.len -= 1;
                obj
            }
            Slot::Free(next) => {
                self.slots[idx] = Slot::Free(next);
                panic!("fastbin slot {} freed twice", idx);
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, idx: SlotIdx) -> Option<&T> {
        match self.slots.get(idx) {
            Some(Slot::Used(obj)) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object and forgets all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.next = None;
        self.len = 0;
    }

    /// Drops the backing storage down to the highest used slot.
    pub fn shrink_to_fit(&mut self) {
        while let Some(Slot::Free(_)) = self.slots.last() {
            self.slots.pop();
        }
        // rebuild the free list, the popped slots may have been linked in it
        self.next = None;
        for idx in (0..self.slots.len()).rev() {
            if let Slot::Free(ref mut next) = self.slots[idx] {
                *next = self.next;
                self.next = Some(idx);
            }
        }
        self.slots.shrink_to_fit();
    }

    /// One entry per slot, `None` for free ones; `result[i]` borrows slot `i`.
    pub fn slots_mut(&mut self) -> Vec<Option<&mut T>> {
        self.slots
            .iter_mut()
            .map(|slot| match slot {
                Slot::Used(obj) => Some(obj),
                Slot::Free(_) => None,
            })
            .collect()
    }
}

impl<T> Index<SlotIdx> for Fastbin<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: SlotIdx) -> &T {
        match self.slots[idx] {
            Slot::Used(ref obj) => obj,
            Slot::Free(_) => panic!("fastbin slot {} is free", idx),
        }
    }
}

impl<T> IndexMut<SlotIdx> for Fastbin<T> {
    #[inline]
    fn index_mut(&mut self, idx: SlotIdx) -> &mut T {
        match self.slots[idx] {
            Slot::Used(ref mut obj) => obj,
            Slot::Free(_) => panic!("fastbin slot {} is free", idx),
        }
    }
}
