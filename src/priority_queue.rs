//! An array backed binary heap.
//!
//! The smallest element under the queue's order sits at the root. The order
//! is a [`HeapOrder`]: the element type's `Ord` by default, a closure, or the
//! element type's `PartialOrd`. A partial order may find two elements
//! incomparable, in which case `offer` refuses the new element with
//! [`CollectionError::NotComparable`] and leaves the queue as it was.
//!
//! [`HeapOrder`]: trait.HeapOrder.html
//! [`CollectionError::NotComparable`]: ../error/enum.CollectionError.html

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::iter::FromIterator;
use std::slice;
use std::vec;

use crate::collection::{Container, Lookup, Members, MutableContainer};
use crate::error::{CollectionError, Result};

/// How a `PriorityQueue` ranks its elements. `None` means incomparable.
pub trait HeapOrder<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Option<Ordering>;
}

/// Orders that never answer `None`.
pub trait TotalOrder<T: ?Sized>: HeapOrder<T> {}

/// The element type's `Ord`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> HeapOrder<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Option<Ordering> {
        Some(a.cmp(b))
    }
}

impl<T: Ord + ?Sized> TotalOrder<T> for NaturalOrder {}

/// The element type's `PartialOrd`. A value that is not comparable with
/// itself, such as a NaN, is never admitted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialOrder;

impl<T: PartialOrd + ?Sized> HeapOrder<T> for PartialOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Option<Ordering> {
        a.partial_cmp(b)
    }
}

/// A comparison closure.
#[derive(Copy, Clone)]
pub struct FnOrder<F>(pub F);

impl<T: ?Sized, F> HeapOrder<T> for FnOrder<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Option<Ordering> {
        Some((self.0)(a, b))
    }
}

impl<T: ?Sized, F> TotalOrder<T> for FnOrder<F> where F: Fn(&T, &T) -> Ordering {}

impl<F> Debug for FnOrder<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("FnOrder")
    }
}

/// A min-heap priority queue.
///
/// # Examples
///
/// ```
/// use hash_bin::priority_queue::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.offer(5).unwrap();
/// queue.offer(1).unwrap();
/// queue.offer(3).unwrap();
///
/// assert_eq!(queue.peek(), Some(&1));
/// assert!(queue.remove(&3));
/// assert_eq!(queue.poll(), Some(1));
/// assert_eq!(queue.poll(), Some(5));
/// assert_eq!(queue.poll(), None);
/// ```
///
/// A largest-first queue over a closure:
///
/// ```
/// use hash_bin::priority_queue::PriorityQueue;
///
/// let mut queue = PriorityQueue::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// queue.extend(vec![2, 9, 4]);
/// assert_eq!(queue.into_sorted_vec(), vec![9, 4, 2]);
/// ```
#[derive(Clone)]
pub struct PriorityQueue<T, O = NaturalOrder> {
    heap: Vec<T>,
    order: O,
}

impl<T: Ord> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, NaturalOrder)
    }
}

impl<T: PartialOrd> PriorityQueue<T, PartialOrder> {
    /// A queue over `PartialOrd`, for element types such as `f64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::error::CollectionError;
    /// use hash_bin::priority_queue::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::with_partial_order();
    /// queue.offer(2.5).unwrap();
    /// assert_eq!(queue.offer(f64::NAN), Err(CollectionError::NotComparable));
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn with_partial_order() -> Self {
        Self::with_order(PartialOrder)
    }
}

impl<T, F> PriorityQueue<T, FnOrder<F>>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(compare: F) -> Self {
        Self::with_order(FnOrder(compare))
    }
}

impl<T, O> PriorityQueue<T, O> {
    pub fn with_order(order: O) -> Self {
        PriorityQueue {
            heap: Vec::new(),
            order,
        }
    }

    pub fn with_capacity_and_order(capacity: usize, order: O) -> Self {
        PriorityQueue {
            heap: Vec::with_capacity(capacity),
            order,
        }
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The smallest element.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Elements in heap array order. Only the first is guaranteed to be the
    /// smallest.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.heap.iter()
    }

    /// Empties the queue, yielding elements in heap array order.
    pub fn drain(&mut self) -> vec::Drain<'_, T> {
        self.heap.drain(..)
    }

    /// The backing array in heap order.
    pub fn into_vec(self) -> Vec<T> {
        self.heap
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.heap.iter().any(|e| e == item)
    }
}

impl<T, O> PriorityQueue<T, O>
where
    O: HeapOrder<T>,
{
    /// Adds an element in O(log n).
    ///
    /// The element's place is found before anything moves, so a refused
    /// element leaves the heap exactly as it was.
    pub fn offer(&mut self, item: T) -> Result<()> {
        if self.order.compare(&item, &item).is_none() {
            return Err(CollectionError::NotComparable);
        }
        let mut target = self.heap.len();
        while target > 0 {
            let parent = (target - 1) / 2;
            match self.order.compare(&item, &self.heap[parent]) {
                None => return Err(CollectionError::NotComparable),
                Some(Ordering::Less) => target = parent,
                Some(_) => break,
            }
        }
        self.heap.push(item);
        let mut pos = self.heap.len() - 1;
        while pos > target {
            let parent = (pos - 1) / 2;
            self.heap.swap(pos, parent);
            pos = parent;
        }
        Ok(())
    }

    /// Removes and returns the smallest element.
    pub fn poll(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    /// Removes one element equal to `item`. Returns whether one was found.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.heap.iter().position(|e| e == item) {
            Some(pos) => {
                self.remove_at(pos);
                true
            }
            None => false,
        }
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.heap.len();
        self.heap.retain(f);
        if self.heap.len() != before {
            self.heapify();
        }
    }

    /// Consumes the queue, returning its elements smallest first.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Some(item) = self.poll() {
            sorted.push(item);
        }
        sorted
    }

    fn remove_at(&mut self, pos: usize) -> T {
        let removed = self.heap.swap_remove(pos);
        if pos < self.heap.len() && self.sift_down(pos) == pos {
            self.sift_up(pos);
        }
        removed
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.order.compare(&self.heap[a], &self.heap[b]) == Some(Ordering::Less)
    }

    /// Returns the final position. Incomparable pairs count as equal.
    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.heap.swap(pos, parent);
            pos = parent;
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) -> usize {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, pos) {
                break;
            }
            self.heap.swap(pos, child);
            pos = child;
        }
        pos
    }

    fn heapify(&mut self) {
        let len = self.heap.len();
        for pos in (0..len / 2).rev() {
            self.sift_down(pos);
        }
    }

    #[cfg(test)]
    fn assert_heap(&self) {
        for pos in 1..self.heap.len() {
            let parent = (pos - 1) / 2;
            assert!(!self.less(pos, parent), "heap order broken at {}", pos);
        }
    }
}

impl<T, O> PriorityQueue<T, O>
where
    O: TotalOrder<T>,
{
    fn push(&mut self, item: T) {
        self.heap.push(item);
        let last = self.heap.len() - 1;
        self.sift_up(last);
    }
}

impl<T, O: Default> Default for PriorityQueue<T, O> {
    fn default() -> Self {
        Self::with_order(O::default())
    }
}

impl<T: Debug, O> Debug for PriorityQueue<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.heap.iter()).finish()
    }
}

/// Heapifies in O(n).
impl<T: Ord> From<Vec<T>> for PriorityQueue<T> {
    fn from(heap: Vec<T>) -> Self {
        let mut queue = PriorityQueue {
            heap,
            order: NaturalOrder,
        };
        queue.heapify();
        queue
    }
}

impl<T, O> Extend<T> for PriorityQueue<T, O>
where
    O: TotalOrder<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.heap.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        PriorityQueue::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T, O> IntoIterator for PriorityQueue<T, O> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    /// Heap array order.
    fn into_iter(self) -> vec::IntoIter<T> {
        self.heap.into_iter()
    }
}

impl<'a, T, O> IntoIterator for &'a PriorityQueue<T, O> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.heap.iter()
    }
}

impl<T, O> Container for PriorityQueue<T, O> {
    fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T, O> Members for PriorityQueue<T, O> {
    type Item = T;
    type Iter<'a> = slice::Iter<'a, T>
    where
        Self: 'a;

    fn members(&self) -> slice::Iter<'_, T> {
        self.heap.iter()
    }
}

impl<T: PartialEq, O> Lookup<T> for PriorityQueue<T, O> {
    fn contains(&self, item: &T) -> bool {
        PriorityQueue::contains(self, item)
    }
}

impl<T, O> MutableContainer for PriorityQueue<T, O>
where
    T: PartialEq,
    O: HeapOrder<T>,
{
    type Item = T;

    fn try_insert(&mut self, item: T) -> Result<bool> {
        self.offer(item)?;
        Ok(true)
    }

    fn try_remove(&mut self, item: &T) -> Result<bool> {
        Ok(self.remove(item))
    }

    fn try_clear(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }

    fn try_retain<F>(&mut self, f: F) -> Result<()>
    where
        F: FnMut(&T) -> bool,
    {
        self.retain(f);
        Ok(())
    }
}
