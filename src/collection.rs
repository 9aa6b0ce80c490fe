//! Capabilities shared by the collections of this crate.
//!
//! The collections are independent concrete types. What they have in common
//! is expressed by small traits: [`Container`] for size, [`Lookup`] for
//! membership, [`Members`] for walking the stored items and
//! [`MutableContainer`] for fallible element-wise mutation.
//! Bulk operations are default methods on those traits, and set equality and
//! hashing are free functions over them.
//!
//! [`Container`]: trait.Container.html
//! [`Lookup`]: trait.Lookup.html
//! [`Members`]: trait.Members.html
//! [`MutableContainer`]: trait.MutableContainer.html

use std::hash::{Hash, Hasher};
use std::ops::Deref;

use fnv::FnvHasher;

use crate::error::{CollectionError, Result};

pub trait Container {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Membership test for a borrowed form `Q` of the stored items.
pub trait Lookup<Q: ?Sized>: Container {
    fn contains(&self, item: &Q) -> bool;

    fn contains_all<'a, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        Q: 'a,
    {
        items.into_iter().all(|item| self.contains(item))
    }
}

/// Borrowing walk over the stored items, in the container's own order.
pub trait Members: Container {
    type Item;
    type Iter<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    fn members(&self) -> Self::Iter<'_>;
}

/// Element-wise mutation that may be refused.
///
/// The `try_` methods fail with `Unsupported` on read-only views and with
/// `NotComparable` when an ordered container cannot place an item. The bulk
/// defaults stop at the first error; items handled before it stay applied.
pub trait MutableContainer: Container {
    type Item;

    /// Adds an item. Returns whether the container changed.
    fn try_insert(&mut self, item: Self::Item) -> Result<bool>;

    /// Removes one occurrence of an item. Returns whether it was present.
    fn try_remove(&mut self, item: &Self::Item) -> Result<bool>;

    fn try_clear(&mut self) -> Result<()>;

    /// Keeps only the items for which `f` returns true.
    fn try_retain<F>(&mut self, f: F) -> Result<()>
    where
        F: FnMut(&Self::Item) -> bool;

    fn add_all<I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        let mut changed = false;
        for item in items {
            changed |= self.try_insert(item)?;
        }
        Ok(changed)
    }

    fn remove_all<'a, I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = &'a Self::Item>,
        Self::Item: 'a,
    {
        let mut changed = false;
        for item in items {
            changed |= self.try_remove(item)?;
        }
        Ok(changed)
    }

    /// Keeps only the items `other` contains.
    fn retain_all<C>(&mut self, other: &C) -> Result<bool>
    where
        C: Lookup<Self::Item> + ?Sized,
    {
        let before = self.len();
        self.try_retain(|item| other.contains(item))?;
        Ok(self.len() != before)
    }
}

/// Whether two collections hold the same items, ignoring order.
///
/// # Examples
///
/// ```
/// use hash_bin::collection::sets_equal;
/// use hash_bin::hash_set::HashSet;
/// use hash_bin::linked_hash_set::LinkedHashSet;
///
/// let a: HashSet<i32> = [1, 2, 3].iter().cloned().collect();
/// let b: LinkedHashSet<i32> = [3, 1, 2].iter().cloned().collect();
/// assert!(sets_equal(&a, &b));
/// ```
pub fn sets_equal<A, B>(a: &A, b: &B) -> bool
where
    A: Lookup<B::Item> + ?Sized,
    B: Members + ?Sized,
{
    a.len() == b.len() && b.members().all(|item| a.contains(item))
}

/// Feeds an order independent digest of `items` to `state`.
///
/// Each item is hashed on its own with FNV and the digests are summed, so two
/// collections holding the same items hash alike whatever their order.
pub fn unordered_hash<'a, T, I, H>(items: I, state: &mut H)
where
    T: Hash + 'a,
    I: IntoIterator<Item = &'a T>,
    H: Hasher,
{
    let mut count = 0usize;
    let mut sum = 0u64;
    for item in items {
        let mut hasher = FnvHasher::default();
        item.hash(&mut hasher);
        sum = sum.wrapping_add(hasher.finish());
        count += 1;
    }
    state.write_usize(count);
    state.write_u64(sum);
}

/// A view that reads through to `C` and refuses every mutation.
///
/// # Examples
///
/// ```
/// use hash_bin::collection::{MutableContainer, ReadOnly};
/// use hash_bin::error::CollectionError;
/// use hash_bin::hash_set::HashSet;
///
/// let set: HashSet<i32> = (0..4).collect();
/// let mut view = ReadOnly::new(set);
/// assert!(view.contains(&2));
/// assert_eq!(
///     view.try_insert(9),
///     Err(CollectionError::Unsupported { operation: "insert" })
/// );
/// assert_eq!(view.len(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadOnly<C> {
    inner: C,
}

impl<C> ReadOnly<C> {
    pub fn new(inner: C) -> Self {
        ReadOnly { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> Deref for ReadOnly<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

impl<C: Container> Container for ReadOnly<C> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<Q: ?Sized, C: Lookup<Q>> Lookup<Q> for ReadOnly<C> {
    fn contains(&self, item: &Q) -> bool {
        self.inner.contains(item)
    }
}

impl<C: Members> Members for ReadOnly<C> {
    type Item = C::Item;
    type Iter<'a> = C::Iter<'a>
    where
        Self: 'a;

    fn members(&self) -> C::Iter<'_> {
        self.inner.members()
    }
}

impl<C: MutableContainer> MutableContainer for ReadOnly<C> {
    type Item = C::Item;

    fn try_insert(&mut self, _item: C::Item) -> Result<bool> {
        Err(CollectionError::Unsupported { operation: "insert" })
    }

    fn try_remove(&mut self, _item: &C::Item) -> Result<bool> {
        Err(CollectionError::Unsupported { operation: "remove" })
    }

    fn try_clear(&mut self) -> Result<()> {
        Err(CollectionError::Unsupported { operation: "clear" })
    }

    fn try_retain<F>(&mut self, _f: F) -> Result<()>
    where
        F: FnMut(&C::Item) -> bool,
    {
        Err(CollectionError::Unsupported { operation: "retain" })
    }
}

impl<'a, C> IntoIterator for &'a ReadOnly<C>
where
    &'a C: IntoIterator,
{
    type Item = <&'a C as IntoIterator>::Item;
    type IntoIter = <&'a C as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        (&self.inner).into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hash_set::HashSet;
    use crate::priority_queue::PriorityQueue;
    use std::collections::hash_map::DefaultHasher;

    fn digest<'a, T: Hash + 'a, I: IntoIterator<Item = &'a T>>(items: I) -> u64 {
        let mut hasher = DefaultHasher::new();
        unordered_hash(items, &mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_unordered_hash() {
        assert_eq!(digest(&[1, 2, 3]), digest(&[3, 1, 2]));
        assert_ne!(digest(&[1, 2, 3]), digest(&[1, 2]));
        assert_ne!(digest(&[1, 2]), digest(&[1, 3]));
    }

    #[test]
    fn test_bulk_defaults() {
        let mut set: HashSet<i32> = HashSet::new();
        assert!(set.add_all(0..10).unwrap());
        assert!(!set.add_all(0..5).unwrap());
        assert!(set.remove_all(&[1, 2, 42]).unwrap());
        assert_eq!(set.len(), 8);
        let keep: HashSet<i32> = (0..5).collect();
        assert!(set.retain_all(&keep).unwrap());
        assert!(set.contains_all(&[0, 3, 4]));
        assert!(!Lookup::contains(&set, &1));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_sets_equal_across_types() {
        let set: HashSet<i32> = (0..5).collect();
        let queue: PriorityQueue<i32> = vec![4, 3, 2, 1, 0].into();
        assert!(sets_equal(&set, &queue));
        assert!(sets_equal(&queue, &set));
        let view = ReadOnly::new(set.clone());
        assert!(sets_equal(&view, &set));
        assert!(sets_equal(&set, &view));

        let shorter: PriorityQueue<i32> = vec![0, 1, 2, 3].into();
        assert!(!sets_equal(&set, &shorter));
        let other: PriorityQueue<i32> = vec![0, 1, 2, 3, 9].into();
        assert!(!sets_equal(&set, &other));
    }

    #[test]
    fn test_read_only() {
        let queue: PriorityQueue<i32> = vec![3, 1, 2].into();
        let mut view = ReadOnly::new(queue);
        assert_eq!(view.peek(), Some(&1));
        assert!(view.add_all(vec![0]).is_err());
        assert!(view.try_clear().is_err());
        assert!(view.try_retain(|_| false).is_err());
        assert_eq!(view.len(), 3);
        assert_eq!(view.into_inner().len(), 3);
    }
}
