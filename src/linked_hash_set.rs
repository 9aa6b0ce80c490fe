use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FromIterator;

use fnv::FnvBuildHasher as RandomState;

use crate::collection::{self, Container, Lookup, Members, MutableContainer};
use crate::config::{LinkOrder, TableConfig};
use crate::error::Result;
use crate::hash_set::{Drain, IntoIter, Iter};
use crate::hash_table::{BinKind, Comparator, TableStats};
use crate::linked_hash_map::{self, LinkedHashMap};

/// A hash set that iterates in insertion order.
///
/// Re-inserting a present value does not move it; removing and inserting
/// it again puts it at the back.
///
/// # Examples
///
/// ```
/// use hash_bin::linked_hash_set::LinkedHashSet;
///
/// let mut set = LinkedHashSet::new();
/// set.insert('a');
/// set.insert('b');
/// set.insert('c');
/// set.insert('a');
/// set.remove(&'b');
/// set.insert('b');
///
/// let order: String = set.iter().collect();
/// assert_eq!(order, "acb");
/// ```
pub struct LinkedHashSet<T, S = RandomState> {
    map: LinkedHashMap<T, (), S>,
}

/// A detached position in a `LinkedHashSet`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    inner: linked_hash_map::Cursor,
}

impl Cursor {
    pub fn next<'a, T, S>(&mut self, set: &'a LinkedHashSet<T, S>) -> Result<Option<&'a T>> {
        Ok(self.inner.next(&set.map)?.map(|(k, _)| k))
    }

    pub fn remove<T, S>(&mut self, set: &mut LinkedHashSet<T, S>) -> Result<T> {
        Ok(self.inner.remove(&mut set.map)?.0)
    }
}

impl<T, S> LinkedHashSet<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        LinkedHashSet {
            map: LinkedHashMap::with_hasher(hasher),
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        LinkedHashSet {
            map: LinkedHashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self> {
        Ok(LinkedHashSet {
            map: LinkedHashMap::with_config_and_hasher(config, LinkOrder::Insertion, hasher)?,
        })
    }

    pub fn with_comparator(self, comparator: Comparator<T>) -> Self {
        LinkedHashSet {
            map: self.map.with_comparator(comparator),
        }
    }

    pub fn hasher(&self) -> &S {
        self.map.hasher()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.map.load_factor()
    }

    pub fn stats(&self) -> TableStats {
        self.map.stats()
    }

    /// Elements from the first inserted to the last.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.map.keys())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self.map.drain())
    }

    pub fn clear(&mut self) {
        self.map.clear()
    }

    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.map.retain(|k, _| f(k));
    }

    pub fn cursor(&self) -> Cursor {
        Cursor {
            inner: self.map.cursor(),
        }
    }

    pub fn shrink_to_fit(&mut self) {
        self.map.shrink_to_fit()
    }

    /// The first inserted element.
    pub fn front(&self) -> Option<&T> {
        self.map.front().map(|(k, _)| k)
    }

    /// The last inserted element.
    pub fn back(&self) -> Option<&T> {
        self.map.back().map(|(k, _)| k)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.map.pop_front().map(|(k, _)| k)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.map.pop_back().map(|(k, _)| k)
    }
}

impl<T, S> LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional)
    }

    /// Adds a value at the back. A value already present keeps its place.
    pub fn insert(&mut self, value: T) -> bool {
        match self.map.entry(value) {
            linked_hash_map::Entry::Occupied(_) => false,
            linked_hash_map::Entry::Vacant(entry) => {
                entry.insert(());
                true
            }
        }
    }

    pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.contains_key(value)
    }

    pub fn get<Q: ?Sized>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.get_key_value(value).map(|(k, _)| k)
    }

    pub fn remove<Q: ?Sized>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.remove(value).is_some()
    }

    pub fn take<Q: ?Sized>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.remove_entry(value).map(|(k, _)| k)
    }

    pub fn is_disjoint(&self, other: &LinkedHashSet<T, S>) -> bool {
        self.iter().all(|v| !other.contains(v))
    }

    pub fn is_subset(&self, other: &LinkedHashSet<T, S>) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    pub fn is_superset(&self, other: &LinkedHashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Values of `self` missing from `other`, in `self`'s order.
    pub fn difference<'a>(&'a self, other: &'a LinkedHashSet<T, S>) -> impl Iterator<Item = &'a T> + 'a {
        self.iter().filter(move |v| !other.contains(*v))
    }

    /// Values of `self` also in `other`, in `self`'s order.
    pub fn intersection<'a>(&'a self, other: &'a LinkedHashSet<T, S>) -> impl Iterator<Item = &'a T> + 'a {
        self.iter().filter(move |v| other.contains(*v))
    }

    /// `self` in order, then what `other` adds, in `other`'s order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::linked_hash_set::LinkedHashSet;
    ///
    /// let a: LinkedHashSet<_> = [3, 1, 2].iter().cloned().collect();
    /// let b: LinkedHashSet<_> = [5, 2, 4].iter().cloned().collect();
    /// let union: Vec<_> = a.union(&b).cloned().collect();
    /// assert_eq!(union, [3, 1, 2, 5, 4]);
    /// ```
    pub fn union<'a>(&'a self, other: &'a LinkedHashSet<T, S>) -> impl Iterator<Item = &'a T> + 'a {
        self.iter().chain(other.difference(self))
    }

    pub fn symmetric_difference<'a>(&'a self, other: &'a LinkedHashSet<T, S>) -> impl Iterator<Item = &'a T> + 'a {
        self.difference(other).chain(other.difference(self))
    }

    pub fn bin_kind<Q: ?Sized + Hash>(&self, value: &Q) -> BinKind
    where
        T: Borrow<Q>,
    {
        self.map.bin_kind(value)
    }
}

impl<T> LinkedHashSet<T, RandomState> {
    pub fn new() -> Self {
        LinkedHashSet {
            map: LinkedHashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LinkedHashSet {
            map: LinkedHashMap::with_capacity(capacity),
        }
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, RandomState::default())
    }
}

impl<T, S> Default for LinkedHashSet<T, S>
where
    S: Default,
{
    fn default() -> Self {
        LinkedHashSet {
            map: LinkedHashMap::default(),
        }
    }
}

impl<T, S> Clone for LinkedHashSet<T, S>
where
    T: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        LinkedHashSet {
            map: self.map.clone(),
        }
    }
}

impl<T: Debug, S> Debug for LinkedHashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq for LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &LinkedHashSet<T, S>) -> bool {
        collection::sets_equal(self, other)
    }
}

impl<T, S> Eq for LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T: Hash, S> Hash for LinkedHashSet<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        collection::unordered_hash(self.iter(), state);
    }
}

impl<T, S> Extend<T> for LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, S> Extend<&'a T> for LinkedHashSet<T, S>
where
    T: 'a + Hash + Eq + Copy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, S> FromIterator<T> for LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = LinkedHashSet::with_hasher(Default::default());
        set.extend(iter);
        set
    }
}

impl<'a, T, S> IntoIterator for &'a LinkedHashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, S> IntoIterator for LinkedHashSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.map.into_iter())
    }
}

impl<T, S> Container for LinkedHashSet<T, S> {
    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<T, S> Members for LinkedHashSet<T, S> {
    type Item = T;
    type Iter<'a> = Iter<'a, T>
    where
        Self: 'a;

    fn members(&self) -> Iter<'_, T> {
        self.iter()
    }
}

impl<T, Q: ?Sized, S> Lookup<Q> for LinkedHashSet<T, S>
where
    T: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq,
    S: BuildHasher,
{
    fn contains(&self, item: &Q) -> bool {
        self.map.contains_key(item)
    }
}

impl<T, S> MutableContainer for LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = T;

    fn try_insert(&mut self, item: T) -> Result<bool> {
        Ok(self.insert(item))
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
