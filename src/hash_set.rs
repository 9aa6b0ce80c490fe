use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::{Chain, FromIterator, FusedIterator};

use fnv::FnvBuildHasher as RandomState;

use crate::collection::{self, Container, Lookup, Members, MutableContainer};
use crate::config::TableConfig;
use crate::error::Result;
use crate::hash_map::{self, HashMap, Keys};
use crate::hash_table::{BinKind, Comparator, TableStats};

/// A hash set implemented as a `HashMap` where the value is `()`.
///
/// It inherits the bin escalation of [`HashMap`]: a set of keys that all
/// collide still answers `contains` in logarithmic time once the table holds
/// at least 64 bins.
///
/// [`HashMap`]: ../hash_map/struct.HashMap.html
///
/// # Examples
///
/// ```
/// use hash_bin::hash_set::HashSet;
///
/// let mut books = HashSet::new();
///
/// books.insert("A Dance With Dragons".to_string());
/// books.insert("To Kill a Mockingbird".to_string());
/// books.insert("The Odyssey".to_string());
/// books.insert("The Great Gatsby".to_string());
///
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.",
///              books.len());
/// }
///
/// books.remove("The Odyssey");
///
/// for book in &books {
///     println!("{}", book);
/// }
/// assert_eq!(books.len(), 3);
/// ```
pub struct HashSet<T, S = RandomState> {
    map: HashMap<T, (), S>,
}

/// An iterator over the items of a `HashSet`.
pub struct Iter<'a, T: 'a> {
    inner: Keys<'a, T, ()>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(inner: Keys<'a, T, ()>) -> Self {
        Iter { inner }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// An owning iterator over the items of a `HashSet`.
pub struct IntoIter<T> {
    inner: hash_map::IntoIter<T, ()>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(inner: hash_map::IntoIter<T, ()>) -> Self {
        IntoIter { inner }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(k, _)| k)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// A draining iterator over the items of a `HashSet`.
pub struct Drain<'a, T: 'a> {
    inner: hash_map::Drain<'a, T, ()>,
}

impl<'a, T> Drain<'a, T> {
    pub(crate) fn new(inner: hash_map::Drain<'a, T, ()>) -> Self {
        Drain { inner }
    }
}

impl<'a, T> Iterator for Drain<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(k, _)| k)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A lazy iterator producing elements in the intersection of `HashSet`s.
pub struct Intersection<'a, T: 'a, S: 'a> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Intersection<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            let elt = self.iter.next()?;
            if self.other.contains(elt) {
                return Some(elt);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.iter.size_hint();
        (0, upper)
    }
}

/// A lazy iterator producing elements in the difference of `HashSet`s.
pub struct Difference<'a, T: 'a, S: 'a> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Clone for Difference<'a, T, S> {
    fn clone(&self) -> Self {
        Difference {
            iter: self.iter.clone(),
            other: self.other,
        }
    }
}

impl<'a, T, S> Iterator for Difference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            let elt = self.iter.next()?;
            if !self.other.contains(elt) {
                return Some(elt);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.iter.size_hint();
        (0, upper)
    }
}

/// A lazy iterator producing elements in the symmetric difference of `HashSet`s.
pub struct SymmetricDifference<'a, T: 'a, S: 'a> {
    iter: Chain<Difference<'a, T, S>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for SymmetricDifference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// A lazy iterator producing elements in the union of `HashSet`s.
pub struct Union<'a, T: 'a, S: 'a> {
    iter: Chain<Iter<'a, T>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for Union<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// A detached position in a `HashSet`. See [`hash_map::Cursor`].
///
/// [`hash_map::Cursor`]: ../hash_map/struct.Cursor.html
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    inner: hash_map::Cursor,
}

impl Cursor {
    pub fn next<'a, T, S>(&mut self, set: &'a HashSet<T, S>) -> Result<Option<&'a T>> {
        Ok(self.inner.next(&set.map)?.map(|(k, _)| k))
    }

    pub fn remove<T, S>(&mut self, set: &mut HashSet<T, S>) -> Result<T> {
        Ok(self.inner.remove(&mut set.map)?.0)
    }
}

impl<T, S> HashSet<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        HashSet {
            map: HashMap::with_hasher(hasher),
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        HashSet {
            map: HashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self> {
        Ok(HashSet {
            map: HashMap::with_config_and_hasher(config, hasher)?,
        })
    }

    /// See [`HashMap::with_comparator`](../hash_map/struct.HashMap.html#method.with_comparator).
    pub fn with_comparator(self, comparator: Comparator<T>) -> Self {
        HashSet {
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

    /// An iterator visiting all elements in bin order.
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

    /// Clears the set, returning all elements in an iterator.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self.map.drain())
    }

    pub fn clear(&mut self) {
        self.map.clear()
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_set::HashSet;
    ///
    /// let xs = [1, 2, 3, 4, 5, 6];
    /// let mut set: HashSet<i32> = xs.iter().cloned().collect();
    /// set.retain(|&k| k % 2 == 0);
    /// assert_eq!(set.len(), 3);
    /// ```
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
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional)
    }

    /// Visits the values representing the difference,
    /// i.e. the values that are in `self` but not in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_set::HashSet;
    /// let a: HashSet<_> = [1, 2, 3].iter().cloned().collect();
    /// let b: HashSet<_> = [4, 2, 3, 4].iter().cloned().collect();
    ///
    /// let diff: Vec<_> = a.difference(&b).collect();
    /// assert_eq!(diff, [&1]);
    ///
    /// let diff: Vec<_> = b.difference(&a).collect();
    /// assert_eq!(diff, [&4]);
    /// ```
    pub fn difference<'a>(&'a self, other: &'a HashSet<T, S>) -> Difference<'a, T, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// Visits the values in `self` or in `other` but not in both.
    pub fn symmetric_difference<'a>(&'a self, other: &'a HashSet<T, S>) -> SymmetricDifference<'a, T, S> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }

    /// Visits the values in both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_set::HashSet;
    /// let a: HashSet<_> = [1, 2, 3].iter().cloned().collect();
    /// let b: HashSet<_> = [4, 2, 3, 4].iter().cloned().collect();
    ///
    /// let mut intersection: Vec<_> = a.intersection(&b).cloned().collect();
    /// intersection.sort();
    /// assert_eq!(intersection, [2, 3]);
    /// ```
    pub fn intersection<'a>(&'a self, other: &'a HashSet<T, S>) -> Intersection<'a, T, S> {
        Intersection {
            iter: self.iter(),
            other,
        }
    }

    /// Visits the values in `self` or `other`, without duplicates.
    pub fn union<'a>(&'a self, other: &'a HashSet<T, S>) -> Union<'a, T, S> {
        Union {
            iter: self.iter().chain(other.difference(self)),
        }
    }

    pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.contains_key(value)
    }

    /// Returns a reference to the stored value equal to the given one.
    pub fn get<Q: ?Sized>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.get_key_value(value).map(|(k, _)| k)
    }

    pub fn is_disjoint(&self, other: &HashSet<T, S>) -> bool {
        self.iter().all(|v| !other.contains(v))
    }

    pub fn is_subset(&self, other: &HashSet<T, S>) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    pub fn is_superset(&self, other: &HashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Adds a value to the set. An equal value already present is kept.
    ///
    /// Returns whether the value was newly inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_set::HashSet;
    ///
    /// let mut set = HashSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        match self.map.entry(value) {
            hash_map::Entry::Occupied(_) => false,
            hash_map::Entry::Vacant(entry) => {
                entry.insert(());
                true
            }
        }
    }

    /// Adds a value to the set, replacing the existing equal value.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let old = self.take(&value);
        self.map.insert(value, ());
        old
    }

    pub fn remove<Q: ?Sized>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the stored value equal to the given one.
    pub fn take<Q: ?Sized>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.remove_entry(value).map(|(k, _)| k)
    }

    pub fn bin_kind<Q: ?Sized + Hash>(&self, value: &Q) -> BinKind
    where
        T: Borrow<Q>,
    {
        self.map.bin_kind(value)
    }
}

impl<T> HashSet<T, RandomState> {
    pub fn new() -> Self {
        HashSet { map: HashMap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        HashSet {
            map: HashMap::with_capacity(capacity),
        }
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, RandomState::default())
    }
}

impl<T, S> Default for HashSet<T, S>
where
    S: Default,
{
    fn default() -> Self {
        HashSet {
            map: HashMap::default(),
        }
    }
}

impl<T, S> Clone for HashSet<T, S>
where
    T: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        HashSet {
            map: self.map.clone(),
        }
    }
}

impl<T: Debug, S> Debug for HashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &HashSet<T, S>) -> bool {
        collection::sets_equal(self, other)
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

/// Independent of iteration order, so equal sets hash alike.
impl<T: Hash, S> Hash for HashSet<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        collection::unordered_hash(self.iter(), state);
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
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

impl<'a, T, S> Extend<&'a T> for HashSet<T, S>
where
    T: 'a + Hash + Eq + Copy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> HashSet<T, S> {
        let mut set = HashSet::with_hasher(Default::default());
        set.extend(iter);
        set
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, S> IntoIterator for HashSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.map.into_iter())
    }
}

impl<T, S> Container for HashSet<T, S> {
    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<T, S> Members for HashSet<T, S> {
    type Item = T;
    type Iter<'a> = Iter<'a, T>
    where
        Self: 'a;

    fn members(&self) -> Iter<'_, T> {
        self.iter()
    }
}

impl<T, Q: ?Sized, S> Lookup<Q> for HashSet<T, S>
where
    T: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq,
    S: BuildHasher,
{
    fn contains(&self, item: &Q) -> bool {
        self.map.contains_key(item)
    }
}

impl<T, S> MutableContainer for HashSet<T, S>
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

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn digest<T: Hash>(t: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        t.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_set_ops() {
        let a: HashSet<i32> = (0..10).collect();
        let b: HashSet<i32> = (5..15).collect();

        let mut union: Vec<i32> = a.union(&b).cloned().collect();
        union.sort();
        assert_eq!(union, (0..15).collect::<Vec<_>>());

        let mut sym: Vec<i32> = a.symmetric_difference(&b).cloned().collect();
        sym.sort();
        assert_eq!(sym, vec![0, 1, 2, 3, 4, 10, 11, 12, 13, 14]);

        assert_eq!(a.intersection(&b).count(), 5);
        assert_eq!(a.difference(&b).count(), 5);

        let small: HashSet<i32> = (2..4).collect();
        assert!(small.is_subset(&a));
        assert!(a.is_superset(&small));
        assert!(!small.is_subset(&b));
        assert!(small.is_disjoint(&b));
        assert!(!a.is_disjoint(&b));
    }

    #[test]
    fn test_eq_and_hash_ignore_order() {
        let mut a = HashSet::with_capacity(4);
        let mut b = HashSet::with_capacity(256);
        for i in 0..50 {
            a.insert(i);
        }
        for i in (0..50).rev() {
            b.insert(i);
        }
        assert_ne!(a.capacity(), b.capacity());
        assert_eq!(a, b);
        assert_eq!(digest(&a), digest(&b));
        b.remove(&7);
        assert_ne!(a, b);
    }

    #[test]
    fn test_take_replace_get() {
        let mut set: HashSet<String> = HashSet::new();
        assert!(set.insert("x".to_string()));
        assert_eq!(set.get("x").map(String::as_str), Some("x"));
        assert_eq!(set.replace("x".to_string()), Some("x".to_string()));
        assert_eq!(set.len(), 1);
        assert_eq!(set.take("x"), Some("x".to_string()));
        assert_eq!(set.take("x"), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_cursor_remove() {
        let mut set: HashSet<u32> = (0..20).collect();
        let mut cursor = set.cursor();
        while let Some(&v) = cursor.next(&set).unwrap() {
            if v >= 10 {
                assert_eq!(cursor.remove(&mut set).unwrap(), v);
            }
        }
        let mut left: Vec<u32> = set.into_iter().collect();
        left.sort();
        assert_eq!(left, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_drain_and_debug() {
        let mut set: HashSet<i32> = [3].iter().cloned().collect();
        assert_eq!(format!("{:?}", set), "{3}");
        assert_eq!(set.drain().collect::<Vec<_>>(), vec![3]);
        assert!(set.is_empty());
        assert_eq!(format!("{:?}", set), "{}");
    }
}
