//! A hash map that remembers an order.
//!
//! Every entry is also threaded onto a doubly linked list. In
//! [`LinkOrder::Insertion`] mode the list keeps the order in which keys were
//! first inserted; updating the value of a present key does not move it. In
//! [`LinkOrder::Access`] mode every successful [`get`], [`get_mut`],
//! [`insert`] or [`entry`] on a present key moves it to the back, which turns
//! the map into the core of an LRU cache.
//!
//! [`LinkOrder::Insertion`]: ../config/enum.LinkOrder.html
//! [`LinkOrder::Access`]: ../config/enum.LinkOrder.html
//! [`get`]: struct.LinkedHashMap.html#method.get
//! [`get_mut`]: struct.LinkedHashMap.html#method.get_mut
//! [`insert`]: struct.LinkedHashMap.html#method.insert
//! [`entry`]: struct.LinkedHashMap.html#method.entry

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash};
use std::iter::FromIterator;
use std::ops::Index;

use fnv::FnvBuildHasher as RandomState;
use tracing::trace;

use crate::collection::{Container, Lookup};
use crate::config::{LinkOrder, TableConfig};
use crate::error::Result;
use crate::fastbin::SlotIdx;
use crate::hash_map::{self, Drain, HashMap, IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::hash_table::{BinKind, Comparator, HashTable, TableStats};

/// Decides after each insertion of a new key whether the eldest entry goes.
///
/// Called with the eldest key, its value and the current length.
pub type EvictionPolicy<K, V> = fn(&K, &V, usize) -> bool;

/// A hash map with a predictable iteration order.
///
/// # Examples
///
/// ```
/// use hash_bin::linked_hash_map::LinkedHashMap;
///
/// let mut map = LinkedHashMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// map.insert("c", 3);
/// map.remove("b");
/// map.insert("b", 4);
/// map.insert("a", 5);
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, ["a", "c", "b"]);
/// ```
///
/// A bounded cache that keeps the most recently used entries:
///
/// ```
/// use hash_bin::config::LinkOrder;
/// use hash_bin::linked_hash_map::LinkedHashMap;
///
/// let mut cache = LinkedHashMap::with_order(LinkOrder::Access);
/// cache.set_eviction_policy(|_: &u32, _: &&str, len| len > 2);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.get(&1);
/// cache.insert(3, "three");
///
/// assert!(cache.contains_key(&1));
/// assert!(!cache.contains_key(&2));
/// ```
pub struct LinkedHashMap<K, V, S = RandomState> {
    map: HashMap<K, V, S>,
    order: LinkOrder,
    eviction: Option<EvictionPolicy<K, V>>,
}

/// A detached position in a `LinkedHashMap`. See [`hash_map::Cursor`].
///
/// Moving an entry in access order counts as a structural change.
///
/// [`hash_map::Cursor`]: ../hash_map/struct.Cursor.html
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    inner: hash_map::Cursor,
}

impl Cursor {
    pub fn next<'a, K, V, S>(&mut self, map: &'a LinkedHashMap<K, V, S>) -> Result<Option<(&'a K, &'a V)>> {
        self.inner.next(&map.map)
    }

    pub fn remove<K, V, S>(&mut self, map: &mut LinkedHashMap<K, V, S>) -> Result<(K, V)> {
        self.inner.remove(&mut map.map)
    }
}

/// A view into a single entry of a `LinkedHashMap`.
pub enum Entry<'a, K: 'a, V: 'a> {
    Occupied(OccupiedEntry<'a, K, V>),
    Vacant(VacantEntry<'a, K, V>),
}

pub struct OccupiedEntry<'a, K: 'a, V: 'a> {
    inner: hash_map::OccupiedEntry<'a, K, V>,
}

pub struct VacantEntry<'a, K: 'a, V: 'a> {
    inner: hash_map::VacantEntry<'a, K, V>,
    eviction: Option<EvictionPolicy<K, V>>,
}

impl<'a, K, V> Entry<'a, K, V> {
    pub fn key(&self) -> &K {
        match *self {
            Entry::Occupied(ref entry) => entry.key(),
            Entry::Vacant(ref entry) => entry.key(),
        }
    }

    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }
}

impl<'a, K, V: Default> Entry<'a, K, V> {
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    pub fn key(&self) -> &K {
        self.inner.key()
    }

    pub fn get(&self) -> &V {
        self.inner.get()
    }

    pub fn get_mut(&mut self) -> &mut V {
        self.inner.get_mut()
    }

    pub fn into_mut(self) -> &'a mut V {
        self.inner.into_mut()
    }

    pub fn insert(&mut self, value: V) -> V {
        self.inner.insert(value)
    }

    pub fn remove_entry(self) -> (K, V) {
        self.inner.remove_entry()
    }

    pub fn remove(self) -> V {
        self.inner.remove()
    }
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    pub fn key(&self) -> &K {
        self.inner.key()
    }

    pub fn into_key(self) -> K {
        self.inner.into_key()
    }

    /// Inserts the value at the back of the order. The eviction policy is
    /// consulted afterwards, but never evicts the entry just inserted.
    pub fn insert(self, value: V) -> &'a mut V {
        let (idx, table) = self.inner.insert_slot(value);
        evict_eldest(table, self.eviction, idx);
        &mut table.node_mut(idx).value
    }
}

/// Runs the eviction policy against the front of the order list.
fn evict_eldest<K, V>(table: &mut HashTable<K, V>, policy: Option<EvictionPolicy<K, V>>, inserted: SlotIdx) {
    let policy = match policy {
        Some(policy) => policy,
        None => return,
    };
    let eldest = match table.front() {
        Some(eldest) if eldest != inserted => eldest,
        _ => return,
    };
    let evict = {
        let node = table.node(eldest);
        policy(&node.key, &node.value, table.len())
    };
    if evict {
        trace!(len = table.len(), "evicting eldest entry");
        table.erase(eldest);
    }
}

impl<K, V, S> LinkedHashMap<K, V, S> {
    fn from_config(config: &TableConfig, order: LinkOrder, hash_builder: S) -> Self {
        LinkedHashMap {
            map: HashMap::from_parts(HashTable::new(config, true), hash_builder),
            order,
            eviction: None,
        }
    }

    pub fn with_hasher(hash_builder: S) -> Self {
        Self::from_config(&TableConfig::default(), LinkOrder::Insertion, hash_builder)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let config = TableConfig::new().initial_capacity(capacity);
        Self::from_config(&config, LinkOrder::Insertion, hash_builder)
    }

    /// Creates an empty map from a `TableConfig` and an ordering mode.
    pub fn with_config_and_hasher(config: TableConfig, order: LinkOrder, hash_builder: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(&config, order, hash_builder))
    }

    /// Installs a policy consulted after every insertion of a new key.
    ///
    /// The policy sees the eldest entry and the length including the new key.
    /// When it returns true the eldest entry is removed. The key just inserted
    /// is never evicted, even when it is the only entry, because
    /// [`VacantEntry::insert`] hands out a reference to it. A policy of
    /// `len > 0` therefore keeps exactly the newest entry.
    ///
    /// [`VacantEntry::insert`]: struct.VacantEntry.html#method.insert
    pub fn set_eviction_policy(&mut self, policy: EvictionPolicy<K, V>) {
        self.eviction = Some(policy);
    }

    pub fn clear_eviction_policy(&mut self) {
        self.eviction = None;
    }

    pub fn with_comparator(self, comparator: Comparator<K>) -> Self {
        LinkedHashMap {
            map: self.map.with_comparator(comparator),
            order: self.order,
            eviction: self.eviction,
        }
    }

    #[inline]
    pub fn link_order(&self) -> LinkOrder {
        self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.map.load_factor()
    }

    pub fn hasher(&self) -> &S {
        self.map.hasher()
    }

    pub fn stats(&self) -> TableStats {
        self.map.stats()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn shrink_to_fit(&mut self) {
        self.map.shrink_to_fit();
    }

    /// Entries from eldest to youngest.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.map.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.map.iter_mut()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        self.map.keys()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.map.values()
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        self.map.values_mut()
    }

    pub fn drain(&mut self) -> Drain<'_, K, V> {
        self.map.drain()
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.map.retain(f);
    }

    pub fn cursor(&self) -> Cursor {
        Cursor {
            inner: self.map.cursor(),
        }
    }

    fn entry_at(&self, idx: Option<SlotIdx>) -> Option<(&K, &V)> {
        idx.map(|idx| {
            let node = self.map.raw().node(idx);
            (&node.key, &node.value)
        })
    }

    /// The eldest entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::linked_hash_map::LinkedHashMap;
    ///
    /// let mut map = LinkedHashMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.front(), Some((&2, &"b")));
    /// assert_eq!(map.back(), Some((&1, &"a")));
    /// ```
    pub fn front(&self) -> Option<(&K, &V)> {
        self.entry_at(self.map.raw().front())
    }

    /// The youngest entry.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.entry_at(self.map.raw().back())
    }

    /// Removes and returns the eldest entry.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let table = self.map.raw_mut();
        table.front().map(|idx| table.erase(idx))
    }

    /// Removes and returns the youngest entry.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let table = self.map.raw_mut();
        table.back().map(|idx| table.erase(idx))
    }

    #[inline]
    fn touch(&mut self, idx: SlotIdx) {
        if self.order == LinkOrder::Access {
            self.map.raw_mut().move_to_back(idx);
        }
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Inserts a key-value pair.
    ///
    /// A new key goes to the back. Updating a present key keeps its position
    /// in insertion order and moves it to the back in access order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::linked_hash_map::LinkedHashMap;
    ///
    /// let mut map = LinkedHashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    /// assert_eq!(map.insert("b", 20), Some(2));
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, ["a", "b", "c"]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.map.hash_of(&key);
        let (idx, old) = self.map.raw_mut().insert(hash, key, value);
        match old {
            Some(_) => self.touch(idx),
            None => evict_eldest(self.map.raw_mut(), self.eviction, idx),
        }
        old
    }

    /// Looks a key up, moving it to the back in access order.
    pub fn get<Q: ?Sized>(&mut self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        let idx = self.map.find(q)?;
        self.touch(idx);
        Some(&self.map.raw().node(idx).value)
    }

    pub fn get_mut<Q: ?Sized>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        let idx = self.map.find(q)?;
        self.touch(idx);
        Some(&mut self.map.raw_mut().node_mut(idx).value)
    }

    /// Looks a key up without touching the order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::config::LinkOrder;
    /// use hash_bin::linked_hash_map::LinkedHashMap;
    ///
    /// let mut map = LinkedHashMap::with_order(LinkOrder::Access);
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.peek(&1), Some(&"a"));
    /// assert_eq!(map.front(), Some((&1, &"a")));
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.front(), Some((&2, &"b")));
    /// ```
    pub fn peek<Q: ?Sized>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.get(q)
    }

    pub fn get_key_value<Q: ?Sized>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.get_key_value(q)
    }

    pub fn contains_key<Q: ?Sized>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.contains_key(q)
    }

    pub fn remove<Q: ?Sized>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.remove(q)
    }

    pub fn remove_entry<Q: ?Sized>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.map.remove_entry(q)
    }

    /// Moves a key to the back whatever the ordering mode. Returns false
    /// when the key is absent.
    pub fn move_to_back<Q: ?Sized>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        match self.map.find(q) {
            Some(idx) => {
                self.map.raw_mut().move_to_back(idx);
                true
            }
            None => false,
        }
    }

    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let access = self.order == LinkOrder::Access;
        match self.map.entry(key) {
            hash_map::Entry::Occupied(inner) => {
                if access {
                    inner.table.move_to_back(inner.idx);
                }
                Entry::Occupied(OccupiedEntry { inner })
            }
            hash_map::Entry::Vacant(inner) => Entry::Vacant(VacantEntry {
                inner,
                eviction: self.eviction,
            }),
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional);
    }

    pub fn bin_kind<Q: ?Sized + Hash>(&self, key: &Q) -> BinKind
    where
        K: Borrow<Q>,
    {
        self.map.bin_kind(key)
    }
}

impl<K, V> LinkedHashMap<K, V, RandomState> {
    pub fn new() -> Self {
        Self::with_hasher(RandomState::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }

    pub fn with_order(order: LinkOrder) -> Self {
        Self::from_config(&TableConfig::default(), order, RandomState::default())
    }

    pub fn with_config(config: TableConfig, order: LinkOrder) -> Result<Self> {
        Self::with_config_and_hasher(config, order, RandomState::default())
    }
}

impl<K, V, S> Default for LinkedHashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Clone for LinkedHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        LinkedHashMap {
            map: self.map.clone(),
            order: self.order,
            eviction: self.eviction,
        }
    }
}

impl<K, V, S> Debug for LinkedHashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Order is ignored, like two `HashMap`s with the same entries.
impl<K, V, S> PartialEq for LinkedHashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &LinkedHashMap<K, V, S>) -> bool {
        self.map == other.map
    }
}

impl<K, V, S> Eq for LinkedHashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<'a, K, Q: ?Sized, V, S> Index<&'a Q> for LinkedHashMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// Does not touch the order.
    #[inline]
    fn index(&self, index: &Q) -> &V {
        self.peek(index).expect("no entry found for key")
    }
}

impl<K, V, S> Extend<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for LinkedHashMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = LinkedHashMap::with_hasher(Default::default());
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for LinkedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        self.map.into_iter()
    }
}

impl<K, V, S> Container for LinkedHashMap<K, V, S> {
    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<K, Q: ?Sized, V, S> Lookup<Q> for LinkedHashMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq,
    S: BuildHasher,
{
    fn contains(&self, item: &Q) -> bool {
        self.contains_key(item)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn keys<K: Copy, V, S>(map: &LinkedHashMap<K, V, S>) -> Vec<K> {
        map.keys().cloned().collect()
    }

    #[test]
    fn test_eviction_keeps_newest() {
        fn always(_: &u32, _: &u32, len: usize) -> bool {
            len > 0
        }

        let mut map = LinkedHashMap::new();
        map.set_eviction_policy(always);
        map.insert(1, 10);
        assert_eq!(keys(&map), vec![1]);
        map.insert(2, 20);
        map.insert(3, 30);
        assert_eq!(keys(&map), vec![3]);
        *map.entry(4).or_insert(40) += 1;
        assert_eq!(keys(&map), vec![4]);
        assert_eq!(map.peek(&4), Some(&41));
        assert_eq!(map.insert(4, 0), Some(41));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insertion_order_survives_resize() {
        let mut map = LinkedHashMap::new();
        let order: Vec<u32> = (0..500).rev().collect();
        for &k in &order {
            map.insert(k, k);
        }
        assert_eq!(keys(&map), order);
        assert_eq!(map.capacity(), 1024);
    }

    #[test]
    fn test_access_order() {
        let mut map = LinkedHashMap::with_order(LinkOrder::Access);
        for k in 1..=4 {
            map.insert(k, k * 10);
        }
        map.get(&2);
        assert_eq!(keys(&map), vec![1, 3, 4, 2]);
        *map.get_mut(&1).unwrap() += 1;
        assert_eq!(keys(&map), vec![3, 4, 2, 1]);
        map.insert(3, 0);
        assert_eq!(keys(&map), vec![4, 2, 1, 3]);
        *map.entry(4).or_insert(0) += 1;
        assert_eq!(keys(&map), vec![2, 1, 3, 4]);
        assert_eq!(map.peek(&2), Some(&20));
        assert_eq!(map[&2], 20);
        assert!(map.contains_key(&2));
        assert_eq!(keys(&map), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_insertion_mode_ignores_access() {
        let mut map = LinkedHashMap::new();
        for k in 1..=3 {
            map.insert(k, k);
        }
        map.get(&1);
        map.insert(1, 100);
        *map.entry(1).or_insert(0) += 1;
        assert_eq!(keys(&map), vec![1, 2, 3]);
        assert!(map.move_to_back(&1));
        assert!(!map.move_to_back(&9));
        assert_eq!(keys(&map), vec![2, 3, 1]);
    }

    #[test]
    fn test_pop_front_back() {
        let mut map: LinkedHashMap<_, _> = (0..5).map(|k| (k, k)).collect();
        assert_eq!(map.pop_front(), Some((0, 0)));
        assert_eq!(map.pop_back(), Some((4, 4)));
        assert_eq!(keys(&map), vec![1, 2, 3]);
        map.clear();
        assert_eq!(map.pop_front(), None);
        assert_eq!(map.front(), None);
    }

    #[test]
    fn test_eviction_policy() {
        let mut map = LinkedHashMap::new();
        map.set_eviction_policy(|_: &i32, _: &i32, len| len > 3);
        for k in 0..10 {
            map.insert(k, k);
        }
        assert_eq!(keys(&map), vec![7, 8, 9]);
        // updates never evict
        map.insert(8, 80);
        assert_eq!(map.len(), 3);
        *map.entry(10).or_insert(0) += 1;
        assert_eq!(keys(&map), vec![8, 9, 10]);
        map.clear_eviction_policy();
        map.insert(11, 11);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_eviction_keeps_new_entry() {
        let mut map = LinkedHashMap::new();
        map.set_eviction_policy(|_: &i32, _: &i32, _| true);
        map.insert(1, 1);
        assert_eq!(keys(&map), vec![1]);
        map.insert(2, 2);
        assert_eq!(keys(&map), vec![2]);
    }

    #[test]
    fn test_cursor_in_order() {
        let mut map: LinkedHashMap<_, _> = [(3, 'c'), (1, 'a'), (2, 'b')].iter().cloned().collect();
        let mut cursor = map.cursor();
        let mut seen = Vec::new();
        while let Some((&k, &v)) = cursor.next(&map).unwrap() {
            seen.push(v);
            if k == 1 {
                assert_eq!(cursor.remove(&mut map).unwrap(), (1, 'a'));
            }
        }
        assert_eq!(seen, vec!['c', 'a', 'b']);
        assert_eq!(keys(&map), vec![3, 2]);
    }

    #[test]
    fn test_access_breaks_cursor() {
        let mut map = LinkedHashMap::with_order(LinkOrder::Access);
        map.insert(1, 1);
        map.insert(2, 2);
        let mut cursor = map.cursor();
        cursor.next(&map).unwrap();
        map.get(&1);
        assert!(cursor.next(&map).is_err());
    }
}
