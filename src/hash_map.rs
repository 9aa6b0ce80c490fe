use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash};
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::mem;
use std::ops::Index;

use fnv::FnvBuildHasher as RandomState;

use crate::collection::{Container, Lookup};
use crate::config::TableConfig;
use crate::error::Result;
use crate::fastbin::SlotIdx;
use crate::hash_table::{make_hash, BinKind, Comparator, HashTable, HashUint, RawCursor, RawIntoIter,
                        RawIter, RawIterMut, TableStats};

/// A hash map which escalates crowded bins into red-black trees.
///
/// Keys are spread over a power-of-two number of bins. A bin starts as a
/// chain; once more than eight keys collide in it and the table has at least
/// 64 bins, the chain is rebuilt as a red-black tree ordered by hash. A
/// flood of colliding keys therefore costs O(log n) per lookup instead of
/// O(n). Smaller tables double instead of treeifying, and a tree that drops
/// to six entries goes back to being a chain.
///
/// The table doubles once it holds more than `capacity * load_factor`
/// entries. Bins are allocated lazily on the first insert.
///
/// Iteration order is unspecified. It follows the bins, so it changes when
/// the table resizes. Use [`LinkedHashMap`] for a stable order.
///
/// [`LinkedHashMap`]: ../linked_hash_map/struct.LinkedHashMap.html
///
/// # Examples
///
/// ```
/// use hash_bin::hash_map::HashMap;
///
/// // type inference lets us omit an explicit type signature (which
/// // would be `HashMap<&str, &str>` in this example).
/// let mut book_reviews = HashMap::new();
///
/// // review some books.
/// book_reviews.insert("Adventures of Huckleberry Finn",    "My favorite book.");
/// book_reviews.insert("Grimms' Fairy Tales",               "Masterpiece.");
/// book_reviews.insert("Pride and Prejudice",               "Very enjoyable.");
/// book_reviews.insert("The Adventures of Sherlock Holmes", "Eye lyked it alot.");
///
/// // check for a specific one.
/// if !book_reviews.contains_key("Les Misérables") {
///     println!("We've got {} reviews, but Les Misérables ain't one.",
///              book_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// book_reviews.remove("The Adventures of Sherlock Holmes");
///
/// // look up the values associated with some keys.
/// let to_find = ["Pride and Prejudice", "Alice's Adventure in Wonderland"];
/// for book in &to_find {
///     match book_reviews.get(book) {
///         Some(review) => println!("{}: {}", book, review),
///         None => println!("{} is unreviewed.", book)
///     }
/// }
///
/// // iterate over everything.
/// for (book, review) in &book_reviews {
///     println!("{}: \"{}\"", book, review);
/// }
/// ```
///
/// `HashMap` also implements an [`Entry API`](#method.entry), which allows
/// for more complex methods of getting, setting, updating and removing keys and
/// their values:
///
/// ```
/// use hash_bin::hash_map::HashMap;
///
/// // type inference lets us omit an explicit type signature (which
/// // would be `HashMap<&str, u8>` in this example).
/// let mut player_stats = HashMap::new();
///
/// fn random_stat_buff() -> u8 {
///     // could actually return some random value here - let's just return
///     // some fixed value for now
///     42
/// }
///
/// // insert a key only if it doesn't already exist
/// player_stats.entry("health").or_insert(100);
///
/// // insert a key using a function that provides a new value only if it
/// // doesn't already exist
/// player_stats.entry("defence").or_insert_with(random_stat_buff);
///
/// // update a key, guarding against the key possibly not being set
/// let stat = player_stats.entry("attack").or_insert(100);
/// *stat += random_stat_buff();
/// assert_eq!(player_stats["attack"], 142);
/// ```
///
/// A `HashMap` with fixed list of elements can be initialized from an array:
///
/// ```
/// use hash_bin::hash_map::HashMap;
///
/// let timber_resources: HashMap<&str, i32> =
///     [("Norway", 100),
///      ("Denmark", 50),
///      ("Iceland", 10)]
///      .iter().cloned().collect();
/// assert_eq!(timber_resources.len(), 3);
/// ```
pub struct HashMap<K, V, S = RandomState> {
    table: HashTable<K, V>,
    hash_builder: S,
}

/// An iterator over the (key, value) of a `HashMap`.
pub struct Iter<'a, K: 'a, V: 'a> {
    inner: RawIter<'a, K, V>,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|node| (&node.key, &node.value))
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// A mutable iterator over the (key, value) of a `HashMap`.
pub struct IterMut<'a, K: 'a, V: 'a> {
    inner: RawIterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.inner.next().map(|node| (&node.key, &mut node.value))
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// An iterator over the keys of a `HashMap`.
///
/// This `struct` is created by the [`keys`] method on [`HashMap`]. See its
/// documentation for more.
///
/// [`keys`]: struct.HashMap.html#method.keys
/// [`HashMap`]: struct.HashMap.html
pub struct Keys<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// An iterator over the values of a `HashMap`.
///
/// This `struct` is created by the [`values`] method on [`HashMap`]. See its
/// documentation for more.
///
/// [`values`]: struct.HashMap.html#method.values
/// [`HashMap`]: struct.HashMap.html
pub struct Values<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

/// A mutable iterator over the values of a `HashMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`HashMap`]. See its
/// documentation for more.
///
/// [`values_mut`]: struct.HashMap.html#method.values_mut
/// [`HashMap`]: struct.HashMap.html
pub struct ValuesMut<'a, K: 'a, V: 'a> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}

/// An owning iterator over the entries of a `HashMap`.
pub struct IntoIter<K, V> {
    inner: RawIntoIter<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// A draining iterator over the entries of a `HashMap`.
///
/// The map is already empty when the iterator is handed out; entries not
/// consumed are dropped with it.
pub struct Drain<'a, K: 'a, V: 'a> {
    inner: RawIntoIter<K, V>,
    marker: PhantomData<&'a mut HashTable<K, V>>,
}

impl<'a, K, V> Iterator for Drain<'a, K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Drain<'a, K, V> {}

/// A detached position in a `HashMap`.
///
/// Unlike [`Iter`], a cursor does not borrow the map, so the map may be
/// changed between two steps. Any structural change not made through the
/// cursor itself is reported as
/// [`CollectionError::ConcurrentModification`] by the next call.
///
/// [`Iter`]: struct.Iter.html
/// [`CollectionError::ConcurrentModification`]: ../error/enum.CollectionError.html
///
/// # Examples
///
/// ```
/// use hash_bin::hash_map::HashMap;
///
/// let mut map: HashMap<u32, u32> = (0..8).map(|i| (i, i * 10)).collect();
/// let mut cursor = map.cursor();
/// while let Some((&k, _)) = cursor.next(&map).unwrap() {
///     if k % 2 == 0 {
///         cursor.remove(&mut map).unwrap();
///     }
/// }
/// assert_eq!(map.len(), 4);
///
/// let mut cursor = map.cursor();
/// cursor.next(&map).unwrap();
/// map.insert(100, 1000);
/// assert!(cursor.next(&map).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    raw: RawCursor,
}

impl Cursor {
    /// Advances and returns the next entry, or `None` once exhausted.
    pub fn next<'a, K, V, S>(&mut self, map: &'a HashMap<K, V, S>) -> Result<Option<(&'a K, &'a V)>> {
        let idx = map.table.cursor_next(&mut self.raw)?;
        Ok(idx.map(|idx| {
            let node = map.table.node(idx);
            (&node.key, &node.value)
        }))
    }

    /// Removes the entry last returned by [`next`](#method.next).
    ///
    /// Fails with `IllegalState` when there is no such entry, for instance
    /// when called twice in a row.
    pub fn remove<K, V, S>(&mut self, map: &mut HashMap<K, V, S>) -> Result<(K, V)> {
        map.table.cursor_remove(&mut self.raw)
    }
}

/// A view into a single entry in a map, which may either be vacant or occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`HashMap`].
///
/// [`HashMap`]: struct.HashMap.html
/// [`entry`]: struct.HashMap.html#method.entry
pub enum Entry<'a, K: 'a, V: 'a> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),

    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Returns a reference to this entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    pub fn key(&self) -> &K {
        match *self {
            Entry::Occupied(ref entry) => entry.key(),
            Entry::Vacant(ref entry) => entry.key(),
        }
    }

    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// assert_eq!(map["poneyland"], 12);
    ///
    /// *map.entry("poneyland").or_insert(12) += 10;
    /// assert_eq!(map["poneyland"], 22);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default function if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map: HashMap<&str, String> = HashMap::new();
    /// let s = "hoho".to_string();
    ///
    /// map.entry("poneyland").or_insert_with(|| s);
    ///
    /// assert_eq!(map["poneyland"], "hoho".to_string());
    /// ```
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Like [`or_insert_with`](#method.or_insert_with), but the function
    /// receives the key.
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    ///
    /// map.entry("poneyland")
    ///    .and_modify(|e| { *e += 1 })
    ///    .or_insert(42);
    /// assert_eq!(map["poneyland"], 42);
    ///
    /// map.entry("poneyland")
    ///    .and_modify(|e| { *e += 1 })
    ///    .or_insert(42);
    /// assert_eq!(map["poneyland"], 43);
    /// ```
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
    /// Ensures a value is in the entry by inserting the default value if empty,
    /// and returns a mutable reference to the value in the entry.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A view into an occupied entry in a `HashMap`.
/// It is part of the [`Entry`] enum.
///
/// [`Entry`]: enum.Entry.html
pub struct OccupiedEntry<'a, K: 'a, V: 'a> {
    pub(crate) idx: SlotIdx,
    pub(crate) table: &'a mut HashTable<K, V>,
}

/// A view into a vacant entry in a `HashMap`.
/// It is part of the [`Entry`] enum.
///
/// [`Entry`]: enum.Entry.html
pub struct VacantEntry<'a, K: 'a, V: 'a> {
    hash: HashUint,
    key: K,
    table: &'a mut HashTable<K, V>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.table.node(self.idx).key
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.table.node(self.idx).value
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// If you need a reference to the `OccupiedEntry` which may outlive the
    /// destruction of the `Entry` value, see [`into_mut`].
    ///
    /// [`into_mut`]: #method.into_mut
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.node_mut(self.idx).value
    }

    /// Converts the entry into a mutable reference to its value, bound to
    /// the lifetime of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::{HashMap, Entry};
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     *o.into_mut() += 10;
    /// }
    /// assert_eq!(map["poneyland"], 22);
    /// ```
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.node_mut(self.idx).value
    }

    /// Sets the value of the entry, and returns the entry's old value.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Take the ownership of the key and value from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::{HashMap, Entry};
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     // We delete the entry from the map.
    ///     o.remove_entry();
    /// }
    ///
    /// assert_eq!(map.contains_key("poneyland"), false);
    /// ```
    pub fn remove_entry(self) -> (K, V) {
        self.table.erase(self.idx)
    }

    /// Takes the value out of the entry, and returns it.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value
    /// through the `VacantEntry`.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the VacantEntry's key,
    /// and returns a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::{HashMap, Entry};
    ///
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    ///
    /// if let Entry::Vacant(o) = map.entry("poneyland") {
    ///     o.insert(37);
    /// }
    /// assert_eq!(map["poneyland"], 37);
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let (idx, table) = self.insert_slot(value);
        &mut table.node_mut(idx).value
    }

    pub(crate) fn insert_slot(self, value: V) -> (SlotIdx, &'a mut HashTable<K, V>) {
        let idx = self.table.insert_new(self.hash, self.key, value);
        (idx, self.table)
    }
}

impl<K, V, S> HashMap<K, V, S> {
    pub(crate) fn from_parts(table: HashTable<K, V>, hash_builder: S) -> Self {
        HashMap {
            table,
            hash_builder,
        }
    }

    #[inline]
    pub(crate) fn raw(&self) -> &HashTable<K, V> {
        &self.table
    }

    #[inline]
    pub(crate) fn raw_mut(&mut self) -> &mut HashTable<K, V> {
        &mut self.table
    }

    /// Creates an empty `HashMap` which will use the given hash builder to hash
    /// keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::hash_map::RandomState;
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let s = RandomState::new();
    /// let mut map = HashMap::with_hasher(s);
    /// map.insert(1, 2);
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::from_parts(HashTable::new(&TableConfig::default(), false), hash_builder)
    }

    /// Creates an empty `HashMap` with room for `capacity` bins, using
    /// `hash_builder` to hash the keys.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let config = TableConfig::new().initial_capacity(capacity);
        Self::from_parts(HashTable::new(&config, false), hash_builder)
    }

    /// Creates an empty `HashMap` from a validated `TableConfig`.
    ///
    /// Fails with `InvalidArgument` on a load factor that is not a positive
    /// finite number.
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(HashTable::new(&config, false), hash_builder))
    }

    /// Returns a reference to the map's `BuildHasher`.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the number of bins, including before the first allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    /// let map: HashMap<i32, i32> = HashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 128);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// Occupancy of the bins: how many are chains, how many are trees and
    /// how long the worst of each is.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let map: HashMap<u32, u32> = (0..100).map(|i| (i, i)).collect();
    /// let stats = map.stats();
    /// assert_eq!(stats.len, 100);
    /// assert_eq!(stats.capacity, 256);
    /// assert_eq!(stats.tree_bins, 0);
    /// ```
    pub fn stats(&self) -> TableStats {
        self.table.stats()
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut a = HashMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the map contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Clears the map, removing all key-value pairs. Keeps the allocated
    /// bins for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut a = HashMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// An iterator visiting all key-value pairs in bin order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// for (key, val) in map.iter() {
    ///     println!("key: {} val: {}", key, val);
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// An iterator visiting all key-value pairs, with mutable references to
    /// the values.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// // Update all values
    /// for (_, val) in map.iter_mut() {
    ///     *val *= 2;
    /// }
    /// assert_eq!(map["b"], 4);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// An iterator visiting all keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// assert_eq!(map.values().sum::<i32>(), 6);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// An iterator visiting all values mutably.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Clears the map, returning all key-value pairs as an iterator. Keeps the
    /// allocated bins for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut a = HashMap::new();
    /// a.insert(1, "a");
    /// a.insert(2, "b");
    ///
    /// for (k, v) in a.drain().take(1) {
    ///     assert!(k == 1 || k == 2);
    ///     assert!(v == "a" || v == "b");
    /// }
    ///
    /// assert!(a.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.take().into_iter(),
            marker: PhantomData,
        }
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map: HashMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert_eq!(map.len(), 4);
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.table.retain(f);
    }

    /// Returns a cursor positioned before the first entry.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            raw: self.table.cursor(),
        }
    }

    /// Shrinks the bins as much as possible while keeping the load factor.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map: HashMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
    /// map.retain(|&k, _| k < 3);
    /// map.shrink_to_fit();
    /// assert_eq!(map.capacity(), 4);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Orders keys with identical hashes inside tree bins, so that lookups
    /// through [`entry`] and [`insert`] descend one side of the tree instead
    /// of searching both. Existing tree bins are rebuilt.
    ///
    /// The comparator must be consistent with `Eq`.
    ///
    /// [`entry`]: #method.entry
    /// [`insert`]: #method.insert
    pub fn with_comparator(mut self, comparator: Comparator<K>) -> Self {
        self.table.set_comparator(Some(comparator));
        self
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    pub(crate) fn hash_of<Q: ?Sized + Hash>(&self, q: &Q) -> HashUint {
        make_hash(&self.hash_builder, q)
    }

    #[inline]
    pub(crate) fn find<Q: ?Sized>(&self, q: &Q) -> Option<SlotIdx>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.table.find(self.hash_of(q), q)
    }

    /// Gets the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut letters = HashMap::new();
    ///
    /// for ch in "a short treatise on fungi".chars() {
    ///     let counter = letters.entry(ch).or_insert(0);
    ///     *counter += 1;
    /// }
    ///
    /// assert_eq!(letters[&'s'], 2);
    /// assert_eq!(letters[&'t'], 3);
    /// assert_eq!(letters[&'u'], 1);
    /// assert_eq!(letters.get(&'y'), None);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash_of(&key);
        match self.table.find_key(hash, &key) {
            Some(idx) => Entry::Occupied(OccupiedEntry {
                idx,
                table: &mut self.table,
            }),
            None => Entry::Vacant(VacantEntry {
                hash,
                key,
                table: &mut self.table,
            }),
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q: ?Sized>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.find(q).map(|idx| &self.table.node(idx).value)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q: ?Sized>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.find(q).map(|idx| {
            let node = self.table.node(idx);
            (&node.key, &node.value)
        })
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        match self.find(q) {
            Some(idx) => Some(&mut self.table.node_mut(idx).value),
            None => None,
        }
    }

    /// Returns true if the map contains a value for the specified key.
    pub fn contains_key<Q: ?Sized>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.find(q).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned. The key is not updated, though.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_of(&key);
        self.table.insert(hash, key, value).1
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value.
    pub fn remove_entry<Q: ?Sized>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.find(q).map(|idx| self.table.erase(idx))
    }

    /// Reserves room for at least `additional` more entries without a
    /// resize.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// map.reserve(10);
    /// assert_eq!(map.capacity(), 16);
    /// map.reserve(100);
    /// assert_eq!(map.capacity(), 256);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Whether the bin `key` hashes to is empty, a chain or a tree.
    pub fn bin_kind<Q: ?Sized + Hash>(&self, key: &Q) -> BinKind
    where
        K: Borrow<Q>,
    {
        self.table.bin_kind(self.hash_of(key))
    }
}

impl<K, V> HashMap<K, V, RandomState> {
    /// Creates an empty `HashMap`.
    ///
    /// The bins are not allocated until it is first inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    /// let mut map: HashMap<&str, i32> = HashMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(RandomState::default())
    }

    /// Creates an empty `HashMap` whose first allocation holds
    /// `capacity.next_power_of_two()` bins.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }

    /// Creates an empty `HashMap` from a `TableConfig`.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, RandomState::default())
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Clone for HashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self::from_parts(self.table.clone(), self.hash_builder.clone())
    }
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &HashMap<K, V, S>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(key, value)| other.get(key).map_or(false, |v| *value == *v))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<'a, K, Q: ?Sized, V, S> Index<&'a Q> for HashMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the `HashMap`.
    #[inline]
    fn index(&self, index: &Q) -> &V {
        self.get(index).expect("no entry found for key")
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        let reserve = if self.is_empty() {
            iter.size_hint().0
        } else {
            (iter.size_hint().0 + 1) / 2
        };
        self.reserve(reserve);
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for HashMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> HashMap<K, V, S> {
        let mut map = HashMap::with_hasher(Default::default());
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Creates a consuming iterator, that is, one that moves each key-value
    /// pair out of the map in arbitrary order. The map cannot be used after
    /// calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_bin::hash_map::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// map.insert("c", 3);
    ///
    /// let mut vec: Vec<(&str, i32)> = map.into_iter().collect();
    /// vec.sort();
    /// assert_eq!(vec, [("a", 1), ("b", 2), ("c", 3)]);
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<K, V, S> Container for HashMap<K, V, S> {
    fn len(&self) -> usize {
        self.table.len()
    }
}

impl<K, Q: ?Sized, V, S> Lookup<Q> for HashMap<K, V, S>
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
    use crate::config::MIN_TREEIFY_CAPACITY;
    use std::cell::RefCell;
    use std::hash::Hasher;

    thread_local! { static DROP_VECTOR: RefCell<Vec<i32>> = RefCell::new(Vec::new()) }

    #[derive(Hash, PartialEq, Eq)]
    struct Dropable {
        k: usize,
    }

    impl Dropable {
        fn new(k: usize) -> Dropable {
            DROP_VECTOR.with(|slot| {
                slot.borrow_mut()[k] += 1;
            });

            Dropable { k }
        }
    }

    impl Drop for Dropable {
        fn drop(&mut self) {
            DROP_VECTOR.with(|slot| {
                slot.borrow_mut()[self.k] -= 1;
            });
        }
    }

    impl Clone for Dropable {
        fn clone(&self) -> Dropable {
            Dropable::new(self.k)
        }
    }

    /// Every key of this type lands in bin 0.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Collide(u32);

    impl Hash for Collide {
        fn hash<H: Hasher>(&self, state: &mut H) {
            state.write_u32(0);
        }
    }

    #[test]
    fn test_drops() {
        DROP_VECTOR.with(|slot| {
            *slot.borrow_mut() = vec![0; 200];
        });

        {
            let mut m = HashMap::new();

            DROP_VECTOR.with(|v| {
                for i in 0..200 {
                    assert_eq!(v.borrow()[i], 0);
                }
            });

            for i in 0..100 {
                let d1 = Dropable::new(i);
                let d2 = Dropable::new(i + 100);
                m.insert(d1, d2);
            }

            DROP_VECTOR.with(|v| {
                for i in 0..200 {
                    assert_eq!(v.borrow()[i], 1);
                }
            });

            for i in 0..50 {
                let k = Dropable::new(i);
                let v = m.remove(&k);

                assert!(v.is_some());

                DROP_VECTOR.with(|v| {
                    assert_eq!(v.borrow()[i], 1);
                    assert_eq!(v.borrow()[i + 100], 1);
                });
            }

            DROP_VECTOR.with(|v| {
                for i in 0..50 {
                    assert_eq!(v.borrow()[i], 0);
                    assert_eq!(v.borrow()[i + 100], 0);
                }

                for i in 50..100 {
                    assert_eq!(v.borrow()[i], 1);
                    assert_eq!(v.borrow()[i + 100], 1);
                }
            });
        }

        DROP_VECTOR.with(|v| {
            for i in 0..200 {
                assert_eq!(v.borrow()[i], 0);
            }
        });
    }

    #[test]
    fn test_into_iter_drops() {
        DROP_VECTOR.with(|v| {
            *v.borrow_mut() = vec![0; 200];
        });

        let hm = {
            let mut hm = HashMap::new();
            for i in 0..100 {
                let d1 = Dropable::new(i);
                let d2 = Dropable::new(i + 100);
                hm.insert(d1, d2);
            }
            hm
        };

        // By the way, ensure that cloning doesn't screw up the dropping.
        drop(hm.clone());

        {
            let mut half = hm.into_iter().take(50);

            DROP_VECTOR.with(|v| {
                for i in 0..200 {
                    assert_eq!(v.borrow()[i], 1);
                }
            });

            for _ in half.by_ref() {}

            DROP_VECTOR.with(|v| {
                let nk = (0..100).filter(|&i| v.borrow()[i] == 1).count();
                let nv = (0..100).filter(|&i| v.borrow()[i + 100] == 1).count();
                assert_eq!(nk, 50);
                assert_eq!(nv, 50);
            });
        };

        DROP_VECTOR.with(|v| {
            for i in 0..200 {
                assert_eq!(v.borrow()[i], 0);
            }
        });
    }

    #[test]
    fn test_empty_remove() {
        let mut m: HashMap<i32, bool> = HashMap::new();
        assert_eq!(m.remove(&0), None);
        assert_eq!(m.stats().chain_bins, 0);
    }

    #[test]
    fn test_lots_of_insertions() {
        let mut m = HashMap::new();

        for _ in 0..10 {
            assert!(m.is_empty());

            for i in 1..1001 {
                assert!(m.insert(i, i).is_none());

                for j in 1..i + 1 {
                    let r = m.get(&j);
                    assert_eq!(r, Some(&j));
                }
            }

            for i in 1001..2001 {
                assert!(!m.contains_key(&i));
            }

            for i in 1..1001 {
                assert!(m.remove(&i).is_some());
                assert!(!m.contains_key(&i));
            }
        }
    }

    #[test]
    fn test_find_mut() {
        let mut m = HashMap::new();
        assert!(m.insert(1, 12).is_none());
        assert!(m.insert(2, 8).is_none());
        assert!(m.insert(5, 14).is_none());
        let new = 100;
        match m.get_mut(&5) {
            None => panic!(),
            Some(x) => *x = new,
        }
        assert_eq!(m.get(&5), Some(&new));
    }

    #[test]
    fn test_insert_keeps_first_key() {
        let mut m = HashMap::new();
        m.insert(String::from("k"), 1);
        let first = m.get_key_value("k").map(|(k, _)| k.as_ptr());
        assert_eq!(m.insert(String::from("k"), 2), Some(1));
        assert_eq!(m.get_key_value("k").map(|(k, _)| k.as_ptr()), first);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_entry() {
        let xs = [(1, 10), (2, 20), (3, 30), (4, 40), (5, 50), (6, 60)];

        let mut map: HashMap<_, _> = xs.iter().cloned().collect();

        // Existing key (insert)
        match map.entry(1) {
            Entry::Vacant(_) => unreachable!(),
            Entry::Occupied(mut view) => {
                assert_eq!(view.get(), &10);
                assert_eq!(view.insert(100), 10);
            }
        }
        assert_eq!(map.get(&1).unwrap(), &100);
        assert_eq!(map.len(), 6);

        // Existing key (update)
        match map.entry(2) {
            Entry::Vacant(_) => unreachable!(),
            Entry::Occupied(mut view) => {
                let v = view.get_mut();
                let new_v = (*v) * 10;
                *v = new_v;
            }
        }
        assert_eq!(map.get(&2).unwrap(), &200);
        assert_eq!(map.len(), 6);

        // Existing key (take)
        match map.entry(3) {
            Entry::Vacant(_) => unreachable!(),
            Entry::Occupied(view) => {
                assert_eq!(view.remove(), 30);
            }
        }
        assert_eq!(map.get(&3), None);
        assert_eq!(map.len(), 5);

        // Inexistent key (insert)
        match map.entry(10) {
            Entry::Occupied(_) => unreachable!(),
            Entry::Vacant(view) => {
                assert_eq!(*view.insert(1000), 1000);
            }
        }
        assert_eq!(map.get(&10).unwrap(), &1000);
        assert_eq!(map.len(), 6);

        *map.entry(11).or_default() += 5;
        assert_eq!(map[&11], 5);
        assert_eq!(*map.entry(12).or_insert_with_key(|k| k * 2), 24);
    }

    #[test]
    fn test_retain() {
        let mut map: HashMap<i32, i32> = (0..100).map(|x| (x, x * 10)).collect();

        map.retain(|&k, _| k % 2 == 0);
        assert_eq!(map.len(), 50);
        assert_eq!(map[&2], 20);
        assert_eq!(map[&4], 40);
        assert_eq!(map[&6], 60);
    }

    #[test]
    fn test_drain_keeps_capacity() {
        let mut map: HashMap<i32, i32> = (0..100).map(|x| (x, x)).collect();
        let capacity = map.capacity();
        let mut drained: Vec<i32> = map.drain().map(|(k, _)| k).collect();
        drained.sort();
        assert_eq!(drained, (0..100).collect::<Vec<_>>());
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        map.insert(1, 1);
        assert_eq!(map[&1], 1);
    }

    #[test]
    fn test_iter_mut_and_values_mut() {
        let mut map: HashMap<i32, i32> = (0..40).map(|x| (x, x)).collect();
        for (k, v) in map.iter_mut() {
            *v += *k;
        }
        for v in map.values_mut() {
            *v += 1;
        }
        for k in 0..40 {
            assert_eq!(map[&k], 2 * k + 1);
        }
        assert_eq!(map.keys().count(), 40);
        assert_eq!(map.values().len(), 40);
    }

    #[test]
    fn test_colliding_keys_become_tree() {
        let mut map = HashMap::with_capacity(MIN_TREEIFY_CAPACITY);
        for i in 0..20 {
            map.insert(Collide(i), i);
        }
        assert_eq!(map.bin_kind(&Collide(0)), BinKind::Tree);
        assert_eq!(map.stats().largest_tree, 20);
        for i in 0..20 {
            assert_eq!(map[&Collide(i)], i);
        }
        for i in 0..14 {
            assert_eq!(map.remove(&Collide(i)), Some(i));
        }
        assert_eq!(map.bin_kind(&Collide(0)), BinKind::Chain);
        for i in 14..20 {
            assert_eq!(map[&Collide(i)], i);
        }
    }

    #[test]
    fn test_comparator_lookup() {
        let mut map = HashMap::with_capacity(MIN_TREEIFY_CAPACITY);
        for i in 0..30 {
            map.insert(Collide(i), i);
        }
        let mut map = map.with_comparator(|a: &Collide, b: &Collide| a.0.cmp(&b.0));
        for i in 30..60 {
            map.insert(Collide(i), i);
        }
        for i in 0..60 {
            assert_eq!(map.insert(Collide(i), i + 1), Some(i));
        }
        assert_eq!(map.len(), 60);
        match map.entry(Collide(59)) {
            Entry::Occupied(o) => assert_eq!(*o.get(), 60),
            Entry::Vacant(_) => unreachable!(),
        }
    }

    #[test]
    fn test_eq_and_debug() {
        let mut m1 = HashMap::new();
        m1.insert(1, 2);
        m1.insert(2, 3);
        m1.insert(3, 4);

        let mut m2 = HashMap::new();
        m2.insert(1, 2);
        m2.insert(2, 3);

        assert!(m1 != m2);

        m2.insert(3, 4);

        assert_eq!(m1, m2);

        let mut one = HashMap::new();
        one.insert(1, 2);
        assert_eq!(format!("{:?}", one), "{1: 2}");
        let empty: HashMap<i32, i32> = HashMap::new();
        assert_eq!(format!("{:?}", empty), "{}");
    }

    #[test]
    fn test_invalid_config() {
        let config = TableConfig::new().load_factor(0.0);
        assert!(HashMap::<i32, i32>::with_config(config).is_err());
    }

    #[test]
    fn test_extend_ref() {
        let mut a = HashMap::new();
        a.insert(1, "one");
        let mut b = HashMap::new();
        b.insert(2, "two");
        b.insert(3, "three");

        a.extend(&b);

        assert_eq!(a.len(), 3);
        assert_eq!(a[&1], "one");
        assert_eq!(a[&2], "two");
        assert_eq!(a[&3], "three");
    }
}
