//! The legacy sequence form of the collections.
//!
//! Hash tables write `[capacity, load_factor, len, ...]` followed by their
//! contents in iteration order: key and value alternating for maps, one item
//! after another for sets. Reading validates and restores the load factor. The
//! stored capacity and length are untrusted: the table starts at the default
//! capacity and grows to fit the entries actually read. A priority queue is a
//! plain sequence in heap array order.

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, Error as _, SeqAccess, Visitor};
use serde::ser::{Error as _, Serialize, SerializeSeq, Serializer};

use crate::config::{LinkOrder, TableConfig};
use crate::hash_map::HashMap;
use crate::hash_set::HashSet;
use crate::linked_hash_map::LinkedHashMap;
use crate::linked_hash_set::LinkedHashSet;
use crate::priority_queue::PriorityQueue;

const HEADER_LEN: usize = 3;

fn write_header<M: SerializeSeq>(
    seq: &mut M,
    capacity: usize,
    load_factor: f32,
    len: usize,
) -> Result<(), M::Error> {
    let capacity = u32::try_from(capacity).map_err(M::Error::custom)?;
    let len = u32::try_from(len).map_err(M::Error::custom)?;
    seq.serialize_element(&capacity)?;
    seq.serialize_element(&load_factor)?;
    seq.serialize_element(&len)
}

/// A table that can be rebuilt from the legacy form.
trait LegacyTable<'de>: Sized {
    const EXPECTING: &'static str;

    fn with_config(config: TableConfig) -> crate::error::Result<Self>;

    /// Reads one entry. `Ok(false)` when the sequence ended first.
    fn read_entry<A: SeqAccess<'de>>(&mut self, seq: &mut A) -> Result<bool, A::Error>;
}

struct LegacyVisitor<C> {
    marker: PhantomData<C>,
}

impl<C> LegacyVisitor<C> {
    fn new() -> Self {
        LegacyVisitor {
            marker: PhantomData,
        }
    }
}

impl<'de, C> Visitor<'de> for LegacyVisitor<C>
where
    C: LegacyTable<'de>,
{
    type Value = C;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(C::EXPECTING)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<C, A::Error>
    where
        A: SeqAccess<'de>,
    {
        // only checked for shape, sizing follows the entries
        let _capacity: u32 = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(0, &self))?;
        let load_factor: f32 = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(1, &self))?;
        let len: u32 = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(2, &self))?;

        let config = TableConfig::new().load_factor(load_factor);
        let mut table = C::with_config(config).map_err(A::Error::custom)?;
        for read in 0..len {
            if !table.read_entry(&mut seq)? {
                return Err(A::Error::custom(format_args!(
                    "expected {} entries, found {}",
                    len, read
                )));
            }
        }
        Ok(table)
    }
}

fn read_pair<'de, K, V, A>(seq: &mut A) -> Result<Option<(K, V)>, A::Error>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    A: SeqAccess<'de>,
{
    let key = match seq.next_element()? {
        Some(key) => key,
        None => return Ok(None),
    };
    let value = seq
        .next_element()?
        .ok_or_else(|| A::Error::custom("key without a value"))?;
    Ok(Some((key, value)))
}

impl<K, V, S> Serialize for HashMap<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        let mut seq = serializer.serialize_seq(Some(HEADER_LEN + 2 * self.len()))?;
        write_header(&mut seq, self.capacity(), self.load_factor(), self.len())?;
        for (key, value) in self {
            seq.serialize_element(key)?;
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, K, V, S> LegacyTable<'de> for HashMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    const EXPECTING: &'static str = "a capacity, load factor and length followed by keys and values";

    fn with_config(config: TableConfig) -> crate::error::Result<Self> {
        HashMap::with_config_and_hasher(config, S::default())
    }

    fn read_entry<A: SeqAccess<'de>>(&mut self, seq: &mut A) -> Result<bool, A::Error> {
        Ok(match read_pair(seq)? {
            Some((key, value)) => {
                self.insert(key, value);
                true
            }
            None => false,
        })
    }
}

impl<'de, K, V, S> Deserialize<'de> for HashMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(LegacyVisitor::new())
    }
}

/// The link order and eviction policy are not written; a restored map
/// iterates in insertion order and evicts nothing.
impl<K, V, S> Serialize for LinkedHashMap<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        let mut seq = serializer.serialize_seq(Some(HEADER_LEN + 2 * self.len()))?;
        write_header(&mut seq, self.capacity(), self.load_factor(), self.len())?;
        for (key, value) in self {
            seq.serialize_element(key)?;
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, K, V, S> LegacyTable<'de> for LinkedHashMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    const EXPECTING: &'static str = "a capacity, load factor and length followed by keys and values";

    fn with_config(config: TableConfig) -> crate::error::Result<Self> {
        LinkedHashMap::with_config_and_hasher(config, LinkOrder::Insertion, S::default())
    }

    fn read_entry<A: SeqAccess<'de>>(&mut self, seq: &mut A) -> Result<bool, A::Error> {
        Ok(match read_pair(seq)? {
            Some((key, value)) => {
                self.insert(key, value);
                true
            }
            None => false,
        })
    }
}

impl<'de, K, V, S> Deserialize<'de> for LinkedHashMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(LegacyVisitor::new())
    }
}

impl<T: Serialize, S> Serialize for HashSet<T, S> {
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        let mut seq = serializer.serialize_seq(Some(HEADER_LEN + self.len()))?;
        write_header(&mut seq, self.capacity(), self.load_factor(), self.len())?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T, S> LegacyTable<'de> for HashSet<T, S>
where
    T: Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    const EXPECTING: &'static str = "a capacity, load factor and length followed by items";

    fn with_config(config: TableConfig) -> crate::error::Result<Self> {
        HashSet::with_config_and_hasher(config, S::default())
    }

    fn read_entry<A: SeqAccess<'de>>(&mut self, seq: &mut A) -> Result<bool, A::Error> {
        Ok(match seq.next_element()? {
            Some(item) => {
                self.insert(item);
                true
            }
            None => false,
        })
    }
}

impl<'de, T, S> Deserialize<'de> for HashSet<T, S>
where
    T: Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(LegacyVisitor::new())
    }
}

impl<T: Serialize, S> Serialize for LinkedHashSet<T, S> {
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        let mut seq = serializer.serialize_seq(Some(HEADER_LEN + self.len()))?;
        write_header(&mut seq, self.capacity(), self.load_factor(), self.len())?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T, S> LegacyTable<'de> for LinkedHashSet<T, S>
where
    T: Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    const EXPECTING: &'static str = "a capacity, load factor and length followed by items";

    fn with_config(config: TableConfig) -> crate::error::Result<Self> {
        LinkedHashSet::with_config_and_hasher(config, S::default())
    }

    fn read_entry<A: SeqAccess<'de>>(&mut self, seq: &mut A) -> Result<bool, A::Error> {
        Ok(match seq.next_element()? {
            Some(item) => {
                self.insert(item);
                true
            }
            None => false,
        })
    }
}

impl<'de, T, S> Deserialize<'de> for LinkedHashSet<T, S>
where
    T: Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(LegacyVisitor::new())
    }
}

impl<T: Serialize, O> Serialize for PriorityQueue<T, O> {
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T> Deserialize<'de> for PriorityQueue<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::deserialize(deserializer).map(PriorityQueue::from)
    }
}
