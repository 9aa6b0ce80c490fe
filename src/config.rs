//! Sizing policy shared by every hash-based collection in the crate.

use crate::error::{CollectionError, Result};

/// Capacity used when none is given. Always a power of two.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1 << 4;

/// Largest bin count a table will grow to.
pub const MAXIMUM_CAPACITY: usize = 1 << 30;

pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// A chain longer than this is turned into a tree bin.
pub const TREEIFY_THRESHOLD: usize = 8;

/// A tree bin holding this many entries or fewer goes back to a chain.
pub const UNTREEIFY_THRESHOLD: usize = 6;

/// Below this capacity a long chain triggers a resize instead of a treeify.
pub const MIN_TREEIFY_CAPACITY: usize = 64;

/// Smallest power of two `>= cap`, clamped to `[1, MAXIMUM_CAPACITY]`.
#[inline]
pub fn table_size_for(cap: usize) -> usize {
    if cap >= MAXIMUM_CAPACITY {
        MAXIMUM_CAPACITY
    } else {
        cap.max(1).next_power_of_two()
    }
}

/// Iteration order kept by the linked collections.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkOrder {
    /// Entries stay where they were first inserted.
    #[default]
    Insertion,
    /// Every successful lookup or update moves the entry to the back.
    Access,
}

/// Construction parameters of a hash table.
///
/// # Examples
///
/// ```
/// use hash_bin::config::TableConfig;
/// use hash_bin::hash_map::HashMap;
///
/// let config = TableConfig::new().initial_capacity(100).load_factor(0.5);
/// let map: HashMap<u32, u32> = HashMap::with_config(config).unwrap();
/// assert_eq!(map.capacity(), 128);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub load_factor: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Checks the load factor. Capacities above `MAXIMUM_CAPACITY` are
    /// clamped rather than rejected.
    pub fn validate(&self) -> Result<()> {
        if !(self.load_factor > 0.0) || !self.load_factor.is_finite() {
            return Err(CollectionError::InvalidArgument {
                name: "load factor",
                reason: self.load_factor.to_string(),
            });
        }
        Ok(())
    }

    /// Bin count of the first allocation.
    #[inline]
    pub(crate) fn table_size(&self) -> usize {
        table_size_for(self.initial_capacity)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_table_size_for() {
        assert_eq!(table_size_for(0), 1);
        assert_eq!(table_size_for(1), 1);
        assert_eq!(table_size_for(3), 4);
        assert_eq!(table_size_for(16), 16);
        assert_eq!(table_size_for(17), 32);
        assert_eq!(table_size_for(usize::MAX), MAXIMUM_CAPACITY);
    }

    #[test]
    fn test_validate() {
        assert!(TableConfig::new().validate().is_ok());
        assert!(TableConfig::new().load_factor(0.0).validate().is_err());
        assert!(TableConfig::new().load_factor(-0.5).validate().is_err());
        assert!(TableConfig::new().load_factor(f32::NAN).validate().is_err());
        assert!(TableConfig::new()
            .load_factor(f32::INFINITY)
            .validate()
            .is_err());
        assert!(TableConfig::new().load_factor(4.0).validate().is_ok());
    }
}
