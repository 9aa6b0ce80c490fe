//! Hash maps and sets whose crowded bins turn into red-black trees, plus a
//! binary-heap priority queue.
//!
//! Every map and set here stores its entries in one slot arena. A bin starts
//! as a chain threaded through that arena; once a chain grows past eight
//! entries in a table of at least 64 bins it is rebuilt as a red-black tree,
//! so even keys whose hashes all collide are found in logarithmic time.
//!
//! ```
//! use hash_bin::{HashMap, LinkOrder, LinkedHashMap};
//!
//! let mut map = HashMap::new();
//! map.insert("a", 1);
//! assert_eq!(map.get("a"), Some(&1));
//!
//! let mut lru = LinkedHashMap::with_order(LinkOrder::Access);
//! lru.insert(1, "one");
//! lru.insert(2, "two");
//! lru.get(&1);
//! assert_eq!(lru.keys().cloned().collect::<Vec<_>>(), vec![2, 1]);
//! ```

mod fastbin;
mod hash_table;
mod list;
mod rb_node;

pub mod collection;
pub mod config;
pub mod error;
pub mod hash_map;
pub mod hash_set;
pub mod linked_hash_map;
pub mod linked_hash_set;
pub mod priority_queue;

#[cfg(feature = "serde")]
mod serde_impls;

pub use crate::config::{LinkOrder, TableConfig};
pub use crate::error::{CollectionError, Result};
pub use crate::hash_map::HashMap;
pub use crate::hash_set::HashSet;
pub use crate::hash_table::{BinKind, Comparator, TableStats};
pub use crate::linked_hash_map::LinkedHashMap;
pub use crate::linked_hash_set::LinkedHashSet;
pub use crate::priority_queue::PriorityQueue;
