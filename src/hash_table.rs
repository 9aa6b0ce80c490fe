use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FusedIterator;
use std::mem;

use tracing::{debug, trace};

use crate::config::{self, TableConfig, DEFAULT_INITIAL_CAPACITY, MAXIMUM_CAPACITY,
                    MIN_TREEIFY_CAPACITY, TREEIFY_THRESHOLD, UNTREEIFY_THRESHOLD};
use crate::error::{CollectionError, Result};
use crate::fastbin::{Fastbin, SlotIdx};
use crate::list::{ListHead, ListLinks};
use crate::rb_node::{self, Link, RBNodeBase};

pub type HashUint = usize;

/// Orders keys that share a full hash inside a tree bin.
pub type Comparator<K> = fn(&K, &K) -> Ordering;

#[inline]
pub fn make_hash<T: ?Sized, S>(hash_state: &S, t: &T) -> HashUint
where
    T: Hash,
    S: BuildHasher,
{
    let mut state = hash_state.build_hasher();
    t.hash(&mut state);
    spread(state.finish())
}

/// Folds the high half of the hash into the low bits used for the bin index.
#[inline]
pub fn spread(h: u64) -> HashUint {
    let h = h ^ (h >> 32);
    (h ^ (h >> 16)) as HashUint
}

pub struct HashNode<K, V> {
    pub hash: HashUint,
    pub key: K,
    pub value: V,
    // bin list, used by chains and tree bins
    next: Link,
    prev: Link,
    // tree bin
    left: Link,
    right: Link,
    parent: Link,
    red: bool,
    // order list of the linked variants
    before: Link,
    after: Link,
}

impl<K, V> HashNode<K, V> {
    #[inline]
    fn new(hash: HashUint, key: K, value: V) -> Self {
        HashNode {
            hash,
            key,
            value,
            next: None,
            prev: None,
            left: None,
            right: None,
            parent: None,
            red: false,
            before: None,
            after: None,
        }
    }
}

impl<K, V> RBNodeBase for HashNode<K, V> {
    #[inline]
    fn left(&self) -> Link {
        self.left
    }
    #[inline]
    fn right(&self) -> Link {
        self.right
    }
    #[inline]
    fn parent(&self) -> Link {
        self.parent
    }
    #[inline]
    fn is_red(&self) -> bool {
        self.red
    }
    #[inline]
    fn set_left(&mut self, left: Link) {
        self.left = left;
    }
    #[inline]
    fn set_right(&mut self, right: Link) {
        self.right = right;
    }
    #[inline]
    fn set_parent(&mut self, parent: Link) {
        self.parent = parent;
    }
    #[inline]
    fn set_red(&mut self, red: bool) {
        self.red = red;
    }
}

impl<K, V> ListLinks for HashNode<K, V> {
    #[inline]
    fn before(&self) -> Link {
        self.before
    }
    #[inline]
    fn after(&self) -> Link {
        self.after
    }
    #[inline]
    fn set_before(&mut self, before: Link) {
        self.before = before;
    }
    #[inline]
    fn set_after(&mut self, after: Link) {
        self.after = after;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Bin {
    Empty,
    Chain {
        head: SlotIdx,
    },
    /// `first` starts the bin list, which holds the same nodes as the tree.
    Tree {
        root: SlotIdx,
        first: SlotIdx,
        len: usize,
    },
}

impl Bin {
    #[inline]
    fn first(&self) -> Link {
        match *self {
            Bin::Empty => None,
            Bin::Chain { head } => Some(head),
            Bin::Tree { first, .. } => Some(first),
        }
    }
}

/// Storage layout of a single bin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinKind {
    Empty,
    Chain,
    Tree,
}

/// Occupancy figures of a hash table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Number of bins.
    pub capacity: usize,
    /// Number of entries.
    pub len: usize,
    /// Entry count above which the table doubles.
    pub threshold: usize,
    pub chain_bins: usize,
    pub tree_bins: usize,
    pub longest_chain: usize,
    pub largest_tree: usize,
}

#[derive(Default)]
struct SplitList {
    head: Link,
    tail: Link,
    len: usize,
}

impl SplitList {
    #[inline]
    fn push<K, V>(&mut self, nodes: &mut Fastbin<HashNode<K, V>>, idx: SlotIdx) {
        nodes[idx].prev = self.tail;
        nodes[idx].next = None;
        match self.tail {
            Some(tail) => nodes[tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }
}

/// Detached iteration position over a hash table.
///
/// A cursor holds no borrow. It records the table's modification count when
/// it is created and refuses to move once the table has been structurally
/// changed by anything other than the cursor's own `remove`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawCursor {
    next: Link,
    current: Link,
    expected: u64,
}

/// Chained hash table whose long chains are escalated to red-black trees.
///
/// Bins hold slot indices into a `Fastbin` of nodes. The table does not hash;
/// callers pass the spread hash of the key.
pub struct HashTable<K, V> {
    nodes: Fastbin<HashNode<K, V>>,
    bins: Vec<Bin>,
    threshold: usize,
    /// Bin count of the first allocation.
    init_size: usize,
    load_factor: f32,
    mod_count: u64,
    comparator: Option<Comparator<K>>,
    order: Option<ListHead>,
}

#[inline]
fn next_in<K, V>(bins: &[Bin], linked: bool, node: &HashNode<K, V>) -> Link {
    if linked {
        return node.after;
    }
    if node.next.is_some() {
        return node.next;
    }
    let start = (node.hash & (bins.len() - 1)) + 1;
    bins[start..].iter().find_map(Bin::first)
}

impl<K, V> HashTable<K, V> {
    /// Builds an empty table. Bins are allocated on first insert.
    ///
    /// The config is expected to be validated by the caller.
    pub fn new(config: &TableConfig, linked: bool) -> Self {
        HashTable {
            nodes: Fastbin::new(),
            bins: Vec::new(),
            threshold: 0,
            init_size: config.table_size(),
            load_factor: config.load_factor,
            mod_count: 0,
            comparator: None,
            order: if linked { Some(ListHead::default()) } else { None },
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bin count, or the bin count of the first allocation if none happened yet.
    #[inline]
    pub fn capacity(&self) -> usize {
        if self.bins.is_empty() {
            self.init_size
        } else {
            self.bins.len()
        }
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        if self.bins.is_empty() {
            self.threshold_for(self.init_size)
        } else {
            self.threshold
        }
    }

    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    #[cfg(test)]
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    #[inline]
    pub fn node(&self, idx: SlotIdx) -> &HashNode<K, V> {
        &self.nodes[idx]
    }

    #[inline]
    pub fn node_mut(&mut self, idx: SlotIdx) -> &mut HashNode<K, V> {
        &mut self.nodes[idx]
    }

    #[inline]
    fn bin_index(&self, hash: HashUint) -> usize {
        hash & (self.bins.len() - 1)
    }

    fn threshold_for(&self, capacity: usize) -> usize {
        let ft = capacity as f32 * self.load_factor;
        if capacity < MAXIMUM_CAPACITY && ft < MAXIMUM_CAPACITY as f32 {
            ft as usize
        } else {
            usize::MAX
        }
    }

    /// First node in iteration order.
    #[inline]
    pub fn first(&self) -> Link {
        match self.order {
            Some(ref order) => order.head,
            None => self.bins.iter().find_map(Bin::first),
        }
    }

    /// Node following `idx` in iteration order.
    #[inline]
    pub fn successor(&self, idx: SlotIdx) -> Link {
        next_in(&self.bins, self.order.is_some(), &self.nodes[idx])
    }

    #[inline]
    pub fn front(&self) -> Link {
        self.order.and_then(|order| order.head)
    }

    #[inline]
    pub fn back(&self) -> Link {
        self.order.and_then(|order| order.tail)
    }

    /// Moves `idx` to the back of the order list. Counts as a structural
    /// modification when the node actually moves.
    pub fn move_to_back(&mut self, idx: SlotIdx) -> bool {
        let moved = match self.order {
            Some(ref mut order) => order.list_move_tail(&mut self.nodes, idx),
            None => false,
        };
        if moved {
            self.mod_count += 1;
        }
        moved
    }

    fn tree_order(&self, a: SlotIdx, b: SlotIdx) -> Ordering {
        let (x, y) = (&self.nodes[a], &self.nodes[b]);
        x.hash
            .cmp(&y.hash)
            .then_with(|| match self.comparator {
                Some(cmp) => cmp(&x.key, &y.key),
                None => Ordering::Equal,
            })
            .then_with(|| a.cmp(&b))
    }

    /// Places `idx` into the tree rooted at `root` and rebalances.
    /// Returns the node it was hung under.
    fn tree_link(&mut self, root: &mut Link, idx: SlotIdx) -> Link {
        let mut parent = None;
        let mut as_left = false;
        let mut cur = *root;
        while let Some(p) = cur {
            as_left = self.tree_order(idx, p) == Ordering::Less;
            parent = Some(p);
            cur = if as_left {
                self.nodes[p].left
            } else {
                self.nodes[p].right
            };
        }
        rb_node::link_node(&mut self.nodes, idx, parent, as_left, root);
        rb_node::node_post_insert(&mut self.nodes, idx, root);
        parent
    }

    /// Builds a tree bin over the bin list starting at `head`.
    fn build_tree(&mut self, head: SlotIdx) -> Bin {
        let mut root = None;
        let mut prev = None;
        let mut len = 0;
        let mut cur = Some(head);
        while let Some(idx) = cur {
            cur = self.nodes[idx].next;
            self.nodes[idx].prev = prev;
            self.tree_link(&mut root, idx);
            prev = Some(idx);
            len += 1;
        }
        Bin::Tree {
            root: root.unwrap_or(head),
            first: head,
            len,
        }
    }

    fn untreeify(&mut self, head: SlotIdx) -> Bin {
        let mut cur = Some(head);
        while let Some(idx) = cur {
            let node = &mut self.nodes[idx];
            node.reset_tree_links();
            node.prev = None;
            cur = node.next;
        }
        Bin::Chain { head }
    }

    /// Converts the chain in bin `index` into a tree, or grows the table when
    /// it is still too small for tree bins to pay off.
    fn treeify_bin(&mut self, index: usize) {
        if self.bins.len() < MIN_TREEIFY_CAPACITY {
            self.resize();
            return;
        }
        if let Bin::Chain { head } = self.bins[index] {
            let bin = self.build_tree(head);
            if let Bin::Tree { len, .. } = bin {
                trace!(bin = index, len, "treeify bin");
            }
            self.bins[index] = bin;
        }
    }

    /// Allocates the bins on first use, doubles them afterwards.
    fn resize(&mut self) {
        let old_cap = self.bins.len();
        if old_cap >= MAXIMUM_CAPACITY {
            self.threshold = usize::MAX;
            return;
        }
        let (new_cap, new_thr) = if old_cap > 0 {
            let new_cap = old_cap << 1;
            let new_thr = if new_cap < MAXIMUM_CAPACITY && old_cap >= DEFAULT_INITIAL_CAPACITY {
                self.threshold.saturating_mul(2)
            } else {
                self.threshold_for(new_cap)
            };
            (new_cap, new_thr)
        } else {
            (self.init_size, self.threshold_for(self.init_size))
        };
        // the new bins exist before any node is touched
        let old_bins = mem::replace(&mut self.bins, vec![Bin::Empty; new_cap]);
        for (index, bin) in old_bins.into_iter().enumerate() {
            match bin {
                Bin::Empty => {}
                Bin::Chain { head } => self.split_chain(index, old_cap, head),
                Bin::Tree { root, first, .. } => self.split_tree(index, old_cap, root, first),
            }
        }
        self.threshold = new_thr;
        self.mod_count += 1;
        debug!(
            old_capacity = old_cap,
            new_capacity = new_cap,
            len = self.len(),
            "resized hash table"
        );
    }

    /// Splits a chain into the bins `index` and `index + bit`, keeping order.
    fn split_chain(&mut self, index: usize, bit: usize, head: SlotIdx) {
        let mut lo = SplitList::default();
        let mut hi = SplitList::default();
        let mut cur = Some(head);
        while let Some(idx) = cur {
            cur = self.nodes[idx].next;
            if self.nodes[idx].hash & bit == 0 {
                lo.push(&mut self.nodes, idx);
            } else {
                hi.push(&mut self.nodes, idx);
            }
        }
        for (list, target) in [(lo, index), (hi, index + bit)] {
            if let Some(head) = list.head {
                self.nodes[head].prev = None;
                self.bins[target] = Bin::Chain { head };
            }
        }
    }

    fn split_tree(&mut self, index: usize, bit: usize, root: SlotIdx, first: SlotIdx) {
        let mut lo = SplitList::default();
        let mut hi = SplitList::default();
        let mut cur = Some(first);
        while let Some(idx) = cur {
            cur = self.nodes[idx].next;
            if self.nodes[idx].hash & bit == 0 {
                lo.push(&mut self.nodes, idx);
            } else {
                hi.push(&mut self.nodes, idx);
            }
        }
        let (lo_len, hi_len) = (lo.len, hi.len);
        for (list, target, other_len) in [(lo, index, hi_len), (hi, index + bit, lo_len)] {
            let head = match list.head {
                Some(head) => head,
                None => continue,
            };
            self.bins[target] = if list.len <= UNTREEIFY_THRESHOLD {
                trace!(bin = target, len = list.len, "untreeify bin after split");
                self.untreeify(head)
            } else if other_len == 0 {
                // every node moved together, the old tree is still valid
                Bin::Tree {
                    root,
                    first: head,
                    len: list.len,
                }
            } else {
                self.build_tree(head)
            };
        }
    }

    /// Inserts a node for a key known to be absent and returns its slot.
    pub fn insert_new(&mut self, hash: HashUint, key: K, value: V) -> SlotIdx {
        if self.bins.is_empty() {
            self.resize();
        }
        let idx = self.nodes.alloc(HashNode::new(hash, key, value));
        let index = self.bin_index(hash);
        match self.bins[index] {
            Bin::Empty => self.bins[index] = Bin::Chain { head: idx },
            Bin::Chain { head } => {
                let mut tail = head;
                let mut chain_len = 1;
                while let Some(next) = self.nodes[tail].next {
                    tail = next;
                    chain_len += 1;
                }
                self.nodes[tail].next = Some(idx);
                if chain_len + 1 > TREEIFY_THRESHOLD {
                    self.treeify_bin(index);
                }
            }
            Bin::Tree { root, first, len } => {
                let mut root = Some(root);
                let mut first = first;
                match self.tree_link(&mut root, idx) {
                    Some(parent) => {
                        // keep the bin list next to the tree parent
                        let after = self.nodes[parent].next;
                        self.nodes[idx].prev = Some(parent);
                        self.nodes[idx].next = after;
                        self.nodes[parent].next = Some(idx);
                        if let Some(after) = after {
                            self.nodes[after].prev = Some(idx);
                        }
                    }
                    None => {
                        self.nodes[idx].next = Some(first);
                        self.nodes[first].prev = Some(idx);
                        first = idx;
                    }
                }
                self.bins[index] = Bin::Tree {
                    root: root.unwrap_or(idx),
                    first,
                    len: len + 1,
                };
            }
        }
        if let Some(ref mut order) = self.order {
            order.list_add_tail(&mut self.nodes, idx);
        }
        self.mod_count += 1;
        if self.len() > self.threshold {
            self.resize();
        }
        idx
    }

    /// Unlinks slot `idx` from its bin and the order list and frees it.
    pub fn erase(&mut self, idx: SlotIdx) -> (K, V) {
        let index = self.bin_index(self.nodes[idx].hash);
        match self.bins[index] {
            Bin::Empty => unreachable!("slot {} is not linked into bin {}", idx, index),
            Bin::Chain { head } => {
                let next = self.nodes[idx].next;
                if head == idx {
                    self.bins[index] = match next {
                        Some(head) => Bin::Chain { head },
                        None => Bin::Empty,
                    };
                } else {
                    let mut prev = head;
                    while let Some(cur) = self.nodes[prev].next {
                        if cur == idx {
                            break;
                        }
                        prev = cur;
                    }
                    self.nodes[prev].next = next;
                }
            }
            Bin::Tree { root, first, len } => {
                let mut root = Some(root);
                rb_node::erase_node(&mut self.nodes, idx, &mut root);
                let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
                if let Some(prev) = prev {
                    self.nodes[prev].next = next;
                }
                if let Some(next) = next {
                    self.nodes[next].prev = prev;
                }
                let first = if first == idx { next } else { Some(first) };
                let len = len - 1;
                self.bins[index] = match (root, first) {
                    (Some(root), Some(first)) if len > UNTREEIFY_THRESHOLD => {
                        Bin::Tree { root, first, len }
                    }
                    (_, Some(first)) => {
                        trace!(bin = index, len, "untreeify bin after removal");
                        self.untreeify(first)
                    }
                    (_, None) => Bin::Empty,
                };
            }
        }
        if let Some(ref mut order) = self.order {
            order.list_del(&mut self.nodes, idx);
        }
        self.mod_count += 1;
        let node = self.nodes.del(idx);
        (node.key, node.value)
    }

    /// Searches the bin of `hash`. `eq` tests a candidate key; `dir` tells on
    /// which side of a candidate with the same hash the probe lies, returning
    /// `Equal` when it cannot tell.
    fn find_with<E, D>(&self, hash: HashUint, eq: &E, dir: &D) -> Link
    where
        E: Fn(&K) -> bool,
        D: Fn(&K) -> Ordering,
    {
        if self.bins.is_empty() {
            return None;
        }
        match self.bins[self.bin_index(hash)] {
            Bin::Empty => None,
            Bin::Chain { head } => {
                let mut cur = Some(head);
                while let Some(idx) = cur {
                    let node = &self.nodes[idx];
                    if node.hash == hash && eq(&node.key) {
                        return Some(idx);
                    }
                    cur = node.next;
                }
                None
            }
            Bin::Tree { root, .. } => self.tree_find(Some(root), hash, eq, dir),
        }
    }

    fn tree_find<E, D>(&self, mut link: Link, hash: HashUint, eq: &E, dir: &D) -> Link
    where
        E: Fn(&K) -> bool,
        D: Fn(&K) -> Ordering,
    {
        while let Some(idx) = link {
            let node = &self.nodes[idx];
            link = if hash < node.hash {
                node.left
            } else if hash > node.hash {
                node.right
            } else if eq(&node.key) {
                return Some(idx);
            } else if node.left.is_none() {
                node.right
            } else if node.right.is_none() {
                node.left
            } else {
                match dir(&node.key) {
                    Ordering::Less => node.left,
                    Ordering::Greater => node.right,
                    Ordering::Equal => {
                        if let Some(found) = self.tree_find(node.right, hash, eq, dir) {
                            return Some(found);
                        }
                        node.left
                    }
                }
            };
        }
        None
    }

    /// Looks up a borrowed form of the key.
    #[inline]
    pub fn find<Q: ?Sized>(&self, hash: HashUint, q: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Eq,
    {
        self.find_with(hash, &|k: &K| k.borrow() == q, &|_: &K| Ordering::Equal)
    }

    /// Looks up an owned key; tree bins are descended with the comparator.
    #[inline]
    pub fn find_key(&self, hash: HashUint, key: &K) -> Link
    where
        K: Eq,
    {
        match self.comparator {
            Some(cmp) => self.find_with(hash, &|k: &K| k == key, &|k: &K| cmp(key, k)),
            None => self.find(hash, key),
        }
    }

    /// Inserts or updates. Returns the slot and the replaced value.
    pub fn insert(&mut self, hash: HashUint, key: K, value: V) -> (SlotIdx, Option<V>)
    where
        K: Eq,
    {
        match self.find_key(hash, &key) {
            Some(idx) => {
                let old = mem::replace(&mut self.nodes[idx].value, value);
                (idx, Some(old))
            }
            None => (self.insert_new(hash, key, value), None),
        }
    }

    /// Installs the tree-bin comparator and rebuilds existing tree bins.
    pub fn set_comparator(&mut self, comparator: Option<Comparator<K>>) {
        self.comparator = comparator;
        for index in 0..self.bins.len() {
            if let Bin::Tree { first, .. } = self.bins[index] {
                self.bins[index] = self.build_tree(first);
            }
        }
    }

    /// Grows so that `additional` more entries fit without a resize.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.len().saturating_add(additional);
        if self.bins.is_empty() {
            let ft = needed as f32 / self.load_factor + 1.0;
            let wanted = if ft < MAXIMUM_CAPACITY as f32 {
                ft as usize
            } else {
                MAXIMUM_CAPACITY
            };
            if wanted > self.init_size {
                self.init_size = config::table_size_for(wanted);
            }
        } else {
            while needed > self.threshold && self.bins.len() < MAXIMUM_CAPACITY {
                self.resize();
            }
        }
    }

    /// Rebuilds at the smallest capacity whose threshold still covers `len`.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        if self.bins.is_empty() {
            return;
        }
        let wanted = (self.len() as f32 / self.load_factor).ceil() as usize;
        let target = config::table_size_for(wanted);
        if target >= self.bins.len() {
            return;
        }
        let old_cap = self.bins.len();
        self.rebuild(target);
        debug!(
            old_capacity = old_cap,
            new_capacity = target,
            len = self.len(),
            "shrank hash table"
        );
    }

    fn rebuild(&mut self, capacity: usize) {
        let mut all = Vec::with_capacity(self.len());
        for bin in &self.bins {
            let mut cur = bin.first();
            while let Some(idx) = cur {
                all.push(idx);
                cur = self.nodes[idx].next;
            }
        }
        self.bins = vec![Bin::Empty; capacity];
        self.threshold = self.threshold_for(capacity);
        let mut tails: Vec<Link> = vec![None; capacity];
        let mut counts = vec![0usize; capacity];
        for idx in all {
            let index = self.bin_index(self.nodes[idx].hash);
            let node = &mut self.nodes[idx];
            node.reset_tree_links();
            node.next = None;
            node.prev = None;
            match tails[index] {
                Some(tail) => self.nodes[tail].next = Some(idx),
                None => self.bins[index] = Bin::Chain { head: idx },
            }
            tails[index] = Some(idx);
            counts[index] += 1;
        }
        if capacity >= MIN_TREEIFY_CAPACITY {
            for (index, count) in counts.into_iter().enumerate() {
                if count > TREEIFY_THRESHOLD {
                    if let Bin::Chain { head } = self.bins[index] {
                        self.bins[index] = self.build_tree(head);
                    }
                }
            }
        }
        self.mod_count += 1;
    }

    /// Drops every entry. The bins keep their capacity.
    pub fn clear(&mut self) {
        let len = self.len();
        self.nodes.clear();
        for bin in self.bins.iter_mut() {
            *bin = Bin::Empty;
        }
        if let Some(ref mut order) = self.order {
            order.list_init();
        }
        self.mod_count += 1;
        if len > 0 {
            debug!(len, "cleared hash table");
        }
    }

    /// Moves the entries out into the returned table and leaves `self` empty
    /// with the same configuration.
    pub fn take(&mut self) -> Self {
        let mut fresh = HashTable {
            nodes: Fastbin::new(),
            bins: vec![Bin::Empty; self.bins.len()],
            threshold: self.threshold,
            init_size: self.init_size,
            load_factor: self.load_factor,
            mod_count: self.mod_count + 1,
            comparator: self.comparator,
            order: self.order.map(|_| ListHead::default()),
        };
        mem::swap(self, &mut fresh);
        fresh
    }

    /// Storage kind of the bin `hash` maps to.
    pub fn bin_kind(&self, hash: HashUint) -> BinKind {
        if self.bins.is_empty() {
            return BinKind::Empty;
        }
        match self.bins[self.bin_index(hash)] {
            Bin::Empty => BinKind::Empty,
            Bin::Chain { .. } => BinKind::Chain,
            Bin::Tree { .. } => BinKind::Tree,
        }
    }

    pub fn stats(&self) -> TableStats {
        let mut stats = TableStats {
            capacity: self.capacity(),
            len: self.len(),
            threshold: self.threshold(),
            ..Default::default()
        };
        for bin in &self.bins {
            match *bin {
                Bin::Empty => {}
                Bin::Chain { head } => {
                    let mut chain_len = 0;
                    let mut cur = Some(head);
                    while let Some(idx) = cur {
                        chain_len += 1;
                        cur = self.nodes[idx].next;
                    }
                    stats.chain_bins += 1;
                    stats.longest_chain = cmp::max(stats.longest_chain, chain_len);
                }
                Bin::Tree { len, .. } => {
                    stats.tree_bins += 1;
                    stats.largest_tree = cmp::max(stats.largest_tree, len);
                }
            }
        }
        stats
    }

    pub fn cursor(&self) -> RawCursor {
        RawCursor {
            next: self.first(),
            current: None,
            expected: self.mod_count,
        }
    }

    #[inline]
    fn check_generation(&self, cursor: &RawCursor) -> Result<()> {
        if cursor.expected != self.mod_count {
            return Err(CollectionError::ConcurrentModification {
                expected: cursor.expected,
                found: self.mod_count,
            });
        }
        Ok(())
    }

    pub fn cursor_next(&self, cursor: &mut RawCursor) -> Result<Option<SlotIdx>> {
        self.check_generation(cursor)?;
        cursor.current = cursor.next;
        if let Some(idx) = cursor.next {
            cursor.next = self.successor(idx);
        }
        Ok(cursor.current)
    }

    /// Removes the entry last returned by `cursor_next`.
    pub fn cursor_remove(&mut self, cursor: &mut RawCursor) -> Result<(K, V)> {
        let current = cursor
            .current
            .ok_or(CollectionError::IllegalState("cursor has no current entry"))?;
        self.check_generation(cursor)?;
        cursor.current = None;
        let kv = self.erase(current);
        cursor.expected = self.mod_count;
        Ok(kv)
    }

    /// Removes every entry for which `f` returns false, in iteration order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut cur = self.first();
        while let Some(idx) = cur {
            cur = self.successor(idx);
            let keep = {
                let node = &mut self.nodes[idx];
                f(&node.key, &mut node.value)
            };
            if !keep {
                self.erase(idx);
            }
        }
    }

    pub fn iter(&self) -> RawIter<'_, K, V> {
        RawIter {
            table: self,
            cur: self.first(),
            remaining: self.len(),
        }
    }

    pub fn iter_mut(&mut self) -> RawIterMut<'_, K, V> {
        let cur = self.first();
        let remaining = self.len();
        RawIterMut {
            slots: self.nodes.slots_mut(),
            bins: &self.bins,
            linked: self.order.is_some(),
            cur,
            remaining,
        }
    }

    pub fn into_iter(self) -> RawIntoIter<K, V> {
        RawIntoIter {
            cur: self.first(),
            table: self,
        }
    }

    #[cfg(test)]
    pub fn assert_invariants(&self) {
        let mut total = 0;
        for (index, bin) in self.bins.iter().enumerate() {
            let mut listed = 0;
            let mut prev = None;
            let mut cur = bin.first();
            while let Some(idx) = cur {
                let node = &self.nodes[idx];
                assert_eq!(self.bin_index(node.hash), index);
                if let Bin::Tree { .. } = *bin {
                    assert_eq!(node.prev, prev);
                }
                listed += 1;
                prev = cur;
                cur = node.next;
            }
            match *bin {
                Bin::Empty => assert_eq!(listed, 0),
                Bin::Chain { .. } => {}
                Bin::Tree { root, len, .. } => {
                    assert_eq!(len, listed);
                    assert!(len > UNTREEIFY_THRESHOLD);
                    assert!(!self.nodes[root].red);
                    assert!(rb_node::check_valid(&self.nodes, Some(root), None).is_some());
                    assert_eq!(rb_node::get_node_num(&self.nodes, Some(root)), len);
                }
            }
            total += listed;
        }
        assert_eq!(total, self.len());
        if let Some(order) = self.order {
            let mut listed = 0;
            let mut prev = None;
            let mut cur = order.head;
            while let Some(idx) = cur {
                assert_eq!(self.nodes[idx].before, prev);
                listed += 1;
                prev = cur;
                cur = self.nodes[idx].after;
            }
            assert_eq!(order.tail, prev);
            assert_eq!(listed, self.len());
        }
    }
}

impl<K, V> Clone for HashTable<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut table = HashTable {
            nodes: Fastbin::new(),
            bins: Vec::new(),
            threshold: 0,
            init_size: config::table_size_for(self.capacity()),
            load_factor: self.load_factor,
            mod_count: 0,
            comparator: self.comparator,
            order: self.order.map(|_| ListHead::default()),
        };
        for node in self.iter() {
            table.insert_new(node.hash, node.key.clone(), node.value.clone());
        }
        table
    }
}

/// Shared iterator over the nodes of a table, in iteration order.
pub struct RawIter<'a, K, V> {
    table: &'a HashTable<K, V>,
    cur: Link,
    remaining: usize,
}

impl<'a, K, V> Clone for RawIter<'a, K, V> {
    fn clone(&self) -> Self {
        RawIter {
            table: self.table,
            cur: self.cur,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for RawIter<'a, K, V> {
    type Item = &'a HashNode<K, V>;

    #[inline]
    fn next(&mut self) -> Option<&'a HashNode<K, V>> {
        let idx = self.cur?;
        self.cur = self.table.successor(idx);
        self.remaining -= 1;
        Some(&self.table.nodes[idx])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for RawIter<'a, K, V> {}

impl<'a, K, V> FusedIterator for RawIter<'a, K, V> {}

/// Mutable iterator over the nodes of a table, in iteration order.
pub struct RawIterMut<'a, K, V> {
    slots: Vec<Option<&'a mut HashNode<K, V>>>,
    bins: &'a [Bin],
    linked: bool,
    cur: Link,
    remaining: usize,
}

impl<'a, K, V> Iterator for RawIterMut<'a, K, V> {
    type Item = &'a mut HashNode<K, V>;

    #[inline]
    fn next(&mut self) -> Option<&'a mut HashNode<K, V>> {
        let idx = self.cur?;
        let node = self.slots[idx].take()?;
        self.cur = next_in(self.bins, self.linked, node);
        self.remaining -= 1;
        Some(node)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for RawIterMut<'a, K, V> {}

impl<'a, K, V> FusedIterator for RawIterMut<'a, K, V> {}

/// Owning iterator; frees each node as it is yielded.
pub struct RawIntoIter<K, V> {
    table: HashTable<K, V>,
    cur: Link,
}

impl<K, V> Iterator for RawIntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        let idx = self.cur?;
        self.cur = self.table.successor(idx);
        let node = self.table.nodes.del(idx);
        Some((node.key, node.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.len(), Some(self.table.len()))
    }
}

impl<K, V> ExactSizeIterator for RawIntoIter<K, V> {}

impl<K, V> FusedIterator for RawIntoIter<K, V> {}
