mod common;

use common::{init_tracing, shuffled, Collide};
use hash_bin::config::MIN_TREEIFY_CAPACITY;
use hash_bin::hash_map::{Entry, HashMap};
use hash_bin::{BinKind, CollectionError, TableConfig};
use rstest::rstest;

#[rstest]
#[case::no_duplicates(&[1, 2, 3, 4], 4)]
#[case::all_duplicates(&[7, 7, 7], 1)]
#[case::mixed(&[5, 1, 5, 2, 1, 9], 4)]
#[case::empty(&[], 0)]
fn test_len_counts_distinct_keys(#[case] keys: &[i32], #[case] expect: usize) {
    let mut map = HashMap::new();
    for (i, &k) in keys.iter().enumerate() {
        map.insert(k, i);
    }
    assert_eq!(map.len(), expect);
    assert_eq!(map.is_empty(), expect == 0);
}

#[test]
fn test_get_after_insert() {
    init_tracing();
    let keys = shuffled(5000);
    let mut map = HashMap::new();
    for &k in &keys {
        assert_eq!(map.insert(k, k.to_string()), None);
        assert_eq!(map.get(&k).map(String::as_str), Some(k.to_string().as_str()));
    }
    for &k in &keys {
        assert_eq!(map.insert(k, format!("v{}", k)), Some(k.to_string()));
    }
    for &k in &keys {
        assert_eq!(map[&k], format!("v{}", k));
    }
    assert_eq!(map.len(), 5000);
}

#[rstest]
#[case::defaults(16, 0.75, 12)]
#[case::larger(64, 0.75, 48)]
#[case::half_load(16, 0.5, 8)]
#[case::rounded_up(100, 1.0, 128)]
fn test_doubles_once_past_threshold(
    #[case] initial: usize,
    #[case] load_factor: f32,
    #[case] threshold: usize,
) {
    let config = TableConfig::new()
        .initial_capacity(initial)
        .load_factor(load_factor);
    let mut map = HashMap::with_config(config).unwrap();
    map.insert(0u32, ());
    let capacity = map.capacity();
    assert_eq!(map.stats().threshold, threshold);
    for k in 1..threshold as u32 {
        map.insert(k, ());
    }
    assert_eq!(map.capacity(), capacity);
    map.insert(threshold as u32, ());
    assert_eq!(map.capacity(), capacity * 2);
    for k in 0..=threshold as u32 {
        assert!(map.contains_key(&k));
    }
}

#[rstest]
#[case::zero(0.0)]
#[case::negative(-0.5)]
#[case::nan(f32::NAN)]
#[case::infinite(f32::INFINITY)]
fn test_rejects_load_factor(#[case] load_factor: f32) {
    let config = TableConfig::new().load_factor(load_factor);
    match HashMap::<u8, u8>::with_config(config) {
        Err(CollectionError::InvalidArgument { name, .. }) => assert_eq!(name, "load factor"),
        other => panic!("unexpected {:?}", other.map(|m| m.len())),
    }
}

#[test]
fn test_capacity_is_clamped() {
    let config = TableConfig::new().initial_capacity(usize::MAX);
    let map = HashMap::<u8, u8>::with_config(config).unwrap();
    assert_eq!(map.capacity(), hash_bin::config::MAXIMUM_CAPACITY);
}

#[test]
fn test_tree_bin_lifecycle() {
    let mut map = HashMap::with_capacity(MIN_TREEIFY_CAPACITY);
    for i in 0..8 {
        map.insert(Collide(i), i);
    }
    assert_eq!(map.bin_kind(&Collide(0)), BinKind::Chain);
    assert_eq!(map.stats().longest_chain, 8);

    map.insert(Collide(8), 8);
    assert_eq!(map.bin_kind(&Collide(0)), BinKind::Tree);
    assert_eq!(map.capacity(), MIN_TREEIFY_CAPACITY);
    let stats = map.stats();
    assert_eq!((stats.tree_bins, stats.largest_tree), (1, 9));

    for i in 0..2 {
        map.remove(&Collide(i));
        assert_eq!(map.bin_kind(&Collide(5)), BinKind::Tree);
    }
    map.remove(&Collide(2));
    assert_eq!(map.bin_kind(&Collide(5)), BinKind::Chain);
    for i in 3..9 {
        assert_eq!(map.get(&Collide(i)), Some(&i));
    }
    assert_eq!(map.bin_kind(&Collide(100)), BinKind::Chain);
}

#[test]
fn test_small_table_grows_instead_of_treeifying() {
    let mut map = HashMap::new();
    for i in 0..9 {
        map.insert(Collide(i), ());
    }
    assert_eq!(map.capacity(), 32);
    assert_eq!(map.bin_kind(&Collide(0)), BinKind::Chain);
    map.insert(Collide(9), ());
    assert_eq!(map.capacity(), 64);
    map.insert(Collide(10), ());
    assert_eq!(map.capacity(), 64);
    assert_eq!(map.bin_kind(&Collide(0)), BinKind::Tree);
    assert_eq!(map.stats().longest_chain, 0);
}

#[test]
fn test_tree_bin_survives_many_operations() {
    let mut map = HashMap::new();
    let keys = shuffled(2000);
    for &k in &keys {
        map.insert(Collide(k), k);
    }
    assert_eq!(map.stats().largest_tree, 2000);
    for &k in keys.iter().filter(|k| *k % 3 == 0) {
        assert_eq!(map.remove(&Collide(k)), Some(k));
    }
    for &k in &keys {
        assert_eq!(map.get(&Collide(k)).is_some(), k % 3 != 0);
    }
    let mut values: Vec<u32> = map.values().cloned().collect();
    values.sort();
    let expect: Vec<u32> = (0..2000).filter(|k| k % 3 != 0).collect();
    assert_eq!(values, expect);
}

#[test]
fn test_comparator_orders_colliding_keys() {
    let mut map = HashMap::new().with_comparator(|a: &Collide, b: &Collide| a.0.cmp(&b.0));
    for k in shuffled(300) {
        map.insert(Collide(k), k);
    }
    for k in 0..300 {
        assert_eq!(map.insert(Collide(k), k + 1), Some(k));
    }
    assert_eq!(map.len(), 300);
    assert_eq!(map.stats().tree_bins, 1);
}

#[test]
fn test_remove_is_idempotent() {
    let mut map: HashMap<_, _> = (0..10).map(|k| (k, k * 2)).collect();
    assert_eq!(map.remove(&4), Some(8));
    let after_first = map.clone();
    assert_eq!(map.remove(&4), None);
    assert_eq!(map, after_first);
    assert_eq!(map.remove_entry(&5), Some((5, 10)));
    assert_eq!(map.len(), 8);
}

#[test]
fn test_cursor_fails_after_external_remove() {
    let mut map: HashMap<_, _> = (0..10).map(|k| (k, k)).collect();
    let mut cursor = map.cursor();
    assert!(cursor.next(&map).unwrap().is_some());
    map.remove(&3);
    match cursor.next(&map) {
        Err(CollectionError::ConcurrentModification { expected, found }) => assert!(found > expected),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_cursor_unaffected_by_value_update() {
    let mut map: HashMap<_, _> = (0..10).map(|k| (k, k)).collect();
    let mut cursor = map.cursor();
    cursor.next(&map).unwrap();
    map.insert(3, 30);
    *map.get_mut(&4).unwrap() = 40;
    let mut rest = 0;
    while cursor.next(&map).unwrap().is_some() {
        rest += 1;
    }
    assert_eq!(rest, 9);
}

#[test]
fn test_cursor_remove_states() {
    let mut map: HashMap<_, _> = (0..3).map(|k| (k, k)).collect();
    let mut cursor = map.cursor();
    assert_eq!(
        cursor.remove(&mut map),
        Err(CollectionError::IllegalState("cursor has no current entry"))
    );
    let (&k, _) = cursor.next(&map).unwrap().unwrap();
    assert_eq!(cursor.remove(&mut map).unwrap().0, k);
    assert!(matches!(cursor.remove(&mut map), Err(CollectionError::IllegalState(_))));
    assert_eq!(map.len(), 2);
    assert!(!map.contains_key(&k));
}

#[test]
fn test_entry_api() {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in "a b a c b a".split(' ') {
        *counts.entry(word).or_insert(0) += 1;
    }
    assert_eq!(counts["a"], 3);
    assert_eq!(counts["b"], 2);

    match counts.entry("c") {
        Entry::Occupied(mut o) => {
            assert_eq!(o.insert(10), 1);
            assert_eq!(o.remove_entry(), ("c", 10));
        }
        Entry::Vacant(_) => panic!("c is present"),
    }
    match counts.entry("z") {
        Entry::Vacant(v) => assert_eq!(v.into_key(), "z"),
        Entry::Occupied(_) => panic!("z is absent"),
    }
    assert!(!counts.contains_key("z"));
    counts.entry("d").and_modify(|v| *v += 1).or_default();
    assert_eq!(counts.get("d"), Some(&0));
}

#[test]
fn test_shrink_to_fit_and_reserve() {
    let mut map: HashMap<u32, u32> = (0..1000).map(|k| (k, k)).collect();
    assert_eq!(map.capacity(), 2048);
    map.retain(|k, _| *k < 10);
    assert_eq!(map.capacity(), 2048);
    map.shrink_to_fit();
    assert_eq!(map.capacity(), 16);
    for k in 0..10 {
        assert_eq!(map[&k], k);
    }
    map.reserve(100);
    assert!(map.stats().threshold >= 110);
}

#[test]
fn test_drain_and_into_iter() {
    let mut map: HashMap<u32, String> = (0..50).map(|k| (k, k.to_string())).collect();
    let capacity = map.capacity();
    let mut drained: Vec<u32> = map.drain().map(|(k, _)| k).collect();
    drained.sort();
    assert_eq!(drained, (0..50).collect::<Vec<_>>());
    assert!(map.is_empty());
    assert_eq!(map.capacity(), capacity);

    map.extend((0..5).map(|k| (k, k.to_string())));
    let mut pairs: Vec<(u32, String)> = map.into_iter().collect();
    pairs.sort();
    assert_eq!(pairs[4], (4, "4".to_string()));
}
