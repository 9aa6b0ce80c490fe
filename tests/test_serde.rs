#![cfg(feature = "serde")]

use hash_bin::{HashMap, LinkOrder, LinkedHashMap, TableConfig};

#[test]
fn test_map_round_trip_sizes_to_entries() {
    let config = TableConfig::new().initial_capacity(200).load_factor(0.5);
    let mut map = HashMap::with_config(config).unwrap();
    for k in 0..40u32 {
        map.insert(k, format!("v{}", k));
    }
    let json = serde_json::to_string(&map).unwrap();
    assert!(json.starts_with("[256,0.5,40,"), "{}", json);
    let back: HashMap<u32, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.capacity(), 128);
    assert_eq!(back.load_factor(), 0.5);
    assert_eq!(back, map);
}

#[test]
fn test_linked_map_restores_insertion_order() {
    let mut map = LinkedHashMap::with_order(LinkOrder::Access);
    for k in [5u8, 2, 8] {
        map.insert(k, k);
    }
    map.get(&5);
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, "[16,0.75,3,2,2,8,8,5,5]");
    let back: LinkedHashMap<u8, u8> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.link_order(), LinkOrder::Insertion);
    assert_eq!(back.keys().cloned().collect::<Vec<_>>(), vec![2, 8, 5]);
}

#[test]
fn test_config_is_serializable() {
    let config = TableConfig::new().initial_capacity(32).load_factor(0.5);
    let json = serde_json::to_string(&config).unwrap();
    let back: TableConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
    let order: LinkOrder = serde_json::from_str("\"Access\"").unwrap();
    assert_eq!(order, LinkOrder::Access);
}
