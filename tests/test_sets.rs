mod common;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use common::{shuffled, Collide};
use hash_bin::collection::{sets_equal, Lookup, MutableContainer, ReadOnly};
use hash_bin::{BinKind, CollectionError, HashSet, LinkedHashSet};
use rstest::rstest;

fn digest<T: Hash>(t: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    t.hash(&mut hasher);
    hasher.finish()
}

#[rstest]
#[case::disjoint(&[1, 2], &[3, 4], false, false, true)]
#[case::subset(&[1, 2], &[1, 2, 3], true, false, false)]
#[case::equal(&[1, 2, 3], &[3, 2, 1], true, true, false)]
#[case::overlap(&[1, 2, 5], &[2, 3], false, false, false)]
#[case::empty(&[], &[7], true, false, true)]
fn test_relations(
    #[case] a: &[i32],
    #[case] b: &[i32],
    #[case] subset: bool,
    #[case] superset: bool,
    #[case] disjoint: bool,
) {
    let a: HashSet<i32> = a.iter().cloned().collect();
    let b: HashSet<i32> = b.iter().cloned().collect();
    assert_eq!(a.is_subset(&b), subset);
    assert_eq!(a.is_superset(&b), superset);
    assert_eq!(a.is_disjoint(&b), disjoint);
}

#[test]
fn test_insert_and_remove_report_change() {
    let mut set = HashSet::new();
    assert!(set.insert(1));
    assert!(!set.insert(1));
    assert!(set.remove(&1));
    assert!(!set.remove(&1));
    assert!(set.is_empty());
}

#[test]
fn test_colliding_items() {
    let mut set = HashSet::new();
    for k in shuffled(100) {
        set.insert(Collide(k));
    }
    assert_eq!(set.bin_kind(&Collide(0)), BinKind::Tree);
    assert!((0..100).all(|k| set.contains(&Collide(k))));
    assert!(!set.contains(&Collide(100)));
    set.retain(|c| c.0 < 4);
    assert_eq!(set.bin_kind(&Collide(0)), BinKind::Chain);
    assert_eq!(set.len(), 4);
}

#[test]
fn test_linked_set_order() {
    let mut set = LinkedHashSet::new();
    for c in "hello world".chars() {
        set.insert(c);
    }
    assert_eq!(set.iter().collect::<String>(), "helo wrd");
    assert_eq!(set.pop_front(), Some('h'));
    assert_eq!(set.pop_back(), Some('d'));
    assert_eq!(set.front(), Some(&'e'));
    assert_eq!(set.back(), Some(&'r'));

    let other: LinkedHashSet<char> = "world".chars().collect();
    let common: String = set.intersection(&other).collect();
    assert_eq!(common, "lowr");
    let only_here: String = set.difference(&other).collect();
    assert_eq!(only_here, "e ");
}

#[test]
fn test_hash_and_linked_sets_agree() {
    let plain: HashSet<u32> = shuffled(300).into_iter().collect();
    let linked: LinkedHashSet<u32> = shuffled(300).into_iter().collect();
    assert!(sets_equal(&plain, &linked));
    assert!(sets_equal(&linked, &plain));
    assert_eq!(digest(&plain), digest(&linked));

    let mut fewer = linked.clone();
    fewer.remove(&17);
    assert!(!sets_equal(&plain, &fewer));
    assert_ne!(digest(&plain), digest(&fewer));
}

#[test]
fn test_bulk_operations() {
    let mut set: LinkedHashSet<u32> = LinkedHashSet::new();
    assert!(set.add_all(vec![5, 3, 5, 1]).unwrap());
    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), vec![5, 3, 1]);
    assert!(set.contains_all(&[1, 5]));
    assert!(!set.contains_all(&[1, 2]));

    let keep: HashSet<u32> = [1, 3].iter().cloned().collect();
    assert!(set.retain_all(&keep).unwrap());
    assert!(!set.retain_all(&keep).unwrap());
    assert!(set.remove_all(&[3, 4]).unwrap());
    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), vec![1]);
    set.try_clear().unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_read_only_view() {
    let set: HashSet<&str> = ["x", "y"].iter().cloned().collect();
    let mut view = ReadOnly::new(set);
    assert!(Lookup::contains(&view, "x"));
    assert_eq!(view.len(), 2);
    assert_eq!(
        view.try_insert("z"),
        Err(CollectionError::Unsupported { operation: "insert" })
    );
    assert_eq!(
        view.try_remove(&"x"),
        Err(CollectionError::Unsupported { operation: "remove" })
    );
    assert!(view.remove_all(&["x"]).is_err());
    let mut seen: Vec<&str> = (&view).into_iter().cloned().collect();
    seen.sort();
    assert_eq!(seen, vec!["x", "y"]);
    assert_eq!(view.into_inner().len(), 2);
}

#[test]
fn test_linked_set_cursor() {
    let mut set: LinkedHashSet<u32> = (0..6).collect();
    let mut cursor = set.cursor();
    while let Some(&v) = cursor.next(&set).unwrap() {
        if v % 2 == 1 {
            cursor.remove(&mut set).unwrap();
        }
    }
    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), vec![0, 2, 4]);
    let mut stale = set.cursor();
    set.insert(9);
    assert!(stale.next(&set).is_err());
}
