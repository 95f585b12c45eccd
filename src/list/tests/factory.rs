use alloc::sync::Arc;

use crate::collection::Collection;
use crate::list::tests::configs;
use crate::list::{List, ListBuilder, Storage};

#[test]
fn test_every_config_satisfies_the_contract() {
    for mut list in configs() {
        assert!(list.is_empty());
        list.add(1);
        list.add(2);
        list.add(1);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0).unwrap(), 1);
        assert_eq!(list.index_of(&1), Some(0));
        assert_eq!(list.last_index_of(&1), Some(2));
        assert!(list.get(3).unwrap_err().is_out_of_range());
        assert_eq!(list.remove_n(&1, None), 2);
        assert_eq!(list.to_vec(), [2]);
    }
}

#[test]
fn test_default_configuration() {
    let mut list = ListBuilder::new().build::<i32>();
    // Duplicates are accepted; this is a list, not a set.
    assert!(list.add(7));
    assert!(list.add(7));
    assert_eq!(list.len(), 2);
}

#[test]
fn test_storage_selection() {
    let mut contiguous = ListBuilder::new().storage(Storage::Contiguous).build::<i32>();
    let mut linked = ListBuilder::new().storage(Storage::Linked).build::<i32>();
    for v in [3, 1, 2] {
        contiguous.add(v);
        linked.add(v);
    }
    contiguous.sort(&mut |a, b| a < b);
    linked.sort(&mut |a, b| a < b);
    assert_eq!(contiguous.to_vec(), [1, 2, 3]);
    assert_eq!(contiguous.to_vec(), linked.to_vec());
}

#[test]
fn test_injected_comparator() {
    // Equality on the last decimal digit.
    let mut list = ListBuilder::new()
        .storage(Storage::Linked)
        .build_with_comparator::<i32>(Arc::new(|a: &i32, b: &i32| a % 10 == b % 10));
    list.add(13);
    list.add(24);
    assert!(list.contains(&3));
    assert_eq!(list.index_of(&4), Some(1));
    assert!(list.remove(&3));
    assert_eq!(list.to_vec(), [24]);
}

#[test]
fn test_capacity_is_clamped() {
    let mut list = ListBuilder::new().initial_capacity(0).build::<i32>();
    list.add(1);
    assert_eq!(list.len(), 1);
}
