use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use core::cmp::Ordering;

use crate::collection::Collection;
use crate::comparator::{Compare, compare_less};
use crate::list::{ArrayList, LinkedList, List};

fn from(values: &[i32]) -> ArrayList<i32> {
    values.iter().copied().collect()
}

#[test]
fn test_add_and_get() {
    let s = [1, 2, 3, 4, 5, 10, 9, 8, 7];
    let list = from(&s);
    assert_eq!(list.len(), s.len());
    for (i, &v) in s.iter().enumerate() {
        assert_eq!(list.get(i).unwrap(), v);
    }
}

#[test]
fn test_growth_preserves_elements() {
    // Crosses both growth regimes, including the 256-capacity boundary.
    let mut list: ArrayList<usize> = ArrayList::with_capacity(1);
    for i in 0..1000 {
        list.add(i);
    }
    assert_eq!(list.len(), 1000);
    assert!(list.capacity() >= 1000);
    for i in 0..1000 {
        assert_eq!(list.get(i).unwrap(), i);
    }
}

#[test]
fn test_get_out_of_range() {
    let mut list = from(&[10, 20]);
    assert!(list.get(2).unwrap_err().is_out_of_range());
    assert!(list.set(2, 1).unwrap_err().is_out_of_range());
    assert!(list.remove_at(2).unwrap_err().is_out_of_range());
    let empty: ArrayList<i32> = ArrayList::new();
    assert!(empty.get(0).unwrap_err().is_out_of_range());
}

#[test]
fn test_set_returns_old_value() {
    let mut list = from(&[10, 20, 30]);
    assert_eq!(list.set(1, 25).unwrap(), 20);
    assert_eq!(list.to_vec(), [10, 25, 30]);
}

#[test]
fn test_insert() {
    let mut list = from(&[10, 20]);
    list.insert(0, 5).unwrap();
    assert_eq!(list.to_vec(), [5, 10, 20]);
    list.insert(2, 15).unwrap();
    assert_eq!(list.to_vec(), [5, 10, 15, 20]);
    // Inserting at len appends.
    list.insert(4, 25).unwrap();
    assert_eq!(list.to_vec(), [5, 10, 15, 20, 25]);
    assert!(list.insert(6, 99).unwrap_err().is_out_of_range());
}

#[test]
fn test_remove_at() {
    let mut list = from(&[1, 2, 3, 4]);
    assert_eq!(list.remove_at(1).unwrap(), 2);
    assert_eq!(list.to_vec(), [1, 3, 4]);
    assert_eq!(list.remove_at(2).unwrap(), 4);
    assert_eq!(list.to_vec(), [1, 3]);
    assert_eq!(list.remove_at(0).unwrap(), 1);
    assert_eq!(list.to_vec(), [3]);
}

#[test]
fn test_index_of() {
    let list = from(&[5, 9, 5, 6, 6, 5]);
    assert_eq!(list.index_of(&5), Some(0));
    assert_eq!(list.last_index_of(&5), Some(5));
    assert_eq!(list.index_of(&6), Some(3));
    assert_eq!(list.index_of(&7), None);
    assert_eq!(list.last_index_of(&7), None);
    assert!(list.contains(&9));
    assert!(!list.contains(&0));
}

#[test]
fn test_remove_n_partial() {
    let mut list = from(&[5, 9, 5, 6, 6, 5]);
    assert_eq!(list.remove_n(&5, Some(1)), 1);
    assert_eq!(list.to_vec(), [9, 5, 6, 6, 5]);
}

#[test]
fn test_remove_n_all() {
    let mut list = from(&[5, 9, 5, 6, 6, 5]);
    assert_eq!(list.remove_n(&5, None), 3);
    assert_eq!(list.to_vec(), [9, 6, 6]);
}

#[test]
fn test_remove_if_n_preserves_order() {
    let mut list = from(&[5, 9, 5, 6, 6, 5]);
    assert_eq!(list.remove_if_n(&mut |e| e % 2 == 0, None), 2);
    assert_eq!(list.to_vec(), [5, 9, 5, 5]);
}

#[test]
fn test_remove_if_n_zero_is_noop() {
    let mut list = from(&[5, 9, 5, 6, 6, 5]);
    assert_eq!(list.remove_if_n(&mut |e| e % 2 == 0, Some(0)), 0);
    assert_eq!(list.to_vec(), [5, 9, 5, 6, 6, 5]);
}

#[test]
fn test_remove_if_n_limited() {
    let mut list = from(&[2, 4, 6, 8]);
    assert_eq!(list.remove_if_n(&mut |e| e % 2 == 0, Some(3)), 3);
    assert_eq!(list.to_vec(), [8]);
}

#[test]
fn test_remove_first_match_only() {
    let mut list = from(&[5, 9, 5]);
    assert!(list.remove(&5));
    assert_eq!(list.to_vec(), [9, 5]);
    assert!(!list.remove(&7));
}

#[test]
fn test_sub_list_is_independent() {
    let list = from(&[1, 2, 3, 4, 5]);
    let mut sub = list.sub_list(1, 4).unwrap();
    assert_eq!(sub.to_vec(), [2, 3, 4]);
    sub.add(99);
    sub.set(0, 0).unwrap();
    assert_eq!(list.to_vec(), [1, 2, 3, 4, 5]);
    assert!(list.sub_list(2, 6).unwrap_err().is_out_of_range());
    assert!(list.sub_list(4, 2).unwrap_err().is_out_of_range());
}

#[test]
fn test_sort() {
    let mut list = from(&[3, 1, 4, 1, 5, 9, 2, 6]);
    list.sort(&mut |a, b| a < b);
    assert_eq!(list.to_vec(), [1, 1, 2, 3, 4, 5, 6, 9]);
    list.sort(&mut |a, b| a > b);
    assert_eq!(list.to_vec(), [9, 6, 5, 4, 3, 2, 1, 1]);
}

#[derive(Debug, Clone, PartialEq)]
struct Record {
    id: i32,
    payload: Vec<i32>,
}

impl Compare for Record {
    fn compare(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

#[test]
fn test_sort_with_ordinal_comparator() {
    let mut list: ArrayList<Record> = ArrayList::new();
    for id in [3, 1, 2] {
        list.add(Record {
            id,
            payload: vec![id],
        });
    }
    list.sort(&mut compare_less::<Record>);
    let ids: Vec<i32> = list.to_vec().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[test]
fn test_replace_all() {
    let mut list = from(&[1, 2, 3]);
    list.replace_all(&mut |e| e * 2);
    assert_eq!(list.to_vec(), [2, 4, 6]);
}

#[test]
fn test_equals_is_structural() {
    let a = from(&[1, 2, 3]);
    let b = from(&[1, 2, 3]);
    let reordered = from(&[3, 2, 1]);
    let shorter = from(&[1, 2]);
    assert!(a.equals(&b));
    assert!(b.equals(&a));
    assert!(!a.equals(&reordered));
    assert!(!a.equals(&shorter));
}

#[test]
fn test_equals_across_storage() {
    let array = from(&[1, 2, 3]);
    let linked: LinkedList<i32> = [1, 2, 3].into_iter().collect();
    assert!(array.equals(&linked));
    assert!(linked.equals(&array));
}

#[test]
fn test_bulk_operations() {
    let mut list = from(&[1, 2, 3, 4, 5]);
    let other = from(&[2, 4]);
    assert!(list.contains_all(&other));
    assert!(!other.contains_all(&list));

    assert_eq!(list.remove_all(&other), 2);
    assert_eq!(list.to_vec(), [1, 3, 5]);

    list.add_all(&other);
    assert_eq!(list.to_vec(), [1, 3, 5, 2, 4]);

    assert_eq!(list.retain_all(&other), 3);
    assert_eq!(list.to_vec(), [2, 4]);

    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
}

#[test]
fn test_custom_comparator() {
    // Equality on absolute value.
    let mut list: ArrayList<i32> =
        ArrayList::with_comparator(4, Arc::new(|a: &i32, b: &i32| a.abs() == b.abs()));
    list.add(-5);
    list.add(3);
    assert!(list.contains(&5));
    assert_eq!(list.index_of(&5), Some(0));
    assert!(list.remove(&5));
    assert_eq!(list.to_vec(), [3]);
}

#[test]
fn test_for_each_propagates_error() {
    let list = from(&[1, 2, 3]);
    let mut seen = Vec::new();
    let err = list
        .for_each(&mut |e| {
            if *e == 3 {
                return Err(crate::error::Error::IllegalState);
            }
            seen.push(*e);
            Ok(())
        })
        .unwrap_err();
    assert!(err.is_illegal_state());
    assert_eq!(seen, [1, 2]);
}

#[test]
fn test_display() {
    let list = from(&[1, 2, 3]);
    assert_eq!(format!("{}", list), "[1 2 3]");
    let strings: ArrayList<String> = ArrayList::new();
    assert_eq!(format!("{}", strings), "[]");
}
