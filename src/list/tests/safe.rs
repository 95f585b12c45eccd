extern crate std;

use std::sync::Barrier;
use std::thread;
use std::vec;

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::collection::Collection;
use crate::cursor::{Cursor, ListCursor};
use crate::list::{ArrayList, LinkedList, List, SafeList};

#[test]
fn test_basic_operations_through_shared_handle() {
    let list = SafeList::new(ArrayList::with_capacity(4));
    assert!(list.is_empty());
    list.add(1);
    list.add(2);
    list.add(3);
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(1).unwrap(), 2);
    assert_eq!(list.set(1, 20).unwrap(), 2);
    list.insert(0, 0).unwrap();
    assert_eq!(list.to_vec(), [0, 1, 20, 3]);
    assert_eq!(list.remove_at(2).unwrap(), 20);
    assert_eq!(list.index_of(&3), Some(2));
    assert!(list.remove(&0));
    assert_eq!(list.to_vec(), [1, 3]);
    list.sort(&mut |a, b| a > b);
    assert_eq!(list.to_vec(), [3, 1]);
    list.clear();
    assert!(list.is_empty());
}

#[test]
fn test_linked_storage_behind_lock() {
    let list = SafeList::new(LinkedList::new());
    for v in [1, 2, 3, 4] {
        list.add(v);
    }
    assert_eq!(list.remove_n(&2, None), 1);
    assert_eq!(list.to_vec(), [1, 3, 4]);
    let sub = list.sub_list(1, 3).unwrap();
    assert_eq!(sub.to_vec(), [3, 4]);
}

#[test]
fn test_concurrent_add() {
    let num_threads = 8;
    let per_thread = 250;
    let list = SafeList::new(ArrayList::with_capacity(1));

    let mut handles = vec![];
    for i in 0..num_threads {
        let handle_list = list.clone();
        handles.push(thread::spawn(move || {
            for j in 0..per_thread {
                handle_list.add((i * per_thread + j) as i32);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(list.len(), num_threads * per_thread);
    let mut values = list.to_vec();
    values.sort_unstable();
    let expected: Vec<i32> = (0..(num_threads * per_thread) as i32).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_concurrent_add_then_remove() {
    let num_threads = 4;
    let per_thread = 100;
    let list = SafeList::new(LinkedList::new());
    let barrier = Arc::new(Barrier::new(num_threads));

    let mut handles = vec![];
    for i in 0..num_threads {
        let handle_list = list.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            let base = (i * per_thread) as i32;
            for j in 0..per_thread as i32 {
                handle_list.add(base + j);
            }
            barrier.wait();
            for j in 0..per_thread as i32 {
                assert!(handle_list.remove(&(base + j)));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(list.is_empty());
}

#[test]
fn test_cursor_removal_with_lock_upgrade() {
    let list = SafeList::new(ArrayList::with_capacity(1));
    for v in [1, 2, 3, 4, 5, 10, 9, 8, 7] {
        list.add(v);
    }

    let mut cur = list.safe_cursor();
    assert!(cur.remove().unwrap_err().is_illegal_state());
    while cur.has_next() {
        if cur.next().unwrap() % 2 == 0 {
            cur.remove().unwrap();
        }
    }
    cur.close();

    // The exclusive mode was released on close; the list is usable.
    assert_eq!(list.to_vec(), [1, 3, 5, 9, 7]);
    list.add(11);
    assert_eq!(list.len(), 6);
}

#[test]
fn test_cursor_close_is_idempotent() {
    let list = SafeList::new(ArrayList::with_capacity(1));
    list.add(1);

    let mut cur = list.safe_cursor();
    cur.next().unwrap();
    cur.close();
    cur.close();
    assert!(!cur.has_next());
    assert!(!cur.has_previous());
    assert!(cur.next().unwrap_err().is_cursor_closed());
    assert!(cur.remove().unwrap_err().is_cursor_closed());
    drop(cur);

    list.add(2);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_cursor_drop_releases_shared_lock() {
    let list = SafeList::new(ArrayList::with_capacity(1));
    list.add(1);
    {
        let mut cur = list.safe_cursor();
        assert_eq!(cur.next().unwrap(), 1);
    }
    // A leaked shared mode would block this writer forever.
    list.add(2);
    assert_eq!(list.to_vec(), [1, 2]);
}

#[test]
fn test_cursor_drop_releases_exclusive_lock() {
    let list = SafeList::new(ArrayList::with_capacity(1));
    list.add(1);
    list.add(2);
    {
        let mut cur = list.safe_cursor();
        cur.next().unwrap();
        cur.remove().unwrap();
    }
    list.add(3);
    assert_eq!(list.to_vec(), [2, 3]);
}

#[test]
fn test_concurrent_readers_share_the_lock() {
    let list = SafeList::new(ArrayList::with_capacity(1));
    for v in 0..100 {
        list.add(v);
    }

    let mut handles = vec![];
    for _ in 0..4 {
        let handle_list = list.clone();
        handles.push(thread::spawn(move || {
            let mut sum = 0;
            handle_list
                .for_each(&mut |e| {
                    sum += *e;
                    Ok(())
                })
                .unwrap();
            assert_eq!(sum, 4950);
            assert_eq!(handle_list.get(42).unwrap(), 42);
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_safe_list_equals_plain_list() {
    let safe = SafeList::new(ArrayList::with_capacity(1));
    safe.add(1);
    safe.add(2);
    let plain: ArrayList<i32> = [1, 2].into_iter().collect();
    assert!(safe.equals(&plain));
    assert!(plain.equals(&safe));
}

#[test]
fn test_trait_object_surface() {
    // The decorator satisfies the same contract as the lists it wraps.
    let mut boxed: alloc::boxed::Box<dyn List<i32> + Send + Sync> =
        alloc::boxed::Box::new(SafeList::new(ArrayList::with_capacity(1)));
    boxed.add(1);
    boxed.add(2);
    let mut cur = boxed.list_cursor();
    assert_eq!(cur.next().unwrap(), 1);
    cur.close();
    drop(cur);
    assert_eq!(boxed.to_vec(), [1, 2]);
}
