//! In-memory collections with a shared contract over two list storage
//! strategies, a hash-backed set, bidirectional cursors, and a lock-based
//! thread-safe list decorator.
//!
//! Lists come in a contiguous variant ([`ArrayList`]) and an arena-backed
//! doubly-linked variant ([`LinkedList`]); both implement the same
//! [`Collection`]/[`List`] traits and hand out single-use [`ListCursor`]s
//! that support removal mid-traversal. [`SafeList`] wraps any list behind a
//! shared reader/writer lock, and its cursors participate in the same lock,
//! upgrading to exclusive mode on the first removal.
//!
//! # Examples
//!
//! ```
//! use skua_collections::prelude::*;
//!
//! let mut list = ArrayList::new();
//! list.add(3);
//! list.add(1);
//! list.add(2);
//!
//! list.sort(&mut |a, b| a < b);
//! assert_eq!(list.to_vec(), [1, 2, 3]);
//!
//! let mut cur = list.list_cursor();
//! while cur.has_next() {
//!     if cur.next().unwrap() == 2 {
//!         cur.remove().unwrap();
//!     }
//! }
//! drop(cur);
//! assert_eq!(list.to_vec(), [1, 3]);
//! ```

#![no_std]

extern crate alloc;

pub mod collection;
pub mod comparator;
pub mod cursor;
pub mod error;
pub mod list;
pub mod set;

pub mod prelude {
    pub use crate::collection::Collection;
    pub use crate::comparator::{Compare, EqualComparator, IntrinsicEqual, compare_less};
    pub use crate::cursor::{Cursor, ListCursor};
    pub use crate::error::{Error, Result};
    pub use crate::list::{ArrayList, LinkedList, List, ListBuilder, Queue, SafeList, Storage};
    pub use crate::set::{HashSet, Set};
}

pub use collection::Collection;
pub use cursor::{Cursor, ListCursor};
pub use error::{Error, Result};
pub use list::{ArrayList, LinkedList, List, SafeList};
pub use set::HashSet;
