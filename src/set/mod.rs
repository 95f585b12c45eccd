//! Unordered unique-element containers.
//!
//! [`HashSet`] maps each element to a unit marker in a hash table; its
//! cursor traverses a snapshot taken at creation time, while removal
//! through the cursor still targets the live set by value.

use core::fmt;
use core::hash::Hash;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::collection::Collection;
use crate::comparator::{EqualComparator, IntrinsicEqual};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

#[cfg(test)]
mod tests;

/// An unordered collection without duplicate elements.
pub trait Set<E: Clone>: Collection<E> {}

/// A set backed by a hash table mapping elements to a unit marker.
///
/// Membership, insertion, and removal are amortized O(1). Iteration
/// order is unspecified.
pub struct HashSet<E> {
    data: HashMap<E, ()>,
}

impl<E: Eq + Hash> HashSet<E> {
    /// An empty set.
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// An empty set with room for `capacity` elements before rehashing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: HashMap::with_capacity(capacity),
        }
    }
}

impl<E: Eq + Hash> Default for HashSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Eq + Hash> FromIterator<E> for HashSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().map(|e| (e, ())).collect(),
        }
    }
}

impl<E: Eq + Hash + Clone + 'static> Collection<E> for HashSet<E> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn contains(&self, e: &E) -> bool {
        self.data.contains_key(e)
    }

    fn to_vec(&self) -> Vec<E> {
        self.data.keys().cloned().collect()
    }

    /// Returns true if `e` was newly inserted, false if the set already
    /// contained it.
    fn add(&mut self, e: E) -> bool {
        self.data.insert(e, ()).is_none()
    }

    fn remove(&mut self, e: &E) -> bool {
        self.data.remove(e).is_some()
    }

    fn contains_all(&self, c: &dyn Collection<E>) -> bool {
        c.to_vec().iter().all(|e| self.contains(e))
    }

    fn add_all(&mut self, c: &dyn Collection<E>) {
        for e in c.to_vec() {
            self.data.insert(e, ());
        }
    }

    fn remove_all(&mut self, c: &dyn Collection<E>) -> usize {
        self.remove_if(&mut |e| c.contains(e))
    }

    // Deletion during the table's own forward pass is well-defined, so
    // one retain pass suffices.
    fn remove_if(&mut self, filter: &mut dyn FnMut(&E) -> bool) -> usize {
        let before = self.data.len();
        self.data.retain(|k, _| !filter(k));
        before - self.data.len()
    }

    fn retain_all(&mut self, c: &dyn Collection<E>) -> usize {
        self.remove_if(&mut |e| !c.contains(e))
    }

    fn clear(&mut self) {
        self.data.clear();
    }

    fn equals(&self, c: &dyn Collection<E>) -> bool {
        self.len() == c.len() && self.contains_all(c)
    }

    fn for_each(&self, f: &mut dyn FnMut(&E) -> Result<()>) -> Result<()> {
        for k in self.data.keys() {
            f(k)?;
        }
        Ok(())
    }

    fn cursor(&mut self) -> Box<dyn Cursor<E> + '_> {
        Box::new(SetCursor::new(self))
    }

    fn comparator(&self) -> Arc<dyn EqualComparator<E> + Send + Sync> {
        Arc::new(IntrinsicEqual)
    }
}

impl<E: Eq + Hash + Clone + 'static> Set<E> for HashSet<E> {}

/// A one-shot snapshot cursor over a [`HashSet`].
///
/// The traversal set is fixed when the cursor is created; later mutation
/// of the live set is not reflected. [`remove`](Cursor::remove) deletes
/// the last-returned element from the live set by value.
pub struct SetCursor<'a, E: Eq + Hash + Clone> {
    set: &'a mut HashSet<E>,
    values: Vec<E>,
    cursor: usize,
    last_ret: Option<usize>,
    closed: bool,
}

impl<'a, E: Eq + Hash + Clone + 'static> SetCursor<'a, E> {
    pub fn new(set: &'a mut HashSet<E>) -> Self {
        let values = set.to_vec();
        Self {
            set,
            values,
            cursor: 0,
            last_ret: None,
            closed: false,
        }
    }
}

impl<'a, E: Eq + Hash + Clone + 'static> Cursor<E> for SetCursor<'a, E> {
    fn has_next(&self) -> bool {
        !self.closed && self.cursor < self.values.len()
    }

    fn next(&mut self) -> Result<E> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let i = self.cursor;
        if i >= self.values.len() {
            return Err(Error::NoSuchElement);
        }
        self.cursor = i + 1;
        self.last_ret = Some(i);
        Ok(self.values[i].clone())
    }

    fn remove(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let Some(last) = self.last_ret else {
            return Err(Error::IllegalState);
        };
        self.set.data.remove(&self.values[last]);
        self.last_ret = None;
        Ok(())
    }

    fn for_each_remaining(&mut self, action: &mut dyn FnMut(&E) -> Result<()>) -> Result<()> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        for e in &self.values[self.cursor..] {
            action(e)?;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
        self.last_ret = None;
    }
}

impl<E: fmt::Display> fmt::Display for HashSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, e) in self.data.keys().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", e)?;
        }
        f.write_str("]")
    }
}

impl<E: fmt::Debug> fmt::Debug for HashSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.data.keys()).finish()
    }
}
