use core::cmp::Ordering;
use core::fmt;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::collection::{Collection, sequence_equals};
use crate::comparator::{EqualComparator, IntrinsicEqual};
use crate::cursor::{Cursor, IndexCursor, ListCursor};
use crate::error::{Error, Result, range_check};
use crate::list::{DEFAULT_CAPACITY, List};

// Capacity below which growth doubles; above it, growth switches to the
// gentler additive step in `grow`.
const DOUBLING_LIMIT: usize = 256;

/// A list backed by one contiguous growable buffer.
///
/// Appends are amortized O(1) under the two-phase growth policy; all
/// positional operations are O(1) access plus O(len - index) shifting.
pub struct ArrayList<E> {
    data: Vec<E>,
    comparator: Arc<dyn EqualComparator<E> + Send + Sync>,
}

impl<E: PartialEq> ArrayList<E> {
    /// An empty list with the default capacity and intrinsic equality.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// An empty list with the given capacity and intrinsic equality.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_comparator(capacity, Arc::new(IntrinsicEqual))
    }
}

impl<E> ArrayList<E> {
    /// An empty list with an explicitly injected equality capability.
    pub fn with_comparator(
        capacity: usize,
        comparator: Arc<dyn EqualComparator<E> + Send + Sync>,
    ) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            comparator,
        }
    }

    /// Current buffer capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    // Grows the buffer so it can hold at least `min_capacity` elements:
    // double while the capacity is below DOUBLING_LIMIT, then step by
    // (capacity + 3 * DOUBLING_LIMIT) / 4 until sufficient, clamped to
    // the requested minimum.
    fn grow(&mut self, min_capacity: usize) {
        let capacity = self.data.capacity();
        if capacity >= min_capacity {
            return;
        }
        let double = capacity.saturating_mul(2);
        let new_capacity = if min_capacity > double {
            min_capacity
        } else if capacity < DOUBLING_LIMIT {
            double
        } else {
            let mut next = capacity;
            while next < min_capacity {
                next += (next + 3 * DOUBLING_LIMIT) / 4;
            }
            next
        };
        self.data.reserve_exact(new_capacity - self.data.len());
    }
}

impl<E: PartialEq> Default for ArrayList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PartialEq> FromIterator<E> for ArrayList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let data: Vec<E> = iter.into_iter().collect();
        Self {
            data,
            comparator: Arc::new(IntrinsicEqual),
        }
    }
}

impl<E: Clone + 'static> Collection<E> for ArrayList<E> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    fn contains(&self, e: &E) -> bool {
        self.index_of(e).is_some()
    }

    fn to_vec(&self) -> Vec<E> {
        self.data.clone()
    }

    fn add(&mut self, e: E) -> bool {
        self.grow(self.data.len() + 1);
        self.data.push(e);
        true
    }

    fn remove(&mut self, e: &E) -> bool {
        self.remove_n(e, Some(1)) == 1
    }

    fn contains_all(&self, c: &dyn Collection<E>) -> bool {
        c.to_vec().iter().all(|e| self.contains(e))
    }

    fn add_all(&mut self, c: &dyn Collection<E>) {
        let arr = c.to_vec();
        self.grow(self.data.len() + arr.len());
        self.data.extend(arr);
    }

    fn remove_all(&mut self, c: &dyn Collection<E>) -> usize {
        self.remove_if_n(&mut |e| c.contains(e), None)
    }

    fn remove_if(&mut self, filter: &mut dyn FnMut(&E) -> bool) -> usize {
        self.remove_if_n(filter, None)
    }

    fn retain_all(&mut self, c: &dyn Collection<E>) -> usize {
        self.remove_if_n(&mut |e| !c.contains(e), None)
    }

    fn clear(&mut self) {
        self.data.clear();
    }

    fn equals(&self, c: &dyn Collection<E>) -> bool {
        sequence_equals(self, c)
    }

    fn for_each(&self, f: &mut dyn FnMut(&E) -> Result<()>) -> Result<()> {
        for e in &self.data {
            f(e)?;
        }
        Ok(())
    }

    fn cursor(&mut self) -> Box<dyn Cursor<E> + '_> {
        Box::new(IndexCursor::new(self, 0))
    }

    fn comparator(&self) -> Arc<dyn EqualComparator<E> + Send + Sync> {
        Arc::clone(&self.comparator)
    }
}

impl<E: Clone + 'static> List<E> for ArrayList<E> {
    fn replace_all(&mut self, operator: &mut dyn FnMut(&E) -> E) {
        for slot in &mut self.data {
            *slot = operator(slot);
        }
    }

    fn sort(&mut self, less: &mut dyn FnMut(&E, &E) -> bool) {
        self.data.sort_by(|a, b| {
            if less(a, b) {
                Ordering::Less
            } else if less(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
    }

    fn get(&self, index: usize) -> Result<E> {
        range_check(index, self.data.len())?;
        Ok(self.data[index].clone())
    }

    fn set(&mut self, index: usize, e: E) -> Result<E> {
        range_check(index, self.data.len())?;
        Ok(core::mem::replace(&mut self.data[index], e))
    }

    fn insert(&mut self, index: usize, e: E) -> Result<()> {
        if index > self.data.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.data.len(),
            });
        }
        self.grow(self.data.len() + 1);
        self.data.insert(index, e);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<E> {
        range_check(index, self.data.len())?;
        Ok(self.data.remove(index))
    }

    fn index_of(&self, e: &E) -> Option<usize> {
        self.data.iter().position(|o| self.comparator.equal(e, o))
    }

    fn last_index_of(&self, e: &E) -> Option<usize> {
        self.data.iter().rposition(|o| self.comparator.equal(e, o))
    }

    fn list_cursor(&mut self) -> Box<dyn ListCursor<E> + '_> {
        self.list_cursor_at(0)
    }

    fn list_cursor_at(&mut self, index: usize) -> Box<dyn ListCursor<E> + '_> {
        Box::new(IndexCursor::new(self, index))
    }

    fn sub_list(&self, from_index: usize, to_index: usize) -> Result<Box<dyn List<E>>> {
        if to_index > self.data.len() || from_index > to_index {
            return Err(Error::OutOfRange {
                index: from_index.max(to_index),
                len: self.data.len(),
            });
        }
        Ok(Box::new(ArrayList {
            data: self.data[from_index..to_index].to_vec(),
            comparator: Arc::clone(&self.comparator),
        }))
    }

    fn remove_n(&mut self, e: &E, n: Option<usize>) -> usize {
        let comparator = Arc::clone(&self.comparator);
        self.remove_if_n(&mut |o| comparator.equal(e, o), n)
    }

    // Single compacting pass: survivors are swapped down past the gaps
    // left by matches, then the matched tail is truncated (and dropped).
    // Relative order of survivors is preserved.
    fn remove_if_n(&mut self, filter: &mut dyn FnMut(&E) -> bool, n: Option<usize>) -> usize {
        let limit = match n {
            Some(0) => return 0,
            Some(k) => k,
            None => self.data.len(),
        };
        let len = self.data.len();
        let mut removed = 0;
        let mut write = 0;
        for read in 0..len {
            if removed < limit && filter(&self.data[read]) {
                removed += 1;
            } else {
                if write != read {
                    self.data.swap(write, read);
                }
                write += 1;
            }
        }
        self.data.truncate(write);
        removed
    }
}

impl<E: fmt::Display> fmt::Display for ArrayList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, e) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", e)?;
        }
        f.write_str("]")
    }
}

impl<E: fmt::Debug> fmt::Debug for ArrayList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}
