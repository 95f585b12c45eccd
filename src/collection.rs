use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::comparator::EqualComparator;
use crate::cursor::Cursor;
use crate::error::Result;

/// The root contract shared by every container in the crate.
///
/// Elements are passed by value on the way in and cloned on the way out;
/// membership and removal-by-value go through the collection's injected
/// equality capability ([`comparator`](Collection::comparator)).
pub trait Collection<E: Clone> {
    /// Number of elements in the collection.
    fn len(&self) -> usize;

    /// Returns true if the collection holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the collection contains `e` under its equality
    /// capability.
    fn contains(&self, e: &E) -> bool;

    /// Snapshot of the collection's elements. For lists the order is the
    /// list order; for sets it is unspecified.
    fn to_vec(&self) -> Vec<E>;

    /// Adds an element. Returns true if the collection changed; a
    /// container that rejects duplicates returns false for an element it
    /// already holds.
    fn add(&mut self, e: E) -> bool;

    /// Removes the first element equal to `e`. Returns whether one was
    /// removed.
    fn remove(&mut self, e: &E) -> bool;

    /// Returns true if every element of `c` is contained in self.
    fn contains_all(&self, c: &dyn Collection<E>) -> bool;

    /// Adds every element of `c` to self.
    fn add_all(&mut self, c: &dyn Collection<E>);

    /// Removes every element of self that `c` contains. Returns the
    /// number removed.
    fn remove_all(&mut self, c: &dyn Collection<E>) -> usize;

    /// Removes every element matching `filter`. Returns the number
    /// removed.
    fn remove_if(&mut self, filter: &mut dyn FnMut(&E) -> bool) -> usize;

    /// Retains only the elements that `c` contains. Returns the number
    /// removed.
    fn retain_all(&mut self, c: &dyn Collection<E>) -> usize;

    /// Removes all elements.
    fn clear(&mut self);

    /// Structural equality: same elements regardless of which instance
    /// holds them. For ordered collections the order must match too.
    fn equals(&self, c: &dyn Collection<E>) -> bool;

    /// Visits every element until all are processed or `f` returns an
    /// error, which propagates unchanged.
    fn for_each(&self, f: &mut dyn FnMut(&E) -> Result<()>) -> Result<()>;

    /// A single-use cursor over the collection.
    fn cursor(&mut self) -> Box<dyn Cursor<E> + '_>;

    /// The collection's equality capability.
    fn comparator(&self) -> Arc<dyn EqualComparator<E> + Send + Sync>;
}

/// Ordered element-wise equality under `a`'s equality capability.
pub(crate) fn sequence_equals<E: Clone>(a: &dyn Collection<E>, b: &dyn Collection<E>) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let comparator = a.comparator();
    let left = a.to_vec();
    let right = b.to_vec();
    left.iter()
        .zip(right.iter())
        .all(|(v1, v2)| comparator.equal(v1, v2))
}
