//! Ordered lists over two storage strategies.
//!
//! [`ArrayList`] keeps its elements in one contiguous growable buffer;
//! [`LinkedList`] keeps them in doubly-linked nodes inside a slot arena.
//! Both implement the same [`List`] contract, so code written against the
//! trait runs unchanged over either storage. [`SafeList`] decorates any
//! list with a shared reader/writer lock, and [`ListBuilder`] picks the
//! concrete shape from a configuration record.

use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::collection::Collection;
use crate::comparator::{EqualComparator, IntrinsicEqual};
use crate::cursor::ListCursor;
use crate::error::Result;

mod array;
mod linked;
mod safe;

#[cfg(test)]
mod tests;

pub use array::ArrayList;
pub use linked::{LinkedCursor, LinkedList};
pub use safe::{SafeCursor, SafeList};

/// Initial buffer capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 16;

/// An ordered collection with positional access.
///
/// Valid indices are `[0, len)`; positional access outside that range is
/// reported as [`Error::OutOfRange`](crate::error::Error::OutOfRange),
/// never undefined behavior. The one deliberate extension is
/// [`insert`](List::insert), which additionally accepts `index == len`
/// as an append.
pub trait List<E: Clone>: Collection<E> {
    /// Replaces every element with the result of applying `operator` to
    /// it.
    fn replace_all(&mut self, operator: &mut dyn FnMut(&E) -> E);

    /// Sorts the list so the final order satisfies `less`. Ties are
    /// unconstrained.
    fn sort(&mut self, less: &mut dyn FnMut(&E, &E) -> bool);

    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Result<E>;

    /// Replaces the element at `index`, returning the old value.
    fn set(&mut self, index: usize, e: E) -> Result<E>;

    /// Inserts `e` at `index`, shifting trailing elements right.
    /// `index == len` appends.
    fn insert(&mut self, index: usize, e: E) -> Result<()>;

    /// Removes and returns the element at `index`, shifting trailing
    /// elements left.
    fn remove_at(&mut self, index: usize) -> Result<E>;

    /// Index of the first element equal to `e`, if any.
    fn index_of(&self, e: &E) -> Option<usize>;

    /// Index of the last element equal to `e`, if any.
    fn last_index_of(&self, e: &E) -> Option<usize>;

    /// A bidirectional cursor positioned at the start of the list.
    fn list_cursor(&mut self) -> Box<dyn ListCursor<E> + '_>;

    /// A bidirectional cursor positioned so the first `next` returns the
    /// element at `index`.
    fn list_cursor_at(&mut self, index: usize) -> Box<dyn ListCursor<E> + '_>;

    /// A new independent list holding a copy of `[from_index, to_index)`.
    fn sub_list(&self, from_index: usize, to_index: usize) -> Result<Box<dyn List<E>>>;

    /// Removes up to `n` elements equal to `e` (`None` removes all).
    /// Returns the number removed.
    fn remove_n(&mut self, e: &E, n: Option<usize>) -> usize;

    /// Removes up to `n` elements matching `filter` (`None` removes
    /// all), preserving the relative order of survivors. Returns the
    /// number removed; `Some(0)` is a no-op returning 0.
    fn remove_if_n(&mut self, filter: &mut dyn FnMut(&E) -> bool, n: Option<usize>) -> usize;
}

impl<E: Clone + core::fmt::Debug> core::fmt::Debug for dyn List<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

/// A first-in first-out view of a collection.
pub trait Queue<E: Clone>: Collection<E> {
    /// Inserts at the tail if capacity allows. An unbounded queue always
    /// returns true.
    fn put(&mut self, e: E) -> bool;

    /// Removes and returns the head, or `None` when empty.
    fn take(&mut self) -> Option<E>;

    /// Returns the head without removing it, or `None` when empty.
    fn peek(&self) -> Option<E>;
}

/// Which underlying storage a built list uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Storage {
    /// One contiguous growable buffer ([`ArrayList`]).
    #[default]
    Contiguous,
    /// Doubly-linked arena nodes ([`LinkedList`]).
    Linked,
}

/// Builder for the list configuration record: storage strategy, initial
/// capacity, thread safety, and the optional equality capability.
///
/// ```
/// use skua_collections::list::{ListBuilder, Storage};
/// use skua_collections::collection::Collection;
///
/// let mut list = ListBuilder::new()
///     .storage(Storage::Linked)
///     .thread_safe(true)
///     .build::<i32>();
/// list.add(1);
/// assert_eq!(list.len(), 1);
/// ```
pub struct ListBuilder {
    initial_capacity: usize,
    thread_safe: bool,
    storage: Storage,
}

impl ListBuilder {
    pub fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            thread_safe: false,
            storage: Storage::default(),
        }
    }

    /// Set the initial buffer capacity.
    ///
    /// # Arguments
    /// * `capacity` - The initial capacity; values below 1 are clamped to 1
    ///
    /// # Returns
    /// The builder instance for method chaining
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity.max(1);
        self
    }

    /// Wrap the built list in a [`SafeList`].
    ///
    /// # Arguments
    /// * `thread_safe` - Whether every operation runs under a shared
    ///   reader/writer lock
    ///
    /// # Returns
    /// The builder instance for method chaining
    pub fn thread_safe(mut self, thread_safe: bool) -> Self {
        self.thread_safe = thread_safe;
        self
    }

    /// Choose the storage strategy.
    ///
    /// # Arguments
    /// * `storage` - Contiguous buffer or linked arena nodes
    ///
    /// # Returns
    /// The builder instance for method chaining
    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    /// Build the list with the intrinsic equality capability.
    ///
    /// # Returns
    /// A boxed list of the configured shape
    pub fn build<E>(self) -> Box<dyn List<E> + Send + Sync>
    where
        E: Clone + PartialEq + Send + Sync + 'static,
    {
        self.build_with_comparator(Arc::new(IntrinsicEqual))
    }

    /// Build the list with an explicitly injected equality capability.
    ///
    /// # Arguments
    /// * `comparator` - The equality capability every membership test and
    ///   removal-by-value goes through
    ///
    /// # Returns
    /// A boxed list of the configured shape
    pub fn build_with_comparator<E>(
        self,
        comparator: Arc<dyn EqualComparator<E> + Send + Sync>,
    ) -> Box<dyn List<E> + Send + Sync>
    where
        E: Clone + Send + Sync + 'static,
    {
        match (self.storage, self.thread_safe) {
            (Storage::Contiguous, false) => {
                Box::new(ArrayList::with_comparator(self.initial_capacity, comparator))
            }
            (Storage::Linked, false) => {
                Box::new(LinkedList::with_comparator(self.initial_capacity, comparator))
            }
            (Storage::Contiguous, true) => Box::new(SafeList::new(ArrayList::with_comparator(
                self.initial_capacity,
                comparator,
            ))),
            (Storage::Linked, true) => Box::new(SafeList::new(LinkedList::with_comparator(
                self.initial_capacity,
                comparator,
            ))),
        }
    }
}

impl Default for ListBuilder {
    fn default() -> Self {
        Self::new()
    }
}
