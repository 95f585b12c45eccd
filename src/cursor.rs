use crate::error::{Error, Result};
use crate::list::List;

/// A single-use cursor over a collection.
///
/// A cursor is bound to the collection instance that produced it and
/// tracks two positions: the element a subsequent [`next`](Cursor::next)
/// will return, and the most recently returned element (which
/// [`remove`](Cursor::remove) targets). Once [`close`](Cursor::close) has
/// been called, every fallible operation reports
/// [`Error::CursorClosed`]; the boolean queries simply report false.
pub trait Cursor<E> {
    /// Returns true if a call to `next` would yield an element.
    fn has_next(&self) -> bool;

    /// Returns the next element and advances the cursor.
    ///
    /// Fails with [`Error::NoSuchElement`] once the cursor is exhausted.
    fn next(&mut self) -> Result<E>;

    /// Removes the element most recently returned by an advance.
    ///
    /// Valid only once per advance: fails with [`Error::IllegalState`]
    /// when no advance has happened since construction or since the last
    /// `remove`. Afterwards the cursor is repositioned so the element
    /// that slid into the gap is the one a following `next` returns.
    fn remove(&mut self) -> Result<()>;

    /// Visits every not-yet-returned element in forward order without
    /// advancing the cursor, stopping at the first callback error and
    /// surfacing it unchanged.
    fn for_each_remaining(&mut self, action: &mut dyn FnMut(&E) -> Result<()>) -> Result<()>;

    /// Closes the cursor. Idempotent.
    fn close(&mut self);
}

/// A bidirectional cursor over a list.
///
/// `next` followed by `previous` returns the same element and restores
/// both [`next_index`](ListCursor::next_index) and
/// [`previous_index`](ListCursor::previous_index) to their values before
/// the `next` call.
pub trait ListCursor<E>: Cursor<E> {
    /// Returns true if a call to `previous` would yield an element.
    fn has_previous(&self) -> bool;

    /// Returns the element before the cursor and moves the cursor back.
    ///
    /// Fails with [`Error::NoSuchElement`] at the start of the list.
    fn previous(&mut self) -> Result<E>;

    /// The index of the element a subsequent `next` would return.
    fn next_index(&self) -> usize;

    /// The index of the most recently returned position, or `None` when
    /// there is none (fresh cursor at the start, or just after `remove`).
    fn previous_index(&self) -> Option<usize>;
}

/// Index-based cursor over any [`List`] implementation.
///
/// Borrowing the list mutably for the cursor's lifetime means no other
/// access can interleave with the traversal; structural changes go
/// through [`Cursor::remove`] only.
pub struct IndexCursor<'a, E, L>
where
    E: Clone,
    L: List<E> + ?Sized,
{
    list: &'a mut L,
    cursor: usize,
    last_ret: Option<usize>,
    closed: bool,
    _marker: core::marker::PhantomData<fn() -> E>,
}

impl<'a, E, L> IndexCursor<'a, E, L>
where
    E: Clone,
    L: List<E> + ?Sized,
{
    /// Creates a cursor positioned so the first `next` returns the
    /// element at `start`.
    pub fn new(list: &'a mut L, start: usize) -> Self {
        Self {
            list,
            cursor: start,
            last_ret: None,
            closed: false,
            _marker: core::marker::PhantomData,
        }
    }
}

impl<'a, E, L> Cursor<E> for IndexCursor<'a, E, L>
where
    E: Clone,
    L: List<E> + ?Sized,
{
    fn has_next(&self) -> bool {
        !self.closed && self.cursor < self.list.len()
    }

    fn next(&mut self) -> Result<E> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let i = self.cursor;
        if i >= self.list.len() {
            return Err(Error::NoSuchElement);
        }
        let e = self.list.get(i)?;
        self.cursor = i + 1;
        self.last_ret = Some(i);
        Ok(e)
    }

    fn remove(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let Some(last) = self.last_ret else {
            return Err(Error::IllegalState);
        };
        self.list.remove_at(last)?;
        self.cursor = last;
        self.last_ret = None;
        Ok(())
    }

    fn for_each_remaining(&mut self, action: &mut dyn FnMut(&E) -> Result<()>) -> Result<()> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let len = self.list.len();
        for i in self.cursor..len {
            let e = self.list.get(i)?;
            action(&e)?;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
        self.last_ret = None;
    }
}

impl<'a, E, L> ListCursor<E> for IndexCursor<'a, E, L>
where
    E: Clone,
    L: List<E> + ?Sized,
{
    fn has_previous(&self) -> bool {
        !self.closed && self.cursor != 0
    }

    fn previous(&mut self) -> Result<E> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        if self.cursor == 0 {
            return Err(Error::NoSuchElement);
        }
        let i = self.cursor - 1;
        let e = self.list.get(i)?;
        self.cursor = i;
        self.last_ret = i.checked_sub(1);
        Ok(e)
    }

    fn next_index(&self) -> usize {
        self.cursor
    }

    fn previous_index(&self) -> Option<usize> {
        if self.closed {
            return None;
        }
        self.cursor.checked_sub(1)
    }
}
