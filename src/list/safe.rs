use core::marker::PhantomData;
use core::ptr::NonNull;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crossbeam_utils::CachePadded;
use spin::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::collection::Collection;
use crate::comparator::EqualComparator;
use crate::cursor::{Cursor, ListCursor};
use crate::error::{Error, Result};
use crate::list::List;

/// A thread-safe decorator over any [`List`] implementation.
///
/// Every read operation runs under the shared mode of one reader/writer
/// lock and every mutating operation under the exclusive mode, so no
/// method of the wrapped list is reachable unsynchronized. `Clone`
/// produces another handle to the same underlying list; clones are the
/// unit of sharing across threads.
///
/// The lock is not reentrant: calling back into the same list from a
/// thread that already holds one of its cursors deadlocks. That nested
/// acquisition is the caller's to avoid.
pub struct SafeList<E, L> {
    inner: Arc<CachePadded<RwLock<L>>>,
    _marker: PhantomData<fn() -> E>,
}

impl<E, L> Clone for SafeList<E, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<E, L> SafeList<E, L>
where
    E: Clone + 'static,
    L: List<E>,
{
    /// Wraps `list` behind a fresh reader/writer lock.
    pub fn new(list: L) -> Self {
        Self {
            inner: Arc::new(CachePadded::new(RwLock::new(list))),
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn contains(&self, e: &E) -> bool {
        self.inner.read().contains(e)
    }

    pub fn to_vec(&self) -> Vec<E> {
        self.inner.read().to_vec()
    }

    pub fn add(&self, e: E) -> bool {
        self.inner.write().add(e)
    }

    pub fn remove(&self, e: &E) -> bool {
        self.inner.write().remove(e)
    }

    pub fn contains_all(&self, c: &dyn Collection<E>) -> bool {
        self.inner.read().contains_all(c)
    }

    pub fn add_all(&self, c: &dyn Collection<E>) {
        self.inner.write().add_all(c)
    }

    pub fn remove_all(&self, c: &dyn Collection<E>) -> usize {
        self.inner.write().remove_all(c)
    }

    pub fn remove_if(&self, filter: &mut dyn FnMut(&E) -> bool) -> usize {
        self.inner.write().remove_if(filter)
    }

    pub fn retain_all(&self, c: &dyn Collection<E>) -> usize {
        self.inner.write().retain_all(c)
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    pub fn equals(&self, c: &dyn Collection<E>) -> bool {
        self.inner.read().equals(c)
    }

    pub fn for_each(&self, f: &mut dyn FnMut(&E) -> Result<()>) -> Result<()> {
        self.inner.read().for_each(f)
    }

    pub fn comparator(&self) -> Arc<dyn EqualComparator<E> + Send + Sync> {
        self.inner.read().comparator()
    }

    pub fn replace_all(&self, operator: &mut dyn FnMut(&E) -> E) {
        self.inner.write().replace_all(operator)
    }

    pub fn sort(&self, less: &mut dyn FnMut(&E, &E) -> bool) {
        self.inner.write().sort(less)
    }

    pub fn get(&self, index: usize) -> Result<E> {
        self.inner.read().get(index)
    }

    pub fn set(&self, index: usize, e: E) -> Result<E> {
        self.inner.write().set(index, e)
    }

    pub fn insert(&self, index: usize, e: E) -> Result<()> {
        self.inner.write().insert(index, e)
    }

    pub fn remove_at(&self, index: usize) -> Result<E> {
        self.inner.write().remove_at(index)
    }

    pub fn index_of(&self, e: &E) -> Option<usize> {
        self.inner.read().index_of(e)
    }

    pub fn last_index_of(&self, e: &E) -> Option<usize> {
        self.inner.read().last_index_of(e)
    }

    /// An independent copy of `[from_index, to_index)`. The copy is a
    /// plain list: it shares nothing with this one, so it carries no
    /// lock.
    pub fn sub_list(&self, from_index: usize, to_index: usize) -> Result<Box<dyn List<E>>> {
        self.inner.read().sub_list(from_index, to_index)
    }

    pub fn remove_n(&self, e: &E, n: Option<usize>) -> usize {
        self.inner.write().remove_n(e, n)
    }

    pub fn remove_if_n(&self, filter: &mut dyn FnMut(&E) -> bool, n: Option<usize>) -> usize {
        self.inner.write().remove_if_n(filter, n)
    }

    /// A locking cursor positioned at the start of the list.
    ///
    /// The cursor holds the shared lock for its whole lifetime and
    /// upgrades to the exclusive mode on its first `remove`; it must be
    /// closed (or dropped) to release whichever mode it holds.
    pub fn safe_cursor(&self) -> SafeCursor<E, L> {
        self.safe_cursor_at(0)
    }

    /// A locking cursor positioned so the first `next` returns the
    /// element at `start`.
    pub fn safe_cursor_at(&self, start: usize) -> SafeCursor<E, L> {
        SafeCursor::new(Arc::clone(&self.inner), start)
    }
}

impl<E, L> Collection<E> for SafeList<E, L>
where
    E: Clone + 'static,
    L: List<E>,
{
    fn len(&self) -> usize {
        SafeList::len(self)
    }

    fn contains(&self, e: &E) -> bool {
        SafeList::contains(self, e)
    }

    fn to_vec(&self) -> Vec<E> {
        SafeList::to_vec(self)
    }

    fn add(&mut self, e: E) -> bool {
        SafeList::add(self, e)
    }

    fn remove(&mut self, e: &E) -> bool {
        SafeList::remove(self, e)
    }

    fn contains_all(&self, c: &dyn Collection<E>) -> bool {
        SafeList::contains_all(self, c)
    }

    fn add_all(&mut self, c: &dyn Collection<E>) {
        SafeList::add_all(self, c)
    }

    fn remove_all(&mut self, c: &dyn Collection<E>) -> usize {
        SafeList::remove_all(self, c)
    }

    fn remove_if(&mut self, filter: &mut dyn FnMut(&E) -> bool) -> usize {
        SafeList::remove_if(self, filter)
    }

    fn retain_all(&mut self, c: &dyn Collection<E>) -> usize {
        SafeList::retain_all(self, c)
    }

    fn clear(&mut self) {
        SafeList::clear(self)
    }

    fn equals(&self, c: &dyn Collection<E>) -> bool {
        SafeList::equals(self, c)
    }

    fn for_each(&self, f: &mut dyn FnMut(&E) -> Result<()>) -> Result<()> {
        SafeList::for_each(self, f)
    }

    fn cursor(&mut self) -> Box<dyn Cursor<E> + '_> {
        Box::new(self.safe_cursor())
    }

    fn comparator(&self) -> Arc<dyn EqualComparator<E> + Send + Sync> {
        SafeList::comparator(self)
    }
}

impl<E, L> List<E> for SafeList<E, L>
where
    E: Clone + 'static,
    L: List<E>,
{
    fn replace_all(&mut self, operator: &mut dyn FnMut(&E) -> E) {
        SafeList::replace_all(self, operator)
    }

    fn sort(&mut self, less: &mut dyn FnMut(&E, &E) -> bool) {
        SafeList::sort(self, less)
    }

    fn get(&self, index: usize) -> Result<E> {
        SafeList::get(self, index)
    }

    fn set(&mut self, index: usize, e: E) -> Result<E> {
        SafeList::set(self, index, e)
    }

    fn insert(&mut self, index: usize, e: E) -> Result<()> {
        SafeList::insert(self, index, e)
    }

    fn remove_at(&mut self, index: usize) -> Result<E> {
        SafeList::remove_at(self, index)
    }

    fn index_of(&self, e: &E) -> Option<usize> {
        SafeList::index_of(self, e)
    }

    fn last_index_of(&self, e: &E) -> Option<usize> {
        SafeList::last_index_of(self, e)
    }

    fn list_cursor(&mut self) -> Box<dyn ListCursor<E> + '_> {
        Box::new(self.safe_cursor())
    }

    fn list_cursor_at(&mut self, index: usize) -> Box<dyn ListCursor<E> + '_> {
        Box::new(self.safe_cursor_at(index))
    }

    fn sub_list(&self, from_index: usize, to_index: usize) -> Result<Box<dyn List<E>>> {
        SafeList::sub_list(self, from_index, to_index)
    }

    fn remove_n(&mut self, e: &E, n: Option<usize>) -> usize {
        SafeList::remove_n(self, e, n)
    }

    fn remove_if_n(&mut self, filter: &mut dyn FnMut(&E) -> bool, n: Option<usize>) -> usize {
        SafeList::remove_if_n(self, filter, n)
    }
}

/// A cursor that participates in its list's reader/writer lock.
///
/// Created holding the shared mode; the first [`remove`](Cursor::remove)
/// releases it and takes the exclusive mode for the rest of the cursor's
/// life (the upgrade is irreversible per cursor). [`close`](Cursor::close)
/// releases whichever mode is held, exactly once; dropping an unclosed
/// cursor releases it too. Cursor-local state needs no lock of its own:
/// `&mut self` already makes each call exclusive.
pub struct SafeCursor<E, L> {
    lock: Arc<CachePadded<RwLock<L>>>,
    // Data pointer of the lock, valid while this cursor holds the lock
    // in either mode; `&mut` access only once `upgraded` is set.
    list: NonNull<L>,
    cursor: usize,
    last_ret: Option<usize>,
    closed: bool,
    upgraded: bool,
    _marker: PhantomData<fn() -> E>,
}

unsafe impl<E, L: Send + Sync> Send for SafeCursor<E, L> {}

impl<E, L> SafeCursor<E, L>
where
    E: Clone + 'static,
    L: List<E>,
{
    fn new(lock: Arc<CachePadded<RwLock<L>>>, start: usize) -> Self {
        let list = NonNull::from(RwLockReadGuard::leak(lock.read()));
        Self {
            lock,
            list,
            cursor: start,
            last_ret: None,
            closed: false,
            upgraded: false,
            _marker: PhantomData,
        }
    }

    fn inner(&self) -> &L {
        // Holding the lock in either mode keeps the data valid for
        // shared access.
        unsafe { self.list.as_ref() }
    }

    fn inner_mut(&mut self) -> &mut L {
        debug_assert!(self.upgraded);
        // Only reachable after the upgrade, when this cursor is the
        // exclusive holder.
        unsafe { self.list.as_mut() }
    }

    // Shared -> exclusive transition on first remove. The shared mode is
    // released before the exclusive mode is acquired, so another writer
    // may run in between; the removal below re-validates its index
    // against the list as found.
    fn upgrade(&mut self) {
        if self.upgraded {
            return;
        }
        unsafe { self.lock.force_read_decrement() };
        let list = NonNull::from(RwLockWriteGuard::leak(self.lock.write()));
        self.list = list;
        self.upgraded = true;
    }

    fn release(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.last_ret = None;
        if self.upgraded {
            unsafe { self.lock.force_write_unlock() };
        } else {
            unsafe { self.lock.force_read_decrement() };
        }
    }
}

impl<E, L> Cursor<E> for SafeCursor<E, L>
where
    E: Clone + 'static,
    L: List<E>,
{
    fn has_next(&self) -> bool {
        !self.closed && self.cursor < self.inner().len()
    }

    fn next(&mut self) -> Result<E> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let i = self.cursor;
        if i >= self.inner().len() {
            return Err(Error::NoSuchElement);
        }
        let e = self.inner().get(i)?;
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
        self.upgrade();
        self.inner_mut().remove_at(last)?;
        self.cursor = last;
        self.last_ret = None;
        Ok(())
    }

    fn for_each_remaining(&mut self, action: &mut dyn FnMut(&E) -> Result<()>) -> Result<()> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let list = self.inner();
        for i in self.cursor..list.len() {
            let e = list.get(i)?;
            action(&e)?;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.release();
    }
}

impl<E, L> ListCursor<E> for SafeCursor<E, L>
where
    E: Clone + 'static,
    L: List<E>,
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
        let e = self.inner().get(i)?;
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

impl<E, L> Drop for SafeCursor<E, L> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.upgraded {
            unsafe { self.lock.force_write_unlock() };
        } else {
            unsafe { self.lock.force_read_decrement() };
        }
    }
}
