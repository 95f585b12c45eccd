use core::cmp::Ordering;
use core::fmt;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::collection::{Collection, sequence_equals};
use crate::comparator::{EqualComparator, IntrinsicEqual};
use crate::cursor::{Cursor, ListCursor};
use crate::error::{Error, Result};
use crate::list::{DEFAULT_CAPACITY, List, Queue};

struct Node<E> {
    value: E,
    prev: Option<usize>,
    next: Option<usize>,
}

// Arena slot: occupied nodes hold the element and its links, vacant
// slots chain into an intrusive free list.
enum Slot<E> {
    Occupied(Node<E>),
    Vacant { next_free: Option<usize> },
}

/// A list backed by doubly-linked nodes in a slot arena.
///
/// Nodes are addressed by stable slot indices, so splicing is O(1) once a
/// node is located; positional access walks from whichever end of the
/// chain is nearer to the target index.
pub struct LinkedList<E> {
    slots: Vec<Slot<E>>,
    free_head: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    comparator: Arc<dyn EqualComparator<E> + Send + Sync>,
}

impl<E: PartialEq> LinkedList<E> {
    /// An empty list with the default arena capacity and intrinsic
    /// equality.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// An empty list with the given arena capacity and intrinsic
    /// equality.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_comparator(capacity, Arc::new(IntrinsicEqual))
    }
}

impl<E> LinkedList<E> {
    /// An empty list with an explicitly injected equality capability.
    pub fn with_comparator(
        capacity: usize,
        comparator: Arc<dyn EqualComparator<E> + Send + Sync>,
    ) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            head: None,
            tail: None,
            len: 0,
            comparator,
        }
    }

    fn node(&self, id: usize) -> &Node<E> {
        match &self.slots[id] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot reached through a live link"),
        }
    }

    fn node_mut(&mut self, id: usize) -> &mut Node<E> {
        match &mut self.slots[id] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot reached through a live link"),
        }
    }

    #[inline]
    pub(crate) fn value(&self, id: usize) -> &E {
        &self.node(id).value
    }

    #[inline]
    pub(crate) fn next_of(&self, id: usize) -> Option<usize> {
        self.node(id).next
    }

    #[inline]
    pub(crate) fn prev_of(&self, id: usize) -> Option<usize> {
        self.node(id).prev
    }

    #[inline]
    pub(crate) fn head_id(&self) -> Option<usize> {
        self.head
    }

    #[inline]
    pub(crate) fn tail_id(&self) -> Option<usize> {
        self.tail
    }

    fn alloc(&mut self, value: E) -> usize {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        match self.free_head {
            Some(id) => {
                self.free_head = match self.slots[id] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("occupied slot on the free list"),
                };
                self.slots[id] = Slot::Occupied(node);
                id
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, id: usize) -> E {
        let slot = core::mem::replace(
            &mut self.slots[id],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id);
        match slot {
            Slot::Occupied(node) => node.value,
            Slot::Vacant { .. } => unreachable!("released a vacant slot"),
        }
    }

    fn push_back_node(&mut self, value: E) -> usize {
        let id = self.alloc(value);
        self.node_mut(id).prev = self.tail;
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    fn link_before(&mut self, value: E, ref_id: usize) -> usize {
        let id = self.alloc(value);
        let prev = self.node(ref_id).prev;
        self.node_mut(id).prev = prev;
        self.node_mut(id).next = Some(ref_id);
        self.node_mut(ref_id).prev = Some(id);
        match prev {
            Some(prev) => self.node_mut(prev).next = Some(id),
            None => self.head = Some(id),
        }
        self.len += 1;
        id
    }

    pub(crate) fn unlink(&mut self, id: usize) -> E {
        let (prev, next) = {
            let node = self.node(id);
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
        self.release(id)
    }

    // Walks to the node at `index` from whichever end is nearer. Returns
    // None when the index is past the end.
    fn node_at(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        if index < self.len / 2 {
            let mut cur = self.head?;
            for _ in 0..index {
                cur = self.node(cur).next?;
            }
            Some(cur)
        } else {
            let mut cur = self.tail?;
            for _ in 0..(self.len - 1 - index) {
                cur = self.node(cur).prev?;
            }
            Some(cur)
        }
    }
}

impl<E: PartialEq> Default for LinkedList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PartialEq> FromIterator<E> for LinkedList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut list = Self::new();
        for e in iter {
            list.push_back_node(e);
        }
        list
    }
}

impl<E: Clone + 'static> Collection<E> for LinkedList<E> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn contains(&self, e: &E) -> bool {
        self.index_of(e).is_some()
    }

    fn to_vec(&self) -> Vec<E> {
        let mut res = Vec::with_capacity(self.len);
        let mut cur = self.head;
        while let Some(id) = cur {
            let node = self.node(id);
            res.push(node.value.clone());
            cur = node.next;
        }
        res
    }

    fn add(&mut self, e: E) -> bool {
        self.push_back_node(e);
        true
    }

    fn remove(&mut self, e: &E) -> bool {
        self.remove_n(e, Some(1)) == 1
    }

    fn contains_all(&self, c: &dyn Collection<E>) -> bool {
        c.to_vec().iter().all(|e| self.contains(e))
    }

    fn add_all(&mut self, c: &dyn Collection<E>) {
        for e in c.to_vec() {
            self.push_back_node(e);
        }
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
        self.slots.clear();
        self.free_head = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn equals(&self, c: &dyn Collection<E>) -> bool {
        sequence_equals(self, c)
    }

    fn for_each(&self, f: &mut dyn FnMut(&E) -> Result<()>) -> Result<()> {
        let mut cur = self.head;
        while let Some(id) = cur {
            let node = self.node(id);
            f(&node.value)?;
            cur = node.next;
        }
        Ok(())
    }

    fn cursor(&mut self) -> Box<dyn Cursor<E> + '_> {
        Box::new(LinkedCursor::new(self, 0))
    }

    fn comparator(&self) -> Arc<dyn EqualComparator<E> + Send + Sync> {
        Arc::clone(&self.comparator)
    }
}

impl<E: Clone + 'static> List<E> for LinkedList<E> {
    fn replace_all(&mut self, operator: &mut dyn FnMut(&E) -> E) {
        let mut cur = self.head;
        while let Some(id) = cur {
            let next = self.node(id).next;
            let new = operator(&self.node(id).value);
            self.node_mut(id).value = new;
            cur = next;
        }
    }

    // Sorts node handles by value, then relinks the chain in sorted
    // order; values stay in their nodes.
    fn sort(&mut self, less: &mut dyn FnMut(&E, &E) -> bool) {
        let mut ids = Vec::with_capacity(self.len);
        let mut cur = self.head;
        while let Some(id) = cur {
            ids.push(id);
            cur = self.node(id).next;
        }
        ids.sort_by(|&a, &b| {
            if less(self.value(a), self.value(b)) {
                Ordering::Less
            } else if less(self.value(b), self.value(a)) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        let mut prev: Option<usize> = None;
        for &id in &ids {
            let node = self.node_mut(id);
            node.prev = prev;
            node.next = None;
            if let Some(prev) = prev {
                self.node_mut(prev).next = Some(id);
            }
            prev = Some(id);
        }
        self.head = ids.first().copied();
        self.tail = ids.last().copied();
    }

    fn get(&self, index: usize) -> Result<E> {
        let id = self.node_at(index).ok_or(Error::OutOfRange {
            index,
            len: self.len,
        })?;
        Ok(self.node(id).value.clone())
    }

    fn set(&mut self, index: usize, e: E) -> Result<E> {
        let id = self.node_at(index).ok_or(Error::OutOfRange {
            index,
            len: self.len,
        })?;
        Ok(core::mem::replace(&mut self.node_mut(id).value, e))
    }

    fn insert(&mut self, index: usize, e: E) -> Result<()> {
        if index == self.len {
            self.push_back_node(e);
            return Ok(());
        }
        let ref_id = self.node_at(index).ok_or(Error::OutOfRange {
            index,
            len: self.len,
        })?;
        self.link_before(e, ref_id);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<E> {
        let id = self.node_at(index).ok_or(Error::OutOfRange {
            index,
            len: self.len,
        })?;
        Ok(self.unlink(id))
    }

    fn index_of(&self, e: &E) -> Option<usize> {
        let mut cur = self.head;
        let mut index = 0;
        while let Some(id) = cur {
            let node = self.node(id);
            if self.comparator.equal(e, &node.value) {
                return Some(index);
            }
            cur = node.next;
            index += 1;
        }
        None
    }

    fn last_index_of(&self, e: &E) -> Option<usize> {
        let mut cur = self.tail;
        let mut index = self.len;
        while let Some(id) = cur {
            index -= 1;
            let node = self.node(id);
            if self.comparator.equal(e, &node.value) {
                return Some(index);
            }
            cur = node.prev;
        }
        None
    }

    fn list_cursor(&mut self) -> Box<dyn ListCursor<E> + '_> {
        self.list_cursor_at(0)
    }

    fn list_cursor_at(&mut self, index: usize) -> Box<dyn ListCursor<E> + '_> {
        Box::new(LinkedCursor::new(self, index))
    }

    fn sub_list(&self, from_index: usize, to_index: usize) -> Result<Box<dyn List<E>>> {
        if to_index > self.len || from_index > to_index {
            return Err(Error::OutOfRange {
                index: from_index.max(to_index),
                len: self.len,
            });
        }
        let mut sub = LinkedList::with_comparator(to_index - from_index, Arc::clone(&self.comparator));
        let mut cur = self.node_at(from_index);
        for _ in from_index..to_index {
            let id = cur.expect("walk stays inside the checked range");
            let node = self.node(id);
            sub.push_back_node(node.value.clone());
            cur = node.next;
        }
        Ok(Box::new(sub))
    }

    fn remove_n(&mut self, e: &E, n: Option<usize>) -> usize {
        let comparator = Arc::clone(&self.comparator);
        self.remove_if_n(&mut |o| comparator.equal(e, o), n)
    }

    // One forward pass, unlinking matches in place; node handles stay
    // stable so the walk survives removal.
    fn remove_if_n(&mut self, filter: &mut dyn FnMut(&E) -> bool, n: Option<usize>) -> usize {
        let limit = match n {
            Some(0) => return 0,
            Some(k) => k,
            None => self.len,
        };
        let mut removed = 0;
        let mut cur = self.head;
        while let Some(id) = cur {
            let next = self.node(id).next;
            if filter(&self.node(id).value) {
                self.unlink(id);
                removed += 1;
                if removed == limit {
                    break;
                }
            }
            cur = next;
        }
        removed
    }
}

impl<E: Clone + 'static> Queue<E> for LinkedList<E> {
    fn put(&mut self, e: E) -> bool {
        self.push_back_node(e);
        true
    }

    fn take(&mut self) -> Option<E> {
        let head = self.head?;
        Some(self.unlink(head))
    }

    fn peek(&self) -> Option<E> {
        let head = self.head?;
        Some(self.node(head).value.clone())
    }
}

/// Node-based cursor over a [`LinkedList`].
///
/// Holds node handles rather than indices, so every step is O(1); a
/// position index is maintained alongside for
/// [`next_index`](ListCursor::next_index)/[`previous_index`](ListCursor::previous_index).
pub struct LinkedCursor<'a, E> {
    list: &'a mut LinkedList<E>,
    cursor: Option<usize>,
    last_ret: Option<usize>,
    next_index: usize,
    closed: bool,
}

impl<'a, E> LinkedCursor<'a, E> {
    /// Creates a cursor positioned so the first `next` returns the
    /// element at `start`.
    pub fn new(list: &'a mut LinkedList<E>, start: usize) -> Self {
        let cursor = list.node_at(start);
        let next_index = start.min(list.len);
        Self {
            list,
            cursor,
            last_ret: None,
            next_index,
            closed: false,
        }
    }
}

impl<'a, E: Clone + 'static> Cursor<E> for LinkedCursor<'a, E> {
    fn has_next(&self) -> bool {
        !self.closed && self.cursor.is_some()
    }

    fn next(&mut self) -> Result<E> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let Some(id) = self.cursor else {
            return Err(Error::NoSuchElement);
        };
        let value = self.list.value(id).clone();
        self.cursor = self.list.next_of(id);
        self.last_ret = Some(id);
        self.next_index += 1;
        Ok(value)
    }

    fn remove(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let Some(id) = self.last_ret else {
            return Err(Error::IllegalState);
        };
        // The removed node is always positioned before the cursor, so
        // the position index shifts down by one.
        self.list.unlink(id);
        self.last_ret = None;
        self.next_index -= 1;
        Ok(())
    }

    fn for_each_remaining(&mut self, action: &mut dyn FnMut(&E) -> Result<()>) -> Result<()> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let mut cur = self.cursor;
        while let Some(id) = cur {
            action(self.list.value(id))?;
            cur = self.list.next_of(id);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
        self.cursor = None;
        self.last_ret = None;
    }
}

impl<'a, E: Clone + 'static> ListCursor<E> for LinkedCursor<'a, E> {
    fn has_previous(&self) -> bool {
        !self.closed && self.next_index > 0
    }

    fn previous(&mut self) -> Result<E> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        let prev = match self.cursor {
            Some(id) => self.list.prev_of(id),
            None => self.list.tail_id(),
        };
        let Some(id) = prev else {
            return Err(Error::NoSuchElement);
        };
        let value = self.list.value(id).clone();
        self.cursor = Some(id);
        self.last_ret = self.list.prev_of(id);
        self.next_index -= 1;
        Ok(value)
    }

    fn next_index(&self) -> usize {
        self.next_index
    }

    fn previous_index(&self) -> Option<usize> {
        if self.closed {
            return None;
        }
        self.next_index.checked_sub(1)
    }
}

impl<E: fmt::Display> fmt::Display for LinkedList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut cur = self.head;
        let mut first = true;
        while let Some(id) = cur {
            let node = self.node(id);
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", node.value)?;
            first = false;
            cur = node.next;
        }
        f.write_str("]")
    }
}

impl<E: fmt::Debug> fmt::Debug for LinkedList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut cur = self.head;
        while let Some(id) = cur {
            let node = self.node(id);
            list.entry(&node.value);
            cur = node.next;
        }
        list.finish()
    }
}
