use alloc::boxed::Box;

use thiserror::Error;

/// Result alias used by every fallible operation in the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Error conditions reported by collections and cursors.
///
/// All of these are recoverable, caller-visible values. The crate never
/// panics on an expected failure mode and never retries or swallows an
/// error internally.
#[derive(Debug, Error)]
pub enum Error {
    /// A positional access outside `[0, len)`.
    #[error("index out of range [{index}] with length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A cursor was asked to advance past its end in the requested
    /// direction.
    #[error("no such element")]
    NoSuchElement,

    /// A cursor `remove` without a preceding `next`/`previous`, or called
    /// twice without an intervening advance.
    #[error("illegal state")]
    IllegalState,

    /// Any fallible operation on a cursor after `close`.
    #[error("cursor is closed")]
    CursorClosed,

    /// An error surfaced by a visiting callback; propagates unchanged and
    /// short-circuits the remaining visitation.
    #[error("{0}")]
    Callback(Box<dyn core::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a callback error for propagation through `for_each`-style
    /// visitation.
    pub fn callback<E>(err: E) -> Self
    where
        E: Into<Box<dyn core::error::Error + Send + Sync>>,
    {
        Error::Callback(err.into())
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange { .. })
    }

    pub fn is_no_such_element(&self) -> bool {
        matches!(self, Error::NoSuchElement)
    }

    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Error::IllegalState)
    }

    pub fn is_cursor_closed(&self) -> bool {
        matches!(self, Error::CursorClosed)
    }
}

pub(crate) fn range_check(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(Error::OutOfRange { index, len });
    }
    Ok(())
}
