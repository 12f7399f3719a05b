//! Pull-based row iteration over a frame.
//!
//! A host drives a [`RowCursor`] forward and calls getters bound to it once
//! per row. Getters read the cursor's position at call time, so they must
//! be bound once and reused across rows.

use std::cell::Cell;

use crate::column::{Column, Primitive};
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::na::NA;

/// Anything exposing a current row position.
pub trait RowCursor {
    /// Current row, `None` before the first advance or after the last row.
    fn position(&self) -> Option<usize>;
}

/// Writes the value at the cursor's current row into the given slot.
pub type ValueGetter<'a, T> = Box<dyn Fn(&mut NA<T>) -> Result<()> + 'a>;

impl Column {
    /// Binds a typed getter to `cursor`. Fails with `UnsupportedKind` when
    /// the column does not hold `T`.
    pub fn bind_getter<'a, T, C>(&'a self, cursor: &'a C) -> Result<ValueGetter<'a, T>>
    where
        T: Primitive,
        C: RowCursor + ?Sized,
    {
        let getter = self.getter_at::<T>()?;
        Ok(Box::new(move |slot: &mut NA<T>| {
            let row = cursor
                .position()
                .ok_or_else(|| Error::InvalidArgument("cursor is not on a row".to_string()))?;
            *slot = getter.get(row)?.cloned();
            Ok(())
        }))
    }
}

/// Forward-only cursor over the rows of a [`DataFrame`].
#[derive(Debug)]
pub struct FrameCursor<'a> {
    frame: &'a DataFrame,
    // rows consumed so far; the current row is `consumed - 1`
    consumed: Cell<usize>,
}

impl<'a> FrameCursor<'a> {
    pub fn new(frame: &'a DataFrame) -> Self {
        Self {
            frame,
            consumed: Cell::new(0),
        }
    }

    /// Advances to the next row. Returns `false` once the rows are exhausted.
    pub fn move_next(&self) -> bool {
        let consumed = self.consumed.get();
        if consumed > self.frame.row_count() {
            return false;
        }
        self.consumed.set(consumed + 1);
        consumed < self.frame.row_count()
    }

    /// Moves back before the first row.
    pub fn reset(&self) {
        self.consumed.set(0);
    }

    pub fn frame(&self) -> &'a DataFrame {
        self.frame
    }

    /// Typed getter for the named column bound to this cursor.
    pub fn getter<T: Primitive>(&self, name: &str) -> Result<ValueGetter<'_, T>> {
        self.frame.column(name)?.bind_getter(self)
    }
}

impl RowCursor for FrameCursor<'_> {
    fn position(&self) -> Option<usize> {
        match self.consumed.get() {
            0 => None,
            n if n > self.frame.row_count() => None,
            n => Some(n - 1),
        }
    }
}

impl DataFrame {
    pub fn cursor(&self) -> FrameCursor<'_> {
        FrameCursor::new(self)
    }
}
