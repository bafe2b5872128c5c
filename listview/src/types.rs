use core::ops::Range;

use crate::ViewHandle;

/// The host axis that items are stacked along (the "row" axis).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Rows advance along x; columns wrap along y.
    Horizontal,
    /// Rows advance along y; columns wrap along x.
    #[default]
    Vertical,
}

impl Direction {
    /// Splits a host `(x, y)` pair into `(row, column)`.
    pub fn split(self, x: f32, y: f32) -> (f32, f32) {
        match self {
            Self::Horizontal => (x, y),
            Self::Vertical => (y, x),
        }
    }

    /// Joins `(row, column)` back into a host `(x, y)` pair.
    pub fn join(self, row: f32, column: f32) -> (f32, f32) {
        match self {
            Self::Horizontal => (row, column),
            Self::Vertical => (column, row),
        }
    }
}

/// The row window computed by the last visible-range scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub start_row: i64,
    pub end_row: i64, // exclusive
    pub num_rows: usize,
    pub num_columns: usize,
}

impl VisibleWindow {
    pub fn is_empty(&self) -> bool {
        self.start_row >= self.end_row || self.num_columns == 0
    }

    pub fn contains_row(&self, row: i64) -> bool {
        (self.start_row..self.end_row).contains(&row)
    }

    /// Logical indexes covered by the window, before bounded-mode filtering.
    pub fn index_range(&self) -> Range<i64> {
        let columns = self.num_columns as i64;
        self.start_row * columns..self.end_row * columns
    }
}

/// A view currently bound to a logical index.
///
/// `row`/`column` are the item's center, relative to the viewport leading edge on the row axis
/// and to the content center on the column axis.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleItem<T> {
    pub index: i64,
    pub record: T,
    pub row: f32,
    pub column: f32,
    pub handle: ViewHandle,
}
