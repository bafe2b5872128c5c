use crate::Direction;

/// Configuration for [`crate::ListView`].
///
/// All sizes are in host units. `item_row_size` is the item extent along the scroll axis and
/// `item_column_size` the extent across it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListViewOptions {
    pub direction: Direction,
    pub item_row_size: f32,
    pub item_column_size: f32,
    /// Space between items, on both axes.
    pub spacing: f32,
    /// Space before the first and after the last row. Ignored in infinite mode.
    pub margin: f32,
    /// Upper bound for items per row. `0` means "as many as fit"; `1` is a plain list.
    pub max_columns: usize,
    /// Wraps the data store around in both directions instead of stopping at its ends.
    pub infinite_scroll: bool,
}

impl ListViewOptions {
    /// Creates options for a single-column vertical list without spacing or margin.
    pub fn new(item_row_size: f32, item_column_size: f32) -> Self {
        Self {
            direction: Direction::Vertical,
            item_row_size,
            item_column_size,
            spacing: 0.0,
            margin: 0.0,
            max_columns: 1,
            infinite_scroll: false,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub fn with_infinite_scroll(mut self, infinite_scroll: bool) -> Self {
        self.infinite_scroll = infinite_scroll;
        self
    }

    /// The margin actually applied: infinite content has no leading/trailing edge, so it only
    /// keeps half a spacing on each side.
    pub fn effective_margin(&self) -> f32 {
        if self.infinite_scroll {
            self.spacing * 0.5
        } else {
            self.margin
        }
    }

    /// Distance between the starts of two consecutive rows.
    pub fn row_pitch(&self) -> f32 {
        self.item_row_size + self.spacing
    }

    /// Number of items that fit side by side in `content_column_size`, clamped by
    /// `max_columns`. Always at least one.
    pub fn column_count(&self, content_column_size: f32) -> usize {
        let pitch = self.item_column_size + self.spacing;
        let mut columns = 1;
        if pitch > 0.0 {
            let room = (content_column_size - self.item_column_size).max(0.0);
            let extra = (room / pitch).floor().min(u32::MAX as f32);
            columns += extra as usize;
        }
        if self.max_columns > 0 {
            columns = columns.min(self.max_columns);
        }
        columns
    }

    /// Content extent along the row axis for `rows` rows.
    pub fn content_row_size(&self, rows: usize) -> f32 {
        let rows_f = rows as f32;
        self.effective_margin() * 2.0
            + self.item_row_size * rows_f
            + self.spacing * rows.saturating_sub(1) as f32
    }

    /// Center of `column` out of `num_columns`, with the row of columns centered on zero.
    pub fn column_position(&self, column: usize, num_columns: usize) -> f32 {
        let centered = column as f32 - num_columns.saturating_sub(1) as f32 * 0.5;
        centered * (self.item_column_size + self.spacing)
    }
}
