/// Scroll geometry and physics provided by the host scroll container.
///
/// All values are on the row axis unless noted. `row_offset` is the content position relative to
/// the viewport leading edge: scrolling forward makes it smaller (negative).
pub trait ScrollPosition {
    fn row_offset(&self) -> f32;
    fn set_row_offset(&mut self, offset: f32);

    fn content_row_size(&self) -> f32;
    fn set_content_row_size(&mut self, size: f32);

    fn viewport_row_size(&self) -> f32;

    /// Cross-axis extent of the content, used to fit columns in grid mode.
    fn content_column_size(&self) -> f32;

    /// Current scroll velocity magnitude, in row units per second.
    fn velocity(&self) -> f32;
    fn stop_momentum(&mut self);

    /// Whether the scroll physics overshoot and spring back at the content bounds.
    fn is_elastic(&self) -> bool;

    /// Whether the scroll container is enabled and visible.
    fn is_active(&self) -> bool;
}

/// A recyclable view owned by an [`crate::ItemViewPool`].
pub trait ItemView<T> {
    /// Moves the view's center to `row` (relative to the viewport leading edge) and `column`
    /// (relative to the content center).
    fn set_position(&mut self, row: f32, column: f32);

    /// Called after the view was bound to `record` at logical `index`.
    fn on_visible(&mut self, index: i64, record: &T) {
        let _ = (index, record);
    }

    /// Called right before the view goes back to the pool.
    fn on_invisible(&mut self) {}
}

/// Creates views on pool misses.
pub trait ItemViewFactory<V> {
    fn create(&mut self) -> V;
}

impl<V, F: FnMut() -> V> ItemViewFactory<V> for F {
    fn create(&mut self) -> V {
        self()
    }
}
