use core::mem;

use crate::fold::{fold_index, remap_index};
use crate::{
    DataStore, Direction, ItemView, ItemViewFactory, ItemViewPool, ListViewOptions,
    Record, ScrollPosition, ViewHandle, VisibleItem, VisibleWindow,
};

/// A headless recycling list.
///
/// The list owns the records and the view pool, and keeps exactly one view bound per logical
/// index in the visible window. It does not hold the scroll container: the host passes its
/// [`ScrollPosition`] into [`ListView::tick`] once per frame.
///
/// Mutations (`append`, `insert`, `remove_at`, ...) re-index the views already on screen right
/// away and schedule a refresh; the visible-range scan itself only runs from `tick`/`refresh`.
/// `tick` also rescans whenever the host's offset or extents differ from the last scan, so hosts
/// need no change notification for scrolling.
/// In infinite mode logical indexes are unbounded and fold into the data store by true modulo.
#[derive(Debug)]
pub struct ListView<T, V> {
    options: ListViewOptions,
    records: DataStore<T>,
    visible: Vec<VisibleItem<T>>, // sorted by index, one entry per index
    pool: ItemViewPool<V>,
    window: VisibleWindow,
    dirty: bool,
    scanned: Option<ScanInputs>,
}

/// Host geometry the last successful scan ran against.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ScanInputs {
    row_offset: f32,
    viewport_row_size: f32,
    content_column_size: f32,
}

impl ScanInputs {
    fn of<S: ScrollPosition + ?Sized>(scroll: &S) -> Self {
        Self {
            row_offset: scroll.row_offset(),
            viewport_row_size: scroll.viewport_row_size(),
            content_column_size: scroll.content_column_size(),
        }
    }
}

/// Largest logical index magnitude a scan may produce; remapping at most doubles an index, so
/// this keeps every index arithmetic step inside `i64`.
const MAX_INDEX: u64 = i64::MAX as u64 / 4;

impl<T: Record, V: ItemView<T>> ListView<T, V> {
    pub fn new(options: ListViewOptions, pool: ItemViewPool<V>) -> Self {
        ldebug!(
            item_row_size = options.item_row_size,
            item_column_size = options.item_column_size,
            max_columns = options.max_columns,
            infinite_scroll = options.infinite_scroll,
            "ListView::new"
        );
        Self {
            options,
            records: DataStore::new(),
            visible: Vec::new(),
            pool,
            window: VisibleWindow::default(),
            dirty: true,
            scanned: None,
        }
    }

    /// Creates a list with a default pool around `factory`.
    pub fn with_factory(
        options: ListViewOptions,
        factory: impl ItemViewFactory<V> + 'static,
    ) -> Self {
        Self::new(options, ItemViewPool::new(factory))
    }

    pub fn options(&self) -> &ListViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ListViewOptions) {
        if self.options == options {
            return;
        }
        ldebug!(
            item_row_size = options.item_row_size,
            spacing = options.spacing,
            max_columns = options.max_columns,
            infinite_scroll = options.infinite_scroll,
            "ListView::set_options"
        );
        self.options = options;
        self.dirty = true;
    }

    /// Copies the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListViewOptions)) {
        let mut next = self.options;
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.update_options(|o| o.direction = direction);
    }

    pub fn set_item_size(&mut self, item_row_size: f32, item_column_size: f32) {
        self.update_options(|o| {
            o.item_row_size = item_row_size;
            o.item_column_size = item_column_size;
        });
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.update_options(|o| o.spacing = spacing);
    }

    pub fn set_margin(&mut self, margin: f32) {
        self.update_options(|o| o.margin = margin);
    }

    pub fn set_max_columns(&mut self, max_columns: usize) {
        self.update_options(|o| o.max_columns = max_columns);
    }

    pub fn set_infinite_scroll(&mut self, infinite_scroll: bool) {
        self.update_options(|o| o.infinite_scroll = infinite_scroll);
    }

    pub fn direction(&self) -> Direction {
        self.options.direction
    }

    pub fn is_infinite(&self) -> bool {
        self.options.infinite_scroll
    }

    /// The row-axis margin in effect (half the spacing in infinite mode).
    pub fn margin(&self) -> f32 {
        self.options.effective_margin()
    }

    pub fn records(&self) -> &DataStore<T> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maps a logical index to its data-store position.
    ///
    /// Infinite lists fold the index by true modulo; bounded lists only accept `0..len`.
    pub fn data_index(&self, index: i64) -> Option<usize> {
        if self.options.infinite_scroll {
            return fold_index(index, self.records.len());
        }
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.records.len())
    }

    pub fn record_at(&self, index: i64) -> Option<&T> {
        self.data_index(index).and_then(|i| self.records.get(i))
    }

    /// Appends `record`. Returns `false` if it is already present.
    pub fn append(&mut self, record: T) -> bool {
        if self.records.contains(&record) {
            lwarn!(count = self.records.len(), "ListView::append: duplicate record");
            return false;
        }
        let count = self.records.len();
        if count > 0 {
            self.remap_visible(count, count + 1, |p| p);
        }
        self.records.push(record);
        self.dirty = true;
        true
    }

    /// Inserts `record` before data position `position` (`position == len` appends).
    ///
    /// Returns `false` if `position > len` or the record is already present.
    pub fn insert(&mut self, position: usize, record: T) -> bool {
        let count = self.records.len();
        if position > count {
            lwarn!(position, count, "ListView::insert: position out of range");
            return false;
        }
        if self.records.contains(&record) {
            lwarn!(position, count, "ListView::insert: duplicate record");
            return false;
        }
        if position == count {
            return self.append(record);
        }
        self.remap_visible(count, count + 1, |p| if p >= position { p + 1 } else { p });
        self.records.insert(position, record);
        self.dirty = true;
        true
    }

    /// Removes the record at data position `position` and returns it.
    ///
    /// Views bound to the record go back to the pool immediately.
    pub fn remove_at(&mut self, position: usize) -> Option<T> {
        let count = self.records.len();
        let Some(record) = self.records.get(position).cloned() else {
            lwarn!(position, count, "ListView::remove_at: position out of range");
            return None;
        };

        for mut item in mem::take(&mut self.visible) {
            if item.record == record {
                self.release_item(item);
                continue;
            }
            item.index = remap_index(item.index, count, count - 1, |p| {
                if p > position { p - 1 } else { p }
            });
            self.visible.push(item);
        }
        ltrace!(position, count, "ListView::remove_at");

        self.records.remove_at(position);
        self.dirty = true;
        Some(record)
    }

    /// Removes `record`. Returns `false` if it is not present.
    pub fn remove(&mut self, record: &T) -> bool {
        match self.records.position(record) {
            Some(position) => self.remove_at(position).is_some(),
            None => false,
        }
    }

    /// Releases every visible view and removes all records.
    pub fn remove_all(&mut self) {
        self.release_all();
        self.records.clear();
        self.dirty = true;
    }

    /// Schedules a refresh on the next `tick`.
    ///
    /// Scrolling and viewport changes are picked up by `tick` on its own; this is for host
    /// changes it cannot observe.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn needs_refresh(&self) -> bool {
        self.dirty
    }

    /// Runs the visible-range scan if the host is active and either a refresh is pending or the
    /// host's offset, viewport or column extent changed since the last scan.
    ///
    /// Returns `true` if the scan ran. Degenerate geometry (zero viewport or item size, or an
    /// offset too far out to index) keeps the refresh pending.
    pub fn tick<S: ScrollPosition + ?Sized>(&mut self, scroll: &mut S) -> bool {
        if !scroll.is_active() {
            return false;
        }
        if !self.dirty && self.scanned == Some(ScanInputs::of(scroll)) {
            return false;
        }
        self.refresh(scroll)
    }

    /// Runs the visible-range scan now and reconciles the visible views with it.
    ///
    /// Writes the content size back to `scroll`. Returns `false` (leaving the refresh pending)
    /// when the geometry is not usable yet or the offset lies too far out to index.
    pub fn refresh<S: ScrollPosition + ?Sized>(&mut self, scroll: &mut S) -> bool {
        let viewport = scroll.viewport_row_size();
        let offset = scroll.row_offset();
        let pitch = self.options.row_pitch();
        let ready = viewport > 0.0 && self.options.item_row_size > 0.0 && pitch > 0.0;
        if !ready || !viewport.is_finite() || !pitch.is_finite() || !offset.is_finite() {
            ldebug!(viewport, offset, pitch, "ListView::refresh: geometry not ready");
            self.dirty = true;
            return false;
        }

        let count = self.records.len();
        let num_columns = self.options.column_count(scroll.content_column_size());
        let num_rows = count.div_ceil(num_columns);
        scroll.set_content_row_size(self.options.content_row_size(num_rows));

        if num_rows == 0 {
            self.dirty = false;
            self.scanned = Some(ScanInputs::of(scroll));
            self.release_all();
            self.window = VisibleWindow {
                start_row: 0,
                end_row: 0,
                num_rows,
                num_columns,
            };
            return true;
        }

        let columns = num_columns as i64;
        let Some((start_row, end_row)) = self
            .scan_rows(offset, viewport, num_rows)
            .filter(|&(start, end)| {
                [start, end].into_iter().all(|row| {
                    row.checked_mul(columns)
                        .is_some_and(|i| i.unsigned_abs() <= MAX_INDEX)
                })
            })
        else {
            ldebug!(offset, pitch, "ListView::refresh: offset out of index range");
            self.dirty = true;
            return false;
        };
        self.dirty = false;
        self.scanned = Some(ScanInputs::of(scroll));
        self.window = VisibleWindow {
            start_row,
            end_row,
            num_rows,
            num_columns,
        };
        ltrace!(start_row, end_row, num_rows, num_columns, offset, "ListView::refresh");

        let infinite = self.options.infinite_scroll;
        for item in mem::take(&mut self.visible) {
            let row = item.index.div_euclid(columns);
            let out = !self.window.contains_row(row)
                || (!infinite && !(0..count as i64).contains(&item.index));
            if out {
                self.release_item(item);
            } else {
                self.visible.push(item);
            }
        }

        for row in start_row..end_row {
            let row_position = self.row_position(row, offset);
            for column in 0..num_columns {
                let index = row * columns + column as i64;
                if !infinite && index >= count as i64 {
                    break;
                }
                let column_position = self.options.column_position(column, num_columns);
                self.show(index, row_position, column_position);
            }
        }

        debug_assert_eq!(
            self.pool.count_active(),
            self.visible.len(),
            "ListView: outstanding views must match the visible set"
        );
        true
    }

    /// The window computed by the last successful refresh.
    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    /// Visible items, ascending by logical index.
    pub fn visible_items(&self) -> &[VisibleItem<T>] {
        &self.visible
    }

    pub fn visible_item(&self, index: i64) -> Option<&VisibleItem<T>> {
        self.visible
            .binary_search_by_key(&index, |it| it.index)
            .ok()
            .map(|pos| &self.visible[pos])
    }

    /// Visible items paired with their views, ascending by logical index.
    pub fn visible_views(&self) -> impl Iterator<Item = (&VisibleItem<T>, &V)> + '_ {
        self.visible
            .iter()
            .filter_map(|it| self.pool.get(it.handle).map(|v| (it, v)))
    }

    pub fn view(&self, handle: ViewHandle) -> Option<&V> {
        self.pool.get(handle)
    }

    pub fn view_mut(&mut self, handle: ViewHandle) -> Option<&mut V> {
        self.pool.get_mut(handle)
    }

    pub fn pool(&self) -> &ItemViewPool<V> {
        &self.pool
    }

    /// Teardown: releases the visible views and destroys every pooled view.
    ///
    /// Records are kept; the next refresh creates fresh views.
    pub fn clear(&mut self) {
        self.release_all();
        self.pool.clear();
        self.window = VisibleWindow::default();
        self.dirty = true;
        self.scanned = None;
    }

    /// Finds `[start_row, end_row)`: rows whose center lies within half a pitch of the viewport.
    ///
    /// A row exactly on the trailing tolerance is dropped and one exactly on the leading
    /// tolerance is kept, so partially exposed rows show instead of popping.
    ///
    /// Returns `None` if the rows run past `i64`.
    fn scan_rows(&self, offset: f32, viewport: f32, num_rows: usize) -> Option<(i64, i64)> {
        let infinite = self.options.infinite_scroll;
        let pitch = self.options.row_pitch();
        let half = pitch * 0.5;

        // `as` saturates, so a far-out offset lands on i64::MIN/MAX and fails the checked steps.
        let mut start_row = ((-offset - self.margin()) / pitch).floor() as i64;
        if !infinite {
            start_row = start_row.clamp(0, num_rows as i64);
        }

        // At most one skipped row plus the rows spanning the viewport; the cap also stops the
        // scan once f32 positions stop advancing at huge row numbers.
        let limit = ((viewport / pitch).ceil() as usize).saturating_add(4);
        let mut end_row = start_row;
        for _ in 0..limit {
            if !infinite && end_row >= num_rows as i64 {
                break;
            }
            let position = self.row_position(end_row, offset);
            if position <= -half {
                start_row = start_row.checked_add(1)?;
                end_row = end_row.checked_add(1)?;
                continue;
            }
            if position >= viewport + half {
                break;
            }
            end_row = end_row.checked_add(1)?;
        }
        Some((start_row, end_row))
    }

    fn row_position(&self, row: i64, offset: f32) -> f32 {
        self.margin()
            + self.options.row_pitch() * row as f32
            + offset
            + self.options.item_row_size * 0.5
    }

    fn show(&mut self, index: i64, row: f32, column: f32) {
        match self.visible.binary_search_by_key(&index, |it| it.index) {
            Ok(pos) => {
                let item = &mut self.visible[pos];
                item.row = row;
                item.column = column;
                if let Some(view) = self.pool.get_mut(item.handle) {
                    view.set_position(row, column);
                }
            }
            Err(pos) => {
                let Some(record) = self.record_at(index).cloned() else {
                    return;
                };
                let handle = self.pool.acquire();
                if let Some(view) = self.pool.get_mut(handle) {
                    view.set_position(row, column);
                    view.on_visible(index, &record);
                }
                self.visible.insert(
                    pos,
                    VisibleItem {
                        index,
                        record,
                        row,
                        column,
                        handle,
                    },
                );
            }
        }
    }

    fn release_item(&mut self, item: VisibleItem<T>) {
        if let Some(view) = self.pool.get_mut(item.handle) {
            view.on_invisible();
        }
        self.pool.release(item.handle);
    }

    fn release_all(&mut self) {
        for item in mem::take(&mut self.visible) {
            self.release_item(item);
        }
    }

    fn remap_visible(
        &mut self,
        old_count: usize,
        new_count: usize,
        move_position: impl Fn(usize) -> usize,
    ) {
        for item in &mut self.visible {
            item.index = remap_index(item.index, old_count, new_count, &move_position);
        }
        ltrace!(
            old_count,
            new_count,
            visible = self.visible.len(),
            "ListView: remapped visible indexes"
        );
        debug_assert!(
            self.visible.windows(2).all(|w| w[0].index < w[1].index),
            "ListView: remap must keep the visible set sorted and unique"
        );
    }
}
