use core::fmt;
use std::sync::Arc;

use listview::{ItemView, ListView, Record, ScrollPosition};

use crate::{Ease, Tween};

/// Called with the newly snapped record, or `None` once the list has nothing left to snap to.
pub type SnapChangeCallback<T> = Arc<dyn Fn(Option<&T>) + Send + Sync>;

/// Offsets closer than this to the snap anchor count as snapped.
const SNAP_EPSILON: f32 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapState {
    /// Settles onto the nearest item once momentum allows it.
    Idle,
    /// Snaps onto the pending target on the next tick, without animation.
    #[default]
    JumpTo,
    /// Starts interpolating toward the pending target on the next tick.
    MoveTo,
    Interpolating,
    /// The user is dragging; the controller leaves the offset alone.
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Configuration for [`SnapController`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapOptions {
    pub ease: Ease,
    pub ease_duration_ms: u64,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            ease: Ease::Linear,
            ease_duration_ms: 200,
        }
    }
}

impl SnapOptions {
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_ease_duration_ms(mut self, ease_duration_ms: u64) -> Self {
        self.ease_duration_ms = ease_duration_ms;
        self
    }

    fn ease_duration_secs(&self) -> f32 {
        self.ease_duration_ms.max(1) as f32 / 1000.0
    }
}

#[derive(Clone, Debug)]
struct Nearest<T> {
    index: i64,
    record: T,
    row: f32,
}

/// A snap-scrolling controller around a [`ListView`].
///
/// Each `tick` refreshes the list, finds the visible item nearest the snap anchor (the viewport
/// center on the row axis), reports when that item changes, and moves the scroll offset: jumping
/// or interpolating to a requested record, or settling onto the nearest item once the host's
/// momentum is slow enough. Dragging suspends automatic movement.
///
/// Like the list itself, the controller holds no UI objects; the host passes its
/// [`ScrollPosition`] into every call that needs it.
pub struct SnapController<T, V> {
    list: ListView<T, V>,
    options: SnapOptions,
    state: SnapState,
    target: Option<T>,
    tween: Option<Tween>,
    snapped: Option<T>,
    was_active: bool,
    on_change: Option<SnapChangeCallback<T>>,
}

impl<T: Record, V: ItemView<T>> SnapController<T, V> {
    pub fn new(list: ListView<T, V>, options: SnapOptions) -> Self {
        sdebug!(
            ease = options.ease.name(),
            ease_duration_ms = options.ease_duration_ms,
            "SnapController::new"
        );
        Self {
            list,
            options,
            state: SnapState::default(),
            target: None,
            tween: None,
            snapped: None,
            was_active: false,
            on_change: None,
        }
    }

    pub fn from_list(list: ListView<T, V>) -> Self {
        Self::new(list, SnapOptions::default())
    }

    pub fn with_on_change(mut self, f: impl Fn(Option<&T>) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    pub fn set_on_change(&mut self, on_change: Option<SnapChangeCallback<T>>) {
        self.on_change = on_change;
    }

    pub fn list(&self) -> &ListView<T, V> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<T, V> {
        &mut self.list
    }

    pub fn into_list(self) -> ListView<T, V> {
        self.list
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    /// Applies to the next interpolation; a running one keeps its curve and duration.
    pub fn set_options(&mut self, options: SnapOptions) {
        self.options = options;
    }

    pub fn state(&self) -> SnapState {
        self.state
    }

    /// The record requested by `jump_to`/`move_to` that has not been handled yet.
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// The last record reported through the change callback.
    pub fn snapped(&self) -> Option<&T> {
        self.snapped.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Row position the nearest item is centered on.
    pub fn snap_anchor<S: ScrollPosition + ?Sized>(&self, scroll: &S) -> f32 {
        let item = self.list.options().item_row_size;
        item * 0.5 + (scroll.viewport_row_size() - item) * 0.5
    }

    /// Snaps `record` to the anchor on the next tick. Returns `false` if it is not in the list.
    pub fn jump_to(&mut self, record: &T) -> bool {
        self.request(record, SnapState::JumpTo)
    }

    /// Interpolates `record` to the anchor, starting on the next tick. Returns `false` if it is
    /// not in the list.
    pub fn move_to(&mut self, record: &T) -> bool {
        self.request(record, SnapState::MoveTo)
    }

    /// Enters `Dragging` for the primary button while the host is active.
    pub fn begin_drag<S: ScrollPosition + ?Sized>(
        &mut self,
        button: PointerButton,
        scroll: &S,
    ) -> bool {
        if button != PointerButton::Primary || !scroll.is_active() {
            return false;
        }
        self.tween = None;
        self.set_state(SnapState::Dragging);
        true
    }

    /// Leaves `Dragging` for the primary button.
    pub fn end_drag(&mut self, button: PointerButton) -> bool {
        if button != PointerButton::Primary || self.state != SnapState::Dragging {
            return false;
        }
        self.set_state(SnapState::Idle);
        true
    }

    /// Advances the list and the snap state machine by one frame.
    ///
    /// Returns `true` if the controller wrote a new scroll offset; the list is refreshed against
    /// it before returning.
    pub fn tick<S: ScrollPosition + ?Sized>(&mut self, scroll: &mut S, now_ms: u64) -> bool {
        if !scroll.is_active() {
            if self.was_active {
                sdebug!(state = ?self.state, "SnapController: host deactivated");
                self.tween = None;
                self.set_state(SnapState::Idle);
            }
            self.was_active = false;
            return false;
        }
        self.was_active = true;
        self.list.tick(scroll);

        let anchor = self.snap_anchor(scroll);
        let Some(nearest) = self.nearest(anchor) else {
            if self.snapped.take().is_some() {
                self.notify();
            }
            return false;
        };

        let vector = anchor - nearest.row;
        let distance = vector.abs();
        if self.snapped.as_ref() != Some(&nearest.record)
            && distance < self.list.options().item_row_size
        {
            strace!(index = nearest.index, distance, "SnapController: snapped item changed");
            self.snapped = Some(nearest.record.clone());
            self.notify();
        }

        let offset = scroll.row_offset();
        let moved = match self.state {
            SnapState::Idle => {
                if !is_bouncing(scroll)
                    && distance > SNAP_EPSILON
                    && scroll.velocity() <= distance / self.options.ease_duration_secs()
                {
                    scroll.stop_momentum();
                    self.start_tween(offset, offset + vector, now_ms);
                }
                false
            }
            SnapState::JumpTo => {
                scroll.stop_momentum();
                let end = self.destination(&nearest, vector, offset);
                self.target = None;
                scroll.set_row_offset(end);
                self.set_state(SnapState::Idle);
                true
            }
            SnapState::MoveTo => {
                scroll.stop_momentum();
                let end = self.destination(&nearest, vector, offset);
                self.target = None;
                self.start_tween(offset, end, now_ms);
                false
            }
            SnapState::Interpolating => self.step_tween(scroll, now_ms),
            SnapState::Dragging => false,
        };

        if moved {
            self.list.mark_dirty();
            self.list.tick(scroll);
        }
        moved
    }

    fn request(&mut self, record: &T, state: SnapState) -> bool {
        if !self.list.records().contains(record) {
            swarn!(state = ?state, "SnapController: target record is not in the list");
            return false;
        }
        self.target = Some(record.clone());
        self.tween = None;
        self.set_state(state);
        true
    }

    fn set_state(&mut self, state: SnapState) {
        if self.state != state {
            sdebug!(from = ?self.state, to = ?state, "SnapController: state");
            self.state = state;
        }
    }

    fn notify(&self) {
        if let Some(on_change) = &self.on_change {
            on_change(self.snapped.as_ref());
        }
    }

    /// The visible item whose center is closest to `anchor`; ties go to the lowest index.
    fn nearest(&self, anchor: f32) -> Option<Nearest<T>> {
        self.list
            .visible_items()
            .iter()
            .min_by(|a, b| (a.row - anchor).abs().total_cmp(&(b.row - anchor).abs()))
            .map(|it| Nearest {
                index: it.index,
                record: it.record.clone(),
                row: it.row,
            })
    }

    /// Logical index of the pending target as seen from `nearest`.
    ///
    /// Infinite lists take the shorter way around the loop. Without a target the first record is
    /// used; a target that was removed in the meantime falls back to `nearest` itself.
    fn target_index(&self, nearest: &Nearest<T>) -> i64 {
        let records = self.list.records();
        let to = match &self.target {
            Some(target) => records.position(target),
            None => (!records.is_empty()).then_some(0),
        };
        let (Some(to), Some(from)) = (to, records.position(&nearest.record)) else {
            return nearest.index;
        };

        let count = records.len() as i64;
        let diff = to as i64 - from as i64;
        if self.list.is_infinite() && diff.abs() > count / 2 {
            nearest.index + diff - diff.signum() * count
        } else {
            nearest.index + diff
        }
    }

    /// Scroll offset that centers the pending target on the anchor.
    fn destination(&self, nearest: &Nearest<T>, vector: f32, offset: f32) -> f32 {
        let index = self.target_index(nearest);
        let columns = self.list.window().num_columns.max(1) as i64;
        let rows = index.div_euclid(columns) - nearest.index.div_euclid(columns);
        offset - self.list.options().row_pitch() * rows as f32 + vector
    }

    fn start_tween(&mut self, from: f32, to: f32, now_ms: u64) {
        strace!(from, to, now_ms, "SnapController: interpolate");
        self.tween = Some(Tween::new(
            from,
            to,
            now_ms,
            self.options.ease_duration_ms,
            self.options.ease,
        ));
        self.set_state(SnapState::Interpolating);
    }

    fn step_tween<S: ScrollPosition + ?Sized>(&mut self, scroll: &mut S, now_ms: u64) -> bool {
        let Some(tween) = self.tween else {
            self.set_state(SnapState::Idle);
            return false;
        };
        scroll.set_row_offset(tween.sample(now_ms));
        if tween.is_done(now_ms) {
            self.tween = None;
            self.set_state(SnapState::Idle);
        }
        true
    }
}

/// Whether elastic scroll physics are pulling the content back inside its bounds.
fn is_bouncing<S: ScrollPosition + ?Sized>(scroll: &S) -> bool {
    if !scroll.is_elastic() {
        return false;
    }
    let offset = scroll.row_offset();
    let overflow = (scroll.content_row_size() - scroll.viewport_row_size()).max(0.0);
    offset > SNAP_EPSILON || offset + overflow < -SNAP_EPSILON
}

impl<T: fmt::Debug, V: fmt::Debug> fmt::Debug for SnapController<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapController")
            .field("list", &self.list)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("target", &self.target)
            .field("tween", &self.tween)
            .field("snapped", &self.snapped)
            .field("on_change", &self.on_change.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
