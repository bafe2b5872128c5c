use crate::*;

use std::sync::{Arc, Mutex};

use listview::{ItemView, ListView, ListViewOptions, ScrollState};

#[derive(Debug, Default)]
struct Cell {
    row: f32,
}

impl<T> ItemView<T> for Cell {
    fn set_position(&mut self, row: f32, _column: f32) {
        self.row = row;
    }
}

type Log = Arc<Mutex<Vec<Option<u32>>>>;

fn controller(options: ListViewOptions, count: u32) -> (SnapController<u32, Cell>, Log) {
    let mut list = ListView::with_factory(options, Cell::default);
    for r in 0..count {
        list.append(r);
    }
    let log = Log::default();
    let sink = Arc::clone(&log);
    let c = SnapController::from_list(list)
        .with_on_change(move |r| sink.lock().unwrap().push(r.copied()));
    (c, log)
}

fn options() -> ListViewOptions {
    ListViewOptions::new(100.0, 100.0)
}

fn scroll() -> ScrollState {
    ScrollState::new(300.0, 100.0)
}

/// The record centered on the snap anchor, if any.
fn anchored(c: &SnapController<u32, Cell>, s: &ScrollState) -> Option<u32> {
    let anchor = c.snap_anchor(s);
    c.list()
        .visible_items()
        .iter()
        .find(|it| (it.row - anchor).abs() < 0.01)
        .map(|it| it.record)
}

/// Ticks every 16 ms until the controller is idle; returns the last tick time.
fn settle(c: &mut SnapController<u32, Cell>, s: &mut ScrollState, mut now_ms: u64) -> u64 {
    for _ in 0..1_000 {
        now_ms += 16;
        c.tick(s, now_ms);
        if c.state() == SnapState::Idle && !c.is_animating() {
            return now_ms;
        }
    }
    panic!("controller did not settle");
}

/// A bounded 20-item list whose first tick already centered record 0 (offset 100).
fn jumped() -> (SnapController<u32, Cell>, ScrollState, Log) {
    let (mut c, log) = controller(options(), 20);
    let mut s = scroll();
    assert!(c.tick(&mut s, 0));
    (c, s, log)
}

#[test]
fn first_tick_jumps_to_the_first_record() {
    let (mut c, log) = controller(options(), 20);
    let mut s = scroll();
    assert_eq!(c.state(), SnapState::JumpTo);
    assert_eq!(c.snap_anchor(&s), 150.0);

    assert!(c.tick(&mut s, 0));
    assert_eq!(s.row_offset, 100.0);
    assert_eq!(c.state(), SnapState::Idle);
    assert_eq!(anchored(&c, &s), Some(0));
    // The item under the anchor before the jump is announced first.
    assert_eq!(*log.lock().unwrap(), [Some(1)]);

    assert!(!c.tick(&mut s, 16));
    assert_eq!(*log.lock().unwrap(), [Some(1), Some(0)]);
    assert_eq!(c.snapped(), Some(&0));
    assert_eq!(s.row_offset, 100.0);
}

#[test]
fn idle_settles_onto_the_nearest_item() {
    let (mut c, mut s, log) = jumped();
    s.row_offset = -237.0;
    c.list_mut().mark_dirty();

    assert!(!c.tick(&mut s, 1_000));
    assert_eq!(c.state(), SnapState::Interpolating);
    assert_eq!(log.lock().unwrap().last(), Some(&Some(3)));

    let mut last = (s.row_offset + 200.0).abs();
    let mut now_ms = 1_000;
    while c.state() == SnapState::Interpolating {
        now_ms += 16;
        assert!(c.tick(&mut s, now_ms));
        let distance = (s.row_offset + 200.0).abs();
        assert!(distance < last, "distance {distance} did not shrink from {last}");
        last = distance;
        assert!(now_ms < 2_000);
    }
    assert_eq!(s.row_offset, -200.0);
    assert!(!c.is_animating());
    assert_eq!(anchored(&c, &s), Some(3));

    assert!(!c.tick(&mut s, now_ms + 16));
    assert_eq!(s.row_offset, -200.0);
}

#[test]
fn fast_momentum_defers_settling() {
    let (mut c, mut s, _) = jumped();
    s.row_offset = -237.0;
    s.fling(-5_000.0);
    c.list_mut().mark_dirty();

    c.tick(&mut s, 1_000);
    assert_eq!(c.state(), SnapState::Idle);
    assert!(!c.is_animating());
    assert_eq!(s.velocity, -5_000.0);

    // 37 units left over 200 ms: anything up to 185 units/s settles.
    s.velocity = -100.0;
    c.tick(&mut s, 1_016);
    assert_eq!(c.state(), SnapState::Interpolating);
    assert_eq!(s.velocity, 0.0);
}

#[test]
fn longer_ease_lowers_the_momentum_threshold() {
    let (mut c, mut s, _) = jumped();
    c.set_options(SnapOptions::default().with_ease_duration_ms(1_000));
    s.row_offset = -237.0;
    s.velocity = -100.0;
    c.list_mut().mark_dirty();

    c.tick(&mut s, 1_000);
    assert_eq!(c.state(), SnapState::Idle);
    assert!(!c.is_animating());
}

#[test]
fn elastic_overscroll_is_left_to_the_host() {
    let (mut c, mut s, _) = jumped();
    s.elastic = true;
    s.row_offset = 130.0;
    c.list_mut().mark_dirty();

    c.tick(&mut s, 100);
    assert_eq!(c.state(), SnapState::Idle);
    assert!(!c.is_animating());

    s.elastic = false;
    c.tick(&mut s, 116);
    assert_eq!(c.state(), SnapState::Interpolating);
    settle(&mut c, &mut s, 116);
    assert_eq!(s.row_offset, 100.0);
}

#[test]
fn move_to_takes_the_short_way_around_infinite_lists() {
    let (mut c, _) = controller(options().with_infinite_scroll(true), 10);
    let mut s = scroll();
    c.tick(&mut s, 0);
    assert_eq!(s.row_offset, 100.0);
    assert_eq!(anchored(&c, &s), Some(0));

    assert!(c.move_to(&9));
    assert_eq!(c.state(), SnapState::MoveTo);
    assert_eq!(c.target(), Some(&9));

    assert!(!c.tick(&mut s, 100));
    assert_eq!(c.state(), SnapState::Interpolating);
    assert_eq!(c.target(), None);

    let mut last = s.row_offset;
    let mut now_ms = 100;
    while c.is_animating() {
        now_ms += 16;
        c.tick(&mut s, now_ms);
        assert!(s.row_offset >= last);
        last = s.row_offset;
    }
    // One row backward instead of nine forward.
    assert_eq!(s.row_offset, 200.0);
    assert_eq!(anchored(&c, &s), Some(9));
    assert_eq!(c.list().visible_item(-1).map(|it| it.row), Some(150.0));
    assert_eq!(c.snapped(), Some(&9));
}

#[test]
fn move_to_in_bounded_lists_travels_the_direct_way() {
    let (mut c, mut s, _) = jumped();
    assert!(c.move_to(&9));
    settle(&mut c, &mut s, 100);
    assert_eq!(s.row_offset, -800.0);
    assert_eq!(anchored(&c, &s), Some(9));
}

#[test]
fn grid_targets_move_by_rows() {
    let opts = options().with_max_columns(2);
    let (mut c, log) = controller(opts, 20);
    let mut s = ScrollState::new(300.0, 200.0);

    c.tick(&mut s, 0);
    assert_eq!(c.list().window().num_columns, 2);
    assert_eq!(log.lock().unwrap().first(), Some(&Some(2)));
    assert_eq!(s.row_offset, 100.0);

    assert!(c.move_to(&7));
    settle(&mut c, &mut s, 16);
    assert_eq!(s.row_offset, -200.0);
    assert_eq!(c.list().visible_item(7).map(|it| it.row), Some(150.0));
}

#[test]
fn removed_target_falls_back_to_the_nearest_item() {
    let (mut c, mut s, _) = jumped();
    assert!(c.move_to(&5));
    assert!(c.list_mut().remove(&5));

    c.tick(&mut s, 100);
    assert_eq!(c.target(), None);
    settle(&mut c, &mut s, 100);
    assert_eq!(s.row_offset, 100.0);
    assert_eq!(anchored(&c, &s), Some(0));
}

#[test]
fn unknown_targets_are_ignored() {
    let (mut c, mut s, _) = jumped();
    assert!(!c.jump_to(&99));
    assert!(!c.move_to(&99));
    assert_eq!(c.state(), SnapState::Idle);
    assert_eq!(c.target(), None);
    assert!(!c.tick(&mut s, 100));
}

#[test]
fn jump_to_supersedes_interpolation() {
    let (mut c, mut s, _) = jumped();
    assert!(c.move_to(&5));
    c.tick(&mut s, 100);
    c.tick(&mut s, 150);
    assert!(c.is_animating());
    assert_eq!(s.row_offset, -25.0);

    assert!(c.jump_to(&2));
    assert!(!c.is_animating());
    assert_eq!(c.state(), SnapState::JumpTo);

    assert!(c.tick(&mut s, 166));
    assert_eq!(s.row_offset, -100.0);
    assert_eq!(c.state(), SnapState::Idle);
    assert_eq!(anchored(&c, &s), Some(2));
}

#[test]
fn host_scrolling_is_settled_without_mark_dirty() {
    let (mut c, mut s, log) = jumped();
    s.row_offset = -237.0;

    assert!(!c.tick(&mut s, 1_000));
    assert_eq!(c.state(), SnapState::Interpolating);
    assert_eq!(c.snapped(), Some(&3));
    assert_eq!(log.lock().unwrap().last(), Some(&Some(3)));

    settle(&mut c, &mut s, 1_000);
    assert_eq!(s.row_offset, -200.0);
    assert_eq!(anchored(&c, &s), Some(3));
}

#[test]
fn equidistant_items_snap_to_the_lower_index() {
    let (mut c, mut s, _) = jumped();
    assert!(c.begin_drag(PointerButton::Primary, &s));

    // Items 1 and 2 sit 50 either side of the anchor at 150.
    s.row_offset = -50.0;
    assert!(!c.tick(&mut s, 100));
    let rows: Vec<f32> = c.list().visible_items().iter().map(|it| it.row).collect();
    assert_eq!(rows, [0.0, 100.0, 200.0, 300.0]);
    assert_eq!(c.snapped(), Some(&1));

    assert!(c.end_drag(PointerButton::Primary));
    settle(&mut c, &mut s, 100);
    assert_eq!(s.row_offset, 0.0);
    assert_eq!(anchored(&c, &s), Some(1));
}

#[test]
fn dragging_suspends_snapping() {
    let (mut c, mut s, _) = jumped();
    assert!(!c.begin_drag(PointerButton::Secondary, &s));
    s.active = false;
    assert!(!c.begin_drag(PointerButton::Primary, &s));
    s.active = true;
    assert!(c.begin_drag(PointerButton::Primary, &s));
    assert_eq!(c.state(), SnapState::Dragging);

    s.row_offset = -237.0;
    c.list_mut().mark_dirty();
    assert!(!c.tick(&mut s, 100));
    assert_eq!(s.row_offset, -237.0);
    assert_eq!(c.state(), SnapState::Dragging);

    assert!(!c.end_drag(PointerButton::Secondary));
    assert!(c.end_drag(PointerButton::Primary));
    assert!(!c.end_drag(PointerButton::Primary));
    assert_eq!(c.state(), SnapState::Idle);

    c.tick(&mut s, 200);
    assert!(c.is_animating());
    assert!(c.begin_drag(PointerButton::Primary, &s));
    assert!(!c.is_animating());
}

#[test]
fn deactivation_forces_idle_and_drops_interpolation() {
    let (mut c, mut s, _) = jumped();
    assert!(c.move_to(&5));
    c.tick(&mut s, 100);
    assert_eq!(c.state(), SnapState::Interpolating);

    s.active = false;
    assert!(!c.tick(&mut s, 116));
    assert_eq!(c.state(), SnapState::Idle);
    assert!(!c.is_animating());
    assert_eq!(s.row_offset, 100.0);
    assert!(!c.tick(&mut s, 132));

    s.active = true;
    assert!(!c.tick(&mut s, 148));
    assert_eq!(c.state(), SnapState::Idle);
}

#[test]
fn inactive_host_keeps_the_initial_jump_pending() {
    let (mut c, _) = controller(options(), 20);
    let mut s = scroll();
    s.active = false;
    assert!(!c.tick(&mut s, 0));
    assert_eq!(c.state(), SnapState::JumpTo);

    s.active = true;
    assert!(c.tick(&mut s, 16));
    assert_eq!(s.row_offset, 100.0);
}

#[test]
fn emptied_list_reports_none_once() {
    let (mut c, mut s, log) = jumped();
    c.tick(&mut s, 16);
    assert_eq!(c.snapped(), Some(&0));

    c.list_mut().remove_all();
    c.tick(&mut s, 32);
    c.tick(&mut s, 48);
    assert_eq!(*log.lock().unwrap(), [Some(1), Some(0), None]);
    assert_eq!(c.snapped(), None);
}

#[test]
fn empty_list_waits_for_records_before_jumping() {
    let (mut c, log) = controller(options(), 0);
    let mut s = scroll();
    assert!(!c.tick(&mut s, 0));
    assert_eq!(c.state(), SnapState::JumpTo);
    assert!(log.lock().unwrap().is_empty());

    for r in 0..3 {
        c.list_mut().append(r);
    }
    assert!(c.tick(&mut s, 16));
    assert_eq!(anchored(&c, &s), Some(0));
}

#[test]
fn every_curve_starts_at_zero_and_ends_at_one() {
    for ease in Ease::ALL {
        assert!(ease.sample(0.0).abs() < 1e-4, "{ease:?} at 0");
        assert!((ease.sample(1.0) - 1.0).abs() < 1e-4, "{ease:?} at 1");
    }
}

#[test]
fn in_out_curves_pass_through_the_midpoint() {
    for ease in Ease::ALL
        .into_iter()
        .filter(|e| e.name().starts_with("InOut"))
    {
        assert!((ease.sample(0.5) - 0.5).abs() < 1e-4, "{ease:?}");
    }
    assert!(Ease::OutBack.sample(0.8) > 1.0);
    assert!(Ease::InBack.sample(0.2) < 0.0);
}

#[test]
fn curves_resolve_by_name() {
    assert_eq!(Ease::from_name("linear"), Ease::Linear);
    assert_eq!(Ease::from_name("in_out_cubic"), Ease::InOutCubic);
    assert_eq!(Ease::from_name("InOutCubic"), Ease::InOutCubic);
    assert_eq!(Ease::from_name("inOutCubic"), Ease::InOutCubic);
    assert_eq!(Ease::from_name("easeOutBounce"), Ease::OutBounce);
    assert_eq!(Ease::from_name("ExpoInOut"), Ease::InOutExpo);
    assert_eq!(Ease::from_name("wobble"), Ease::Linear);
    assert_eq!("out-quad".parse::<Ease>(), Ok(Ease::OutQuad));
    for ease in Ease::ALL {
        assert_eq!(Ease::from_name(ease.name()), ease);
    }
}

#[test]
fn tween_samples_between_endpoints() {
    let t = Tween::new(0.0, 100.0, 1_000, 200, Ease::Linear);
    assert_eq!(t.sample(900), 0.0);
    assert_eq!(t.sample(1_000), 0.0);
    assert_eq!(t.sample(1_100), 50.0);
    assert!(!t.is_done(1_199));
    assert!(t.is_done(1_200));
    assert_eq!(t.sample(5_000), 100.0);

    let instant = Tween::new(3.0, 7.0, 0, 0, Ease::InOutBounce);
    assert_eq!(instant.duration_ms, 1);
    assert_eq!(instant.sample(1), 7.0);
}
