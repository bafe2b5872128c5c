use listview::{ItemView, ListView, ListViewOptions, ScrollState};
use listview_snap::{Ease, PointerButton, SnapController, SnapOptions};

#[derive(Debug, Default)]
struct Card {
    row: f32,
}

impl ItemView<&'static str> for Card {
    fn set_position(&mut self, row: f32, _column: f32) {
        self.row = row;
    }
}

fn main() {
    // Example: an infinite carousel that snaps one card to the viewport center.
    //
    // An adapter would:
    // - call tick(scroll, now_ms) every frame
    // - forward pointer drags to begin_drag/end_drag
    // - let its own scroll physics integrate velocity between ticks
    let options = ListViewOptions::new(120.0, 300.0)
        .with_spacing(8.0)
        .with_infinite_scroll(true);
    let mut list = ListView::with_factory(options, Card::default);
    for name in ["mon", "tue", "wed", "thu", "fri", "sat", "sun"] {
        list.append(name);
    }

    let snap = SnapOptions::default()
        .with_ease(Ease::OutCubic)
        .with_ease_duration_ms(240);
    let mut c = SnapController::new(list, snap)
        .with_on_change(|r| println!("  snapped -> {r:?}"));
    let mut scroll = ScrollState::new(400.0, 300.0);

    let mut now_ms = 0u64;
    c.tick(&mut scroll, now_ms);
    println!("start: offset={} state={:?}", scroll.row_offset, c.state());

    // A short drag backward, released with a little momentum.
    c.begin_drag(PointerButton::Primary, &scroll);
    for _ in 0..10 {
        now_ms += 16;
        scroll.row_offset += 19.0;
        c.tick(&mut scroll, now_ms);
    }
    c.end_drag(PointerButton::Primary);
    scroll.fling(600.0);

    while now_ms < 2_000 {
        now_ms += 16;
        scroll.advance(16);
        c.tick(&mut scroll, now_ms);
    }
    println!(
        "settled: offset={} snapped={:?}",
        scroll.row_offset,
        c.snapped()
    );

    // "sun" is one card back around the loop from "mon".
    c.move_to(&"sun");
    while now_ms < 3_000 {
        now_ms += 16;
        c.tick(&mut scroll, now_ms);
    }
    println!(
        "move_to(sun): offset={} snapped={:?}",
        scroll.row_offset,
        c.snapped()
    );
}
