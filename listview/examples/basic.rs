// Example: a recycling list driven by a plain ScrollState.
use listview::{ItemView, ListView, ListViewOptions, ScrollState};

#[derive(Debug, Default)]
struct Label {
    text: String,
    row: f32,
}

impl ItemView<String> for Label {
    fn set_position(&mut self, row: f32, _column: f32) {
        self.row = row;
    }

    fn on_visible(&mut self, _index: i64, record: &String) {
        self.text.clone_from(record);
    }
}

fn main() {
    let mut list = ListView::with_factory(ListViewOptions::new(40.0, 320.0), Label::default);
    for i in 0..1_000 {
        list.append(format!("item {i}"));
    }

    let mut scroll = ScrollState::new(200.0, 320.0);
    list.tick(&mut scroll);
    println!("content_size={}", scroll.content_row_size);
    println!("window={:?}", list.window());

    // Fling forward and let momentum carry the list; views are recycled as rows scroll out.
    scroll.fling(-2_000.0);
    let mut now_ms = 0u64;
    while scroll.advance(16) {
        now_ms += 16;
        list.tick(&mut scroll);
    }

    println!("stopped at t={now_ms} offset={}", scroll.row_offset);
    for (item, view) in list.visible_views() {
        println!("  #{} {:?} at row={}", item.index, view.text, view.row);
    }
    println!(
        "views: created={} active={} idle={}",
        list.pool().count_created(),
        list.pool().count_active(),
        list.pool().count_idle()
    );
}
