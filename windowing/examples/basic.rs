// Example: drive the engine by hand and navigate to an index.
use windowing::{ListOptions, ScrollMetrics, WindowEngine};

fn main() {
    let mut e = WindowEngine::new(ListOptions::new(1_000_000, 24));
    e.on_resize(480);
    e.on_scroll(ScrollMetrics {
        scroll_offset: 123_456,
        scroll_extent: e.total_extent(),
        container_height: e.container_height(),
    });

    let mut rows = Vec::new();
    e.collect_rows(&mut rows);
    println!("total_extent={}", e.total_extent());
    println!("window={:?}", e.window());
    println!("first_row={:?}", rows.first());

    // The host writes the returned offset and reports the resulting scroll event.
    if let Some(offset) = e.scroll_to_index(999_999) {
        e.on_scroll(ScrollMetrics {
            scroll_offset: offset,
            scroll_extent: e.total_extent(),
            container_height: e.container_height(),
        });
    }
    println!("after scroll_to_index: offset={}", e.scroll_offset());
}
