// Example: infinite scroll with a loading flag guarding duplicate fetches.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use windowing::{ListOptions, ScrollMetrics, WindowEngine};

fn main() {
    let requests = Arc::new(AtomicUsize::new(0));
    let opts = ListOptions::new(50, 32)
        .with_end_reached_threshold(0.9)
        .with_on_end_reached(Some({
            let requests = Arc::clone(&requests);
            move || {
                requests.fetch_add(1, Ordering::Relaxed);
            }
        }));
    let mut e = WindowEngine::new(opts);
    e.on_resize(320);

    for offset in (0..=1280).step_by(160) {
        let fired = e.on_scroll(ScrollMetrics {
            scroll_offset: offset,
            scroll_extent: e.total_extent(),
            container_height: e.container_height(),
        });
        if fired {
            // The page is now in flight.
            e.set_loading(true);
        }
        println!("offset={offset} window={:?} fired={fired}", e.window());
    }

    // The page arrived.
    e.batch_update(|e| {
        e.set_item_count(100);
        e.set_loading(false);
    });
    println!(
        "requests={} item_count={}",
        requests.load(Ordering::Relaxed),
        e.item_count()
    );
}
