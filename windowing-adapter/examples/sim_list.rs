// Example: a windowed list on a simulated scroll container, with infinite scroll and
// scroll-to-index.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use windowing_adapter::{ListProps, ScrollHost, SimContainer, WindowedList};

fn main() {
    let wants_more = Arc::new(AtomicBool::new(false));
    let items: Vec<u32> = (0..200).collect();
    let props = ListProps::new(items, 20, |n: &u32, i| format!("[{i}] item {n}"))
        .with_overscan(2)
        .with_loading_indicator(Some("loading…".to_string()))
        .with_empty_component(Some("no items".to_string()))
        .with_on_end_reached(Some({
            let wants_more = Arc::clone(&wants_more);
            move || wants_more.store(true, Ordering::Relaxed)
        }));

    let mut host = SimContainer::new(200);
    let mut list = WindowedList::new(props);

    host.present(&list.render());
    list.mount(&mut host);
    host.pump(&mut list);
    print_frame("mounted", &list);

    host.user_scroll(1_000);
    host.pump(&mut list);
    print_frame("after user scroll", &list);

    list.scroll_to_index(Some(150), &mut host);
    host.pump(&mut list);
    print_frame("after scroll_to_index(150)", &list);

    host.user_scroll(host.scroll_height());
    host.pump(&mut list);
    if wants_more.swap(false, Ordering::Relaxed) {
        list.set_loading(true);
        print_frame("loading next page", &list);

        let next: Vec<u32> = (0..400).collect();
        list.set_items(next);
        list.set_loading(false);
        host.present(&list.render());
    }
    print_frame("next page loaded", &list);

    list.unmount();
    println!(
        "unmounted: resize_observers={} scroll_listeners={}",
        host.resize_observers(),
        host.scroll_listeners()
    );
}

fn print_frame(label: &str, list: &WindowedList<u32, String>) {
    let frame = list.render();
    println!(
        "{label}: offset={} window={:?} total_height={} rows={} first={:?} loading={:?}",
        list.engine().scroll_offset(),
        list.engine().window(),
        frame.total_height,
        frame.rows.len(),
        frame.rows.first().map(|r| &r.content),
        frame.loading_indicator,
    );
}
