use crate::*;

use std::format;
use std::string::{String, ToString};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::vec::Vec;

use windowing::Phase;

fn numbers(n: u32) -> Vec<u32> {
    (0..n).collect()
}

fn props(n: u32, item_height: u32) -> ListProps<u32, String> {
    ListProps::new(numbers(n), item_height, |item: &u32, index| {
        format!("#{index}={item}")
    })
}

/// Mounts `list` on `host` the way a host renderer would: lay out, attach, deliver events.
fn mount(list: &mut WindowedList<u32, String>, host: &mut SimContainer) {
    host.present(&list.render());
    list.mount(host);
    host.pump(list);
}

fn indexes(frame: &ListFrame<String>) -> Vec<usize> {
    frame.rows.iter().map(|r| r.row.index).collect()
}

#[test]
fn mount_measures_container_and_renders_visible_rows() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    assert_eq!(list.engine().phase(), Phase::Unmeasured);

    mount(&mut list, &mut host);
    assert!(list.is_mounted());
    assert_eq!(host.resize_observers(), 1);
    assert_eq!(host.scroll_listeners(), 1);
    assert_eq!(list.engine().phase(), Phase::Measured);
    assert_eq!(list.engine().container_height(), 400);

    let frame = list.render();
    assert_eq!(frame.total_height, 40_000);
    assert_eq!(indexes(&frame), (0..=13).collect::<Vec<_>>());
    assert_eq!(frame.rows[5].row.top, 200);
    assert_eq!(frame.rows[5].row.height, 40);
    assert_eq!(frame.rows[5].content, "#5=5");
    assert_eq!(frame.empty, None);
    assert_eq!(frame.loading_indicator, None);
}

#[test]
fn user_scroll_flows_through_the_tracker() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    mount(&mut list, &mut host);

    host.user_scroll(4000);
    assert_eq!(list.engine().scroll_offset(), 0);
    assert_eq!(host.pump(&mut list), 1);
    assert_eq!(list.engine().scroll_offset(), 4000);

    let frame = list.render();
    assert_eq!(frame.rows.first().map(|r| r.row.index), Some(97));
    assert_eq!(frame.rows.last().map(|r| r.row.index), Some(113));
    assert_eq!(frame.rows[0].row.top, 97 * 40);
}

#[test]
fn resize_recomputes_the_window() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    mount(&mut list, &mut host);

    host.resize(800);
    host.pump(&mut list);
    assert_eq!(list.engine().container_height(), 800);
    assert_eq!(list.engine().window().map(|w| w.end_index), Some(23));
}

#[test]
fn scroll_to_index_writes_the_host_offset() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    mount(&mut list, &mut host);

    list.scroll_to_index(Some(500), &mut host);
    assert_eq!(host.scroll_top(), 20_000);
    // The engine only learns the offset from the scroll event.
    assert_eq!(list.engine().scroll_offset(), 0);

    host.pump(&mut list);
    assert_eq!(list.engine().scroll_offset(), 20_000);
    assert!(indexes(&list.render()).contains(&500));
}

#[test]
fn repeated_scroll_to_index_is_idempotent() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    mount(&mut list, &mut host);

    list.scroll_to_index(Some(500), &mut host);
    host.pump(&mut list);
    let once = host.scroll_top();

    list.scroll_to_index(Some(500), &mut host);
    assert_eq!(host.pending_events(), 0);
    host.pump(&mut list);
    assert_eq!(host.scroll_top(), once);
    assert_eq!(list.engine().scroll_offset(), once);

    // Re-applying the same props does not jump back either.
    host.user_scroll(0);
    host.pump(&mut list);
    list.set_props(props(1000, 40).with_scroll_to_index(Some(500)), &mut host);
    assert_eq!(host.scroll_top(), 0);
}

#[test]
fn changed_or_reset_target_jumps_again() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    mount(&mut list, &mut host);

    list.scroll_to_index(Some(500), &mut host);
    host.pump(&mut list);
    list.scroll_to_index(Some(10), &mut host);
    host.pump(&mut list);
    assert_eq!(list.engine().scroll_offset(), 400);

    host.user_scroll(8000);
    host.pump(&mut list);
    list.scroll_to_index(None, &mut host);
    list.scroll_to_index(Some(10), &mut host);
    host.pump(&mut list);
    assert_eq!(list.engine().scroll_offset(), 400);
}

#[test]
fn out_of_range_scroll_to_index_is_ignored() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    mount(&mut list, &mut host);

    list.scroll_to_index(Some(1000), &mut host);
    assert_eq!(host.pending_events(), 0);
    assert_eq!(host.scroll_top(), 0);
    assert_eq!(list.engine().last_scroll_target(), None);
}

#[test]
fn scroll_to_index_prop_is_dispatched_on_mount() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40).with_scroll_to_index(Some(50)));
    mount(&mut list, &mut host);
    assert_eq!(host.scroll_top(), 2000);
    assert_eq!(list.engine().scroll_offset(), 2000);
    assert_eq!(list.engine().window().map(|w| w.start_index), Some(47));
}

#[test]
fn scroll_to_index_before_mount_waits_for_mount() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    list.scroll_to_index(Some(50), &mut host);
    assert_eq!(host.scroll_top(), 0);

    mount(&mut list, &mut host);
    assert_eq!(list.engine().scroll_offset(), 2000);
}

#[test]
fn scroll_to_index_waits_for_content_layout() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40).with_scroll_to_index(Some(50)));

    // Attach before any frame is laid out: the host has no scroll extent yet.
    list.mount(&mut host);
    host.pump(&mut list);
    assert_eq!(host.scroll_top(), 0);
    assert!(list.has_deferred_scroll());
    assert_eq!(list.engine().last_scroll_target(), None);

    host.present(&list.render());
    host.pump(&mut list);
    assert_eq!(host.scroll_top(), 2000);
    assert_eq!(list.engine().scroll_offset(), 2000);
    assert_eq!(list.engine().last_scroll_target(), Some(50));
    assert!(!list.has_deferred_scroll());
}

#[test]
fn clearing_the_target_drops_a_deferred_jump() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40).with_scroll_to_index(Some(50)));
    list.mount(&mut host);
    host.pump(&mut list);
    assert!(list.has_deferred_scroll());

    list.scroll_to_index(None, &mut host);
    assert!(!list.has_deferred_scroll());
    host.present(&list.render());
    host.pump(&mut list);
    assert_eq!(host.scroll_top(), 0);
}

#[test]
fn jump_to_first_row_needs_no_layout() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40).with_scroll_to_index(Some(0)));
    list.mount(&mut host);
    host.pump(&mut list);
    assert!(!list.has_deferred_scroll());
    assert_eq!(list.engine().last_scroll_target(), Some(0));
}

#[test]
fn browser_clamp_limits_jumps_near_the_end() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    mount(&mut list, &mut host);

    list.scroll_to_index(Some(999), &mut host);
    host.pump(&mut list);
    assert_eq!(host.scroll_top(), 40_000 - 400);
    assert!(list.engine().window().is_some_and(|w| w.contains(999)));
}

#[test]
fn empty_list_renders_empty_component() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(0, 40).with_empty_component(Some("nothing".into())));
    mount(&mut list, &mut host);

    let frame = list.render();
    assert!(frame.rows.is_empty());
    assert_eq!(frame.empty.as_deref(), Some("nothing"));
    assert_eq!(frame.loading_indicator, None);
    assert_eq!(frame.total_height, 0);
}

#[test]
fn empty_list_while_loading_shows_only_the_indicator() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(
        props(0, 40)
            .with_loading(true)
            .with_empty_component(Some("nothing".into()))
            .with_loading_indicator(Some("loading".into())),
    );
    mount(&mut list, &mut host);

    let frame = list.render();
    assert!(frame.rows.is_empty());
    assert_eq!(frame.empty, None);
    assert_eq!(frame.loading_indicator.as_deref(), Some("loading"));
}

#[test]
fn loading_indicator_trails_rows() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(
        props(100, 40).with_loading_indicator(Some("loading".into())),
    );
    mount(&mut list, &mut host);
    assert_eq!(list.render().loading_indicator, None);

    list.set_loading(true);
    let frame = list.render();
    assert_eq!(frame.rows.len(), 14);
    assert_eq!(frame.loading_indicator.as_deref(), Some("loading"));
}

#[test]
fn end_reached_fires_from_host_scroll_and_respects_loading() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut host = SimContainer::new(50);
    let mut list = WindowedList::new(props(20, 50).with_on_end_reached(Some({
        let calls = Arc::clone(&calls);
        move || {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    })));
    mount(&mut list, &mut host);

    host.user_scroll(500);
    host.pump(&mut list);
    assert_eq!(calls.load(Ordering::Relaxed), 0);

    // 950 + 50 >= 1000 * 0.8
    host.user_scroll(950);
    host.pump(&mut list);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    list.set_loading(true);
    host.user_scroll(900);
    host.pump(&mut list);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    // The next page arrives.
    list.set_items(numbers(40));
    list.set_loading(false);
    host.present(&list.render());
    assert_eq!(host.scroll_height(), 2000);
    host.user_scroll(1000);
    host.pump(&mut list);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn unmount_releases_both_subscriptions_once() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(100, 40));
    mount(&mut list, &mut host);

    list.unmount();
    assert!(!list.is_mounted());
    assert_eq!(host.resize_observers(), 0);
    assert_eq!(host.scroll_listeners(), 0);
    assert_eq!(list.engine().phase(), Phase::Unmounted);

    // Nothing is listening, so nothing is queued.
    host.user_scroll(400);
    host.resize(200);
    assert_eq!(host.pending_events(), 0);

    // A stray event is ignored.
    list.handle_event(&host, ContainerEvent::Scrolled);
    assert_eq!(list.engine().scroll_offset(), 0);

    // Dropping after unmount does not release again.
    drop(list);
    assert_eq!(host.scroll_listeners(), 0);
}

#[test]
fn dropping_a_mounted_list_releases_subscriptions() {
    let mut host = SimContainer::new(400);
    {
        let mut list = WindowedList::new(props(100, 40));
        mount(&mut list, &mut host);
        assert_eq!(host.resize_observers(), 1);
    }
    assert_eq!(host.resize_observers(), 0);
    assert_eq!(host.scroll_listeners(), 0);
}

#[test]
fn detached_container_degrades_to_unmeasured() {
    let mut host = SimContainer::detached(400);
    let mut list = WindowedList::new(props(100, 40));
    mount(&mut list, &mut host);

    assert!(!list.is_observing_resize());
    assert!(list.is_listening_scroll());
    assert_eq!(list.attach_error(), Some(&AttachError::Detached));
    assert_eq!(list.engine().phase(), Phase::Unmeasured);
    assert_eq!(host.resize_observers(), 0);

    // Materializing a single row is the safe fallback.
    assert_eq!(indexes(&list.render()), [0]);

    // A broadcast resize without a live observation is ignored.
    list.handle_event(&host, ContainerEvent::Resized { height: 400 });
    assert_eq!(list.engine().container_height(), 0);
}

#[test]
fn unsupported_resize_observation_is_reported_not_raised() {
    let mut host = SimContainer::new(400).with_resize_support(false);
    let mut list = WindowedList::new(props(100, 40));
    mount(&mut list, &mut host);

    let err = list.attach_error().cloned();
    assert_eq!(err, Some(AttachError::Unsupported("resize")));
    assert_eq!(
        err.map(|e| e.to_string()).as_deref(),
        Some("host does not support resize observation")
    );
    assert_eq!(list.engine().phase(), Phase::Unmeasured);
}

#[test]
fn mounting_twice_does_not_duplicate_subscriptions() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(100, 40));
    mount(&mut list, &mut host);
    list.mount(&mut host);
    assert_eq!(host.resize_observers(), 1);
    assert_eq!(host.scroll_listeners(), 1);

    list.unmount();
    list.mount(&mut host);
    assert!(!list.is_mounted());
    assert_eq!(host.resize_observers(), 0);
}

#[test]
fn total_height_is_independent_of_overscan() {
    let mut host = SimContainer::new(400);
    let mut narrow = WindowedList::new(props(1000, 40).with_overscan(0));
    let mut wide = WindowedList::new(props(1000, 40).with_overscan(10));
    mount(&mut narrow, &mut host);
    mount(&mut wide, &mut host);

    let a = narrow.render();
    let b = wide.render();
    assert_eq!(a.total_height, b.total_height);
    assert_eq!(a.total_height, 40_000);
    assert!(b.rows.len() > a.rows.len());
}

#[test]
fn shrinking_items_pulls_the_scroll_position_back() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    mount(&mut list, &mut host);
    host.user_scroll(30_000);
    host.pump(&mut list);

    list.set_items(numbers(100));
    host.present(&list.render());
    host.pump(&mut list);
    assert_eq!(list.engine().scroll_offset(), 4000 - 400);
    assert_eq!(
        list.engine().window().map(|w| (w.start_index, w.end_index)),
        Some((87, 99))
    );
}

#[test]
fn set_props_keeps_item_height_and_updates_the_rest() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    mount(&mut list, &mut host);

    list.set_props(
        ListProps::new(numbers(10), 80, |item: &u32, _| format!("item {item}"))
            .with_overscan(0)
            .with_empty_component(Some("none".into())),
        &mut host,
    );
    assert_eq!(list.engine().item_height(), 40);
    assert_eq!(list.items().len(), 10);

    let frame = list.render();
    assert_eq!(frame.total_height, 400);
    assert_eq!(frame.rows[0].content, "item 0");
    assert_eq!(indexes(&frame), (0..=9).collect::<Vec<_>>());
}

#[test]
fn render_into_reuses_the_frame() {
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    mount(&mut list, &mut host);

    let mut frame = ListFrame::default();
    list.render_into(&mut frame);
    let capacity = frame.rows.capacity();
    assert_eq!(frame.rows.len(), 14);

    host.user_scroll(40);
    host.pump(&mut list);
    list.render_into(&mut frame);
    assert_eq!(frame.rows.len(), 15);
    assert_eq!(frame.rows[0].row.index, 0);
    assert!(frame.rows.capacity() >= capacity);
    assert_eq!(frame, list.render());
}

#[test]
fn on_change_fires_once_per_host_event() {
    let changes = Arc::new(AtomicUsize::new(0));
    let mut host = SimContainer::new(400);
    let mut list = WindowedList::new(props(1000, 40));
    list.engine_mut().set_on_change(Some({
        let changes = Arc::clone(&changes);
        move |_: &windowing::WindowEngine| {
            changes.fetch_add(1, Ordering::Relaxed);
        }
    }));
    let base = changes.load(Ordering::Relaxed);

    mount(&mut list, &mut host);
    assert_eq!(changes.load(Ordering::Relaxed), base + 1);

    host.user_scroll(100);
    host.user_scroll(200);
    host.pump(&mut list);
    // Both events read the latest offset; only the first one changes state.
    assert_eq!(changes.load(Ordering::Relaxed), base + 2);
    assert_eq!(list.engine().scroll_offset(), 200);
}

#[test]
fn subscription_release_runs_once() {
    let released = Arc::new(AtomicUsize::new(0));
    let mut sub = Subscription::new({
        let released = Arc::clone(&released);
        move || {
            released.fetch_add(1, Ordering::Relaxed);
        }
    });
    assert!(sub.is_active());
    sub.release();
    sub.release();
    assert!(!sub.is_active());
    drop(sub);
    assert_eq!(released.load(Ordering::Relaxed), 1);
}

#[test]
fn example_infinite_scroll_smoke() {
    let pages = Arc::new(AtomicUsize::new(0));
    let mut host = SimContainer::new(320);
    let mut list = WindowedList::new(
        props(50, 32)
            .with_end_reached_threshold(0.9)
            .with_loading_indicator(Some("…".into()))
            .with_on_end_reached(Some({
                let pages = Arc::clone(&pages);
                move || {
                    pages.fetch_add(1, Ordering::Relaxed);
                }
            })),
    );
    mount(&mut list, &mut host);

    let mut requested = 0usize;
    for step in 0..40u64 {
        host.user_scroll(step * 64);
        host.pump(&mut list);
        if pages.load(Ordering::Relaxed) > requested {
            requested = pages.load(Ordering::Relaxed);
            list.set_loading(true);
            let frame = list.render();
            assert!(frame.loading_indicator.is_some());

            let next = list.items().len() as u32 + 50;
            list.set_items(numbers(next));
            list.set_loading(false);
            host.present(&list.render());
        }
    }
    assert!(requested >= 1);
    assert_eq!(list.items().len(), 50 + 50 * requested);
}
