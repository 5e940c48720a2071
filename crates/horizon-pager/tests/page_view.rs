//! Integration tests for PageView navigation, reload and host input.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Event, Fixture, HEIGHT, WIDTH};
use horizon_pager::prelude::*;
use parking_lot::Mutex;

#[test]
fn test_change_page_without_animation() {
    let fx = Fixture::new(3);
    assert_eq!(fx.view.page_index(), 0);
    assert_eq!(fx.view.indicator().number_of_pages(), 3);

    fx.view.change_page(2, false);
    // Deferred until the loop runs.
    assert_eq!(fx.view.page_index(), 0);
    assert!(fx.delegate.events().is_empty());

    fx.event_loop.process_events();
    assert_eq!(fx.view.page_index(), 2);
    assert_eq!(fx.view.indicator().current_page(), 2);
    assert_eq!(fx.view.content_offset(), 2.0 * WIDTH);
    assert_eq!(fx.delegate.events(), vec![Event::Switched(2)]);
}

#[test]
fn test_change_page_animated() {
    let fx = Fixture::new(3);

    fx.view.change_page(2, true);
    fx.event_loop.process_events();
    assert!(fx.view.is_scrolling());
    assert_eq!(fx.view.page_index(), 0);

    fx.event_loop.advance(Duration::from_secs(1));
    assert!(!fx.view.is_scrolling());
    assert_eq!(fx.view.content_offset(), 2.0 * WIDTH);
    assert_eq!(fx.view.page_index(), 2);
    assert_eq!(fx.event_loop.active_timer_count(), 0);

    // Intermediate pages are observed on the way, the target exactly once.
    let switches = fx.delegate.switches();
    assert_eq!(switches.last(), Some(&2));
    assert_eq!(switches.iter().filter(|&&index| index == 2).count(), 1);
}

#[test]
fn test_change_page_to_current_page_is_silent() {
    let fx = Fixture::new(3);
    fx.view.change_page(0, true);
    fx.event_loop.process_events();

    assert!(!fx.view.is_scrolling());
    assert!(fx.delegate.events().is_empty());
}

#[test]
fn test_out_of_range_change_page_is_ignored() {
    let fx = Fixture::new(3);

    fx.view.change_page(10, false);
    fx.view.change_page(3, false);
    fx.view.change_page(-1, true);
    fx.event_loop.process_events();

    assert_eq!(fx.view.page_index(), 0);
    assert_eq!(fx.view.content_offset(), 0.0);
    assert!(fx.delegate.events().is_empty());
}

#[test]
fn test_index_follows_content_offset() {
    let fx = Fixture::new(4);

    fx.view.set_content_offset(WIDTH - 1.0);
    assert_eq!(fx.view.page_index(), 0);

    fx.view.set_content_offset(WIDTH);
    assert_eq!(fx.view.page_index(), 1);

    fx.view.set_content_offset(2.5 * WIDTH);
    assert_eq!(fx.view.page_index(), 2);

    // Overscroll on either side stays within the pages.
    fx.view.set_content_offset(-40.0);
    assert_eq!(fx.view.page_index(), 0);
    fx.view.set_content_offset(3.0 * WIDTH + 60.0);
    assert_eq!(fx.view.page_index(), 3);

    assert_eq!(fx.delegate.switches(), vec![1, 2, 0, 3]);
    assert_eq!(fx.view.indicator().current_page(), 3);
}

#[test]
fn test_reload_is_idempotent() {
    let fx = Fixture::new(5);
    fx.view.set_content_offset(WIDTH / 2.0);

    fx.view.reload_data();
    let pages = fx.view.visible_pages();
    let cells: Vec<_> = pages
        .iter()
        .map(|&page| fx.view.cell_id_for_page(page))
        .collect();
    let indicator = fx.view.indicator();
    let offset = fx.view.content_offset();

    fx.view.reload_data();
    assert_eq!(fx.view.visible_pages(), pages);
    assert_eq!(pages, vec![0, 1]);
    let again: Vec<_> = pages
        .iter()
        .map(|&page| fx.view.cell_id_for_page(page))
        .collect();
    assert_eq!(again, cells);
    assert_eq!(fx.view.indicator(), indicator);
    assert_eq!(fx.view.content_offset(), offset);
    assert_eq!(fx.content_index(0), Some(0));
    assert_eq!(fx.content_index(1), Some(1));
    assert!(fx.delegate.events().is_empty());
}

#[test]
fn test_reload_refetches_visible_pages() {
    let fx = Fixture::new(5);
    assert_eq!(fx.source.fetches(), vec![0]);

    fx.view.reload_data();
    assert_eq!(fx.source.fetches(), vec![0, 0]);
    // The first content was released when the second was attached.
    assert_eq!(fx.source.drops(), 1);
}

#[test]
fn test_reload_picks_up_new_page_count() {
    let fx = Fixture::new(5);
    fx.view.change_page(4, false);
    fx.event_loop.process_events();

    fx.source.set_count(2);
    fx.view.reload_data();

    assert_eq!(fx.view.indicator().number_of_pages(), 2);
    assert_eq!(fx.view.content_offset(), WIDTH);
    assert_eq!(fx.view.page_index(), 1);
    assert_eq!(fx.delegate.switches(), vec![4, 1]);
}

#[test]
fn test_emptied_view_returns_to_first_page() {
    let fx = Fixture::new(3);
    fx.view.change_page(2, false);
    fx.event_loop.process_events();

    fx.source.set_count(0);
    fx.view.reload_data();
    assert_eq!(fx.view.content_offset(), 0.0);
    assert_eq!(fx.view.page_index(), 0);
    assert!(fx.view.indicator().is_hidden());

    fx.source.set_count(3);
    fx.view.reload_data();
    assert_eq!(fx.view.page_index(), 0);
    assert_eq!(fx.view.indicator().current_page(), 0);
    assert_eq!(fx.content_index(0), Some(0));

    fx.view.change_page(1, false);
    fx.event_loop.process_events();
    assert_eq!(fx.view.page_index(), 1);
    assert_eq!(fx.delegate.switches(), vec![2, 0, 1]);
}

#[test]
fn test_repeated_request_keeps_animation_running() {
    let fx = Fixture::new(3);
    fx.view.change_page(2, true);
    fx.event_loop.advance(Duration::from_millis(100));
    assert!(fx.view.is_scrolling());

    fx.view.change_page(2, true);
    fx.event_loop.advance(Duration::from_millis(250));
    assert!(!fx.view.is_scrolling());
    assert_eq!(fx.view.page_index(), 2);
    assert_eq!(fx.view.content_offset(), 2.0 * WIDTH);
}

#[test]
fn test_reload_does_not_count_as_reuse() {
    let fx = Fixture::new(3);
    fx.view.reload_data();
    fx.view.reload_data();
    assert_eq!(fx.view.with_cell(0, Cell::reuse_count), Some(0));

    fx.view.set_content_offset(WIDTH);
    assert_eq!(fx.view.with_cell(1, Cell::reuse_count), Some(1));
}

#[test]
fn test_queued_cell_returns_to_its_page() {
    let fx = Fixture::new(3);
    fx.view.set_content_offset(WIDTH / 2.0);
    let first = fx.view.cell_id_for_page(0);
    let second = fx.view.cell_id_for_page(1);
    assert_ne!(first, second);

    // Both cells are queued; page 2 takes the most recently queued one.
    fx.view.set_content_offset(2.0 * WIDTH);
    assert_eq!(fx.view.cell_id_for_page(2), second);

    fx.view.set_content_offset(0.0);
    assert_eq!(fx.view.cell_id_for_page(0), first);
}

#[test]
fn test_reused_cell_drops_stale_content() {
    let fx = Fixture::new(5);
    let first_cell = fx.view.cell_id_for_page(0);
    assert!(first_cell.is_some());

    fx.view.set_content_offset(WIDTH);
    assert_eq!(fx.view.visible_pages(), vec![1]);
    assert_eq!(fx.view.cell_id_for_page(1), first_cell);
    assert_eq!(fx.content_index(1), Some(1));
    assert_eq!(fx.source.drops(), 1);

    let frame = fx
        .view
        .with_cell(1, |cell| {
            cell.content_as::<common::Numbered>()
                .and_then(|content| content.frame)
        })
        .flatten();
    assert_eq!(frame, Some(Rect::new(0.0, 0.0, WIDTH, HEIGHT)));
}

#[test]
fn test_end_dragging_snaps_to_nearest_page() {
    let fx = Fixture::new(5);

    fx.view.set_content_offset(1.25 * WIDTH);
    fx.view.end_dragging(0.0);
    fx.event_loop.advance(Duration::from_secs(1));
    assert_eq!(fx.view.content_offset(), WIDTH);
    assert_eq!(fx.view.page_index(), 1);

    fx.view.set_content_offset(1.75 * WIDTH);
    fx.view.end_dragging(0.0);
    fx.event_loop.advance(Duration::from_secs(1));
    assert_eq!(fx.view.page_index(), 2);
}

#[test]
fn test_end_dragging_follows_fling_direction() {
    let fx = Fixture::new(5);

    fx.view.set_content_offset(1.25 * WIDTH);
    fx.view.end_dragging(1.0);
    fx.event_loop.advance(Duration::from_secs(1));
    assert_eq!(fx.view.page_index(), 2);

    fx.view.set_content_offset(2.75 * WIDTH);
    fx.view.end_dragging(-1.0);
    fx.event_loop.advance(Duration::from_secs(1));
    assert_eq!(fx.view.page_index(), 2);
    assert_eq!(fx.view.content_offset(), 2.0 * WIDTH);

    // Flinging past the last page stays on it.
    fx.view.set_content_offset(4.0 * WIDTH);
    fx.view.end_dragging(5.0);
    fx.event_loop.advance(Duration::from_secs(1));
    assert_eq!(fx.view.page_index(), 4);
    assert_eq!(fx.view.content_offset(), 4.0 * WIDTH);
}

#[test]
fn test_drag_cancels_animation() {
    let fx = Fixture::new(3);
    fx.view.change_page(2, true);
    fx.event_loop.advance(Duration::from_millis(50));
    assert!(fx.view.is_scrolling());

    fx.view.set_content_offset(0.0);
    assert!(!fx.view.is_scrolling());
    assert_eq!(fx.event_loop.active_timer_count(), 0);

    fx.event_loop.advance(Duration::from_secs(1));
    assert_eq!(fx.view.content_offset(), 0.0);
    assert_eq!(fx.view.page_index(), 0);
}

#[test]
fn test_tap_selects_without_switching() {
    let fx = Fixture::new(3);

    assert_eq!(fx.view.handle_tap(Point::new(100.0, 50.0)), Some(0));
    assert_eq!(fx.view.page_index(), 0);

    fx.view.set_content_offset(WIDTH);
    fx.delegate.clear();
    assert_eq!(fx.view.handle_tap(Point::new(10.0, 10.0)), Some(1));
    assert_eq!(fx.delegate.events(), vec![Event::Selected(1)]);

    assert_eq!(fx.view.handle_tap(Point::new(10.0, HEIGHT + 1.0)), None);
    assert_eq!(fx.view.handle_tap(Point::new(WIDTH, 10.0)), None);
}

#[test]
fn test_signals_fire_with_delegate() {
    let fx = Fixture::new(3);
    let switched = Arc::new(Mutex::new(Vec::new()));
    let selected = Arc::new(Mutex::new(Vec::new()));

    let sink = switched.clone();
    fx.view.page_switched.connect(move |&index| sink.lock().push(index));
    let sink = selected.clone();
    fx.view.page_selected.connect(move |&index| sink.lock().push(index));

    fx.view.change_page(1, false);
    fx.event_loop.process_events();
    fx.view.handle_tap(Point::new(5.0, 5.0));

    assert_eq!(*switched.lock(), vec![1]);
    assert_eq!(*selected.lock(), vec![1]);
}

#[test]
fn test_set_page_index_notifies() {
    let fx = Fixture::new(3);

    fx.view.set_page_index(2);
    assert_eq!(fx.view.indicator().current_page(), 2);
    assert_eq!(fx.delegate.switches(), vec![2]);

    fx.view.set_page_index(2);
    assert_eq!(fx.delegate.switches(), vec![2]);
}

#[test]
fn test_without_data_source() {
    let event_loop = EventLoop::with_clock(Clock::manual());
    let view = PageView::new(&event_loop);
    view.layout(Size::new(WIDTH, HEIGHT));

    assert_eq!(view.page_count(), 0);
    assert!(view.indicator().is_hidden());

    view.change_page(0, false);
    view.change_page(1, true);
    event_loop.process_events();
    assert_eq!(view.page_index(), 0);
    assert_eq!(view.handle_tap(Point::new(1.0, 1.0)), None);
}

#[test]
fn test_dropped_delegate_is_tolerated() {
    let fx = Fixture::new(3);
    let Fixture {
        event_loop,
        view,
        source: _source,
        delegate,
    } = fx;
    drop(delegate);
    assert!(view.delegate().is_none());

    view.change_page(1, false);
    event_loop.process_events();
    assert_eq!(view.page_index(), 1);
    assert_eq!(view.handle_tap(Point::new(1.0, 1.0)), Some(1));
}

#[test]
fn test_indicator_layout() {
    let fx = Fixture::with_config(
        1,
        PageViewConfig::default().with_hides_for_single_page(false),
    );
    assert!(!fx.view.indicator().is_hidden());

    let frame = fx.view.indicator_frame();
    assert_eq!(frame.width(), WIDTH);
    assert_eq!(frame.bottom(), HEIGHT);

    let single = Fixture::new(1);
    assert!(single.view.indicator().is_hidden());
}

#[test]
fn test_zero_duration_animation_jumps() {
    let fx = Fixture::with_config(
        3,
        PageViewConfig::default().with_scroll_animation(Duration::ZERO),
    );
    fx.view.change_page(2, true);
    fx.event_loop.process_events();

    assert!(!fx.view.is_scrolling());
    assert_eq!(fx.delegate.switches(), vec![2]);
}
