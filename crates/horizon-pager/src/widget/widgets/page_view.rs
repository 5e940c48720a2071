//! PageView container implementation.
//!
//! This module provides [`PageView`], a horizontally paging strip of pages
//! whose content comes from a [`PageDataSource`], with a paired
//! [`PageIndicator`] and optional timer-driven auto-switching.
//!
//! # Index derivation
//!
//! The current page is never assigned by navigation calls. Navigation
//! requests a scroll; every observed scroll position derives
//! `floor(offset / width)`, and only a change of that value updates the
//! index, the indicator and the delegate. Programmatic navigation, drag
//! snapping and auto-switch ticks all go through the same scroll-to-item
//! primitive, so notifications always follow the scroll that caused them.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_pager::prelude::*;
//!
//! struct Slide(usize);
//! impl PageContent for Slide {}
//!
//! struct Slides;
//! impl PageDataSource for Slides {
//!     fn number_of_pages(&self, _: &PageView) -> usize {
//!         3
//!     }
//!     fn page_content(&self, _: &PageView, index: usize) -> Box<dyn PageContent> {
//!         Box::new(Slide(index))
//!     }
//! }
//!
//! let event_loop = EventLoop::with_clock(Clock::manual());
//! let page_view = PageView::new(&event_loop);
//! let slides = Arc::new(Slides);
//! page_view.set_data_source(&slides);
//! page_view.layout(Size::new(320.0, 480.0));
//!
//! page_view.page_switched.connect(|index| println!("now on page {index}"));
//!
//! page_view.change_page(2, false);
//! event_loop.process_events();
//! assert_eq!(page_view.page_index(), 2);
//!
//! page_view.start_auto_switch(Duration::from_secs(3));
//! event_loop.advance(Duration::from_secs(3));
//! assert_eq!(page_view.page_index(), 0);
//! ```

use std::sync::{Arc, Weak};
use std::time::Duration;

use horizon_pager_core::logging::targets;
use horizon_pager_core::{EventLoop, Point, Property, Rect, Signal, Size, TimerGuard};
use parking_lot::{Mutex, RwLock};

use super::page_indicator::PageIndicator;
use super::viewport::{PagingViewport, page_index_for_offset};
use crate::config::PageViewConfig;
use crate::model::{PageDataSource, PageDelegate};
use crate::widget::animation::ScrollAnimation;
use crate::widget::auto_switch::{AutoSwitch, AutoSwitchable, next_auto_switch_page};
use crate::widget::cell_pool::{Cell, CellId};

/// An animated scroll and the frame timer driving it.
struct ActiveScroll {
    animation: ScrollAnimation,
    _frames: TimerGuard,
}

/// A horizontally paging view container.
///
/// `PageView` is created once per host view and shared through an `Arc`;
/// timers and deferred scrolls hold it weakly. Every method takes `&self`.
/// No internal lock is held while the data source, the delegate or a signal
/// slot runs, so those may call back into the view.
///
/// Dropping the last `Arc` releases the auto-switch timer and any running
/// scroll animation.
///
/// # Signals
///
/// - `page_switched(usize)`: Emitted when the current page changes
/// - `page_selected(usize)`: Emitted when a page is tapped
pub struct PageView {
    this: Weak<PageView>,
    event_loop: Arc<EventLoop>,
    config: PageViewConfig,

    data_source: RwLock<Option<Weak<dyn PageDataSource>>>,
    delegate: RwLock<Option<Weak<dyn PageDelegate>>>,

    page_index: Property<usize>,
    viewport: Mutex<PagingViewport>,
    indicator: Mutex<PageIndicator>,

    scroll_animation: Mutex<Option<ActiveScroll>>,
    auto_switch: Mutex<AutoSwitch>,

    /// Signal emitted when the current page changes.
    pub page_switched: Signal<usize>,

    /// Signal emitted when a page is tapped.
    pub page_selected: Signal<usize>,
}

impl PageView {
    /// Create a page view with the default configuration.
    pub fn new(event_loop: &Arc<EventLoop>) -> Arc<Self> {
        Self::with_config(event_loop, PageViewConfig::default())
    }

    /// Create a page view with the given configuration.
    pub fn with_config(event_loop: &Arc<EventLoop>, config: PageViewConfig) -> Arc<Self> {
        let indicator =
            PageIndicator::new().with_hides_for_single_page(config.hides_for_single_page);

        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            event_loop: event_loop.clone(),
            config,
            data_source: RwLock::new(None),
            delegate: RwLock::new(None),
            page_index: Property::new(0),
            viewport: Mutex::new(PagingViewport::new()),
            indicator: Mutex::new(indicator),
            scroll_animation: Mutex::new(None),
            auto_switch: Mutex::new(AutoSwitch::default()),
            page_switched: Signal::new(),
            page_selected: Signal::new(),
        })
    }

    /// The event loop this view dispatches on.
    pub fn event_loop(&self) -> &Arc<EventLoop> {
        &self.event_loop
    }

    /// The configuration this view was created with.
    pub fn config(&self) -> &PageViewConfig {
        &self.config
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// Set the data source. Only a weak reference is kept.
    pub fn set_data_source<S: PageDataSource + 'static>(&self, source: &Arc<S>) {
        let source = Arc::downgrade(source) as Weak<dyn PageDataSource>;
        *self.data_source.write() = Some(source);
    }

    /// Forget the data source. The view then has zero pages.
    pub fn clear_data_source(&self) {
        *self.data_source.write() = None;
    }

    /// The data source, if set and still alive.
    pub fn data_source(&self) -> Option<Arc<dyn PageDataSource>> {
        self.data_source.read().as_ref().and_then(Weak::upgrade)
    }

    /// Set the delegate. Only a weak reference is kept.
    pub fn set_delegate<D: PageDelegate + 'static>(&self, delegate: &Arc<D>) {
        let delegate = Arc::downgrade(delegate) as Weak<dyn PageDelegate>;
        *self.delegate.write() = Some(delegate);
    }

    /// Forget the delegate. Notifications are then dropped.
    pub fn clear_delegate(&self) {
        *self.delegate.write() = None;
    }

    /// The delegate, if set and still alive.
    pub fn delegate(&self) -> Option<Arc<dyn PageDelegate>> {
        self.delegate.read().as_ref().and_then(Weak::upgrade)
    }

    /// Number of pages, asked fresh from the data source.
    ///
    /// Zero when there is no data source.
    pub fn page_count(&self) -> usize {
        self.data_source()
            .map_or(0, |source| source.number_of_pages(self))
    }

    // =========================================================================
    // Current Page
    // =========================================================================

    /// The page currently in view.
    pub fn page_index(&self) -> usize {
        self.page_index.get()
    }

    /// Set the current page index directly.
    ///
    /// Has the same effects as an observed page change (indicator update,
    /// delegate and signal notification) but does not scroll. Prefer
    /// [`change_page`](Self::change_page), which keeps the index derived from
    /// the scroll position.
    pub fn set_page_index(&self, index: usize) {
        self.update_page_index(index);
    }

    fn update_page_index(&self, index: usize) {
        if !self.page_index.set(index) {
            return;
        }

        self.indicator.lock().set_current_page(index);
        tracing::debug!(target: targets::PAGE_VIEW, index, "page switched");

        if let Some(delegate) = self.delegate() {
            delegate.did_switch_to_page(self, index);
        }
        self.page_switched.emit(index);
    }

    // =========================================================================
    // Layout and Reload
    // =========================================================================

    /// Run a layout pass at the given size.
    ///
    /// Pages are sized to the view. A size change keeps the current page in
    /// place. Every pass ends in [`reload_data`](Self::reload_data).
    #[tracing::instrument(skip(self), target = "horizon_pager::page_view", level = "debug")]
    pub fn layout(&self, size: Size) {
        let resized = {
            let mut viewport = self.viewport.lock();
            let resized = viewport.set_size(size);
            if resized {
                let aligned = self.page_index.get() as f32 * size.width;
                viewport.set_content_offset(aligned);
            }
            resized
        };
        if resized {
            self.cancel_scroll_animation();
        }
        self.reload_data();
    }

    /// Re-query the page count and refetch the content of every visible page.
    ///
    /// The indicator's page count is refreshed too. Calling this repeatedly
    /// with an unchanged data source leaves the view in the same state each
    /// time.
    pub fn reload_data(&self) {
        let count = self.page_count();
        self.indicator.lock().set_number_of_pages(count);
        let (clamped, rows) = {
            let mut viewport = self.viewport.lock();
            let clamped = viewport.set_item_count(count);
            (clamped, viewport.layout_cells(true))
        };

        tracing::trace!(target: targets::PAGE_VIEW, count, ?rows, "reloading pages");
        self.supply_content(&rows);

        if clamped {
            self.observe_scroll();
        }
    }

    /// Fetch and attach content for `rows`.
    fn supply_content(&self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }
        let Some(source) = self.data_source() else {
            return;
        };

        for &row in rows {
            let content = source.page_content(self, row);
            self.viewport.lock().attach(row, content);
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Request a scroll to the page at `index`.
    ///
    /// The scroll happens on the next pass of the event loop; the index, the
    /// indicator and the delegate follow once the new position is observed.
    ///
    /// Only indices with `index - 1 > page_count` are rejected here. Indices
    /// that pass this check but have no page (negative, or at or just past the
    /// end) are dropped when the scroll is performed.
    #[tracing::instrument(skip(self), target = "horizon_pager::page_view", level = "debug")]
    pub fn change_page(&self, index: isize, animated: bool) {
        let count = isize::try_from(self.page_count()).unwrap_or(isize::MAX);
        if index.saturating_sub(1) > count {
            tracing::debug!(target: targets::PAGE_VIEW, index, count, "page index out of range, ignoring");
            return;
        }

        let this = self.this.clone();
        self.event_loop.post_task(move || {
            if let Some(view) = this.upgrade() {
                view.scroll_to_item(index, animated);
            }
        });
    }

    /// The scroll-to-item primitive every navigation path ends in.
    fn scroll_to_item(&self, index: isize, animated: bool) {
        let (target, current) = {
            let viewport = self.viewport.lock();
            (viewport.offset_for_item(index), viewport.content_offset())
        };
        let Some(target) = target else {
            tracing::warn!(target: targets::PAGE_VIEW, index, "no page at index, scroll request dropped");
            return;
        };

        if animated && self.is_scrolling_to(target) {
            tracing::trace!(target: targets::PAGE_VIEW, index, "already scrolling to page");
            return;
        }
        self.cancel_scroll_animation();

        let duration = self.config.scroll_animation_duration();
        if !animated || duration.is_zero() || target == current {
            self.apply_offset(target);
            return;
        }

        let this = self.this.clone();
        let frames = self
            .event_loop
            .start_repeating_guarded(self.config.frame_interval(), move || {
                if let Some(view) = this.upgrade() {
                    view.step_scroll_animation();
                }
            });

        match frames {
            Ok(frames) => {
                tracing::trace!(target: targets::PAGE_VIEW, from = current, to = target, "scroll animation started");
                let animation = ScrollAnimation::new(
                    current,
                    target,
                    self.event_loop.now(),
                    duration,
                    self.config.easing,
                );
                *self.scroll_animation.lock() = Some(ActiveScroll {
                    animation,
                    _frames: frames,
                });
            }
            Err(err) => {
                tracing::warn!(target: targets::PAGE_VIEW, %err, "cannot animate scroll, jumping");
                self.apply_offset(target);
            }
        }
    }

    fn step_scroll_animation(&self) {
        let now = self.event_loop.now();
        let Some((offset, finished)) = self.scroll_animation.lock().as_ref().map(|active| {
            (
                active.animation.offset_at(now),
                active.animation.is_finished(now),
            )
        }) else {
            return;
        };

        if finished {
            let done = self.scroll_animation.lock().take();
            drop(done);
            tracing::trace!(target: targets::PAGE_VIEW, offset, "scroll animation finished");
        }
        self.apply_offset(offset);
    }

    fn cancel_scroll_animation(&self) {
        let active = self.scroll_animation.lock().take();
        if active.is_some() {
            tracing::trace!(target: targets::PAGE_VIEW, "scroll animation cancelled");
        }
    }

    fn is_scrolling_to(&self, offset: f32) -> bool {
        self.scroll_animation
            .lock()
            .as_ref()
            .is_some_and(|active| active.animation.target() == offset)
    }

    /// Whether an animated scroll is in flight.
    pub fn is_scrolling(&self) -> bool {
        self.scroll_animation.lock().is_some()
    }

    fn apply_offset(&self, offset: f32) {
        let changed = self.viewport.lock().set_content_offset(offset);
        if changed {
            self.observe_scroll();
        }
    }

    /// React to the current scroll position: refresh cells that came into
    /// view and derive the page index. The only path that moves the index.
    fn observe_scroll(&self) {
        let (offset, width, count, rows) = {
            let mut viewport = self.viewport.lock();
            let rows = viewport.layout_cells(false);
            (
                viewport.content_offset(),
                viewport.page_width(),
                viewport.item_count(),
                rows,
            )
        };
        self.supply_content(&rows);

        let Some(index) = page_index_for_offset(offset, width) else {
            return;
        };
        self.update_page_index(index.min(count.saturating_sub(1)));
    }

    // =========================================================================
    // Host Input
    // =========================================================================

    /// The host scrolled the content (a drag) to `offset`.
    ///
    /// Cancels any animated scroll.
    pub fn set_content_offset(&self, offset: f32) {
        self.cancel_scroll_animation();
        self.apply_offset(offset);
    }

    /// The host released a drag with horizontal `velocity` in points per
    /// millisecond; positive means the content was moving towards later
    /// pages.
    ///
    /// Snaps to the nearest page, or to the adjacent page in the direction
    /// of travel when the velocity exceeds the configured threshold.
    pub fn end_dragging(&self, velocity: f32) {
        let (offset, width, count) = {
            let viewport = self.viewport.lock();
            (
                viewport.content_offset(),
                viewport.page_width(),
                viewport.item_count(),
            )
        };
        if count == 0 || !(width > 0.0) {
            return;
        }

        let position = offset / width;
        let threshold = self.config.snap_velocity_threshold;
        let target = if velocity > threshold {
            position.floor() + 1.0
        } else if velocity < -threshold {
            position.ceil() - 1.0
        } else {
            position.round()
        };
        let target = target.clamp(0.0, (count - 1) as f32) as isize;

        tracing::trace!(target: targets::PAGE_VIEW, velocity, page = target, "snapping to page");
        self.scroll_to_item(target, true);
    }

    /// The host saw a tap at `point` (view coordinates).
    ///
    /// Notifies selection of the page under the point and returns it. The
    /// current page is not affected.
    pub fn handle_tap(&self, point: Point) -> Option<usize> {
        let row = {
            let viewport = self.viewport.lock();
            if point.y < 0.0 || point.y >= viewport.size().height {
                return None;
            }
            viewport.item_at(point.x)?
        };

        tracing::debug!(target: targets::PAGE_VIEW, row, "page selected");
        if let Some(delegate) = self.delegate() {
            delegate.did_select_page(self, row);
        }
        self.page_selected.emit(row);
        Some(row)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Current horizontal content offset.
    pub fn content_offset(&self) -> f32 {
        self.viewport.lock().content_offset()
    }

    /// Size of the view as of the last layout pass.
    pub fn size(&self) -> Size {
        self.viewport.lock().size()
    }

    /// Pages that currently have a cell, ascending.
    pub fn visible_pages(&self) -> Vec<usize> {
        self.viewport.lock().visible_rows()
    }

    /// Id of the cell showing `page`, if it is visible.
    pub fn cell_id_for_page(&self, page: usize) -> Option<CellId> {
        self.viewport.lock().cells().cell_id_for_row(page)
    }

    /// Run `f` on the cell showing `page`, if it is visible.
    ///
    /// The view is locked while `f` runs; `f` must not call back into it.
    pub fn with_cell<R>(&self, page: usize, f: impl FnOnce(&Cell) -> R) -> Option<R> {
        self.viewport.lock().cell_for_row(page).map(f)
    }

    /// A snapshot of the indicator state.
    pub fn indicator(&self) -> PageIndicator {
        self.indicator.lock().clone()
    }

    /// Where the indicator sits inside the view.
    pub fn indicator_frame(&self) -> Rect {
        let size = self.size();
        self.indicator.lock().frame_in(size)
    }

    /// Interval of the running auto-switch timer.
    pub fn auto_switch_interval(&self) -> Option<Duration> {
        self.auto_switch.lock().interval()
    }

    fn auto_switch_tick(&self) {
        let (next, animated) = next_auto_switch_page(self.page_index(), self.page_count());
        tracing::trace!(target: targets::AUTO_SWITCH, next, animated, "auto-switch tick");
        self.change_page(next as isize, animated);
    }
}

impl AutoSwitchable for PageView {
    fn start_auto_switch(&self, interval: Duration) {
        let this = self.this.clone();
        let timer = self.event_loop.start_repeating_guarded(interval, move || {
            if let Some(view) = this.upgrade() {
                view.auto_switch_tick();
            }
        });

        match timer {
            Ok(timer) => {
                let replaced = self.auto_switch.lock().start(timer);
                tracing::debug!(
                    target: targets::AUTO_SWITCH,
                    ?interval,
                    restarted = replaced.is_some(),
                    "auto-switch started"
                );
            }
            Err(err) => {
                tracing::warn!(target: targets::AUTO_SWITCH, %err, ?interval, "auto-switch not started");
            }
        }
    }

    fn stop_auto_switch(&self) {
        let stopped = self.auto_switch.lock().stop();
        if stopped.is_some() {
            tracing::debug!(target: targets::AUTO_SWITCH, "auto-switch stopped");
        }
    }

    fn is_auto_switching(&self) -> bool {
        self.auto_switch.lock().is_running()
    }
}

impl std::fmt::Debug for PageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageView")
            .field("page_index", &self.page_index.get())
            .field("viewport", &*self.viewport.lock())
            .field("indicator", &*self.indicator.lock())
            .field("auto_switching", &self.is_auto_switching())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(PageView: Send, Sync);
