//! Shared fixtures: a resizable data source and a recording delegate.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_pager::prelude::*;
use parking_lot::Mutex;

pub const WIDTH: f32 = 320.0;
pub const HEIGHT: f32 = 480.0;

/// Page content that remembers which page it was made for.
pub struct Numbered {
    pub index: usize,
    pub frame: Option<Rect>,
    drops: Arc<AtomicUsize>,
}

impl PageContent for Numbered {
    fn set_frame(&mut self, frame: Rect) {
        self.frame = Some(frame);
    }
}

impl Drop for Numbered {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct Source {
    count: Mutex<usize>,
    fetches: Mutex<Vec<usize>>,
    drops: Arc<AtomicUsize>,
}

impl Source {
    pub fn new(count: usize) -> Arc<Self> {
        Arc::new(Self {
            count: Mutex::new(count),
            ..Self::default()
        })
    }

    pub fn set_count(&self, count: usize) {
        *self.count.lock() = count;
    }

    pub fn fetches(&self) -> Vec<usize> {
        self.fetches.lock().clone()
    }

    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

impl PageDataSource for Source {
    fn number_of_pages(&self, _: &PageView) -> usize {
        *self.count.lock()
    }

    fn page_content(&self, _: &PageView, index: usize) -> Box<dyn PageContent> {
        self.fetches.lock().push(index);
        Box::new(Numbered {
            index,
            frame: None,
            drops: self.drops.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Selected(usize),
    Switched(usize),
}

#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn switches(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Switched(index) => Some(index),
                Event::Selected(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl PageDelegate for Recorder {
    fn did_select_page(&self, _: &PageView, index: usize) {
        self.events.lock().push(Event::Selected(index));
    }

    fn did_switch_to_page(&self, page_view: &PageView, index: usize) {
        // The index is already updated when the delegate hears about it.
        assert_eq!(page_view.page_index(), index);
        self.events.lock().push(Event::Switched(index));
    }
}

pub struct Fixture {
    pub event_loop: Arc<EventLoop>,
    pub view: Arc<PageView>,
    pub source: Arc<Source>,
    pub delegate: Arc<Recorder>,
}

impl Fixture {
    pub fn new(pages: usize) -> Self {
        Self::with_config(pages, PageViewConfig::default())
    }

    pub fn with_config(pages: usize, config: PageViewConfig) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("horizon_pager=trace")
            .with_test_writer()
            .try_init();

        let event_loop = EventLoop::with_clock(Clock::manual());
        let view = PageView::with_config(&event_loop, config);
        let source = Source::new(pages);
        let delegate = Arc::new(Recorder::default());
        view.set_data_source(&source);
        view.set_delegate(&delegate);
        view.layout(Size::new(WIDTH, HEIGHT));

        Self {
            event_loop,
            view,
            source,
            delegate,
        }
    }

    /// Index of the content attached to the cell showing `page`.
    pub fn content_index(&self, page: usize) -> Option<usize> {
        self.view
            .with_cell(page, |cell| cell.content_as::<Numbered>().map(|c| c.index))
            .flatten()
    }
}
