//! Horizon Pager - a horizontally paging view container.
//!
//! A [`PageView`](widget::widgets::PageView) shows one full-width page at a
//! time from a data source, keeps a dot indicator in sync with the page in
//! view, reports page switches and taps to a delegate, and can advance
//! through its pages on a timer.
//!
//! The widget is headless: the host feeds it a size, drags and taps, and
//! drives its [`EventLoop`]. Everything the core crate provides is
//! re-exported from here.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_pager::prelude::*;
//!
//! struct Label(String);
//! impl PageContent for Label {}
//!
//! struct Titles(Vec<&'static str>);
//! impl PageDataSource for Titles {
//!     fn number_of_pages(&self, _: &PageView) -> usize {
//!         self.0.len()
//!     }
//!     fn page_content(&self, _: &PageView, index: usize) -> Box<dyn PageContent> {
//!         Box::new(Label(self.0[index].to_owned()))
//!     }
//! }
//!
//! let event_loop = EventLoop::new();
//! let page_view = PageView::new(&event_loop);
//! let titles = Arc::new(Titles(vec!["one", "two"]));
//! page_view.set_data_source(&titles);
//! page_view.layout(Size::new(375.0, 200.0));
//!
//! assert_eq!(page_view.indicator().number_of_pages(), 2);
//! let shown = page_view.with_cell(0, |cell| cell.content_as::<Label>().map(|l| l.0.clone()));
//! assert_eq!(shown.flatten().as_deref(), Some("one"));
//! ```

pub use horizon_pager_core::*;

pub mod config;
pub mod error;
pub mod model;
pub mod prelude;
pub mod widget;

pub use config::PageViewConfig;
pub use error::ConfigError;
