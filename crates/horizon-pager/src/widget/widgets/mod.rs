//! Widgets of the pager.
//!
//! - [`PageView`]: The paging container
//! - [`PageIndicator`]: Dot indicator state pinned to the bottom edge
//! - [`PagingViewport`]: The horizontally paged scroll surface

mod page_indicator;
mod page_view;
mod viewport;

pub use page_indicator::{INDICATOR_HEIGHT, PageIndicator};
pub use page_view::PageView;
pub use viewport::{PagingViewport, page_index_for_offset};
