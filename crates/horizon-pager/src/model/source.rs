use std::any::Any;

use horizon_pager_core::Rect;

use crate::widget::widgets::PageView;

/// Content displayed inside one page cell.
///
/// Content is owned by the cell it is attached to and dropped when the cell
/// is reused for another page. Hosts recover their concrete type through
/// [`Cell::content_as`](crate::widget::Cell::content_as).
pub trait PageContent: Any + Send + Sync {
    /// Called when the content is attached, with the bounds of its cell.
    fn set_frame(&mut self, frame: Rect) {
        let _ = frame;
    }
}

/// Supplies the number of pages and the content of each page.
///
/// # Example
///
/// ```
/// use horizon_pager::model::{PageContent, PageDataSource};
/// use horizon_pager::widget::widgets::PageView;
///
/// struct Banner(&'static str);
/// impl PageContent for Banner {}
///
/// struct Banners(Vec<&'static str>);
///
/// impl PageDataSource for Banners {
///     fn number_of_pages(&self, _page_view: &PageView) -> usize {
///         self.0.len()
///     }
///
///     fn page_content(&self, _page_view: &PageView, index: usize) -> Box<dyn PageContent> {
///         Box::new(Banner(self.0[index]))
///     }
/// }
/// ```
pub trait PageDataSource: Send + Sync {
    /// Number of pages. Called on every layout pass and reload, so it
    /// should be cheap.
    fn number_of_pages(&self, page_view: &PageView) -> usize;

    /// Fresh content for the page at `index`.
    ///
    /// Called once per visible cell per refresh; `index` is always below the
    /// last count returned by [`number_of_pages`](Self::number_of_pages).
    fn page_content(&self, page_view: &PageView, index: usize) -> Box<dyn PageContent>;
}
