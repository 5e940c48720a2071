use crate::widget::widgets::PageView;

/// Receives selection and page-change notifications from a page view.
///
/// Every method has an empty default body, so implementors only override
/// what they care about.
pub trait PageDelegate: Send + Sync {
    /// The user tapped the page at `index`.
    ///
    /// Independent of page switching: tapping never changes the current page.
    fn did_select_page(&self, page_view: &PageView, index: usize) {
        let _ = (page_view, index);
    }

    /// The current page changed to `index`.
    ///
    /// Fired only on an actual change, after the scroll position that caused
    /// it has been observed.
    fn did_switch_to_page(&self, page_view: &PageView, index: usize) {
        let _ = (page_view, index);
    }
}
