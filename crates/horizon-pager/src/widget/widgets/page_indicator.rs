//! Page indicator state.
//!
//! [`PageIndicator`] mirrors what the host's dot indicator shows: how many
//! pages there are and which one is highlighted. The page view keeps it in
//! sync; the host reads it back to draw.

use horizon_pager_core::{Rect, Size};

/// Height reserved for the indicator strip at the bottom of the page view.
pub const INDICATOR_HEIGHT: f32 = 26.0;

/// Dot count and highlighted page of a page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIndicator {
    number_of_pages: usize,
    current_page: usize,
    hides_for_single_page: bool,
}

impl Default for PageIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl PageIndicator {
    /// Create an indicator with no pages that hides for a single page.
    pub fn new() -> Self {
        Self {
            number_of_pages: 0,
            current_page: 0,
            hides_for_single_page: true,
        }
    }

    /// Number of dots.
    pub fn number_of_pages(&self) -> usize {
        self.number_of_pages
    }

    /// Set the number of dots. Returns `true` if it changed.
    pub fn set_number_of_pages(&mut self, count: usize) -> bool {
        if self.number_of_pages == count {
            return false;
        }
        self.number_of_pages = count;
        true
    }

    /// The highlighted page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Highlight a page. Returns `true` if it changed.
    pub fn set_current_page(&mut self, page: usize) -> bool {
        if self.current_page == page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Whether a lone page hides the indicator.
    pub fn hides_for_single_page(&self) -> bool {
        self.hides_for_single_page
    }

    /// Set whether a lone page hides the indicator.
    pub fn set_hides_for_single_page(&mut self, hides: bool) {
        self.hides_for_single_page = hides;
    }

    /// Builder-style [`set_hides_for_single_page`](Self::set_hides_for_single_page).
    pub fn with_hides_for_single_page(mut self, hides: bool) -> Self {
        self.hides_for_single_page = hides;
        self
    }

    /// Whether the indicator should be drawn at all.
    pub fn is_hidden(&self) -> bool {
        self.number_of_pages == 0 || (self.hides_for_single_page && self.number_of_pages == 1)
    }

    /// Frame of the indicator inside a page view of `bounds` size: the full
    /// width, pinned to the bottom edge.
    pub fn frame_in(&self, bounds: Size) -> Rect {
        let height = INDICATOR_HEIGHT.min(bounds.height.max(0.0));
        Rect::new(0.0, bounds.height - height, bounds.width, height)
    }
}
