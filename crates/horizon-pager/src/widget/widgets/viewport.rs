//! The paging scroll surface.
//!
//! [`PagingViewport`] lays pages out side by side along the horizontal axis,
//! each exactly one viewport wide with no spacing, and tracks which cells are
//! visible for the current content offset. It knows nothing about data
//! sources; [`PageView`](super::PageView) feeds it counts and content.

use std::ops::Range;

use horizon_pager_core::logging::targets;
use horizon_pager_core::{Rect, Size};

use crate::model::PageContent;
use crate::widget::cell_pool::{Cell, CellPool};

/// Offsets this close to a page boundary count as on it, absorbing the
/// rounding of `index * width` for non-integral widths.
const BOUNDARY_EPSILON: f32 = 1e-4;

/// Derive the page index shown at a content offset.
///
/// `floor(offset / width)`, with negative (overscrolled) offsets reading as
/// page 0. Returns `None` when the width is not positive.
///
/// ```
/// use horizon_pager::widget::widgets::page_index_for_offset;
///
/// assert_eq!(page_index_for_offset(0.0, 320.0), Some(0));
/// assert_eq!(page_index_for_offset(639.0, 320.0), Some(1));
/// assert_eq!(page_index_for_offset(640.0, 320.0), Some(2));
/// assert_eq!(page_index_for_offset(100.0, 0.0), None);
/// ```
pub fn page_index_for_offset(offset: f32, width: f32) -> Option<usize> {
    if !(width > 0.0) || !offset.is_finite() {
        return None;
    }

    let pages = offset / width;
    let nearest = pages.round();
    let index = if (pages - nearest).abs() <= BOUNDARY_EPSILON {
        nearest
    } else {
        pages.floor()
    };

    Some(if index <= 0.0 { 0 } else { index as usize })
}

/// A horizontally paged scroll surface with a reusable cell pool.
#[derive(Debug, Default)]
pub struct PagingViewport {
    size: Size,
    content_offset: f32,
    item_count: usize,
    cells: CellPool,
}

impl PagingViewport {
    /// Create an empty viewport of zero size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the visible area; also the size of every page.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the viewport. Returns `true` if the size changed.
    pub fn set_size(&mut self, size: Size) -> bool {
        if self.size == size {
            return false;
        }
        self.size = size;
        true
    }

    /// Width of one page.
    pub fn page_width(&self) -> f32 {
        self.size.width
    }

    /// Number of pages the viewport lays out.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Horizontal content offset.
    pub fn content_offset(&self) -> f32 {
        self.content_offset
    }

    /// Move the content. Returns `true` if the offset changed.
    ///
    /// Offsets outside the content are accepted as-is (overscroll).
    pub fn set_content_offset(&mut self, offset: f32) -> bool {
        if self.content_offset == offset {
            return false;
        }
        self.content_offset = offset;
        true
    }

    /// Total width of the laid-out pages.
    pub fn content_width(&self) -> f32 {
        self.item_count as f32 * self.size.width
    }

    /// Largest offset that still shows a full page.
    pub fn max_content_offset(&self) -> f32 {
        (self.content_width() - self.size.width).max(0.0)
    }

    /// The offset that puts item `index` in view.
    ///
    /// Items outside `0..item_count` have no position and yield `None`.
    pub fn offset_for_item(&self, index: isize) -> Option<f32> {
        let row = usize::try_from(index).ok()?;
        (row < self.item_count).then(|| row as f32 * self.size.width)
    }

    /// Frame of page `row` in content coordinates.
    pub fn item_frame(&self, row: usize) -> Rect {
        Rect::new(
            row as f32 * self.size.width,
            0.0,
            self.size.width,
            self.size.height,
        )
    }

    /// Rows intersecting the visible area at the current offset.
    pub fn visible_range(&self) -> Range<usize> {
        let width = self.size.width;
        if !(width > 0.0) || self.item_count == 0 {
            return 0..0;
        }

        let left = self.content_offset.max(0.0);
        let right = (self.content_offset + width).max(0.0);
        let first = page_index_for_offset(left, width).unwrap_or(0);
        let end = (right / width).ceil() as usize;

        first.min(self.item_count)..end.min(self.item_count)
    }

    /// The page under a point given in viewport coordinates.
    pub fn item_at(&self, x: f32) -> Option<usize> {
        if x < 0.0 || x >= self.size.width {
            return None;
        }
        let content_x = self.content_offset + x;
        if content_x < 0.0 {
            return None;
        }
        let row = page_index_for_offset(content_x, self.size.width)?;
        (row < self.item_count).then_some(row)
    }

    /// Change the number of pages.
    ///
    /// When the content shrinks below the current offset the offset is pulled
    /// back to the last page; returns `true` in that case.
    pub fn set_item_count(&mut self, count: usize) -> bool {
        self.item_count = count;
        let max = self.max_content_offset();
        if self.content_offset > max {
            tracing::debug!(
                target: targets::VIEWPORT,
                from = self.content_offset,
                to = max,
                "content shrank, clamping offset"
            );
            self.content_offset = max;
            return true;
        }
        false
    }

    /// Bring the cell pool in line with the visible range.
    ///
    /// Cells of rows that left the view are queued for reuse and rows that
    /// entered it get a cell. Returns the rows that need fresh content: every
    /// visible row when `refetch_all` is set, otherwise only rows that just
    /// became visible.
    pub fn layout_cells(&mut self, refetch_all: bool) -> Vec<usize> {
        let range = self.visible_range();
        self.cells.recycle_outside(range.clone());

        let mut needs_content = Vec::new();
        for row in range {
            let was_visible = self.cells.cell_id_for_row(row).is_some();
            if !was_visible || refetch_all {
                let frame = self.item_frame(row);
                self.cells.dequeue(row, frame);
                needs_content.push(row);
            }
        }
        needs_content
    }

    /// Attach content to a visible row's cell.
    pub fn attach(&mut self, row: usize, content: Box<dyn PageContent>) -> bool {
        self.cells.attach(row, content)
    }

    /// The cell displaying `row`, if visible.
    pub fn cell_for_row(&self, row: usize) -> Option<&Cell> {
        self.cells.cell_for_row(row)
    }

    /// Rows that currently hold a cell.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.cells.visible_rows()
    }

    /// The underlying cell pool.
    pub fn cells(&self) -> &CellPool {
        &self.cells
    }
}
