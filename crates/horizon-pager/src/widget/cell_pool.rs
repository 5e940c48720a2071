//! Reusable page cells.
//!
//! The viewport keeps one [`Cell`] per visible page. Cells that scroll out of
//! view go to a reuse queue and are handed out again for pages that scroll
//! in. A reused cell keeps its old content until it is reused; attaching new
//! content always drops the previous content first, so a cell never holds
//! more than one page's content.

use std::any::Any;
use std::collections::BTreeMap;
use std::ops::Range;

use horizon_pager_core::Rect;
use horizon_pager_core::logging::targets;
use slotmap::{SlotMap, new_key_type};

use crate::model::PageContent;

new_key_type! {
    /// Identifies a cell for its whole lifetime, across reuse.
    pub struct CellId;
}

/// A recyclable display slot for one page.
pub struct Cell {
    row: Option<usize>,
    /// Row shown before the cell was queued for reuse.
    last_row: Option<usize>,
    frame: Rect,
    content: Option<Box<dyn PageContent>>,
    reuse_count: usize,
}

impl Cell {
    fn new() -> Self {
        Self {
            row: None,
            last_row: None,
            frame: Rect::default(),
            content: None,
            reuse_count: 0,
        }
    }

    /// The page this cell currently displays, if it is visible.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Frame of the cell in content coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The attached content, if any.
    pub fn content(&self) -> Option<&dyn PageContent> {
        self.content.as_deref()
    }

    /// The attached content downcast to its concrete type.
    pub fn content_as<T: PageContent>(&self) -> Option<&T> {
        let content: &dyn Any = self.content.as_deref()?;
        content.downcast_ref::<T>()
    }

    /// How many times this cell was taken from the reuse queue.
    pub fn reuse_count(&self) -> usize {
        self.reuse_count
    }

    /// Remove and return the attached content.
    fn clear_content(&mut self) -> Option<Box<dyn PageContent>> {
        self.content.take()
    }

    fn attach(&mut self, mut content: Box<dyn PageContent>) {
        // Stale content must be gone before the new page is attached.
        drop(self.clear_content());
        content.set_frame(Rect::from_size(self.frame.size));
        self.content = Some(content);
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("row", &self.row)
            .field("last_row", &self.last_row)
            .field("frame", &self.frame)
            .field("has_content", &self.content.is_some())
            .field("reuse_count", &self.reuse_count)
            .finish()
    }
}

/// Index-addressed pool of reusable cells.
#[derive(Debug, Default)]
pub struct CellPool {
    cells: SlotMap<CellId, Cell>,
    visible: BTreeMap<usize, CellId>,
    reuse_queue: Vec<CellId>,
}

impl CellPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a cell for `row` with the given frame.
    ///
    /// A cell already showing `row` is handed back out. Otherwise a queued
    /// cell is reused, preferring one that last showed `row`, and only when
    /// the queue is empty is a new cell made.
    pub fn dequeue(&mut self, row: usize, frame: Rect) -> CellId {
        let (id, reused) = match self.visible.get(&row) {
            Some(&id) => (id, false),
            None => match self.take_queued(row) {
                Some(id) => (id, true),
                None => {
                    let id = self.cells.insert(Cell::new());
                    tracing::trace!(target: targets::VIEWPORT, ?id, row, "allocated cell");
                    (id, false)
                }
            },
        };

        self.visible.insert(row, id);
        if let Some(cell) = self.cells.get_mut(id) {
            cell.row = Some(row);
            cell.last_row = Some(row);
            cell.frame = frame;
            if reused {
                cell.reuse_count += 1;
            }
        }
        id
    }

    fn take_queued(&mut self, row: usize) -> Option<CellId> {
        let same_row = self.reuse_queue.iter().position(|&id| {
            self.cells
                .get(id)
                .is_some_and(|cell| cell.last_row == Some(row))
        });
        match same_row {
            Some(pos) => Some(self.reuse_queue.remove(pos)),
            None => self.reuse_queue.pop(),
        }
    }

    /// Attach fresh content to the cell showing `row`, dropping what it held.
    ///
    /// Returns `false` if no visible cell shows `row`.
    pub fn attach(&mut self, row: usize, content: Box<dyn PageContent>) -> bool {
        let Some(cell) = self
            .visible
            .get(&row)
            .and_then(|&id| self.cells.get_mut(id))
        else {
            return false;
        };
        cell.attach(content);
        true
    }

    /// Move every visible cell whose row is outside `rows` to the reuse queue.
    pub fn recycle_outside(&mut self, rows: Range<usize>) {
        let stale: Vec<usize> = self
            .visible
            .keys()
            .copied()
            .filter(|row| !rows.contains(row))
            .collect();
        for row in stale {
            self.recycle(row);
        }
    }

    fn recycle(&mut self, row: usize) {
        if let Some(id) = self.visible.remove(&row) {
            if let Some(cell) = self.cells.get_mut(id) {
                cell.row = None;
            }
            self.reuse_queue.push(id);
            tracing::trace!(target: targets::VIEWPORT, ?id, row, "cell queued for reuse");
        }
    }

    /// The cell showing `row`, if it is visible.
    pub fn cell_for_row(&self, row: usize) -> Option<&Cell> {
        self.visible.get(&row).and_then(|&id| self.cells.get(id))
    }

    /// Look up a cell by id.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// The id of the cell showing `row`.
    pub fn cell_id_for_row(&self, row: usize) -> Option<CellId> {
        self.visible.get(&row).copied()
    }

    /// Rows that currently have a cell, ascending.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.visible.keys().copied().collect()
    }

    /// Number of cells waiting in the reuse queue.
    pub fn reusable_count(&self) -> usize {
        self.reuse_queue.len()
    }

    /// Total number of cells ever allocated and still owned by the pool.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the pool owns no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
