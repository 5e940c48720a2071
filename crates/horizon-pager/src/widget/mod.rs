//! Widget layer of Horizon Pager.
//!
//! The [`widgets`] module holds the page view and its parts. Cell reuse and
//! auto-switch state live beside it and are re-exported here.

pub mod animation;
mod auto_switch;
mod cell_pool;
pub mod widgets;

pub use auto_switch::{AutoSwitchable, next_auto_switch_page};
pub use cell_pool::{Cell, CellId, CellPool};
