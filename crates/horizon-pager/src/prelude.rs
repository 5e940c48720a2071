//! Prelude module for Horizon Pager.
//!
//! ```
//! use horizon_pager::prelude::*;
//! ```

// ============================================================================
// Runtime
// ============================================================================

pub use crate::{Clock, EventLoop, TimerGuard};

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::property::Property;
pub use crate::signal::{ConnectionId, Signal};

// ============================================================================
// Geometry
// ============================================================================

pub use crate::geometry::{Point, Rect, Size};

// ============================================================================
// Pager
// ============================================================================

pub use crate::config::PageViewConfig;
pub use crate::model::{PageContent, PageDataSource, PageDelegate};
pub use crate::widget::animation::Easing;
pub use crate::widget::widgets::{PageIndicator, PageView};
pub use crate::widget::{AutoSwitchable, Cell};
