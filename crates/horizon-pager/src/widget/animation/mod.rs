//! Animation support for paging.
//!
//! Easing curves and the eased offset animation used for animated
//! scroll-to-page requests.
//!
//! ```
//! use horizon_pager::widget::animation::{Easing, ease};
//!
//! let eased = ease(Easing::EaseInOut, 0.5);
//! assert_eq!(eased, 0.5);
//! ```

mod easing;
mod scroll;

pub use easing::{Easing, ease, lerp_eased};
pub use scroll::ScrollAnimation;
