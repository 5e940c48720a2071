//! Core systems for Horizon Pager.
//!
//! This crate provides the runtime the pager widget is built on:
//!
//! - **Event Loop**: A headless, single-threaded loop of deferred tasks and timers
//! - **Clock**: System or manually advanced time for that loop
//! - **Timers**: One-shot and repeating timers, with an RAII guard
//! - **Signal/Slot System**: Type-safe change notification
//! - **Property System**: Values with change detection
//! - **Geometry**: Points, sizes and rectangles
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_pager_core::{Clock, EventLoop, Signal};
//!
//! let event_loop = EventLoop::with_clock(Clock::manual());
//! let fired = Signal::<()>::new();
//! fired.connect(|_| println!("tick"));
//!
//! let _guard = event_loop
//!     .start_repeating_guarded(Duration::from_secs(1), move || fired.emit(()))
//!     .unwrap();
//!
//! event_loop.advance(Duration::from_secs(3));
//! ```

mod clock;
mod error;
mod event_loop;
pub mod geometry;
pub mod logging;
pub mod property;
pub mod signal;
mod task;
mod timer;

pub use clock::Clock;
pub use error::{PagerError, Result, TimerError};
pub use event_loop::{EventLoop, TimerGuard};
pub use geometry::{Point, Rect, Size};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use task::TaskId;
pub use timer::{TimerId, TimerManager};

static_assertions::assert_impl_all!(EventLoop: Send, Sync);
static_assertions::assert_impl_all!(Signal<usize>: Send, Sync);
static_assertions::assert_impl_all!(Property<usize>: Send, Sync);
