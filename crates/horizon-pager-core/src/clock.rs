//! Clock abstraction for the event loop.
//!
//! The event loop never reads `Instant::now()` directly; it asks its [`Clock`].
//! A [`Clock::Manual`] clock only moves when it is advanced, which makes timer
//! behavior deterministic in tests and in hosts that drive time themselves.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Source of the current time for an [`EventLoop`](crate::EventLoop).
#[derive(Debug, Clone, Default)]
pub enum Clock {
    /// Wall-clock time via [`Instant::now`].
    #[default]
    System,
    /// A shared clock that only moves when advanced.
    Manual(Arc<Mutex<Instant>>),
}

impl Clock {
    /// Create a system clock.
    pub fn system() -> Self {
        Self::System
    }

    /// Create a manual clock starting at the current instant.
    pub fn manual() -> Self {
        Self::Manual(Arc::new(Mutex::new(Instant::now())))
    }

    /// Get the current time.
    pub fn now(&self) -> Instant {
        match self {
            Self::System => Instant::now(),
            Self::Manual(now) => *now.lock(),
        }
    }

    /// Whether this clock is driven manually.
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual(_))
    }

    /// Move a manual clock forward.
    ///
    /// Returns `false` (and does nothing) for the system clock.
    pub fn advance(&self, by: Duration) -> bool {
        match self {
            Self::System => false,
            Self::Manual(now) => {
                *now.lock() += by;
                true
            }
        }
    }

    /// Move a manual clock to `instant`, never backwards.
    pub(crate) fn advance_to(&self, instant: Instant) {
        if let Self::Manual(now) = self {
            let mut now = now.lock();
            if instant > *now {
                *now = instant;
            }
        }
    }
}
