//! Timer-driven automatic page advance.
//!
//! A widget that can auto-switch owns at most one repeating timer. Each tick
//! requests the next page, wrapping to the first page after the last one.
//! The wrap back to page 0 is requested without animation so the strip does
//! not visibly rewind through every page.
//!
//! Two states exist: idle (no timer) and running (timer armed). Starting
//! while running replaces the timer; stopping while idle does nothing. There
//! is no paused state; pause with stop + start.

use std::time::Duration;

use horizon_pager_core::TimerGuard;

/// Widgets whose pages can advance on a timer.
pub trait AutoSwitchable {
    /// Arm a repeating timer that advances one page per `interval`.
    ///
    /// Replaces any timer already armed. A zero interval is ignored.
    fn start_auto_switch(&self, interval: Duration);

    /// Cancel and release the timer. Safe to call when idle.
    fn stop_auto_switch(&self);

    /// Whether a timer is armed.
    fn is_auto_switching(&self) -> bool;
}

/// The page a tick should move to, and whether to animate the move.
///
/// ```
/// use horizon_pager::widget::next_auto_switch_page;
///
/// assert_eq!(next_auto_switch_page(0, 3), (1, true));
/// assert_eq!(next_auto_switch_page(2, 3), (0, false));
/// ```
pub fn next_auto_switch_page(page_index: usize, page_count: usize) -> (usize, bool) {
    let mut next = page_index.saturating_add(1);
    if next >= page_count {
        next = 0;
    }
    (next, next != 0)
}

/// Holder of the auto-switch timer handle.
#[derive(Debug, Default)]
pub(crate) struct AutoSwitch {
    timer: Option<TimerGuard>,
}

impl AutoSwitch {
    /// Install a new timer, returning the one it replaces.
    pub(crate) fn start(&mut self, timer: TimerGuard) -> Option<TimerGuard> {
        self.timer.replace(timer)
    }

    /// Remove the timer, if any.
    pub(crate) fn stop(&mut self) -> Option<TimerGuard> {
        self.timer.take()
    }

    pub(crate) fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub(crate) fn interval(&self) -> Option<Duration> {
        self.timer.as_ref().and_then(TimerGuard::interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_pager_core::{Clock, EventLoop};

    #[test]
    fn test_next_page_advances() {
        assert_eq!(next_auto_switch_page(0, 5), (1, true));
        assert_eq!(next_auto_switch_page(3, 5), (4, true));
    }

    #[test]
    fn test_next_page_wraps_without_animation() {
        assert_eq!(next_auto_switch_page(4, 5), (0, false));
        assert_eq!(next_auto_switch_page(0, 1), (0, false));
        assert_eq!(next_auto_switch_page(0, 0), (0, false));
        // A stale index past the end also wraps.
        assert_eq!(next_auto_switch_page(9, 5), (0, false));
    }

    #[test]
    fn test_start_replaces_and_stop_releases() {
        let event_loop = EventLoop::with_clock(Clock::manual());
        let mut auto_switch = AutoSwitch::default();
        assert!(!auto_switch.is_running());

        let first = event_loop
            .start_repeating_guarded(Duration::from_secs(1), || {})
            .unwrap();
        assert!(auto_switch.start(first).is_none());

        let second = event_loop
            .start_repeating_guarded(Duration::from_secs(2), || {})
            .unwrap();
        drop(auto_switch.start(second));
        assert_eq!(event_loop.active_timer_count(), 1);
        assert_eq!(auto_switch.interval(), Some(Duration::from_secs(2)));

        drop(auto_switch.stop());
        assert!(!auto_switch.is_running());
        assert_eq!(event_loop.active_timer_count(), 0);
        assert!(auto_switch.stop().is_none());
    }
}
