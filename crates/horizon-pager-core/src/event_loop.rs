//! The single-threaded event loop.
//!
//! Every state change of a pager happens inside a callback dispatched from
//! here: deferred tasks, timer fires, and whatever those callbacks post in
//! turn. Nothing runs concurrently with anything else; events are strictly
//! serialized in the order the loop dispatches them.
//!
//! The loop is headless. A host either calls [`EventLoop::process_events`]
//! from its own run loop, or drives it with [`EventLoop::run_for`]. With a
//! [`Clock::Manual`] clock, [`EventLoop::advance`] steps virtual time through
//! every intermediate timer deadline.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::time::Duration;
//! use horizon_pager_core::{Clock, EventLoop};
//!
//! let event_loop = EventLoop::with_clock(Clock::manual());
//! let ticks = Arc::new(AtomicUsize::new(0));
//!
//! let counter = ticks.clone();
//! event_loop
//!     .start_repeating_timer(Duration::from_millis(100), move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     })
//!     .unwrap();
//!
//! event_loop.advance(Duration::from_millis(350));
//! assert_eq!(ticks.load(Ordering::SeqCst), 3);
//! ```

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::SecondaryMap;

use crate::clock::Clock;
use crate::error::Result;
use crate::logging::targets;
use crate::task::{TaskId, TaskQueue};
use crate::timer::{TimerId, TimerManager};

type TimerCallback = Arc<dyn Fn() + Send + Sync>;

struct TimerSlot {
    callback: TimerCallback,
    repeating: bool,
}

/// A headless, single-threaded event loop with timers and deferred tasks.
pub struct EventLoop {
    clock: Clock,
    timers: Mutex<TimerManager>,
    callbacks: Mutex<SecondaryMap<TimerId, TimerSlot>>,
    tasks: Mutex<TaskQueue>,
}

impl EventLoop {
    /// Create an event loop on the system clock.
    pub fn new() -> Arc<Self> {
        Self::with_clock(Clock::System)
    }

    /// Create an event loop on the given clock.
    pub fn with_clock(clock: Clock) -> Arc<Self> {
        Arc::new(Self {
            clock,
            timers: Mutex::new(TimerManager::new()),
            callbacks: Mutex::new(SecondaryMap::new()),
            tasks: Mutex::new(TaskQueue::new()),
        })
    }

    /// The clock this loop reads time from.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Current time according to the loop's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Post a task to run on the next pass of the loop.
    pub fn post_task<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.tasks.lock().post(task);
        tracing::trace!(target: targets::EVENT_LOOP, ?id, "task posted");
        id
    }

    /// Cancel a task that has not run yet.
    pub fn cancel_task(&self, id: TaskId) -> bool {
        self.tasks.lock().cancel(id)
    }

    /// Number of tasks waiting to run.
    pub fn pending_task_count(&self) -> usize {
        self.tasks.lock().len()
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Start a one-shot timer.
    pub fn start_timer<F>(&self, duration: Duration, callback: F) -> Result<TimerId>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.timers.lock().start_one_shot(self.now(), duration)?;
        self.register_callback(id, Arc::new(callback), false);
        Ok(id)
    }

    /// Start a repeating timer. The first fire happens one `interval` from now.
    pub fn start_repeating_timer<F>(&self, interval: Duration, callback: F) -> Result<TimerId>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.timers.lock().start_repeating(self.now(), interval)?;
        self.register_callback(id, Arc::new(callback), true);
        Ok(id)
    }

    /// Start a repeating timer owned by the returned guard.
    pub fn start_repeating_guarded<F>(
        self: &Arc<Self>,
        interval: Duration,
        callback: F,
    ) -> Result<TimerGuard>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.start_repeating_timer(interval, callback)?;
        Ok(TimerGuard::new(self, id))
    }

    fn register_callback(&self, id: TimerId, callback: TimerCallback, repeating: bool) {
        self.callbacks
            .lock()
            .insert(id, TimerSlot { callback, repeating });
    }

    /// Stop a timer. Its callback will not be invoked again.
    pub fn stop_timer(&self, id: TimerId) -> Result<()> {
        self.callbacks.lock().remove(id);
        self.timers.lock().stop(id)
    }

    /// Check if a timer is still scheduled.
    pub fn is_timer_active(&self, id: TimerId) -> bool {
        self.timers.lock().is_active(id)
    }

    /// Interval of an active timer.
    pub fn timer_interval(&self, id: TimerId) -> Option<Duration> {
        self.timers.lock().interval(id)
    }

    /// Number of scheduled timers.
    pub fn active_timer_count(&self) -> usize {
        self.timers.lock().active_count()
    }

    /// Time until the next timer deadline, if any timer is scheduled.
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        self.timers.lock().time_until_next(self.now())
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Run every pending task and every expired timer.
    ///
    /// Keeps going until neither tasks nor expired timers remain, so work
    /// posted from inside a callback runs in the same pass. Callbacks are
    /// invoked with no internal lock held and may freely re-enter the loop.
    ///
    /// Returns the number of callbacks dispatched.
    pub fn process_events(&self) -> usize {
        let mut dispatched = 0;

        loop {
            while let Some(task) = self.next_task() {
                task();
                dispatched += 1;
            }

            let fired = self.timers.lock().process_expired(self.now());
            if fired.is_empty() {
                break;
            }

            tracing::trace!(target: targets::EVENT_LOOP, count = fired.len(), "processing timer events");
            for id in fired {
                if let Some(callback) = self.take_callback(id) {
                    callback();
                    dispatched += 1;
                }
            }
        }

        dispatched
    }

    fn next_task(&self) -> Option<Box<dyn FnOnce() + Send + 'static>> {
        self.tasks.lock().pop()
    }

    /// Look up the callback of a fired timer, releasing one-shot slots.
    fn take_callback(&self, id: TimerId) -> Option<TimerCallback> {
        let mut callbacks = self.callbacks.lock();
        let repeating = callbacks.get(id)?.repeating;
        if repeating {
            callbacks.get(id).map(|slot| slot.callback.clone())
        } else {
            callbacks.remove(id).map(|slot| slot.callback)
        }
    }

    /// Drive the loop for `duration` of clock time.
    ///
    /// On a manual clock the clock jumps from deadline to deadline; on the
    /// system clock the calling thread sleeps between them.
    #[tracing::instrument(skip(self), target = "horizon_pager_core::event_loop", level = "debug")]
    pub fn run_for(&self, duration: Duration) -> usize {
        let deadline = self.now() + duration;
        let mut dispatched = 0;

        loop {
            dispatched += self.process_events();

            let now = self.now();
            if now >= deadline {
                break;
            }

            let next = self
                .timers
                .lock()
                .next_deadline()
                .map_or(deadline, |next| next.min(deadline));

            if self.clock.is_manual() {
                self.clock.advance_to(next);
            } else {
                std::thread::sleep(next.saturating_duration_since(now));
            }
        }

        dispatched
    }

    /// Advance a manual clock by `by`, firing timers at their own deadlines.
    ///
    /// On the system clock this only processes what is already due.
    pub fn advance(&self, by: Duration) -> usize {
        if !self.clock.is_manual() {
            tracing::warn!(target: targets::EVENT_LOOP, "advance() called on a system clock loop");
            return self.process_events();
        }
        self.run_for(by)
    }
}

impl std::fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("clock", &self.clock)
            .field("active_timers", &self.active_timer_count())
            .field("pending_tasks", &self.pending_task_count())
            .finish()
    }
}

/// RAII handle for a timer; the timer is stopped when the guard is dropped.
///
/// The guard holds the loop weakly, so it never keeps a loop alive.
#[derive(Debug)]
pub struct TimerGuard {
    event_loop: Weak<EventLoop>,
    id: TimerId,
}

impl TimerGuard {
    /// Take ownership of a running timer.
    pub fn new(event_loop: &Arc<EventLoop>, id: TimerId) -> Self {
        Self {
            event_loop: Arc::downgrade(event_loop),
            id,
        }
    }

    /// The guarded timer.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Whether the guarded timer is still scheduled.
    pub fn is_active(&self) -> bool {
        self.event_loop
            .upgrade()
            .is_some_and(|event_loop| event_loop.is_timer_active(self.id))
    }

    /// Interval of the guarded timer, while it is scheduled.
    pub fn interval(&self) -> Option<Duration> {
        self.event_loop
            .upgrade()
            .and_then(|event_loop| event_loop.timer_interval(self.id))
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(event_loop) = self.event_loop.upgrade() {
            // One-shot timers are already gone once they fire.
            let _ = event_loop.stop_timer(self.id);
        }
    }
}
