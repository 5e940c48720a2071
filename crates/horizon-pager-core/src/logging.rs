//! Logging facilities for Horizon Pager.
//!
//! Horizon Pager is instrumented with the `tracing` crate. The library never
//! installs a subscriber; applications choose their own:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_pager=debug,horizon_pager_core=info")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core runtime target.
    pub const CORE: &str = "horizon_pager_core";
    /// Event loop target.
    pub const EVENT_LOOP: &str = "horizon_pager_core::event_loop";
    /// Timer system target.
    pub const TIMER: &str = "horizon_pager_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_pager_core::signal";
    /// Page container target.
    pub const PAGE_VIEW: &str = "horizon_pager::page_view";
    /// Paging viewport and cell reuse target.
    pub const VIEWPORT: &str = "horizon_pager::viewport";
    /// Auto-switch timer target.
    pub const AUTO_SWITCH: &str = "horizon_pager::auto_switch";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_pager::config";
}
