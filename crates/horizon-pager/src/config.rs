//! Page view configuration.
//!
//! Every field has a default, so a config file only names what it changes:
//!
//! ```
//! use horizon_pager::PageViewConfig;
//!
//! let config = PageViewConfig::from_toml_str(r#"
//! scroll_animation_ms = 450
//! easing = "ease_out"
//! "#).unwrap();
//!
//! assert_eq!(config.scroll_animation_ms, 450);
//! assert!(config.hides_for_single_page);
//! ```

use std::path::Path;
use std::time::Duration;

use horizon_pager_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::widget::animation::Easing;

/// Tunables of a [`PageView`](crate::widget::widgets::PageView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageViewConfig {
    /// Duration of an animated scroll-to-page, in milliseconds.
    pub scroll_animation_ms: u64,
    /// Frame period of scroll animations on the event loop, in milliseconds.
    pub frame_interval_ms: u64,
    /// Easing curve of animated scrolls.
    pub easing: Easing,
    /// Hide the indicator when there is at most one page.
    pub hides_for_single_page: bool,
    /// Release velocity (points per millisecond) above which a drag flips
    /// to the adjacent page instead of snapping to the nearest one.
    pub snap_velocity_threshold: f32,
}

impl Default for PageViewConfig {
    fn default() -> Self {
        Self {
            scroll_animation_ms: 300,
            frame_interval_ms: 16,
            easing: Easing::EaseInOut,
            hides_for_single_page: true,
            snap_velocity_threshold: 0.3,
        }
    }
}

impl PageViewConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded page view config");
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "frame_interval_ms",
                "must be greater than zero",
            ));
        }
        if !self.snap_velocity_threshold.is_finite() || self.snap_velocity_threshold < 0.0 {
            return Err(ConfigError::invalid(
                "snap_velocity_threshold",
                format!("must be a non-negative number, got {}", self.snap_velocity_threshold),
            ));
        }
        Ok(())
    }

    /// [`scroll_animation_ms`](Self::scroll_animation_ms) as a duration.
    pub fn scroll_animation_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_animation_ms)
    }

    /// [`frame_interval_ms`](Self::frame_interval_ms) as a duration.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Builder-style setter for the scroll animation duration.
    pub fn with_scroll_animation(mut self, duration: Duration) -> Self {
        self.scroll_animation_ms = duration.as_millis() as u64;
        self
    }

    /// Builder-style setter for the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Builder-style setter for hiding the indicator on a single page.
    pub fn with_hides_for_single_page(mut self, hides: bool) -> Self {
        self.hides_for_single_page = hides;
        self
    }
}
