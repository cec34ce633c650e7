//! Application configuration
//!
//! `configure_cb` resets the configuration to [`AppConfig::default`], hands
//! it to the `configure` hook for overrides, then validates the result.

use crate::error::Result;
use crate::falcon_bail;

const SOURCE: &str = "falcon::AppConfig";

/// Window and framebuffer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Preferred window width
    pub width: i32,
    /// Preferred window height
    pub height: i32,
    /// MSAA sample count of the default framebuffer
    pub sample_count: i32,
    /// Present every Nth vertical blank
    pub swap_interval: i32,
    pub window_title: String,
    /// Full-resolution framebuffer on high-DPI displays
    pub high_dpi: bool,
    pub fullscreen: bool,
    /// Use the reduced-feature GL backend even when a newer one is available
    pub gl_force_gles2: bool,
    /// On-screen keyboard resizes the canvas instead of scrolling it
    pub ios_keyboard_resizes_canvas: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            sample_count: 1,
            swap_interval: 1,
            window_title: "falcon app".to_string(),
            high_dpi: false,
            fullscreen: false,
            gl_force_gles2: true,
            ios_keyboard_resizes_canvas: false,
        }
    }
}

impl AppConfig {
    /// Check that the configuration can be handed to the host platform
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::error::Error::InvalidConfig)
    /// naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            falcon_bail!(InvalidConfig, SOURCE,
                "window size must be positive, got {}x{}", self.width, self.height);
        }
        if self.sample_count < 1 || (self.sample_count & (self.sample_count - 1)) != 0 {
            falcon_bail!(InvalidConfig, SOURCE,
                "sample_count must be a power of two, got {}", self.sample_count);
        }
        if self.swap_interval < 1 {
            falcon_bail!(InvalidConfig, SOURCE,
                "swap_interval must be at least 1, got {}", self.swap_interval);
        }
        if self.window_title.is_empty() {
            falcon_bail!(InvalidConfig, SOURCE, "window_title must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
