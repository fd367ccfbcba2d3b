//! # Unified Configuration System
//!
//! All shell configuration types live here: the file-backed `ShellConfig`
//! consumed by applications, the per-panel geometry blocks, and the
//! `WindowConfig` value handed to the platform at window-creation time.
//!
//! ## Design Goals
//!
//! - **Explicit**: geometry is a value passed into the factory, never
//!   process-wide state
//! - **Serializable**: TOML/RON via the [`Config`](crate::config::Config) trait
//! - **Type Safe**: strong typing with validation and defaults

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Default browser panel width in pixels
pub const DEFAULT_BROWSER_WIDTH: u32 = 900;
/// Default browser panel height in pixels
pub const DEFAULT_BROWSER_HEIGHT: u32 = 700;
/// Default bundled page locator for the browser panel
pub const DEFAULT_BROWSER_LOCATOR: &str = "pages/browser.html";

bitflags! {
    /// Capability flags granted to the content hosted in a window
    ///
    /// These map to host-runtime web preferences; the core treats them as an
    /// opaque set forwarded to the platform at creation time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WebFeatureFlags: u32 {
        /// Allow the hosted page to embed nested web views
        const EMBEDDED_VIEWS = 1 << 0;
        /// Allow the hosted page to read and write the clipboard
        const CLIPBOARD_ACCESS = 1 << 1;
        /// Expose developer tooling to the hosted page
        const DEVTOOLS = 1 << 2;
    }
}

/// Geometry and behavior for one native window
///
/// Immutable once a window handle has been created from it; the factory owns
/// the value and the platform consumes it exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window title text
    pub title: String,
    /// Client-area width in pixels
    pub width: u32,
    /// Client-area height in pixels
    pub height: u32,
    /// Minimum client-area width in pixels
    pub min_width: u32,
    /// Minimum client-area height in pixels
    pub min_height: u32,
    /// Center the window on the primary monitor at creation
    pub center: bool,
    /// Allow the user to resize the window
    pub resizable: bool,
    /// Capability flags for the hosted content
    pub features: WebFeatureFlags,
}

impl WindowConfig {
    /// Validate the geometry
    ///
    /// # Errors
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("window size must be non-zero: {}x{}", self.width, self.height));
        }
        if self.min_width > self.width || self.min_height > self.height {
            return Err(format!(
                "minimum size {}x{} exceeds size {}x{}",
                self.min_width, self.min_height, self.width, self.height
            ));
        }
        Ok(())
    }
}

/// Configuration block for the browser panel window
///
/// The minimum size defaults to the full size, matching the panel's fixed
/// layout: the page may grow but never shrink below its design geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserWindowConfig {
    /// Window title
    #[serde(default = "default_browser_title")]
    pub title: String,
    /// Panel width in pixels
    #[serde(default = "default_browser_width")]
    pub width: u32,
    /// Panel height in pixels
    #[serde(default = "default_browser_height")]
    pub height: u32,
    /// Minimum panel width in pixels
    #[serde(default = "default_browser_width")]
    pub min_width: u32,
    /// Minimum panel height in pixels
    #[serde(default = "default_browser_height")]
    pub min_height: u32,
    /// Center the panel on the primary monitor
    #[serde(default = "default_true")]
    pub center: bool,
    /// Allow resizing the panel
    #[serde(default = "default_true")]
    pub resizable: bool,
    /// Bundled page locator the panel loads
    #[serde(default = "default_browser_locator")]
    pub base_locator: String,
}

fn default_browser_title() -> String {
    "Browser".to_string()
}

fn default_browser_width() -> u32 {
    DEFAULT_BROWSER_WIDTH
}

fn default_browser_height() -> u32 {
    DEFAULT_BROWSER_HEIGHT
}

fn default_true() -> bool {
    true
}

fn default_browser_locator() -> String {
    DEFAULT_BROWSER_LOCATOR.to_string()
}

impl Default for BrowserWindowConfig {
    fn default() -> Self {
        Self {
            title: default_browser_title(),
            width: DEFAULT_BROWSER_WIDTH,
            height: DEFAULT_BROWSER_HEIGHT,
            min_width: DEFAULT_BROWSER_WIDTH,
            min_height: DEFAULT_BROWSER_HEIGHT,
            center: true,
            resizable: true,
            base_locator: DEFAULT_BROWSER_LOCATOR.to_string(),
        }
    }
}

impl BrowserWindowConfig {
    /// Build the `WindowConfig` handed to the platform
    ///
    /// The browser panel hosts embedded web views, so `EMBEDDED_VIEWS` is
    /// always granted.
    #[must_use]
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            min_width: self.min_width,
            min_height: self.min_height,
            center: self.center,
            resizable: self.resizable,
            features: WebFeatureFlags::EMBEDDED_VIEWS,
        }
    }

    /// Validate the geometry
    ///
    /// # Errors
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        self.window_config().validate()
    }
}

/// Top-level shell configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Browser panel window block
    #[serde(default)]
    pub browser: BrowserWindowConfig,
}

impl Config for ShellConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BrowserWindowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, DEFAULT_BROWSER_WIDTH);
        assert_eq!(config.min_width, config.width);
        assert!(config.center);
        assert!(config.resizable);
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut config = BrowserWindowConfig::default();
        config.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_minimum_exceeding_size_rejected() {
        let mut config = BrowserWindowConfig::default();
        config.min_height = config.height + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_browser_panel_grants_embedded_views() {
        let config = BrowserWindowConfig::default().window_config();
        assert!(config.features.contains(WebFeatureFlags::EMBEDDED_VIEWS));
        assert!(!config.features.contains(WebFeatureFlags::DEVTOOLS));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ShellConfig = toml::from_str("[browser]\nwidth = 1024\n").unwrap();
        assert_eq!(config.browser.width, 1024);
        assert_eq!(config.browser.height, DEFAULT_BROWSER_HEIGHT);
        assert_eq!(config.browser.base_locator, DEFAULT_BROWSER_LOCATOR);
    }
}
