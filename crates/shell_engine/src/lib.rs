//! # Shell Engine
//!
//! A modular desktop window shell engine written in Rust with GLFW windowing.
//!
//! ## Features
//!
//! - **Window Lifecycle Management**: create, configure, show, and tear down
//!   secondary native windows with ordered lifecycle signals
//! - **Backend Agnostic**: windows are created through an injectable platform
//!   seam, so applications never depend on a concrete windowing API
//! - **Two-Phase Open**: a pure `configure()` step produces a plan; the
//!   effectful `open()` step performs the native allocation
//! - **Headless Testing**: a scripted backend drives the full lifecycle
//!   without a display server
//! - **Cross-Platform**: Windows, Linux, and macOS support via GLFW
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shell_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     shell_engine::foundation::logging::init();
//!
//!     let config = ShellConfig::default();
//!     let platform = GlfwPlatform::new();
//!     let mut shell = Shell::new(platform, config);
//!
//!     shell.open_browser(
//!         BrowserArgs::new("https://example.org")
//!             .on_shown(|| log::info!("browser panel visible"))
//!             .on_closed(|| log::info!("browser panel closed")),
//!     )?;
//!
//!     while !shell.is_empty() {
//!         shell.pump();
//!         std::thread::sleep(std::time::Duration::from_millis(16));
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod config;
pub mod foundation;
pub mod shell;
pub mod window;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{BrowserWindowConfig, ShellConfig, WebFeatureFlags, WindowConfig},
        shell::{
            browser::{Browser, BrowserArgs, BrowserPlan},
            BrowserId, Shell,
        },
        window::{
            backend::{Platform, PlatformEvent, PlatformWindow, WindowError},
            glfw::{ContentBridge, GlfwPlatform},
            headless::HeadlessPlatform,
            target::{resolve, NavigationOverrides, NavigationTarget, Page},
            WindowHandle,
            handle::{SignalHandlers, WindowSignal, WindowState},
        },
    };
}
