//! Window management subsystem
//!
//! This module provides the window lifecycle abstraction layer: native
//! windows are created through an injectable platform seam and observed
//! through ordered lifecycle signals.
//!
//! # Architecture Overview
//!
//! The window subsystem follows a layered architecture:
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Application Code            │
//! └─────────────┬───────────────────┘
//!               │ Uses
//!        ┌──────▼───────┐
//!        │ WindowHandle │ ← Lifecycle state machine (handle.rs)
//!        └──────┬───────┘
//!               │ Uses
//!      ┌────────▼────────┐
//!      │ PlatformWindow  │ ← Capability traits (backend.rs)
//!      │ + Platform      │
//!      └────────┬────────┘
//!               │ Implemented by
//!   ┌───────────▼───────────┐
//!   │ glfw::GlfwPlatform    │ ← Native backend (glfw.rs)
//!   │ headless::Headless…   │ ← Scripted backend (headless.rs)
//!   └───────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - **`handle`**: lifecycle state machine and signal dispatch
//! - **`backend`**: the traits every windowing backend implements
//! - **`target`**: pure navigation-target resolution
//! - **`glfw`**: the native GLFW backend
//! - **`headless`**: the scripted backend for tests and headless runs
//!
//! # Design Goals
//!
//! - **Backend Agnostic**: applications never name a windowing API
//! - **Ordered Signals**: `ReadyToShow` precedes `Closed`, `Finish` lies
//!   strictly between them, nothing fires after `Closed`
//! - **Testable**: the scripted backend drives the full lifecycle without a
//!   display server

pub mod backend;
pub mod glfw;
pub mod handle;
pub mod headless;
pub mod target;

// Re-export the main public type for convenience
pub use handle::WindowHandle;
