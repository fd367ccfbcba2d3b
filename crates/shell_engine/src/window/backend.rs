//! Backend-agnostic window platform traits
//!
//! These traits define the capability set the lifecycle layer needs from a
//! host windowing runtime: allocate a native window, reveal it, start an
//! asynchronous content load, and deliver raw lifecycle events. The handle
//! never names a concrete backend; tests substitute the scripted headless
//! implementation.
//!
//! # Thread Safety
//! The whole subsystem runs on one thread. Events are delivered by polling,
//! never from another thread, so no backend needs to be `Send`.

use thiserror::Error;

use crate::core::config::WindowConfig;
use crate::window::target::Page;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing runtime itself could not be brought up
    #[error("platform initialization failed")]
    InitializationFailed,

    /// The host runtime could not allocate a native surface
    ///
    /// Fatal and never retried; window allocation failures are not
    /// transient in practice (missing display server, exhausted handles).
    #[error("native window creation failed")]
    CreationFailed,

    /// Backend-specific failure
    #[error("platform error: {0}")]
    Platform(String),
}

/// Convenience alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Raw lifecycle event reported by a platform window
///
/// This is the unordered wire channel from the host runtime; the handle's
/// state machine normalizes it into ordered [`WindowSignal`]s.
///
/// [`WindowSignal`]: crate::window::handle::WindowSignal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The loaded content is ready to paint for the first time
    ContentReady,
    /// The hosted page reported logical completion
    Finished,
    /// The content load failed
    LoadFailed(String),
    /// The native surface was closed by the user or the program
    Closed,
}

/// One native window as seen by the lifecycle layer
///
/// Implementations own exactly one native surface. All methods must be safe
/// to call after the surface is gone; post-close calls are no-ops.
pub trait PlatformWindow {
    /// Begin an asynchronous navigation to `locator` on the given page
    ///
    /// Non-blocking; completion is observed through [`PlatformEvent::ContentReady`]
    /// or [`PlatformEvent::LoadFailed`] on a later [`poll`](Self::poll).
    fn begin_load(&mut self, page: Page, locator: &str);

    /// Make the native surface visible
    fn show(&mut self);

    /// Whether the surface is currently visible to the user
    fn is_visible(&self) -> bool;

    /// Whether the native surface still exists
    fn is_open(&self) -> bool;

    /// Ask the host runtime to close the surface
    ///
    /// The closure is confirmed by a [`PlatformEvent::Closed`] on a later poll.
    fn request_close(&mut self);

    /// Drain pending lifecycle events
    ///
    /// Called from the owning thread's poll loop; also pumps the host
    /// runtime's event queue where the backend requires it.
    fn poll(&mut self) -> Vec<PlatformEvent>;
}

/// Factory for native windows
///
/// The seam through which backends are injected: the window factory takes
/// `&mut dyn Platform`, so applications and tests decide which runtime backs
/// their windows.
pub trait Platform {
    /// Allocate a native window with the given geometry and behavior flags
    ///
    /// # Errors
    /// [`WindowError::CreationFailed`] when the host runtime cannot allocate
    /// a surface; the failure is propagated, never retried.
    fn create_window(&mut self, config: &WindowConfig) -> WindowResult<Box<dyn PlatformWindow>>;
}
