//! High-level window handle with lifecycle signal dispatch
//!
//! A `WindowHandle` owns exactly one native window through a boxed
//! [`PlatformWindow`] and normalizes the backend's raw events into strictly
//! ordered lifecycle signals:
//!
//! ```text
//! Created → Loading → ReadyToShow → Visible → Closed
//! ```
//!
//! Ordering guarantees per handle:
//! - `ReadyToShow` fires at most once and always before `Closed`
//! - `Finish` only fires between `ReadyToShow` and `Closed`
//! - nothing fires after `Closed`; the state is terminal
//!
//! Visibility is gated: `show()` before readiness records the request and
//! the surface is revealed when `ReadyToShow` arrives. Calling any method
//! after `Closed` is a logged no-op, never a panic.

use crate::core::config::WindowConfig;
use crate::window::backend::{Platform, PlatformEvent, PlatformWindow, WindowResult};
use crate::window::target::{NavigationTarget, Page};

/// Lifecycle state of a window handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WindowState {
    /// Native surface allocated, nothing loaded yet
    Created,
    /// Asynchronous navigation in flight
    Loading,
    /// Content reported first-paint readiness; surface still hidden
    ReadyToShow,
    /// Surface revealed to the user
    Visible,
    /// Native surface gone; terminal
    Closed,
}

/// Ordered lifecycle signal delivered by [`WindowHandle::pump`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowSignal {
    /// Content is ready to paint; the surface may be revealed
    ReadyToShow,
    /// The hosted page reported logical completion
    Finish,
    /// The content load failed
    LoadFailed(String),
    /// The native surface was closed; no further signal will fire
    Closed,
}

/// Handler slots for lifecycle signals
///
/// One slot per signal; an unset slot is a no-op. Re-binding replaces every
/// slot (last write wins) — handlers never stack.
#[derive(Default)]
pub struct SignalHandlers {
    ready_to_show: Option<Box<dyn FnMut()>>,
    finish: Option<Box<dyn FnMut()>>,
    closed: Option<Box<dyn FnMut()>>,
    load_failed: Option<Box<dyn FnMut(&str)>>,
}

impl SignalHandlers {
    /// Create an empty handler set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `ReadyToShow` handler
    #[must_use]
    pub fn on_ready_to_show(mut self, handler: impl FnMut() + 'static) -> Self {
        self.ready_to_show = Some(Box::new(handler));
        self
    }

    /// Set the `Finish` handler
    #[must_use]
    pub fn on_finish(mut self, handler: impl FnMut() + 'static) -> Self {
        self.finish = Some(Box::new(handler));
        self
    }

    /// Set the `Closed` handler
    #[must_use]
    pub fn on_closed(mut self, handler: impl FnMut() + 'static) -> Self {
        self.closed = Some(Box::new(handler));
        self
    }

    /// Set the `LoadFailed` handler
    #[must_use]
    pub fn on_load_failed(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.load_failed = Some(Box::new(handler));
        self
    }
}

impl std::fmt::Debug for SignalHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalHandlers")
            .field("ready_to_show", &self.ready_to_show.is_some())
            .field("finish", &self.finish.is_some())
            .field("closed", &self.closed.is_some())
            .field("load_failed", &self.load_failed.is_some())
            .finish()
    }
}

/// High-level handle owning one native window
///
/// The platform box is dropped the moment `Closed` is observed, so the
/// native resource exists exactly as long as the handle has not seen the
/// terminal signal. The handle itself stays around so that post-close calls
/// remain safe no-ops.
pub struct WindowHandle {
    platform: Option<Box<dyn PlatformWindow>>,
    state: WindowState,
    handlers: SignalHandlers,
    show_requested: bool,
    title: String,
}

impl WindowHandle {
    /// Allocate a native window with the given geometry and behavior flags
    ///
    /// # Errors
    /// Propagates [`WindowError::CreationFailed`] from the platform; window
    /// allocation failures are fatal and never retried here.
    ///
    /// [`WindowError::CreationFailed`]: crate::window::backend::WindowError::CreationFailed
    pub fn create(config: &WindowConfig, platform: &mut dyn Platform) -> WindowResult<Self> {
        let window = platform.create_window(config)?;
        log::info!("window created: {} ({}x{})", config.title, config.width, config.height);
        Ok(Self {
            platform: Some(window),
            state: WindowState::Created,
            handlers: SignalHandlers::new(),
            show_requested: false,
            title: config.title.clone(),
        })
    }

    /// Register lifecycle handlers, replacing any previously bound set
    ///
    /// Ignored after `Closed`.
    pub fn bind(&mut self, handlers: SignalHandlers) {
        if self.state == WindowState::Closed {
            log::warn!("bind ignored on closed window '{}'", self.title);
            return;
        }
        self.handlers = handlers;
    }

    /// Begin asynchronous navigation to the resolved target on `page`
    ///
    /// Non-blocking; completion is observed through the `ReadyToShow` or
    /// `LoadFailed` signals on a later [`pump`](Self::pump). Ignored after
    /// `Closed`.
    pub fn load_resource(&mut self, page: Page, target: &NavigationTarget) {
        let Some(window) = self.platform.as_mut() else {
            log::warn!("load_resource ignored on closed window '{}'", self.title);
            return;
        };
        let locator = target.locator();
        log::debug!("loading page '{page}' at {locator}");
        window.begin_load(page, &locator);
        if self.state == WindowState::Created {
            self.state = WindowState::Loading;
        }
    }

    /// Request that the surface become visible
    ///
    /// Reveals are gated on readiness: before `ReadyToShow` the request is
    /// recorded and honored when readiness arrives. After `Closed` this is a
    /// silent no-op; it never panics and never re-fires `ReadyToShow`.
    pub fn show(&mut self) {
        match self.state {
            WindowState::Closed => {
                log::debug!("show ignored on closed window '{}'", self.title);
            }
            WindowState::Created | WindowState::Loading => {
                self.show_requested = true;
                log::debug!("show deferred until '{}' is ready", self.title);
            }
            WindowState::ReadyToShow | WindowState::Visible => {
                if let Some(window) = self.platform.as_mut() {
                    window.show();
                }
                self.state = WindowState::Visible;
            }
        }
    }

    /// Drain platform events, advance the state machine, and dispatch signals
    ///
    /// Handlers run on the calling thread, in signal order, before this
    /// returns; the delivered signals are also returned for callers that
    /// prefer polling over bound handlers. Out-of-order platform events
    /// (duplicate readiness, premature completion, anything after close)
    /// are dropped with a warning.
    pub fn pump(&mut self) -> Vec<WindowSignal> {
        let events = match self.platform.as_mut() {
            Some(window) => window.poll(),
            None => return Vec::new(),
        };

        let mut delivered = Vec::new();
        for event in events {
            if self.state == WindowState::Closed {
                log::warn!("dropping platform event after close: {event:?}");
                continue;
            }
            match event {
                PlatformEvent::ContentReady => self.on_content_ready(&mut delivered),
                PlatformEvent::Finished => self.on_finished(&mut delivered),
                PlatformEvent::LoadFailed(reason) => self.on_load_failed(reason, &mut delivered),
                PlatformEvent::Closed => self.on_closed(&mut delivered),
            }
        }
        delivered
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Whether the native surface still exists
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != WindowState::Closed
    }

    fn on_content_ready(&mut self, delivered: &mut Vec<WindowSignal>) {
        if self.state >= WindowState::ReadyToShow {
            log::warn!("duplicate readiness event on '{}' dropped", self.title);
            return;
        }
        self.state = WindowState::ReadyToShow;
        if self.show_requested {
            if let Some(window) = self.platform.as_mut() {
                window.show();
            }
            self.state = WindowState::Visible;
        }
        if let Some(handler) = self.handlers.ready_to_show.as_mut() {
            handler();
        }
        delivered.push(WindowSignal::ReadyToShow);
    }

    fn on_finished(&mut self, delivered: &mut Vec<WindowSignal>) {
        if self.state < WindowState::ReadyToShow {
            log::warn!("completion event before readiness on '{}' dropped", self.title);
            return;
        }
        if let Some(handler) = self.handlers.finish.as_mut() {
            handler();
        }
        delivered.push(WindowSignal::Finish);
    }

    fn on_load_failed(&mut self, reason: String, delivered: &mut Vec<WindowSignal>) {
        log::warn!("load failed on '{}': {reason}", self.title);
        if let Some(handler) = self.handlers.load_failed.as_mut() {
            handler(&reason);
        }
        delivered.push(WindowSignal::LoadFailed(reason));
    }

    fn on_closed(&mut self, delivered: &mut Vec<WindowSignal>) {
        log::info!("window closed: {}", self.title);
        self.state = WindowState::Closed;
        // Drop the native surface; the handle outlives it for no-op calls.
        self.platform = None;
        if let Some(handler) = self.handlers.closed.as_mut() {
            handler();
        }
        delivered.push(WindowSignal::Closed);
    }
}

impl std::fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowHandle")
            .field("title", &self.title)
            .field("state", &self.state)
            .field("show_requested", &self.show_requested)
            .finish_non_exhaustive()
    }
}
