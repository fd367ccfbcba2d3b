//! Native windowing backend using GLFW
//!
//! Provides cross-platform window creation and event delivery for the
//! lifecycle layer. Windows are created hidden and revealed only when the
//! handle reports readiness, so a slow-loading panel never flashes an empty
//! surface.
//!
//! GLFW has no hosted-content runtime of its own: content readiness is
//! reported on the first poll after a load begins (the surface is allocated
//! and the event queue is live), and logical-completion or load-failure
//! events are injected by the embedding application through a
//! [`ContentBridge`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::core::config::{WebFeatureFlags, WindowConfig};
use crate::window::backend::{
    Platform, PlatformEvent, PlatformWindow, WindowError, WindowResult,
};
use crate::window::target::Page;

type EventQueue = Rc<RefCell<VecDeque<PlatformEvent>>>;

/// Native platform backed by GLFW
///
/// Each created window owns its own GLFW context, following the
/// one-context-per-window model; the shell polls every window serially on
/// the main thread.
#[derive(Default)]
pub struct GlfwPlatform {
    bridges: BridgeRegistry,
}

impl GlfwPlatform {
    /// Create the platform
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Content bridge for the `index`-th created window
    ///
    /// Embedders that host a content runtime inside the window use the
    /// bridge to report logical completion and load failures. Windows are
    /// indexed in creation order; the index stays stable for the lifetime
    /// of the platform, and `None` is returned once the window is gone.
    #[must_use]
    pub fn content_bridge(&self, index: usize) -> Option<ContentBridge> {
        self.bridges.get(index)
    }
}

/// Creation-order registry of per-window event queues
///
/// Holds only weak references: a closed window's queue is released as soon
/// as the last embedder-held bridge drops, while indices never shift.
#[derive(Default)]
struct BridgeRegistry {
    slots: Vec<Weak<RefCell<VecDeque<PlatformEvent>>>>,
}

impl BridgeRegistry {
    fn register(&mut self, queue: &EventQueue) {
        self.slots.push(Rc::downgrade(queue));
    }

    fn get(&self, index: usize) -> Option<ContentBridge> {
        self.slots
            .get(index)?
            .upgrade()
            .map(|queue| ContentBridge { queue })
    }
}

impl Platform for GlfwPlatform {
    fn create_window(&mut self, config: &WindowConfig) -> WindowResult<Box<dyn PlatformWindow>> {
        config.validate().map_err(WindowError::Platform)?;

        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| WindowError::InitializationFailed)?;

        // The embedder attaches its own rendering API; no GL context here.
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        // Created hidden; the lifecycle layer reveals on readiness.
        glfw.window_hint(glfw::WindowHint::Visible(false));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));

        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed)?;

        window.set_size_limits(Some(config.min_width), Some(config.min_height), None, None);
        if config.center {
            if let Some((x, y)) = centered_position(&mut glfw, config) {
                window.set_pos(x, y);
            }
        }

        window.set_close_polling(true);
        window.set_refresh_polling(true);

        log::debug!(
            "glfw window '{}' created with features {:?}",
            config.title,
            config.features
        );

        let queue: EventQueue = Rc::default();
        self.bridges.register(&queue);
        let bridge = ContentBridge { queue };

        Ok(Box::new(GlfwWindow {
            glfw,
            window,
            events,
            bridge,
            features: config.features,
            loading: false,
            ready_sent: false,
            open: true,
        }))
    }
}

/// Top-left position centering `config` on the primary monitor
fn centered_position(glfw: &mut glfw::Glfw, config: &WindowConfig) -> Option<(i32, i32)> {
    glfw.with_primary_monitor(|_, monitor| {
        monitor.and_then(|m| m.get_video_mode()).map(|mode| {
            let x = (i64::from(mode.width) - i64::from(config.width)) / 2;
            let y = (i64::from(mode.height) - i64::from(config.height)) / 2;
            (
                i32::try_from(x.max(0)).unwrap_or(0),
                i32::try_from(y.max(0)).unwrap_or(0),
            )
        })
    })
}

/// Event-injection handle for applications hosting content in a GLFW window
///
/// GLFW itself cannot know when the hosted page has "finished"; the
/// embedding application reports it here and the event surfaces through the
/// normal lifecycle channel on the next poll.
#[derive(Clone)]
pub struct ContentBridge {
    queue: EventQueue,
}

impl ContentBridge {
    /// Report logical completion of the hosted content
    pub fn notify_finished(&self) {
        self.queue.borrow_mut().push_back(PlatformEvent::Finished);
    }

    /// Report a failed content load
    pub fn notify_load_failed(&self, reason: impl Into<String>) {
        self.queue
            .borrow_mut()
            .push_back(PlatformEvent::LoadFailed(reason.into()));
    }

    fn drain(&self) -> Vec<PlatformEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

/// One native GLFW window
struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    bridge: ContentBridge,
    features: WebFeatureFlags,
    loading: bool,
    ready_sent: bool,
    open: bool,
}

impl PlatformWindow for GlfwWindow {
    fn begin_load(&mut self, page: Page, locator: &str) {
        if !self.open {
            return;
        }
        log::debug!("glfw backend loading page '{page}' at {locator} (features {:?})", self.features);
        // Readiness latches once per window; reloads do not re-fire it.
        self.loading = true;
    }

    fn show(&mut self) {
        if self.open {
            self.window.show();
        }
    }

    fn is_visible(&self) -> bool {
        self.open && self.window.is_visible()
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn request_close(&mut self) {
        if self.open {
            self.window.set_should_close(true);
        }
    }

    fn poll(&mut self) -> Vec<PlatformEvent> {
        if !self.open {
            return Vec::new();
        }
        self.glfw.poll_events();

        let mut out = self.bridge.drain();

        if self.loading && !self.ready_sent {
            // Surface allocated and the event queue is live; this is the
            // earliest point the content can paint.
            self.ready_sent = true;
            out.push(PlatformEvent::ContentReady);
        }

        let mut close_requested = false;
        for (_, event) in glfw::flush_messages(&self.events) {
            if matches!(event, glfw::WindowEvent::Close) {
                close_requested = true;
            }
        }
        if close_requested || self.window.should_close() {
            self.open = false;
            out.push(PlatformEvent::Closed);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Registry and bridge plumbing is testable without a display server;
    // the native window paths need a real GLFW context and are exercised
    // by the demo application.

    #[test]
    fn test_bridge_events_drain_in_order() {
        let queue: EventQueue = Rc::default();
        let bridge = ContentBridge { queue };
        bridge.notify_finished();
        bridge.clone().notify_load_failed("unreachable");

        assert_eq!(
            bridge.drain(),
            vec![
                PlatformEvent::Finished,
                PlatformEvent::LoadFailed("unreachable".to_string()),
            ]
        );
        assert!(bridge.drain().is_empty());
    }

    #[test]
    fn test_registry_releases_closed_windows() {
        let mut registry = BridgeRegistry::default();
        let first: EventQueue = Rc::default();
        registry.register(&first);

        assert!(registry.get(0).is_some());
        assert!(registry.get(1).is_none());

        // The registry's weak slot must not keep a closed window's queue
        // alive on its own.
        drop(first);
        assert!(registry.get(0).is_none());

        // Indices stay creation-ordered even after earlier windows close.
        let second: EventQueue = Rc::default();
        registry.register(&second);
        assert!(registry.get(0).is_none());
        assert!(registry.get(1).is_some());
    }

    #[test]
    fn test_bridge_clone_keeps_queue_reachable() {
        let mut registry = BridgeRegistry::default();
        let queue: EventQueue = Rc::default();
        registry.register(&queue);

        let embedder_copy = registry.get(0).unwrap();
        drop(queue);
        // An embedder still holding a bridge keeps the slot addressable.
        assert!(registry.get(0).is_some());
        drop(embedder_copy);
        assert!(registry.get(0).is_none());
    }
}
