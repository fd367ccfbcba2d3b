//! Scripted headless windowing backend
//!
//! Implements the platform capability set without a display server. Tests
//! and headless CI runs script the raw event stream through a
//! [`HeadlessControl`] and observe what the lifecycle layer asked the
//! "native" window to do.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::config::WindowConfig;
use crate::window::backend::{
    Platform, PlatformEvent, PlatformWindow, WindowError, WindowResult,
};
use crate::window::target::Page;

#[derive(Debug, Default)]
struct HeadlessState {
    pending: VecDeque<PlatformEvent>,
    visible: bool,
    open: bool,
    show_calls: u32,
    loads: Vec<(String, String)>,
}

/// Headless platform that records every window it creates
#[derive(Default)]
pub struct HeadlessPlatform {
    fail_next: bool,
    windows: Vec<Rc<RefCell<HeadlessState>>>,
}

impl HeadlessPlatform {
    /// Create an empty headless platform
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create_window` call fail
    ///
    /// Simulates a host runtime that cannot allocate a surface.
    pub fn fail_next_creation(&mut self) {
        self.fail_next = true;
    }

    /// Scripting control for the `index`-th created window
    ///
    /// # Panics
    /// Panics when no window with that index exists; test-facing API.
    #[must_use]
    pub fn control(&self, index: usize) -> HeadlessControl {
        HeadlessControl { state: Rc::clone(&self.windows[index]) }
    }

    /// Number of windows created so far
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

impl Platform for HeadlessPlatform {
    fn create_window(&mut self, config: &WindowConfig) -> WindowResult<Box<dyn PlatformWindow>> {
        if self.fail_next {
            self.fail_next = false;
            return Err(WindowError::CreationFailed);
        }
        config.validate().map_err(WindowError::Platform)?;
        let state = Rc::new(RefCell::new(HeadlessState { open: true, ..Default::default() }));
        self.windows.push(Rc::clone(&state));
        Ok(Box::new(HeadlessWindow { state }))
    }
}

/// Scripting and inspection handle for one headless window
///
/// Stays valid after the lifecycle layer has dropped the window itself.
#[derive(Clone)]
pub struct HeadlessControl {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessControl {
    /// Queue a raw platform event for the next poll
    pub fn emit(&self, event: PlatformEvent) {
        self.state.borrow_mut().pending.push_back(event);
    }

    /// Whether the window is currently visible
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    /// Whether the window still exists
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    /// How many times `show()` reached the platform
    #[must_use]
    pub fn show_calls(&self) -> u32 {
        self.state.borrow().show_calls
    }

    /// Every `(page, locator)` load request this window received
    #[must_use]
    pub fn loads(&self) -> Vec<(String, String)> {
        self.state.borrow().loads.clone()
    }
}

struct HeadlessWindow {
    state: Rc<RefCell<HeadlessState>>,
}

impl PlatformWindow for HeadlessWindow {
    fn begin_load(&mut self, page: Page, locator: &str) {
        let mut state = self.state.borrow_mut();
        if state.open {
            state.loads.push((page.as_str().to_string(), locator.to_string()));
        }
    }

    fn show(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.open {
            state.visible = true;
            state.show_calls += 1;
        }
    }

    fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    fn request_close(&mut self) {
        self.state.borrow_mut().pending.push_back(PlatformEvent::Closed);
    }

    fn poll(&mut self) -> Vec<PlatformEvent> {
        let mut state = self.state.borrow_mut();
        let events: Vec<PlatformEvent> = state.pending.drain(..).collect();
        if events.contains(&PlatformEvent::Closed) {
            state.open = false;
            state.visible = false;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BrowserWindowConfig;

    #[test]
    fn test_scripted_events_drain_in_order() {
        let mut platform = HeadlessPlatform::new();
        let mut window = platform
            .create_window(&BrowserWindowConfig::default().window_config())
            .unwrap();
        let control = platform.control(0);

        control.emit(PlatformEvent::ContentReady);
        control.emit(PlatformEvent::Finished);
        assert_eq!(
            window.poll(),
            vec![PlatformEvent::ContentReady, PlatformEvent::Finished]
        );
        assert!(window.poll().is_empty());
    }

    #[test]
    fn test_close_event_destroys_surface() {
        let mut platform = HeadlessPlatform::new();
        let mut window = platform
            .create_window(&BrowserWindowConfig::default().window_config())
            .unwrap();
        window.show();
        assert!(window.is_visible());

        window.request_close();
        assert_eq!(window.poll(), vec![PlatformEvent::Closed]);
        assert!(!window.is_open());
        assert!(!window.is_visible());
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut platform = HeadlessPlatform::new();
        let mut config = BrowserWindowConfig::default().window_config();
        config.height = 0;
        assert!(platform.create_window(&config).is_err());
    }
}
