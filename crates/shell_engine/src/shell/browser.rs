//! Browser panel window factory
//!
//! `Browser` orchestrates the options resolver and the window handle into a
//! single caller-facing object: give it a logical `url` and up to four
//! callbacks, and it opens the bundled browser page in its own native
//! window, revealing it once the content is ready.
//!
//! Opening is two-phase: [`Browser::configure`] is a pure step producing a
//! [`BrowserPlan`] (geometry + resolved navigation target, no effects), and
//! [`Browser::open`] performs the native allocation from that plan. The
//! matching release is the eventual `closed` signal — the host runtime owns
//! destruction once the user closes the surface.

use crate::core::config::{BrowserWindowConfig, WindowConfig};
use crate::window::backend::{Platform, WindowResult};
use crate::window::handle::{WindowHandle, WindowSignal};
use crate::window::target::{resolve, NavigationOverrides, NavigationTarget, Page};

type Callback = Box<dyn FnMut()>;

/// Caller arguments for opening a browser panel
///
/// This is the entire public callback surface: a logical destination and
/// optional `shown` / `finish` / `closed` / `load_failed` slots. Unset
/// slots are no-ops.
#[derive(Default)]
pub struct BrowserArgs {
    /// Logical destination the hosted page navigates to; empty means the
    /// page's default view
    pub url: String,
    shown: Option<Callback>,
    finish: Option<Callback>,
    closed: Option<Callback>,
    load_failed: Option<Box<dyn FnMut(&str)>>,
}

impl BrowserArgs {
    /// Arguments for the given logical destination
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }

    /// Invoked once when the panel becomes visible
    #[must_use]
    pub fn on_shown(mut self, callback: impl FnMut() + 'static) -> Self {
        self.shown = Some(Box::new(callback));
        self
    }

    /// Invoked whenever the hosted page reports logical completion
    #[must_use]
    pub fn on_finish(mut self, callback: impl FnMut() + 'static) -> Self {
        self.finish = Some(Box::new(callback));
        self
    }

    /// Invoked once when the panel's window closes
    #[must_use]
    pub fn on_closed(mut self, callback: impl FnMut() + 'static) -> Self {
        self.closed = Some(Box::new(callback));
        self
    }

    /// Invoked when the content load fails
    #[must_use]
    pub fn on_load_failed(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.load_failed = Some(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for BrowserArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserArgs")
            .field("url", &self.url)
            .field("shown", &self.shown.is_some())
            .field("finish", &self.finish.is_some())
            .field("closed", &self.closed.is_some())
            .field("load_failed", &self.load_failed.is_some())
            .finish()
    }
}

/// Pure description of a browser panel about to be opened
///
/// Produced by [`Browser::configure`]; contains everything [`Browser::open`]
/// needs and nothing effectful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserPlan {
    /// Geometry and behavior for the native window
    pub window: WindowConfig,
    /// Resolved locator + query for the page loader
    pub target: NavigationTarget,
    /// Bundled page the panel hosts
    pub page: Page,
}

/// A browser panel: one owned window handle plus caller callbacks
pub struct Browser {
    handle: WindowHandle,
    is_shown: bool,
    shown: Option<Callback>,
    finish: Option<Callback>,
    closed: Option<Callback>,
    load_failed: Option<Box<dyn FnMut(&str)>>,
}

impl Browser {
    /// Resolve a plan for the given logical destination — pure, no effects
    #[must_use]
    pub fn configure(url: &str, config: &BrowserWindowConfig) -> BrowserPlan {
        let overrides = NavigationOverrides { url: url.to_string() };
        BrowserPlan {
            window: config.window_config(),
            target: resolve(&config.base_locator, &overrides),
            page: Page::Browser,
        }
    }

    /// Open a browser panel: allocate the window and start loading
    ///
    /// The window is created hidden; it is revealed (and `shown` fires) when
    /// the content reports readiness on a later [`pump`](Self::pump).
    ///
    /// # Errors
    /// Propagates the platform's window-creation failure; nothing is
    /// retried and no panel exists on error.
    pub fn open(
        args: BrowserArgs,
        config: &BrowserWindowConfig,
        platform: &mut dyn Platform,
    ) -> WindowResult<Self> {
        let plan = Self::configure(&args.url, config);
        log::info!("opening browser panel for url '{}'", args.url);

        let mut handle = WindowHandle::create(&plan.window, platform)?;
        handle.load_resource(plan.page, &plan.target);
        // Reveal is gated on readiness; request it now.
        handle.show();

        Ok(Self {
            handle,
            is_shown: false,
            shown: args.shown,
            finish: args.finish,
            closed: args.closed,
            load_failed: args.load_failed,
        })
    }

    /// Drain window signals and forward them to the caller's callbacks
    ///
    /// `is_shown` flips to true exactly once, on readiness; it never
    /// reverts. `shown` and `closed` fire at most once per panel, `finish`
    /// zero or more times in between.
    pub fn pump(&mut self) {
        for signal in self.handle.pump() {
            match signal {
                WindowSignal::ReadyToShow => {
                    self.is_shown = true;
                    if let Some(callback) = self.shown.as_mut() {
                        callback();
                    }
                }
                WindowSignal::Finish => {
                    if let Some(callback) = self.finish.as_mut() {
                        callback();
                    }
                }
                WindowSignal::LoadFailed(reason) => {
                    if let Some(callback) = self.load_failed.as_mut() {
                        callback(&reason);
                    }
                }
                WindowSignal::Closed => {
                    if let Some(callback) = self.closed.as_mut() {
                        callback();
                    }
                }
            }
        }
    }

    /// Request that the panel become visible
    ///
    /// Safe no-op after the window has closed.
    pub fn show(&mut self) {
        self.handle.show();
    }

    /// Whether the panel has ever become visible
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.is_shown
    }

    /// Whether the panel's window still exists
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }
}

impl std::fmt::Debug for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Browser")
            .field("handle", &self.handle)
            .field("is_shown", &self.is_shown)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::backend::PlatformEvent;
    use crate::window::headless::HeadlessPlatform;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn test_configure_is_pure() {
        let config = BrowserWindowConfig::default();
        let plan = Browser::configure("https://example.org", &config);
        assert_eq!(plan.page, Page::Browser);
        assert_eq!(plan.target.query_value("url"), Some("https://example.org"));
        assert_eq!(plan.window.width, config.width);

        // Same inputs, same plan; and no window was created anywhere.
        assert_eq!(plan, Browser::configure("https://example.org", &config));
    }

    #[test]
    fn test_end_to_end_shown_then_closed() {
        let mut platform = HeadlessPlatform::new();
        let (shown, on_shown) = counter();
        let (closed, on_closed) = counter();

        let args = BrowserArgs::new("").on_shown(on_shown).on_closed(on_closed);
        let mut browser =
            Browser::open(args, &BrowserWindowConfig::default(), &mut platform).unwrap();
        let control = platform.control(0);

        // Window exists but stays hidden until readiness.
        assert!(!browser.is_shown());
        assert!(!control.is_visible());
        assert_eq!(control.loads(), vec![(
            "browser".to_string(),
            "pages/browser.html?url=".to_string(),
        )]);

        control.emit(PlatformEvent::ContentReady);
        browser.pump();
        assert_eq!(shown.get(), 1);
        assert!(browser.is_shown());
        assert!(control.is_visible());

        control.emit(PlatformEvent::Closed);
        browser.pump();
        assert_eq!(closed.get(), 1);
        assert!(!browser.is_open());

        // Post-close show() never panics, and the shown flag never reverts.
        browser.show();
        browser.pump();
        assert_eq!(shown.get(), 1);
        assert!(browser.is_shown());
    }

    #[test]
    fn test_is_shown_transitions_exactly_once() {
        let mut platform = HeadlessPlatform::new();
        let (shown, on_shown) = counter();
        let mut browser = Browser::open(
            BrowserArgs::new("x").on_shown(on_shown),
            &BrowserWindowConfig::default(),
            &mut platform,
        )
        .unwrap();
        let control = platform.control(0);

        control.emit(PlatformEvent::ContentReady);
        control.emit(PlatformEvent::ContentReady);
        browser.pump();
        control.emit(PlatformEvent::ContentReady);
        browser.pump();
        assert_eq!(shown.get(), 1);
    }

    #[test]
    fn test_finish_forwarded_between_shown_and_closed() {
        let mut platform = HeadlessPlatform::new();
        let (finished, on_finish) = counter();
        let mut browser = Browser::open(
            BrowserArgs::new("job").on_finish(on_finish),
            &BrowserWindowConfig::default(),
            &mut platform,
        )
        .unwrap();
        let control = platform.control(0);

        // Finish before readiness is dropped by the handle.
        control.emit(PlatformEvent::Finished);
        browser.pump();
        assert_eq!(finished.get(), 0);

        control.emit(PlatformEvent::ContentReady);
        control.emit(PlatformEvent::Finished);
        control.emit(PlatformEvent::Finished);
        browser.pump();
        assert_eq!(finished.get(), 2);
    }

    #[test]
    fn test_load_failure_reaches_callback_without_reveal() {
        let mut platform = HeadlessPlatform::new();
        let failures = Rc::new(Cell::new(0));
        let sink = Rc::clone(&failures);
        let mut browser = Browser::open(
            BrowserArgs::new("bad").on_load_failed(move |_| sink.set(sink.get() + 1)),
            &BrowserWindowConfig::default(),
            &mut platform,
        )
        .unwrap();
        let control = platform.control(0);

        control.emit(PlatformEvent::LoadFailed("unreachable".to_string()));
        browser.pump();
        assert_eq!(failures.get(), 1);
        assert!(!browser.is_shown());
    }

    #[test]
    fn test_two_browsers_have_isolated_callbacks() {
        let mut platform = HeadlessPlatform::new();
        let (shown_a, on_shown_a) = counter();
        let (shown_b, on_shown_b) = counter();
        let (closed_a, on_closed_a) = counter();

        let config = BrowserWindowConfig::default();
        let mut browser_a = Browser::open(
            BrowserArgs::new("a").on_shown(on_shown_a).on_closed(on_closed_a),
            &config,
            &mut platform,
        )
        .unwrap();
        let mut browser_b =
            Browser::open(BrowserArgs::new("b").on_shown(on_shown_b), &config, &mut platform)
                .unwrap();
        let control_a = platform.control(0);
        let control_b = platform.control(1);

        // Interleaved delivery: A ready, B ready, A closed.
        control_a.emit(PlatformEvent::ContentReady);
        control_b.emit(PlatformEvent::ContentReady);
        browser_a.pump();
        browser_b.pump();
        control_a.emit(PlatformEvent::Closed);
        browser_a.pump();
        browser_b.pump();

        assert_eq!(shown_a.get(), 1);
        assert_eq!(shown_b.get(), 1);
        assert_eq!(closed_a.get(), 1);
        assert!(!browser_a.is_open());
        assert!(browser_b.is_open());
        assert!(browser_b.is_shown());
    }

    #[test]
    fn test_creation_failure_aborts_open() {
        let mut platform = HeadlessPlatform::new();
        platform.fail_next_creation();
        let result =
            Browser::open(BrowserArgs::default(), &BrowserWindowConfig::default(), &mut platform);
        assert!(result.is_err());
        assert_eq!(platform.window_count(), 0);
    }
}
