//! Shell host loop
//!
//! The `Shell` owns the windowing platform and every open browser panel,
//! pumping them serially on the main thread. Panels are keyed by stable
//! [`BrowserId`]s so application code can address a window after opening it.

pub mod browser;

use slotmap::{new_key_type, SlotMap};

use crate::core::config::ShellConfig;
use crate::shell::browser::{Browser, BrowserArgs};
use crate::window::backend::{Platform, WindowResult};

new_key_type! {
    /// Stable identifier of an open browser panel
    pub struct BrowserId;
}

/// The application shell: one platform, many windows, one poll loop
///
/// All window lifecycle logic runs on the thread that calls
/// [`Shell::pump`]; there is no concurrent mutation of window state.
pub struct Shell<P: Platform> {
    platform: P,
    config: ShellConfig,
    browsers: SlotMap<BrowserId, Browser>,
}

impl<P: Platform> Shell<P> {
    /// Create a shell over the given platform and configuration
    pub fn new(platform: P, config: ShellConfig) -> Self {
        Self { platform, config, browsers: SlotMap::with_key() }
    }

    /// Open a browser panel and register it with the shell
    ///
    /// # Errors
    /// Propagates the window-creation failure; the shell is unchanged on
    /// error.
    pub fn open_browser(&mut self, args: BrowserArgs) -> WindowResult<BrowserId> {
        let browser = Browser::open(args, &self.config.browser, &mut self.platform)?;
        Ok(self.browsers.insert(browser))
    }

    /// Pump every open panel once and retire the ones that closed
    ///
    /// Closed panels are removed after their `closed` callback has run, so
    /// a panel is addressable for exactly as long as its window exists.
    pub fn pump(&mut self) {
        for browser in self.browsers.values_mut() {
            browser.pump();
        }
        self.browsers.retain(|id, browser| {
            if browser.is_open() {
                true
            } else {
                log::debug!("retiring closed browser panel {id:?}");
                false
            }
        });
    }

    /// Borrow an open panel
    #[must_use]
    pub fn get(&self, id: BrowserId) -> Option<&Browser> {
        self.browsers.get(id)
    }

    /// Mutably borrow an open panel
    pub fn get_mut(&mut self, id: BrowserId) -> Option<&mut Browser> {
        self.browsers.get_mut(id)
    }

    /// Number of open panels
    #[must_use]
    pub fn len(&self) -> usize {
        self.browsers.len()
    }

    /// Whether every panel has closed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty()
    }

    /// Access the underlying platform
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}
