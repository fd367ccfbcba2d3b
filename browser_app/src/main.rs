//! Browser panel demo application
//!
//! Opens the bundled browser page in a native window and pumps the shell
//! until every window has closed. The logical destination comes from the
//! first command-line argument; with none, the page shows its default view.

use std::time::Duration;

use shell_engine::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    shell_engine::foundation::logging::init();

    let config = ShellConfig::load_or_default("shell.toml");
    config.browser.validate()?;

    log::info!("creating GLFW platform...");
    let platform = GlfwPlatform::new();
    let mut shell = Shell::new(platform, config);

    let url = std::env::args().nth(1).unwrap_or_default();
    let id = shell.open_browser(
        BrowserArgs::new(url)
            .on_shown(|| log::info!("browser panel visible"))
            .on_finish(|| log::info!("hosted page reported completion"))
            .on_closed(|| log::info!("browser panel closed"))
            .on_load_failed(|reason| log::error!("browser page failed to load: {reason}")),
    )?;
    log::info!("opened browser panel {id:?}");

    while !shell.is_empty() {
        shell.pump();
        std::thread::sleep(Duration::from_millis(16));
    }

    log::info!("all windows closed, shutting down");
    Ok(())
}
