//! Opens a presentation window and spins the render loop until it is closed.
//!
//! Usage: `window_app [config.toml|config.ron]`

use rust_window::prelude::*;

fn load_config() -> Result<WindowConfig, WindowError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading window configuration from {path}");
            Ok(WindowConfig::load_from_file(path)?)
        }
        None => Ok(WindowConfig::default()),
    }
}

fn run(config: &WindowConfig) -> Result<(), WindowError> {
    let window: Window = Window::from_config(config)?;
    log::info!(
        "Opened '{}' ({}x{})",
        window.name(),
        window.width(),
        window.height()
    );

    let mut frames: u64 = 0;
    while !window.should_close() {
        window.poll_events();
        frames += 1;
    }

    log::info!("Close requested after {frames} frames");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    rust_window::logging::init();

    log::info!("Starting window demo");

    let config = load_config()?;
    if let Err(e) = run(&config) {
        log::error!("Window demo failed: {e}");
        return Err(e.into());
    }

    log::info!("Window demo finished successfully");
    Ok(())
}
