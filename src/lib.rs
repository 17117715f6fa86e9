// ABOUTME: Core library for apod-wallpaper
// ABOUTME: Fetches NASA's Astronomy Picture of the Day and saves it for use as a wallpaper

use std::sync::Once;

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod record;
pub mod wallpaper;

pub use fetch::{fetch_and_save, SavedImage};

// This ensures env_logger is only initialized once
static INIT: Once = Once::new();

/// Initialize the library
///
/// Sets up logging with env_logger. This is safe to call multiple times
/// as it will only initialize the logger on the first call.
pub fn init() {
    INIT.call_once(|| {
        env_logger::init();
        log::debug!("Logger initialized");
    });
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
