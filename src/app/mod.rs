//! Application orchestration layer
//!
//! Ties the domain logic to the configuration and exposes the controller the
//! window shell and the headless simulator both drive.

pub mod controller;
pub mod simulate;
pub mod state;

use crate::config::ConfigError;
use crate::domain::reels::ReelError;

/// Application errors surfaced at the binary boundary
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Reel setup failed: {0}")]
    Reels(#[from] ReelError),

    #[cfg(windows)]
    #[error("Window error: {0}")]
    Window(#[from] crate::ui::slot_window::WindowError),

    #[cfg(not(windows))]
    #[error("The desktop window is only available on Windows; try `simulate`")]
    UnsupportedPlatform,
}
