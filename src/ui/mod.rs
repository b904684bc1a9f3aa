//! User interface: reel rendering, symbol textures and the desktop window

pub mod renderer;
#[cfg(windows)]
pub mod slot_window;
pub mod textures;

#[cfg(windows)]
pub use slot_window::{SlotWindow, WindowError};
