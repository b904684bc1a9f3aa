//! Domain logic and core data structures
//!
//! Pure slot machine logic, independent of Win32 and of rendering.

pub mod animation;
pub mod core;
pub mod outcome;
pub mod reels;
