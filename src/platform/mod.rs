//! Platform-specific Windows implementations
//!
//! This module encapsulates the Win32 calls that are not tied to the slot
//! window itself: geometry conversions and modal message boxes.

pub mod dialogs;
pub mod windows;
