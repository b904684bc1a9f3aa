//! Core domain types and operations
//!
//! Pure pixel geometry shared by the layout code and the Win32 shell.
//! Nothing in here knows about windows, textures or timers.

/// Rectangle in client-area pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[cfg_attr(not(windows), allow(dead_code))]
impl Rect {
    /// Creates a new rectangle
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns true if the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Splits off a strip of `height` pixels from the bottom edge.
    ///
    /// Returns `(top, bottom)`. The strip is clamped to the rectangle, so the
    /// top part may come back empty on very small windows.
    pub fn split_bottom(&self, height: i32) -> (Rect, Rect) {
        let strip = height.clamp(0, self.h.max(0));
        let top = Rect::new(self.x, self.y, self.w, self.h.max(0) - strip);
        let bottom = Rect::new(self.x, top.bottom(), self.w, strip);
        (top, bottom)
    }
}
