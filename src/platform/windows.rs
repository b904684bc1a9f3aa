//! General Windows platform utilities
//!
//! Win32 helper functions shared by the slot window and the dialogs.

use crate::domain::core::Rect;
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

/// Gets the client area of a window as a domain rectangle
///
/// Returns an empty rectangle if the handle is no longer valid.
pub fn client_rect(hwnd: HWND) -> Rect {
    let mut rect = RECT::default();
    match unsafe { GetClientRect(hwnd, &mut rect) } {
        Ok(()) => win32_rect_to_rect(&rect),
        Err(_) => Rect::default(),
    }
}

/// Converts a domain rectangle to Windows RECT structure
pub fn rect_to_win32_rect(rect: &Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

/// Converts a Windows RECT to domain rectangle
pub fn win32_rect_to_rect(rect: &RECT) -> Rect {
    Rect {
        x: rect.left,
        y: rect.top,
        w: rect.right - rect.left,
        h: rect.bottom - rect.top,
    }
}

/// Encodes a string as a null-terminated UTF-16 buffer
pub fn to_wstring(input: &str) -> Vec<u16> {
    input.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_conversion_preserves_edges() {
        let rect = Rect::new(10, 20, 300, 200);
        let win32 = rect_to_win32_rect(&rect);
        assert_eq!((win32.left, win32.top, win32.right, win32.bottom), (10, 20, 310, 220));
        assert_eq!(win32_rect_to_rect(&win32), rect);
    }

    #[test]
    fn wide_strings_are_null_terminated() {
        let wide = to_wstring("Pull");
        assert_eq!(wide.len(), 5);
        assert_eq!(wide.last(), Some(&0));
    }
}
