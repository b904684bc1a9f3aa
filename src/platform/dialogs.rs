//! Modal message boxes
//!
//! Every dialog blocks the calling thread until dismissed. Timer messages
//! keep being dispatched by the box's own loop, so callers must not hold a
//! borrow of window state across these calls.

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    MessageBoxW, MB_ICONERROR, MB_ICONEXCLAMATION, MB_ICONINFORMATION, MB_OK, MESSAGEBOX_STYLE,
};
use windows::core::{PCWSTR, w};

use crate::domain::outcome::SpinOutcome;
use crate::platform::windows::to_wstring;

/// Shows the result of a finished spin
pub fn show_outcome(owner: HWND, outcome: &SpinOutcome) {
    let (text, style) = outcome_message(outcome);
    show_message(owner, text, style);
}

/// Shows a blocking error box
pub fn show_error(owner: HWND, message: &str) {
    show_message(owner, message, MB_OK | MB_ICONERROR);
}

fn outcome_message(outcome: &SpinOutcome) -> (&'static str, MESSAGEBOX_STYLE) {
    match outcome {
        SpinOutcome::Win { .. } => ("You won!", MB_OK | MB_ICONEXCLAMATION),
        SpinOutcome::Lose { .. } => ("You lost", MB_OK | MB_ICONINFORMATION),
    }
}

fn show_message(owner: HWND, message: &str, style: MESSAGEBOX_STYLE) {
    let wide = to_wstring(message);
    unsafe {
        MessageBoxW(owner, PCWSTR(wide.as_ptr()), w!("Slot Machine"), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_uses_exclamation_icon() {
        let (text, style) = outcome_message(&SpinOutcome::Win { symbols: [2, 2, 2] });
        assert_eq!(text, "You won!");
        assert_eq!(style, MB_OK | MB_ICONEXCLAMATION);
    }

    #[test]
    fn loss_uses_information_icon() {
        let (text, style) = outcome_message(&SpinOutcome::Lose { symbols: [0, 1, 2] });
        assert_eq!(text, "You lost");
        assert_eq!(style, MB_OK | MB_ICONINFORMATION);
    }
}
