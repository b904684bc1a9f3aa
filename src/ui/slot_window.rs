//! Slot machine main window implemented with raw Win32 controls.
//!
//! The window owns the controller for its whole lifetime. The reel canvas
//! fills the client area above a strip holding the Pull button and the cycles
//! spinner. A spin is driven by a `WM_TIMER` that ticks the controller and
//! invalidates the canvas; `WM_PAINT` renders the current frame with tiny-skia
//! and blits it with `SetDIBitsToDevice`.

#![allow(unsafe_op_in_unsafe_fn)]

use std::ffi::c_void;
use std::sync::Once;
use std::time::Instant;

use rand::rngs::StdRng;
use windows::Win32::Foundation::{BOOL, GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, WIN32_ERROR, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, BI_RGB, BITMAPINFO, BITMAPINFOHEADER, COLOR_BTNFACE, DEFAULT_GUI_FONT, DIB_RGB_COLORS, EndPaint,
    GetStockObject, GetSysColorBrush, HDC, HFONT, InvalidateRect, PAINTSTRUCT, SetDIBitsToDevice,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Controls::*;
use windows::Win32::UI::HiDpi::{DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext};
use windows::Win32::UI::Input::KeyboardAndMouse::EnableWindow;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::{PCWSTR, w};

use crate::app::controller::{PullResult, SlotController, TickResult};
use crate::config::MachineConfig;
use crate::domain::core::Rect;
use crate::domain::outcome::SpinOutcome;
use crate::platform::dialogs;
use crate::platform::windows::{client_rect, rect_to_win32_rect, to_wstring};
use crate::ui::renderer::{ReelLayout, ReelRenderer};
use crate::ui::textures::{SymbolAtlas, TextureError};

const WINDOW_WIDTH: i32 = 640;
const WINDOW_HEIGHT: i32 = 360;
const CONTROL_STRIP_HEIGHT: i32 = 48;
const CONTROL_MARGIN: i32 = 12;

const ID_BTN_PULL: i32 = 1001;
const ID_EDIT_CYCLES: i32 = 1002;
const ID_SPIN_CYCLES: i32 = 1003;
const SPIN_TIMER_ID: usize = 1;
// Matches the Win32 ERROR_CLASS_ALREADY_EXISTS (1410) code.
const CLASS_ALREADY_EXISTS_ERR: WIN32_ERROR = WIN32_ERROR(1410);

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to register slot machine window class")]
    ClassRegistrationFailed,
    #[error("Failed to create slot machine window")]
    WindowCreationFailed,
    #[error("Windows API error: {0}")]
    Win32Error(String),
    #[error("Failed to start the spin timer")]
    TimerFailed,
}

/// Public entry point for the desktop application
pub struct SlotWindow;

impl SlotWindow {
    /// Creates the window and runs the message loop until it is closed
    pub fn run(config: &MachineConfig, controller: SlotController<StdRng>) -> Result<(), WindowError> {
        unsafe {
            // Must happen before any window exists; a second call fails harmlessly.
            if let Err(err) = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) {
                tracing::debug!(error = ?err, "DPI awareness already set");
            }
        }
        ensure_common_controls();

        let (atlas, texture_error) = match SymbolAtlas::load(&config.symbol_paths()) {
            Ok(atlas) => (atlas, None),
            Err(err) => {
                tracing::warn!(error = %err, "symbol textures unavailable, drawing placeholders");
                (SymbolAtlas::placeholder(config.symbol_count()), Some(err))
            }
        };

        tracing::info!(symbols = atlas.symbol_count(), degraded = atlas.is_degraded(), "symbol atlas ready");

        let state = WindowState::new(controller, atlas, config.tick_interval_ms);
        let state_ptr = Box::into_raw(Box::new(state));

        unsafe {
            if let Err(err) = create_main_window(state_ptr) {
                let _ = Box::from_raw(state_ptr);
                return Err(err);
            }
            let hwnd = (*state_ptr).hwnd;
            let _ = ShowWindow(hwnd, SW_SHOW);
            let _ = UpdateWindow(hwnd);

            if let Some(err) = texture_error {
                report_texture_error(hwnd, &err);
            }
        }

        tracing::info!("slot machine window open");
        run_message_loop();

        let _ = unsafe { Box::from_raw(state_ptr) };
        tracing::info!("slot machine window closed");
        Ok(())
    }
}

struct WindowState {
    hwnd: HWND,
    pull_button: HWND,
    cycles_label: HWND,
    cycles_edit: HWND,
    cycles_spinner: HWND,
    font: HFONT,
    controller: SlotController<StdRng>,
    atlas: SymbolAtlas,
    renderer: ReelRenderer,
    tick_interval_ms: u32,
}

impl WindowState {
    fn new(controller: SlotController<StdRng>, atlas: SymbolAtlas, tick_interval_ms: u32) -> Self {
        let font = unsafe { HFONT(GetStockObject(DEFAULT_GUI_FONT).0) };

        Self {
            hwnd: HWND(0),
            pull_button: HWND(0),
            cycles_label: HWND(0),
            cycles_edit: HWND(0),
            cycles_spinner: HWND(0),
            font,
            controller,
            atlas,
            renderer: ReelRenderer::new(),
            tick_interval_ms,
        }
    }
}

fn ensure_common_controls() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let icc = INITCOMMONCONTROLSEX {
            dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
            dwICC: ICC_UPDOWN_CLASS | ICC_STANDARD_CLASSES,
        };
        unsafe {
            InitCommonControlsEx(&icc);
        }
    });
}

fn create_main_window(state_ptr: *mut WindowState) -> Result<(), WindowError> {
    unsafe {
        let module = GetModuleHandleW(PCWSTR::null()).map_err(|e| WindowError::Win32Error(format!("{:?}", e)))?;
        let instance: HINSTANCE = module.into();

        register_window_class(instance)?;

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(WS_EX_CONTROLPARENT.0),
            w!("ReelspinSlotMachine"),
            w!("Slot Machine"),
            WS_OVERLAPPEDWINDOW | WS_CLIPCHILDREN,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
            None,
            None,
            instance,
            Some(state_ptr as *const c_void),
        );

        if hwnd.0 == 0 {
            return Err(WindowError::WindowCreationFailed);
        }

        (*state_ptr).hwnd = hwnd;
        Ok(())
    }
}

fn register_window_class(instance: HINSTANCE) -> Result<(), WindowError> {
    unsafe {
        let class_name = w!("ReelspinSlotMachine");
        let wnd_class = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(slot_wnd_proc),
            hInstance: instance,
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hbrBackground: GetSysColorBrush(COLOR_BTNFACE),
            lpszClassName: class_name,
            ..Default::default()
        };

        if RegisterClassW(&wnd_class) == 0 {
            match GetLastError() {
                Err(err) if err.code() == CLASS_ALREADY_EXISTS_ERR.to_hresult() => {}
                _ => return Err(WindowError::ClassRegistrationFailed),
            }
        }
    }

    Ok(())
}

unsafe extern "system" fn slot_wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match msg {
        WM_CREATE => {
            let createstruct = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, createstruct.lpCreateParams as isize);
            if let Some(state) = window_state_mut(hwnd) {
                state.hwnd = hwnd;
                state.build_controls();
            }
            LRESULT(0)
        }
        WM_SIZE => {
            if let Some(state) = window_state_mut(hwnd) {
                state.layout_controls();
                state.invalidate_canvas();
            }
            LRESULT(0)
        }
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(hwnd, &mut ps);
            if let Some(state) = window_state_mut(hwnd) {
                state.paint(hdc);
            }
            let _ = EndPaint(hwnd, &ps);
            LRESULT(0)
        }
        WM_COMMAND => {
            let result = match window_state_mut(hwnd) {
                Some(state) => state.handle_command(wparam),
                None => Ok(()),
            };
            if let Err(err) = result {
                dialogs::show_error(hwnd, &err.to_string());
            }
            LRESULT(0)
        }
        WM_NOTIFY => {
            if let Some(state) = window_state_mut(hwnd) {
                if state.handle_notify(lparam) {
                    return LRESULT(0);
                }
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        WM_TIMER => {
            let outcome = match window_state_mut(hwnd) {
                Some(state) if wparam.0 == SPIN_TIMER_ID => state.on_tick(),
                _ => None,
            };
            // The message box pumps timer and paint messages, so no state borrow is held here.
            if let Some(outcome) = outcome {
                dialogs::show_outcome(hwnd, &outcome);
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            let _ = KillTimer(hwnd, SPIN_TIMER_ID);
            if let Some(state) = window_state_mut(hwnd) {
                state.hwnd = HWND(0);
            }
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

fn run_message_loop() {
    let mut msg = MSG::default();
    loop {
        let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if result.0 == 0 {
            break;
        }
        if result.0 == -1 {
            tracing::error!("message loop failed");
            break;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

unsafe fn window_state_mut(hwnd: HWND) -> Option<&'static mut WindowState> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WindowState;
    if ptr.is_null() { None } else { Some(&mut *ptr) }
}

fn report_texture_error(owner: HWND, err: &TextureError) {
    dialogs::show_error(owner, &format!("Error loading textures: {}", err));
}

impl WindowState {
    fn build_controls(&mut self) {
        unsafe {
            let button_style = WS_CHILD.0 | WS_VISIBLE.0 | WS_TABSTOP.0 | (BS_DEFPUSHBUTTON as u32);
            self.pull_button = CreateWindowExW(
                WINDOW_EX_STYLE(0),
                w!("BUTTON"),
                w!("Pull"),
                WINDOW_STYLE(button_style),
                0,
                0,
                96,
                28,
                self.hwnd,
                HMENU(ID_BTN_PULL as isize),
                None,
                None,
            );
            apply_font(self.pull_button, self.font);
        }

        self.cycles_label = create_static(self.hwnd, self.font, "Cycles");
        self.cycles_edit = create_readonly_edit(self.hwnd, self.font, ID_EDIT_CYCLES);
        self.cycles_spinner = create_spinner(self.hwnd, ID_SPIN_CYCLES);

        let (min, max) = self.controller.cycle_bounds();
        unsafe {
            SendMessageW(
                self.cycles_spinner,
                UDM_SETRANGE32,
                WPARAM(min as usize),
                LPARAM(max as isize),
            );
        }
        self.refresh_cycles();
        self.layout_controls();
    }

    /// Places the controls inside the strip under the canvas
    fn layout_controls(&self) {
        let (_, strip) = client_rect(self.hwnd).split_bottom(CONTROL_STRIP_HEIGHT);
        let top = strip.y + (strip.h - 28) / 2;
        let mut x = strip.x + CONTROL_MARGIN;

        unsafe {
            let _ = MoveWindow(self.pull_button, x, top, 96, 28, true);
            x += 96 + CONTROL_MARGIN * 2;
            let _ = MoveWindow(self.cycles_label, x, top + 5, 48, 20, true);
            x += 48;
            let _ = MoveWindow(self.cycles_edit, x, top + 1, 56, 26, true);
            x += 56;
            let _ = MoveWindow(self.cycles_spinner, x, top + 1, 22, 26, true);
        }
    }

    fn canvas_rect(&self) -> Rect {
        let (canvas, _) = client_rect(self.hwnd).split_bottom(CONTROL_STRIP_HEIGHT);
        canvas
    }

    fn invalidate_canvas(&self) {
        let rect = rect_to_win32_rect(&self.canvas_rect());
        unsafe {
            let _ = InvalidateRect(self.hwnd, Some(&rect as *const _), false);
        }
    }

    fn paint(&self, hdc: HDC) {
        let canvas = self.canvas_rect();
        if canvas.is_empty() {
            return;
        }

        let layout = ReelLayout::from_frame(&self.controller.frame(), canvas);
        let pixmap = match self.renderer.render_layout(&layout, &self.atlas) {
            Ok(pixmap) => pixmap,
            Err(err) => {
                tracing::warn!(error = %err, "failed to render reels");
                return;
            }
        };

        let width = pixmap.width() as i32;
        let height = pixmap.height() as i32;
        let pixels = self.renderer.pixmap_to_bgra(&pixmap);

        let mut bitmap_info = BITMAPINFO::default();
        bitmap_info.bmiHeader = BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height, // top-down bitmap so we can copy directly
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        };

        unsafe {
            SetDIBitsToDevice(
                hdc,
                canvas.x,
                canvas.y,
                width as u32,
                height as u32,
                0,
                0,
                0,
                height as u32,
                pixels.as_ptr() as *const c_void,
                &bitmap_info,
                DIB_RGB_COLORS,
            );
        }
    }

    fn handle_command(&mut self, wparam: WPARAM) -> Result<(), WindowError> {
        let command_id = (wparam.0 & 0xFFFF) as i32;
        let notify_code = ((wparam.0 >> 16) & 0xFFFF) as u16;

        if command_id == ID_BTN_PULL && notify_code == BN_CLICKED as u16 {
            return self.pull();
        }
        Ok(())
    }

    fn handle_notify(&mut self, lparam: LPARAM) -> bool {
        unsafe {
            let header = &*(lparam.0 as *const NMHDR);

            if header.hwndFrom == self.cycles_spinner && header.code == UDN_DELTAPOS as u32 {
                let data = &mut *(lparam.0 as *mut NMUPDOWN);
                self.adjust_cycles(data);
                return true;
            }
        }

        false
    }

    fn adjust_cycles(&mut self, delta: &mut NMUPDOWN) {
        let requested = (self.controller.cycles() as i64 + delta.iDelta as i64).max(0);
        let value = self.controller.set_cycles(requested.min(u32::MAX as i64) as u32);
        tracing::debug!(cycles = value, "cycles changed");

        self.refresh_cycles();
        delta.iDelta = 0;
    }

    fn refresh_cycles(&self) {
        let value = self.controller.cycles();
        set_control_text(self.cycles_edit, &value.to_string());
        unsafe {
            SendMessageW(self.cycles_spinner, UDM_SETPOS32, WPARAM(0), LPARAM(value as isize));
        }
    }

    fn pull(&mut self) -> Result<(), WindowError> {
        match self.controller.pull(Instant::now()) {
            PullResult::Started { cycles } => {
                let started = unsafe { SetTimer(self.hwnd, SPIN_TIMER_ID, self.tick_interval_ms, None) };
                if started == 0 {
                    tracing::error!("failed to start spin timer");
                    self.controller.abort();
                    self.invalidate_canvas();
                    return Err(WindowError::TimerFailed);
                }
                self.sync_controls();
                tracing::info!(cycles, "spin started");
                Ok(())
            }
            PullResult::Ignored => Ok(()),
        }
    }

    /// Advances the spin; returns the outcome once the reels stop
    fn on_tick(&mut self) -> Option<SpinOutcome> {
        let result = self.controller.tick(Instant::now());
        self.invalidate_canvas();

        match result {
            TickResult::Stopped(outcome) => {
                unsafe {
                    let _ = KillTimer(self.hwnd, SPIN_TIMER_ID);
                }
                self.sync_controls();
                tracing::info!(symbols = ?outcome.symbols(), win = outcome.is_win(), "spin finished");
                Some(outcome)
            }
            TickResult::Rolling => None,
            TickResult::Idle => {
                // Stray tick after the spin already ended.
                unsafe {
                    let _ = KillTimer(self.hwnd, SPIN_TIMER_ID);
                }
                None
            }
        }
    }

    /// Controls are only usable while the reels are at rest
    fn sync_controls(&self) {
        let enabled = !self.controller.is_spinning();
        unsafe {
            for control in [self.pull_button, self.cycles_edit, self.cycles_spinner] {
                let _ = EnableWindow(control, BOOL::from(enabled));
            }
        }
    }
}

fn apply_font(hwnd: HWND, font: HFONT) {
    unsafe {
        SendMessageW(hwnd, WM_SETFONT, WPARAM(font.0 as usize), LPARAM(1));
    }
}

fn create_static(parent: HWND, font: HFONT, text: &str) -> HWND {
    unsafe {
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            w!("STATIC"),
            PCWSTR::null(),
            WS_CHILD | WS_VISIBLE,
            0,
            0,
            0,
            0,
            parent,
            None,
            None,
            None,
        );
        apply_font(hwnd, font);
        set_control_text(hwnd, text);
        hwnd
    }
}

fn create_readonly_edit(parent: HWND, font: HFONT, id: i32) -> HWND {
    unsafe {
        let style_bits =
            WS_CHILD.0 | WS_VISIBLE.0 | WS_BORDER.0 | WS_TABSTOP.0 | (ES_CENTER as u32) | (ES_READONLY as u32);
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            w!("EDIT"),
            PCWSTR::null(),
            WINDOW_STYLE(style_bits),
            0,
            0,
            0,
            0,
            parent,
            HMENU(id as isize),
            None,
            None,
        );
        apply_font(hwnd, font);
        hwnd
    }
}

fn create_spinner(parent: HWND, id: i32) -> HWND {
    unsafe {
        let style_bits = WS_CHILD.0 | WS_VISIBLE.0 | (UDS_ARROWKEYS as u32);
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            UPDOWN_CLASS,
            PCWSTR::null(),
            WINDOW_STYLE(style_bits),
            0,
            0,
            0,
            0,
            parent,
            HMENU(id as isize),
            None,
            None,
        )
    }
}

fn set_control_text(hwnd: HWND, text: &str) {
    let wide = to_wstring(text);
    unsafe {
        let _ = SetWindowTextW(hwnd, PCWSTR(wide.as_ptr()));
    }
}
