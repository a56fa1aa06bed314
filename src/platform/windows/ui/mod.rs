//! Windows UI: tray icon, overlay widgets and tool windows.

pub mod annotation;
pub mod layered;
pub mod menus;
pub mod sketch;
pub mod spotlight;
pub mod timer;
pub mod tray;
pub mod widgets;

use windows::core::PCWSTR;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::HBRUSH;
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, LoadCursorW, PostMessageW, RegisterClassW, CS_HREDRAW, CS_VREDRAW,
    IDC_ARROW, SM_CXSCREEN, SM_CYSCREEN, WM_APP, WNDCLASSW, WNDPROC,
};

use super::ffi::hinstance;

/// Posted to a tool window to re-render from the app context once the
/// current handler has released it.
pub const WM_APP_REDRAW: u32 = WM_APP + 1;

/// Register a window class. Re-registering an existing class is harmless.
pub fn register_class(name: PCWSTR, proc: WNDPROC, background: Option<HBRUSH>) {
    unsafe {
        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: proc,
            hInstance: hinstance(),
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hbrBackground: background.unwrap_or_default(),
            lpszClassName: name,
            ..Default::default()
        };
        RegisterClassW(&wc);
    }
}

/// Primary monitor size in pixels.
pub fn screen_size() -> (i32, i32) {
    unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
}

pub(crate) fn post_redraw(hwnd: Option<HWND>) {
    if let Some(hwnd) = hwnd {
        unsafe {
            let _ = PostMessageW(Some(hwnd), WM_APP_REDRAW, Default::default(), Default::default());
        }
    }
}
