//! Small Win32 helpers shared by the platform modules.

pub mod com;

use windows::core::PCWSTR;
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::SetWindowTextW;

use crate::model::Point;
use crate::presentation::WindowId;

/// NUL-terminated UTF-16 copy of `s`.
pub fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Copy `s` into a fixed-size UTF-16 field, truncating so the last
/// element stays NUL.
pub fn copy_wide(dst: &mut [u16], s: &str) {
    let max = dst.len().saturating_sub(1);
    let mut n = 0;
    for (slot, c) in dst.iter_mut().zip(s.encode_utf16().take(max)) {
        *slot = c;
        n += 1;
    }
    if let Some(end) = dst.get_mut(n) {
        *end = 0;
    }
}

pub fn hinstance() -> HINSTANCE {
    unsafe { GetModuleHandleW(None).map(Into::into).unwrap_or_default() }
}

pub fn to_hwnd(id: WindowId) -> HWND {
    HWND(id.0 as *mut _)
}

pub fn window_id(hwnd: HWND) -> WindowId {
    WindowId(hwnd.0 as isize)
}

pub fn set_text(hwnd: HWND, text: &str) {
    let text = wide(text);
    unsafe {
        let _ = SetWindowTextW(hwnd, PCWSTR(text.as_ptr()));
    }
}

/// Control id (`LOWORD`) of a `WM_COMMAND`.
pub fn command_id(wparam: WPARAM) -> u32 {
    (wparam.0 & 0xFFFF) as u32
}

/// Notification code (`HIWORD`) of a `WM_COMMAND`.
pub fn command_code(wparam: WPARAM) -> u32 {
    ((wparam.0 >> 16) & 0xFFFF) as u32
}

/// Client coordinates packed in a mouse message.
pub fn mouse_point(lparam: LPARAM) -> Point {
    let x = (lparam.0 & 0xFFFF) as u16 as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as u16 as i16 as i32;
    Point::new(x, y)
}
