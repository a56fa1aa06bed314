//! Exclusive pointer capture for the full-screen annotation layer.

use tracing::debug;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture, SetFocus};
use windows::Win32::UI::WindowsAndMessaging::{
    SetForegroundWindow, SetWindowPos, ShowWindow, HWND_NOTOPMOST, HWND_TOPMOST, SWP_NOMOVE,
    SWP_NOSIZE, SW_HIDE, SW_SHOW,
};

/// While alive, `hwnd` is shown topmost, focused and owns the mouse.
/// Dropping it gives everything back and hides the window, so an early
/// return or a panic can never leave the desktop unclickable.
pub struct InputCaptureGuard {
    hwnd: HWND,
}

impl InputCaptureGuard {
    pub fn acquire(hwnd: HWND) -> Self {
        debug!("annotation capture acquired");
        unsafe {
            let _ = SetWindowPos(
                hwnd,
                Some(HWND_TOPMOST),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE,
            );
            let _ = ShowWindow(hwnd, SW_SHOW);
            let _ = SetForegroundWindow(hwnd);
            let _ = SetFocus(Some(hwnd));
            SetCapture(hwnd);
        }
        Self { hwnd }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }
}

impl Drop for InputCaptureGuard {
    fn drop(&mut self) {
        debug!("annotation capture released");
        unsafe {
            let _ = ReleaseCapture();
            let _ = SetWindowPos(
                self.hwnd,
                Some(HWND_NOTOPMOST),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE,
            );
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }
}
