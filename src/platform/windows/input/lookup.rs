//! Top-level window enumeration.

use tracing::{debug, trace};
use windows::core::BOOL;
use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetClassNameW, GetWindowTextW, IsIconic, IsWindow, IsWindowVisible,
    SetForegroundWindow, ShowWindow, SW_RESTORE,
};

use crate::error::{DriverError, DriverResult};
use crate::platform::windows::ffi::{to_hwnd, window_id};
use crate::presentation::{is_slideshow_window, WindowId, WindowLocator};

struct Search {
    found: Option<HWND>,
}

unsafe extern "system" fn enum_cb(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let search = &mut *(lparam.0 as *mut Search);
    if !IsWindowVisible(hwnd).as_bool() {
        return BOOL(1);
    }

    let mut buf = [0u16; 512];
    let len = GetWindowTextW(hwnd, &mut buf);
    let title = String::from_utf16_lossy(&buf[..len.max(0) as usize]);
    let len = GetClassNameW(hwnd, &mut buf);
    let class_name = String::from_utf16_lossy(&buf[..len.max(0) as usize]);

    if is_slideshow_window(&title, &class_name) {
        trace!(%title, %class_name, "slideshow window");
        search.found = Some(hwnd);
        return BOOL(0);
    }
    BOOL(1)
}

/// Restore a window if minimised and bring it to the foreground.
pub fn activate_window(window: WindowId) -> DriverResult<()> {
    let hwnd = to_hwnd(window);
    unsafe {
        if !IsWindow(Some(hwnd)).as_bool() {
            return Err(DriverError::WindowNotFound);
        }
        if IsIconic(hwnd).as_bool() {
            let _ = ShowWindow(hwnd, SW_RESTORE);
        }
        if !SetForegroundWindow(hwnd).as_bool() {
            return Err(DriverError::call("SetForegroundWindow", "focus refused"));
        }
    }
    Ok(())
}

/// Finds the slideshow window by title and class keywords.
#[derive(Default)]
pub struct Win32WindowLocator;

impl WindowLocator for Win32WindowLocator {
    fn find_slideshow_window(&mut self) -> DriverResult<WindowId> {
        let mut search = Search { found: None };
        unsafe {
            // Stopping early makes EnumWindows report an error; the result
            // is in `search` either way.
            let _ = EnumWindows(Some(enum_cb), LPARAM(&mut search as *mut Search as isize));
        }
        match search.found {
            Some(hwnd) => Ok(window_id(hwnd)),
            None => {
                debug!("no slideshow window");
                Err(DriverError::WindowNotFound)
            }
        }
    }

    fn activate(&mut self, window: WindowId) -> DriverResult<()> {
        activate_window(window)
    }
}
