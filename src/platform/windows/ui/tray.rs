//! System tray (notification area) icon for Windows.
//!
//! Provides the tray icon, its context menu and balloon notifications.

use std::cell::RefCell;

use tracing::debug;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_INFO, NIF_MESSAGE, NIF_TIP, NIIF_INFO, NIM_ADD, NIM_DELETE,
    NIM_MODIFY, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, LoadIconW, SetForegroundWindow,
    TrackPopupMenu, HMENU, IDI_APPLICATION, MENU_ITEM_FLAGS,
    MF_CHECKED, MF_SEPARATOR, MF_STRING, MF_UNCHECKED, TPM_BOTTOMALIGN, TPM_LEFTALIGN,
    TPM_RIGHTBUTTON, WM_USER,
};

use crate::events::AppEvent;
use crate::model::ThemeMode;
use crate::platform::windows::ffi::{copy_wide, wide};

// Custom message for tray icon events
pub const WM_TRAYICON: u32 = WM_USER + 1;

// Menu item IDs
pub const MENU_AUTORUN: u32 = 1001;
pub const MENU_COMPAT: u32 = 1002;
pub const MENU_TIMER: u32 = 1003;
pub const MENU_THEME_AUTO: u32 = 1004;
pub const MENU_THEME_LIGHT: u32 = 1005;
pub const MENU_THEME_DARK: u32 = 1006;
pub const MENU_QUIT: u32 = 1007;

const TRAY_ICON_ID: u32 = 1;
const TOOLTIP: &str = "Podium";

thread_local! {
    static TRAY_HWND: RefCell<Option<HWND>> = const { RefCell::new(None) };
}

/// Check marks shown in the menu, read fresh each time it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub autorun: bool,
    pub compatibility_mode: bool,
    pub theme: ThemeMode,
}

fn icon_data(hwnd: HWND) -> NOTIFYICONDATAW {
    NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ICON_ID,
        ..Default::default()
    }
}

/// Install the system tray icon.
pub fn install_tray_icon(hwnd: HWND) {
    unsafe {
        TRAY_HWND.with(|h| *h.borrow_mut() = Some(hwnd));

        // No icon resource is embedded; use the stock application icon.
        let hicon = LoadIconW(None, IDI_APPLICATION).unwrap_or_default();

        let mut nid = NOTIFYICONDATAW {
            uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
            uCallbackMessage: WM_TRAYICON,
            hIcon: hicon,
            ..icon_data(hwnd)
        };
        copy_wide(&mut nid.szTip, TOOLTIP);

        let _ = Shell_NotifyIconW(NIM_ADD, &nid);
    }
}

/// Remove the tray icon.
pub fn remove_tray_icon() {
    TRAY_HWND.with(|h| {
        if let Some(hwnd) = h.borrow_mut().take() {
            unsafe {
                let _ = Shell_NotifyIconW(NIM_DELETE, &icon_data(hwnd));
            }
        }
    });
}

/// Non-blocking balloon notification from the tray icon.
pub fn show_balloon(title: &str, message: &str) {
    TRAY_HWND.with(|h| {
        let Some(hwnd) = *h.borrow() else {
            debug!(message, "no tray icon, dropping notification");
            return;
        };
        let mut nid = NOTIFYICONDATAW {
            uFlags: NIF_INFO,
            dwInfoFlags: NIIF_INFO,
            ..icon_data(hwnd)
        };
        copy_wide(&mut nid.szInfoTitle, title);
        copy_wide(&mut nid.szInfo, message);
        unsafe {
            let _ = Shell_NotifyIconW(NIM_MODIFY, &nid);
        }
    });
}

fn checked(on: bool) -> MENU_ITEM_FLAGS {
    MF_STRING | if on { MF_CHECKED } else { MF_UNCHECKED }
}

unsafe fn append(menu: HMENU, flags: MENU_ITEM_FLAGS, id: u32, label: &str) {
    let label = wide(label);
    let _ = AppendMenuW(menu, flags, id as usize, PCWSTR(label.as_ptr()));
}

/// Show the context menu at the cursor position.
pub fn show_tray_menu(hwnd: HWND, state: MenuState) {
    unsafe {
        let Ok(menu) = CreatePopupMenu() else {
            return;
        };
        append(menu, checked(state.autorun), MENU_AUTORUN, "Start on login");
        append(
            menu,
            checked(state.compatibility_mode),
            MENU_COMPAT,
            "Compatibility mode",
        );
        append(menu, MF_STRING, MENU_TIMER, "Timer");
        let _ = AppendMenuW(menu, MF_SEPARATOR, 0, None);
        append(
            menu,
            checked(state.theme == ThemeMode::Auto),
            MENU_THEME_AUTO,
            "Theme: follow system",
        );
        append(
            menu,
            checked(state.theme == ThemeMode::Light),
            MENU_THEME_LIGHT,
            "Theme: light",
        );
        append(
            menu,
            checked(state.theme == ThemeMode::Dark),
            MENU_THEME_DARK,
            "Theme: dark",
        );
        let _ = AppendMenuW(menu, MF_SEPARATOR, 0, None);
        let _ = AppendMenuW(menu, MF_STRING, MENU_QUIT as usize, w!("Exit"));

        let mut pt = POINT::default();
        let _ = GetCursorPos(&mut pt);

        // Required for menu to close when clicking outside
        let _ = SetForegroundWindow(hwnd);

        let _ = TrackPopupMenu(
            menu,
            TPM_BOTTOMALIGN | TPM_LEFTALIGN | TPM_RIGHTBUTTON,
            pt.x,
            pt.y,
            None,
            hwnd,
            None,
        );
        let _ = DestroyMenu(menu);
    }
}

/// The event for a tray menu command, given the state the menu showed.
pub fn menu_event(id: u32, state: MenuState) -> Option<AppEvent> {
    let event = match id {
        MENU_AUTORUN => AppEvent::SetAutorun(!state.autorun),
        MENU_COMPAT => AppEvent::SetCompatibilityMode(!state.compatibility_mode),
        MENU_TIMER => AppEvent::ToggleTimer,
        MENU_THEME_AUTO => AppEvent::SetTheme(ThemeMode::Auto),
        MENU_THEME_LIGHT => AppEvent::SetTheme(ThemeMode::Light),
        MENU_THEME_DARK => AppEvent::SetTheme(ThemeMode::Dark),
        MENU_QUIT => AppEvent::Quit,
        _ => return None,
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATE: MenuState = MenuState {
        autorun: true,
        compatibility_mode: false,
        theme: ThemeMode::Auto,
    };

    #[test]
    fn toggles_invert_the_shown_state() {
        assert_eq!(menu_event(MENU_AUTORUN, STATE), Some(AppEvent::SetAutorun(false)));
        assert_eq!(
            menu_event(MENU_COMPAT, STATE),
            Some(AppEvent::SetCompatibilityMode(true))
        );
    }

    #[test]
    fn unknown_ids_are_ignored() {
        assert_eq!(menu_event(42, STATE), None);
        assert_eq!(menu_event(MENU_QUIT, STATE), Some(AppEvent::Quit));
    }
}
