//! Spotlight window: a layered full-screen dimmer with a draggable
//! clear rectangle.

use std::cell::RefCell;

use tracing::warn;
use windows::core::w;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture, VK_ESCAPE};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, SetForegroundWindow, ShowWindow, MK_LBUTTON, SW_HIDE,
    SW_SHOW, WM_KEYDOWN, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WM_RBUTTONUP,
    WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};

use super::layered::present_layered;
use super::{post_redraw, register_class, screen_size, WM_APP_REDRAW};
use crate::app::{AppContext, Tool};
use crate::platform::windows::app::with_app;
use crate::platform::windows::ffi::{hinstance, mouse_point};

thread_local! {
    static WINDOW: RefCell<Option<HWND>> = const { RefCell::new(None) };
}

pub fn create() -> windows::core::Result<()> {
    register_class(w!("PodiumSpotlight"), Some(spotlight_proc), None);
    let (width, height) = screen_size();
    let hwnd = unsafe {
        CreateWindowExW(
            WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_TOPMOST,
            w!("PodiumSpotlight"),
            w!("Podium spotlight"),
            WS_POPUP,
            0,
            0,
            width,
            height,
            None,
            None,
            Some(hinstance()),
            None,
        )?
    };
    WINDOW.with(|w| *w.borrow_mut() = Some(hwnd));
    Ok(())
}

fn window() -> Option<HWND> {
    WINDOW.with(|w| *w.borrow())
}

pub fn set_visible(visible: bool) {
    let Some(hwnd) = window() else {
        warn!("spotlight window not created");
        return;
    };
    unsafe {
        if visible {
            let _ = ShowWindow(hwnd, SW_SHOW);
            // keyboard focus for Esc
            let _ = SetForegroundWindow(hwnd);
        } else {
            let _ = ShowWindow(hwnd, SW_HIDE);
        }
    }
    if visible {
        post_redraw(Some(hwnd));
    }
}

/// Re-render after a theme change.
pub fn request_redraw() {
    post_redraw(window());
}

fn render(hwnd: HWND, ctx: &AppContext) {
    let (width, height) = screen_size();
    let frame = ctx.spotlight.render(width.max(1) as u32, height.max(1) as u32);
    present_layered(hwnd, (0, 0), &frame, 1);
}

extern "system" fn spotlight_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let handled = match msg {
        WM_LBUTTONDOWN => with_app(|ctx| {
            let at = mouse_point(lparam);
            if ctx.spotlight.hits_close_button(at) {
                ctx.set_tool_visible(Tool::Spotlight, false);
                return;
            }
            unsafe { SetCapture(hwnd) };
            ctx.spotlight.begin(at);
            render(hwnd, ctx);
        }),
        WM_MOUSEMOVE if wparam.0 & MK_LBUTTON.0 as usize != 0 => with_app(|ctx| {
            if ctx.spotlight.is_selecting() {
                ctx.spotlight.drag(mouse_point(lparam));
                render(hwnd, ctx);
            }
        }),
        WM_LBUTTONUP => with_app(|ctx| {
            let _ = unsafe { ReleaseCapture() };
            ctx.spotlight.release();
            render(hwnd, ctx);
        }),
        WM_RBUTTONUP => with_app(|ctx| ctx.set_tool_visible(Tool::Spotlight, false)),
        WM_KEYDOWN if wparam.0 as u16 == VK_ESCAPE.0 => {
            with_app(|ctx| ctx.set_tool_visible(Tool::Spotlight, false))
        }
        WM_APP_REDRAW => with_app(|ctx| {
            if ctx.is_visible(Tool::Spotlight) {
                render(hwnd, ctx);
            }
        }),
        _ => None,
    };

    match handled {
        Some(()) => LRESULT(0),
        None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}
