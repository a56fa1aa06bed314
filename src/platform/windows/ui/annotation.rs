//! Full-screen annotation layer.
//!
//! A layered popup covering the primary screen. While visible it holds an
//! [`InputCaptureGuard`], so every click lands on the canvas. Esc closes
//! it, Ctrl+Z / Ctrl+Y step through the stroke history.

use std::cell::RefCell;

use tracing::warn;
use windows::core::w;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{GetKeyState, SetCapture, VK_CONTROL, VK_ESCAPE};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, MK_LBUTTON, WM_CAPTURECHANGED, WM_KEYDOWN, WM_LBUTTONDOWN,
    WM_LBUTTONUP, WM_MOUSEMOVE, WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};

use super::layered::present_layered;
use super::{post_redraw, register_class, screen_size, WM_APP_REDRAW};
use crate::app::{AppContext, Tool};
use crate::platform::windows::app::with_app;
use crate::platform::windows::ffi::{hinstance, mouse_point};
use crate::platform::windows::input::InputCaptureGuard;

thread_local! {
    static WINDOW: RefCell<Option<HWND>> = const { RefCell::new(None) };
    static CAPTURE: RefCell<Option<InputCaptureGuard>> = const { RefCell::new(None) };
}

pub fn create() -> windows::core::Result<()> {
    register_class(w!("PodiumAnnotation"), Some(annotation_proc), None);
    let (width, height) = screen_size();
    let hwnd = unsafe {
        CreateWindowExW(
            WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_TOPMOST,
            w!("PodiumAnnotation"),
            w!("Podium annotation"),
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
    if !visible {
        release_capture();
        return;
    }
    let Some(hwnd) = window() else {
        warn!("annotation window not created");
        return;
    };
    let guard = InputCaptureGuard::acquire(hwnd);
    CAPTURE.with(|c| *c.borrow_mut() = Some(guard));
    post_redraw(Some(hwnd));
}

/// Drop the capture guard, hiding the layer and freeing the mouse.
pub fn release_capture() {
    // take first so the guard's Drop runs outside the borrow
    let guard = CAPTURE.with(|c| c.borrow_mut().take());
    drop(guard);
}

fn render(hwnd: HWND, ctx: &AppContext) {
    // alpha 1 keeps blank areas hit-testable
    present_layered(hwnd, (0, 0), ctx.annotation.image(), 1);
}

fn ctrl_down() -> bool {
    unsafe { GetKeyState(VK_CONTROL.0 as i32) < 0 }
}

extern "system" fn annotation_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let handled = match msg {
        WM_LBUTTONDOWN => with_app(|ctx| {
            ctx.annotation.begin_stroke(mouse_point(lparam));
            render(hwnd, ctx);
        }),
        WM_MOUSEMOVE if wparam.0 & MK_LBUTTON.0 as usize != 0 => with_app(|ctx| {
            ctx.annotation.extend_stroke(mouse_point(lparam));
            render(hwnd, ctx);
        }),
        WM_LBUTTONUP => with_app(|ctx| {
            ctx.annotation.end_stroke();
            render(hwnd, ctx);
        }),
        WM_KEYDOWN => {
            let key = wparam.0 as u16;
            with_app(|ctx| {
                if key == VK_ESCAPE.0 {
                    ctx.set_tool_visible(Tool::Annotation, false);
                } else if ctrl_down() && key == u16::from(b'Z') {
                    ctx.annotation.undo();
                    render(hwnd, ctx);
                } else if ctrl_down() && key == u16::from(b'Y') {
                    ctx.annotation.redo();
                    render(hwnd, ctx);
                }
            })
        }
        WM_CAPTURECHANGED => {
            // Another window took the mouse (e.g. Alt+Tab); reclaim it.
            let ours = CAPTURE.with(|c| c.try_borrow().map(|g| g.is_some()).unwrap_or(false));
            if ours && HWND(lparam.0 as *mut _) != hwnd {
                unsafe {
                    SetCapture(hwnd);
                }
            }
            Some(())
        }
        WM_APP_REDRAW => with_app(|ctx| render(hwnd, ctx)),
        _ => None,
    };

    match handled {
        Some(()) => LRESULT(0),
        None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}
