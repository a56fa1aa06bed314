//! Picture-in-picture sketch pad: a small, resizable, always-on-top
//! window with a white canvas.
//!
//! Right-click opens Undo / Redo / Clear; Ctrl+Z and Ctrl+Y work too.
//! Closing the window only hides it, the drawing is kept.

use std::cell::RefCell;

use tracing::warn;
use windows::core::w;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{BeginPaint, EndPaint, InvalidateRect, PAINTSTRUCT};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, ReleaseCapture, SetCapture, VK_CONTROL,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, AppendMenuW, CreatePopupMenu, CreateWindowExW, DefWindowProcW,
    DestroyMenu, GetClientRect, GetCursorPos, ShowWindow, TrackPopupMenu, CW_USEDEFAULT,
    MF_GRAYED, MF_STRING, MK_LBUTTON, SW_HIDE, SW_SHOWNORMAL, TPM_NONOTIFY, TPM_RETURNCMD,
    WM_CLOSE, WM_KEYDOWN, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WM_PAINT, WM_RBUTTONUP,
    WM_SIZE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_OVERLAPPEDWINDOW,
};

use super::layered::blit;
use super::{post_redraw, register_class, WM_APP_REDRAW};
use crate::app::{AppContext, Tool};
use crate::model::SKETCH_PAD_SIZE;
use crate::platform::windows::app::with_app;
use crate::platform::windows::ffi::{hinstance, mouse_point};

const MENU_UNDO: usize = 1;
const MENU_REDO: usize = 2;
const MENU_CLEAR: usize = 3;

thread_local! {
    static WINDOW: RefCell<Option<HWND>> = const { RefCell::new(None) };
}

pub fn create() -> windows::core::Result<()> {
    register_class(w!("PodiumSketchPad"), Some(sketch_proc), None);
    let ex_style = WS_EX_TOOLWINDOW | WS_EX_TOPMOST;
    let (width, height) = SKETCH_PAD_SIZE;
    let mut frame = RECT {
        left: 0,
        top: 0,
        right: width as i32,
        bottom: height as i32,
    };
    let hwnd = unsafe {
        let _ = AdjustWindowRectEx(&mut frame, WS_OVERLAPPEDWINDOW, false, ex_style);
        CreateWindowExW(
            ex_style,
            w!("PodiumSketchPad"),
            w!("Sketch pad"),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            frame.right - frame.left,
            frame.bottom - frame.top,
            None,
            None,
            Some(hinstance()),
            None,
        )?
    };
    WINDOW.with(|w| *w.borrow_mut() = Some(hwnd));
    Ok(())
}

pub fn set_visible(visible: bool) {
    let Some(hwnd) = WINDOW.with(|w| *w.borrow()) else {
        warn!("sketch pad window not created");
        return;
    };
    unsafe {
        let _ = ShowWindow(hwnd, if visible { SW_SHOWNORMAL } else { SW_HIDE });
    }
    if visible {
        post_redraw(Some(hwnd));
    }
}

fn invalidate(hwnd: HWND) {
    unsafe {
        let _ = InvalidateRect(Some(hwnd), None, false);
    }
}

/// Match the canvas to the client area.
fn sync_size(hwnd: HWND, ctx: &mut AppContext) {
    let mut rect = RECT::default();
    unsafe {
        let _ = GetClientRect(hwnd, &mut rect);
    }
    let (w, h) = ((rect.right - rect.left) as u32, (rect.bottom - rect.top) as u32);
    if w > 0 && h > 0 && (w, h) != (ctx.sketch.width(), ctx.sketch.height()) {
        ctx.sketch.resize(w, h);
    }
}

fn context_menu(hwnd: HWND, can_undo: bool, can_redo: bool) -> Option<usize> {
    unsafe {
        let menu = CreatePopupMenu().ok()?;
        let grayed = |enabled: bool| if enabled { MF_STRING } else { MF_STRING | MF_GRAYED };
        let _ = AppendMenuW(menu, grayed(can_undo), MENU_UNDO, w!("Undo\tCtrl+Z"));
        let _ = AppendMenuW(menu, grayed(can_redo), MENU_REDO, w!("Redo\tCtrl+Y"));
        let _ = AppendMenuW(menu, MF_STRING, MENU_CLEAR, w!("Clear"));
        let mut pt = POINT::default();
        let _ = GetCursorPos(&mut pt);
        let cmd = TrackPopupMenu(
            menu,
            TPM_RETURNCMD | TPM_NONOTIFY,
            pt.x,
            pt.y,
            None,
            hwnd,
            None,
        );
        let _ = DestroyMenu(menu);
        (cmd.0 > 0).then_some(cmd.0 as usize)
    }
}

extern "system" fn sketch_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let handled = match msg {
        WM_PAINT => unsafe {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(hwnd, &mut ps);
            if with_app(|ctx| blit(hdc, 0, 0, ctx.sketch.image())).is_none() {
                post_redraw(Some(hwnd));
            }
            let _ = EndPaint(hwnd, &ps);
            Some(())
        },
        WM_SIZE => {
            if with_app(|ctx| sync_size(hwnd, ctx)).is_none() {
                post_redraw(Some(hwnd));
            }
            invalidate(hwnd);
            Some(())
        }
        WM_LBUTTONDOWN => with_app(|ctx| {
            unsafe { SetCapture(hwnd) };
            ctx.sketch.begin_stroke(mouse_point(lparam));
            invalidate(hwnd);
        }),
        WM_MOUSEMOVE if wparam.0 & MK_LBUTTON.0 as usize != 0 => with_app(|ctx| {
            ctx.sketch.extend_stroke(mouse_point(lparam));
            invalidate(hwnd);
        }),
        WM_LBUTTONUP => with_app(|ctx| {
            let _ = unsafe { ReleaseCapture() };
            ctx.sketch.end_stroke();
            invalidate(hwnd);
        }),
        WM_RBUTTONUP => {
            let history = with_app(|ctx| {
                let history = ctx.sketch.history();
                (history.can_undo(), history.can_redo())
            });
            if let Some((can_undo, can_redo)) = history {
                if let Some(cmd) = context_menu(hwnd, can_undo, can_redo) {
                    with_app(|ctx| match cmd {
                        MENU_UNDO => ctx.sketch.undo(),
                        MENU_REDO => ctx.sketch.redo(),
                        MENU_CLEAR => ctx.sketch.clear(),
                        _ => {}
                    });
                    invalidate(hwnd);
                }
            }
            Some(())
        }
        WM_KEYDOWN => {
            let ctrl = unsafe { GetKeyState(VK_CONTROL.0 as i32) } < 0;
            let key = wparam.0 as u16;
            if ctrl && (key == u16::from(b'Z') || key == u16::from(b'Y')) {
                with_app(|ctx| {
                    if key == u16::from(b'Z') {
                        ctx.sketch.undo();
                    } else {
                        ctx.sketch.redo();
                    }
                });
                invalidate(hwnd);
                Some(())
            } else {
                None
            }
        }
        WM_CLOSE => {
            with_app(|ctx| ctx.set_tool_visible(Tool::SketchPad, false));
            Some(())
        }
        WM_APP_REDRAW => {
            with_app(|ctx| sync_size(hwnd, ctx));
            invalidate(hwnd);
            Some(())
        }
        _ => None,
    };

    match handled {
        Some(()) => LRESULT(0),
        None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}
