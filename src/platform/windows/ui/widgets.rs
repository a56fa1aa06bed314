//! Floating overlay widgets: the toolbar and the two navigation pads.
//!
//! All three are `WS_EX_NOACTIVATE` popups so clicking them never takes
//! focus from the slideshow window, which the keystroke back end relies
//! on. Buttons only publish [`AppEvent`]s; the dispatcher does the work.

use std::cell::RefCell;

use tracing::warn;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateSolidBrush, DeleteObject, FillRect, GetStockObject, InvalidateRect, SetBkMode,
    SetTextColor, DEFAULT_GUI_FONT, HBRUSH, HDC, TRANSPARENT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, GetClientRect, GetDlgItem, SendMessageW, SetWindowPos,
    ShowWindow, HMENU, HWND_TOPMOST, SWP_NOACTIVATE, SW_HIDE, SW_SHOWNOACTIVATE,
    WINDOW_STYLE, WM_COMMAND, WM_CTLCOLORSTATIC, WM_ERASEBKGND, WM_SETFONT, WS_BORDER,
    WS_CHILD, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_GROUP, WS_POPUP, WS_VISIBLE,
};

use super::{menus, register_class, screen_size};
use crate::events::{self, AppEvent};
use crate::model::Rect;
use crate::platform::windows::app::with_app;
use crate::platform::windows::ffi::{command_code, command_id, hinstance, set_text, wide};
use crate::poller::{OverlayWidgets, WidgetLayout};
use crate::presentation::PointerMode;
use crate::thumbnails::ThumbnailCache;

// Toolbar control IDs
const ID_ARROW: u32 = 201;
const ID_PEN: u32 = 202;
const ID_ERASER: u32 = 203;
const ID_COLOR: u32 = 204;
const ID_CLEAR: u32 = 205;
const ID_SPOTLIGHT: u32 = 206;
const ID_SKETCH: u32 = 207;
const ID_ANNOTATE: u32 = 208;
const ID_TIMER: u32 = 209;
const ID_END: u32 = 210;

// Navigation control IDs
const ID_PREV: u32 = 301;
const ID_PAGE: u32 = 302;
const ID_NEXT: u32 = 303;

// Button styles and messages
const BS_AUTORADIOBUTTON: u32 = 0x0009;
const BS_PUSHLIKE: u32 = 0x1000;
const BM_SETCHECK: u32 = 0x00F1;
const SS_CENTER: u32 = 0x0001;
const SS_NOTIFY: u32 = 0x0100;
const SS_CENTERIMAGE: u32 = 0x0200;
const STN_CLICKED: u32 = 0;

// Layout
const PAD: i32 = 6;
const BUTTON_W: i32 = 64;
const BUTTON_H: i32 = 32;
const NAV_BUTTON_W: i32 = 40;
const PAGE_W: i32 = 72;

const TOOLBAR_BUTTONS: [(u32, &str); 10] = [
    (ID_ARROW, "Arrow"),
    (ID_PEN, "Pen"),
    (ID_ERASER, "Eraser"),
    (ID_COLOR, "Color"),
    (ID_CLEAR, "Clear"),
    (ID_SPOTLIGHT, "Spotlight"),
    (ID_SKETCH, "Sketch"),
    (ID_ANNOTATE, "Annotate"),
    (ID_TIMER, "Timer"),
    (ID_END, "End"),
];

/// Width and height of the toolbar window.
pub const TOOLBAR_SIZE: (i32, i32) = (
    TOOLBAR_BUTTONS.len() as i32 * (BUTTON_W + PAD) + PAD,
    BUTTON_H + 2 * PAD,
);

/// Width and height of each navigation pad.
pub const NAV_SIZE: (i32, i32) = (2 * NAV_BUTTON_W + PAGE_W + 4 * PAD, BUTTON_H + 2 * PAD);

struct WidgetWindows {
    toolbar: HWND,
    nav_left: HWND,
    nav_right: HWND,
}

impl WidgetWindows {
    fn all(&self) -> [HWND; 3] {
        [self.toolbar, self.nav_left, self.nav_right]
    }
}

struct Theme {
    dark: bool,
    brush: HBRUSH,
}

thread_local! {
    static WINDOWS: RefCell<Option<WidgetWindows>> = const { RefCell::new(None) };
    static THEME: RefCell<Option<Theme>> = const { RefCell::new(None) };
}

/// Background and text colours for the widget theme.
pub(super) fn colors(dark: bool) -> (COLORREF, COLORREF) {
    if dark {
        (COLORREF(0x0030_3030), COLORREF(0x00F0_F0F0))
    } else {
        (COLORREF(0x00F3_F3F3), COLORREF(0x0020_2020))
    }
}

/// The event a plain toolbar button publishes.
fn toolbar_event(id: u32) -> Option<AppEvent> {
    let event = match id {
        ID_ARROW => AppEvent::SetPointerMode(PointerMode::Arrow),
        ID_PEN => AppEvent::SetPointerMode(PointerMode::Pen),
        ID_ERASER => AppEvent::SetPointerMode(PointerMode::Eraser),
        ID_CLEAR => AppEvent::ClearInk,
        ID_SPOTLIGHT => AppEvent::ToggleSpotlight,
        ID_SKETCH => AppEvent::ToggleSketchPad,
        ID_ANNOTATE => AppEvent::ToggleAnnotation,
        ID_TIMER => AppEvent::ToggleTimer,
        ID_END => AppEvent::ExitSlideShow,
        _ => return None,
    };
    Some(event)
}

fn nav_event(id: u32) -> Option<AppEvent> {
    match id {
        ID_PREV => Some(AppEvent::PreviousSlide),
        ID_NEXT => Some(AppEvent::NextSlide),
        _ => None,
    }
}

fn page_label(current: u32, total: u32) -> String {
    format!("{current} / {total}")
}

fn mode_button(mode: PointerMode) -> u32 {
    match mode {
        PointerMode::Arrow => ID_ARROW,
        PointerMode::Pen => ID_PEN,
        PointerMode::Eraser => ID_ERASER,
    }
}

// ===================== Creation =====================

unsafe fn create_child(
    parent: HWND,
    class: PCWSTR,
    text: &str,
    style: u32,
    id: u32,
    x: i32,
    width: i32,
) -> Option<HWND> {
    let text = wide(text);
    let hwnd = CreateWindowExW(
        Default::default(),
        class,
        PCWSTR(text.as_ptr()),
        WS_CHILD | WS_VISIBLE | WINDOW_STYLE(style),
        x,
        PAD,
        width,
        BUTTON_H,
        Some(parent),
        Some(HMENU(id as usize as *mut _)),
        Some(hinstance()),
        None,
    )
    .ok()?;
    let font = GetStockObject(DEFAULT_GUI_FONT);
    SendMessageW(hwnd, WM_SETFONT, Some(WPARAM(font.0 as usize)), Some(LPARAM(1)));
    Some(hwnd)
}

unsafe fn create_popup(class: PCWSTR, title: PCWSTR, size: (i32, i32)) -> windows::core::Result<HWND> {
    CreateWindowExW(
        WS_EX_TOOLWINDOW | WS_EX_TOPMOST | WS_EX_NOACTIVATE,
        class,
        title,
        WS_POPUP | WS_BORDER,
        0,
        0,
        size.0,
        size.1,
        None,
        None,
        Some(hinstance()),
        None,
    )
}

unsafe fn create_toolbar() -> windows::core::Result<HWND> {
    let hwnd = create_popup(w!("PodiumToolbar"), w!("Podium toolbar"), TOOLBAR_SIZE)?;
    let mut x = PAD;
    for (id, label) in TOOLBAR_BUTTONS {
        let style = match id {
            ID_ARROW => BS_AUTORADIOBUTTON | BS_PUSHLIKE | WS_GROUP.0,
            ID_PEN | ID_ERASER => BS_AUTORADIOBUTTON | BS_PUSHLIKE,
            ID_COLOR => WS_GROUP.0,
            _ => 0,
        };
        create_child(hwnd, w!("BUTTON"), label, style, id, x, BUTTON_W);
        x += BUTTON_W + PAD;
    }
    Ok(hwnd)
}

unsafe fn create_nav(title: PCWSTR) -> windows::core::Result<HWND> {
    let hwnd = create_popup(w!("PodiumNav"), title, NAV_SIZE)?;
    let mut x = PAD;
    create_child(hwnd, w!("BUTTON"), "<", 0, ID_PREV, x, NAV_BUTTON_W);
    x += NAV_BUTTON_W + PAD;
    create_child(
        hwnd,
        w!("STATIC"),
        "- / -",
        SS_CENTER | SS_CENTERIMAGE | SS_NOTIFY,
        ID_PAGE,
        x,
        PAGE_W,
    );
    x += PAGE_W + PAD;
    create_child(hwnd, w!("BUTTON"), ">", 0, ID_NEXT, x, NAV_BUTTON_W);
    Ok(hwnd)
}

/// Register the widget classes and create the (hidden) windows.
pub fn create_widgets(dark: bool) -> windows::core::Result<()> {
    register_class(w!("PodiumToolbar"), Some(toolbar_proc), None);
    register_class(w!("PodiumNav"), Some(nav_proc), None);
    unsafe {
        let widgets = WidgetWindows {
            toolbar: create_toolbar()?,
            nav_left: create_nav(w!("Podium navigation (left)"))?,
            nav_right: create_nav(w!("Podium navigation (right)"))?,
        };
        WINDOWS.with(|w| *w.borrow_mut() = Some(widgets));
    }
    apply_theme(dark);
    Ok(())
}

fn with_windows(f: impl FnOnce(&WidgetWindows)) {
    WINDOWS.with(|w| {
        if let Some(windows) = w.borrow().as_ref() {
            f(windows);
        }
    });
}

/// Switch widget colours and repaint.
pub fn apply_theme(dark: bool) {
    let (background, _) = colors(dark);
    let brush = unsafe { CreateSolidBrush(background) };
    THEME.with(|t| {
        if let Some(old) = t.borrow_mut().replace(Theme { dark, brush }) {
            unsafe {
                let _ = DeleteObject(old.brush.into());
            }
        }
    });
    with_windows(|w| {
        for hwnd in w.all() {
            unsafe {
                let _ = InvalidateRect(Some(hwnd), None, true);
            }
        }
    });
}

fn place(hwnd: HWND, rect: Rect) {
    unsafe {
        let _ = SetWindowPos(
            hwnd,
            Some(HWND_TOPMOST),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            SWP_NOACTIVATE,
        );
    }
}

// ===================== Window procedures =====================

unsafe fn paint_background(hwnd: HWND, hdc: HDC) -> bool {
    THEME.with(|t| match t.borrow().as_ref() {
        Some(theme) => {
            let mut rect = RECT::default();
            let _ = GetClientRect(hwnd, &mut rect);
            FillRect(hdc, &rect, theme.brush);
            true
        }
        None => false,
    })
}

unsafe fn color_static(hdc: HDC) -> Option<LRESULT> {
    THEME.with(|t| {
        t.borrow().as_ref().map(|theme| {
            let (_, text) = colors(theme.dark);
            SetTextColor(hdc, text);
            SetBkMode(hdc, TRANSPARENT);
            LRESULT(theme.brush.0 as isize)
        })
    })
}

/// Messages shared by both widget kinds. `None` means "not handled".
unsafe fn common_message(hwnd: HWND, msg: u32, wparam: WPARAM) -> Option<LRESULT> {
    match msg {
        WM_ERASEBKGND => {
            let hdc = HDC(wparam.0 as *mut _);
            paint_background(hwnd, hdc).then_some(LRESULT(1))
        }
        WM_CTLCOLORSTATIC => color_static(HDC(wparam.0 as *mut _)),
        _ => None,
    }
}

extern "system" fn toolbar_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        if let Some(result) = common_message(hwnd, msg, wparam) {
            return result;
        }
        if msg == WM_COMMAND {
            match command_id(wparam) {
                ID_COLOR => {
                    let current = with_app(|ctx| ctx.annotation.pen_color());
                    if let Some(color) = menus::pick_pen_color(hwnd, current) {
                        events::publish(AppEvent::SetPenColor(color));
                    }
                }
                id => {
                    if let Some(event) = toolbar_event(id) {
                        events::publish(event);
                    }
                }
            }
            return LRESULT(0);
        }
        DefWindowProcW(hwnd, msg, wparam, lparam)
    }
}

fn open_slide_picker(hwnd: HWND) {
    let info = with_app(|ctx| {
        let session = ctx.poller.session();
        (
            session.total_slides,
            session.current_slide,
            ctx.poller.ready_thumbnail_key().map(str::to_owned),
        )
    });
    let Some((total, current, key)) = info else {
        return;
    };
    let thumbnails = key
        .map(|key| ThumbnailCache::open_default().list(&key))
        .unwrap_or_default();
    if let Some(index) = menus::pick_slide(hwnd, total, current, &thumbnails) {
        events::publish(AppEvent::GotoSlide(index));
    }
}

extern "system" fn nav_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        if let Some(result) = common_message(hwnd, msg, wparam) {
            return result;
        }
        if msg == WM_COMMAND {
            let id = command_id(wparam);
            if id == ID_PAGE && command_code(wparam) == STN_CLICKED {
                open_slide_picker(hwnd);
            } else if let Some(event) = nav_event(id) {
                events::publish(event);
            }
            return LRESULT(0);
        }
        DefWindowProcW(hwnd, msg, wparam, lparam)
    }
}

// ===================== OverlayWidgets =====================

/// [`OverlayWidgets`] over the windows made by [`create_widgets`].
pub struct Win32Widgets;

impl OverlayWidgets for Win32Widgets {
    fn show(&mut self) {
        with_windows(|w| {
            for hwnd in w.all() {
                unsafe {
                    let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
                }
            }
        });
    }

    fn hide(&mut self) {
        with_windows(|w| {
            for hwnd in w.all() {
                unsafe {
                    let _ = ShowWindow(hwnd, SW_HIDE);
                }
            }
        });
    }

    fn layout(&mut self) {
        let layout = WidgetLayout::compute(screen_size(), TOOLBAR_SIZE, NAV_SIZE);
        with_windows(|w| {
            place(w.toolbar, layout.toolbar);
            place(w.nav_left, layout.nav_left);
            place(w.nav_right, layout.nav_right);
        });
    }

    fn update_page(&mut self, current: u32, total: u32) {
        let text = page_label(current, total);
        with_windows(|w| {
            for nav in [w.nav_left, w.nav_right] {
                match unsafe { GetDlgItem(Some(nav), ID_PAGE as i32) } {
                    Ok(label) => set_text(label, &text),
                    Err(e) => warn!(error = %e, "page label missing"),
                }
            }
        });
    }

    fn set_pointer_mode(&mut self, mode: PointerMode) {
        let active = mode_button(mode);
        with_windows(|w| {
            for id in [ID_ARROW, ID_PEN, ID_ERASER] {
                if let Ok(button) = unsafe { GetDlgItem(Some(w.toolbar), id as i32) } {
                    let checked = usize::from(id == active);
                    unsafe {
                        SendMessageW(button, BM_SETCHECK, Some(WPARAM(checked)), None);
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_buttons_publish_pointer_changes() {
        assert_eq!(
            toolbar_event(ID_ERASER),
            Some(AppEvent::SetPointerMode(PointerMode::Eraser))
        );
        assert_eq!(toolbar_event(ID_COLOR), None);
        assert_eq!(mode_button(PointerMode::Pen), ID_PEN);
    }

    #[test]
    fn nav_buttons_step_slides() {
        assert_eq!(nav_event(ID_PREV), Some(AppEvent::PreviousSlide));
        assert_eq!(nav_event(ID_PAGE), None);
        assert_eq!(page_label(3, 20), "3 / 20");
    }
}
