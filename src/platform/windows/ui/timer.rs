//! Timer window: stopwatch or countdown with a large readout.
//!
//! A one-second `SetTimer` on this window ticks both models, so a hidden
//! timer keeps counting. The countdown beeps and flashes the window once
//! when it reaches zero.

use std::cell::{Cell, RefCell};

use tracing::{info, warn};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateFontIndirectW, CreateSolidBrush, DeleteObject, FillRect, GetStockObject, InvalidateRect,
    SetBkMode, SetTextColor, DEFAULT_GUI_FONT, FW_BOLD, HBRUSH, HDC, HFONT, LOGFONTW, TRANSPARENT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, CreateWindowExW, DefWindowProcW, FlashWindowEx, GetClientRect,
    GetDlgItem, GetDlgItemInt, MessageBeep, SendMessageW, SetTimer, ShowWindow, FLASHWINFO,
    FLASHW_ALL, FLASHW_TIMERNOFG, HMENU, MB_ICONASTERISK, SW_HIDE, SW_SHOWNORMAL, WINDOW_STYLE,
    WM_CLOSE, WM_COMMAND, WM_CTLCOLORSTATIC, WM_ERASEBKGND, WM_SETFONT, WM_TIMER, WS_BORDER,
    WS_CAPTION, WS_CHILD, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_GROUP, WS_POPUP, WS_SYSMENU,
    WS_VISIBLE,
};

use super::widgets::colors;
use super::{register_class, screen_size};
use crate::app::{AppContext, Tool};
use crate::platform::windows::app::with_app;
use crate::platform::windows::ffi::{command_id, copy_wide, hinstance, set_text, wide};
use crate::timer::{format_time, Countdown, CountdownTick, Stopwatch};

const ID_DISPLAY: u32 = 401;
const ID_STOPWATCH: u32 = 402;
const ID_COUNTDOWN: u32 = 403;
const ID_MINUTES: u32 = 404;
const ID_SECONDS: u32 = 405;
const ID_TOGGLE: u32 = 406;
const ID_RESET: u32 = 407;

const TICK_TIMER: usize = 1;
const TICK_MS: u32 = 1000;

const BS_AUTORADIOBUTTON: u32 = 0x0009;
const BM_SETCHECK: u32 = 0x00F1;
const ES_CENTER: u32 = 0x0001;
const ES_NUMBER: u32 = 0x2000;
const SS_CENTER: u32 = 0x0001;
const SS_CENTERIMAGE: u32 = 0x0200;

const CLIENT_SIZE: (i32, i32) = (280, 130);
const MARGIN: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerMode {
    Stopwatch,
    Countdown,
}

struct Theme {
    dark: bool,
    brush: HBRUSH,
}

thread_local! {
    static WINDOW: RefCell<Option<HWND>> = const { RefCell::new(None) };
    static MODE: Cell<TimerMode> = const { Cell::new(TimerMode::Stopwatch) };
    static THEME: RefCell<Option<Theme>> = const { RefCell::new(None) };
    static DISPLAY_FONT: RefCell<Option<HFONT>> = const { RefCell::new(None) };
}

fn display_text(mode: TimerMode, stopwatch: &Stopwatch, countdown: &Countdown) -> String {
    match mode {
        TimerMode::Stopwatch => stopwatch.display(),
        TimerMode::Countdown if countdown.is_running() || countdown.is_paused() => {
            countdown.display()
        }
        TimerMode::Countdown => format_time(countdown.duration()),
    }
}

fn toggle_label(mode: TimerMode, stopwatch: &Stopwatch, countdown: &Countdown) -> &'static str {
    let (running, paused) = match mode {
        TimerMode::Stopwatch => (stopwatch.is_running(), stopwatch.elapsed() > 0),
        TimerMode::Countdown => (countdown.is_running(), countdown.is_paused()),
    };
    match (running, paused) {
        (true, _) => "Pause",
        (false, true) => "Resume",
        (false, false) => "Start",
    }
}

// ===================== Creation =====================

unsafe fn create_child(
    parent: HWND,
    class: PCWSTR,
    text: &str,
    style: u32,
    id: u32,
    rect: (i32, i32, i32, i32),
) -> Option<HWND> {
    let text = wide(text);
    let (x, y, width, height) = rect;
    let hwnd = CreateWindowExW(
        Default::default(),
        class,
        PCWSTR(text.as_ptr()),
        WS_CHILD | WS_VISIBLE | WINDOW_STYLE(style),
        x,
        y,
        width,
        height,
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

fn display_font() -> Option<HFONT> {
    let mut logfont = LOGFONTW {
        lfHeight: -40,
        lfWeight: FW_BOLD.0 as i32,
        ..Default::default()
    };
    copy_wide(&mut logfont.lfFaceName, "Segoe UI");
    let font = unsafe { CreateFontIndirectW(&logfont) };
    (!font.is_invalid()).then_some(font)
}

unsafe fn create_controls(hwnd: HWND) {
    let (width, _) = CLIENT_SIZE;
    let inner = width - 2 * MARGIN;
    if let Some(display) = create_child(
        hwnd,
        w!("STATIC"),
        "00:00",
        SS_CENTER | SS_CENTERIMAGE,
        ID_DISPLAY,
        (MARGIN, 8, inner, 52),
    ) {
        if let Some(font) = display_font() {
            SendMessageW(display, WM_SETFONT, Some(WPARAM(font.0 as usize)), Some(LPARAM(1)));
            DISPLAY_FONT.with(|f| *f.borrow_mut() = Some(font));
        }
    }

    let half = inner / 2;
    let radio = BS_AUTORADIOBUTTON;
    if let Some(button) = create_child(
        hwnd,
        w!("BUTTON"),
        "Stopwatch",
        radio | WS_GROUP.0,
        ID_STOPWATCH,
        (MARGIN, 64, half, 24),
    ) {
        SendMessageW(button, BM_SETCHECK, Some(WPARAM(1)), None);
    }
    create_child(
        hwnd,
        w!("BUTTON"),
        "Countdown",
        radio,
        ID_COUNTDOWN,
        (MARGIN + half, 64, half, 24),
    );

    let edit = ES_NUMBER | ES_CENTER | WS_BORDER.0 | WS_GROUP.0;
    create_child(hwnd, w!("EDIT"), "05", edit, ID_MINUTES, (MARGIN, 96, 36, 24));
    create_child(hwnd, w!("STATIC"), ":", SS_CENTER, 0, (MARGIN + 36, 100, 10, 20));
    create_child(hwnd, w!("EDIT"), "00", edit, ID_SECONDS, (MARGIN + 46, 96, 36, 24));
    create_child(hwnd, w!("BUTTON"), "Start", WS_GROUP.0, ID_TOGGLE, (MARGIN + 92, 96, 72, 24));
    create_child(hwnd, w!("BUTTON"), "Reset", 0, ID_RESET, (MARGIN + 172, 96, 72, 24));
}

pub fn create(dark: bool) -> windows::core::Result<()> {
    register_class(w!("PodiumTimer"), Some(timer_proc), None);
    let style = WS_POPUP | WS_CAPTION | WS_SYSMENU;
    let ex_style = WS_EX_TOOLWINDOW | WS_EX_TOPMOST;
    let (width, height) = CLIENT_SIZE;
    let mut frame = RECT {
        left: 0,
        top: 0,
        right: width,
        bottom: height,
    };
    let (screen_w, _) = screen_size();
    let hwnd = unsafe {
        let _ = AdjustWindowRectEx(&mut frame, style, false, ex_style);
        let outer_w = frame.right - frame.left;
        let hwnd = CreateWindowExW(
            ex_style,
            w!("PodiumTimer"),
            w!("Timer"),
            style,
            screen_w - outer_w - 24,
            24,
            outer_w,
            frame.bottom - frame.top,
            None,
            None,
            Some(hinstance()),
            None,
        )?;
        create_controls(hwnd);
        if SetTimer(Some(hwnd), TICK_TIMER, TICK_MS, None) == 0 {
            warn!("could not start the timer tick");
        }
        hwnd
    };
    WINDOW.with(|w| *w.borrow_mut() = Some(hwnd));
    apply_theme(dark);
    Ok(())
}

pub fn set_visible(visible: bool) {
    let Some(hwnd) = WINDOW.with(|w| *w.borrow()) else {
        warn!("timer window not created");
        return;
    };
    unsafe {
        let _ = ShowWindow(hwnd, if visible { SW_SHOWNORMAL } else { SW_HIDE });
    }
}

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
    if let Some(hwnd) = WINDOW.with(|w| *w.borrow()) {
        unsafe {
            let _ = InvalidateRect(Some(hwnd), None, true);
        }
    }
}

// ===================== Behaviour =====================

fn refresh(hwnd: HWND, ctx: &AppContext) {
    let mode = MODE.with(Cell::get);
    unsafe {
        if let Ok(display) = GetDlgItem(Some(hwnd), ID_DISPLAY as i32) {
            set_text(display, &display_text(mode, &ctx.stopwatch, &ctx.countdown));
        }
        if let Ok(toggle) = GetDlgItem(Some(hwnd), ID_TOGGLE as i32) {
            set_text(toggle, toggle_label(mode, &ctx.stopwatch, &ctx.countdown));
        }
    }
}

fn read_duration(hwnd: HWND) -> (u32, u32) {
    unsafe {
        (
            GetDlgItemInt(hwnd, ID_MINUTES as i32, None, false),
            GetDlgItemInt(hwnd, ID_SECONDS as i32, None, false),
        )
    }
}

fn alert(hwnd: HWND) {
    info!("countdown finished");
    let flash = FLASHWINFO {
        cbSize: std::mem::size_of::<FLASHWINFO>() as u32,
        hwnd,
        dwFlags: FLASHW_ALL | FLASHW_TIMERNOFG,
        uCount: 5,
        dwTimeout: 0,
    };
    unsafe {
        let _ = MessageBeep(MB_ICONASTERISK);
        let _ = FlashWindowEx(&flash);
    }
}

fn on_command(hwnd: HWND, id: u32, ctx: &mut AppContext) {
    let mode = MODE.with(Cell::get);
    match id {
        ID_STOPWATCH => MODE.with(|m| m.set(TimerMode::Stopwatch)),
        ID_COUNTDOWN => {
            MODE.with(|m| m.set(TimerMode::Countdown));
            if !ctx.countdown.is_running() && !ctx.countdown.is_paused() {
                let (minutes, seconds) = read_duration(hwnd);
                ctx.countdown.set_duration(minutes, seconds);
            }
        }
        ID_TOGGLE => match mode {
            TimerMode::Stopwatch => ctx.stopwatch.toggle(),
            TimerMode::Countdown => {
                if !ctx.countdown.is_running() && !ctx.countdown.is_paused() {
                    let (minutes, seconds) = read_duration(hwnd);
                    ctx.countdown.set_duration(minutes, seconds);
                }
                ctx.countdown.toggle();
            }
        },
        ID_RESET => match mode {
            TimerMode::Stopwatch => ctx.stopwatch.reset(),
            TimerMode::Countdown => ctx.countdown.reset(),
        },
        _ => return,
    }
    refresh(hwnd, ctx);
}

// ===================== Window procedure =====================

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
            let (_, text): (COLORREF, COLORREF) = colors(theme.dark);
            SetTextColor(hdc, text);
            SetBkMode(hdc, TRANSPARENT);
            LRESULT(theme.brush.0 as isize)
        })
    })
}

extern "system" fn timer_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let handled = match msg {
        WM_TIMER if wparam.0 == TICK_TIMER => with_app(|ctx| {
            ctx.stopwatch.tick();
            if ctx.countdown.tick() == CountdownTick::Finished {
                alert(hwnd);
            }
            refresh(hwnd, ctx);
        }),
        WM_COMMAND => {
            let id = command_id(wparam);
            with_app(|ctx| on_command(hwnd, id, ctx));
            Some(())
        }
        WM_ERASEBKGND => {
            if unsafe { paint_background(hwnd, HDC(wparam.0 as *mut _)) } {
                return LRESULT(1);
            }
            None
        }
        WM_CTLCOLORSTATIC => {
            if let Some(result) = unsafe { color_static(HDC(wparam.0 as *mut _)) } {
                return result;
            }
            None
        }
        WM_CLOSE => {
            with_app(|ctx| ctx.set_tool_visible(Tool::Timer, false));
            Some(())
        }
        _ => None,
    };

    match handled {
        Some(()) => LRESULT(0),
        None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_countdown_shows_its_duration() {
        let stopwatch = Stopwatch::default();
        let mut countdown = Countdown::default();
        countdown.set_duration(5, 0);
        assert_eq!(display_text(TimerMode::Countdown, &stopwatch, &countdown), "05:00");
        countdown.toggle();
        countdown.tick();
        assert_eq!(display_text(TimerMode::Countdown, &stopwatch, &countdown), "04:59");
    }

    #[test]
    fn toggle_button_follows_the_active_model() {
        let mut stopwatch = Stopwatch::default();
        let countdown = Countdown::default();
        assert_eq!(toggle_label(TimerMode::Stopwatch, &stopwatch, &countdown), "Start");
        stopwatch.toggle();
        stopwatch.tick();
        assert_eq!(toggle_label(TimerMode::Stopwatch, &stopwatch, &countdown), "Pause");
        stopwatch.toggle();
        assert_eq!(toggle_label(TimerMode::Stopwatch, &stopwatch, &countdown), "Resume");
        assert_eq!(toggle_label(TimerMode::Countdown, &stopwatch, &countdown), "Start");
    }
}
