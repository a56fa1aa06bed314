//! Windows entry point: the hidden host window, its timers and the
//! message loop.
//!
//! The host window owns the tray icon and two timers. The fast one drains
//! the event bus into the dispatcher; the slow one ticks the poller.

use std::cell::Cell;
use std::ops::ControlFlow;

use tracing::{error, info, warn};
use windows::core::w;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DispatchMessageW, GetMessageW, KillTimer, PostQuitMessage,
    SetTimer, TranslateMessage, MSG, WM_COMMAND, WM_DESTROY, WM_LBUTTONDBLCLK, WM_RBUTTONUP,
    WM_SETTINGCHANGE, WM_TIMER, WS_EX_TOOLWINDOW, WS_POPUP,
};

use podium::config::ConfigStore;
use podium::events::{self, drain_events, AppEvent};
use podium::handlers::dispatch_events;
use podium::model::{ThemeMode, POLL_INTERVAL_MS};
use podium::platform::windows::app::{install, take, with_app, TrayNotifier, Win32Shell};
use podium::platform::windows::automation::{BackgroundThumbnails, ComPresentationApp};
use podium::platform::windows::ffi::com::ComApartment;
use podium::platform::windows::ffi::{command_id, hinstance};
use podium::platform::windows::input::{SendInputKeys, Win32WindowLocator};
use podium::platform::windows::storage;
use podium::platform::windows::ui::tray::{self, MenuState, WM_TRAYICON};
use podium::platform::windows::ui::widgets::{self, Win32Widgets};
use podium::platform::windows::ui::{
    annotation, register_class, screen_size, sketch, spotlight, timer,
};
use podium::poller::PollerParts;
use podium::presentation::{KeystrokeTiming, SysinfoProbe};
use podium::thumbnails::ThumbnailCache;
use podium::{AppContext, Poller};

const TIMER_EVENTS: usize = 1;
const TIMER_POLL: usize = 2;
const EVENTS_INTERVAL_MS: u32 = 50;

thread_local! {
    /// What the tray menu showed when it was last opened.
    static MENU_STATE: Cell<Option<MenuState>> = const { Cell::new(None) };
}

/// Releases global UI state on every way out of [`run_app`].
struct HostCleanup;

impl Drop for HostCleanup {
    fn drop(&mut self) {
        annotation::release_capture();
        tray::remove_tray_icon();
    }
}

/// Main entry point for Windows.
pub fn run() {
    if let Err(e) = run_app() {
        error!(error = %e, "podium stopped");
        std::process::exit(1);
    }
}

fn run_app() -> windows::core::Result<()> {
    unsafe {
        if let Err(e) = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) {
            warn!(error = %e, "could not enable per-monitor DPI awareness");
        }
    }
    let _apartment = ComApartment::init();
    events::init_event_bus();

    let config = ConfigStore::open_default();
    let prefs = config.prefs().clone();
    let dark = prefs.theme.is_dark(storage::system_uses_light_theme());

    register_class(w!("PodiumHost"), Some(host_proc), None);
    let hwnd = unsafe {
        CreateWindowExW(
            WS_EX_TOOLWINDOW,
            w!("PodiumHost"),
            w!("Podium"),
            WS_POPUP,
            0,
            0,
            0,
            0,
            None,
            None,
            Some(hinstance()),
            None,
        )?
    };
    let _cleanup = HostCleanup;

    tray::install_tray_icon(hwnd);
    widgets::create_widgets(dark)?;
    annotation::create()?;
    sketch::create()?;
    spotlight::create()?;
    timer::create(dark)?;

    let poller = Poller::new(
        PollerParts {
            probe: Box::new(SysinfoProbe::new()),
            app: Box::new(ComPresentationApp::new()),
            windows: Box::new(Win32WindowLocator),
            keys: Box::new(SendInputKeys),
            timing: KeystrokeTiming::default(),
            widgets: Box::new(Win32Widgets),
            notifier: Box::new(TrayNotifier),
            thumbnails: Box::new(BackgroundThumbnails::new(ThumbnailCache::open_default())),
        },
        prefs.compatibility_mode,
    );
    let (width, height) = screen_size();
    install(AppContext::new(
        poller,
        config,
        Box::new(Win32Shell),
        (width.max(1) as u32, height.max(1) as u32),
    ));
    info!(compatibility_mode = prefs.compatibility_mode, "podium started");

    unsafe {
        SetTimer(Some(hwnd), TIMER_EVENTS, EVENTS_INTERVAL_MS, None);
        SetTimer(Some(hwnd), TIMER_POLL, POLL_INTERVAL_MS, None);

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        let _ = KillTimer(Some(hwnd), TIMER_EVENTS);
        let _ = KillTimer(Some(hwnd), TIMER_POLL);
    }

    if let Some(mut ctx) = take() {
        ctx.shutdown();
    }
    info!("podium stopped");
    Ok(())
}

fn menu_state(ctx: &AppContext) -> MenuState {
    MenuState {
        autorun: storage::autorun_enabled(),
        compatibility_mode: ctx.poller.compatibility_mode(),
        theme: ctx.config.prefs().theme,
    }
}

fn on_timer(id: usize) {
    match id {
        TIMER_EVENTS => {
            let flow = with_app(|ctx| dispatch_events(ctx, drain_events()));
            if let Some(ControlFlow::Break(())) = flow {
                unsafe { PostQuitMessage(0) };
            }
        }
        TIMER_POLL => {
            with_app(|ctx| ctx.poller.tick());
        }
        _ => {}
    }
}

extern "system" fn host_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match msg {
        WM_TIMER => {
            on_timer(wparam.0);
            LRESULT(0)
        }

        msg if msg == WM_TRAYICON => {
            match lparam.0 as u32 {
                WM_RBUTTONUP => {
                    if let Some(state) = with_app(|ctx| menu_state(ctx)) {
                        MENU_STATE.with(|m| m.set(Some(state)));
                        tray::show_tray_menu(hwnd, state);
                    }
                }
                WM_LBUTTONDBLCLK => events::publish(AppEvent::ToggleTimer),
                _ => {}
            }
            LRESULT(0)
        }

        WM_COMMAND => {
            let state = MENU_STATE.with(Cell::take);
            if let Some(event) = state.and_then(|s| tray::menu_event(command_id(wparam), s)) {
                events::publish(event);
            }
            LRESULT(0)
        }

        // Follow the system light/dark switch when the theme is automatic.
        WM_SETTINGCHANGE => {
            with_app(|ctx| {
                if ctx.config.prefs().theme == ThemeMode::Auto {
                    ctx.set_theme(ThemeMode::Auto);
                }
            });
            unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
        }

        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }

        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}
