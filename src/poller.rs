//! Presentation state poller.
//!
//! Every [`POLL_INTERVAL`](crate::model::POLL_INTERVAL) the host calls
//! [`Poller::tick`]. It samples the process table and, when allowed, the
//! automation interface, decides whether the overlay widgets should be
//! shown, and keeps the page counter and tool buttons in sync with the
//! running slideshow.
//!
//! Nothing in here can fail: every external error is logged and read as
//! "unavailable this tick". The next tick re-checks.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{DriverError, DriverResult};
use crate::model::{
    PenColor, Rect, MSG_COMPAT_ACTIVE, MSG_NO_INK, MSG_POINTER_FAILED, WIDGET_MARGIN,
};
use crate::presentation::{
    KeySender, KeystrokeControl, KeystrokeTiming, PointerMode, PresentationApp,
    PresentationControl, ProcessProbe, RichControl, SlideShowView, WindowLocator,
};
use crate::thumbnails::cache_key;

// ===================== State =====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Hidden,
    /// Widgets shown, page and pointer synced from the automation view.
    VisibleRich,
    /// Widgets shown, driven by simulated keys only.
    VisibleFallback,
}

impl OverlayState {
    pub fn is_visible(self) -> bool {
        self != OverlayState::Hidden
    }
}

/// What one tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInputs {
    pub process_detected: bool,
    pub rich_view_available: bool,
    pub fallback_mode_enabled: bool,
}

/// The state the overlay should be in for `inputs`, whatever it was before.
pub fn evaluate(inputs: TickInputs) -> OverlayState {
    if inputs.fallback_mode_enabled {
        if inputs.process_detected {
            OverlayState::VisibleFallback
        } else {
            OverlayState::Hidden
        }
    } else if inputs.rich_view_available {
        OverlayState::VisibleRich
    } else {
        OverlayState::Hidden
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverKind {
    #[default]
    None,
    Rich,
    ProcessOnly,
}

/// Snapshot of the presentation, rebuilt every tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub connected: bool,
    pub driver_kind: DriverKind,
    pub current_slide: Option<u32>,
    pub total_slides: Option<u32>,
    pub pointer_mode: Option<PointerMode>,
}

// ===================== Layout =====================

/// Placement of the three floating widgets on one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetLayout {
    pub toolbar: Rect,
    pub nav_left: Rect,
    pub nav_right: Rect,
}

impl WidgetLayout {
    /// Toolbar bottom-centre, navigation bottom-left and bottom-right.
    pub fn compute(screen: (i32, i32), toolbar: (i32, i32), nav: (i32, i32)) -> Self {
        let (sw, sh) = screen;
        let (tw, th) = toolbar;
        let (nw, nh) = nav;
        let nav_y = sh - nh - WIDGET_MARGIN;
        Self {
            toolbar: Rect::new((sw - tw) / 2, sh - th - WIDGET_MARGIN, tw, th),
            nav_left: Rect::new(WIDGET_MARGIN, nav_y, nw, nh),
            nav_right: Rect::new(sw - nw - WIDGET_MARGIN, nav_y, nw, nh),
        }
    }
}

// ===================== Collaborators =====================

/// The toolbar and the two navigation widgets.
pub trait OverlayWidgets {
    fn show(&mut self);
    fn hide(&mut self);
    /// Re-position against the current screen bounds.
    fn layout(&mut self);
    fn update_page(&mut self, current: u32, total: u32);
    fn set_pointer_mode(&mut self, mode: PointerMode);
}

/// Non-blocking user notification (a tray balloon on Windows).
pub trait Notifier {
    fn advisory(&mut self, message: &str);
}

/// Starts a background thumbnail export for a presentation.
pub trait ThumbnailJobs {
    fn start(&mut self, presentation_path: &str, cache_key: &str, slide_count: u32);
}

/// Everything the poller talks to.
pub struct PollerParts {
    pub probe: Box<dyn ProcessProbe>,
    pub app: Box<dyn PresentationApp>,
    pub windows: Box<dyn WindowLocator>,
    pub keys: Box<dyn KeySender>,
    pub timing: KeystrokeTiming,
    pub widgets: Box<dyn OverlayWidgets>,
    pub notifier: Box<dyn Notifier>,
    pub thumbnails: Box<dyn ThumbnailJobs>,
}

// ===================== Commands =====================

/// A user action on the overlay widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Goto(u32),
    SetPointerMode(PointerMode),
    SetPenColor(PenColor),
    ClearInk,
    Exit,
}

impl Command {
    fn apply(self, control: &mut dyn PresentationControl) -> DriverResult<()> {
        match self {
            Command::Next => control.next(),
            Command::Previous => control.previous(),
            Command::Goto(index) => control.goto(index),
            Command::SetPointerMode(mode) => control.set_pointer_mode(mode),
            Command::SetPenColor(color) => control.set_pen_color(color),
            Command::ClearInk => control.clear_ink(),
            Command::Exit => control.exit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Rich,
    Keystroke,
}

// ===================== Poller =====================

pub struct Poller {
    probe: Box<dyn ProcessProbe>,
    rich: RichControl,
    keystroke: KeystrokeControl,
    widgets: Box<dyn OverlayWidgets>,
    notifier: Box<dyn Notifier>,
    thumbnails: Box<dyn ThumbnailJobs>,
    compatibility_mode: bool,
    compat_advisory_shown: bool,
    state: OverlayState,
    session: Session,
    requested_thumbnails: HashSet<String>,
    ready_thumbnails: HashSet<String>,
    current_presentation: Option<String>,
}

impl Poller {
    pub fn new(parts: PollerParts, compatibility_mode: bool) -> Self {
        Self {
            probe: parts.probe,
            rich: RichControl::new(parts.app),
            keystroke: KeystrokeControl::new(parts.windows, parts.keys, parts.timing),
            widgets: parts.widgets,
            notifier: parts.notifier,
            thumbnails: parts.thumbnails,
            compatibility_mode,
            compat_advisory_shown: false,
            state: OverlayState::Hidden,
            session: Session::default(),
            requested_thumbnails: HashSet::new(),
            ready_thumbnails: HashSet::new(),
            current_presentation: None,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn compatibility_mode(&self) -> bool {
        self.compatibility_mode
    }

    /// Switch back ends and re-check straight away.
    pub fn set_compatibility_mode(&mut self, enabled: bool) {
        if enabled == self.compatibility_mode {
            return;
        }
        info!(enabled, "compatibility mode changed");
        self.compatibility_mode = enabled;
        self.compat_advisory_shown = false;
        self.tick();
    }

    /// Sample the presentation once and update the widgets.
    pub fn tick(&mut self) -> OverlayState {
        let process_detected = self.probe.presentation_running();

        let mut view = None;
        if process_detected && !self.compatibility_mode {
            match self.rich.app().active_view() {
                Ok(v) => view = Some(v),
                Err(e) => debug!(error = %e, "no slideshow view"),
            }
        }

        let inputs = TickInputs {
            process_detected,
            rich_view_available: view.is_some(),
            fallback_mode_enabled: self.compatibility_mode,
        };
        let next = evaluate(inputs);
        self.transition(next);

        self.session = Session {
            connected: view.is_some(),
            driver_kind: match next {
                OverlayState::VisibleRich => DriverKind::Rich,
                OverlayState::VisibleFallback => DriverKind::ProcessOnly,
                OverlayState::Hidden => DriverKind::None,
            },
            ..Session::default()
        };

        if let Some(mut view) = view {
            self.sync(view.as_mut());
        }
        self.state
    }

    fn transition(&mut self, next: OverlayState) {
        let prev = self.state;
        if prev == next {
            return;
        }
        debug!(?prev, ?next, "overlay transition");
        self.state = next;

        match next {
            OverlayState::Hidden => {
                info!("slideshow gone, hiding overlay");
                self.widgets.hide();
            }
            OverlayState::VisibleRich | OverlayState::VisibleFallback => {
                if !prev.is_visible() {
                    info!(?next, "slideshow detected, showing overlay");
                    self.widgets.show();
                }
                self.widgets.layout();
            }
        }

        match next {
            OverlayState::VisibleRich => self.request_thumbnails(),
            OverlayState::VisibleFallback => {
                if !self.compat_advisory_shown {
                    self.compat_advisory_shown = true;
                    self.notifier.advisory(MSG_COMPAT_ACTIVE);
                }
            }
            OverlayState::Hidden => {}
        }
    }

    /// Push page and pointer state from the live view into the widgets.
    fn sync(&mut self, view: &mut dyn SlideShowView) {
        let current = view.slide_index();
        let total = self.rich.app().slide_count();
        match (current, total) {
            (Ok(current), Ok(total)) => {
                self.session.current_slide = Some(current);
                self.session.total_slides = Some(total);
                self.widgets.update_page(current, total);
            }
            (Err(e), _) | (_, Err(e)) => debug!(error = %e, "page sync skipped"),
        }

        match view.pointer_code() {
            Ok(code) => {
                if let Some(mode) = PointerMode::from_code(code) {
                    self.session.pointer_mode = Some(mode);
                    self.widgets.set_pointer_mode(mode);
                }
            }
            Err(e) => debug!(error = %e, "pointer sync skipped"),
        }
    }

    fn request_thumbnails(&mut self) {
        let app = self.rich.app();
        let path = match app.presentation_path() {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "cannot read presentation path, skipping thumbnails");
                return;
            }
        };
        let key = cache_key(&path);
        self.current_presentation = Some(key.clone());
        if self.requested_thumbnails.contains(&key) {
            return;
        }
        let count = match app.slide_count() {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "cannot read slide count, skipping thumbnails");
                return;
            }
        };
        info!(%key, count, "starting thumbnail export");
        self.thumbnails.start(&path, &key, count);
        self.requested_thumbnails.insert(key);
    }

    /// The background export for `cache_key` finished.
    ///
    /// An export that left nothing cached is forgotten, so the next rich
    /// session for that presentation tries again.
    pub fn thumbnails_ready(&mut self, cache_key: &str, cached: bool) {
        if cached {
            debug!(cache_key, "thumbnails ready");
            self.ready_thumbnails.insert(cache_key.to_owned());
        } else {
            warn!(cache_key, "thumbnail export left nothing cached");
            self.requested_thumbnails.remove(cache_key);
        }
    }

    pub fn has_thumbnails(&self, cache_key: &str) -> bool {
        self.ready_thumbnails.contains(cache_key)
    }

    /// Cache key of the presentation last seen in rich mode, once its
    /// thumbnails are on disk.
    pub fn ready_thumbnail_key(&self) -> Option<&str> {
        self.current_presentation
            .as_deref()
            .filter(|key| self.has_thumbnails(key))
    }

    fn backend(&self) -> Backend {
        match self.state {
            OverlayState::VisibleRich => Backend::Rich,
            OverlayState::VisibleFallback => Backend::Keystroke,
            OverlayState::Hidden if self.compatibility_mode => Backend::Keystroke,
            OverlayState::Hidden => Backend::Rich,
        }
    }

    /// Run a widget command on the back end for the current state.
    ///
    /// Failures are swallowed; a vanished slideshow is picked up by the
    /// next tick.
    pub fn execute(&mut self, command: Command) {
        let backend = self.backend();

        let checks_ink = match command {
            Command::ClearInk => true,
            Command::SetPointerMode(PointerMode::Eraser) => backend == Backend::Rich,
            _ => false,
        };
        if checks_ink && self.rich.ink_presence().confirmed_absent() {
            self.notifier.advisory(MSG_NO_INK);
        }

        let result = match backend {
            Backend::Rich => command.apply(&mut self.rich),
            Backend::Keystroke => command.apply(&mut self.keystroke),
        };

        match result {
            Ok(()) => debug!(?command, ?backend, "command sent"),
            Err(DriverError::Unsupported(op)) => {
                debug!(op, "no key equivalent, trying automation");
                if let Err(e) = command.apply(&mut self.rich) {
                    debug!(error = %e, ?command, "automation fallback failed");
                    if command == Command::SetPointerMode(PointerMode::Arrow) {
                        self.notifier.advisory(MSG_POINTER_FAILED);
                    }
                }
            }
            Err(e) => debug!(error = %e, ?command, "command failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(process: bool, rich: bool, fallback: bool) -> TickInputs {
        TickInputs {
            process_detected: process,
            rich_view_available: rich,
            fallback_mode_enabled: fallback,
        }
    }

    #[test]
    fn nothing_detected_is_hidden() {
        assert_eq!(evaluate(inputs(false, false, false)), OverlayState::Hidden);
        assert_eq!(evaluate(inputs(false, false, true)), OverlayState::Hidden);
    }

    #[test]
    fn fallback_needs_only_a_process() {
        assert_eq!(
            evaluate(inputs(true, false, true)),
            OverlayState::VisibleFallback
        );
        assert_eq!(
            evaluate(inputs(true, true, true)),
            OverlayState::VisibleFallback
        );
    }

    #[test]
    fn rich_needs_a_view() {
        assert_eq!(evaluate(inputs(true, true, false)), OverlayState::VisibleRich);
        assert_eq!(evaluate(inputs(true, false, false)), OverlayState::Hidden);
    }

    #[test]
    fn layout_anchors_to_bottom_edges() {
        let l = WidgetLayout::compute((1920, 1080), (400, 60), (120, 50));
        assert_eq!(l.toolbar, Rect::new(760, 1000, 400, 60));
        assert_eq!((l.nav_left.x, l.nav_left.y), (20, 1010));
        assert_eq!((l.nav_right.x, l.nav_right.y), (1780, 1010));
    }
}
