//! The application context.
//!
//! One `AppContext` is built at startup and owns everything the event
//! handlers touch: the poller, both drawing canvases, the spotlight and
//! timer models, the preferences store and the platform shell.

use tracing::{info, warn};

use crate::canvas::{Background, Canvas};
use crate::config::ConfigStore;
use crate::error::ConfigError;
use crate::model::{PenColor, ThemeMode, ADVISORY_TITLE, SKETCH_PAD_SIZE};
use crate::poller::Poller;
use crate::spotlight::Spotlight;
use crate::timer::{Countdown, Stopwatch};

/// Auxiliary overlay windows the user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Spotlight,
    Timer,
    SketchPad,
    Annotation,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Spotlight, Tool::Timer, Tool::SketchPad, Tool::Annotation];

    fn index(self) -> usize {
        match self {
            Tool::Spotlight => 0,
            Tool::Timer => 1,
            Tool::SketchPad => 2,
            Tool::Annotation => 3,
        }
    }
}

/// Platform side effects the handlers need.
pub trait Shell {
    /// Show or hide a tool window. Hiding the annotation layer must
    /// release its input capture.
    fn set_tool_visible(&mut self, tool: Tool, visible: bool);

    fn set_autorun(&mut self, enabled: bool) -> Result<(), ConfigError>;

    fn system_uses_light_theme(&self) -> bool;

    fn apply_theme(&mut self, dark: bool);

    /// Non-blocking notification.
    fn notify(&mut self, title: &str, message: &str);
}

pub struct AppContext {
    pub poller: Poller,
    pub config: ConfigStore,
    pub annotation: Canvas,
    pub sketch: Canvas,
    pub spotlight: Spotlight,
    pub stopwatch: Stopwatch,
    pub countdown: Countdown,
    pub shell: Box<dyn Shell>,
    visible: [bool; 4],
}

impl AppContext {
    /// `screen` sizes the annotation layer.
    pub fn new(poller: Poller, config: ConfigStore, shell: Box<dyn Shell>, screen: (u32, u32)) -> Self {
        let prefs = config.prefs().clone();
        let dark = prefs.theme.is_dark(shell.system_uses_light_theme());
        let (sw, sh) = SKETCH_PAD_SIZE;
        Self {
            poller,
            annotation: Canvas::new(
                screen.0,
                screen.1,
                Background::Transparent,
                PenColor::RED,
                prefs.annotation_pen_width,
            ),
            sketch: Canvas::new(sw, sh, Background::White, PenColor::BLACK, prefs.sketch_pen_width),
            spotlight: Spotlight::new(dark),
            stopwatch: Stopwatch::default(),
            countdown: Countdown::default(),
            config,
            shell,
            visible: [false; 4],
        }
    }

    pub fn is_visible(&self, tool: Tool) -> bool {
        self.visible[tool.index()]
    }

    pub fn set_tool_visible(&mut self, tool: Tool, visible: bool) {
        if self.is_visible(tool) == visible {
            return;
        }
        info!(?tool, visible, "tool window");
        self.visible[tool.index()] = visible;
        if tool == Tool::Spotlight && !visible {
            self.spotlight.reset();
        }
        self.shell.set_tool_visible(tool, visible);
    }

    pub fn toggle_tool(&mut self, tool: Tool) {
        let visible = !self.is_visible(tool);
        self.set_tool_visible(tool, visible);
    }

    /// Resolved colour scheme.
    pub fn is_dark(&self) -> bool {
        self.config
            .prefs()
            .theme
            .is_dark(self.shell.system_uses_light_theme())
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.config.set_theme(theme);
        self.config.flush();
        let dark = self.is_dark();
        self.spotlight.set_dark(dark);
        self.shell.apply_theme(dark);
    }

    pub fn set_compatibility_mode(&mut self, enabled: bool) {
        self.config.set_compatibility_mode(enabled);
        self.config.flush();
        self.poller.set_compatibility_mode(enabled);
    }

    /// Returns whether the registry change took effect.
    pub fn set_autorun(&mut self, enabled: bool) -> bool {
        match self.shell.set_autorun(enabled) {
            Ok(()) => true,
            Err(e) => {
                warn!(enabled, error = %e, "could not change autorun");
                false
            }
        }
    }

    pub fn notify(&mut self, message: &str) {
        self.shell.notify(ADVISORY_TITLE, message);
    }

    /// Hide every tool (releasing input capture) and persist preferences.
    pub fn shutdown(&mut self) {
        for tool in Tool::ALL {
            self.set_tool_visible(tool, false);
        }
        self.config.flush();
    }
}
