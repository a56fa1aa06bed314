//! Win32 side effects requested by the portable handlers.

use crate::app::{Shell, Tool};
use crate::error::ConfigError;
use crate::model::ADVISORY_TITLE;
use crate::platform::windows::storage;
use crate::platform::windows::ui::{annotation, sketch, spotlight, timer, tray, widgets};
use crate::poller::Notifier;

pub struct Win32Shell;

impl Shell for Win32Shell {
    fn set_tool_visible(&mut self, tool: Tool, visible: bool) {
        match tool {
            Tool::Spotlight => spotlight::set_visible(visible),
            Tool::Timer => timer::set_visible(visible),
            Tool::SketchPad => sketch::set_visible(visible),
            Tool::Annotation => annotation::set_visible(visible),
        }
    }

    fn set_autorun(&mut self, enabled: bool) -> Result<(), ConfigError> {
        storage::set_autorun(enabled)
    }

    fn system_uses_light_theme(&self) -> bool {
        storage::system_uses_light_theme()
    }

    fn apply_theme(&mut self, dark: bool) {
        widgets::apply_theme(dark);
        timer::apply_theme(dark);
        spotlight::request_redraw();
    }

    fn notify(&mut self, title: &str, message: &str) {
        tray::show_balloon(title, message);
    }
}

/// Poller advisories as tray balloons.
pub struct TrayNotifier;

impl Notifier for TrayNotifier {
    fn advisory(&mut self, message: &str) {
        tray::show_balloon(ADVISORY_TITLE, message);
    }
}
