//! Process and window lookup, and simulated key input contracts.

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::trace;

use super::types::WindowId;
use crate::error::DriverResult;
use crate::model::{PROCESS_KEYWORDS, WINDOW_CLASS_KEYWORDS, WINDOW_TITLE_KEYWORDS};

/// Is a presentation-capable application running?
pub trait ProcessProbe {
    fn presentation_running(&mut self) -> bool;
}

/// Locates and focuses the slideshow window for simulated input.
pub trait WindowLocator {
    fn find_slideshow_window(&mut self) -> DriverResult<WindowId>;
    fn activate(&mut self, window: WindowId) -> DriverResult<()>;
}

/// Keys the keystroke back end emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Home,
    Escape,
    /// A letter key, upper-case ASCII.
    Letter(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub ctrl: bool,
    pub key: Key,
}

impl KeyStroke {
    pub const fn plain(key: Key) -> Self {
        Self { ctrl: false, key }
    }

    pub const fn ctrl(key: Key) -> Self {
        Self { ctrl: true, key }
    }
}

/// Sends key presses to the current foreground window.
pub trait KeySender {
    fn send(&mut self, stroke: KeyStroke) -> DriverResult<()>;
}

/// Process-name heuristic for PowerPoint / WPS.
pub fn is_presentation_process(name: &str) -> bool {
    let name = name.to_lowercase();
    PROCESS_KEYWORDS.iter().any(|k| name.contains(k))
}

/// Title/class heuristic for slideshow windows.
pub fn is_slideshow_window(title: &str, class_name: &str) -> bool {
    let title = title.to_lowercase();
    let class_name = class_name.to_lowercase();
    WINDOW_TITLE_KEYWORDS.iter().any(|k| title.contains(k))
        || WINDOW_CLASS_KEYWORDS.iter().any(|k| class_name.contains(k))
}

/// [`ProcessProbe`] backed by the OS process table.
pub struct SysinfoProbe {
    system: System,
}

impl SysinfoProbe {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProbe for SysinfoProbe {
    fn presentation_running(&mut self) -> bool {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        let found = self
            .system
            .processes()
            .values()
            .any(|p| is_presentation_process(&p.name().to_string_lossy()));
        trace!(found, "process scan");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_presentation_processes() {
        assert!(is_presentation_process("POWERPNT.EXE"));
        assert!(is_presentation_process("wpp.exe"));
        assert!(is_presentation_process("wps.exe"));
        assert!(!is_presentation_process("explorer.exe"));
    }

    #[test]
    fn matches_windows_by_title_or_class() {
        assert!(is_slideshow_window("PowerPoint Slide Show - deck.pptx", ""));
        assert!(is_slideshow_window("", "screenClass_PowerPnt"));
        assert!(is_slideshow_window("WPS 演示", "Qt5QWindow"));
        assert!(is_slideshow_window("untitled", "PresentationFrame"));
        assert!(!is_slideshow_window("Notepad", "Notepad"));
    }

    #[test]
    fn sysinfo_probe_scans_without_panicking() {
        let mut probe = SysinfoProbe::new();
        let _ = probe.presentation_running();
    }
}
