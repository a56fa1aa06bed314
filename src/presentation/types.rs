//! Plain value types exchanged with the presentation driver.

use crate::model::{POINTER_CODE_ARROW, POINTER_CODE_ERASER, POINTER_CODE_PEN};

/// Input tool of the slideshow view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerMode {
    Arrow,
    Pen,
    Eraser,
}

impl PointerMode {
    /// Automation code (`PpSlideShowPointerType`).
    pub fn code(self) -> i32 {
        match self {
            PointerMode::Arrow => POINTER_CODE_ARROW,
            PointerMode::Pen => POINTER_CODE_PEN,
            PointerMode::Eraser => POINTER_CODE_ERASER,
        }
    }

    /// Map an automation code back to a mode. Codes the toolbar has no
    /// button for (hidden pointer, auto arrow, ...) yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            POINTER_CODE_ARROW => Some(PointerMode::Arrow),
            POINTER_CODE_PEN => Some(PointerMode::Pen),
            POINTER_CODE_ERASER => Some(PointerMode::Eraser),
            _ => None,
        }
    }
}

/// Which automation server answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind {
    Office,
    Wps,
}

/// Result of asking whether the current slide carries ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkPresence {
    Present,
    /// Confirmed: the slide has no ink shapes.
    Absent,
    /// The query failed; treat as "ink may be present".
    Unknown,
}

impl InkPresence {
    /// Only a confirmed absence may raise the "no ink" advisory.
    pub fn confirmed_absent(self) -> bool {
        self == InkPresence::Absent
    }
}

/// Opaque top-level window identifier (an `HWND` value on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_codes_match_automation_values() {
        assert_eq!(PointerMode::Arrow.code(), 1);
        assert_eq!(PointerMode::Pen.code(), 2);
        assert_eq!(PointerMode::Eraser.code(), 5);
    }

    #[test]
    fn unknown_pointer_codes_are_ignored() {
        assert_eq!(PointerMode::from_code(2), Some(PointerMode::Pen));
        assert_eq!(PointerMode::from_code(3), None);
        assert_eq!(PointerMode::from_code(0), None);
    }

    #[test]
    fn only_absent_is_confirmed() {
        assert!(InkPresence::Absent.confirmed_absent());
        assert!(!InkPresence::Unknown.confirmed_absent());
        assert!(!InkPresence::Present.confirmed_absent());
    }
}
