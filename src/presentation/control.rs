//! The slideshow command surface and its two back ends.
//!
//! [`RichControl`] talks to the automation interface; [`KeystrokeControl`]
//! focuses the slideshow window and emits the equivalent key presses.
//! The poller picks one per tick; nothing else looks at the concrete type.

use std::thread;
use std::time::Duration;

use tracing::debug;

use super::driver::{PresentationApp, SlideShowView};
use super::lookup::{Key, KeySender, KeyStroke, WindowLocator};
use super::types::{InkPresence, PointerMode};
use crate::error::{DriverError, DriverResult};
use crate::model::PenColor;

/// Commands the toolbar and navigation widgets can issue.
pub trait PresentationControl {
    fn next(&mut self) -> DriverResult<()>;
    fn previous(&mut self) -> DriverResult<()>;
    /// Jump to a 1-based slide index.
    fn goto(&mut self, index: u32) -> DriverResult<()>;
    fn set_pointer_mode(&mut self, mode: PointerMode) -> DriverResult<()>;
    fn set_pen_color(&mut self, color: PenColor) -> DriverResult<()>;
    fn clear_ink(&mut self) -> DriverResult<()>;
    fn exit(&mut self) -> DriverResult<()>;
}

// ===================== Rich =====================

pub struct RichControl {
    app: Box<dyn PresentationApp>,
}

impl RichControl {
    pub fn new(app: Box<dyn PresentationApp>) -> Self {
        Self { app }
    }

    pub fn app(&mut self) -> &mut dyn PresentationApp {
        self.app.as_mut()
    }

    fn view(&mut self) -> DriverResult<Box<dyn SlideShowView>> {
        self.app.active_view()
    }

    fn refocus(&mut self) {
        if let Err(e) = self.app.activate_slideshow_window() {
            debug!(error = %e, "could not refocus slideshow window");
        }
    }

    /// Best-effort ink query; any failure reads as "may be present".
    pub fn ink_presence(&mut self) -> InkPresence {
        match self.view().and_then(|mut v| v.slide_has_ink()) {
            Ok(true) => InkPresence::Present,
            Ok(false) => InkPresence::Absent,
            Err(e) => {
                debug!(error = %e, "ink query failed");
                InkPresence::Unknown
            }
        }
    }
}

impl PresentationControl for RichControl {
    fn next(&mut self) -> DriverResult<()> {
        self.view()?.next()
    }

    fn previous(&mut self) -> DriverResult<()> {
        self.view()?.previous()
    }

    fn goto(&mut self, index: u32) -> DriverResult<()> {
        self.view()?.goto(index)
    }

    fn set_pointer_mode(&mut self, mode: PointerMode) -> DriverResult<()> {
        self.view()?.set_pointer_mode(mode)?;
        self.refocus();
        Ok(())
    }

    fn set_pen_color(&mut self, color: PenColor) -> DriverResult<()> {
        let mut view = self.view()?;
        view.set_pointer_mode(PointerMode::Pen)?;
        view.set_pointer_color(color)?;
        self.refocus();
        Ok(())
    }

    fn clear_ink(&mut self) -> DriverResult<()> {
        self.view()?.erase_drawing()
    }

    fn exit(&mut self) -> DriverResult<()> {
        self.view()?.exit()
    }
}

// ===================== Keystroke =====================

/// Pauses around simulated input so the target window can react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeystrokeTiming {
    /// After focusing the window for a pointer change or a jump.
    pub activate_settle: Duration,
    /// After focusing the window for next/previous.
    pub step_settle: Duration,
    /// After `Home` during a jump.
    pub home_settle: Duration,
    /// Between the `Right` presses of a jump.
    pub between_steps: Duration,
}

impl Default for KeystrokeTiming {
    fn default() -> Self {
        Self {
            activate_settle: Duration::from_millis(300),
            step_settle: Duration::from_millis(100),
            home_settle: Duration::from_millis(100),
            between_steps: Duration::from_millis(50),
        }
    }
}

impl KeystrokeTiming {
    /// No pauses at all; for tests.
    pub const fn immediate() -> Self {
        Self {
            activate_settle: Duration::ZERO,
            step_settle: Duration::ZERO,
            home_settle: Duration::ZERO,
            between_steps: Duration::ZERO,
        }
    }
}

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}

pub struct KeystrokeControl {
    windows: Box<dyn WindowLocator>,
    keys: Box<dyn KeySender>,
    timing: KeystrokeTiming,
}

impl KeystrokeControl {
    pub fn new(
        windows: Box<dyn WindowLocator>,
        keys: Box<dyn KeySender>,
        timing: KeystrokeTiming,
    ) -> Self {
        Self {
            windows,
            keys,
            timing,
        }
    }

    /// Find and focus the slideshow window, then wait `settle`.
    fn focus(&mut self, settle: Duration) -> DriverResult<()> {
        let window = self.windows.find_slideshow_window()?;
        self.windows.activate(window)?;
        pause(settle);
        Ok(())
    }

    /// Like `focus`, but a missing window still lets the key go to
    /// whatever is in the foreground.
    fn try_focus(&mut self, settle: Duration) {
        if let Err(e) = self.focus(settle) {
            debug!(error = %e, "sending key to current foreground window");
        }
    }
}

impl PresentationControl for KeystrokeControl {
    fn next(&mut self) -> DriverResult<()> {
        self.try_focus(self.timing.step_settle);
        self.keys.send(KeyStroke::plain(Key::Right))
    }

    fn previous(&mut self) -> DriverResult<()> {
        self.try_focus(self.timing.step_settle);
        self.keys.send(KeyStroke::plain(Key::Left))
    }

    /// No direct addressing: `Home`, then step right `index - 1` times.
    fn goto(&mut self, index: u32) -> DriverResult<()> {
        self.focus(self.timing.activate_settle)?;
        self.keys.send(KeyStroke::plain(Key::Home))?;
        pause(self.timing.home_settle);
        for _ in 1..index {
            self.keys.send(KeyStroke::plain(Key::Right))?;
            pause(self.timing.between_steps);
        }
        Ok(())
    }

    fn set_pointer_mode(&mut self, mode: PointerMode) -> DriverResult<()> {
        let stroke = match mode {
            PointerMode::Pen => KeyStroke::ctrl(Key::Letter('P')),
            PointerMode::Eraser => KeyStroke::ctrl(Key::Letter('E')),
            PointerMode::Arrow => return Err(DriverError::Unsupported("set_pointer_mode(arrow)")),
        };
        self.focus(self.timing.activate_settle)?;
        self.keys.send(stroke)
    }

    fn set_pen_color(&mut self, _color: PenColor) -> DriverResult<()> {
        Err(DriverError::Unsupported("set_pen_color"))
    }

    fn clear_ink(&mut self) -> DriverResult<()> {
        Err(DriverError::Unsupported("clear_ink"))
    }

    fn exit(&mut self) -> DriverResult<()> {
        self.try_focus(Duration::ZERO);
        self.keys.send(KeyStroke::plain(Key::Escape))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::presentation::types::WindowId;

    #[derive(Default)]
    struct Log {
        keys: Vec<KeyStroke>,
        activations: usize,
    }

    struct FakeWindows {
        log: Rc<RefCell<Log>>,
        present: bool,
    }

    impl WindowLocator for FakeWindows {
        fn find_slideshow_window(&mut self) -> DriverResult<WindowId> {
            if self.present {
                Ok(WindowId(42))
            } else {
                Err(DriverError::WindowNotFound)
            }
        }

        fn activate(&mut self, _window: WindowId) -> DriverResult<()> {
            self.log.borrow_mut().activations += 1;
            Ok(())
        }
    }

    struct FakeKeys(Rc<RefCell<Log>>);

    impl KeySender for FakeKeys {
        fn send(&mut self, stroke: KeyStroke) -> DriverResult<()> {
            self.0.borrow_mut().keys.push(stroke);
            Ok(())
        }
    }

    fn keystroke(present: bool) -> (KeystrokeControl, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let control = KeystrokeControl::new(
            Box::new(FakeWindows {
                log: log.clone(),
                present,
            }),
            Box::new(FakeKeys(log.clone())),
            KeystrokeTiming::immediate(),
        );
        (control, log)
    }

    #[test]
    fn goto_sends_home_then_steps_right() {
        let (mut c, log) = keystroke(true);
        c.goto(4).unwrap();
        let keys = &log.borrow().keys;
        assert_eq!(keys[0], KeyStroke::plain(Key::Home));
        assert_eq!(keys.len(), 4);
        assert!(keys[1..].iter().all(|k| *k == KeyStroke::plain(Key::Right)));
    }

    #[test]
    fn goto_first_slide_is_home_only() {
        let (mut c, log) = keystroke(true);
        c.goto(1).unwrap();
        assert_eq!(log.borrow().keys, vec![KeyStroke::plain(Key::Home)]);
    }

    #[test]
    fn goto_requires_the_window() {
        let (mut c, log) = keystroke(false);
        assert_eq!(c.goto(3), Err(DriverError::WindowNotFound));
        assert!(log.borrow().keys.is_empty());
    }

    #[test]
    fn next_still_sends_without_window() {
        let (mut c, log) = keystroke(false);
        c.next().unwrap();
        c.previous().unwrap();
        c.exit().unwrap();
        assert_eq!(
            log.borrow().keys,
            vec![
                KeyStroke::plain(Key::Right),
                KeyStroke::plain(Key::Left),
                KeyStroke::plain(Key::Escape)
            ]
        );
        assert_eq!(log.borrow().activations, 0);
    }

    #[test]
    fn pen_and_eraser_use_shortcuts() {
        let (mut c, log) = keystroke(true);
        c.set_pointer_mode(PointerMode::Pen).unwrap();
        c.set_pointer_mode(PointerMode::Eraser).unwrap();
        assert_eq!(
            log.borrow().keys,
            vec![
                KeyStroke::ctrl(Key::Letter('P')),
                KeyStroke::ctrl(Key::Letter('E'))
            ]
        );
    }

    #[test]
    fn keystroke_cannot_do_arrow_color_or_clear() {
        let (mut c, log) = keystroke(true);
        assert!(matches!(
            c.set_pointer_mode(PointerMode::Arrow),
            Err(DriverError::Unsupported(_))
        ));
        assert!(matches!(
            c.set_pen_color(PenColor::RED),
            Err(DriverError::Unsupported(_))
        ));
        assert!(matches!(c.clear_ink(), Err(DriverError::Unsupported(_))));
        assert!(log.borrow().keys.is_empty());
    }
}
