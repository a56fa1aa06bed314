//! Scripted stand-ins for the presentation application, the OS lookups
//! and the overlay widgets. Every fake shares one [`World`] so a test can
//! change what the "application" reports between ticks and inspect what
//! the poller did.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use podium::error::{DriverError, DriverResult};
use podium::model::PenColor;
use podium::poller::{Notifier, OverlayWidgets, PollerParts, ThumbnailJobs};
use podium::presentation::{
    AppKind, KeySender, KeyStroke, KeystrokeTiming, PointerMode, PresentationApp, ProcessProbe,
    SlideShowView, WindowId, WindowLocator,
};
use podium::Poller;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCall {
    Show,
    Hide,
    Layout,
    Page(u32, u32),
    Pointer(PointerMode),
}

#[derive(Debug)]
pub struct World {
    // What the fakes report.
    pub process_running: bool,
    pub slideshow: bool,
    pub slide: u32,
    pub total: u32,
    pub pointer_code: i32,
    /// `None` makes the ink query fail.
    pub ink: Option<bool>,
    pub arrow_fails: bool,
    pub path: String,

    // What the poller did.
    pub active_view_calls: usize,
    pub view_calls: Vec<&'static str>,
    pub keys: Vec<KeyStroke>,
    pub widgets: Vec<WidgetCall>,
    pub advisories: Vec<String>,
    pub thumbnail_jobs: Vec<(String, String, u32)>,
}

impl Default for World {
    fn default() -> Self {
        Self {
            process_running: false,
            slideshow: false,
            slide: 1,
            total: 10,
            pointer_code: PointerMode::Arrow.code(),
            ink: Some(true),
            arrow_fails: false,
            path: "C:\\talks\\deck.pptx".to_owned(),
            active_view_calls: 0,
            view_calls: Vec::new(),
            keys: Vec::new(),
            widgets: Vec::new(),
            advisories: Vec::new(),
            thumbnail_jobs: Vec::new(),
        }
    }
}

pub type Shared = Rc<RefCell<World>>;

pub fn world() -> Shared {
    Rc::new(RefCell::new(World::default()))
}

/// A presentation process with a live slideshow.
pub fn running_slideshow() -> Shared {
    let w = world();
    {
        let mut w = w.borrow_mut();
        w.process_running = true;
        w.slideshow = true;
    }
    w
}

pub fn poller(world: &Shared, compatibility_mode: bool) -> Poller {
    Poller::new(
        PollerParts {
            probe: Box::new(FakeProbe(world.clone())),
            app: Box::new(FakeApp(world.clone())),
            windows: Box::new(FakeWindows(world.clone())),
            keys: Box::new(FakeKeys(world.clone())),
            timing: KeystrokeTiming::immediate(),
            widgets: Box::new(FakeWidgets(world.clone())),
            notifier: Box::new(FakeNotifier(world.clone())),
            thumbnails: Box::new(FakeThumbnails(world.clone())),
        },
        compatibility_mode,
    )
}

pub struct FakeProbe(pub Shared);

impl ProcessProbe for FakeProbe {
    fn presentation_running(&mut self) -> bool {
        self.0.borrow().process_running
    }
}

pub struct FakeApp(pub Shared);

impl PresentationApp for FakeApp {
    fn connect(&mut self) -> DriverResult<AppKind> {
        if self.0.borrow().process_running {
            Ok(AppKind::Office)
        } else {
            Err(DriverError::NotRunning)
        }
    }

    fn active_view(&mut self) -> DriverResult<Box<dyn SlideShowView>> {
        let mut w = self.0.borrow_mut();
        w.active_view_calls += 1;
        if w.slideshow {
            Ok(Box::new(FakeView(self.0.clone())))
        } else {
            Err(DriverError::NoSlideShow)
        }
    }

    fn slide_count(&mut self) -> DriverResult<u32> {
        let w = self.0.borrow();
        if w.slideshow {
            Ok(w.total)
        } else {
            Err(DriverError::NoSlideShow)
        }
    }

    fn presentation_path(&mut self) -> DriverResult<String> {
        Ok(self.0.borrow().path.clone())
    }

    fn activate_slideshow_window(&mut self) -> DriverResult<()> {
        Ok(())
    }
}

pub struct FakeView(pub Shared);

impl FakeView {
    fn record(&self, call: &'static str) {
        self.0.borrow_mut().view_calls.push(call);
    }
}

impl SlideShowView for FakeView {
    fn slide_index(&mut self) -> DriverResult<u32> {
        Ok(self.0.borrow().slide)
    }

    fn next(&mut self) -> DriverResult<()> {
        self.record("next");
        self.0.borrow_mut().slide += 1;
        Ok(())
    }

    fn previous(&mut self) -> DriverResult<()> {
        self.record("previous");
        let mut w = self.0.borrow_mut();
        w.slide = w.slide.saturating_sub(1).max(1);
        Ok(())
    }

    fn goto(&mut self, index: u32) -> DriverResult<()> {
        self.record("goto");
        self.0.borrow_mut().slide = index;
        Ok(())
    }

    fn pointer_code(&mut self) -> DriverResult<i32> {
        Ok(self.0.borrow().pointer_code)
    }

    fn set_pointer_mode(&mut self, mode: PointerMode) -> DriverResult<()> {
        if mode == PointerMode::Arrow && self.0.borrow().arrow_fails {
            return Err(DriverError::call("View.PointerType", "rejected"));
        }
        self.record("set_pointer_mode");
        self.0.borrow_mut().pointer_code = mode.code();
        Ok(())
    }

    fn set_pointer_color(&mut self, _color: PenColor) -> DriverResult<()> {
        self.record("set_pointer_color");
        Ok(())
    }

    fn erase_drawing(&mut self) -> DriverResult<()> {
        self.record("erase_drawing");
        Ok(())
    }

    fn exit(&mut self) -> DriverResult<()> {
        self.record("exit");
        self.0.borrow_mut().slideshow = false;
        Ok(())
    }

    fn slide_has_ink(&mut self) -> DriverResult<bool> {
        self.0
            .borrow()
            .ink
            .ok_or_else(|| DriverError::call("Slide.Shapes", "RPC server unavailable"))
    }
}

pub struct FakeWindows(pub Shared);

impl WindowLocator for FakeWindows {
    fn find_slideshow_window(&mut self) -> DriverResult<WindowId> {
        if self.0.borrow().process_running {
            Ok(WindowId(7))
        } else {
            Err(DriverError::WindowNotFound)
        }
    }

    fn activate(&mut self, _window: WindowId) -> DriverResult<()> {
        Ok(())
    }
}

pub struct FakeKeys(pub Shared);

impl KeySender for FakeKeys {
    fn send(&mut self, stroke: KeyStroke) -> DriverResult<()> {
        self.0.borrow_mut().keys.push(stroke);
        Ok(())
    }
}

pub struct FakeWidgets(pub Shared);

impl OverlayWidgets for FakeWidgets {
    fn show(&mut self) {
        self.0.borrow_mut().widgets.push(WidgetCall::Show);
    }

    fn hide(&mut self) {
        self.0.borrow_mut().widgets.push(WidgetCall::Hide);
    }

    fn layout(&mut self) {
        self.0.borrow_mut().widgets.push(WidgetCall::Layout);
    }

    fn update_page(&mut self, current: u32, total: u32) {
        self.0.borrow_mut().widgets.push(WidgetCall::Page(current, total));
    }

    fn set_pointer_mode(&mut self, mode: PointerMode) {
        self.0.borrow_mut().widgets.push(WidgetCall::Pointer(mode));
    }
}

pub struct FakeNotifier(pub Shared);

impl Notifier for FakeNotifier {
    fn advisory(&mut self, message: &str) {
        self.0.borrow_mut().advisories.push(message.to_owned());
    }
}

pub struct FakeThumbnails(pub Shared);

impl ThumbnailJobs for FakeThumbnails {
    fn start(&mut self, presentation_path: &str, cache_key: &str, slide_count: u32) {
        self.0.borrow_mut().thumbnail_jobs.push((
            presentation_path.to_owned(),
            cache_key.to_owned(),
            slide_count,
        ));
    }
}
