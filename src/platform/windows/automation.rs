//! PowerPoint / WPS automation over `IDispatch`.

use std::path::Path;

use tracing::{debug, info, trace, warn};

use super::ffi::com::{int_arg, str_arg, ComApartment, Dispatch};
use super::input::activate_window;
use crate::error::{DriverError, DriverResult};
use crate::events;
use crate::model::{PenColor, OFFICE_PROG_ID, SHAPE_TYPE_INK, WPS_PROG_IDS};
use crate::poller::ThumbnailJobs;
use crate::presentation::{AppKind, PointerMode, PresentationApp, SlideShowView, WindowId};
use crate::thumbnails::{spawn_export, SlideExporter, ThumbnailCache};

/// Registered ProgIDs in probe order.
fn candidates() -> impl Iterator<Item = (&'static str, AppKind)> {
    std::iter::once((OFFICE_PROG_ID, AppKind::Office))
        .chain(WPS_PROG_IDS.iter().map(|id| (*id, AppKind::Wps)))
}

fn attach() -> DriverResult<(Dispatch, AppKind)> {
    for (prog_id, kind) in candidates() {
        match Dispatch::active(prog_id) {
            Ok(app) => return Ok((app, kind)),
            Err(e) => trace!(prog_id, error = %e, "not running"),
        }
    }
    Err(DriverError::NotRunning)
}

/// The application object, reconnected lazily.
#[derive(Default)]
pub struct ComPresentationApp {
    app: Option<Dispatch>,
    kind: Option<AppKind>,
}

impl ComPresentationApp {
    pub fn new() -> Self {
        Self::default()
    }

    fn app(&mut self) -> DriverResult<Dispatch> {
        if let Some(app) = &self.app {
            return Ok(app.clone());
        }
        self.connect()?;
        self.app.clone().ok_or(DriverError::NotRunning)
    }

    fn first_slideshow_window(&mut self) -> DriverResult<Dispatch> {
        let windows = self.app()?.object("SlideShowWindows")?;
        if windows.int("Count")? <= 0 {
            return Err(DriverError::NoSlideShow);
        }
        windows.item(1)
    }

    fn try_active_view(&mut self) -> DriverResult<Box<dyn SlideShowView>> {
        let view = self.first_slideshow_window()?.object("View")?;
        Ok(Box::new(ComSlideShowView { view }))
    }
}

impl PresentationApp for ComPresentationApp {
    fn connect(&mut self) -> DriverResult<AppKind> {
        match attach() {
            Ok((app, kind)) => {
                if self.kind != Some(kind) {
                    info!(?kind, "attached to presentation application");
                }
                self.app = Some(app);
                self.kind = Some(kind);
                Ok(kind)
            }
            Err(e) => {
                self.app = None;
                self.kind = None;
                Err(e)
            }
        }
    }

    fn active_view(&mut self) -> DriverResult<Box<dyn SlideShowView>> {
        match self.try_active_view() {
            Err(DriverError::Call { op, reason }) => {
                debug!(op, %reason, "stale automation connection, reconnecting");
                self.connect()?;
                self.try_active_view()
            }
            other => other,
        }
    }

    fn slide_count(&mut self) -> DriverResult<u32> {
        let count = self
            .app()?
            .object("ActivePresentation")?
            .object("Slides")?
            .int("Count")?;
        Ok(count.max(0) as u32)
    }

    fn presentation_path(&mut self) -> DriverResult<String> {
        self.app()?.object("ActivePresentation")?.string("FullName")
    }

    fn activate_slideshow_window(&mut self) -> DriverResult<()> {
        let hwnd = self.first_slideshow_window()?.int("HWND")?;
        activate_window(WindowId(hwnd as isize))
    }
}

/// `SlideShowWindows(1).View`
pub struct ComSlideShowView {
    view: Dispatch,
}

impl SlideShowView for ComSlideShowView {
    fn slide_index(&mut self) -> DriverResult<u32> {
        let index = self.view.object("Slide")?.int("SlideIndex")?;
        Ok(index.max(1) as u32)
    }

    fn next(&mut self) -> DriverResult<()> {
        self.view.call("Next", &[])
    }

    fn previous(&mut self) -> DriverResult<()> {
        self.view.call("Previous", &[])
    }

    fn goto(&mut self, index: u32) -> DriverResult<()> {
        self.view.call("GotoSlide", &[int_arg(index as i32)])
    }

    fn pointer_code(&mut self) -> DriverResult<i32> {
        self.view.int("PointerType")
    }

    fn set_pointer_mode(&mut self, mode: PointerMode) -> DriverResult<()> {
        self.view.put("PointerType", int_arg(mode.code()))
    }

    fn set_pointer_color(&mut self, color: PenColor) -> DriverResult<()> {
        self.view
            .object("PointerColor")?
            .put("RGB", int_arg(color.to_bgr() as i32))
    }

    fn erase_drawing(&mut self) -> DriverResult<()> {
        self.view.call("EraseDrawing", &[])
    }

    fn exit(&mut self) -> DriverResult<()> {
        self.view.call("Exit", &[])
    }

    fn slide_has_ink(&mut self) -> DriverResult<bool> {
        let shapes = self.view.object("Slide")?.object("Shapes")?;
        let count = shapes.int("Count")?;
        for i in 1..=count {
            if shapes.item(i)?.int("Type")? == SHAPE_TYPE_INK {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Exports slides of one presentation from a worker thread.
///
/// Field order matters: the slide collection must be released before
/// the apartment is torn down.
pub struct ComSlideExporter {
    slides: Dispatch,
    _apartment: ComApartment,
}

impl SlideExporter for ComSlideExporter {
    fn export_slide(&mut self, index: u32, dest: &Path, width: u32, height: u32) -> DriverResult<()> {
        let dest = dest.to_string_lossy();
        self.slides.item(index as i32)?.call(
            "Export",
            &[
                str_arg(&dest),
                str_arg("JPG"),
                int_arg(width as i32),
                int_arg(height as i32),
            ],
        )
    }
}

/// Attach to the application on the calling thread and check the active
/// presentation is still `presentation_path`.
pub fn connect_exporter(presentation_path: &str) -> DriverResult<Box<dyn SlideExporter>> {
    let apartment = ComApartment::init();
    let (app, _) = attach()?;
    let presentation = app.object("ActivePresentation")?;
    let current = presentation.string("FullName")?;
    if current != presentation_path {
        return Err(DriverError::call(
            "ActivePresentation.FullName",
            "presentation changed before export started",
        ));
    }
    Ok(Box::new(ComSlideExporter {
        slides: presentation.object("Slides")?,
        _apartment: apartment,
    }))
}

/// [`ThumbnailJobs`] that exports on a background thread and reports
/// through the global event bus.
pub struct BackgroundThumbnails {
    cache: ThumbnailCache,
}

impl BackgroundThumbnails {
    pub fn new(cache: ThumbnailCache) -> Self {
        Self { cache }
    }
}

impl ThumbnailJobs for BackgroundThumbnails {
    fn start(&mut self, presentation_path: &str, cache_key: &str, slide_count: u32) {
        let Some(publisher) = events::publisher() else {
            warn!("event bus not initialised, skipping thumbnail export");
            return;
        };
        let path = presentation_path.to_owned();
        let spawned = spawn_export(
            self.cache.clone(),
            cache_key.to_owned(),
            slide_count,
            move || connect_exporter(&path),
            publisher,
        );
        if let Err(e) = spawned {
            warn!(error = %e, "could not start thumbnail thread");
        }
    }
}
