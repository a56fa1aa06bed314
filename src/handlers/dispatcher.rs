//! Event dispatcher for handling application events.
//!
//! The host drains the event bus on its timer and passes the batch here.
//!
//! ```text
//! drain_events() → dispatch_events() → AppContext / Poller
//! ```
//!
//! Slideshow commands go to the poller, which routes them to the back end
//! for the current overlay state; tool toggles and settings go to the
//! context.

use std::ops::ControlFlow;

use tracing::{debug, info};

use crate::app::{AppContext, Tool};
use crate::events::AppEvent;
use crate::model::{MSG_AUTORUN_OFF, MSG_AUTORUN_ON, MSG_COMPAT_OFF, MSG_COMPAT_ON};
use crate::poller::Command;

/// Dispatch a batch of events. Stops at, and returns `Break` for,
/// [`AppEvent::Quit`].
pub fn dispatch_events(ctx: &mut AppContext, events: Vec<AppEvent>) -> ControlFlow<()> {
    for event in events {
        if dispatch_single_event(ctx, event).is_break() {
            return ControlFlow::Break(());
        }
    }
    ControlFlow::Continue(())
}

fn dispatch_single_event(ctx: &mut AppContext, event: AppEvent) -> ControlFlow<()> {
    debug!(event = event.description(), "dispatch");

    match event {
        AppEvent::NextSlide => ctx.poller.execute(Command::Next),
        AppEvent::PreviousSlide => ctx.poller.execute(Command::Previous),
        AppEvent::GotoSlide(index) => ctx.poller.execute(Command::Goto(index)),
        AppEvent::SetPointerMode(mode) => ctx.poller.execute(Command::SetPointerMode(mode)),
        AppEvent::SetPenColor(color) => {
            ctx.annotation.set_pen_color(color);
            ctx.poller.execute(Command::SetPenColor(color));
        }
        AppEvent::ClearInk => ctx.poller.execute(Command::ClearInk),
        AppEvent::ExitSlideShow => ctx.poller.execute(Command::Exit),

        AppEvent::ToggleSpotlight => ctx.toggle_tool(Tool::Spotlight),
        AppEvent::ToggleTimer => ctx.toggle_tool(Tool::Timer),
        AppEvent::ToggleSketchPad => ctx.toggle_tool(Tool::SketchPad),
        AppEvent::ToggleAnnotation => ctx.toggle_tool(Tool::Annotation),

        AppEvent::SetCompatibilityMode(enabled) => {
            ctx.set_compatibility_mode(enabled);
            ctx.notify(if enabled { MSG_COMPAT_ON } else { MSG_COMPAT_OFF });
        }
        AppEvent::SetAutorun(enabled) => {
            if ctx.set_autorun(enabled) {
                ctx.notify(if enabled { MSG_AUTORUN_ON } else { MSG_AUTORUN_OFF });
            }
        }
        AppEvent::SetTheme(theme) => ctx.set_theme(theme),

        AppEvent::ThumbnailsReady { cache_key, cached } => {
            ctx.poller.thumbnails_ready(&cache_key, cached)
        }

        AppEvent::Quit => {
            info!("quit requested");
            ctx.poller.execute(Command::Exit);
            ctx.shutdown();
            return ControlFlow::Break(());
        }
    }
    ControlFlow::Continue(())
}
