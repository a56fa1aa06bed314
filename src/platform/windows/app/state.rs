//! Thread-local home of the [`AppContext`].
//!
//! Window procedures are re-entered whenever a handler calls back into
//! Win32 (showing a window sends `WM_SHOWWINDOW` synchronously, for
//! example), so every access goes through [`with_app`], which skips the
//! work instead of panicking when the context is already borrowed.
//! Anything that must not be skipped is posted and handled later.

use std::cell::RefCell;

use tracing::trace;

use crate::app::AppContext;

thread_local! {
    static APP: RefCell<Option<AppContext>> = const { RefCell::new(None) };
}

pub fn install(ctx: AppContext) {
    APP.with(|cell| *cell.borrow_mut() = Some(ctx));
}

/// Remove the context, e.g. for shutdown after the message loop ends.
pub fn take() -> Option<AppContext> {
    APP.with(|cell| cell.try_borrow_mut().ok().and_then(|mut slot| slot.take()))
}

/// Run `f` against the context. `None` if it is not installed or is
/// already borrowed further up the stack.
pub fn with_app<R>(f: impl FnOnce(&mut AppContext) -> R) -> Option<R> {
    APP.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.as_mut().map(f),
        Err(_) => {
            trace!("app context busy, skipping");
            None
        }
    })
}
