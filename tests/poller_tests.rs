//! Tests for the presentation poller against a scripted application.

mod common;

use common::{poller, running_slideshow, world, WidgetCall};
use podium::model::{MSG_COMPAT_ACTIVE, MSG_NO_INK, MSG_POINTER_FAILED};
use podium::poller::{Command, DriverKind, OverlayState};
use podium::presentation::{Key, KeyStroke, PointerMode};
use podium::thumbnails::cache_key;

// === Detection ===

#[test]
fn nothing_running_stays_hidden() {
    let w = world();
    let mut p = poller(&w, false);
    assert_eq!(p.tick(), OverlayState::Hidden);
    assert!(w.borrow().widgets.is_empty());
    assert_eq!(p.session().driver_kind, DriverKind::None);
}

#[test]
fn process_gone_hides_from_any_state() {
    for compat in [false, true] {
        let w = running_slideshow();
        let mut p = poller(&w, compat);
        assert!(p.tick().is_visible());

        {
            let mut w = w.borrow_mut();
            w.process_running = false;
            w.slideshow = false;
        }
        assert_eq!(p.tick(), OverlayState::Hidden);
        assert_eq!(w.borrow().widgets.last(), Some(&WidgetCall::Hide));
    }
}

#[test]
fn rich_session_syncs_page_and_pointer() {
    let w = running_slideshow();
    {
        let mut w = w.borrow_mut();
        w.slide = 3;
        w.total = 12;
        w.pointer_code = PointerMode::Pen.code();
    }
    let mut p = poller(&w, false);

    assert_eq!(p.tick(), OverlayState::VisibleRich);
    assert_eq!(
        w.borrow().widgets,
        vec![
            WidgetCall::Show,
            WidgetCall::Layout,
            WidgetCall::Page(3, 12),
            WidgetCall::Pointer(PointerMode::Pen),
        ]
    );
    let session = p.session();
    assert!(session.connected);
    assert_eq!(session.driver_kind, DriverKind::Rich);
    assert_eq!(session.current_slide, Some(3));
    assert_eq!(session.total_slides, Some(12));
    assert_eq!(session.pointer_mode, Some(PointerMode::Pen));
}

#[test]
fn slideshow_ending_hides_widgets() {
    let w = running_slideshow();
    let mut p = poller(&w, false);
    p.tick();

    // PowerPoint still open, but the show is over.
    w.borrow_mut().slideshow = false;
    assert_eq!(p.tick(), OverlayState::Hidden);
    assert_eq!(w.borrow().widgets.last(), Some(&WidgetCall::Hide));
    assert_eq!(p.session().current_slide, None);
}

// === Compatibility mode ===

#[test]
fn fallback_never_queries_the_view() {
    let w = running_slideshow();
    let mut p = poller(&w, true);

    assert_eq!(p.tick(), OverlayState::VisibleFallback);
    p.tick();

    let w = w.borrow();
    assert_eq!(w.active_view_calls, 0);
    assert_eq!(w.widgets, vec![WidgetCall::Show, WidgetCall::Layout]);
    assert_eq!(p.session().driver_kind, DriverKind::ProcessOnly);
    assert_eq!(p.session().current_slide, None);
}

#[test]
fn fallback_advisory_is_shown_once() {
    let w = running_slideshow();
    let mut p = poller(&w, true);
    p.tick();
    p.tick();
    assert_eq!(w.borrow().advisories, vec![MSG_COMPAT_ACTIVE.to_owned()]);
}

#[test]
fn fallback_navigation_uses_keys() {
    let w = running_slideshow();
    let mut p = poller(&w, true);
    p.tick();

    p.execute(Command::Next);
    p.execute(Command::Previous);
    p.execute(Command::SetPointerMode(PointerMode::Pen));

    let w = w.borrow();
    assert_eq!(
        w.keys,
        vec![
            KeyStroke::plain(Key::Right),
            KeyStroke::plain(Key::Left),
            KeyStroke::ctrl(Key::Letter('P')),
        ]
    );
    assert!(w.view_calls.is_empty());
}

#[test]
fn toggling_compatibility_rechecks_immediately() {
    let w = running_slideshow();
    let mut p = poller(&w, false);
    assert_eq!(p.tick(), OverlayState::VisibleRich);

    p.set_compatibility_mode(true);
    assert_eq!(p.state(), OverlayState::VisibleFallback);
    assert!(p.compatibility_mode());

    p.set_compatibility_mode(false);
    assert_eq!(p.state(), OverlayState::VisibleRich);
}

#[test]
fn arrow_without_automation_raises_advisory() {
    let w = running_slideshow();
    w.borrow_mut().arrow_fails = true;
    let mut p = poller(&w, true);
    p.tick();

    p.execute(Command::SetPointerMode(PointerMode::Arrow));
    assert_eq!(
        w.borrow().advisories,
        vec![MSG_COMPAT_ACTIVE.to_owned(), MSG_POINTER_FAILED.to_owned()]
    );
}

#[test]
fn arrow_in_compatibility_mode_falls_back_to_automation() {
    let w = running_slideshow();
    w.borrow_mut().pointer_code = PointerMode::Pen.code();
    let mut p = poller(&w, true);
    p.tick();

    p.execute(Command::SetPointerMode(PointerMode::Arrow));
    let w = w.borrow();
    assert_eq!(w.pointer_code, PointerMode::Arrow.code());
    assert_eq!(w.advisories, vec![MSG_COMPAT_ACTIVE.to_owned()]);
    assert!(w.keys.is_empty());
}

// === Rich commands ===

#[test]
fn rich_commands_go_to_the_view() {
    let w = running_slideshow();
    let mut p = poller(&w, false);
    p.tick();

    p.execute(Command::Goto(5));
    p.execute(Command::Next);
    assert_eq!(w.borrow().slide, 6);

    p.execute(Command::SetPenColor(podium::model::PenColor::RED));
    assert_eq!(
        w.borrow().view_calls,
        vec!["goto", "next", "set_pointer_mode", "set_pointer_color"]
    );
    assert!(w.borrow().keys.is_empty());
}

#[test]
fn commands_while_hidden_are_swallowed() {
    let w = world();
    let mut p = poller(&w, false);
    p.tick();
    p.execute(Command::Next);
    p.execute(Command::ClearInk);
    let w = w.borrow();
    assert!(w.view_calls.is_empty());
    assert!(w.advisories.is_empty());
}

// === Ink checks ===

#[test]
fn failed_ink_query_still_clears_without_advisory() {
    let w = running_slideshow();
    w.borrow_mut().ink = None;
    let mut p = poller(&w, false);
    p.tick();

    p.execute(Command::ClearInk);
    let w = w.borrow();
    assert_eq!(w.view_calls, vec!["erase_drawing"]);
    assert!(w.advisories.is_empty());
}

#[test]
fn confirmed_absence_warns_but_still_clears() {
    let w = running_slideshow();
    w.borrow_mut().ink = Some(false);
    let mut p = poller(&w, false);
    p.tick();

    p.execute(Command::ClearInk);
    let w = w.borrow();
    assert_eq!(w.view_calls, vec!["erase_drawing"]);
    assert_eq!(w.advisories, vec![MSG_NO_INK.to_owned()]);
}

#[test]
fn eraser_checks_ink_in_rich_mode() {
    let w = running_slideshow();
    w.borrow_mut().ink = Some(false);
    let mut p = poller(&w, false);
    p.tick();

    p.execute(Command::SetPointerMode(PointerMode::Eraser));
    let w = w.borrow();
    assert_eq!(w.pointer_code, PointerMode::Eraser.code());
    assert_eq!(w.advisories, vec![MSG_NO_INK.to_owned()]);
}

#[test]
fn present_ink_clears_silently() {
    let w = running_slideshow();
    let mut p = poller(&w, false);
    p.tick();
    p.execute(Command::ClearInk);
    assert!(w.borrow().advisories.is_empty());
}

// === Thumbnails ===

#[test]
fn thumbnails_are_requested_once_per_presentation() {
    let w = running_slideshow();
    let mut p = poller(&w, false);
    p.tick();
    p.tick();

    // End the show and start it again.
    w.borrow_mut().slideshow = false;
    p.tick();
    w.borrow_mut().slideshow = true;
    p.tick();

    let key = cache_key("C:\\talks\\deck.pptx");
    assert_eq!(
        w.borrow().thumbnail_jobs,
        vec![("C:\\talks\\deck.pptx".to_owned(), key.clone(), 10)]
    );

    assert_eq!(p.ready_thumbnail_key(), None);
    p.thumbnails_ready(&key, true);
    assert!(p.has_thumbnails(&key));
    assert_eq!(p.ready_thumbnail_key(), Some(key.as_str()));
}

#[test]
fn empty_export_is_retried_next_session() {
    let w = running_slideshow();
    let mut p = poller(&w, false);
    p.tick();

    let key = cache_key("C:\\talks\\deck.pptx");
    p.thumbnails_ready(&key, false);
    assert!(!p.has_thumbnails(&key));
    assert_eq!(p.ready_thumbnail_key(), None);

    w.borrow_mut().slideshow = false;
    p.tick();
    w.borrow_mut().slideshow = true;
    p.tick();
    assert_eq!(w.borrow().thumbnail_jobs.len(), 2);
}

#[test]
fn thumbnails_are_not_exported_in_fallback() {
    let w = running_slideshow();
    let mut p = poller(&w, true);
    p.tick();
    assert!(w.borrow().thumbnail_jobs.is_empty());
}
