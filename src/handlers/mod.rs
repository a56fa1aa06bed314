//! Routing of [`AppEvent`](crate::events::AppEvent)s into the
//! [`AppContext`](crate::app::AppContext).
//!
//! The host drains the bus on a short timer and hands each batch to
//! [`dispatch_events`], which stops at the first `Quit`.

pub mod dispatcher;

pub use dispatcher::dispatch_events;
