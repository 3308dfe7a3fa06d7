//! Typed progress/result streaming for background tasks.
//!
//! A task streams zero or more [`TaskUpdate::Progress`] messages followed by
//! a single [`TaskUpdate::Finished`] message. Producers can ask the stream
//! whether their task is still the most recent one and abandon work early.

mod channel;

pub use channel::{TaskMarker, TaskMessage, TaskStream, TaskUpdate};
