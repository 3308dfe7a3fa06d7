//! Interactive terminal UI for `lore`.
//!
//! The [`App`] owns the query input, the task dispatcher and the panels that
//! display passages, answers and errors. [`run`] drives it from the terminal
//! until the user quits.

mod app;
pub mod components;
mod config;
pub mod input;
mod runtime;
pub mod style;

pub use app::{App, SessionSummary};
pub use runtime::run;

pub use crate::input::QueryInput;
pub use crate::style::{StyleConfig, Theme, default_theme};
