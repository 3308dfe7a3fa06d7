//! Core application state and behavior for the interactive assistant.
//!
//! The [`App`] type ties the query input, the task dispatcher and the panels
//! together. Supporting modules split the implementation into input handling,
//! rendering, search coordination and per-panel state.

mod actions;
mod answer;
mod examples;
mod render;
mod results;
mod search;
mod session;
mod sources;
mod state;

pub use session::SessionSummary;
pub use state::App;
