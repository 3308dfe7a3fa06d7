//! Core crate for building and running the `lore` question-answering loop.
//!
//! The root module re-exports the data model, the task dispatcher and the
//! backend capability traits so that front-ends can drive a session without
//! digging through the module hierarchy.

pub mod answer;
pub mod app_dirs;
pub mod backend;
pub mod catalog;
mod error;
pub mod query;
pub mod results;
pub mod task;

pub use crate::answer::Answer;
pub use crate::backend::{AnswerBackend, Backends, CommandBackend, SearchBackend, Unconfigured};
pub use crate::error::{ServiceError, TaskError, ValidationError};
pub use crate::query::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT, Query, SearchRequest};
pub use crate::results::{PageRange, SearchHit};
pub use crate::task::{
	AnswerView, Dispatcher, TaskHandle, TaskOutcome, TaskProgress, TaskSuccess,
	silence_background_panics,
};
