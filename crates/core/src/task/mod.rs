//! Background task execution and UI-update coordination.
//!
//! A [`Dispatcher`] lives on the interface's update thread. It validates
//! queries, hands them to a single background worker over a channel and hands
//! out a [`TaskHandle`] for each one. The worker runs search then generation
//! and streams [`TaskProgress`] and exactly one [`TaskOutcome`] back. The
//! dispatcher drains those messages on the update thread and applies them to
//! an [`AnswerView`] only when their handle is still the latest one, so an
//! older task that finishes late can never overwrite a newer result.

mod dispatch;
pub mod runtime;
mod view;

use std::fmt;

pub use dispatch::Dispatcher;
use lore_stream::task::TaskMessage;
pub use lore_stream::task::TaskUpdate;
pub use runtime::silence_background_panics;
pub use view::AnswerView;

use crate::answer::Answer;
use crate::error::TaskError;
use crate::results::SearchHit;

/// Token identifying one dispatched query.
///
/// Handles increase monotonically within a dispatcher, so comparing a
/// message's handle with the current one is enough to detect staleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
	pub(crate) fn new(id: u64) -> Self {
		Self(id)
	}

	/// Raw identifier used on the wire between worker and dispatcher.
	#[must_use]
	pub fn id(self) -> u64 {
		self.0
	}
}

impl fmt::Display for TaskHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Result of a task that completed without error.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSuccess {
	/// Passages found by the search stage.
	pub hits: Vec<SearchHit>,
	/// Generated answer. `None` when the search found nothing, in which case
	/// generation is skipped.
	pub answer: Option<Answer>,
}

/// Terminal result of one dispatched query.
pub type TaskOutcome = Result<TaskSuccess, TaskError>;

/// Non-terminal update emitted while a task runs.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskProgress {
	/// Search finished; generation is starting.
	Searched { hits: Vec<SearchHit> },
}

/// Message delivered from the worker to the dispatcher.
pub type TaskResult = TaskMessage<TaskProgress, TaskOutcome>;

#[cfg(test)]
mod tests;
