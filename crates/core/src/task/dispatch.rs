use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use lore_stream::task::TaskUpdate;
use tracing::{debug, warn};

use super::runtime::{self, TaskCommand};
use super::{AnswerView, TaskHandle, TaskOutcome, TaskProgress, TaskResult, TaskSuccess};
use crate::backend::Backends;
use crate::error::{TaskError, ValidationError};
use crate::query::Query;

/// Dispatches queries to the background worker and publishes their results.
///
/// Lives on the interface's update thread. Only updates belonging to the most
/// recently submitted query are applied; everything else is dropped.
pub struct Dispatcher {
	tx: Sender<TaskCommand>,
	rx: Receiver<TaskResult>,
	latest_task_id: Arc<AtomicU64>,
	next_task_id: u64,
	current: Option<TaskHandle>,
}

impl Dispatcher {
	/// Start a worker thread that uses `backends` for every task.
	#[must_use]
	pub fn spawn(backends: Backends) -> Self {
		let (tx, rx, latest_task_id) = runtime::spawn(backends);
		Self {
			tx,
			rx,
			latest_task_id,
			next_task_id: 0,
			current: None,
		}
	}

	/// Validate `query` and queue it, superseding any task still running.
	pub fn submit(&mut self, query: Query) -> Result<TaskHandle, ValidationError> {
		self.start(query).map(|(handle, _)| handle)
	}

	/// Submit `query` and reflect the result on `view`.
	///
	/// A rejected query is shown as an error and starts nothing. An accepted
	/// one puts the view into its searching state.
	pub fn dispatch(
		&mut self,
		query: Query,
		view: &mut dyn AnswerView,
	) -> Result<TaskHandle, ValidationError> {
		match self.start(query) {
			Ok((handle, query)) => {
				view.begin_search(&query);
				Ok(handle)
			}
			Err(err) => {
				view.show_error(&err.to_string());
				Err(err)
			}
		}
	}

	fn start(&mut self, query: Query) -> Result<(TaskHandle, Query), ValidationError> {
		let query = query.validated()?;
		self.next_task_id += 1;
		let handle = TaskHandle::new(self.next_task_id);
		self.latest_task_id.store(handle.id(), Ordering::Release);
		if let Some(previous) = self.current.replace(handle) {
			debug!(%previous, %handle, "superseding running task");
		}
		debug!(%handle, limit = query.limit, "submitting query");

		let command = TaskCommand::Run {
			handle,
			query: query.clone(),
		};
		if self.tx.send(command).is_err() {
			warn!(%handle, "background worker is not running");
		}
		Ok((handle, query))
	}

	/// Abandon the running task. Its late results are discarded.
	///
	/// Returns `false` when nothing was running.
	pub fn cancel(&mut self, view: &mut dyn AnswerView) -> bool {
		let Some(handle) = self.current.take() else {
			return false;
		};
		self.latest_task_id.store(0, Ordering::Release);
		debug!(%handle, "cancelled task");
		view.finish();
		true
	}

	/// Whether a submitted task has not yet produced its outcome.
	#[must_use]
	pub fn is_searching(&self) -> bool {
		self.current.is_some()
	}

	/// Handle of the task whose results will be published.
	#[must_use]
	pub fn current(&self) -> Option<TaskHandle> {
		self.current
	}

	/// Whether updates tagged with `handle` should reach the view.
	#[must_use]
	pub fn matches_latest(&self, handle: TaskHandle) -> bool {
		self.current == Some(handle)
	}

	/// Apply every pending worker message to `view`.
	///
	/// Returns the number of updates that were published.
	pub fn pump(&mut self, view: &mut dyn AnswerView) -> usize {
		let mut published = 0;
		loop {
			match self.rx.try_recv() {
				Ok(message) => {
					if self.publish(message, view) {
						published += 1;
					}
				}
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					if let Some(handle) = self.current {
						let outcome: TaskOutcome = Err(TaskError::Unexpected(
							"the background worker stopped".to_string(),
						));
						let message = TaskResult {
							id: handle.id(),
							kind: lore_stream::task::TaskMarker,
							payload: TaskUpdate::Finished(outcome),
							complete: true,
						};
						if self.publish(message, view) {
							published += 1;
						}
					}
					break;
				}
			}
		}
		published
	}

	/// Apply one worker message to `view` if it belongs to the current task.
	///
	/// Returns `false` when the message was stale and dropped.
	pub fn publish(&mut self, message: TaskResult, view: &mut dyn AnswerView) -> bool {
		let handle = TaskHandle::new(message.id);
		if !self.matches_latest(handle) {
			debug!(%handle, "dropping stale update");
			return false;
		}

		match message.payload {
			TaskUpdate::Progress(TaskProgress::Searched { hits }) => view.show_hits(&hits),
			TaskUpdate::Finished(outcome) => {
				self.current = None;
				apply_outcome(outcome, view);
				view.finish();
			}
		}
		true
	}

	/// Ask the worker thread to exit once its current task is done.
	pub fn shutdown(&self) {
		let _ = self.tx.send(TaskCommand::Shutdown);
	}
}

impl Drop for Dispatcher {
	fn drop(&mut self) {
		self.shutdown();
	}
}

fn apply_outcome(outcome: TaskOutcome, view: &mut dyn AnswerView) {
	match outcome {
		Ok(TaskSuccess {
			hits,
			answer: Some(answer),
		}) => {
			view.show_hits(&hits);
			view.show_answer(&answer);
		}
		Ok(TaskSuccess { hits, answer: None }) => {
			view.show_hits(&hits);
			view.show_no_context();
		}
		Err(err) => view.show_error(&err.user_message()),
	}
}
