//! Background worker thread and command infrastructure.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Instant;

use lore_stream::task::TaskStream;
use tracing::{debug, info, warn};

use super::{TaskHandle, TaskOutcome, TaskProgress, TaskResult, TaskSuccess};
use crate::backend::Backends;
use crate::catalog::CATALOG_THREAD;
use crate::error::TaskError;
use crate::query::Query;

/// Name given to the background worker thread.
pub const WORKER_THREAD: &str = "lore-worker";

/// Commands understood by the background worker.
#[derive(Debug)]
pub enum TaskCommand {
	/// Run search and generation for a query.
	Run {
		/// Identifier that allows the UI to correlate responses with the originating query.
		handle: TaskHandle,
		/// Validated query.
		query: Query,
	},
	/// Stop the background worker thread.
	Shutdown,
}

/// Launches the background worker thread and returns communication channels.
///
/// The returned counter holds the id of the most recently issued task. The
/// worker reads it to skip work that has already been superseded.
pub fn spawn(backends: Backends) -> (Sender<TaskCommand>, Receiver<TaskResult>, Arc<AtomicU64>) {
	let (command_tx, command_rx) = mpsc::channel();
	let (result_tx, result_rx) = mpsc::channel();
	let latest_task_id = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest_task_id);

	// A worker that fails to start drops its channel ends; the dispatcher
	// then reports every submission as a failure.
	if let Err(err) = thread::Builder::new()
		.name(WORKER_THREAD.into())
		.spawn(move || worker_loop(&backends, command_rx, result_tx, thread_latest))
	{
		warn!(%err, "failed to start background worker");
	}

	(command_tx, result_rx, latest_task_id)
}

fn worker_loop(
	backends: &Backends,
	command_rx: Receiver<TaskCommand>,
	result_tx: Sender<TaskResult>,
	latest_task_id: Arc<AtomicU64>,
) {
	while let Ok(command) = command_rx.recv() {
		if !handle_command(backends, &result_tx, &latest_task_id, command) {
			break;
		}
	}
	debug!("background worker stopped");
}

fn handle_command(
	backends: &Backends,
	result_tx: &Sender<TaskResult>,
	latest_task_id: &AtomicU64,
	command: TaskCommand,
) -> bool {
	match command {
		TaskCommand::Run { handle, query } => {
			let stream = TaskStream::new(result_tx, handle.id(), latest_task_id);
			run_task(backends, &query, stream)
		}
		TaskCommand::Shutdown => false,
	}
}

/// Run both stages for one query and stream the result.
///
/// Returns `false` once the receiving side has gone away.
pub fn run_task(
	backends: &Backends,
	query: &Query,
	stream: TaskStream<'_, TaskProgress, TaskOutcome>,
) -> bool {
	let handle = TaskHandle::new(stream.id());
	if !stream.is_current() {
		debug!(%handle, "skipping superseded task");
		return true;
	}

	let started = Instant::now();
	let request = query.search_request();
	let hits = match guarded(|| backends.search.search(&request)) {
		Ok(Ok(hits)) => hits,
		Ok(Err(err)) => {
			warn!(%handle, error = %err, "search backend failed");
			return stream.finish(Err(TaskError::Search(err)));
		}
		Err(message) => {
			warn!(%handle, %message, "search backend panicked");
			return stream.finish(Err(TaskError::Unexpected(message)));
		}
	};
	info!(
		%handle,
		hits = hits.len(),
		elapsed_ms = started.elapsed().as_millis() as u64,
		"search finished"
	);

	if hits.is_empty() {
		return stream.finish(Ok(TaskSuccess { hits, answer: None }));
	}

	if !stream.is_current() {
		debug!(%handle, "task superseded before generation");
		return true;
	}
	if !stream.progress(TaskProgress::Searched { hits: hits.clone() }) {
		return false;
	}

	let generation_started = Instant::now();
	let outcome = match guarded(|| backends.answer.generate(&query.text, &hits)) {
		Ok(Ok(answer)) => {
			info!(
				%handle,
				chars = answer.text.len(),
				cost = answer.cost,
				elapsed_ms = generation_started.elapsed().as_millis() as u64,
				"answer generated"
			);
			Ok(TaskSuccess {
				hits,
				answer: Some(answer),
			})
		}
		Ok(Err(err)) => {
			warn!(%handle, error = %err, "generation backend failed");
			Err(TaskError::Generation(err))
		}
		Err(message) => {
			warn!(%handle, %message, "generation backend panicked");
			Err(TaskError::Unexpected(message))
		}
	};

	stream.finish(outcome)
}

/// Keep the process panic hook away from background threads.
///
/// Backend panics are caught and reported as task failures, yet the hook runs
/// before unwinding starts. Hooks that restore the terminal must not fire for
/// them, so the previously installed hook is only chained for other threads.
pub fn silence_background_panics() {
	let previous = panic::take_hook();
	panic::set_hook(Box::new(move |info| {
		if !is_background_thread(thread::current().name()) {
			previous(info);
		}
	}));
}

fn is_background_thread(name: Option<&str>) -> bool {
	matches!(name, Some(WORKER_THREAD | CATALOG_THREAD))
}

/// Run `f`, converting a panic into its message.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, String> {
	panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		(*message).to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"backend panicked".to_string()
	}
}
