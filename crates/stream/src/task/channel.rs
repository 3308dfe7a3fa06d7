use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;

use crate::{DataStream, StreamEnvelope};

/// Update emitted for a running task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskUpdate<P, O> {
	/// Intermediate state. More updates follow.
	Progress(P),
	/// Terminal result. Nothing follows for the same identifier.
	Finished(O),
}

impl<P, O> TaskUpdate<P, O> {
	/// Whether this update closes the task.
	#[must_use]
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Finished(_))
	}
}

/// Unit type used as stream envelope marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskMarker;

/// Envelope carrying a single task update.
pub type TaskMessage<P, O> = StreamEnvelope<TaskMarker, TaskUpdate<P, O>>;

/// Handle used by a worker to stream one task's updates back to the UI.
pub struct TaskStream<'a, P, O> {
	inner: DataStream<'a, TaskMarker, TaskUpdate<P, O>>,
	latest: &'a AtomicU64,
}

impl<'a, P: Send + 'static, O: Send + 'static> TaskStream<'a, P, O> {
	/// Create a stream for task `id`. `latest` holds the identifier of the
	/// most recently issued task.
	#[must_use]
	pub fn new(tx: &'a Sender<TaskMessage<P, O>>, id: u64, latest: &'a AtomicU64) -> Self {
		Self {
			inner: DataStream::new(tx, id, TaskMarker),
			latest,
		}
	}

	/// Identifier of the task.
	#[must_use]
	pub fn id(&self) -> u64 {
		self.inner.id()
	}

	/// Whether no newer task has been issued since this one.
	#[must_use]
	pub fn is_current(&self) -> bool {
		self.latest.load(Ordering::Acquire) == self.inner.id()
	}

	/// Send an intermediate update.
	pub fn progress(&self, progress: P) -> bool {
		self.inner.send(TaskUpdate::Progress(progress), false)
	}

	/// Send the terminal result, consuming the stream so it cannot be sent
	/// twice.
	pub fn finish(self, outcome: O) -> bool {
		self.inner.send(TaskUpdate::Finished(outcome), true)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::mpsc;

	use super::*;

	#[test]
	fn superseded_stream_reports_not_current() {
		let (tx, _rx) = mpsc::channel::<TaskMessage<(), ()>>();
		let latest = AtomicU64::new(1);
		let stream = TaskStream::new(&tx, 1, &latest);
		assert!(stream.is_current());

		latest.store(2, Ordering::Release);
		assert!(!stream.is_current());
	}

	#[test]
	fn finish_marks_envelope_complete() {
		let (tx, rx) = mpsc::channel::<TaskMessage<u8, &'static str>>();
		let latest = AtomicU64::new(4);
		let stream = TaskStream::new(&tx, 4, &latest);
		stream.progress(1);
		stream.finish("done");

		let progress = rx.recv().expect("progress");
		assert!(!progress.complete);
		assert!(!progress.payload.is_terminal());

		let finished = rx.recv().expect("finished");
		assert!(finished.complete);
		assert_eq!(finished.payload, TaskUpdate::Finished("done"));
		assert_eq!(finished.id, 4);
	}
}
