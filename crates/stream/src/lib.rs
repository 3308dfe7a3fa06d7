//! Streaming primitives for delivering task updates across threads.
//!
//! The base types wrap an [`mpsc`] channel so background workers can stream
//! updates back to a consumer without blocking the UI thread. Every message is
//! wrapped in a [`StreamEnvelope`] that carries the identifier of the request
//! that produced it, letting the consumer drop anything that belongs to a
//! superseded request.
//!
//! `lore_stream::task` builds on top by providing a typed two-phase stream:
//! any number of progress updates followed by exactly one terminal result.
//!
//! Base usage:
//! ```
//! use std::sync::mpsc;
//!
//! use lore_stream::{DataStream, StreamEnvelope};
//!
//! let (tx, rx) = mpsc::channel::<StreamEnvelope<(), String>>();
//! let stream = DataStream::new(&tx, 7, ());
//! assert!(stream.send("hello".to_string(), true));
//! let envelope = rx.recv().unwrap();
//! assert_eq!(envelope.id, 7);
//! assert!(envelope.complete);
//! assert_eq!(envelope.map_payload(|text| text.len()).payload, 5);
//! ```
//!
//! Task usage:
//! ```
//! use std::sync::atomic::AtomicU64;
//! use std::sync::mpsc;
//!
//! use lore_stream::task::{TaskStream, TaskUpdate};
//!
//! let (tx, rx) = mpsc::channel();
//! let latest = AtomicU64::new(3);
//! let stream = TaskStream::<&str, Result<u32, String>>::new(&tx, 3, &latest);
//! assert!(stream.is_current());
//! stream.progress("halfway");
//! stream.finish(Ok(42));
//!
//! let first = rx.recv().unwrap();
//! assert!(!first.complete);
//! assert!(matches!(first.payload, TaskUpdate::Progress("halfway")));
//! let last = rx.recv().unwrap();
//! assert!(last.complete);
//! ```
//! [`mpsc`]: std::sync::mpsc

use std::sync::mpsc::Sender;

/// Message emitted by a background system and delivered to the UI layer.
#[derive(Debug)]
pub struct StreamEnvelope<M, P> {
	/// Identifier correlating the message with a query or request.
	pub id: u64,
	/// Stream-specific metadata describing the payload.
	pub kind: M,
	/// Payload delivered to the consumer.
	pub payload: P,
	/// Whether the producer finished streaming for this identifier.
	pub complete: bool,
}

impl<M, P> StreamEnvelope<M, P> {
	/// Transform the payload while preserving the envelope metadata.
	pub fn map_payload<N>(self, f: impl FnOnce(P) -> N) -> StreamEnvelope<M, N> {
		StreamEnvelope {
			id: self.id,
			kind: self.kind,
			payload: f(self.payload),
			complete: self.complete,
		}
	}
}

/// Handle for producing stream messages backed by an [`mpsc::Sender`].
///
/// [`mpsc::Sender`]: std::sync::mpsc::Sender
pub struct DataStream<'a, M, P> {
	tx: &'a Sender<StreamEnvelope<M, P>>,
	id: u64,
	kind: M,
}

impl<'a, M: Clone, P: Send + 'static> DataStream<'a, M, P> {
	/// Create a new handle backed by the provided sender.
	#[must_use]
	pub fn new(tx: &'a Sender<StreamEnvelope<M, P>>, id: u64, kind: M) -> Self {
		Self { tx, id, kind }
	}

	/// Identifier associated with this stream.
	#[must_use]
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Emit a payload to the consumer.
	///
	/// Returns `false` once the receiving side has hung up.
	pub fn send(&self, payload: P, complete: bool) -> bool {
		self.tx
			.send(StreamEnvelope {
				id: self.id,
				kind: self.kind.clone(),
				payload,
				complete,
			})
			.is_ok()
	}
}

impl<'a, M: Clone, P: Send + 'static> Clone for DataStream<'a, M, P> {
	fn clone(&self) -> Self {
		Self {
			tx: self.tx,
			id: self.id,
			kind: self.kind.clone(),
		}
	}
}

/// Two-phase task streamer built on top of the base streaming primitives.
pub mod task;

#[cfg(test)]
mod tests {
	use std::sync::mpsc;

	use super::*;

	#[test]
	fn cloned_streams_share_identifier_and_channel() {
		let (tx, rx) = mpsc::channel::<StreamEnvelope<&'static str, u8>>();
		let stream = DataStream::new(&tx, 11, "kind");
		let copy = stream.clone();

		assert!(stream.send(1, false));
		assert!(copy.send(2, true));

		let first = rx.recv().expect("first envelope");
		let second = rx.recv().expect("second envelope");
		assert_eq!((first.id, first.payload, first.complete), (11, 1, false));
		assert_eq!((second.id, second.payload, second.complete), (11, 2, true));
		assert_eq!(second.kind, "kind");
	}

	#[test]
	fn send_reports_disconnected_receiver() {
		let (tx, rx) = mpsc::channel::<StreamEnvelope<(), ()>>();
		drop(rx);
		let stream = DataStream::new(&tx, 1, ());
		assert!(!stream.send((), true));
	}
}
