//! Capabilities the task worker consumes.
//!
//! Vector search and answer generation live outside this crate. The worker
//! only sees the two traits below; [`CommandBackend`] delegates each call to
//! an external program and [`Unconfigured`] stands in when nothing is set up.

mod command;

use std::sync::Arc;

pub use command::{CommandBackend, LIST_SOURCES_FLAG};

use crate::answer::Answer;
use crate::error::ServiceError;
use crate::query::SearchRequest;
use crate::results::SearchHit;

/// Knowledge-base search capability.
pub trait SearchBackend: Send + Sync {
	/// Return passages relevant to the request, best first.
	fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, ServiceError>;

	/// Names of the sources a request may be restricted to.
	fn sources(&self) -> Result<Vec<String>, ServiceError> {
		Ok(Vec::new())
	}
}

/// Answer generation capability.
pub trait AnswerBackend: Send + Sync {
	/// Produce an answer to `query` grounded in `hits`.
	fn generate(&self, query: &str, hits: &[SearchHit]) -> Result<Answer, ServiceError>;
}

/// Pair of capabilities shared with the worker thread.
#[derive(Clone)]
pub struct Backends {
	pub search: Arc<dyn SearchBackend>,
	pub answer: Arc<dyn AnswerBackend>,
}

impl Backends {
	pub fn new(search: impl SearchBackend + 'static, answer: impl AnswerBackend + 'static) -> Self {
		Self {
			search: Arc::new(search),
			answer: Arc::new(answer),
		}
	}
}

/// Backend used when no program is configured. Every call fails with
/// [`ServiceError::NotConfigured`].
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured {
	capability: &'static str,
}

impl Unconfigured {
	#[must_use]
	pub fn search() -> Self {
		Self {
			capability: "search",
		}
	}

	#[must_use]
	pub fn generation() -> Self {
		Self {
			capability: "generation",
		}
	}

	fn error(&self) -> ServiceError {
		ServiceError::NotConfigured {
			capability: self.capability,
		}
	}
}

impl SearchBackend for Unconfigured {
	fn search(&self, _request: &SearchRequest) -> Result<Vec<SearchHit>, ServiceError> {
		Err(self.error())
	}

	fn sources(&self) -> Result<Vec<String>, ServiceError> {
		Err(self.error())
	}
}

impl AnswerBackend for Unconfigured {
	fn generate(&self, _query: &str, _hits: &[SearchHit]) -> Result<Answer, ServiceError> {
		Err(self.error())
	}
}
