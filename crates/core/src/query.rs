//! User questions and the search requests derived from them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ValidationError;

/// Smallest number of passages a search may request.
pub const MIN_LIMIT: usize = 1;
/// Largest number of passages a search may request.
pub const MAX_LIMIT: usize = 30;
/// Number of passages requested when nothing else is configured.
pub const DEFAULT_LIMIT: usize = 10;

/// A question submitted by the user.
///
/// A query is immutable once dispatched; the worker receives its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
	/// Question text as entered.
	pub text: String,
	/// When the question was submitted.
	pub submitted_at: DateTime<Utc>,
	/// Maximum number of passages to retrieve.
	pub limit: usize,
	/// Restrict the search to these sources. `None` searches everything.
	pub sources: Option<Vec<String>>,
}

impl Query {
	/// Create a query stamped with the current time and default options.
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			submitted_at: Utc::now(),
			limit: DEFAULT_LIMIT,
			sources: None,
		}
	}

	/// Override the passage limit.
	#[must_use]
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = limit;
		self
	}

	/// Restrict the search to the given sources. An empty selection means
	/// "all sources".
	#[must_use]
	pub fn with_sources(mut self, sources: Vec<String>) -> Self {
		self.sources = if sources.is_empty() {
			None
		} else {
			Some(sources)
		};
		self
	}

	/// Check the query and return a trimmed copy that is ready to dispatch.
	pub fn validated(mut self) -> Result<Self, ValidationError> {
		let trimmed = self.text.trim();
		if trimmed.is_empty() {
			return Err(ValidationError::EmptyQuery);
		}
		if !(MIN_LIMIT..=MAX_LIMIT).contains(&self.limit) {
			return Err(ValidationError::LimitOutOfRange {
				value: self.limit,
				min: MIN_LIMIT,
				max: MAX_LIMIT,
			});
		}
		if trimmed.len() != self.text.len() {
			self.text = trimmed.to_string();
		}
		Ok(self)
	}

	/// Build the request handed to the search backend.
	#[must_use]
	pub fn search_request(&self) -> SearchRequest {
		SearchRequest {
			query: self.text.clone(),
			limit: self.limit,
			sources: self.sources.clone(),
		}
	}
}

/// Parameters passed to a [`SearchBackend`](crate::SearchBackend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
	pub query: String,
	pub limit: usize,
	pub sources: Option<Vec<String>>,
}
