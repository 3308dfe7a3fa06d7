//! Generated answers and the text processing applied to them.
//!
//! Answers arrive as plain text. Before display the front-end looks for
//! citation markers (`[n]` refers to the n-th passage) and for a trailing list
//! of suggested follow-up questions.

mod citations;
mod prompt;
mod suggestions;

use serde::{Deserialize, Serialize};

pub use citations::{Segment, segments};
pub use prompt::{CONTEXT_SEPARATOR, build_prompt, context_block};
pub use suggestions::suggested_searches;

/// Reply produced by the generation backend for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
	/// Natural-language answer.
	pub text: String,
	/// Cost the backend reported for producing this answer.
	#[serde(default)]
	pub cost: f64,
}

impl Answer {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			cost: 0.0,
		}
	}

	#[must_use]
	pub fn with_cost(mut self, cost: f64) -> Self {
		self.cost = cost;
		self
	}

	/// Follow-up questions proposed at the end of the answer.
	#[must_use]
	pub fn suggested_searches(&self) -> Vec<String> {
		suggested_searches(&self.text)
	}
}
