use std::io;

use thiserror::Error;

/// Reasons a query is rejected before it reaches the worker.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
	/// The query text was empty or contained only whitespace.
	#[error("Please enter a query")]
	EmptyQuery,

	/// The requested number of passages is outside the supported range.
	#[error("search limit must be between {min} and {max}, got {value}")]
	LimitOutOfRange { value: usize, min: usize, max: usize },
}

/// Failure reported by an external search or generation service.
#[derive(Debug, Error)]
pub enum ServiceError {
	/// No program was configured for the capability.
	#[error("no {capability} backend is configured")]
	NotConfigured { capability: &'static str },

	/// The configured command line could not be parsed.
	#[error("invalid command line `{command}`: {reason}")]
	InvalidCommand { command: String, reason: String },

	/// The backend program could not be started.
	#[error("failed to start `{program}`: {source}")]
	Spawn {
		program: String,
		#[source]
		source: io::Error,
	},

	/// The backend program ran but reported failure.
	#[error("`{program}` exited with {status}: {stderr}")]
	Exit {
		program: String,
		status: String,
		stderr: String,
	},

	/// The request could not be serialized for the backend program.
	#[error("could not encode request for `{program}`: {source}")]
	Encode {
		program: String,
		#[source]
		source: serde_json::Error,
	},

	/// The backend replied with something other than the expected JSON.
	#[error("could not decode reply from `{program}`: {source}")]
	Decode {
		program: String,
		#[source]
		source: serde_json::Error,
	},

	/// Talking to the backend program failed mid-way.
	#[error("i/o error while talking to `{program}`: {source}")]
	Io {
		program: String,
		#[source]
		source: io::Error,
	},
}

/// Error carried by a failed task outcome.
#[derive(Debug, Error)]
pub enum TaskError {
	/// The search stage failed.
	#[error("search failed: {0}")]
	Search(#[source] ServiceError),

	/// The answer generation stage failed.
	#[error("answer generation failed: {0}")]
	Generation(#[source] ServiceError),

	/// Anything else raised while the task was running.
	#[error("unexpected error: {0}")]
	Unexpected(String),
}

impl TaskError {
	/// Human-readable message shown in the error banner.
	#[must_use]
	pub fn user_message(&self) -> String {
		match self {
			Self::Search(err) => format!("Search failed: {err}"),
			Self::Generation(err) => format!("Could not generate an answer: {err}"),
			Self::Unexpected(message) => format!("Something went wrong: {message}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_messages_are_never_empty() {
		let errors = [
			TaskError::Search(ServiceError::NotConfigured {
				capability: "search",
			}),
			TaskError::Generation(ServiceError::Exit {
				program: "answer".into(),
				status: "exit status: 2".into(),
				stderr: "401 unauthorized".into(),
			}),
			TaskError::Unexpected(String::new()),
		];

		for error in errors {
			assert!(!error.user_message().trim().is_empty());
		}
	}

	#[test]
	fn search_failures_mention_the_stage() {
		let error = TaskError::Search(ServiceError::NotConfigured {
			capability: "search",
		});
		assert_eq!(
			error.user_message(),
			"Search failed: no search backend is configured"
		);
	}
}
