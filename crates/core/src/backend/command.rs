use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{AnswerBackend, SearchBackend};
use crate::answer::{Answer, build_prompt};
use crate::error::ServiceError;
use crate::query::SearchRequest;
use crate::results::SearchHit;

/// Extra argument passed to the search program to list available sources.
pub const LIST_SOURCES_FLAG: &str = "--list-sources";

/// Backend that runs an external program for every call.
///
/// The request is written to the program's stdin as JSON and the reply is
/// read from its stdout as JSON. A non-zero exit status is reported as
/// [`ServiceError::Exit`] together with the program's stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBackend {
	program: String,
	args: Vec<String>,
	model: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
	query: &'a str,
	prompt: String,
	hits: &'a [SearchHit],
	#[serde(skip_serializing_if = "Option::is_none")]
	model: Option<&'a str>,
}

impl CommandBackend {
	/// Parse a shell-style command line such as `kb-search --collection docs`.
	pub fn parse(command_line: &str) -> Result<Self, ServiceError> {
		let words = shell_words::split(command_line).map_err(|err| {
			ServiceError::InvalidCommand {
				command: command_line.to_string(),
				reason: err.to_string(),
			}
		})?;

		let mut words = words.into_iter();
		let program = words.next().ok_or_else(|| ServiceError::InvalidCommand {
			command: command_line.to_string(),
			reason: "command is empty".to_string(),
		})?;

		Ok(Self {
			program,
			args: words.collect(),
			model: None,
		})
	}

	/// Ask the generation program to answer with `model`.
	///
	/// Without a model the request carries no `model` field and the program
	/// picks its own default.
	#[must_use]
	pub fn with_model(mut self, model: Option<String>) -> Self {
		self.model = model;
		self
	}

	/// Model requested from the generation program, if any.
	#[must_use]
	pub fn model(&self) -> Option<&str> {
		self.model.as_deref()
	}

	/// Program that will be executed.
	#[must_use]
	pub fn program(&self) -> &str {
		&self.program
	}

	/// Arguments passed before any call-specific ones.
	#[must_use]
	pub fn args(&self) -> &[String] {
		&self.args
	}

	fn call<I, O>(&self, extra_args: &[&str], input: Option<&I>) -> Result<O, ServiceError>
	where
		I: Serialize + ?Sized,
		O: DeserializeOwned,
	{
		let stdin_bytes = match input {
			Some(input) => serde_json::to_vec(input).map_err(|source| ServiceError::Encode {
				program: self.program.clone(),
				source,
			})?,
			None => Vec::new(),
		};

		debug!(program = %self.program, bytes = stdin_bytes.len(), "invoking backend command");

		let mut child = Command::new(&self.program)
			.args(&self.args)
			.args(extra_args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.spawn()
			.map_err(|source| ServiceError::Spawn {
				program: self.program.clone(),
				source,
			})?;

		// Feed stdin from a separate thread so a chatty child cannot block on a
		// full stdout pipe while we are still writing.
		let writer = child.stdin.take().map(|mut stdin| {
			thread::spawn(move || {
				let result = stdin.write_all(&stdin_bytes);
				drop(stdin);
				result
			})
		});

		let output = child.wait_with_output().map_err(|source| ServiceError::Io {
			program: self.program.clone(),
			source,
		})?;

		if !output.status.success() {
			return Err(ServiceError::Exit {
				program: self.program.clone(),
				status: output.status.to_string(),
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}

		if let Some(writer) = writer {
			match writer.join() {
				Ok(Ok(())) => {}
				Ok(Err(source)) => {
					return Err(ServiceError::Io {
						program: self.program.clone(),
						source,
					});
				}
				Err(panic) => std::panic::resume_unwind(panic),
			}
		}

		serde_json::from_slice(&output.stdout).map_err(|source| ServiceError::Decode {
			program: self.program.clone(),
			source,
		})
	}
}

impl SearchBackend for CommandBackend {
	fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, ServiceError> {
		self.call(&[], Some(request))
	}

	fn sources(&self) -> Result<Vec<String>, ServiceError> {
		self.call::<(), _>(&[LIST_SOURCES_FLAG], None)
	}
}

impl AnswerBackend for CommandBackend {
	fn generate(&self, query: &str, hits: &[SearchHit]) -> Result<Answer, ServiceError> {
		let request = GenerateRequest {
			query,
			prompt: build_prompt(query, hits),
			hits,
			model: self.model.as_deref(),
		};
		self.call(&[], Some(&request))
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::results::PageRange;

	/// Backend running `script` through `sh -c`.
	fn shell(script: &str) -> CommandBackend {
		CommandBackend {
			program: "sh".into(),
			args: vec!["-c".into(), script.into()],
			model: None,
		}
	}

	fn contract_hits() -> Vec<SearchHit> {
		vec![SearchHit::new("kb/contract_12.pdf", 0.91, PageRange::new(4, 5)).with_text("30 days")]
	}

	#[test]
	fn command_lines_are_split_like_a_shell() {
		let backend = CommandBackend::parse(r#"kb-search --collection "smart docs""#)
			.expect("parse command");
		assert_eq!(backend.program(), "kb-search");
		assert_eq!(backend.args(), ["--collection", "smart docs"]);
		assert_eq!(backend.model(), None);
	}

	#[test]
	fn empty_command_lines_are_rejected() {
		assert!(matches!(
			CommandBackend::parse("   "),
			Err(ServiceError::InvalidCommand { .. })
		));
		assert!(matches!(
			CommandBackend::parse("kb-search 'unterminated"),
			Err(ServiceError::InvalidCommand { .. })
		));
	}

	#[test]
	fn missing_programs_are_unreachable() {
		let backend = CommandBackend::parse("lore-test-no-such-program-3b1f").expect("parse");
		let request = SearchRequest {
			query: "q".into(),
			limit: 3,
			sources: None,
		};
		assert!(matches!(
			backend.search(&request),
			Err(ServiceError::Spawn { .. })
		));
	}

	#[test]
	fn unencodable_requests_fail_before_spawning() {
		let backend = CommandBackend::parse("lore-test-no-such-program-3b1f").expect("parse");
		// JSON object keys must be strings.
		let request = BTreeMap::from([((4, 5), "pages")]);
		let result: Result<Vec<SearchHit>, _> = backend.call(&[], Some(&request));
		match result {
			Err(err @ ServiceError::Encode { .. }) => {
				assert!(err.to_string().starts_with("could not encode request"));
			}
			other => panic!("expected encode error, got {other:?}"),
		}
	}

	#[cfg(unix)]
	#[test]
	fn search_replies_are_decoded() {
		let reply = r#"[{"document":"contract_12.pdf","score":0.91,"pages":{"start":4,"end":5}}]"#;
		let backend = shell(&format!("cat >/dev/null; printf '%s' '{reply}'"));
		let request = SearchRequest {
			query: "What is the termination clause?".into(),
			limit: 10,
			sources: None,
		};

		let hits = backend.search(&request).expect("search succeeds");
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].document, "contract_12.pdf");
		assert_eq!(hits[0].pages.to_string(), "4-5");
	}

	#[cfg(unix)]
	#[test]
	fn generator_receives_prompt_and_reports_cost() {
		// Only reply when stdin carries the expected prompt and no model.
		let backend = shell(
			r#"request=$(cat)
case "$request" in
	*'"model"'*) exit 5 ;;
	*'"prompt":"Notice?\n\nCONTEXT:\nSource: contract_12.pdf (Pages 4-5)\n30 days"'*)
		printf '%s' '{"text":"Thirty days [1].","cost":0.25}' ;;
	*) exit 4 ;;
esac"#,
		);

		let answer = backend
			.generate("Notice?", &contract_hits())
			.expect("generator accepts the prompt");
		assert_eq!(answer.text, "Thirty days [1].");
		assert_eq!(answer.cost, 0.25);
	}

	#[cfg(unix)]
	#[test]
	fn selected_model_is_sent_to_the_generator() {
		let backend = shell(
			r#"request=$(cat)
case "$request" in
	*'"model":"gpt-5-mini"'*) printf '%s' '{"text":"ok"}' ;;
	*) exit 4 ;;
esac"#,
		)
		.with_model(Some("gpt-5-mini".into()));

		assert_eq!(backend.model(), Some("gpt-5-mini"));
		let answer = backend
			.generate("Notice?", &contract_hits())
			.expect("generator sees the model");
		assert_eq!(answer.text, "ok");
	}

	#[cfg(unix)]
	#[test]
	fn failing_programs_report_stderr() {
		let backend = shell("cat >/dev/null; echo 'connection refused' >&2; exit 3");
		let request = SearchRequest {
			query: "q".into(),
			limit: 1,
			sources: None,
		};

		match backend.search(&request) {
			Err(ServiceError::Exit { stderr, .. }) => assert_eq!(stderr, "connection refused"),
			other => panic!("expected exit error, got {other:?}"),
		}
	}

	#[cfg(unix)]
	#[test]
	fn malformed_replies_are_decode_errors() {
		let backend = shell("cat >/dev/null; echo not-json");
		assert!(matches!(
			backend.sources(),
			Err(ServiceError::Decode { .. })
		));
	}
}
