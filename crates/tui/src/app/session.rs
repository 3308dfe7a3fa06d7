use lore_core::{Answer, AnswerView, Query, SearchHit};
use tracing::debug;

use super::answer::{AnswerBody, AnswerState};
use super::examples::ExampleQuestions;
use super::results::ResultsState;

/// Totals reported when the interface exits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionSummary {
	/// Questions submitted during the session.
	pub questions: usize,
	/// Sum of the cost of every answer received.
	pub total_cost: f64,
}

/// Everything the published task updates touch.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
	pub(crate) searching: bool,
	pub(crate) banner: Option<String>,
	pub(crate) results: ResultsState,
	pub(crate) answer: AnswerState,
	pub(crate) examples: ExampleQuestions,
	pub(crate) summary: SessionSummary,
}

impl AnswerView for SessionState {
	fn begin_search(&mut self, query: &Query) {
		debug!(query = %query.text, "searching");
		self.searching = true;
		self.banner = None;
		self.summary.questions += 1;
		self.results.replace(&[]);
		self.answer.set(AnswerBody::Searching);
	}

	fn show_hits(&mut self, hits: &[SearchHit]) {
		self.results.replace(hits);
	}

	fn show_answer(&mut self, answer: &Answer) {
		self.summary.total_cost += answer.cost;
		self.examples.apply_suggestions(answer.suggested_searches());
		self.answer.set(AnswerBody::Answer(answer.clone()));
	}

	fn show_no_context(&mut self) {
		self.examples.reset();
		self.answer.set(AnswerBody::NoContext);
	}

	fn show_error(&mut self, message: &str) {
		self.banner = Some(message.to_string());
		if self.answer.body == AnswerBody::Searching {
			self.answer.set(AnswerBody::Idle);
		}
	}

	fn finish(&mut self) {
		self.searching = false;
	}
}
