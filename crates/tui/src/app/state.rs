//! Core state container for the terminal front-end.

use lore_core::catalog::spawn_source_loader;
use lore_core::{Backends, DEFAULT_LIMIT, Dispatcher, MAX_LIMIT, MIN_LIMIT};
use throbber_widgets_tui::ThrobberState;

use super::examples::ExampleQuestions;
use super::session::{SessionState, SessionSummary};
use super::sources::SourcesState;
use crate::config::UiLabels;
use crate::input::QueryInput;
use crate::style::{StyleConfig, Theme};

/// Panel that receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
	Input,
	Sources,
}

/// Aggregate state shared across the terminal UI.
pub struct App<'a> {
	/// Text input for the question.
	pub input: QueryInput<'a>,
	pub(crate) ui: UiLabels,
	/// Current style and theme configuration.
	pub style: StyleConfig,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) dispatcher: Dispatcher,
	pub(crate) session: SessionState,
	pub(crate) sources: SourcesState,
	pub(crate) focus: Focus,
	pub(crate) limit: usize,
}

impl<'a> App<'a> {
	/// Construct an [`App`] that answers questions with `backends`.
	///
	/// The source catalog starts loading in the background immediately.
	pub fn new(backends: Backends) -> Self {
		let catalog = spawn_source_loader(backends.search.clone());
		let style = StyleConfig::default();
		let mut input = QueryInput::default();
		input.set_style(style.theme.prompt);

		Self {
			input,
			ui: UiLabels::default(),
			style,
			throbber_state: ThrobberState::default(),
			dispatcher: Dispatcher::spawn(backends),
			session: SessionState::default(),
			sources: SourcesState::new(catalog, Vec::new()),
			focus: Focus::Input,
			limit: DEFAULT_LIMIT,
		}
	}

	/// Pre-fill the query input.
	#[must_use]
	pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
		self.input.set_text(query);
		self
	}

	/// Number of passages requested per question, clamped to the supported range.
	#[must_use]
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
		self
	}

	/// Example questions offered before any answer suggests others.
	#[must_use]
	pub fn with_examples(mut self, examples: Vec<String>) -> Self {
		self.session.examples = ExampleQuestions::new(examples);
		self
	}

	/// Sources selected when the catalog arrives.
	#[must_use]
	pub fn with_sources(mut self, sources: Vec<String>) -> Self {
		for name in sources {
			self.sources.preselect(name);
		}
		self
	}

	/// Apply a new theme.
	pub fn set_theme(&mut self, theme: Theme) {
		self.style.theme = theme;
		self.input.set_style(theme.prompt);
	}

	/// Totals for the session so far.
	#[must_use]
	pub fn summary(&self) -> SessionSummary {
		self.session.summary
	}

	/// Whether a question is being answered.
	#[must_use]
	pub fn is_searching(&self) -> bool {
		self.session.searching
	}

	pub(crate) fn adjust_limit(&mut self, delta: isize) {
		self.limit = self
			.limit
			.saturating_add_signed(delta)
			.clamp(MIN_LIMIT, MAX_LIMIT);
	}
}
