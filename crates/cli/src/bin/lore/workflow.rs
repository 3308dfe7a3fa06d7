use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use lore_core::{
	Answer, AnswerBackend, AnswerView, Backends, CommandBackend, Dispatcher, Query, SearchBackend,
	SearchHit, Unconfigured,
};
use lore_tui::{App, SessionSummary, style};
use tracing::{info, warn};

use crate::settings::Settings;

/// How often `--ask` checks the worker for updates.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Build the search and generation backends named in `settings`.
pub(crate) fn build_backends(settings: &Settings) -> Result<Backends> {
	let search: Arc<dyn SearchBackend> = match &settings.search.command {
		Some(command) => Arc::new(
			CommandBackend::parse(command).context("invalid search.command setting")?,
		),
		None => {
			warn!("no search command configured");
			Arc::new(Unconfigured::search())
		}
	};

	let answer: Arc<dyn AnswerBackend> = match &settings.generation.command {
		Some(command) => Arc::new(
			CommandBackend::parse(command)
				.context("invalid generation.command setting")?
				.with_model(settings.generation.model.clone()),
		),
		None => {
			warn!("no generation command configured");
			Arc::new(Unconfigured::generation())
		}
	};

	Ok(Backends { search, answer })
}

/// Run the terminal interface until the user quits.
pub(crate) fn run_interactive(settings: Settings, backends: Backends) -> Result<SessionSummary> {
	let Settings { search, ui, .. } = settings;

	let mut app = App::new(backends)
		.with_limit(search.limit)
		.with_sources(search.sources)
		.with_examples(ui.examples);

	if let Some(query) = ui.initial_query {
		app = app.with_initial_query(query);
	}

	if let Some(name) = ui.theme {
		match style::by_name(&name) {
			Some(theme) => app.set_theme(theme),
			None => warn!(theme = %name, "unknown theme, keeping the default"),
		}
	}

	lore_tui::run(app)
}

/// Everything published for a single `--ask` question.
#[derive(Debug, Clone, Default)]
pub(crate) struct AskOutcome {
	/// Question as submitted, after trimming.
	pub(crate) query: String,
	pub(crate) hits: Vec<SearchHit>,
	pub(crate) answer: Option<Answer>,
	pub(crate) error: Option<String>,
	pub(crate) finished: bool,
}

impl AskOutcome {
	fn new(question: &str) -> Self {
		Self {
			query: question.trim().to_string(),
			..Self::default()
		}
	}

	pub(crate) fn succeeded(&self) -> bool {
		self.error.is_none()
	}
}

impl AnswerView for AskOutcome {
	fn begin_search(&mut self, query: &Query) {
		self.query = query.text.clone();
	}

	fn show_hits(&mut self, hits: &[SearchHit]) {
		self.hits = hits.to_vec();
	}

	fn show_answer(&mut self, answer: &Answer) {
		self.answer = Some(answer.clone());
	}

	fn show_no_context(&mut self) {
		self.answer = None;
	}

	fn show_error(&mut self, message: &str) {
		self.error = Some(message.to_string());
	}

	fn finish(&mut self) {
		self.finished = true;
	}
}

/// Answer one question through the same dispatcher the interface uses.
pub(crate) fn run_ask(settings: &Settings, backends: Backends, question: &str) -> AskOutcome {
	let mut dispatcher = Dispatcher::spawn(backends);
	let mut outcome = AskOutcome::new(question);

	let query = Query::new(question)
		.with_limit(settings.search.limit)
		.with_sources(settings.search.sources.clone());
	let Ok(handle) = dispatcher.dispatch(query, &mut outcome) else {
		return outcome;
	};
	info!(%handle, "answering question");

	while dispatcher.is_searching() {
		if dispatcher.pump(&mut outcome) == 0 {
			thread::sleep(POLL_INTERVAL);
		}
	}

	outcome
}
