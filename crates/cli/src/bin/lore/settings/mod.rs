//! Layered configuration for the `lore` binary.
//!
//! Values come from built-in defaults, the default configuration files, files
//! passed with `--config`, `LORE__SECTION__KEY` environment variables and
//! finally command-line flags, each layer overriding the previous one.

mod sources;

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use lore_core::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
use lore_tui::style;
use serde::Deserialize;

use self::sources::build_config;
use crate::cli::CliArgs;

/// Questions offered below the input until answers suggest better ones.
const DEFAULT_EXAMPLES: [&str; 3] = [
	"How do I add a client's signature to their contact card?",
	"What are the steps for creating a new case?",
	"How do I edit the contact information of a client?",
];

/// Fully merged configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
	pub(crate) search: SearchSettings,
	pub(crate) generation: GenerationSettings,
	pub(crate) ui: UiSettings,
	pub(crate) logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct SearchSettings {
	/// Program answering search requests.
	pub(crate) command: Option<String>,
	pub(crate) limit: usize,
	/// Sources selected at startup. Empty means all.
	pub(crate) sources: Vec<String>,
}

impl Default for SearchSettings {
	fn default() -> Self {
		Self {
			command: None,
			limit: DEFAULT_LIMIT,
			sources: Vec::new(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GenerationSettings {
	/// Program producing answers.
	pub(crate) command: Option<String>,
	/// Model passed to the program. Defaults to the first entry of `models`.
	pub(crate) model: Option<String>,
	/// Models the user may pick from. Empty accepts any model name.
	pub(crate) models: Vec<ModelChoice>,
}

/// One selectable generation model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct ModelChoice {
	pub(crate) name: String,
	#[serde(default)]
	pub(crate) description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct UiSettings {
	pub(crate) theme: Option<String>,
	pub(crate) initial_query: Option<String>,
	pub(crate) examples: Vec<String>,
}

impl Default for UiSettings {
	fn default() -> Self {
		Self {
			theme: None,
			initial_query: None,
			examples: DEFAULT_EXAMPLES.iter().map(ToString::to_string).collect(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingSettings {
	/// Filter directive used when `LORE_LOG` is unset.
	pub(crate) level: String,
	/// Where the interactive mode writes its log files. Defaults to the data
	/// directory.
	pub(crate) directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			directory: None,
		}
	}
}

/// Load configuration by combining files, environment variables and CLI
/// arguments.
pub(crate) fn load(cli: &CliArgs) -> Result<Settings> {
	load_with_env(cli, None)
}

/// [`load`] with an explicit set of environment variables.
fn load_with_env(cli: &CliArgs, env: Option<config::Map<String, String>>) -> Result<Settings> {
	let mut settings: Settings = build_config(cli, env)?
		.try_deserialize()
		.context("failed to deserialize configuration")?;
	settings.apply_cli_overrides(cli);
	settings.normalize();
	settings.validate()?;
	Ok(settings)
}

impl Settings {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(command) = &cli.search_command {
			self.search.command = Some(command.clone());
		}
		if let Some(limit) = cli.limit {
			self.search.limit = limit;
		}
		if !cli.sources.is_empty() {
			self.search.sources = cli.sources.clone();
		}
		if let Some(command) = &cli.generation_command {
			self.generation.command = Some(command.clone());
		}
		if let Some(model) = &cli.model {
			self.generation.model = Some(model.clone());
		}
		if let Some(theme) = &cli.theme {
			self.ui.theme = Some(theme.clone());
		}
		if let Some(query) = &cli.initial_query {
			self.ui.initial_query = Some(query.clone());
		}
		if let Some(level) = &cli.log_level {
			self.logging.level = level.clone();
		}
	}

	/// Treat blank strings as unset and drop blank list entries.
	fn normalize(&mut self) {
		fn blank_to_none(value: &mut Option<String>) {
			if value.as_deref().is_some_and(|text| text.trim().is_empty()) {
				*value = None;
			}
		}

		blank_to_none(&mut self.search.command);
		blank_to_none(&mut self.generation.command);
		blank_to_none(&mut self.generation.model);
		blank_to_none(&mut self.ui.theme);
		blank_to_none(&mut self.ui.initial_query);
		self.search.sources.retain(|name| !name.trim().is_empty());
		self.ui.examples.retain(|question| !question.trim().is_empty());

		let models = &mut self.generation.models;
		models.retain(|model| !model.name.trim().is_empty());
		if self.generation.model.is_none() {
			self.generation.model = models.first().map(|model| model.name.clone());
		}
	}

	fn validate(&self) -> Result<()> {
		ensure!(
			(MIN_LIMIT..=MAX_LIMIT).contains(&self.search.limit),
			"search.limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {}",
			self.search.limit
		);
		if let Some(model) = &self.generation.model
			&& !self.generation.models.is_empty()
		{
			ensure!(
				self.generation.models.iter().any(|choice| choice.name == *model),
				"unknown model `{model}` (see --list-models)"
			);
		}
		if let Some(theme) = &self.ui.theme {
			ensure!(
				style::by_name(theme).is_some(),
				"unknown theme `{theme}` (see --list-themes)"
			);
		}
		ensure!(
			!self.logging.level.trim().is_empty(),
			"logging.level must not be empty"
		);
		Ok(())
	}

	/// One line per configured model for `--list-models`, the selected one
	/// marked with `*`.
	pub(crate) fn model_lines(&self) -> Vec<String> {
		let selected = self.generation.model.as_deref();
		self.generation
			.models
			.iter()
			.map(|choice| {
				let marker = if Some(choice.name.as_str()) == selected {
					'*'
				} else {
					' '
				};
				match &choice.description {
					Some(description) => format!("{marker} {}  {description}", choice.name),
					None => format!("{marker} {}", choice.name),
				}
			})
			.collect()
	}

	/// Human-readable summary for `--print-config`.
	pub(crate) fn describe(&self) -> Vec<String> {
		fn or_unset(value: Option<&str>) -> &str {
			value.unwrap_or("(not set)")
		}

		let sources = if self.search.sources.is_empty() {
			"(all)".to_string()
		} else {
			self.search.sources.join(", ")
		};
		let log_directory = self
			.logging
			.directory
			.as_ref()
			.map_or_else(|| "(data directory)".to_string(), |dir| dir.display().to_string());

		vec![
			format!("Search command: {}", or_unset(self.search.command.as_deref())),
			format!("Search limit: {}", self.search.limit),
			format!("Sources: {sources}"),
			format!(
				"Generation command: {}",
				or_unset(self.generation.command.as_deref())
			),
			format!(
				"Model: {}",
				self.generation
					.model
					.as_deref()
					.unwrap_or("(program default)")
			),
			format!("Theme: {}", or_unset(self.ui.theme.as_deref())),
			format!("Initial query: {}", or_unset(self.ui.initial_query.as_deref())),
			format!("Examples: {}", self.ui.examples.len()),
			format!("Log level: {}", self.logging.level),
			format!("Log directory: {log_directory}"),
		]
	}
}
