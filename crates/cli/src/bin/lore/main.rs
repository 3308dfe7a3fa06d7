//! Command-line entry point for `lore`.

mod cli;
mod logging;
mod settings;
mod workflow;

use std::process::ExitCode;

use anyhow::Result;
use cli::{CliArgs, OutputFormat, parse_cli, print_json, print_plain};
use logging::LogTarget;
use lore_tui::style;
use settings::Settings;

fn main() -> Result<ExitCode> {
	let cli = parse_cli();

	if cli.list_themes {
		for theme in style::descriptors() {
			if theme.aliases.is_empty() {
				println!("{}", theme.name);
			} else {
				println!("{} (aliases: {})", theme.name, theme.aliases.join(", "));
			}
		}
		return Ok(ExitCode::SUCCESS);
	}

	let settings = settings::load(&cli)?;

	if cli.print_config {
		for line in settings.describe() {
			println!("{line}");
		}
	}

	if cli.list_models {
		let lines = settings.model_lines();
		if lines.is_empty() {
			println!("No models configured; add [[generation.models]] entries to the config file.");
		}
		for line in lines {
			println!("{line}");
		}
		return Ok(ExitCode::SUCCESS);
	}

	let target = if cli.ask.is_some() {
		LogTarget::Stderr
	} else {
		LogTarget::File
	};
	let _log_guard = logging::init(&settings.logging, target)?;

	let backends = workflow::build_backends(&settings)?;

	match &cli.ask {
		Some(question) => run_ask(&cli, &settings, backends, question),
		None => {
			let summary = workflow::run_interactive(settings, backends)?;
			if summary.questions > 0 {
				println!(
					"{} question(s) answered, session cost ${:.6}",
					summary.questions, summary.total_cost
				);
			}
			Ok(ExitCode::SUCCESS)
		}
	}
}

/// Answer one question and print it in the requested format.
fn run_ask(
	cli: &CliArgs,
	settings: &Settings,
	backends: lore_core::Backends,
	question: &str,
) -> Result<ExitCode> {
	lore_core::silence_background_panics();
	let outcome = workflow::run_ask(settings, backends, question);

	match cli.output {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(if outcome.succeeded() {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}
