//! Tracing subscriber setup.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use lore_core::app_dirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::settings::LoggingSettings;

/// Environment variable holding a filter directive that overrides the config.
const LOG_ENV: &str = "LORE_LOG";
/// Prefix of the daily log files written by the interactive mode.
const LOG_FILE_NAME: &str = "lore.log";

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogTarget {
	/// Daily rolling file; the terminal belongs to the interface.
	File,
	/// Compact lines on standard error.
	Stderr,
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered file output on drop and has to live
/// until the program exits.
pub(crate) fn init(settings: &LoggingSettings, target: LogTarget) -> Result<Option<WorkerGuard>> {
	let filter = build_filter(settings)?;

	match target {
		LogTarget::Stderr => {
			tracing_subscriber::fmt()
				.with_env_filter(filter)
				.compact()
				.with_target(false)
				.with_writer(io::stderr)
				.try_init()
				.map_err(|err| anyhow!("failed to install logger: {err}"))?;
			Ok(None)
		}
		LogTarget::File => {
			let directory = log_directory(settings)?;
			fs::create_dir_all(&directory).with_context(|| {
				format!("failed to create log directory {}", directory.display())
			})?;
			let appender = tracing_appender::rolling::daily(&directory, LOG_FILE_NAME);
			let (writer, guard) = tracing_appender::non_blocking(appender);
			tracing_subscriber::fmt()
				.with_env_filter(filter)
				.with_ansi(false)
				.with_writer(writer)
				.try_init()
				.map_err(|err| anyhow!("failed to install logger: {err}"))?;
			Ok(Some(guard))
		}
	}
}

fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter> {
	EnvFilter::try_from_env(LOG_ENV)
		.or_else(|_| EnvFilter::try_new(&settings.level))
		.with_context(|| format!("invalid log filter `{}`", settings.level))
}

fn log_directory(settings: &LoggingSettings) -> Result<PathBuf> {
	match &settings.directory {
		Some(directory) => Ok(directory.clone()),
		None => app_dirs::get_data_dir(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn configured_directory_wins() {
		let settings = LoggingSettings {
			level: "info".into(),
			directory: Some(PathBuf::from("/var/log/lore")),
		};
		assert_eq!(
			log_directory(&settings).expect("directory"),
			PathBuf::from("/var/log/lore")
		);
	}

	#[test]
	fn level_directives_are_accepted() {
		let settings = LoggingSettings {
			level: "lore_core=debug,warn".into(),
			directory: None,
		};
		assert!(build_filter(&settings).is_ok());
	}
}
