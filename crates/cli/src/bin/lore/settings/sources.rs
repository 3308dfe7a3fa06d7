use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File, Map};
use lore_core::app_dirs;

use crate::cli::CliArgs;

/// Stack the configuration files and the environment in precedence order.
///
/// `env` replaces the process environment when given.
pub(super) fn build_config(cli: &CliArgs, env: Option<Map<String, String>>) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		Environment::with_prefix("lore")
			.separator("__")
			.try_parsing(true)
			.list_separator(",")
			.with_list_parse_key("search.sources")
			.with_list_parse_key("ui.examples")
			.source(env),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

/// Default configuration file locations, lowest precedence first.
pub(super) fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join("lore.toml"));
		files.push(current_dir.join(".lore.toml"));
	}

	files
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_files_include_current_directory_variants() {
		let files = default_config_files();
		assert!(files.iter().any(|path| path.ends_with(".lore.toml")));
		assert!(files.iter().any(|path| path.ends_with("lore.toml")));
	}
}
