use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `lore` binary.
#[derive(Parser, Debug)]
#[command(
	name = "lore",
	version,
	long_version = long_version(),
	about = "Ask questions of a document knowledge base from the terminal",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "LORE_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'a',
		long,
		value_name = "QUESTION",
		help = "Answer a single question without starting the interface"
	)]
	pub(crate) ask: Option<String>,
	#[arg(
		short = 'q',
		long = "query",
		value_name = "QUESTION",
		conflicts_with = "ask",
		help = "Pre-fill the question input (default: empty)"
	)]
	pub(crate) initial_query: Option<String>,
	#[arg(
		short = 'k',
		long,
		value_name = "NUM",
		help = "Number of passages to retrieve per question (default: 10)"
	)]
	pub(crate) limit: Option<usize>,
	#[arg(
		short = 's',
		long = "source",
		value_name = "NAME",
		action = ArgAction::Append,
		help = "Restrict searches to a source, may be repeated (default: all sources)"
	)]
	pub(crate) sources: Vec<String>,
	#[arg(
		long = "search-command",
		value_name = "COMMAND",
		help = "Program that performs knowledge-base searches (default: none)"
	)]
	pub(crate) search_command: Option<String>,
	#[arg(
		long = "generation-command",
		value_name = "COMMAND",
		help = "Program that writes answers from retrieved passages (default: none)"
	)]
	pub(crate) generation_command: Option<String>,
	#[arg(
		short = 'm',
		long,
		value_name = "MODEL",
		help = "Model the generation command should answer with (default: first configured model)"
	)]
	pub(crate) model: Option<String>,
	#[arg(
		long,
		value_name = "THEME",
		help = "Select a theme by name (default: lore-dark)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long = "log-level",
		value_name = "FILTER",
		help = "Log filter used when LORE_LOG is unset (default: info)"
	)]
	pub(crate) log_level: Option<String>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		long = "list-models",
		help = "List the configured generation models and exit (default: disabled)"
	)]
	pub(crate) list_models: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how --ask prints the result"
	)]
	pub(crate) output: OutputFormat,
}
