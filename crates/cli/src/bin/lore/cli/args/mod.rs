mod definitions;
mod options;
mod styles;

use clap::Parser;

pub(crate) use definitions::CliArgs;
pub(crate) use options::OutputFormat;

/// Parse the process arguments.
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}
