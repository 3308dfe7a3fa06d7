//! Visual styling utilities.
//!
//! Themes are colour schemes loaded from TOML definitions bundled into the
//! binary and looked up by case-insensitive name.

pub mod theme;

pub use theme::{Theme, ThemeDescriptor, by_name, default_theme, descriptors};

/// Aggregate container for styling knobs.
#[derive(Clone, Debug, Default)]
pub struct StyleConfig {
	/// The active theme for the UI.
	pub theme: Theme,
}
