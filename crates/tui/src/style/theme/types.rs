use ratatui::style::{Color, Style};

/// A theme containing styles for various UI elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
	/// Style for borders, titles and table headers.
	pub header: Style,
	/// Style for the selected row in lists.
	pub row_highlight: Style,
	/// Style for the query input.
	pub prompt: Style,
	/// Style for placeholders and muted text.
	pub empty: Style,
	/// Style for focused panels and active elements.
	pub highlight: Style,
	/// Style for the error banner.
	pub error: Style,
	/// Style for citation markers in answers.
	pub citation: Style,
	/// Style for the title bar and example questions.
	pub accent: Style,
}

impl Theme {
	/// Returns the style used for muted text.
	#[must_use]
	pub fn empty_style(&self) -> Style {
		self.empty
	}

	/// Returns the border style, brighter when the panel has focus.
	#[must_use]
	pub fn border_style(&self, focused: bool) -> Style {
		let base = if focused { self.highlight } else { self.header };
		Style::new().fg(base.fg.unwrap_or(Color::Reset))
	}
}

/// Describes a theme instance that can be registered with the UI.
#[derive(Debug, Clone)]
pub struct ThemeRegistration {
	/// The name of the theme.
	pub name: String,
	/// The theme configuration.
	pub theme: Theme,
	/// Alternate names for the theme.
	pub aliases: Vec<String>,
}

impl ThemeRegistration {
	/// Creates a new theme registration with the given name and theme.
	pub fn new(name: impl Into<String>, theme: Theme) -> Self {
		Self {
			name: name.into(),
			theme,
			aliases: Vec::new(),
		}
	}

	/// Adds a single alias to this theme registration.
	#[must_use]
	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.aliases.push(alias.into());
		self
	}
}

/// Snapshot of a registered theme and its metadata.
#[derive(Debug, Clone)]
pub struct ThemeDescriptor {
	/// The name of the theme.
	pub name: String,
	/// Alternate names for the theme.
	pub aliases: Vec<String>,
	/// The theme configuration.
	pub theme: Theme,
}
