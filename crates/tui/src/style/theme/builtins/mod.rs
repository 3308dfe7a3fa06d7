mod loader;

use std::sync::OnceLock;

use include_dir::{Dir, include_dir};
use loader::{BuiltinThemes, load_builtin_themes};
use ratatui::style::{Color, Modifier, Style};
use tracing::error;

use crate::style::theme::types::{Theme, ThemeRegistration};

const BUILTIN_THEME_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/style/theme/builtins/themes");

/// Get the default built-in theme.
pub fn default_theme() -> Theme {
	builtin_themes().default_theme
}

pub(super) fn registrations() -> Vec<ThemeRegistration> {
	builtin_themes().registrations.clone()
}

fn builtin_themes() -> &'static BuiltinThemes {
	static BUILTINS: OnceLock<BuiltinThemes> = OnceLock::new();
	BUILTINS.get_or_init(|| {
		load_builtin_themes(&BUILTIN_THEME_DIR).unwrap_or_else(|err| {
			error!("failed to load built-in themes: {err:#}");
			BuiltinThemes::fallback(fallback_theme())
		})
	})
}

/// Terminal-default palette used if the bundled definitions are unreadable.
fn fallback_theme() -> Theme {
	Theme {
		header: Style::new().fg(Color::Gray),
		row_highlight: Style::new().add_modifier(Modifier::REVERSED),
		prompt: Style::new(),
		empty: Style::new().fg(Color::DarkGray),
		highlight: Style::new().fg(Color::Cyan),
		error: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
		citation: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
		accent: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
	}
}
