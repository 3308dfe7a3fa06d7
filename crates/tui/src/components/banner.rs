use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::style::Theme;

const KEY_HINTS: &str =
	"Enter ask · Esc cancel/quit · Tab sources · PgUp/PgDn scroll · F1-F9 citations";

/// Render the bottom line: the error banner if there is one, key hints
/// otherwise.
pub fn render_banner(frame: &mut Frame, area: Rect, error: Option<&str>, theme: &Theme) {
	let line = match error {
		Some(message) => Line::from(Span::styled(
			message.lines().next().unwrap_or_default().to_string(),
			theme.error,
		)),
		None => Line::from(Span::styled(KEY_HINTS, theme.empty_style())),
	};
	frame.render_widget(Paragraph::new(line), area);
}
