//! Single-line query input backed by `tui-textarea`.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

/// Editable query line.
#[derive(Debug, Clone)]
pub struct QueryInput<'a> {
	textarea: TextArea<'a>,
}

impl<'a> QueryInput<'a> {
	/// Create an input pre-filled with `text`, cursor at the end.
	pub fn new(text: impl Into<String>) -> Self {
		let mut input = Self {
			textarea: TextArea::default(),
		};
		input.set_text(text);
		input
	}

	/// Current text.
	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	/// Replace the text and move the cursor to the end.
	pub fn set_text(&mut self, text: impl Into<String>) {
		let text: String = text.into();
		let line = text.lines().next().unwrap_or_default().to_string();
		let mut textarea = TextArea::new(vec![line]);
		textarea.set_cursor_line_style(Style::default());
		textarea.move_cursor(CursorMove::End);
		self.textarea = textarea;
	}

	/// Apply the input style.
	pub fn set_style(&mut self, style: Style) {
		self.textarea.set_style(style);
	}

	/// Feed a key press to the editor. Returns whether the text changed.
	///
	/// Keys that would insert a line break are ignored.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let newline = match key.code {
			KeyCode::Enter => true,
			KeyCode::Char('m' | 'j') => key.modifiers.contains(KeyModifiers::CONTROL),
			_ => false,
		};
		if newline {
			return false;
		}
		self.textarea.input(key)
	}

	/// Draw the editor into `area`.
	pub fn render_textarea(&self, frame: &mut Frame, area: Rect) {
		frame.render_widget(&self.textarea, area);
	}
}

impl Default for QueryInput<'_> {
	fn default() -> Self {
		Self::new(String::new())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	#[test]
	fn typing_appends_at_cursor() {
		let mut input = QueryInput::new("notice");
		assert!(input.input(key(KeyCode::Char('?'))));
		assert_eq!(input.text(), "notice?");
	}

	#[test]
	fn line_breaks_are_rejected() {
		let mut input = QueryInput::new("one");
		assert!(!input.input(key(KeyCode::Enter)));
		assert!(!input.input(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL)));
		assert_eq!(input.text(), "one");
	}

	#[test]
	fn set_text_keeps_only_the_first_line() {
		let mut input = QueryInput::default();
		input.set_text("first\nsecond");
		assert_eq!(input.text(), "first");
	}
}
