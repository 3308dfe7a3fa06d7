use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_truncate::UnicodeTruncateStr;

use crate::style::Theme;

/// Render the example questions, each labelled with the key that loads it.
pub fn render_examples(frame: &mut Frame, area: Rect, title: &str, examples: &[String], theme: &Theme) {
	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(theme.border_style(false))
		.title(format!(" {title} "));
	let width = usize::from(area.width.saturating_sub(2));

	let lines = examples
		.iter()
		.enumerate()
		.map(|(index, question)| {
			let key = format!("Alt+{} ", index + 1);
			let (question, _) = question.unicode_truncate(width.saturating_sub(key.len()));
			Line::from(vec![
				Span::styled(key, theme.empty_style()),
				Span::styled(question.to_string(), theme.accent),
			])
		})
		.collect::<Vec<_>>();

	frame.render_widget(Paragraph::new(lines).block(block), area);
}
