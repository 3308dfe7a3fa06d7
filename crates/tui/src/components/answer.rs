//! Answer panel with highlighted citation markers.

use lore_core::answer::{Segment, segments};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, ScrollbarState, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::components::render_scrollbar;
use crate::style::Theme;

/// Argument bundle for rendering the answer panel.
pub struct AnswerContext<'a> {
	/// Block title.
	pub title: String,
	/// Lines to show, already styled.
	pub lines: Vec<Line<'a>>,
	/// First visible wrapped row.
	pub scroll: usize,
	/// Whether the wrapped lines overflow the panel.
	pub needs_scrollbar: bool,
	/// Scrollbar position, refreshed by the caller.
	pub scrollbar_state: &'a mut ScrollbarState,
	/// Color theme.
	pub theme: &'a Theme,
}

/// Style answer text, highlighting `[n]` markers that refer to one of the
/// `citable` passages.
#[must_use]
pub fn answer_lines<'a>(text: &'a str, citable: usize, theme: &Theme) -> Vec<Line<'a>> {
	text.lines()
		.map(|line| {
			let spans = segments(line)
				.into_iter()
				.map(|segment| match segment {
					Segment::Text(text) => Span::styled(text, theme.prompt),
					Segment::Citation { number, raw } if number <= citable => {
						Span::styled(raw, theme.citation)
					}
					Segment::Citation { raw, .. } => Span::styled(raw, theme.prompt),
				})
				.collect::<Vec<_>>();
			Line::from(spans)
		})
		.collect()
}

/// Plain message lines in a single style.
#[must_use]
pub fn message_lines(text: &str, style: Style) -> Vec<Line<'_>> {
	text.lines()
		.map(|line| Line::from(Span::styled(line, style)))
		.collect()
}

/// Inner height of the panel drawn in `area`.
#[must_use]
pub fn viewport_height(area: Rect) -> usize {
	usize::from(area.height.saturating_sub(2))
}

/// Inner text width of the panel drawn in `area`, leaving room for a
/// scrollbar.
#[must_use]
pub fn text_width(area: Rect) -> usize {
	usize::from(area.width.saturating_sub(3))
}

/// Number of rows `lines` occupy once word-wrapped to `width` columns.
#[must_use]
pub fn wrapped_height(lines: &[Line<'_>], width: usize) -> usize {
	lines
		.iter()
		.map(|line| {
			let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
			wrapped_rows(&text, width)
		})
		.sum()
}

fn wrapped_rows(text: &str, width: usize) -> usize {
	if width == 0 {
		return 0;
	}
	let mut rows = 1;
	let mut current = 0;
	for word in text.split(' ') {
		let word_width = word.width();
		let needed = if current == 0 {
			word_width
		} else {
			current + 1 + word_width
		};
		if needed <= width {
			current = needed;
			continue;
		}
		if current > 0 {
			rows += 1;
		}
		rows += word_width.saturating_sub(1) / width;
		current = match word_width % width {
			0 if word_width > 0 => width,
			rest => rest,
		};
	}
	rows
}

/// Render the answer panel.
pub fn render_answer(frame: &mut Frame, area: Rect, ctx: AnswerContext<'_>) {
	let AnswerContext {
		title,
		lines,
		scroll,
		needs_scrollbar,
		scrollbar_state,
		theme,
	} = ctx;

	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(theme.border_style(false))
		.title(title);
	let inner = block.inner(area);
	frame.render_widget(block, area);

	let text_area = if needs_scrollbar {
		render_scrollbar(frame, inner, scrollbar_state, theme)
	} else {
		inner
	};
	let offset = u16::try_from(scroll).unwrap_or(u16::MAX);
	let paragraph = Paragraph::new(lines)
		.wrap(Wrap { trim: false })
		.scroll((offset, 0));
	frame.render_widget(paragraph, text_area);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::style::default_theme;

	#[test]
	fn only_known_citations_are_highlighted() {
		let theme = default_theme();
		let lines = answer_lines("Notice is 30 days [1], see also [4].", 2, &theme);
		let spans = &lines[0].spans;
		let cited: Vec<&str> = spans
			.iter()
			.filter(|span| span.style == theme.citation)
			.map(|span| span.content.as_ref())
			.collect();
		assert_eq!(cited, vec!["[1]"]);
		assert!(spans.iter().any(|span| span.content == "[4]"));
	}

	#[test]
	fn wrapping_counts_rows_per_word() {
		assert_eq!(wrapped_rows("", 10), 1);
		assert_eq!(wrapped_rows("short", 10), 1);
		assert_eq!(wrapped_rows("aaaa bbbb cccc", 9), 2);
		assert_eq!(wrapped_rows("abcdefghijkl", 5), 3);
		assert_eq!(wrapped_rows("anything", 0), 0);
	}

	#[test]
	fn height_sums_every_line() {
		let theme = default_theme();
		let lines = message_lines("one\n\nthree four five", theme.empty);
		assert_eq!(wrapped_height(&lines, 10), 4);
	}
}
