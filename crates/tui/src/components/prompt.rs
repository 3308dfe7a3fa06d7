use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::input::QueryInput;
use crate::style::Theme;

/// Argument bundle for rendering the input area.
pub struct InputContext<'a> {
	/// The query input widget.
	pub input: &'a QueryInput<'a>,
	/// Placeholder text shown when input is empty.
	pub placeholder: &'a str,
	/// Rendering area.
	pub area: Rect,
	/// Color theme.
	pub theme: &'a Theme,
	/// Whether the input accepts keys.
	pub enabled: bool,
}

/// Argument bundle for rendering the title bar.
pub struct TitleContext<'a> {
	/// Application name.
	pub title: &'a str,
	/// Text shown next to the spinner while busy.
	pub status: &'a str,
	/// Whether a task is running.
	pub busy: bool,
	/// Right-aligned summary, such as the session cost.
	pub summary: &'a str,
	/// Spinner animation state.
	pub throbber_state: &'a ThrobberState,
	/// Color theme.
	pub theme: &'a Theme,
}

/// Render the bordered query input with optional placeholder.
pub fn render_input(frame: &mut Frame, input: InputContext<'_>) {
	let InputContext {
		input,
		placeholder,
		area,
		theme,
		enabled,
	} = input;

	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(theme.border_style(enabled))
		.title(" Question ");
	let inner = block.inner(area);
	frame.render_widget(block, area);

	input.render_textarea(frame, inner);

	if input.text().is_empty() {
		render_placeholder(frame, inner, placeholder, theme);
	}
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) {
	if area.width == 0 || area.height == 0 || text.is_empty() {
		return;
	}
	let available_width = area.width as usize;
	// Leave the cursor cell visible.
	let display_text: String = text.chars().take(available_width.saturating_sub(1)).collect();
	frame.buffer_mut().set_line(
		area.left().saturating_add(1),
		area.top(),
		&Line::from(Span::styled(display_text, theme.empty_style())),
		area.width.saturating_sub(1),
	);
}

/// Render the one-line title bar: name on the left, status and summary on
/// the right.
pub fn render_title(frame: &mut Frame, area: Rect, ctx: TitleContext<'_>) {
	let TitleContext {
		title,
		status,
		busy,
		summary,
		throbber_state,
		theme,
	} = ctx;
	if area.width == 0 || area.height == 0 {
		return;
	}

	let buffer = frame.buffer_mut();
	buffer.set_line(
		area.left(),
		area.top(),
		&Line::from(Span::styled(title.to_string(), theme.accent)),
		area.width,
	);

	let muted_style = theme.empty_style();
	let mut line = Line::default();
	if busy {
		let spinner = Throbber::default()
			.style(muted_style)
			.throbber_style(theme.highlight);
		line.spans.push(spinner.to_symbol_span(throbber_state));
		line.spans.push(Span::styled(format!("{status}  "), muted_style));
	}
	line.spans.push(Span::styled(summary.to_string(), muted_style));

	let line_width = line.width() as u16;
	let title_width = title.chars().count() as u16;
	let min_start = area.left().saturating_add(title_width).saturating_add(2);
	let start_x = area.right().saturating_sub(line_width).max(min_start);
	if start_x >= area.right() {
		return;
	}
	buffer.set_line(start_x, area.top(), &line, area.right() - start_x);
}
