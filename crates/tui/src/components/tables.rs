use lore_core::SearchHit;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

use crate::components::render_scrollbar;
use crate::style::Theme;

pub(crate) const HIGHLIGHT_SYMBOL: &str = "▶ ";
pub(crate) const TABLE_COLUMN_SPACING: u16 = 1;
/// Header row + separator height inside the table's viewport.
pub(crate) const TABLE_HEADER_ROWS: usize = 2;

const NUMBER_WIDTH: u16 = 3;
const SCORE_WIDTH: u16 = 5;
const PAGES_WIDTH: u16 = 7;

/// Argument bundle for rendering the passage table.
pub struct ResultsContext<'a> {
	/// Passages to list.
	pub hits: &'a [SearchHit],
	/// Block title.
	pub title: &'a str,
	/// Selection and offset.
	pub table_state: &'a mut TableState,
	/// Scrollbar position, refreshed by the caller.
	pub scrollbar_state: &'a mut ratatui::widgets::ScrollbarState,
	/// Color theme.
	pub theme: &'a Theme,
	/// Whether the panel has keyboard focus.
	pub focused: bool,
}

/// Number of passage rows that fit in a table drawn in `area`.
#[must_use]
pub fn visible_rows(area: Rect) -> usize {
	(area.height.saturating_sub(2) as usize).saturating_sub(TABLE_HEADER_ROWS)
}

/// Render the passage table inside a bordered block.
pub fn render_results(frame: &mut Frame, area: Rect, ctx: ResultsContext<'_>) {
	let ResultsContext {
		hits,
		title,
		table_state,
		scrollbar_state,
		theme,
		focused,
	} = ctx;

	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(theme.border_style(focused))
		.title(format!(" {title} ({}) ", hits.len()));
	let inner = block.inner(area);
	frame.render_widget(block, area);

	if hits.is_empty() {
		if inner.height > 0 {
			let empty = Paragraph::new(Line::from(Span::styled("No passages", theme.empty)))
				.alignment(Alignment::Center);
			frame.render_widget(empty, inner);
		}
		return;
	}

	let needs_scrollbar = hits.len() > visible_rows(area) && visible_rows(area) > 0;
	let table_area = if needs_scrollbar {
		render_scrollbar(frame, inner, scrollbar_state, theme)
	} else {
		inner
	};

	let highlight_width = HIGHLIGHT_SYMBOL.width() as u16;
	let fixed = NUMBER_WIDTH + SCORE_WIDTH + PAGES_WIDTH + 3 * TABLE_COLUMN_SPACING + highlight_width;
	let document_width = usize::from(table_area.width.saturating_sub(fixed));

	let rows = hits
		.iter()
		.enumerate()
		.map(|(index, hit)| {
			let (document, _) = hit.document.unicode_truncate_start(document_width.max(1));
			Row::new(vec![
				Cell::from(format!("{}", index + 1)),
				Cell::from(document.to_string()),
				Cell::from(format!("{:.2}", hit.score)),
				Cell::from(hit.pages.to_string()),
			])
		})
		.collect::<Vec<_>>();

	let header = Row::new(["#", "Document", "Score", "Pages"].map(Cell::from))
		.style(theme.border_style(false))
		.height(1)
		.bottom_margin(1);
	let widths = [
		Constraint::Length(NUMBER_WIDTH),
		Constraint::Fill(1),
		Constraint::Length(SCORE_WIDTH),
		Constraint::Length(PAGES_WIDTH),
	];

	let table = Table::new(rows, widths)
		.header(header)
		.column_spacing(TABLE_COLUMN_SPACING)
		.highlight_spacing(HighlightSpacing::Always)
		.row_highlight_style(theme.row_highlight)
		.highlight_symbol(HIGHLIGHT_SYMBOL);
	frame.render_stateful_widget(table, table_area, table_state);

	render_header_separator(frame, table_area, theme);
}

fn render_header_separator(frame: &mut Frame, area: Rect, theme: &Theme) {
	if area.height <= 1 || area.width <= 2 {
		return;
	}

	let sep_rect = Rect {
		x: area.x,
		y: area.y + 1,
		width: area.width,
		height: 1,
	};
	let middle = "─".repeat(usize::from(area.width) - 2);
	let line = Line::from(vec![
		Span::raw(" "),
		Span::styled(middle, theme.border_style(false)),
		Span::raw(" "),
	]);
	frame.render_widget(Paragraph::new(line), sep_rect);
}
