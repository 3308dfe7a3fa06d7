use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::style::Theme;

/// Argument bundle for rendering the source filter.
pub struct SourcesContext<'a> {
	/// Block title.
	pub title: &'a str,
	/// Every known source with its selection flag.
	pub sources: Vec<(&'a str, bool)>,
	/// Whether the catalog is still loading.
	pub loading: bool,
	/// Cursor position.
	pub list_state: &'a mut ListState,
	/// Color theme.
	pub theme: &'a Theme,
	/// Whether the panel has keyboard focus.
	pub focused: bool,
}

/// Render the source checklist.
pub fn render_sources(frame: &mut Frame, area: Rect, ctx: SourcesContext<'_>) {
	let SourcesContext {
		title,
		sources,
		loading,
		list_state,
		theme,
		focused,
	} = ctx;

	let selected = sources.iter().filter(|(_, on)| *on).count();
	let scope = if selected == 0 {
		"all".to_string()
	} else {
		format!("{selected}/{}", sources.len())
	};
	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(theme.border_style(focused))
		.title(format!(" {title} ({scope}) "));

	if sources.is_empty() {
		let message = if loading { "Loading..." } else { "No sources" };
		let paragraph =
			Paragraph::new(Line::from(Span::styled(message, theme.empty_style()))).block(block);
		frame.render_widget(paragraph, area);
		return;
	}

	let items = sources
		.into_iter()
		.map(|(name, on)| {
			let mark = if on { "[x] " } else { "[ ] " };
			ListItem::new(Line::from(vec![
				Span::styled(mark, theme.highlight),
				Span::styled(name, theme.prompt),
			]))
		})
		.collect::<Vec<_>>();

	let mut list = List::new(items).block(block);
	if focused {
		list = list.highlight_style(theme.row_highlight);
	}
	frame.render_stateful_widget(list, area, list_state);
}
