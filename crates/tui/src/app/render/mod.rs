pub(crate) mod layout;

use layout::AppLayout;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::App;
use super::answer::AnswerBody;
use super::state::Focus;
use crate::components::answer::{answer_lines, message_lines, text_width, viewport_height, wrapped_height};
use crate::components::tables::visible_rows;
use crate::components::{
	AnswerContext, InputContext, ResultsContext, SourcesContext, TitleContext, render_answer,
	render_banner, render_examples, render_input, render_results, render_sources, render_title,
};

impl App<'_> {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let layout = AppLayout::compute(
			frame.area(),
			self.session.examples.current().len(),
			self.sources.available.len(),
		);

		self.render_title_bar(frame, layout.title);
		render_input(
			frame,
			InputContext {
				input: &self.input,
				placeholder: &self.ui.input_placeholder,
				area: layout.input,
				theme: &self.style.theme,
				enabled: self.focus == Focus::Input && !self.session.searching,
			},
		);
		if layout.examples.height > 0 {
			render_examples(
				frame,
				layout.examples,
				&self.ui.examples_title,
				self.session.examples.current(),
				&self.style.theme,
			);
		}
		self.render_sources_panel(frame, layout.sources);
		self.render_results_panel(frame, layout.results);
		self.render_passage(frame, layout.passage);
		self.render_answer_panel(frame, layout.answer);
		render_banner(
			frame,
			layout.banner,
			self.session.banner.as_deref(),
			&self.style.theme,
		);
	}

	fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
		let summary = format!(
			"limit {} · session ${:.6}",
			self.limit, self.session.summary.total_cost
		);
		render_title(
			frame,
			area,
			TitleContext {
				title: &self.ui.title,
				status: "Searching",
				busy: self.session.searching,
				summary: &summary,
				throbber_state: &self.throbber_state,
				theme: &self.style.theme,
			},
		);
	}

	fn render_sources_panel(&mut self, frame: &mut Frame, area: Rect) {
		let sources = self
			.sources
			.available
			.iter()
			.map(|name| (name.as_str(), self.sources.is_selected(name)))
			.collect();
		let loading = self.sources.is_loading();
		render_sources(
			frame,
			area,
			SourcesContext {
				title: &self.ui.sources_title,
				sources,
				loading,
				list_state: &mut self.sources.list_state,
				theme: &self.style.theme,
				focused: self.focus == Focus::Sources,
			},
		);
	}

	fn render_results_panel(&mut self, frame: &mut Frame, area: Rect) {
		self.session.results.update_scrollbar(visible_rows(area));
		let results = &mut self.session.results;
		render_results(
			frame,
			area,
			ResultsContext {
				hits: &results.hits,
				title: &self.ui.results_title,
				table_state: &mut results.table_state,
				scrollbar_state: &mut results.scrollbar_state,
				theme: &self.style.theme,
				focused: self.focus == Focus::Input,
			},
		);
	}

	fn render_passage(&self, frame: &mut Frame, area: Rect) {
		let theme = &self.style.theme;
		let (title, body) = match self.session.results.selected() {
			Some(hit) => (
				format!(" {} · p. {} ", hit.file_name(), hit.pages),
				Line::from(Span::styled(
					hit.text.as_deref().unwrap_or("(no passage text)"),
					theme.prompt,
				)),
			),
			None => (
				" Passage ".to_string(),
				Line::from(Span::styled("Select a passage", theme.empty_style())),
			),
		};
		let block = Block::default()
			.borders(Borders::ALL)
			.border_set(ratatui::symbols::border::ROUNDED)
			.border_style(theme.border_style(false))
			.title(title);
		let paragraph = Paragraph::new(body)
			.wrap(Wrap { trim: true })
			.block(block);
		frame.render_widget(paragraph, area);
	}

	fn render_answer_panel(&mut self, frame: &mut Frame, area: Rect) {
		let theme = self.style.theme;
		let citable = self.session.results.len();
		let body = self.session.answer.body.clone();
		let (lines, title) = match &body {
			AnswerBody::Idle => (
				message_lines(&self.ui.idle_message, theme.empty_style()),
				format!(" {} ", self.ui.answer_title),
			),
			AnswerBody::Searching => (
				message_lines(&self.ui.searching_message, theme.empty_style()),
				format!(" {} ", self.ui.answer_title),
			),
			AnswerBody::NoContext => (
				message_lines(&self.ui.no_context_message, theme.error),
				format!(" {} ", self.ui.answer_title),
			),
			AnswerBody::Answer(answer) => (
				answer_lines(&answer.text, citable, &theme),
				format!(" {} · ${:.6} ", self.ui.answer_title, answer.cost),
			),
		};

		let content_height = wrapped_height(&lines, text_width(area));
		let metrics = self
			.session
			.answer
			.update_viewport(viewport_height(area), content_height);

		render_answer(
			frame,
			area,
			AnswerContext {
				title,
				lines,
				scroll: self.session.answer.scroll,
				needs_scrollbar: metrics.needs_scrollbar,
				scrollbar_state: &mut self.session.answer.scrollbar_state,
				theme: &theme,
			},
		);
	}
}
