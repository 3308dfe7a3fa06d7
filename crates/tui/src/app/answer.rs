use lore_core::Answer;
use ratatui::widgets::ScrollbarState;

use crate::components::ScrollMetrics;

/// What the answer panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AnswerBody {
	Idle,
	Searching,
	Answer(Answer),
	NoContext,
}

/// Answer panel contents and scroll position.
#[derive(Debug)]
pub(crate) struct AnswerState {
	pub(crate) body: AnswerBody,
	pub(crate) scroll: usize,
	pub(crate) viewport_height: usize,
	pub(crate) content_height: usize,
	pub(crate) scrollbar_state: ScrollbarState,
}

impl Default for AnswerState {
	fn default() -> Self {
		Self {
			body: AnswerBody::Idle,
			scroll: 0,
			viewport_height: 1,
			content_height: 0,
			scrollbar_state: ScrollbarState::default(),
		}
	}
}

impl AnswerState {
	pub(crate) fn set(&mut self, body: AnswerBody) {
		self.body = body;
		self.scroll = 0;
	}

	pub(crate) fn answer(&self) -> Option<&Answer> {
		match &self.body {
			AnswerBody::Answer(answer) => Some(answer),
			_ => None,
		}
	}

	fn metrics(&self) -> ScrollMetrics {
		ScrollMetrics::compute(self.content_height, self.viewport_height)
	}

	pub(crate) fn scroll_up(&mut self, lines: usize) {
		self.scroll = self.scroll.saturating_sub(lines);
	}

	pub(crate) fn scroll_down(&mut self, lines: usize) {
		let max = self.metrics().max_scroll;
		self.scroll = self.scroll.saturating_add(lines).min(max);
	}

	pub(crate) fn page(&self) -> usize {
		self.viewport_height.saturating_sub(1).max(1)
	}

	/// Record the rendered size and clamp the scroll offset to it.
	pub(crate) fn update_viewport(&mut self, viewport_height: usize, content_height: usize) -> ScrollMetrics {
		self.viewport_height = viewport_height;
		self.content_height = content_height;
		let metrics = self.metrics();
		self.scroll = self.scroll.min(metrics.max_scroll);
		self.scrollbar_state = self
			.scrollbar_state
			.content_length(metrics.content_length)
			.viewport_content_length(metrics.viewport_len)
			.position(metrics.scrollbar_position(self.scroll));
		metrics
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scrolling_is_clamped_to_content() {
		let mut state = AnswerState::default();
		state.update_viewport(10, 25);
		state.scroll_down(100);
		assert_eq!(state.scroll, 15);
		state.scroll_up(4);
		assert_eq!(state.scroll, 11);

		state.update_viewport(10, 12);
		assert_eq!(state.scroll, 2);
	}

	#[test]
	fn new_body_resets_scroll() {
		let mut state = AnswerState::default();
		state.update_viewport(5, 50);
		state.scroll_down(20);
		state.set(AnswerBody::Searching);
		assert_eq!(state.scroll, 0);
		assert!(state.answer().is_none());
	}
}
