use lore_core::SearchHit;
use ratatui::widgets::{ScrollbarState, TableState};

use crate::components::ScrollMetrics;

/// Passages shown in the results table.
#[derive(Debug, Default)]
pub(crate) struct ResultsState {
	pub(crate) hits: Vec<SearchHit>,
	pub(crate) table_state: TableState,
	pub(crate) scrollbar_state: ScrollbarState,
}

impl ResultsState {
	/// Replace the passages, selecting the first one. Re-publishing the same
	/// passages keeps the current selection.
	pub(crate) fn replace(&mut self, hits: &[SearchHit]) {
		if self.hits == hits {
			return;
		}
		self.hits = hits.to_vec();
		*self.table_state.offset_mut() = 0;
		self.table_state
			.select(if self.hits.is_empty() { None } else { Some(0) });
	}

	pub(crate) fn len(&self) -> usize {
		self.hits.len()
	}

	pub(crate) fn selected(&self) -> Option<&SearchHit> {
		self.hits.get(self.table_state.selected()?)
	}

	/// Select the hit at `index` if it exists.
	pub(crate) fn select(&mut self, index: usize) -> bool {
		if index >= self.hits.len() {
			return false;
		}
		self.table_state.select(Some(index));
		true
	}

	pub(crate) fn move_up(&mut self) {
		if let Some(selected) = self.table_state.selected()
			&& selected > 0
		{
			self.table_state.select(Some(selected - 1));
		}
	}

	pub(crate) fn move_down(&mut self) {
		if let Some(selected) = self.table_state.selected()
			&& selected + 1 < self.hits.len()
		{
			self.table_state.select(Some(selected + 1));
		}
	}

	pub(crate) fn update_scrollbar(&mut self, viewport_rows: usize) -> ScrollMetrics {
		let metrics = ScrollMetrics::compute(self.hits.len(), viewport_rows);
		let position = metrics.scrollbar_position(self.table_state.offset());
		self.scrollbar_state = self
			.scrollbar_state
			.content_length(metrics.content_length)
			.viewport_content_length(metrics.viewport_len)
			.position(position);
		metrics
	}
}

#[cfg(test)]
mod tests {
	use lore_core::PageRange;

	use super::*;

	fn hits(count: usize) -> Vec<SearchHit> {
		(0..count)
			.map(|i| SearchHit::new(format!("doc{i}.pdf"), 0.5, PageRange::single(1)))
			.collect()
	}

	#[test]
	fn replace_selects_first_hit() {
		let mut results = ResultsState::default();
		results.replace(&hits(3));
		assert_eq!(results.table_state.selected(), Some(0));

		results.replace(&[]);
		assert_eq!(results.table_state.selected(), None);
		assert!(results.selected().is_none());
	}

	#[test]
	fn republishing_same_hits_keeps_selection() {
		let mut results = ResultsState::default();
		let hits = hits(3);
		results.replace(&hits);
		results.move_down();
		results.replace(&hits);
		assert_eq!(results.table_state.selected(), Some(1));
	}

	#[test]
	fn selection_stays_in_bounds() {
		let mut results = ResultsState::default();
		results.replace(&hits(2));
		results.move_up();
		assert_eq!(results.table_state.selected(), Some(0));
		results.move_down();
		results.move_down();
		assert_eq!(results.table_state.selected(), Some(1));
		assert!(!results.select(2));
		assert!(results.select(0));
	}
}
