use std::collections::BTreeSet;
use std::sync::mpsc::{Receiver, TryRecvError};

use lore_core::catalog::CatalogResult;
use ratatui::widgets::ListState;

/// Outcome of polling the background catalog loader.
#[derive(Debug, PartialEq)]
pub(crate) enum CatalogUpdate {
	Pending,
	Loaded,
	Failed(String),
}

/// Source filter panel. An empty selection searches every source.
#[derive(Debug, Default)]
pub(crate) struct SourcesState {
	pub(crate) available: Vec<String>,
	selected: BTreeSet<String>,
	pub(crate) list_state: ListState,
	loader: Option<Receiver<CatalogResult>>,
}

impl SourcesState {
	pub(crate) fn new(loader: Receiver<CatalogResult>, preselected: Vec<String>) -> Self {
		Self {
			selected: preselected.into_iter().collect(),
			loader: Some(loader),
			..Self::default()
		}
	}

	/// Mark `name` selected. Names missing from the catalog are dropped when
	/// it arrives.
	pub(crate) fn preselect(&mut self, name: String) {
		self.selected.insert(name);
	}

	pub(crate) fn is_loading(&self) -> bool {
		self.loader.is_some()
	}

	/// Poll the catalog loader without blocking.
	pub(crate) fn pump(&mut self) -> CatalogUpdate {
		let Some(loader) = &self.loader else {
			return CatalogUpdate::Pending;
		};
		match loader.try_recv() {
			Ok(Ok(sources)) => {
				self.loader = None;
				self.set_available(sources);
				CatalogUpdate::Loaded
			}
			Ok(Err(err)) => {
				self.loader = None;
				self.selected.clear();
				CatalogUpdate::Failed(format!("Could not load sources: {err}"))
			}
			Err(TryRecvError::Empty) => CatalogUpdate::Pending,
			Err(TryRecvError::Disconnected) => {
				self.loader = None;
				self.selected.clear();
				CatalogUpdate::Failed("Could not load sources".to_string())
			}
		}
	}

	pub(crate) fn set_available(&mut self, sources: Vec<String>) {
		self.selected.retain(|name| sources.contains(name));
		self.available = sources;
		self.list_state
			.select(if self.available.is_empty() { None } else { Some(0) });
	}

	pub(crate) fn is_selected(&self, name: &str) -> bool {
		self.selected.contains(name)
	}

	/// Toggle the source under the cursor.
	pub(crate) fn toggle_current(&mut self) {
		let Some(name) = self
			.list_state
			.selected()
			.and_then(|index| self.available.get(index))
		else {
			return;
		};
		if !self.selected.remove(name) {
			self.selected.insert(name.clone());
		}
	}

	pub(crate) fn move_up(&mut self) {
		if let Some(selected) = self.list_state.selected()
			&& selected > 0
		{
			self.list_state.select(Some(selected - 1));
		}
	}

	pub(crate) fn move_down(&mut self) {
		if let Some(selected) = self.list_state.selected()
			&& selected + 1 < self.available.len()
		{
			self.list_state.select(Some(selected + 1));
		}
	}

	/// Sources the next search is restricted to.
	pub(crate) fn selection(&self) -> Vec<String> {
		self.selected.iter().cloned().collect()
	}
}
