use lore_core::Query;
use tracing::debug;

use super::sources::CatalogUpdate;
use crate::app::state::App;

impl App<'_> {
	/// Dispatch the current input as a question.
	///
	/// Does nothing while a question is being answered.
	pub(crate) fn submit_query(&mut self) {
		if self.session.searching {
			return;
		}
		let query = Query::new(self.input.text())
			.with_limit(self.limit)
			.with_sources(self.sources.selection());
		match self.dispatcher.dispatch(query, &mut self.session) {
			Ok(handle) => debug!(%handle, "question dispatched"),
			Err(err) => debug!(%err, "question rejected"),
		}
	}

	/// Abandon the question being answered.
	pub(crate) fn cancel_query(&mut self) {
		if self.dispatcher.cancel(&mut self.session) {
			self.session.answer.set(super::answer::AnswerBody::Idle);
		}
	}

	/// Apply any task updates waiting on the dispatcher.
	pub(crate) fn pump_task_updates(&mut self) {
		self.dispatcher.pump(&mut self.session);
	}

	/// Pick up the source catalog once the loader delivers it.
	pub(crate) fn pump_catalog(&mut self) {
		if let CatalogUpdate::Failed(message) = self.sources.pump() {
			self.session.banner = Some(message);
		}
	}
}
