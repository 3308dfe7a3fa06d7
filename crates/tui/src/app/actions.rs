use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use super::session::SessionSummary;
use super::state::Focus;

impl App<'_> {
	/// Process a keyboard event and return the session totals if the user exits.
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<SessionSummary> {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		let alt = key.modifiers.contains(KeyModifiers::ALT);

		match key.code {
			KeyCode::Char('c') if ctrl => return Some(self.summary()),
			KeyCode::Esc => {
				if self.session.searching {
					self.cancel_query();
				} else {
					return Some(self.summary());
				}
			}
			KeyCode::Enter => self.submit_query(),
			KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
			KeyCode::Up if ctrl => self.adjust_limit(1),
			KeyCode::Down if ctrl => self.adjust_limit(-1),
			KeyCode::Up => match self.focus {
				Focus::Input => self.session.results.move_up(),
				Focus::Sources => self.sources.move_up(),
			},
			KeyCode::Down => match self.focus {
				Focus::Input => self.session.results.move_down(),
				Focus::Sources => self.sources.move_down(),
			},
			KeyCode::PageUp => {
				let page = self.session.answer.page();
				self.session.answer.scroll_up(page);
			}
			KeyCode::PageDown => {
				let page = self.session.answer.page();
				self.session.answer.scroll_down(page);
			}
			KeyCode::F(number @ 1..=9) => self.jump_to_citation(usize::from(number)),
			KeyCode::Char(digit @ '1'..='9') if alt => {
				self.load_example(digit as usize - '0' as usize);
			}
			KeyCode::Char(' ') if self.focus == Focus::Sources => self.sources.toggle_current(),
			_ if self.focus == Focus::Input && !self.session.searching => {
				self.input.input(key);
			}
			_ => {}
		}
		None
	}

	fn toggle_focus(&mut self) {
		self.focus = match self.focus {
			Focus::Input if !self.sources.available.is_empty() => Focus::Sources,
			_ => Focus::Input,
		};
	}

	/// Move the results selection to the passage cited as `[number]`.
	fn jump_to_citation(&mut self, number: usize) {
		if let Some(index) = number.checked_sub(1) {
			self.session.results.select(index);
		}
	}

	/// Copy example question `number` into the input.
	fn load_example(&mut self, number: usize) {
		if self.session.searching {
			return;
		}
		if let Some(question) = self.session.examples.get(number) {
			let question = question.to_string();
			self.input.set_text(question);
			self.focus = Focus::Input;
		}
	}
}
