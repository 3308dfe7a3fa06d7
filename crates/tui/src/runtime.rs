//! Application runtime and event loop.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use lore_core::silence_background_panics;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use crate::App;
use crate::app::SessionSummary;

/// Run `app` until the user quits and return the session totals.
pub fn run(mut app: App<'_>) -> Result<SessionSummary> {
	app.run()
}

impl App<'_> {
	/// Pump the terminal event loop until the user exits.
	pub fn run(&mut self) -> Result<SessionSummary> {
		let mut terminal = ratatui::init();
		silence_background_panics();
		let result = restoring(|| self.drive(&mut terminal), ratatui::restore);

		if let Ok(summary) = &result {
			info!(
				questions = summary.questions,
				total_cost = summary.total_cost,
				"session finished"
			);
		}
		result
	}

	fn drive(&mut self, terminal: &mut DefaultTerminal) -> Result<SessionSummary> {
		terminal.clear()?;

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(Duration::from_millis(50))? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let result = self.event_loop(terminal, &event_rx);

		event_loop_running.store(false, Ordering::Relaxed);
		match event_thread.join() {
			Ok(join_result) => join_result?,
			Err(err) => std::panic::resume_unwind(err),
		}
		result
	}

	fn event_loop(
		&mut self,
		terminal: &mut DefaultTerminal,
		event_rx: &mpsc::Receiver<Event>,
	) -> Result<SessionSummary> {
		let mut pending_events = VecDeque::new();

		loop {
			loop {
				match event_rx.try_recv() {
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						return Err(anyhow!("input event channel disconnected"));
					}
				}
			}

			while let Some(event) = pending_events.pop_front() {
				if let Event::Key(key) = event
					&& key.kind == KeyEventKind::Press
					&& let Some(summary) = self.handle_key(key)
				{
					return Ok(summary);
				}
			}

			self.pump_catalog();
			self.pump_task_updates();
			if self.session.searching {
				self.throbber_state.calc_next();
			}

			terminal.draw(|frame| self.draw(frame))?;

			thread::sleep(Duration::from_millis(16));
		}
	}
}

/// Run `body`, then `restore` whether or not it succeeded.
fn restoring<T>(body: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
	let result = body();
	restore();
	result
}
