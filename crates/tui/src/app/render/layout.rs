use ratatui::layout::{Constraint, Layout, Margin, Rect};

const INPUT_HEIGHT: u16 = 3;
const MAX_SOURCES_HEIGHT: u16 = 8;
const PASSAGE_HEIGHT: u16 = 7;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AppLayout {
	pub(crate) title: Rect,
	pub(crate) input: Rect,
	pub(crate) examples: Rect,
	pub(crate) sources: Rect,
	pub(crate) results: Rect,
	pub(crate) passage: Rect,
	pub(crate) answer: Rect,
	pub(crate) banner: Rect,
}

impl AppLayout {
	/// Split `area` for `examples` example questions and `sources` catalog
	/// entries. Empty example lists take no space.
	pub(crate) fn compute(area: Rect, examples: usize, sources: usize) -> Self {
		let area = area.inner(Margin {
			vertical: 0,
			horizontal: 1,
		});

		let examples_height = if examples == 0 {
			0
		} else {
			u16::try_from(examples).unwrap_or(u16::MAX).saturating_add(2)
		};
		let [title, input, examples, main, banner] = Layout::vertical([
			Constraint::Length(1),
			Constraint::Length(INPUT_HEIGHT),
			Constraint::Length(examples_height),
			Constraint::Min(6),
			Constraint::Length(1),
		])
		.areas(area);

		let [left, answer] =
			Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(main);

		let sources_height = u16::try_from(sources)
			.unwrap_or(u16::MAX)
			.saturating_add(2)
			.clamp(3, MAX_SOURCES_HEIGHT);
		let [sources, results, passage] = Layout::vertical([
			Constraint::Length(sources_height),
			Constraint::Min(4),
			Constraint::Length(PASSAGE_HEIGHT),
		])
		.areas(left);

		Self {
			title,
			input,
			examples,
			sources,
			results,
			passage,
			answer,
			banner,
		}
	}
}
