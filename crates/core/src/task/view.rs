use crate::answer::Answer;
use crate::query::Query;
use crate::results::SearchHit;

/// Display surface that published task updates are applied to.
///
/// Every method runs on the interface's update thread. For each applied
/// terminal outcome the dispatcher calls exactly one of
/// [`show_answer`](Self::show_answer), [`show_no_context`](Self::show_no_context)
/// or [`show_error`](Self::show_error), and then [`finish`](Self::finish).
pub trait AnswerView {
	/// A query was accepted and is now running. Enter the searching state.
	fn begin_search(&mut self, query: &Query);

	/// Replace the displayed passages.
	fn show_hits(&mut self, hits: &[SearchHit]);

	/// Display a generated answer.
	fn show_answer(&mut self, answer: &Answer);

	/// The search found nothing relevant, so no answer was generated.
	fn show_no_context(&mut self);

	/// Display a failure in the error banner.
	fn show_error(&mut self, message: &str);

	/// Leave the searching state and re-enable input.
	fn finish(&mut self);
}
