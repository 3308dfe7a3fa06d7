/// Titles and messages rendered around the panels.
#[derive(Debug, Clone)]
pub(crate) struct UiLabels {
	/// Application name shown in the title bar.
	pub title: String,
	/// Placeholder text displayed in the empty query input.
	pub input_placeholder: String,
	/// Title of the example question strip.
	pub examples_title: String,
	/// Title of the source filter panel.
	pub sources_title: String,
	/// Title of the passage list.
	pub results_title: String,
	/// Title of the answer panel.
	pub answer_title: String,
	/// Answer panel text before the first question.
	pub idle_message: String,
	/// Answer panel text while a question is being answered.
	pub searching_message: String,
	/// Answer panel text when the search found nothing relevant.
	pub no_context_message: String,
}

impl Default for UiLabels {
	fn default() -> Self {
		Self {
			title: "lore".to_string(),
			input_placeholder: "Ask a question about your documents".to_string(),
			examples_title: "Examples".to_string(),
			sources_title: "Sources".to_string(),
			results_title: "Passages".to_string(),
			answer_title: "Answer".to_string(),
			idle_message: "Ask a question to search the knowledge base.".to_string(),
			searching_message: "Searching the knowledge base and generating an answer..."
				.to_string(),
			no_context_message: "No relevant information found in the knowledge base.\n\n\
				Try rephrasing the question with different keywords, or check that the \
				relevant documents have been added."
				.to_string(),
		}
	}
}
