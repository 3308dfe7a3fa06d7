/// Number of example questions shown at once.
pub(crate) const MAX_EXAMPLES: usize = 3;

/// Example questions offered below the input.
///
/// Suggestions extracted from answers replace the configured defaults until
/// a search finds nothing, which restores them.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExampleQuestions {
	defaults: Vec<String>,
	current: Vec<String>,
}

impl ExampleQuestions {
	pub(crate) fn new(defaults: Vec<String>) -> Self {
		let defaults: Vec<String> = defaults
			.into_iter()
			.map(|question| question.trim().to_string())
			.filter(|question| !question.is_empty())
			.take(MAX_EXAMPLES)
			.collect();
		Self {
			current: defaults.clone(),
			defaults,
		}
	}

	/// Show `suggestions` instead of the current examples. An empty list
	/// keeps what is shown.
	pub(crate) fn apply_suggestions(&mut self, suggestions: Vec<String>) {
		if suggestions.is_empty() {
			return;
		}
		self.current = suggestions.into_iter().take(MAX_EXAMPLES).collect();
	}

	pub(crate) fn reset(&mut self) {
		self.current = self.defaults.clone();
	}

	/// Example `number`, one-based.
	pub(crate) fn get(&self, number: usize) -> Option<&str> {
		self.current.get(number.checked_sub(1)?).map(String::as_str)
	}

	pub(crate) fn current(&self) -> &[String] {
		&self.current
	}
}
