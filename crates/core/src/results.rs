//! Passages returned by the knowledge-base search.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Inclusive page span of a passage within its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
	pub start: u32,
	pub end: u32,
}

impl PageRange {
	#[must_use]
	pub fn new(start: u32, end: u32) -> Self {
		Self { start, end }
	}

	#[must_use]
	pub fn single(page: u32) -> Self {
		Self::new(page, page)
	}
}

impl fmt::Display for PageRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.start == self.end {
			write!(f, "{}", self.start)
		} else {
			write!(f, "{}-{}", self.start, self.end)
		}
	}
}

/// One ranked passage from the search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
	/// Identifier of the source document, usually a path.
	pub document: String,
	/// Relevance score reported by the backend. Higher is better.
	pub score: f32,
	/// Pages the passage was taken from.
	pub pages: PageRange,
	/// Passage text, when the backend returns it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
}

impl SearchHit {
	pub fn new(document: impl Into<String>, score: f32, pages: PageRange) -> Self {
		Self {
			document: document.into(),
			score,
			pages,
			text: None,
		}
	}

	#[must_use]
	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	/// Final path component of the document identifier.
	#[must_use]
	pub fn file_name(&self) -> &str {
		Path::new(&self.document)
			.file_name()
			.and_then(|name| name.to_str())
			.unwrap_or(&self.document)
	}
}
