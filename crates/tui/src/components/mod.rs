//! UI building blocks shared across rendering and state modules.

/// Answer panel rendering and wrapping.
pub mod answer;
/// Error banner and key hints.
pub mod banner;
/// Example question strip.
pub mod examples;
/// Query input and title bar.
pub mod prompt;
/// Scrollbar for viewports.
pub mod scrollbar;
/// Source filter checklist.
pub mod sources;
/// Passage table.
pub mod tables;

pub use answer::{AnswerContext, render_answer};
pub use banner::render_banner;
pub use examples::render_examples;
pub use prompt::{InputContext, TitleContext, render_input, render_title};
pub use scrollbar::{ScrollMetrics, render_scrollbar};
pub use sources::{SourcesContext, render_sources};
pub use tables::{ResultsContext, render_results};
