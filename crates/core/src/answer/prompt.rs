use crate::results::SearchHit;

/// Separator placed between context blocks in the generation prompt.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Render one passage as a context block.
#[must_use]
pub fn context_block(hit: &SearchHit) -> String {
	format!(
		"Source: {} (Pages {})\n{}",
		hit.file_name(),
		hit.pages,
		hit.text.as_deref().unwrap_or_default()
	)
}

/// Build the prompt sent to the generation backend.
#[must_use]
pub fn build_prompt(query: &str, hits: &[SearchHit]) -> String {
	let context = hits
		.iter()
		.map(context_block)
		.collect::<Vec<_>>()
		.join(CONTEXT_SEPARATOR);
	format!("{query}\n\nCONTEXT:\n{context}")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::results::PageRange;

	#[test]
	fn prompt_lists_every_passage() {
		let hits = vec![
			SearchHit::new("kb/contract_12.pdf", 0.91, PageRange::new(4, 5))
				.with_text("Either party may terminate with 30 days notice."),
			SearchHit::new("kb/handbook.pdf", 0.52, PageRange::single(9)).with_text("Notice periods."),
		];

		let prompt = build_prompt("What is the termination clause?", &hits);
		assert_eq!(
			prompt,
			"What is the termination clause?\n\nCONTEXT:\n\
			 Source: contract_12.pdf (Pages 4-5)\nEither party may terminate with 30 days notice.\
			 \n\n---\n\n\
			 Source: handbook.pdf (Pages 9)\nNotice periods."
		);
	}
}
