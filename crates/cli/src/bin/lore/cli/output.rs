use anyhow::Result;
use serde_json::json;

use crate::workflow::AskOutcome;

/// Print passages and answer as readable text.
pub(crate) fn print_plain(outcome: &AskOutcome) {
	for (index, hit) in outcome.hits.iter().enumerate() {
		println!(
			"[{}] {}  {:.2}  p. {}",
			index + 1,
			hit.document,
			hit.score,
			hit.pages
		);
	}

	match (&outcome.answer, &outcome.error) {
		(_, Some(error)) => eprintln!("{error}"),
		(Some(answer), None) => {
			if !outcome.hits.is_empty() {
				println!();
			}
			println!("{}", answer.text.trim_end());
		}
		(None, None) => println!("No relevant passages found for '{}'", outcome.query),
	}
}

/// Format the outcome as a JSON document.
pub(crate) fn format_outcome_json(outcome: &AskOutcome) -> Result<String> {
	let hits: Vec<_> = outcome
		.hits
		.iter()
		.map(|hit| {
			json!({
				"document": hit.document,
				"score": hit.score,
				"pages": hit.pages.to_string(),
				"text": hit.text,
			})
		})
		.collect();

	let answer = outcome.answer.as_ref().map(|answer| {
		json!({
			"text": answer.text,
			"cost": answer.cost,
			"suggestions": answer.suggested_searches(),
		})
	});

	let payload = json!({
		"query": outcome.query,
		"hits": hits,
		"answer": answer,
		"error": outcome.error,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

pub(crate) fn print_json(outcome: &AskOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use lore_core::{Answer, PageRange, SearchHit};
	use serde_json::Value;

	use super::*;

	#[test]
	fn json_format_includes_hits_and_answer() {
		let outcome = AskOutcome {
			query: "What is the termination clause?".into(),
			hits: vec![SearchHit::new("contract_12.pdf", 0.91, PageRange::new(4, 5))],
			answer: Some(
				Answer::new("The termination clause requires 30 days notice.").with_cost(0.5),
			),
			..AskOutcome::default()
		};

		let json = format_outcome_json(&outcome).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["hits"][0]["document"], "contract_12.pdf");
		assert_eq!(value["hits"][0]["pages"], "4-5");
		assert_eq!(
			value["answer"]["text"],
			"The termination clause requires 30 days notice."
		);
		assert_eq!(value["answer"]["cost"], 0.5);
		assert!(value["error"].is_null());
	}

	#[test]
	fn json_format_reports_failures() {
		let outcome = AskOutcome {
			query: "anything".into(),
			error: Some("Search failed: no search backend is configured".into()),
			..AskOutcome::default()
		};

		let json = format_outcome_json(&outcome).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert!(value["answer"].is_null());
		assert_eq!(value["hits"].as_array().map(Vec::len), Some(0));
		assert_eq!(
			value["error"],
			"Search failed: no search backend is configured"
		);
	}
}
