/// Section headings that introduce follow-up questions, in priority order.
const SECTION_HEADINGS: &[&str] = &[
	"suggested search",
	"follow-up question",
	"related question",
	"additional search",
];

/// Extract follow-up questions listed under a suggestions heading.
///
/// Headings are matched case-insensitively anywhere in the text. Items are
/// the bullet (`-`, `*`, `•`) or numbered (`1.`) lines that follow the
/// heading; the list ends at the first other non-blank line. Surrounding
/// quotes are removed and duplicates dropped.
#[must_use]
pub fn suggested_searches(response: &str) -> Vec<String> {
	let lowered = response.to_ascii_lowercase();

	for heading in SECTION_HEADINGS {
		let Some(start) = lowered.find(heading) else {
			continue;
		};
		let after_heading = &response[start..];
		let body = match after_heading.find('\n') {
			Some(newline) => &after_heading[newline + 1..],
			None => "",
		};

		let items = collect_items(body);
		if !items.is_empty() {
			return items;
		}
	}

	Vec::new()
}

fn collect_items(body: &str) -> Vec<String> {
	let mut items: Vec<String> = Vec::new();
	for line in body.lines() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}
		let Some(item) = bullet_text(line) else {
			if items.is_empty() {
				continue;
			}
			break;
		};
		let item = strip_quotes(item);
		// Markdown rules such as `---` parse as bullets.
		if item.chars().all(|ch| matches!(ch, '-' | '*' | '_')) {
			continue;
		}
		if !items.iter().any(|existing| existing == item) {
			items.push(item.to_string());
		}
	}
	items
}

fn bullet_text(line: &str) -> Option<&str> {
	if let Some(rest) = line
		.strip_prefix('-')
		.or_else(|| line.strip_prefix('*'))
		.or_else(|| line.strip_prefix('•'))
	{
		return Some(rest.trim());
	}

	let digits = line.chars().take_while(char::is_ascii_digit).count();
	if digits > 0 {
		return line[digits..].strip_prefix('.').map(str::trim);
	}
	None
}

fn strip_quotes(item: &str) -> &str {
	let quoted = ['"', '“', '”'];
	item.trim_start_matches(quoted)
		.trim_end_matches(quoted)
		.trim()
}
