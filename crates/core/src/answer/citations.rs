/// Piece of answer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
	/// Ordinary text.
	Text(&'a str),
	/// A `[n]` marker. `number` is one-based.
	Citation { number: usize, raw: &'a str },
}

/// Split `text` into plain runs and `[n]` citation markers.
///
/// Bracketed content that is not a positive integer is kept as text.
#[must_use]
pub fn segments(text: &str) -> Vec<Segment<'_>> {
	let mut out = Vec::new();
	let mut plain_start = 0;
	let mut cursor = 0;
	let bytes = text.as_bytes();

	while let Some(offset) = text[cursor..].find('[') {
		let open = cursor + offset;
		let digits_end = bytes[open + 1..]
			.iter()
			.position(|byte| !byte.is_ascii_digit())
			.map_or(bytes.len(), |len| open + 1 + len);

		let is_marker = digits_end > open + 1 && bytes.get(digits_end) == Some(&b']');
		let number = if is_marker {
			text[open + 1..digits_end]
				.parse::<usize>()
				.ok()
				.filter(|n| *n > 0)
		} else {
			None
		};

		match number {
			Some(number) => {
				if plain_start < open {
					out.push(Segment::Text(&text[plain_start..open]));
				}
				let close = digits_end + 1;
				out.push(Segment::Citation {
					number,
					raw: &text[open..close],
				});
				plain_start = close;
				cursor = close;
			}
			None => cursor = open + 1,
		}
	}

	if plain_start < text.len() {
		out.push(Segment::Text(&text[plain_start..]));
	}
	out
}
