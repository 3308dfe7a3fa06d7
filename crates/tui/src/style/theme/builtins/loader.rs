//! Parsing for the bundled `*.toml` theme definitions.
//!
//! A definition names its theme, optionally declares a `[palette]` of named
//! colours, and then gives one `[styles.<slot>]` table per [`Theme`] field.
//! Colours are palette names or anything [`Color`] parses from a string
//! (`"#ff8c00"`, `"dark gray"`, `"208"`).

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail, ensure};
use include_dir::{Dir, File};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::style::theme::types::{Theme, ThemeRegistration};

/// Style slots every definition must provide.
const SLOTS: [&str; 8] = [
	"header",
	"row_highlight",
	"prompt",
	"empty",
	"highlight",
	"error",
	"citation",
	"accent",
];

pub(super) struct BuiltinThemes {
	pub(super) registrations: Vec<ThemeRegistration>,
	pub(super) default_theme: Theme,
}

impl BuiltinThemes {
	pub(super) fn fallback(theme: Theme) -> Self {
		Self {
			registrations: vec![ThemeRegistration::new("terminal", theme)],
			default_theme: theme,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
	name: String,
	#[serde(default)]
	aliases: Vec<String>,
	#[serde(default)]
	default: bool,
	#[serde(default)]
	palette: BTreeMap<String, String>,
	styles: BTreeMap<String, StyleSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleSpec {
	fg: Option<String>,
	bg: Option<String>,
	#[serde(default)]
	modifiers: Vec<String>,
}

impl ThemeFile {
	fn theme(&self) -> Result<Theme> {
		if let Some(unknown) = self.styles.keys().find(|slot| !SLOTS.contains(&slot.as_str())) {
			bail!("unknown style slot `styles.{unknown}`");
		}

		let slot = |name: &str| -> Result<Style> {
			let spec = self
				.styles
				.get(name)
				.ok_or_else(|| anyhow!("missing `[styles.{name}]` table"))?;
			self.style(spec)
				.with_context(|| format!("in `[styles.{name}]`"))
		};

		Ok(Theme {
			header: slot("header")?,
			row_highlight: slot("row_highlight")?,
			prompt: slot("prompt")?,
			empty: slot("empty")?,
			highlight: slot("highlight")?,
			error: slot("error")?,
			citation: slot("citation")?,
			accent: slot("accent")?,
		})
	}

	fn style(&self, spec: &StyleSpec) -> Result<Style> {
		let mut style = Style::new();
		if let Some(fg) = &spec.fg {
			style = style.fg(self.color(fg)?);
		}
		if let Some(bg) = &spec.bg {
			style = style.bg(self.color(bg)?);
		}
		spec.modifiers.iter().try_fold(style, |style, name| {
			Ok(style.add_modifier(parse_modifier(name)?))
		})
	}

	fn color(&self, value: &str) -> Result<Color> {
		let value = self.palette.get(value.trim()).map_or(value, String::as_str);
		Color::from_str(value.trim()).map_err(|_| anyhow!("unknown colour `{value}`"))
	}

	fn into_registration(self) -> Result<(ThemeRegistration, bool)> {
		ensure!(!self.name.trim().is_empty(), "theme name must not be empty");
		let theme = self.theme()?;
		let registration = self
			.aliases
			.iter()
			.map(|alias| alias.trim())
			.filter(|alias| !alias.is_empty())
			.fold(ThemeRegistration::new(self.name.trim(), theme), |registration, alias| {
				registration.alias(alias)
			});
		Ok((registration, self.default))
	}
}

fn parse_modifier(name: &str) -> Result<Modifier> {
	let flag: String = name
		.trim()
		.chars()
		.map(|ch| match ch {
			'-' | ' ' => '_',
			other => other.to_ascii_uppercase(),
		})
		.collect();
	Modifier::from_name(&flag).ok_or_else(|| anyhow!("unknown modifier `{name}`"))
}

fn parse_file(file: &File) -> Result<(ThemeRegistration, bool)> {
	let path = file.path();
	let contents = file
		.contents_utf8()
		.with_context(|| format!("{} is not valid UTF-8", path.display()))?;
	let definition: ThemeFile = toml::from_str(contents)
		.with_context(|| format!("failed to parse theme definition {}", path.display()))?;
	definition
		.into_registration()
		.with_context(|| format!("invalid theme definition {}", path.display()))
}

/// Parse every definition in `dir`, in file name order.
pub(super) fn load_builtin_themes(dir: &Dir) -> Result<BuiltinThemes> {
	let mut files: Vec<_> = dir.files().collect();
	files.sort_by(|a, b| a.path().cmp(b.path()));

	let mut registrations = Vec::with_capacity(files.len());
	let mut default_index = None;
	for file in files {
		let (registration, is_default) = parse_file(file)?;
		if is_default {
			if let Some(previous) = default_index {
				let previous: &ThemeRegistration = &registrations[previous];
				bail!(
					"themes `{}` and `{}` are both marked as default",
					previous.name,
					registration.name
				);
			}
			default_index = Some(registrations.len());
		}
		registrations.push(registration);
	}

	let Some(default_theme) = registrations
		.get(default_index.unwrap_or(0))
		.map(|registration| registration.theme)
	else {
		bail!("no built-in theme definitions were found");
	};

	Ok(BuiltinThemes {
		registrations,
		default_theme,
	})
}
