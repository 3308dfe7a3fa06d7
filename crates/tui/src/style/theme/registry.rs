use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use super::builtins;
use super::types::{Theme, ThemeDescriptor, ThemeRegistration};

#[derive(Debug)]
struct ThemeEntry {
	display_name: String,
	theme: Theme,
	aliases: Vec<String>,
}

#[derive(Debug, Default)]
struct ThemeRegistry {
	canonical: BTreeMap<String, ThemeEntry>,
	aliases: HashMap<String, String>,
}

impl ThemeRegistry {
	fn register(&mut self, registration: ThemeRegistration) {
		let ThemeRegistration {
			name,
			theme,
			mut aliases,
		} = registration;
		let normalized = normalize_name(&name);

		aliases.retain(|alias| normalize_name(alias) != normalized);
		for alias in &aliases {
			self.aliases
				.entry(normalize_name(alias))
				.or_insert_with(|| normalized.clone());
		}
		aliases.sort_unstable_by_key(|alias| alias.to_ascii_lowercase());

		self.canonical.insert(
			normalized,
			ThemeEntry {
				display_name: name,
				theme,
				aliases,
			},
		);
	}

	fn get(&self, name: &str) -> Option<Theme> {
		let normalized = normalize_name(name);

		if let Some(entry) = self.canonical.get(&normalized) {
			return Some(entry.theme);
		}

		let target = self.aliases.get(&normalized)?;
		self.canonical.get(target).map(|entry| entry.theme)
	}
}

fn registry() -> &'static ThemeRegistry {
	static REGISTRY: OnceLock<ThemeRegistry> = OnceLock::new();
	REGISTRY.get_or_init(|| {
		let mut registry = ThemeRegistry::default();
		for registration in builtins::registrations() {
			registry.register(registration);
		}
		registry
	})
}

fn normalize_name(name: &str) -> String {
	name.trim().to_ascii_lowercase().replace([' ', '_'], "-")
}

/// Lookup a theme by case-insensitive name or alias.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	registry().get(name)
}

/// Every registered theme with its aliases, ordered by name.
#[must_use]
pub fn descriptors() -> Vec<ThemeDescriptor> {
	let mut descriptors: Vec<ThemeDescriptor> = registry()
		.canonical
		.values()
		.map(|entry| ThemeDescriptor {
			name: entry.display_name.clone(),
			aliases: entry.aliases.clone(),
			theme: entry.theme,
		})
		.collect();
	descriptors.sort_unstable_by_key(|descriptor| descriptor.name.to_ascii_lowercase());
	descriptors
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_themes_are_registered() {
		let names: Vec<String> = descriptors()
			.into_iter()
			.map(|descriptor| descriptor.name)
			.collect();
		assert!(names.iter().any(|name| name == "lore-dark"));
		assert!(names.is_sorted_by_key(|name| name.to_ascii_lowercase()));
		assert!(by_name("lore-dark").is_some());
	}

	#[test]
	fn lookup_ignores_case_and_separators() {
		assert_eq!(by_name("Lore Dark"), by_name("lore-dark"));
		assert_eq!(by_name("LORE_LIGHT"), by_name("lore-light"));
		assert!(by_name("no-such-theme").is_none());
	}

	#[test]
	fn aliases_resolve_to_their_theme() {
		let ember = descriptors()
			.into_iter()
			.find(|descriptor| descriptor.name == "ember")
			.expect("ember theme");
		let alias = ember.aliases.first().expect("ember has an alias");
		assert_eq!(by_name(alias), Some(ember.theme));
	}
}
