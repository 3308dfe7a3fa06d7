mod builtins;
mod registry;
mod types;

pub use builtins::default_theme;
pub use registry::{by_name, descriptors};
pub use types::{Theme, ThemeDescriptor, ThemeRegistration};

impl Default for Theme {
	fn default() -> Self {
		default_theme()
	}
}
