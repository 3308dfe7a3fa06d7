//! Background loading of the source catalog shown in the sources panel.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use tracing::{debug, warn};

use crate::backend::SearchBackend;
use crate::error::ServiceError;

/// Name given to the catalog loader thread.
pub const CATALOG_THREAD: &str = "lore-catalog";

/// Result of listing the sources a search may be restricted to.
pub type CatalogResult = Result<Vec<String>, ServiceError>;

/// Ask the search backend for its sources on a background thread.
///
/// The returned receiver yields exactly one result, sorted and de-duplicated.
/// If the thread cannot be started the receiver reports disconnection.
pub fn spawn_source_loader(search: Arc<dyn SearchBackend>) -> Receiver<CatalogResult> {
	let (tx, rx) = mpsc::channel();
	let spawned = thread::Builder::new()
		.name(CATALOG_THREAD.into())
		.spawn(move || {
			let result = search.sources().map(|mut sources| {
				sources.sort();
				sources.dedup();
				sources
			});
			match &result {
				Ok(sources) => debug!(count = sources.len(), "loaded source catalog"),
				Err(err) => warn!(error = %err, "failed to load source catalog"),
			}
			let _ = tx.send(result);
		});
	if let Err(err) = spawned {
		warn!(%err, "failed to start catalog loader");
	}
	rx
}
