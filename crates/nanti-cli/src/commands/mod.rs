pub mod catalog;
pub mod levels;
pub mod play;
pub mod profile;
pub mod shop;

use std::path::Path;

use nanti_mechanics::Catalog;
use nanti_session::{FileStore, Profile};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Send tracing events to stderr, filtered by `RUST_LOG`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load a catalog file, or the built-in one.
fn load_catalog(path: Option<&Path>) -> Result<Catalog, String> {
    let Some(path) = path else {
        return Ok(Catalog::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let catalog = Catalog::from_json(&json).map_err(|e| e.to_string())?;
    tracing::info!(path = %path.display(), levels = catalog.levels.len(), "loaded catalog");
    Ok(catalog)
}

/// Load the stored profile without starting a session.
fn load_profile(store: &FileStore) -> Result<Profile, String> {
    Profile::load_or_new(store, "Wanderer", 0).map_err(|e| e.to_string())
}
