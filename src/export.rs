//! The export operation: assemble the bundle document from the store.
//!
//! The export format is the library's own on-disk shape, so an exported
//! bundle re-imports cleanly on any other library.

use tracing::info;

use crate::error::PirepeError;
use crate::model::library::Library;
use crate::store::LibraryStore;

/// Export the stored library as a JSON bundle document.
///
/// # Errors
/// Returns [`PirepeError::NothingToExport`] when the library holds no items,
/// plus any store load error.
pub fn run(store: &dyn LibraryStore, pretty: bool) -> Result<String, PirepeError> {
    let library = store.load()?;
    if library.is_empty() {
        return Err(PirepeError::NothingToExport);
    }
    info!(items = library.total(), "exporting library");
    encode(&library, pretty)
}

fn encode(library: &Library, pretty: bool) -> Result<String, PirepeError> {
    let result = if pretty {
        serde_json::to_string_pretty(library)
    } else {
        serde_json::to_string(library)
    };
    result.map_err(|e| PirepeError::Io(e.into()))
}
