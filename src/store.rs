//! The library store boundary.
//!
//! The import/export operations never touch the filesystem directly — they
//! go through [`LibraryStore`], loading one snapshot before reconciling and
//! saving the merged result once afterwards. That keeps the reconciler a
//! pure function and makes the store mockable in tests.

use std::cell::RefCell;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PirepeError;
use crate::model::library::Library;

// ---------------------------------------------------------------------------
// LibraryStore
// ---------------------------------------------------------------------------

/// Loads and persists the whole library as one snapshot.
pub trait LibraryStore {
    /// Load the current library. A store with no saved state yet returns an
    /// empty library, not an error.
    ///
    /// # Errors
    /// Returns [`PirepeError::LibraryCorrupted`] if stored state exists but
    /// cannot be read back, or [`PirepeError::Io`] on I/O failures.
    fn load(&self) -> Result<Library, PirepeError>;

    /// Replace the stored library with `library`.
    ///
    /// # Errors
    /// Returns [`PirepeError::Io`] on I/O failures.
    fn save(&self, library: &Library) -> Result<(), PirepeError>;
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// The real store: one JSON file, written atomically.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path. The file need not
    /// exist yet; it is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LibraryStore for JsonFileStore {
    fn load(&self) -> Result<Library, PirepeError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no library file yet, starting empty");
                return Ok(Library::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&contents).map_err(|e| PirepeError::LibraryCorrupted {
            path: self.path.clone(),
            detail: e.to_string(),
        })
    }

    fn save(&self, library: &Library) -> Result<(), PirepeError> {
        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = dir {
            std::fs::create_dir_all(dir)?;
        }

        let json =
            serde_json::to_string_pretty(library).map_err(|e| PirepeError::Io(e.into()))?;

        // Write-then-rename so a crash mid-save never leaves a torn file.
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| PirepeError::Io(e.error))?;

        debug!(path = %self.path.display(), items = library.total(), "library saved");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    library: RefCell<Library>,
}

impl MemoryStore {
    /// Create a store pre-seeded with `library`.
    #[must_use]
    pub fn seeded(library: Library) -> Self {
        Self {
            library: RefCell::new(library),
        }
    }
}

impl LibraryStore for MemoryStore {
    fn load(&self) -> Result<Library, PirepeError> {
        Ok(self.library.borrow().clone())
    }

    fn save(&self, library: &Library) -> Result<(), PirepeError> {
        *self.library.borrow_mut() = library.clone();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::Pattern;
    use crate::model::slug::Slug;

    fn sample_library() -> Library {
        Library {
            patterns: vec![Pattern {
                slug: Slug::new("hero").unwrap(),
                title: "Hero".to_owned(),
                description: String::new(),
                categories: vec![Slug::new("layout").unwrap()],
                content: "<!-- wp:group /-->".to_owned(),
            }],
            ..Library::default()
        }
    }

    #[test]
    fn load_missing_file_is_empty_library() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("library.json"));
        let lib = store.load().unwrap();
        assert!(lib.is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("library.json"));
        let lib = sample_library();
        store.save(&lib).unwrap();
        assert_eq!(store.load().unwrap(), lib);
    }

    #[test]
    fn save_overwrites_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("library.json"));
        store.save(&sample_library()).unwrap();
        store.save(&Library::default()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn load_corrupted_file_is_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        match err {
            PirepeError::LibraryCorrupted { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected LibraryCorrupted, got {other:?}"),
        }
    }

    #[test]
    fn load_file_with_unknown_keys_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"{"widgets": []}"#).unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, PirepeError::LibraryCorrupted { .. }));
    }

    #[test]
    fn saved_file_ends_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        JsonFileStore::new(&path).save(&sample_library()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn memory_store_roundtrips() {
        let store = MemoryStore::default();
        assert!(store.load().unwrap().is_empty());
        store.save(&sample_library()).unwrap();
        assert_eq!(store.load().unwrap(), sample_library());
    }

    #[test]
    fn memory_store_seeded() {
        let store = MemoryStore::seeded(sample_library());
        assert_eq!(store.load().unwrap().total(), 1);
    }
}
