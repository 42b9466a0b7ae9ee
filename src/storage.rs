//! Name list storage
//!
//! [`NameListStore`] owns the canonical, sorted and deduplicated list of
//! names and keeps a [`NameBackend`] in sync with it. Every mutation rewrites
//! the full list before the in-memory copy is updated, so the two never
//! drift apart silently.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} does not contain a list of names: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not save names to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable home of the name list
pub trait NameBackend {
    /// Read the stored names, `None` when nothing was ever saved
    fn read(&self) -> Result<Option<Vec<String>>>;

    /// Replace the stored names with `names`
    fn write(&mut self, names: &[String]) -> Result<()>;

    /// Human readable location, used in logs
    fn location(&self) -> String;
}

/// JSON array of strings on disk
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileBackend { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist_err(&self, source: io::Error) -> StoreError {
        StoreError::Persist {
            path: self.path.clone(),
            source,
        }
    }
}

impl NameBackend for JsonFileBackend {
    fn read(&self) -> Result<Option<Vec<String>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })
    }

    fn write(&mut self, names: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.persist_err(e))?;
        }

        let content = serde_json::to_vec_pretty(names).map_err(|e| self.persist_err(e.into()))?;

        // Write next to the target and rename so a failed write never
        // truncates the previous list.
        let tmp = self.tmp_path();
        fs::write(&tmp, content).map_err(|e| self.persist_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.persist_err(e)
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend. Clones share the same storage, which lets a test
/// drop a store and open a fresh one as if the process had restarted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    saved: Rc<RefCell<Option<Vec<String>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already persisted list
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryBackend {
            saved: Rc::new(RefCell::new(Some(names.into_iter().map(Into::into).collect()))),
        }
    }

    /// What a reader would find in storage right now
    pub fn saved(&self) -> Option<Vec<String>> {
        self.saved.borrow().clone()
    }
}

impl NameBackend for MemoryBackend {
    fn read(&self) -> Result<Option<Vec<String>>> {
        Ok(self.saved())
    }

    fn write(&mut self, names: &[String]) -> Result<()> {
        *self.saved.borrow_mut() = Some(names.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        String::from("<memory>")
    }
}

/// Trim, drop blanks, sort and deduplicate
fn canonicalize<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = names
        .into_iter()
        .map(|n| n.as_ref().trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Read the deduplicated, sorted names stored in `backend`.
///
/// Nothing stored yet yields an empty list.
pub fn load_names(backend: &dyn NameBackend) -> Result<Vec<String>> {
    let raw = backend.read()?.unwrap_or_default();
    let raw_len = raw.len();
    let names = canonicalize(raw);

    if names.len() != raw_len {
        tracing::debug!(
            location = %backend.location(),
            stored = raw_len,
            kept = names.len(),
            "Dropped blank or duplicate entries while loading"
        );
    }

    Ok(names)
}

/// The canonical set of names and its persistence
pub struct NameListStore {
    names: Vec<String>,
    backend: Box<dyn NameBackend>,
}

impl NameListStore {
    /// Load the store from `backend`
    pub fn open(backend: impl NameBackend + 'static) -> Result<Self> {
        let names = load_names(&backend)?;
        tracing::info!(location = %backend.location(), count = names.len(), "Loaded names");

        Ok(NameListStore {
            names,
            backend: Box::new(backend),
        })
    }

    /// Re-read the backend, discarding the in-memory view
    pub fn load(&mut self) -> Result<&[String]> {
        self.names = load_names(self.backend.as_ref())?;
        Ok(&self.names)
    }

    /// Current names, sorted ascending
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Add a trimmed name.
    ///
    /// Blank and already present names leave the list untouched and do not
    /// write anything.
    pub fn add(&mut self, name: &str) -> Result<&[String]> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(&self.names);
        }

        let pos = match self.names.binary_search_by(|n| n.as_str().cmp(name)) {
            Ok(_) => {
                tracing::debug!(name, "Name already present");
                return Ok(&self.names);
            }
            Err(pos) => pos,
        };

        let mut next = self.names.clone();
        next.insert(pos, name.to_string());
        self.commit(next)?;

        tracing::info!(name, count = self.names.len(), "Added name");
        Ok(&self.names)
    }

    /// Remove every given name that is present. Absent names are ignored.
    pub fn remove<I, S>(&mut self, names: I) -> Result<&[String]>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doomed: Vec<S> = names.into_iter().collect();
        let next: Vec<String> = self
            .names
            .iter()
            .filter(|n| !doomed.iter().any(|d| d.as_ref() == n.as_str()))
            .cloned()
            .collect();

        let removed = self.names.len() - next.len();
        self.commit(next)?;

        tracing::info!(requested = doomed.len(), removed, "Removed names");
        Ok(&self.names)
    }

    /// Remove everything
    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())?;
        tracing::info!("Cleared names");
        Ok(())
    }

    /// A random ordering of the current names. The stored list is untouched.
    pub fn shuffle(&self) -> Vec<String> {
        self.shuffle_with(&mut rand::thread_rng())
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut shuffled = self.names.clone();
        shuffled.shuffle(rng);
        shuffled
    }

    /// Persist `next`, then adopt it as the in-memory list
    fn commit(&mut self, next: Vec<String>) -> Result<()> {
        if let Err(e) = self.backend.write(&next) {
            tracing::error!(error = %e, "Failed to persist names");
            return Err(e);
        }
        self.names = next;
        Ok(())
    }
}

impl std::fmt::Debug for NameListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameListStore")
            .field("names", &self.names)
            .field("location", &self.backend.location())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    fn store_with(names: &[&str]) -> (NameListStore, MemoryBackend) {
        let backend = MemoryBackend::with_names(names.iter().copied());
        let store = NameListStore::open(backend.clone()).unwrap();
        (store, backend)
    }

    #[test]
    fn test_missing_state_loads_empty() {
        let store = NameListStore::open(MemoryBackend::new()).unwrap();
        assert!(store.is_empty());

        let dir = tempdir().unwrap();
        let store = NameListStore::open(JsonFileBackend::new(dir.path().join("names.json"))).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_dedups_and_sorts() {
        let (store, _) = store_with(&["Carol", "Alice", "Bob", "Alice", " ", " Bob "]);
        assert_eq!(store.names(), ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_add_sequence_is_trimmed_sorted_set() {
        let (mut store, backend) = store_with(&[]);
        for name in ["Zed", "  ", "alice", "Alice", "Zed", "", " Bob\t", "Bob"] {
            store.add(name).unwrap();
        }

        assert_eq!(store.names(), ["Alice", "Bob", "Zed", "alice"]);
        assert_eq!(backend.saved().unwrap(), store.names());
    }

    #[test]
    fn test_add_trims_before_duplicate_check() {
        let (mut store, _) = store_with(&[]);
        store.add(" Alice ").unwrap();
        let names = store.add("Alice").unwrap();
        assert_eq!(names, ["Alice"]);
    }

    #[test]
    fn test_blank_add_does_not_write() {
        let backend = MemoryBackend::new();
        let mut store = NameListStore::open(backend.clone()).unwrap();
        store.add("   ").unwrap();
        assert!(store.is_empty());
        assert_eq!(backend.saved(), None);
    }

    #[test]
    fn test_remove_present_and_absent() {
        let (mut store, backend) = store_with(&["Alice", "Bob"]);

        let names = store.remove(BTreeSet::from(["Carol".to_string()])).unwrap();
        assert_eq!(names, ["Alice", "Bob"]);

        let names = store.remove(["Alice"]).unwrap();
        assert_eq!(names, ["Bob"]);
        assert_eq!(backend.saved().unwrap(), vec!["Bob".to_string()]);
    }

    #[test]
    fn test_clear_survives_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("names.json");

        let mut store = NameListStore::open(JsonFileBackend::new(&path)).unwrap();
        store.add("Alice").unwrap();
        store.add("Bob").unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        drop(store);

        let reopened = NameListStore::open(JsonFileBackend::new(&path)).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_add_survives_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("names.json");

        let mut store = NameListStore::open(JsonFileBackend::new(&path)).unwrap();
        store.add("Alice").unwrap();
        drop(store);

        let raw = std::fs::read_to_string(&path).unwrap();
        let on_disk: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(on_disk, ["Alice"]);

        let reopened = NameListStore::open(JsonFileBackend::new(&path)).unwrap();
        assert!(reopened.contains("Alice"));
    }

    #[test]
    fn test_reload_from_shared_memory_backend() {
        let (mut store, backend) = store_with(&[]);
        store.add("Alice").unwrap();

        let mut reopened = NameListStore::open(backend).unwrap();
        assert_eq!(reopened.load().unwrap(), ["Alice"]);
    }

    #[test]
    fn test_shuffle_is_permutation_and_leaves_store_alone() {
        let (store, backend) = store_with(&["A", "B", "C"]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let mut shuffled = store.shuffle_with(&mut rng);
            assert_eq!(shuffled.len(), 3);
            shuffled.sort();
            assert_eq!(shuffled, ["A", "B", "C"]);
        }

        assert_eq!(store.names(), ["A", "B", "C"]);
        assert_eq!(backend.saved().unwrap(), ["A", "B", "C"]);
    }

    #[test]
    fn test_shuffle_empty() {
        let (store, _) = store_with(&[]);
        assert!(store.shuffle().is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("names.json");
        std::fs::write(&path, r#"{"names": "not a list"}"#).unwrap();

        let err = NameListStore::open(JsonFileBackend::new(&path)).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_failed_write_keeps_last_saved_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("names.json");
        let mut store = NameListStore::open(JsonFileBackend::new(&path)).unwrap();

        // A directory squatting on the temp file name makes every write fail
        std::fs::create_dir(dir.path().join("names.json.tmp")).unwrap();
        let err = store.add("Alice").unwrap_err();

        assert!(matches!(err, StoreError::Persist { .. }));
        assert!(store.is_empty());
        assert!(matches!(store.clear(), Err(StoreError::Persist { .. })));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("names.json");
        let mut store = NameListStore::open(JsonFileBackend::new(&path)).unwrap();
        store.add("Alice").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
    }
}
