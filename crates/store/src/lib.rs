//! Durable per-step completion state.
//!
//! One JSON object in a single state file maps composite step keys to `true`.
//! Reads never fail outward: corrupt or absent state starts empty. Writes are
//! synchronous and best-effort: a failed save is logged and swallowed, and
//! the in-memory state stays authoritative for the rest of the session.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// Separator inside composite keys. Slugs never contain it.
const KEY_SEPARATOR: &str = "__";

pub type CompletionMap = BTreeMap<String, bool>;

/// Builds the composite key for one step. Steps have no identifier of their
/// own, so the zero-based index inside the topic addresses them; reordering
/// a topic's steps orphans previously stored entries.
pub fn step_key(category_slug: &str, topic_slug: &str, step_index: usize) -> String {
    format!("{category_slug}{KEY_SEPARATOR}{topic_slug}{KEY_SEPARATOR}{step_index}")
}

/// Loads the completion mapping. A missing file is a normal first run;
/// unreadable or corrupt state is logged and treated as empty.
pub fn load(path: &Path) -> CompletionMap {
    if !path.exists() {
        return CompletionMap::new();
    }
    match read_state(path) {
        Ok(state) => state,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = format!("{err:#}"),
                "completion state unreadable, starting empty"
            );
            CompletionMap::new()
        }
    }
}

/// Persists the completion mapping, swallowing failures (for example a full
/// disk). The caller's in-memory state remains authoritative either way.
pub fn save(path: &Path, state: &CompletionMap) {
    if let Err(err) = write_state(path, state) {
        warn!(
            path = %path.display(),
            error = format!("{err:#}"),
            "failed to persist completion state"
        );
    }
}

fn read_state(path: &Path) -> Result<CompletionMap> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid completion state in {}", path.display()))
}

fn write_state(path: &Path, state: &CompletionMap) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let raw = serde_json::to_string(state).context("failed to encode completion state")?;
    fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))
}

#[derive(Debug)]
pub struct CompletionStore {
    path: PathBuf,
    state: CompletionMap,
}

impl CompletionStore {
    /// Opens the store at `path`, loading whatever state survives there.
    /// Never fails: bad state starts empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let state = load(&path);
        Self { path, state }
    }

    pub fn is_done(&self, key: &str) -> bool {
        self.state.get(key).copied().unwrap_or(false)
    }

    /// Flips one step between done and not done, persists immediately, and
    /// returns the new state. Un-done entries are removed rather than stored
    /// as `false`.
    pub fn toggle(&mut self, key: &str) -> bool {
        let was_done = self.is_done(key);
        if was_done {
            self.state.remove(key);
        } else {
            self.state.insert(key.to_string(), true);
        }
        save(&self.path, &self.state);
        !was_done
    }

    pub fn done_count(&self) -> usize {
        self.state.len()
    }

    pub fn state(&self) -> &CompletionMap {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn key_format_is_stable() {
        assert_eq!(step_key("wartung", "olwechsel", 0), "wartung__olwechsel__0");
        assert_eq!(step_key("wartung", "olwechsel-2", 12), "wartung__olwechsel-2__12");
    }

    #[test]
    fn toggle_twice_restores_the_original_state() {
        let dir = tempdir().unwrap();
        let mut store = CompletionStore::open(dir.path().join("steps-done.json"));
        let key = step_key("wartung", "olwechsel", 1);
        assert!(!store.is_done(&key));
        assert!(store.toggle(&key));
        assert!(store.is_done(&key));
        assert!(!store.toggle(&key));
        assert!(!store.is_done(&key));
        assert_eq!(store.done_count(), 0);
    }

    #[test]
    fn state_survives_a_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("steps-done.json");
        let key = step_key("wartung", "olwechsel", 0);
        {
            let mut store = CompletionStore::open(&path);
            store.toggle(&key);
            store.toggle(&step_key("wartung", "olwechsel", 1));
        }
        let reopened = CompletionStore::open(&path);
        assert!(reopened.is_done(&key));
        assert_eq!(reopened.done_count(), 2);
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = CompletionStore::open(dir.path().join("does-not-exist.json"));
        assert_eq!(store.done_count(), 0);
    }

    #[test]
    fn corrupt_state_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("steps-done.json");
        fs::write(&path, "{not json").unwrap();
        let store = CompletionStore::open(&path);
        assert_eq!(store.done_count(), 0);
    }

    #[test]
    fn explicit_false_entries_read_as_not_done() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("steps-done.json");
        fs::write(&path, r#"{"wartung__olwechsel__0": false}"#).unwrap();
        let mut store = CompletionStore::open(&path);
        let key = step_key("wartung", "olwechsel", 0);
        assert!(!store.is_done(&key));
        // toggling from a stored false lands on done
        assert!(store.toggle(&key));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("steps-done.json");
        let mut store = CompletionStore::open(&path);
        store.toggle(&step_key("wartung", "olwechsel", 3));
        assert!(path.exists());
        let reopened = CompletionStore::open(&path);
        assert_eq!(reopened.done_count(), 1);
    }
}
