use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use crate::error::StorageError;
use crate::task::Task;

/// Whole-value key/value persistence, like the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use tempfile::NamedTempFile;
    use tracing::{debug, info};

    use super::KeyValueStore;
    use crate::error::StorageError;

    /// One `<key>.json` file per key inside a directory.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        #[tracing::instrument(skip(dir))]
        pub fn open(dir: &Path) -> Result<Self, StorageError> {
            fs::create_dir_all(dir)?;
            info!(dir = %dir.display(), "opened file store");
            Ok(Self {
                dir: dir.to_path_buf(),
            })
        }

        pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
            if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
                return Err(StorageError::Read {
                    key: key.to_string(),
                    reason: "key is not a plain file name".to_string(),
                });
            }
            Ok(self.dir.join(format!("{key}.json")))
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let path = self.path_for(key)?;
            if !path.exists() {
                return Ok(None);
            }
            debug!(file = %path.display(), "reading value");
            Ok(Some(fs::read_to_string(&path)?))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            let path = self.path_for(key)?;
            debug!(file = %path.display(), bytes = value.len(), "writing value atomically");

            let mut temp = NamedTempFile::new_in(&self.dir)?;
            temp.write_all(value.as_bytes())?;
            temp.flush()?;
            temp.persist(&path).map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: err.to_string(),
            })?;
            Ok(())
        }
    }
}

/// Result of reading the persisted list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    pub tasks: Vec<Task>,
    /// Set when a stored value existed but could not be used.
    pub discarded: Option<String>,
}

/// Reads and writes the full task list as JSON under one key.
#[derive(Debug)]
pub struct StorageAdapter<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Loaded {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no stored tasks");
                return Loaded::default();
            }
            Err(err) => {
                error!(error = %err, "failed reading stored tasks; starting empty");
                return Loaded {
                    tasks: vec![],
                    discarded: Some(err.to_string()),
                };
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(stored) => {
                let total = stored.len();
                let tasks: Vec<Task> = stored
                    .into_iter()
                    .filter_map(|task| {
                        let text = task.text.trim();
                        if text.is_empty() {
                            None
                        } else {
                            Some(Task {
                                text: text.to_string(),
                                completed: task.completed,
                            })
                        }
                    })
                    .collect();
                if tasks.len() != total {
                    warn!(dropped = total - tasks.len(), "dropped stored tasks with blank text");
                }
                info!(count = tasks.len(), "loaded tasks");
                Loaded {
                    tasks,
                    discarded: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "stored tasks are malformed; starting empty");
                Loaded {
                    tasks: vec![],
                    discarded: Some(err.to_string()),
                }
            }
        }
    }

    #[tracing::instrument(skip(self, tasks), fields(key = %self.key, count = tasks.len()))]
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string(tasks)?;
        self.store.set(&self.key, &json)?;
        debug!(bytes = json.len(), "saved tasks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(text: &str, completed: bool) -> Task {
        Task {
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn missing_key_loads_empty() {
        let adapter = StorageAdapter::new(MemoryStore::new(), "todos");
        assert_eq!(adapter.load(), Loaded::default());
    }

    #[test]
    fn save_overwrites_whole_value() {
        let mut adapter = StorageAdapter::new(MemoryStore::new(), "todos");
        adapter
            .save(&[task("A", false), task("B", true)])
            .expect("save");
        adapter.save(&[task("C", false)]).expect("save");

        let raw = adapter.store().get("todos").expect("get");
        assert_eq!(raw.as_deref(), Some(r#"[{"text":"C","completed":false}]"#));
    }

    #[test]
    fn invalid_json_falls_back_to_empty() {
        let adapter = StorageAdapter::new(MemoryStore::with_value("todos", "{not json"), "todos");
        let loaded = adapter.load();
        assert!(loaded.tasks.is_empty());
        assert!(loaded.discarded.is_some());
    }

    #[test]
    fn wrong_shape_falls_back_to_empty() {
        for raw in [r#"{"text":"A"}"#, r#"[{"title":"A"}]"#, "null", "[1,2]"] {
            let adapter = StorageAdapter::new(MemoryStore::with_value("todos", raw), "todos");
            let loaded = adapter.load();
            assert!(loaded.tasks.is_empty(), "{raw} should load empty");
            assert!(loaded.discarded.is_some(), "{raw} should be reported");
        }
    }

    #[test]
    fn blank_records_are_dropped_and_text_trimmed() {
        let raw = r#"[{"text":"  A ","completed":true},{"text":"   ","completed":false}]"#;
        let adapter = StorageAdapter::new(MemoryStore::with_value("todos", raw), "todos");
        let loaded = adapter.load();
        assert_eq!(loaded.tasks, vec![task("A", true)]);
        assert_eq!(loaded.discarded, None);
    }

    #[test]
    fn reads_layout_written_by_browser() {
        let raw = r#"[{"text":"Buy milk","completed":false},{"text":"Walk dog","completed":true}]"#;
        let adapter = StorageAdapter::new(MemoryStore::with_value("todos", raw), "todos");
        assert_eq!(
            adapter.load().tasks,
            vec![task("Buy milk", false), task("Walk dog", true)]
        );
    }
}
