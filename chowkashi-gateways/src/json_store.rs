use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use chowkashi_core::local_state::{self, KeyValueStore};
use jfs::Store;

/// Key-value storage with one JSON file per key.
pub struct JsonFileStore {
    json_store: Store,
    directory: PathBuf,
}

impl fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("directory", &self.directory)
            .finish_non_exhaustive()
    }
}

impl JsonFileStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        let json_store = Store::new(&directory)?;
        Ok(Self {
            json_store,
            directory,
        })
    }

    pub fn path(&self) -> &Path {
        &self.directory
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> local_state::Result<Option<String>> {
        match self.json_store.get::<String>(key) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> local_state::Result<()> {
        self.json_store.save_with_id(&value, key)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> local_state::Result<()> {
        match self.json_store.delete(key) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                log::warn!("Unable to delete '{key}' from {}: {err}", self.directory.display());
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chowkashi_core::local_state::LocalState;

    #[test]
    fn persist_values_as_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::try_new(dir.path()).unwrap();
        assert_eq!(store.get("customCategories").unwrap(), None);
        store.set("customCategories", r#"["Tailors"]"#).unwrap();
        assert_eq!(
            store.get("customCategories").unwrap().as_deref(),
            Some(r#"["Tailors"]"#)
        );
        assert!(dir.path().join("customCategories.json").exists());
        store.remove("customCategories").unwrap();
        store.remove("customCategories").unwrap();
        assert_eq!(store.get("customCategories").unwrap(), None);
    }

    #[test]
    fn local_state_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        {
            let state = LocalState::new(JsonFileStore::try_new(dir.path()).unwrap());
            state.add_note("b1", "Cash only").unwrap();
            state.dismiss_notification_prompt().unwrap();
        }
        let state = LocalState::new(JsonFileStore::try_new(dir.path()).unwrap());
        assert_eq!(state.notes("b1"), vec!["Cash only"]);
        assert!(state.is_notification_prompt_dismissed());
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("customCategories.json"), "{ broken").unwrap();
        let state = LocalState::new(JsonFileStore::try_new(dir.path()).unwrap());
        assert!(state.custom_categories().is_empty());
    }
}
