//! Durable selector storage.

use crate::error::StoreError;
use crate::traits::SelectorStore;
use hawser_types::ProfileId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSelector {
    profile_id: Option<ProfileId>,
}

/// Selector store backed by a single JSON file.
///
/// The selector is the only durable state the reconciliation core owns; it
/// must survive process restarts so a relaunched client resumes the same
/// session. Reads go to disk every time: the file is tiny and the external
/// login flow may rewrite it between passes.
pub struct JsonFileSelectorStore {
    path: PathBuf,
}

impl JsonFileSelectorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<PersistedSelector, StoreError> {
        if !self.path.exists() {
            return Ok(PersistedSelector::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(PersistedSelector::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn persist(&self, selector: &PersistedSelector) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(selector)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SelectorStore for JsonFileSelectorStore {
    fn get(&self) -> Result<Option<ProfileId>, StoreError> {
        Ok(self.load()?.profile_id)
    }

    fn set(&self, id: &ProfileId) -> Result<bool, StoreError> {
        let mut persisted = self.load()?;
        let changed = persisted.profile_id.as_ref() != Some(id);
        if changed {
            persisted.profile_id = Some(id.clone());
            self.persist(&persisted)?;
        }
        Ok(changed)
    }

    fn clear(&self) -> Result<bool, StoreError> {
        let mut persisted = self.load()?;
        let was_present = persisted.profile_id.take().is_some();
        if was_present {
            self.persist(&persisted)?;
        }
        Ok(was_present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileSelectorStore {
        JsonFileSelectorStore::new(dir.path().join("selector.json"))
    }

    #[test]
    fn missing_file_reads_as_no_selector() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn selector_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(&ProfileId::new("0x0d")).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get().unwrap(), Some(ProfileId::new("0x0d")));
    }

    #[test]
    fn set_reports_unchanged_for_the_same_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let id = ProfileId::new("0x01");
        assert!(store.set(&id).unwrap());
        assert!(!store.set(&id).unwrap());
    }

    #[test]
    fn clear_reports_presence_and_empties_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(&ProfileId::new("0x01")).unwrap();

        assert!(store.clear().unwrap());
        assert_eq!(store.get().unwrap(), None);
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn file_carries_the_camel_case_wire_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(&ProfileId::new("0x01")).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("profileId"));
    }
}
