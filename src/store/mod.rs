//! # Template Storage
//!
//! Form definitions are persisted by the host application; the engine only
//! needs to save and load serialized blobs by id. [`TemplateStore`] is that
//! seam. [`InMemoryTemplateStore`] backs tests and the CLI.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use log::debug;

use crate::error::{FormpressError, Result};
use crate::model::FormDefinition;

/// Key/value storage for serialized form definitions.
pub trait TemplateStore: Send + Sync {
    /// Store `blob` under `id`, replacing any previous template.
    fn save(&self, id: &str, blob: &[u8]) -> Result<()>;

    /// The blob stored under `id`, or `TemplateNotFound`.
    fn load(&self, id: &str) -> Result<Vec<u8>>;

    /// Remove the template stored under `id`, or `TemplateNotFound`.
    fn delete(&self, id: &str) -> Result<()>;

    /// Ids of all stored templates, sorted.
    fn list(&self) -> Result<Vec<String>>;

    /// Serialize `form` as JSON and store it.
    fn save_form(&self, id: &str, form: &FormDefinition) -> Result<()> {
        let blob = serde_json::to_vec(form)?;
        self.save(id, &blob)
    }

    /// Load and parse a stored form definition.
    fn load_form(&self, id: &str) -> Result<FormDefinition> {
        let blob = self.load(id)?;
        Ok(serde_json::from_slice(&blob)?)
    }
}

/// A process-local store. Clones of the data are handed out; the map itself
/// is guarded by a read/write lock so one store can be shared across threads.
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    templates: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn save(&self, id: &str, blob: &[u8]) -> Result<()> {
        let mut templates = self.templates.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = templates.insert(id.to_string(), blob.to_vec()).is_some();
        debug!("store: saved template {} ({} bytes, replaced={})", id, blob.len(), replaced);
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Vec<u8>> {
        let templates = self.templates.read().unwrap_or_else(PoisonError::into_inner);
        templates
            .get(id)
            .cloned()
            .ok_or_else(|| FormpressError::TemplateNotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut templates = self.templates.write().unwrap_or_else(PoisonError::into_inner);
        templates
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| FormpressError::TemplateNotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<String>> {
        let templates = self.templates.read().unwrap_or_else(PoisonError::into_inner);
        Ok(templates.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldType;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_save_load_delete() {
        let store = InMemoryTemplateStore::new();
        store.save("invoice", b"{}").unwrap();
        assert_eq!(store.load("invoice").unwrap(), b"{}".to_vec());

        store.save("invoice", b"{\"rows\":[]}").unwrap();
        assert_eq!(store.load("invoice").unwrap(), b"{\"rows\":[]}".to_vec());

        store.delete("invoice").unwrap();
        assert!(matches!(
            store.load("invoice"),
            Err(FormpressError::TemplateNotFound(id)) if id == "invoice"
        ));
        assert!(store.delete("invoice").is_err());
    }

    #[test]
    fn test_forms_survive_a_round_trip() {
        let mut form = FormDefinition::new();
        let row = form.add_row();
        form.add_field(&row, FieldType::Email).unwrap();
        form.add_field(&row, FieldType::Rating).unwrap();
        form.settings.title = "Intake".to_string();

        let store = InMemoryTemplateStore::new();
        store.save_form("intake", &form).unwrap();
        assert_eq!(store.load_form("intake").unwrap(), form);
    }

    #[test]
    fn test_corrupt_blob_is_a_parse_error() {
        let store = InMemoryTemplateStore::new();
        store.save("broken", b"{\"rows\": [").unwrap();
        assert!(matches!(
            store.load_form("broken"),
            Err(FormpressError::ParseError { .. })
        ));
    }

    #[test]
    fn test_list_is_sorted_and_shared_across_threads() {
        let store = Arc::new(InMemoryTemplateStore::new());
        let handles: Vec<_> = ["contract", "invoice", "application"]
            .into_iter()
            .map(|id| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.save(id, id.as_bytes()).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(
            store.list().unwrap(),
            vec!["application", "contract", "invoice"]
        );
    }
}
