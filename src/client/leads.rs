use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::client::flow::ContactForm;
use crate::client::{ClientError, Result};
use crate::shared::constants::LEADS_STORAGE_KEY;

/// String key-value storage local to the client
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Process-local storage, used in tests and when no file is configured
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::Storage("storage lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::Storage("storage lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage persisted as one JSON object of string values on disk
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ClientError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ClientError::Storage("storage lock poisoned".into()))?;
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ClientError::Storage("storage lock poisoned".into()))?;

        // Unreadable contents are overwritten
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable storage file {}: {}", self.path.display(), e);
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());

        let raw = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, raw).map_err(|e| {
            ClientError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

/// A submission kept on the client because the API could not take it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalLead {
    /// Milliseconds since the Unix epoch when the lead was saved
    pub id: i64,
    pub submitted_at: String,
    #[serde(flatten)]
    pub form: ContactForm,
}

/// Append-only list of local leads stored under the `"leads"` key
#[derive(Clone)]
pub struct LeadLog {
    store: Arc<dyn KeyValueStore>,
}

impl LeadLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Every saved lead, oldest first. Missing or unreadable data reads as empty.
    pub fn all(&self) -> Vec<LocalLead> {
        let raw = match self.store.get(LEADS_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read local leads: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Local leads are corrupt, treating as empty: {}", e);
            Vec::new()
        })
    }

    pub fn append(&self, form: &ContactForm) -> Result<LocalLead> {
        let mut leads = self.all();

        let now = Utc::now();
        let mut id = now.timestamp_millis();
        if let Some(last) = leads.last() {
            id = id.max(last.id + 1);
        }

        let lead = LocalLead {
            id,
            submitted_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            form: form.clone(),
        };
        leads.push(lead.clone());

        self.store
            .set(LEADS_STORAGE_KEY, &serde_json::to_string(&leads)?)?;

        tracing::info!("Lead saved locally: id={}, total={}", lead.id, leads.len());
        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: "visitor@example.com".into(),
            phone: String::new(),
            subject: "Hello".into(),
            message: "Hi there".into(),
        }
    }

    #[test]
    fn test_append_keeps_order_and_unique_ids() {
        let log = LeadLog::new(Arc::new(MemoryKeyValueStore::new()));
        log.append(&form("First")).unwrap();
        log.append(&form("Second")).unwrap();

        let leads = log.all();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].form.name, "First");
        assert_eq!(leads[1].form.name, "Second");
        assert!(leads[1].id > leads[0].id);
    }

    #[test]
    fn test_corrupt_log_reads_empty() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(LEADS_STORAGE_KEY, "{not json").unwrap();

        let log = LeadLog::new(store);
        assert!(log.all().is_empty());

        log.append(&form("Recovered")).unwrap();
        assert_eq!(log.all().len(), 1);
    }

    #[test]
    fn test_lead_serializes_flat() {
        let lead = LocalLead {
            id: 1_700_000_000_000,
            submitted_at: "2026-01-01T00:00:00.000Z".into(),
            form: form("Jane"),
        };
        let value = serde_json::to_value(&lead).unwrap();

        assert_eq!(value["id"], 1_700_000_000_000_i64);
        assert_eq!(value["submittedAt"], "2026-01-01T00:00:00.000Z");
        assert_eq!(value["name"], "Jane");
        assert_eq!(value["email"], "visitor@example.com");
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");

        let log = LeadLog::new(Arc::new(FileKeyValueStore::new(&path)));
        log.append(&form("Jane")).unwrap();

        let reopened = LeadLog::new(Arc::new(FileKeyValueStore::new(&path)));
        let leads = reopened.all();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].form.name, "Jane");
    }

    #[test]
    fn test_file_store_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        let store = FileKeyValueStore::new(&path);

        assert_eq!(store.get(LEADS_STORAGE_KEY).unwrap(), None);

        std::fs::write(&path, "garbage").unwrap();
        assert!(store.get(LEADS_STORAGE_KEY).is_err());
        assert!(LeadLog::new(Arc::new(FileKeyValueStore::new(&path)))
            .all()
            .is_empty());

        store.set(LEADS_STORAGE_KEY, "[]").unwrap();
        assert_eq!(store.get(LEADS_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_unwritable_path_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("missing").join("leads.json"));

        assert!(matches!(
            store.set(LEADS_STORAGE_KEY, "[]"),
            Err(ClientError::Storage(_))
        ));
    }
}
