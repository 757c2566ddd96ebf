//! Durable Flag Store
//!
//! The browser original scattered `localStorage` reads and writes across
//! components; here all durable flags go through a single injected
//! [`KvStore`] with typed accessors, so the reload-recovery path can be
//! exercised against an in-memory store.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::error::{Result, TechFixError};
use crate::session::TxRef;

/// String key-value persistence (stand-in for the browser's localStorage)
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

const KEY_PENDING_TX: &str = "pending_tx_ref";
const KEY_TERMS_ACCEPTED: &str = "terms_accepted";
const KEY_SEEN_NOTIFICATION_PREFIX: &str = "notification_seen:";

/// Typed accessors over an injected [`KvStore`]
#[derive(Clone)]
pub struct FlowStore {
    inner: Arc<dyn KvStore>,
}

impl FlowStore {
    pub fn new(inner: Arc<dyn KvStore>) -> Self {
        Self { inner }
    }

    /// The pending verification marker, if one survives from a prior load
    pub fn pending_tx_ref(&self) -> Result<Option<TxRef>> {
        Ok(self.inner.get(KEY_PENDING_TX)?.map(TxRef::from_string))
    }

    /// Persist the marker; at most one exists at a time, so this replaces
    /// any previous value
    pub fn set_pending_tx_ref(&self, tx_ref: &TxRef) -> Result<()> {
        self.inner.set(KEY_PENDING_TX, tx_ref.as_str())
    }

    pub fn clear_pending_tx_ref(&self) -> Result<()> {
        self.inner.remove(KEY_PENDING_TX)
    }

    /// Terms flag: set once, never cleared by normal operation
    pub fn terms_accepted(&self) -> Result<bool> {
        Ok(self.inner.get(KEY_TERMS_ACCEPTED)?.is_some())
    }

    pub fn accept_terms(&self) -> Result<()> {
        self.inner.set(KEY_TERMS_ACCEPTED, "true")
    }

    /// Whether a server-pushed announcement was already shown
    pub fn notification_seen(&self, id: &str) -> Result<bool> {
        let key = format!("{KEY_SEEN_NOTIFICATION_PREFIX}{id}");
        Ok(self.inner.get(&key)?.is_some())
    }

    pub fn mark_notification_seen(&self, id: &str) -> Result<()> {
        let key = format!("{KEY_SEEN_NOTIFICATION_PREFIX}{id}");
        self.inner.set(&key, "true")
    }
}

/// In-memory store (for development/testing)
pub struct MemoryKvStore {
    values: RwLock<HashMap<String, String>>,
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| TechFixError::Storage(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| TechFixError::Storage(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| TechFixError::Storage(e.to_string()))?;
        values.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON object on disk, rewritten on every change
///
/// Small enough (a handful of flags) that full rewrites are fine.
pub struct JsonFileStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open or create the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    fn flush(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| TechFixError::Storage(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| TechFixError::Storage(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| TechFixError::Storage(e.to_string()))?;
        values.remove(key);
        self.flush(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_flow_store() -> FlowStore {
        FlowStore::new(Arc::new(MemoryKvStore::new()))
    }

    #[test]
    fn test_pending_marker_round_trip() {
        let store = memory_flow_store();
        assert!(store.pending_tx_ref().unwrap().is_none());

        let tx = TxRef::from_string("tx_1");
        store.set_pending_tx_ref(&tx).unwrap();
        assert_eq!(store.pending_tx_ref().unwrap(), Some(tx));

        store.clear_pending_tx_ref().unwrap();
        assert!(store.pending_tx_ref().unwrap().is_none());
    }

    #[test]
    fn test_at_most_one_pending_marker() {
        let store = memory_flow_store();
        store
            .set_pending_tx_ref(&TxRef::from_string("tx_1"))
            .unwrap();
        store
            .set_pending_tx_ref(&TxRef::from_string("tx_2"))
            .unwrap();
        assert_eq!(
            store.pending_tx_ref().unwrap(),
            Some(TxRef::from_string("tx_2"))
        );
    }

    #[test]
    fn test_terms_flag_is_sticky() {
        let store = memory_flow_store();
        assert!(!store.terms_accepted().unwrap());
        store.accept_terms().unwrap();
        assert!(store.terms_accepted().unwrap());
    }

    #[test]
    fn test_notification_seen_set() {
        let store = memory_flow_store();
        assert!(!store.notification_seen("42").unwrap());
        store.mark_notification_seen("42").unwrap();
        assert!(store.notification_seen("42").unwrap());
        assert!(!store.notification_seen("43").unwrap());
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            store.set("pending_tx_ref", "tx_9").unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("pending_tx_ref").unwrap().as_deref(), Some("tx_9"));
    }
}
