use super::backend::{KeyValueBackend, MemoryBackend};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Recoverable preference store failures. None of these are fatal: readers
/// get `None`, writers log and carry on without persisted state.
#[derive(Debug, Error)]
pub enum PrefError {
    #[error("stored value for '{key}' could not be parsed: {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value for '{key}' could not be serialized: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage unavailable while writing '{key}': {reason}")]
    StorageUnavailable { key: String, reason: String },
}

/// Typed, JSON-serialized preferences over a string key-value backend.
pub struct PreferenceStore {
    backend: Box<dyn KeyValueBackend>,
}

impl PreferenceStore {
    pub fn new(backend: Box<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Store backed only by memory; nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), PrefError> {
        let json = serde_json::to_string(value).map_err(|source| PrefError::Serialization {
            key: key.to_string(),
            source,
        })?;

        self.backend
            .set(key, &json)
            .map_err(|e| PrefError::StorageUnavailable {
                key: key.to_string(),
                reason: format!("{:#}", e),
            })
    }

    /// Read `key`, returning `None` when it is missing or unparsable.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to get preference: {}", e);
                None
            }
        }
    }

    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PrefError> {
        let Some(raw) = self.backend.get(key) else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| PrefError::Deserialization {
                key: key.to_string(),
                source,
            })
    }

    /// Direct access to the backend, bypassing serialization.
    pub fn backend_mut(&mut self) -> &mut dyn KeyValueBackend {
        self.backend.as_mut()
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_set_then_get_roundtrip() {
        let mut store = PreferenceStore::in_memory();
        store.set("k", &json!({"a": 1})).unwrap();

        let value: Option<Value> = store.get("k");
        assert_eq!(value, Some(json!({"a": 1})));
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let store = PreferenceStore::in_memory();
        let value: Option<Value> = store.get("missing");
        assert!(value.is_none());
        assert!(store.try_get::<Value>("missing").unwrap().is_none());
    }

    #[test]
    fn test_corrupted_value_reads_as_none() {
        let mut store = PreferenceStore::in_memory();
        store.backend_mut().set("k", "{not json").unwrap();

        let value: Option<Value> = store.get("k");
        assert!(value.is_none());

        let err = store.try_get::<Value>("k").unwrap_err();
        assert!(matches!(err, PrefError::Deserialization { ref key, .. } if key == "k"));
    }

    #[test]
    fn test_wrong_shape_reads_as_none() {
        let mut store = PreferenceStore::in_memory();
        store.set("darkMode", "yes").unwrap();

        let value: Option<bool> = store.get("darkMode");
        assert!(value.is_none());
    }

    #[test]
    fn test_storage_full_reports_unavailable() {
        let mut store = PreferenceStore::new(Box::new(MemoryBackend::with_quota(8)));
        let err = store.set("key", &"a long value").unwrap_err();

        assert!(matches!(err, PrefError::StorageUnavailable { .. }));
        assert!(err.to_string().contains("'key'"));
        assert!(store.get::<String>("key").is_none());
    }

    #[test]
    fn test_non_string_map_keys_fail_serialization() {
        use std::collections::HashMap;

        let mut store = PreferenceStore::in_memory();
        let mut map = HashMap::new();
        map.insert((1, 2), "v");

        let err = store.set("k", &map).unwrap_err();
        assert!(matches!(err, PrefError::Serialization { .. }));
    }
}
