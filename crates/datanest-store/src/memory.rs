//! In-memory repository port implementations.
//!
//! Used by tests and available for dry runs; real full-text/triple-store
//! adapters live outside this workspace.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::RepositoryError;
use crate::payload::SerializedPayload;
use crate::ports::{PayloadSink, PrimaryStore};

/// Collects every stored payload, in order.
#[derive(Default)]
pub struct MemorySink {
    payloads: Mutex<Vec<SerializedPayload>>,
}

impl MemorySink {
    /// Snapshot of everything stored so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn stored(&self) -> Vec<SerializedPayload> {
        self.payloads.lock().expect("sink lock poisoned").clone()
    }
}

impl PayloadSink for MemorySink {
    async fn store(&self, payload: &SerializedPayload) -> Result<(), RepositoryError> {
        self.payloads
            .lock()
            .map_err(|e| RepositoryError::Backend {
                name: payload.backend.clone(),
                operation: "store",
                reason: e.to_string(),
            })?
            .push(payload.clone());
        Ok(())
    }
}

/// Always-failing sink for fan-out failure tests.
pub struct FailingSink;

impl PayloadSink for FailingSink {
    async fn store(&self, payload: &SerializedPayload) -> Result<(), RepositoryError> {
        Err(RepositoryError::Backend {
            name: payload.backend.clone(),
            operation: "store",
            reason: "sink unavailable".to_owned(),
        })
    }
}

/// Primary store over a plain id-to-document map.
#[derive(Default)]
pub struct MemoryPrimary {
    docs: Mutex<HashMap<String, Value>>,
}

impl MemoryPrimary {
    #[must_use]
    pub fn from_docs(docs: HashMap<String, Value>) -> Self {
        Self {
            docs: Mutex::new(docs),
        }
    }

    /// Seeds one stored document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert(&self, id: impl Into<String>, doc: Value) {
        self.docs
            .lock()
            .expect("primary lock poisoned")
            .insert(id.into(), doc);
    }
}

impl PrimaryStore for MemoryPrimary {
    async fn retrieve(&self, id: &str) -> Result<Option<Value>, RepositoryError> {
        let docs = self.docs.lock().map_err(|e| RepositoryError::Backend {
            name: "memory-primary".to_owned(),
            operation: "retrieve",
            reason: e.to_string(),
        })?;
        Ok(docs.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::payload::PayloadFormat;

    #[tokio::test]
    async fn memory_sink_preserves_order() {
        let sink = MemorySink::default();
        for backend in ["a", "b"] {
            sink.store(&SerializedPayload {
                backend: backend.to_owned(),
                format: PayloadFormat::IndexJson,
                body: "[]".to_owned(),
                context: None,
            })
            .await
            .unwrap();
        }
        let stored = sink.stored();
        assert_eq!(stored[0].backend, "a");
        assert_eq!(stored[1].backend, "b");
    }

    #[tokio::test]
    async fn memory_primary_round_trips_documents() {
        let primary = MemoryPrimary::default();
        assert_eq!(primary.retrieve("org_1").await.unwrap(), None);
        primary.insert("org_1", json!({"id": "org_1"}));
        assert_eq!(
            primary.retrieve("org_1").await.unwrap(),
            Some(json!({"id": "org_1"}))
        );
    }
}
