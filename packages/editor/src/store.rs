//! Template persistence.
//!
//! The editor never talks to a storage backend directly. It hands the
//! serialized tree to a [`TemplateStore`] and gets back an opaque id, and
//! later trades the id back for the JSON. Both directions are whole-tree
//! replaces.

use crate::EditorError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Storage collaborator for serialized trees.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Store `json` and return an opaque id for it.
    async fn persist(&self, json: &str) -> Result<String, EditorError>;

    /// Fetch the JSON stored under `id`.
    async fn load(&self, id: &str) -> Result<String, EditorError>;
}

/// In-memory store, for tests and embedding without a backend.
#[derive(Default)]
pub struct MemoryStore {
    templates: RwLock<HashMap<String, String>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `json` under a caller-chosen id, replacing any previous entry.
    pub async fn insert(&self, id: impl Into<String>, json: impl Into<String>) {
        self.templates.write().await.insert(id.into(), json.into());
    }

    pub async fn len(&self) -> usize {
        self.templates.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.templates.read().await.is_empty()
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn persist(&self, json: &str) -> Result<String, EditorError> {
        let mut templates = self.templates.write().await;
        // Ids chosen through `insert` are never overwritten.
        let id = loop {
            let id = format!("tpl-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
            if !templates.contains_key(&id) {
                break id;
            }
        };
        templates.insert(id.clone(), json.to_string());
        debug!(template_id = %id, bytes = json.len(), "Persisted template");
        Ok(id)
    }

    async fn load(&self, id: &str) -> Result<String, EditorError> {
        self.templates
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| EditorError::TemplateNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_persist_then_load() {
        let store = MemoryStore::new();
        let first = store.persist("[]").await.unwrap();
        let second = store.persist("[{}]").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.load(&first).await.unwrap(), "[]");
        assert_eq!(store.load(&second).await.unwrap(), "[{}]");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_generated_ids_skip_inserted_ones() {
        let store = MemoryStore::new();
        store.insert("tpl-1", "[\"kept\"]").await;
        store.insert("tpl-2", "[\"also kept\"]").await;

        let id = store.persist("[]").await.unwrap();

        assert_eq!(id, "tpl-3");
        assert_eq!(store.load("tpl-1").await.unwrap(), "[\"kept\"]");
        assert_eq!(store.load("tpl-2").await.unwrap(), "[\"also kept\"]");
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_missing_template() {
        let store = MemoryStore::new();
        let err = store.load("tpl-9").await.unwrap_err();
        assert!(matches!(err, EditorError::TemplateNotFound(id) if id == "tpl-9"));
    }
}
