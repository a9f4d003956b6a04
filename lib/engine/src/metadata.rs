//! Workflow metadata storage.
//!
//! The metadata store is a keyed mapping from engine workflow id to a
//! descriptive record, kept alongside the engine's own storage. Entries are
//! written only after the engine acknowledges creation and removed only
//! after it acknowledges deletion; they are not synced on updates.

use crate::error::MetadataError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use loomflow_core::UserId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Descriptive metadata for a workflow deployed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRecord {
    /// The engine-assigned workflow identifier (the store key).
    pub engine_id: String,
    /// Workflow name at creation time.
    pub name: String,
    /// Workflow description at creation time.
    pub description: String,
    /// The user who created the workflow, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// When the engine acknowledged creation.
    pub created_at: DateTime<Utc>,
}

impl WorkflowRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(
        engine_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            engine_id: engine_id.into(),
            name: name.into(),
            description: description.into(),
            user_id: None,
            created_at: Utc::now(),
        }
    }

    /// Attributes the record to a user.
    #[must_use]
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Contract for workflow metadata storage.
///
/// Implementations must be safe under concurrent create/delete operations
/// against the same key.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Stores a record, replacing any existing record with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    async fn insert(&self, record: WorkflowRecord) -> Result<(), MetadataError>;

    /// Removes and returns the record for an engine workflow id.
    ///
    /// # Errors
    ///
    /// Returns an error if no record exists or the backing store fails.
    async fn remove(&self, engine_id: &str) -> Result<WorkflowRecord, MetadataError>;

    /// Returns the record for an engine workflow id, if any.
    async fn get(&self, engine_id: &str) -> Result<Option<WorkflowRecord>, MetadataError>;

    /// Lists all records, ordered by creation time.
    async fn list(&self) -> Result<Vec<WorkflowRecord>, MetadataError>;
}

/// An in-process metadata store guarded by an async RwLock.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    records: RwLock<HashMap<String, WorkflowRecord>>,
}

impl InMemoryMetadataStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn insert(&self, record: WorkflowRecord) -> Result<(), MetadataError> {
        let mut records = self.records.write().await;
        records.insert(record.engine_id.clone(), record);
        Ok(())
    }

    async fn remove(&self, engine_id: &str) -> Result<WorkflowRecord, MetadataError> {
        let mut records = self.records.write().await;
        records.remove(engine_id).ok_or_else(|| MetadataError::NotFound {
            engine_id: engine_id.to_string(),
        })
    }

    async fn get(&self, engine_id: &str) -> Result<Option<WorkflowRecord>, MetadataError> {
        let records = self.records.read().await;
        Ok(records.get(engine_id).cloned())
    }

    async fn list(&self) -> Result<Vec<WorkflowRecord>, MetadataError> {
        let records = self.records.read().await;
        let mut all: Vec<WorkflowRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.engine_id.cmp(&b.engine_id))
        });
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_get_roundtrip() {
        let store = InMemoryMetadataStore::new();
        let record = WorkflowRecord::new("17", "Demo", "a demo workflow");
        store.insert(record.clone()).await.expect("insert");

        let fetched = store.get("17").await.expect("get").expect("present");
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn remove_returns_the_record() {
        let store = InMemoryMetadataStore::new();
        store
            .insert(WorkflowRecord::new("17", "Demo", ""))
            .await
            .expect("insert");

        let removed = store.remove("17").await.expect("remove");
        assert_eq!(removed.engine_id, "17");
        assert!(store.get("17").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn remove_missing_record_is_not_found() {
        let store = InMemoryMetadataStore::new();
        let err = store.remove("ghost").await.unwrap_err();
        assert_eq!(
            err,
            MetadataError::NotFound {
                engine_id: "ghost".to_string()
            }
        );
    }

    #[tokio::test]
    async fn insert_replaces_existing_record() {
        let store = InMemoryMetadataStore::new();
        store
            .insert(WorkflowRecord::new("17", "First", ""))
            .await
            .expect("insert");
        store
            .insert(WorkflowRecord::new("17", "Second", ""))
            .await
            .expect("insert");

        let fetched = store.get("17").await.expect("get").expect("present");
        assert_eq!(fetched.name, "Second");
    }

    #[tokio::test]
    async fn list_orders_by_creation_time() {
        let store = InMemoryMetadataStore::new();
        store
            .insert(WorkflowRecord::new("b", "Second", ""))
            .await
            .expect("insert");
        store
            .insert(WorkflowRecord::new("a", "First", ""))
            .await
            .expect("insert");

        let all = store.list().await.expect("list");
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at <= all[1].created_at);
    }

    #[tokio::test]
    async fn concurrent_inserts_do_not_lose_records() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryMetadataStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .insert(WorkflowRecord::new(format!("wf-{i}"), "Demo", ""))
                    .await
            }));
        }
        for handle in handles {
            handle.await.expect("join").expect("insert");
        }

        assert_eq!(store.list().await.expect("list").len(), 16);
    }

    #[test]
    fn record_builder_attributes_user() {
        let user = UserId::new();
        let record = WorkflowRecord::new("17", "Demo", "").with_user(user);
        assert_eq!(record.user_id, Some(user));
    }
}
