//! Provisioning service coupling engine calls with metadata writes.
//!
//! The metadata store has no transactional link to the engine, so the
//! service sequences the two and compensates where it can: a workflow that
//! exists engine-side with no local record is the failure mode to avoid.

use crate::client::EngineClient;
use crate::error::{MetadataError, ServiceError};
use crate::lower::lower;
use crate::metadata::{MetadataStore, WorkflowRecord};
use crate::schema::EngineWorkflowSummary;
use loomflow_core::UserId;
use loomflow_workflow::Workflow;

/// Deploys workflows to the engine and keeps metadata in step.
#[derive(Debug)]
pub struct EngineService<S> {
    client: EngineClient,
    store: S,
}

impl<S: MetadataStore> EngineService<S> {
    /// Creates a service over a gateway client and a metadata store.
    #[must_use]
    pub fn new(client: EngineClient, store: S) -> Self {
        Self { client, store }
    }

    /// Returns the gateway client, for operations that do not touch
    /// metadata (list, activate, deactivate, execute, update).
    #[must_use]
    pub fn client(&self) -> &EngineClient {
        &self.client
    }

    /// Returns the metadata store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lowers and creates a workflow in the engine, then records its
    /// metadata.
    ///
    /// The record is written only after the engine acknowledges creation.
    /// If the metadata write fails, a best-effort compensating delete
    /// removes the engine-side workflow so no orphan is left behind, and
    /// the metadata error is surfaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine call or the metadata write fails.
    pub async fn create(
        &self,
        workflow: &Workflow,
        user_id: Option<UserId>,
    ) -> Result<EngineWorkflowSummary, ServiceError> {
        let lowered = lower(workflow);
        let created = self.client.create_workflow(&lowered).await?;

        let mut record =
            WorkflowRecord::new(created.id.clone(), workflow.name(), workflow.description());
        if let Some(user_id) = user_id {
            record = record.with_user(user_id);
        }

        if let Err(err) = self.store.insert(record).await {
            // Best-effort compensation; the metadata error is what the
            // caller needs either way.
            let _ = self.client.delete_workflow(&created.id).await;
            return Err(err.into());
        }

        Ok(created)
    }

    /// Deletes a workflow from the engine, then removes its metadata.
    ///
    /// Metadata is removed only after the engine acknowledges deletion. A
    /// missing record is tolerated: the engine may hold workflows created
    /// outside this service.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine call fails or the metadata store
    /// fails for a reason other than a missing record.
    pub async fn delete(&self, engine_id: &str) -> Result<(), ServiceError> {
        self.client.delete_workflow(engine_id).await?;

        match self.store.remove(engine_id).await {
            Ok(_) | Err(MetadataError::NotFound { .. }) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::EngineConfig;
    use crate::metadata::InMemoryMetadataStore;

    #[test]
    fn service_exposes_client_and_store() {
        let client =
            EngineClient::new(EngineConfig::new("http://localhost:5678", "key")).expect("client");
        let service = EngineService::new(client, InMemoryMetadataStore::new());

        assert_eq!(service.client().config().base_url, "http://localhost:5678");
    }
}
