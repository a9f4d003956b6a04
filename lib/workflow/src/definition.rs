//! Workflow definition types.
//!
//! A workflow is a named automation consisting of:
//! - Metadata (name, description, status, timestamps, engine linkage)
//! - A directed graph of nodes and edges

use crate::error::GraphError;
use crate::graph::WorkflowGraph;
use chrono::{DateTime, Utc};
use loomflow_core::WorkflowId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle status of a workflow.
///
/// Status describes the local record only; whether the external engine is
/// actually running the workflow is controlled by the explicit activate and
/// deactivate operations, never implied by creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Running in the external engine.
    Active,
    /// Deployed but switched off.
    Inactive,
    /// Not yet deployed.
    #[default]
    Draft,
}

impl WorkflowStatus {
    /// Returns the wire-format name of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Draft => "draft",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a workflow definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    /// Human-readable name for this workflow.
    pub name: String,
    /// Description of what this workflow does. For generated workflows this
    /// is the verbatim prompt text.
    #[serde(default)]
    pub description: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: WorkflowStatus,
    /// When this workflow was created.
    pub created_at: DateTime<Utc>,
    /// When this workflow was last updated.
    pub updated_at: DateTime<Utc>,
    /// When this workflow last ran, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_at: Option<DateTime<Utc>>,
    /// The identifier assigned by the external engine, once deployed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_workflow_id: Option<String>,
}

impl WorkflowMetadata {
    /// Creates new metadata with default values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: String::new(),
            status: WorkflowStatus::Draft,
            created_at: now,
            updated_at: now,
            last_run_at: None,
            engine_workflow_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A complete workflow definition.
///
/// Constructed fresh for every generation request and handed onwards by
/// value; the schema lowering adapter reads it without mutating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique identifier for this workflow.
    pub id: WorkflowId,
    /// Workflow metadata.
    pub metadata: WorkflowMetadata,
    /// The workflow graph (nodes and edges).
    pub graph: WorkflowGraph,
}

impl Workflow {
    /// Creates a new empty workflow with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: WorkflowId::new(),
            metadata: WorkflowMetadata::new(name),
            graph: WorkflowGraph::new(),
        }
    }

    /// Creates a workflow with a specific id.
    #[must_use]
    pub fn with_id(id: WorkflowId, name: impl Into<String>) -> Self {
        Self {
            id,
            metadata: WorkflowMetadata::new(name),
            graph: WorkflowGraph::new(),
        }
    }

    /// Returns the workflow name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Returns the workflow description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.metadata.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> WorkflowStatus {
        self.metadata.status
    }

    /// Sets the lifecycle status.
    pub fn set_status(&mut self, status: WorkflowStatus) {
        self.metadata.status = status;
        self.touch();
    }

    /// Records the engine-assigned identifier after deployment.
    pub fn set_engine_workflow_id(&mut self, engine_id: impl Into<String>) {
        self.metadata.engine_workflow_id = Some(engine_id.into());
        self.touch();
    }

    /// Records a run of this workflow.
    pub fn record_run(&mut self, at: DateTime<Utc>) {
        self.metadata.last_run_at = Some(at);
        self.touch();
    }

    /// Validates the workflow.
    ///
    /// # Errors
    ///
    /// Returns an error if the workflow graph is invalid.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.graph.validate()
    }

    /// Marks the workflow as updated (bumps the updated_at timestamp).
    pub fn touch(&mut self) {
        self.metadata.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_creation() {
        let workflow = Workflow::new("Test Workflow");
        assert_eq!(workflow.name(), "Test Workflow");
        assert_eq!(workflow.status(), WorkflowStatus::Draft);
        assert_eq!(workflow.graph.node_count(), 0);
    }

    #[test]
    fn status_transitions() {
        let mut workflow = Workflow::new("Test");

        workflow.set_status(WorkflowStatus::Active);
        assert_eq!(workflow.status(), WorkflowStatus::Active);

        workflow.set_status(WorkflowStatus::Inactive);
        assert_eq!(workflow.status(), WorkflowStatus::Inactive);
    }

    #[test]
    fn status_wire_names() {
        let json = serde_json::to_string(&WorkflowStatus::Draft).expect("serialize");
        assert_eq!(json, "\"draft\"");
        assert_eq!(WorkflowStatus::Active.to_string(), "active");
    }

    #[test]
    fn engine_linkage() {
        let mut workflow = Workflow::new("Deploy Test");
        assert!(workflow.metadata.engine_workflow_id.is_none());

        workflow.set_engine_workflow_id("42");
        assert_eq!(workflow.metadata.engine_workflow_id.as_deref(), Some("42"));
    }

    #[test]
    fn record_run_sets_last_run() {
        let mut workflow = Workflow::new("Run Test");
        assert!(workflow.metadata.last_run_at.is_none());

        let at = Utc::now();
        workflow.record_run(at);
        assert_eq!(workflow.metadata.last_run_at, Some(at));
    }

    #[test]
    fn metadata_description_builder() {
        let metadata = WorkflowMetadata::new("My Workflow")
            .with_description("When I receive a Gmail, save attachment to Drive");
        assert!(metadata.description.starts_with("When I receive"));
    }

    #[test]
    fn workflow_serde_roundtrip() {
        let workflow = Workflow::new("Serialization Test");
        let json = serde_json::to_string(&workflow).expect("serialize");
        let parsed: Workflow = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(workflow.id, parsed.id);
        assert_eq!(workflow.name(), parsed.name());
    }
}
