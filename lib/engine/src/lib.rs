//! External engine integration for the loomflow platform.
//!
//! This crate owns everything on the engine side of the pipeline:
//!
//! - **Schema**: the engine's wire types (nodes, connections, credentials)
//! - **Lowering**: the pure, total translation from the internal workflow
//!   graph into that schema, with all defaults in one table
//! - **Client**: the authenticated HTTP gateway with timeouts and bounded
//!   retries for idempotent reads
//! - **Metadata**: the keyed workflow-metadata contract and an in-memory
//!   concurrency-safe store
//! - **Service**: create/delete flows that keep engine state and metadata
//!   in step, with a compensating delete on partial failure

pub mod client;
pub mod defaults;
pub mod error;
pub mod lower;
pub mod metadata;
pub mod schema;
pub mod service;

pub use client::{EngineClient, EngineConfig};
pub use error::{EngineError, MetadataError, ServiceError};
pub use lower::lower;
pub use metadata::{InMemoryMetadataStore, MetadataStore, WorkflowRecord};
pub use schema::{
    EngineConnection, EngineCredentialRef, EngineNode, EngineWorkflow, EngineWorkflowSummary,
};
pub use service::EngineService;
