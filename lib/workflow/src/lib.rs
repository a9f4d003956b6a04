//! Workflow graph model for the loomflow platform.
//!
//! This crate defines the internal representation of an automation:
//!
//! - **Nodes**: typed steps (trigger, action, ai, logic, notification) with
//!   labels, configuration, and optional credential references
//! - **Edges**: directed connections defining execution order
//! - **Graph**: a petgraph-backed container enforcing id uniqueness and
//!   edge-endpoint validity
//! - **Definition**: workflow metadata, status, and engine linkage

pub mod definition;
pub mod edge;
pub mod error;
pub mod graph;
pub mod node;

pub use definition::{Workflow, WorkflowMetadata, WorkflowStatus};
pub use edge::{Edge, EdgeId};
pub use error::GraphError;
pub use graph::WorkflowGraph;
pub use node::{Node, NodeCategory, NodeData, NodeId, Position};
