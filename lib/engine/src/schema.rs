//! Wire schema of the external workflow engine.
//!
//! These types mirror the engine's REST representation exactly (camelCase
//! field names, `typeVersion`, position pairs, optional credentials map).
//! They are produced by the lowering adapter and consumed by the gateway
//! client; the internal graph model never leaks past this boundary.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::BTreeMap;

/// A workflow in the engine's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineWorkflow {
    /// Workflow name.
    pub name: String,
    /// Whether the engine should run the workflow. Always false on
    /// creation; activation is a separate explicit operation.
    pub active: bool,
    /// Lowered nodes.
    pub nodes: Vec<EngineNode>,
    /// Lowered connections.
    pub connections: Vec<EngineConnection>,
}

/// A node in the engine's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineNode {
    /// Node identifier (the internal id string, unchanged).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Engine node type identifier.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Engine node type version.
    pub type_version: u32,
    /// Canvas position as an `[x, y]` pair.
    pub position: [f64; 2],
    /// Node parameters, verbatim from the internal configuration mapping.
    pub parameters: JsonMap<String, JsonValue>,
    /// Credential references keyed by engine node type. Omitted entirely
    /// when the node carries no credential; never null, never empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<BTreeMap<String, EngineCredentialRef>>,
}

/// A reference to a credential stored in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineCredentialRef {
    /// The credential identifier.
    pub id: String,
}

/// A connection between two nodes in the engine's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConnection {
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Source output port index (always 0).
    pub source_output: u32,
    /// Target input port index (always 0).
    pub target_input: u32,
}

/// The engine's record of a workflow, as returned by create/update calls.
///
/// Only the id is interpreted locally; the rest of the body is carried
/// through untouched for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineWorkflowSummary {
    /// The engine-assigned workflow identifier.
    pub id: String,
    /// Remaining response fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}
