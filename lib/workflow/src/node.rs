//! Workflow node types.
//!
//! Nodes are the steps of a workflow. Each node has:
//! - An identifier unique within its workflow (a sequential counter)
//! - A category (trigger, action, ai, logic, notification)
//! - An advisory canvas position
//! - A data payload: labels, description, configuration, optional credential

use loomflow_core::ParseIdError;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

/// A node identifier, unique within a single workflow.
///
/// Node ids are assigned by the graph builder from an incrementing counter
/// starting at 1, and serialize as their decimal string form (`"1"`, `"2"`,
/// ...) to match the wire schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NodeId(u32);

impl NodeId {
    /// The first id handed out by a fresh counter.
    pub const FIRST: Self = Self(1);

    /// Creates a node id from its counter value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying counter value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns the id following this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self).map_err(|e| ParseIdError {
            id_type: "NodeId",
            reason: e.to_string(),
        })
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for NodeId {
    type Error = ParseIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// The category of a workflow node.
///
/// This is a closed set: the schema lowering adapter maps each category to
/// an external engine node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Entry points that initiate workflow execution.
    Trigger,
    /// Service calls and data operations.
    Action,
    /// AI-powered steps.
    Ai,
    /// Conditional/branching logic.
    Logic,
    /// User-facing notifications.
    Notification,
}

impl NodeCategory {
    /// Returns the wire-format name of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Action => "action",
            Self::Ai => "ai",
            Self::Logic => "logic",
            Self::Notification => "notification",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 2D canvas position.
///
/// Advisory for rendering only; never affects execution semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// The canvas origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The data payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Display label (the service or component name, e.g. "Gmail").
    pub label: String,
    /// Human-friendly label (e.g. "When email arrives").
    pub friendly_name: String,
    /// Description of what this step does.
    #[serde(default)]
    pub description: String,
    /// Free-form configuration mapping for this step.
    #[serde(default)]
    pub config: JsonMap<String, JsonValue>,
    /// Opaque reference to a stored credential, if this step needs one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl NodeData {
    /// Creates node data with the given labels.
    #[must_use]
    pub fn new(label: impl Into<String>, friendly_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            friendly_name: friendly_name.into(),
            description: String::new(),
            config: JsonMap::new(),
            credential: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a configuration entry.
    #[must_use]
    pub fn with_config_value(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    /// Sets the credential reference.
    #[must_use]
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }
}

/// A workflow node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier unique within the owning workflow.
    pub id: NodeId,
    /// Node category.
    pub category: NodeCategory,
    /// Canvas position (advisory).
    #[serde(default)]
    pub position: Position,
    /// Node data payload.
    pub data: NodeData,
}

impl Node {
    /// Creates a new node at the canvas origin.
    #[must_use]
    pub fn new(id: NodeId, category: NodeCategory, data: NodeData) -> Self {
        Self {
            id,
            category,
            position: Position::ORIGIN,
            data,
        }
    }

    /// Sets the canvas position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Returns the name to display for this node: the friendly label when
    /// present, otherwise the plain label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.data.friendly_name.is_empty() {
            &self.data.label
        } else {
            &self.data.friendly_name
        }
    }
}
