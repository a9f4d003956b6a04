//! Edge types for workflow graphs.
//!
//! An edge is a directed connection from one node to another, defining
//! execution order. Both endpoints must exist in the same workflow; a
//! dangling edge is rejected, never silently tolerated.

use crate::node::NodeId;
use loomflow_core::ParseIdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An edge identifier, unique within a single workflow.
///
/// Like [`NodeId`], edge ids come from an incrementing counter starting at 1
/// and serialize as their decimal string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EdgeId(u32);

impl EdgeId {
    /// The first id handed out by a fresh counter.
    pub const FIRST: Self = Self(1);

    /// Creates an edge id from its counter value.
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

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EdgeId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self).map_err(|e| ParseIdError {
            id_type: "EdgeId",
            reason: e.to_string(),
        })
    }
}

impl From<EdgeId> for String {
    fn from(id: EdgeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EdgeId {
    type Error = ParseIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A directed edge between two nodes in a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Identifier unique within the owning workflow.
    pub id: EdgeId,
    /// The source node id.
    pub source: NodeId,
    /// The target node id.
    pub target: NodeId,
}

impl Edge {
    /// Creates a new edge.
    #[must_use]
    pub const fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { id, source, target }
    }
}
