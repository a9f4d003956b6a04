//! Default values applied during schema lowering.
//!
//! The lowering adapter is deliberately permissive: missing optional node
//! fields are defaulted, never rejected. Every default lives here so tests
//! can assert the exact values and nothing is defaulted inline elsewhere.

use loomflow_workflow::NodeCategory;

/// Workflow name emitted when the internal workflow has an empty name.
pub const UNTITLED_WORKFLOW_NAME: &str = "Untitled Workflow";

/// Engine node type emitted for a category missing from [`NODE_TYPE_MAP`].
pub const FALLBACK_NODE_TYPE: &str = "n8n-nodes-base.noOp";

/// The `typeVersion` stamped on every lowered node.
pub const NODE_TYPE_VERSION: u32 = 1;

/// Port index used for every connection; the pipeline does not support
/// multi-output/multi-input port addressing.
pub const CONNECTION_PORT_INDEX: u32 = 0;

/// Closed mapping from internal node category to engine node type.
pub const NODE_TYPE_MAP: &[(NodeCategory, &str)] = &[
    (NodeCategory::Trigger, "n8n-nodes-base.webhook"),
    (NodeCategory::Action, "n8n-nodes-base.httpRequest"),
    (NodeCategory::Ai, "n8n-nodes-base.aiAgent"),
    (NodeCategory::Logic, "n8n-nodes-base.if"),
    (NodeCategory::Notification, "n8n-nodes-base.slack"),
];

/// Resolves the engine node type for a category.
///
/// A category missing from the table resolves to [`FALLBACK_NODE_TYPE`];
/// this lookup never fails.
#[must_use]
pub fn engine_node_type(category: NodeCategory) -> &'static str {
    lookup(NODE_TYPE_MAP, category)
}

fn lookup(map: &[(NodeCategory, &'static str)], category: NodeCategory) -> &'static str {
    map.iter()
        .find(|(mapped, _)| *mapped == category)
        .map_or(FALLBACK_NODE_TYPE, |(_, node_type)| *node_type)
}
