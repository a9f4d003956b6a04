//! Schema lowering: internal workflow → engine wire schema.
//!
//! Lowering is a pure, total function: it never fails for a structurally
//! valid workflow and never mutates its input. The translation is
//! structural only (per-node-type parameter correctness is the caller's
//! responsibility) and lossy: descriptions, the friendly-vs-plain label
//! choice, and internal status do not survive the trip.

use crate::defaults;
use crate::schema::{EngineConnection, EngineCredentialRef, EngineNode, EngineWorkflow};
use loomflow_workflow::{Edge, Node, Workflow};
use std::collections::BTreeMap;

/// Lowers a workflow into the engine's schema.
///
/// `active` is always false regardless of the workflow's internal status;
/// activation is a separate explicit gateway operation.
#[must_use]
pub fn lower(workflow: &Workflow) -> EngineWorkflow {
    let name = if workflow.name().is_empty() {
        defaults::UNTITLED_WORKFLOW_NAME.to_string()
    } else {
        workflow.name().to_string()
    };

    EngineWorkflow {
        name,
        active: false,
        nodes: workflow.graph.nodes().map(lower_node).collect(),
        connections: workflow.graph.edges().map(lower_edge).collect(),
    }
}

fn lower_node(node: &Node) -> EngineNode {
    let node_type = defaults::engine_node_type(node.category);

    let credentials = node.data.credential.as_ref().map(|credential| {
        let mut map = BTreeMap::new();
        map.insert(
            node_type.to_string(),
            EngineCredentialRef {
                id: credential.clone(),
            },
        );
        map
    });

    EngineNode {
        id: node.id.to_string(),
        name: node.display_name().to_string(),
        node_type: node_type.to_string(),
        type_version: defaults::NODE_TYPE_VERSION,
        position: [node.position.x, node.position.y],
        parameters: node.data.config.clone(),
        credentials,
    }
}

fn lower_edge(edge: &Edge) -> EngineConnection {
    EngineConnection {
        source: edge.source.to_string(),
        target: edge.target.to_string(),
        source_output: defaults::CONNECTION_PORT_INDEX,
        target_input: defaults::CONNECTION_PORT_INDEX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomflow_generate::{GraphBuilder, PatternMatcher};
    use loomflow_workflow::{NodeCategory, NodeData, NodeId, Position, WorkflowStatus};

    fn generated_workflow(prompt: &str) -> Workflow {
        let matcher = PatternMatcher::builtin();
        let matches = matcher.matches(prompt);
        GraphBuilder::new().build(prompt, &matches).workflow
    }

    #[test]
    fn lowering_the_email_chain_matches_engine_schema() {
        let workflow = generated_workflow(
            "When I receive a Gmail, save attachment to Drive and notify me on Telegram.",
        );
        let lowered = lower(&workflow);

        assert!(!lowered.active);
        assert_eq!(lowered.nodes.len(), 3);
        assert_eq!(lowered.connections.len(), 2);

        let first = &lowered.nodes[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.node_type, "n8n-nodes-base.webhook");
        assert_eq!(first.position, [0.0, 0.0]);
        assert!(first.credentials.is_none());

        let connection = &lowered.connections[0];
        assert_eq!(connection.source, "1");
        assert_eq!(connection.target, "2");
        assert_eq!(connection.source_output, 0);
        assert_eq!(connection.target_input, 0);
    }

    #[test]
    fn node_ids_pass_through_unchanged() {
        let workflow = generated_workflow("Every morning, fetch weather data and send to Slack.");
        let lowered = lower(&workflow);

        let ids: Vec<&str> = lowered.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn friendly_name_becomes_node_name() {
        let workflow = generated_workflow("When I receive a Gmail, save attachment to Drive.");
        let lowered = lower(&workflow);
        assert_eq!(lowered.nodes[0].name, "When email arrives");
    }

    #[test]
    fn every_category_lowers_without_error() {
        let mut workflow = Workflow::new("All Categories");
        let categories = [
            NodeCategory::Trigger,
            NodeCategory::Action,
            NodeCategory::Ai,
            NodeCategory::Logic,
            NodeCategory::Notification,
        ];
        let mut id = NodeId::FIRST;
        for category in categories {
            workflow
                .graph
                .add_node(Node::new(id, category, NodeData::new("Step", "Step")))
                .expect("unique ids");
            id = id.next();
        }

        let lowered = lower(&workflow);
        let types: Vec<&str> = lowered.nodes.iter().map(|n| n.node_type.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "n8n-nodes-base.webhook",
                "n8n-nodes-base.httpRequest",
                "n8n-nodes-base.aiAgent",
                "n8n-nodes-base.if",
                "n8n-nodes-base.slack"
            ]
        );
    }

    #[test]
    fn credential_is_wrapped_under_resolved_type() {
        let mut workflow = Workflow::new("Credential Test");
        let data = NodeData::new("Telegram", "Send Telegram message").with_credential("cred_42");
        workflow
            .graph
            .add_node(Node::new(NodeId::FIRST, NodeCategory::Notification, data))
            .expect("unique id");

        let lowered = lower(&workflow);
        let credentials = lowered.nodes[0].credentials.as_ref().expect("credentials");
        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials["n8n-nodes-base.slack"].id, "cred_42");
    }

    #[test]
    fn missing_credential_omits_the_field_entirely() {
        let workflow = generated_workflow("When I receive a Gmail, save attachment to Drive.");
        let lowered = lower(&workflow);

        let json = serde_json::to_value(&lowered).expect("serialize");
        for node in json["nodes"].as_array().expect("nodes") {
            assert!(node.get("credentials").is_none());
        }
    }

    #[test]
    fn parameters_pass_through_verbatim() {
        let mut workflow = Workflow::new("Params Test");
        let data = NodeData::new("Slack", "Send to Slack")
            .with_config_value("channel", serde_json::json!("#alerts"))
            .with_config_value("retries", serde_json::json!(3));
        workflow
            .graph
            .add_node(Node::new(NodeId::FIRST, NodeCategory::Action, data))
            .expect("unique id");

        let lowered = lower(&workflow);
        assert_eq!(
            lowered.nodes[0].parameters.get("channel"),
            Some(&serde_json::json!("#alerts"))
        );
        assert_eq!(
            lowered.nodes[0].parameters.get("retries"),
            Some(&serde_json::json!(3))
        );
    }

    #[test]
    fn positions_are_emitted_as_pairs() {
        let mut workflow = Workflow::new("Position Test");
        let node = Node::new(
            NodeId::FIRST,
            NodeCategory::Trigger,
            NodeData::new("Webhook", "Webhook trigger"),
        )
        .with_position(Position::new(250.0, 80.0));
        workflow.graph.add_node(node).expect("unique id");

        let lowered = lower(&workflow);
        assert_eq!(lowered.nodes[0].position, [250.0, 80.0]);
    }

    #[test]
    fn empty_name_defaults_to_untitled() {
        let workflow = Workflow::new("");
        let lowered = lower(&workflow);
        assert_eq!(lowered.name, defaults::UNTITLED_WORKFLOW_NAME);
    }

    #[test]
    fn active_status_does_not_leak_into_lowered_output() {
        let mut workflow = Workflow::new("Status Test");
        workflow.set_status(WorkflowStatus::Active);
        assert!(!lower(&workflow).active);
    }
}
