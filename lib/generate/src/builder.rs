//! Linear workflow assembly from matched rules.
//!
//! The builder turns a match set into a single chain: one trigger node
//! followed by one node per matched action, connected in order. Node and
//! edge ids are handed out by a counter starting at 1, so generation is
//! fully deterministic for a given prompt and rule set.

use crate::matcher::MatchSet;
use loomflow_workflow::{Edge, EdgeId, Node, NodeCategory, NodeData, NodeId, Workflow};

/// The fixed name given to every generated workflow.
pub const GENERATED_WORKFLOW_NAME: &str = "AI Generated Automation";

/// Label of the fallback trigger used when no trigger rule matched.
const MANUAL_TRIGGER_LABEL: &str = "Manual";
const MANUAL_TRIGGER_FRIENDLY_NAME: &str = "Manual trigger";

/// A generated workflow together with its user-facing explanation.
///
/// The explanation enumerates the steps for user feedback; nothing
/// downstream consumes it.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The assembled workflow.
    pub workflow: Workflow,
    /// Human-readable step-by-step summary.
    pub explanation: String,
}

/// Assembles matched rules into a linear workflow graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    /// Creates a builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds a workflow from a prompt and its match set.
    ///
    /// The workflow description is the verbatim prompt. The first matched
    /// trigger becomes the entry node; with no matched trigger, a manual
    /// trigger is synthesized. Every matched action is appended as one node
    /// and one edge, in table order, forming a strict chain. This cannot
    /// fail: an unmatched prompt simply produces a single-node workflow.
    #[must_use]
    pub fn build(&self, prompt: &str, matches: &MatchSet<'_>) -> Generated {
        let mut workflow = Workflow::new(GENERATED_WORKFLOW_NAME);
        workflow.metadata.description = prompt.to_string();

        let mut node_id = NodeId::FIRST;
        let trigger = match matches.primary_trigger() {
            Some(rule) => Node::new(
                node_id,
                rule.category,
                NodeData::new(&rule.label, &rule.friendly_name),
            ),
            None => Node::new(
                node_id,
                NodeCategory::Trigger,
                NodeData::new(MANUAL_TRIGGER_LABEL, MANUAL_TRIGGER_FRIENDLY_NAME),
            ),
        };

        let mut steps = vec![trigger.display_name().to_string()];
        workflow
            .graph
            .add_node(trigger)
            .expect("sequential node ids are unique");

        let mut edge_id = EdgeId::FIRST;
        let mut previous = node_id;
        for rule in &matches.actions {
            node_id = node_id.next();
            let node = Node::new(
                node_id,
                rule.category,
                NodeData::new(&rule.label, &rule.friendly_name),
            );
            steps.push(node.display_name().to_string());

            workflow
                .graph
                .add_node(node)
                .expect("sequential node ids are unique");
            workflow
                .graph
                .add_edge(Edge::new(edge_id, previous, node_id))
                .expect("chain edges connect existing nodes");

            edge_id = edge_id.next();
            previous = node_id;
        }

        let explanation = explain(&steps);
        Generated {
            workflow,
            explanation,
        }
    }
}

/// Renders the step list as `I've created a workflow with N steps: 1) ...`.
fn explain(steps: &[String]) -> String {
    let enumerated: Vec<String> = steps
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{}) {step}", index + 1))
        .collect();
    let plural = if steps.len() == 1 { "" } else { "s" };

    format!(
        "I've created a workflow with {} step{plural}: {}.",
        steps.len(),
        enumerated.join(", ")
    )
}
