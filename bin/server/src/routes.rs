//! HTTP routes for workflow generation and engine operations.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use loomflow_engine::{EngineWorkflowSummary, lower};
use loomflow_workflow::{Edge, Node, Workflow, WorkflowGraph};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/generate", post(generate))
        .route(
            "/api/engine/workflows",
            get(list_workflows).post(deploy_workflow),
        )
        .route(
            "/api/engine/workflows/{id}",
            put(update_workflow).delete(delete_workflow),
        )
        .route("/api/engine/workflows/{id}/activate", post(activate_workflow))
        .route(
            "/api/engine/workflows/{id}/deactivate",
            post(deactivate_workflow),
        )
        .route("/api/engine/workflows/{id}/execute", post(execute_workflow))
        .route("/api/engine/executions", get(list_executions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A generated workflow as returned to the caller.
#[derive(Debug, Serialize)]
pub struct GeneratedWorkflowBody {
    pub name: String,
    pub description: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub explanation: String,
}

/// Response body for `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub workflow: GeneratedWorkflowBody,
}

/// Generates a workflow from a free-text prompt.
///
/// The prompt must be a non-empty string; anything else is a validation
/// failure. A prompt that matches no rules is not an error: it produces a
/// single-node manual-trigger workflow.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<JsonValue>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = body
        .get("prompt")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| ApiError::validation("Prompt is required"))?;
    if prompt.trim().is_empty() {
        return Err(ApiError::validation("Prompt is required"));
    }

    let matches = state.matcher.matches(prompt);
    let generated = state.builder.build(prompt, &matches);
    let graph = &generated.workflow.graph;

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Generated workflow from prompt"
    );

    Ok(Json(GenerateResponse {
        success: true,
        workflow: GeneratedWorkflowBody {
            name: generated.workflow.name().to_string(),
            description: generated.workflow.description().to_string(),
            nodes: graph.nodes().cloned().collect(),
            edges: graph.edges().copied().collect(),
            explanation: generated.explanation,
        },
    }))
}

/// Request body for deploying or updating a workflow.
#[derive(Debug, Deserialize)]
pub struct WorkflowPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Rebuilds an internal workflow from a request payload.
///
/// A payload whose edges reference missing nodes is a client bug and is
/// rejected here, before anything reaches the engine.
fn workflow_from_payload(payload: WorkflowPayload) -> Result<Workflow, ApiError> {
    let graph = WorkflowGraph::from_parts(payload.nodes, payload.edges)
        .map_err(|e| ApiError::validation(format!("Invalid workflow graph: {e}")))?;

    let mut workflow = Workflow::new(payload.name);
    workflow.metadata.description = payload.description;
    workflow.graph = graph;
    Ok(workflow)
}

/// Lists workflows known to the engine.
pub async fn list_workflows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JsonValue>, ApiError> {
    let workflows = state.engine.client().list_workflows().await?;
    Ok(Json(workflows))
}

/// Lists recent executions.
pub async fn list_executions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JsonValue>, ApiError> {
    let executions = state.engine.client().list_executions().await?;
    Ok(Json(executions))
}

/// Lowers a workflow payload and creates it in the engine.
pub async fn deploy_workflow(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WorkflowPayload>,
) -> Result<Json<EngineWorkflowSummary>, ApiError> {
    let workflow = workflow_from_payload(payload)?;
    let created = state.engine.create(&workflow, None).await?;

    tracing::info!(engine_id = %created.id, "Deployed workflow to engine");
    Ok(Json(created))
}

/// Lowers a workflow payload and replaces an engine workflow with it.
pub async fn update_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<WorkflowPayload>,
) -> Result<Json<EngineWorkflowSummary>, ApiError> {
    let workflow = workflow_from_payload(payload)?;
    let updated = state
        .engine
        .client()
        .update_workflow(&id, &lower(&workflow))
        .await?;
    Ok(Json(updated))
}

/// Deletes an engine workflow and its metadata record.
pub async fn delete_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JsonValue>, ApiError> {
    state.engine.delete(&id).await?;
    tracing::info!(engine_id = %id, "Deleted workflow from engine");
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Activates an engine workflow.
pub async fn activate_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JsonValue>, ApiError> {
    state.engine.client().activate_workflow(&id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "status": "active" }),
    ))
}

/// Deactivates an engine workflow.
pub async fn deactivate_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JsonValue>, ApiError> {
    state.engine.client().deactivate_workflow(&id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "status": "inactive" }),
    ))
}

/// Request body for manual execution.
#[derive(Debug, Default, Deserialize)]
pub struct ExecuteRequest {
    /// Optional input data handed to the workflow.
    #[serde(default)]
    pub data: Option<JsonValue>,
}

/// Triggers a manual execution of an engine workflow.
pub async fn execute_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ExecuteRequest>,
) -> Result<Json<JsonValue>, ApiError> {
    let result = state.engine.client().execute_workflow(&id, body.data).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomflow_engine::{EngineClient, EngineConfig, EngineService, InMemoryMetadataStore};
    use loomflow_generate::PatternMatcher;
    use serde_json::json;

    fn test_state() -> Arc<AppState> {
        let client = EngineClient::new(EngineConfig::new("http://localhost:5678", "test-key"))
            .expect("client");
        Arc::new(AppState::new(
            PatternMatcher::builtin(),
            EngineService::new(client, InMemoryMetadataStore::new()),
        ))
    }

    #[tokio::test]
    async fn generate_rejects_missing_prompt() {
        let result = generate(State(test_state()), Json(json!({}))).await;
        assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn generate_rejects_non_string_prompt() {
        let result = generate(State(test_state()), Json(json!({ "prompt": 42 }))).await;
        assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn generate_rejects_blank_prompt() {
        let result = generate(State(test_state()), Json(json!({ "prompt": "   " }))).await;
        assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn generate_returns_workflow_body() {
        let body = json!({
            "prompt": "When I receive a Gmail, save attachment to Drive and notify me on Telegram."
        });
        let Json(response) = generate(State(test_state()), Json(body))
            .await
            .expect("success");

        assert!(response.success);
        assert_eq!(response.workflow.name, "AI Generated Automation");
        assert_eq!(response.workflow.nodes.len(), 3);
        assert_eq!(response.workflow.edges.len(), 2);
        assert!(
            response
                .workflow
                .explanation
                .starts_with("I've created a workflow with 3 steps")
        );
    }

    #[test]
    fn payload_with_dangling_edge_is_rejected() {
        let payload: WorkflowPayload = serde_json::from_value(json!({
            "name": "Broken",
            "nodes": [
                {"id": "1", "category": "trigger",
                 "data": {"label": "Manual", "friendly_name": "Manual trigger"}}
            ],
            "edges": [{"id": "1", "source": "1", "target": "2"}]
        }))
        .expect("deserialize");

        let err = workflow_from_payload(payload).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn payload_rebuilds_internal_workflow() {
        let payload: WorkflowPayload = serde_json::from_value(json!({
            "name": "Demo",
            "description": "a demo",
            "nodes": [
                {"id": "1", "category": "trigger",
                 "data": {"label": "Webhook", "friendly_name": "Webhook trigger"}},
                {"id": "2", "category": "action",
                 "data": {"label": "Slack", "friendly_name": "Send to Slack"}}
            ],
            "edges": [{"id": "1", "source": "1", "target": "2"}]
        }))
        .expect("deserialize");

        let workflow = workflow_from_payload(payload).expect("valid");
        assert_eq!(workflow.name(), "Demo");
        assert_eq!(workflow.graph.node_count(), 2);
        assert_eq!(workflow.graph.edge_count(), 1);
        assert!(workflow.graph.is_simple_path());
    }
}
