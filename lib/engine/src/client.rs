//! HTTP gateway to the external workflow engine.
//!
//! Every request carries the engine API key header and an explicit timeout.
//! Idempotent reads (the list operations) retry with bounded exponential
//! backoff; writes and executions are single-attempt, since a duplicate
//! create or execute is worse than a surfaced failure.

use crate::error::EngineError;
use crate::schema::{EngineWorkflow, EngineWorkflowSummary};
use backoff::ExponentialBackoffBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Header carrying the engine API key.
const API_KEY_HEADER: &str = "X-N8N-API-KEY";

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

/// Configuration for the engine gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the engine, e.g. `http://localhost:5678`.
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Additional attempts after the first, for idempotent reads only.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl EngineConfig {
    /// Creates a configuration with default timeout and retry settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

/// An authenticated client for the engine's REST API.
#[derive(Debug, Clone)]
pub struct EngineClient {
    http: reqwest::Client,
    config: EngineConfig,
}

impl EngineClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| EngineError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self { http, config })
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lists all workflows known to the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is unreachable or answers with a
    /// non-success status after retries are exhausted.
    pub async fn list_workflows(&self) -> Result<JsonValue, EngineError> {
        self.get_with_retries("list_workflows", "workflows").await
    }

    /// Lists recent workflow executions.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is unreachable or answers with a
    /// non-success status after retries are exhausted.
    pub async fn list_executions(&self) -> Result<JsonValue, EngineError> {
        self.get_with_retries("list_executions", "executions").await
    }

    /// Creates a workflow in the engine. Single-attempt.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable response body.
    pub async fn create_workflow(
        &self,
        workflow: &EngineWorkflow,
    ) -> Result<EngineWorkflowSummary, EngineError> {
        let operation = "create_workflow";
        let request = self.http.post(self.url("workflows")).json(workflow);
        let response = self.request_once(operation, request).await?;
        Self::decode(operation, response).await
    }

    /// Replaces a workflow in the engine. Single-attempt.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable response body.
    pub async fn update_workflow(
        &self,
        engine_id: &str,
        workflow: &EngineWorkflow,
    ) -> Result<EngineWorkflowSummary, EngineError> {
        let operation = "update_workflow";
        let request = self
            .http
            .put(self.url(&format!("workflows/{engine_id}")))
            .json(workflow);
        let response = self.request_once(operation, request).await?;
        Self::decode(operation, response).await
    }

    /// Deletes a workflow from the engine. Single-attempt.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn delete_workflow(&self, engine_id: &str) -> Result<(), EngineError> {
        let request = self.http.delete(self.url(&format!("workflows/{engine_id}")));
        self.request_once("delete_workflow", request).await?;
        Ok(())
    }

    /// Switches a workflow on in the engine.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn activate_workflow(&self, engine_id: &str) -> Result<(), EngineError> {
        let request = self
            .http
            .post(self.url(&format!("workflows/{engine_id}/activate")));
        self.request_once("activate_workflow", request).await?;
        Ok(())
    }

    /// Switches a workflow off in the engine.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn deactivate_workflow(&self, engine_id: &str) -> Result<(), EngineError> {
        let request = self
            .http
            .post(self.url(&format!("workflows/{engine_id}/deactivate")));
        self.request_once("deactivate_workflow", request).await?;
        Ok(())
    }

    /// Triggers a manual execution, optionally with input data.
    /// Single-attempt: executions are not idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable response body.
    pub async fn execute_workflow(
        &self,
        engine_id: &str,
        data: Option<JsonValue>,
    ) -> Result<JsonValue, EngineError> {
        let operation = "execute_workflow";
        let payload = data.unwrap_or_else(|| JsonValue::Object(serde_json::Map::new()));
        let request = self
            .http
            .post(self.url(&format!("workflows/{engine_id}/execute")))
            .json(&payload);
        let response = self.request_once(operation, request).await?;
        Self::decode(operation, response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn request_once(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, EngineError> {
        let response = request
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .send()
            .await
            .map_err(|e| EngineError::Transport {
                operation,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::RequestFailed {
                operation,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<T, EngineError> {
        response
            .json::<T>()
            .await
            .map_err(|e| EngineError::InvalidResponse {
                operation,
                reason: e.to_string(),
            })
    }

    /// GET with bounded exponential backoff. Retries only while the error
    /// is retryable and attempts remain.
    async fn get_with_retries(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<JsonValue, EngineError> {
        let url = self.url(path);
        let max_attempts = self.config.max_retries.saturating_add(1);
        let mut attempt = 0u32;

        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(250))
            .with_max_elapsed_time(None)
            .build();

        backoff::future::retry(policy, || {
            attempt += 1;
            let last_attempt = attempt >= max_attempts;
            let url = url.clone();

            async move {
                match self.request_once(operation, self.http.get(url.as_str())).await {
                    Ok(response) => Self::decode::<JsonValue>(operation, response)
                        .await
                        .map_err(backoff::Error::permanent),
                    Err(err) if err.is_retryable() && !last_attempt => {
                        Err(backoff::Error::transient(err))
                    }
                    Err(err) => Err(backoff::Error::permanent(err)),
                }
            }
        })
        .await
    }
}
