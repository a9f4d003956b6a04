//! HTTP API server for the loomflow platform.
//!
//! Exposes the prompt-to-workflow pipeline over JSON:
//!
//! - `POST /api/generate`: classify a prompt and build a workflow graph
//! - `GET/POST /api/engine/workflows`: list or deploy engine workflows
//! - `PUT/DELETE /api/engine/workflows/{id}`: update or delete
//! - `POST /api/engine/workflows/{id}/activate|deactivate|execute`
//! - `GET /api/engine/executions`: recent execution history

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
