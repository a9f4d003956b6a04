//! Core domain types and utilities for the loomflow platform.
//!
//! This crate provides the foundational identifier types and error handling
//! shared by the loomflow prompt-to-workflow pipeline crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{CredentialId, ParseIdError, UserId, WorkflowId};
