//! Prompt-to-workflow generation for the loomflow platform.
//!
//! This crate turns free-text automation descriptions into workflow graphs:
//!
//! - **Ruleset**: ordered keyword rule tables (built-in or loaded from JSON)
//! - **PatternMatcher**: stateless substring classification, table-order
//!   output, first-trigger-wins priority
//! - **GraphBuilder**: assembles matches into a linear trigger→action chain
//!   with sequential ids and a step-by-step explanation

pub mod builder;
pub mod error;
pub mod matcher;
pub mod ruleset;

pub use builder::{GENERATED_WORKFLOW_NAME, Generated, GraphBuilder};
pub use error::RulesetError;
pub use matcher::{MatchSet, PatternMatcher};
pub use ruleset::{Rule, Ruleset};
