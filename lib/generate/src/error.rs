//! Error types for the generate crate.
//!
//! The matcher and builder are total over well-formed strings and have no
//! error types of their own; only loading an external rule set can fail.

use std::fmt;

/// Errors from loading a classification rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesetError {
    /// Reading the rule file failed.
    Io { path: String, reason: String },
    /// The rule JSON is malformed.
    Parse { reason: String },
    /// A rule is structurally invalid.
    InvalidRule { label: String, reason: String },
}

impl fmt::Display for RulesetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => {
                write!(f, "failed to read rule set '{path}': {reason}")
            }
            Self::Parse { reason } => {
                write!(f, "failed to parse rule set: {reason}")
            }
            Self::InvalidRule { label, reason } => {
                write!(f, "invalid rule '{label}': {reason}")
            }
        }
    }
}

impl std::error::Error for RulesetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruleset_error_display() {
        let err = RulesetError::InvalidRule {
            label: "Gmail".to_string(),
            reason: "rule has no keywords".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Gmail"));
        assert!(text.contains("no keywords"));
    }
}
