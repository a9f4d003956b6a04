//! Keyword-based prompt classification.
//!
//! The matcher is stateless per invocation: it lowercases the prompt once
//! and tests it independently against the trigger and action rule tables.
//! Matches come back in table order, never prompt order; table order is
//! the priority contract.

use crate::ruleset::{Rule, Ruleset};

/// The rules a prompt matched, in rule-table order.
#[derive(Debug, Clone)]
pub struct MatchSet<'a> {
    /// Matched trigger rules. Only the first is used to build the workflow;
    /// the rest are retained so callers can see everything that matched.
    pub triggers: Vec<&'a Rule>,
    /// Matched action rules, each of which becomes one sequential step.
    pub actions: Vec<&'a Rule>,
}

impl<'a> MatchSet<'a> {
    /// Returns the authoritative trigger: the earliest matched entry in the
    /// trigger table.
    #[must_use]
    pub fn primary_trigger(&self) -> Option<&'a Rule> {
        self.triggers.first().copied()
    }

    /// Returns true when the prompt matched nothing in either family.
    ///
    /// This is a valid outcome, not an error; the builder falls back to a
    /// manual trigger.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty() && self.actions.is_empty()
    }
}

/// A prompt classifier over a fixed rule set.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    ruleset: Ruleset,
}

impl PatternMatcher {
    /// Creates a matcher over the given rule set.
    #[must_use]
    pub fn new(ruleset: Ruleset) -> Self {
        Self { ruleset }
    }

    /// Creates a matcher over the built-in rule set.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Ruleset::builtin())
    }

    /// Returns the rule set this matcher classifies with.
    #[must_use]
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Classifies a prompt against both rule families.
    ///
    /// A prompt that matches nothing yields an empty match set.
    #[must_use]
    pub fn matches(&self, prompt: &str) -> MatchSet<'_> {
        let normalized = prompt.to_lowercase();

        MatchSet {
            triggers: self
                .ruleset
                .triggers
                .iter()
                .filter(|rule| rule.matches(&normalized))
                .collect(),
            actions: self
                .ruleset
                .actions
                .iter()
                .filter(|rule| rule.matches(&normalized))
                .collect(),
        }
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::builtin()
    }
}
