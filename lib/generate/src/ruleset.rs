//! Classification rule sets.
//!
//! A rule set is ordered configuration, not code: two rule tables (triggers
//! and actions) whose order encodes priority. The matcher never reorders
//! them, so which trigger wins and which order actions run in is controlled
//! entirely from here.

use crate::error::RulesetError;
use loomflow_workflow::NodeCategory;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single classification rule.
///
/// The rule matches a prompt when any of its keywords occurs as a substring
/// of the lowercased prompt text. Rules are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Keywords tested against the normalized prompt.
    pub keywords: Vec<String>,
    /// Category of the node this rule contributes.
    pub category: NodeCategory,
    /// Display label (service/component name).
    pub label: String,
    /// Human-friendly step label.
    pub friendly_name: String,
}

impl Rule {
    fn new(
        keywords: &[&str],
        category: NodeCategory,
        label: &str,
        friendly_name: &str,
    ) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            category,
            label: label.to_string(),
            friendly_name: friendly_name.to_string(),
        }
    }

    /// Returns true when any keyword occurs in the normalized prompt.
    ///
    /// The prompt must already be lowercased; keywords are stored lowercase.
    #[must_use]
    pub fn matches(&self, normalized_prompt: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_prompt.contains(keyword.as_str()))
    }
}

/// An ordered pair of rule tables: triggers and actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Trigger rules, in priority order (first match wins downstream).
    pub triggers: Vec<Rule>,
    /// Action rules, in step order (all matches become sequential steps).
    pub actions: Vec<Rule>,
}

impl Ruleset {
    /// Returns the built-in rule set.
    ///
    /// Action-table order doubles as step order: data-producing steps
    /// (storage, weather) sit ahead of the chat/notification steps that
    /// usually consume their output.
    #[must_use]
    pub fn builtin() -> Self {
        use NodeCategory::{Action, Notification, Trigger};

        Self {
            triggers: vec![
                Rule::new(
                    &["gmail", "email", "receive"],
                    Trigger,
                    "Gmail",
                    "When email arrives",
                ),
                Rule::new(
                    &["form", "submitted", "form submission"],
                    Trigger,
                    "Google Forms",
                    "When form is submitted",
                ),
                Rule::new(
                    &["schedule", "every morning", "daily", "cron"],
                    Trigger,
                    "Schedule",
                    "Scheduled trigger",
                ),
                Rule::new(
                    &["twitter", "x.com", "tweet", "mention"],
                    Trigger,
                    "Twitter",
                    "Twitter mentions",
                ),
                Rule::new(
                    &["webhook", "http", "api call"],
                    Trigger,
                    "Webhook",
                    "Webhook trigger",
                ),
                Rule::new(
                    &["slack", "message"],
                    Trigger,
                    "Slack",
                    "Slack message received",
                ),
            ],
            actions: vec![
                Rule::new(
                    &["save", "drive", "google drive"],
                    Action,
                    "Google Drive",
                    "Save to Drive",
                ),
                Rule::new(
                    &["sheets", "spreadsheet", "google sheets"],
                    Action,
                    "Google Sheets",
                    "Add to Google Sheets",
                ),
                Rule::new(&["weather"], Action, "Weather", "Fetch weather data"),
                Rule::new(
                    &["send email", "gmail send"],
                    Action,
                    "Gmail",
                    "Send email",
                ),
                Rule::new(
                    &["slack", "slack channel"],
                    Action,
                    "Slack",
                    "Send to Slack",
                ),
                Rule::new(
                    &["telegram"],
                    Notification,
                    "Telegram",
                    "Send Telegram message",
                ),
                Rule::new(
                    &["discord"],
                    Notification,
                    "Discord",
                    "Send Discord message",
                ),
                Rule::new(
                    &["notification", "alert"],
                    Notification,
                    "Notification",
                    "Send notification",
                ),
            ],
        }
    }

    /// Parses a rule set from JSON.
    ///
    /// Keywords are normalized to lowercase so that loaded rule sets behave
    /// like the built-in one under case-insensitive matching.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a rule has no usable
    /// keywords.
    pub fn from_json_str(json: &str) -> Result<Self, RulesetError> {
        let mut ruleset: Self =
            serde_json::from_str(json).map_err(|e| RulesetError::Parse {
                reason: e.to_string(),
            })?;
        ruleset.normalize()?;
        Ok(ruleset)
    }

    /// Loads a rule set from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are
    /// invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| RulesetError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    fn normalize(&mut self) -> Result<(), RulesetError> {
        for rule in self.triggers.iter_mut().chain(self.actions.iter_mut()) {
            if rule.keywords.is_empty() {
                return Err(RulesetError::InvalidRule {
                    label: rule.label.clone(),
                    reason: "rule has no keywords".to_string(),
                });
            }
            for keyword in &mut rule.keywords {
                *keyword = keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(RulesetError::InvalidRule {
                        label: rule.label.clone(),
                        reason: "rule has an empty keyword".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::builtin()
    }
}
