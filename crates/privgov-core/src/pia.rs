//! Privacy Impact Assessment records.

use crate::register::RiskRegisterEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Workflow status of a PIA.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PiaStatus {
    Draft,
    Review,
    Approved,
}

/// A Privacy Impact Assessment record.
///
/// The questionnaire answers are stored as a free-form key/value map keyed
/// by question id; the risk register lives inside the answer set as
/// serialized JSON text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiaAssessment {
    /// Record identifier.
    pub id: String,
    /// Owning organization.
    pub org_id: String,
    /// Title of the assessed system or process.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// System owner.
    pub owner: Option<String>,
    /// Workflow status.
    pub status: PiaStatus,
    /// Questionnaire answers keyed by question id.
    pub answers: BTreeMap<String, Value>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl PiaAssessment {
    /// Render one answer for display. Lists join with ", "; missing or
    /// empty answers render as "N/A".
    pub fn answer(&self, key: &str) -> String {
        format_answer(self.answers.get(key))
    }

    /// Parse the risk register embedded in the answer set. Malformed or
    /// absent JSON yields an empty register rather than an error.
    pub fn risk_register(&self) -> Vec<RiskRegisterEntry> {
        let raw = match self.answers.get("risk_register") {
            Some(Value::String(s)) => s.as_str(),
            _ => return Vec::new(),
        };
        serde_json::from_str(raw).unwrap_or_default()
    }
}

/// Format a questionnaire answer for display.
pub fn format_answer(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            if joined.is_empty() {
                "N/A".to_string()
            } else {
                joined
            }
        }
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Null) | Some(Value::String(_)) | None => "N/A".to_string(),
        Some(other) => other.to_string(),
    }
}
