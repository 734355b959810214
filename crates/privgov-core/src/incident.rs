//! Breach incident records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a breach incident.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Handling status of a breach incident.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    /// Newly reported, not yet triaged.
    Open,
    /// Being investigated or contained.
    InProgress,
    /// Closed with resolution notes.
    Resolved,
}

/// A personal-data breach incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    /// Record identifier.
    pub id: String,
    /// Owning organization.
    pub org_id: String,
    /// Incident title.
    pub title: String,
    /// When the breach occurred.
    pub occurrence_date: DateTime<Utc>,
    /// Assessed severity.
    pub severity: IncidentSeverity,
    /// Estimated number of affected individuals.
    pub impacted_individuals: Option<u32>,
    /// Systems involved in the breach.
    pub systems_affected: Option<String>,
    /// Free-text summary.
    pub summary: Option<String>,
    /// Handling status.
    pub status: IncidentStatus,
    /// Person assigned to handle the incident.
    pub assigned_to: Option<String>,
    /// Whether the regulator has been notified.
    pub regulator_notified: bool,
    /// When the regulator was notified.
    pub regulator_notification_date: Option<DateTime<Utc>>,
    /// Notes recorded at resolution.
    pub resolution_notes: Option<String>,
    /// When the incident was resolved.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
