//! Processing activity records (the ROPA register).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Risk tier assigned to a processing activity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Minimal privacy impact.
    Low,
    /// Requires standard safeguards.
    Medium,
    /// Requires a full impact assessment before approval.
    High,
}

/// Workflow status of a processing activity record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessStatus {
    /// Being drafted by the owning department.
    Draft,
    /// Under privacy-office review.
    Review,
    /// Approved and part of the official register.
    Approved,
}

/// A record of one data-processing activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingActivity {
    /// Record identifier.
    pub id: String,
    /// Owning department.
    pub dept_id: String,
    /// Activity title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Categories of individuals whose data is processed.
    pub data_subjects: Vec<String>,
    /// Categories of personal data processed.
    pub data_categories: Vec<String>,
    /// Legal ground justifying the processing.
    pub lawful_basis: String,
    /// Recipients the data is disclosed to.
    pub recipients: Vec<String>,
    /// Free-text retention duration, e.g. "5 years after separation".
    pub retention_period: String,
    /// Workflow status.
    pub status: ProcessStatus,
    /// Assessed risk tier, if any.
    pub risk_level: Option<RiskLevel>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// The caller-supplied fields of an activity, before a record exists.
/// Used for both creation and wholesale update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDraft {
    /// Owning department.
    pub dept_id: String,
    /// Activity title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Categories of individuals whose data is processed.
    pub data_subjects: Vec<String>,
    /// Categories of personal data processed.
    pub data_categories: Vec<String>,
    /// Legal ground justifying the processing.
    pub lawful_basis: String,
    /// Recipients the data is disclosed to.
    pub recipients: Vec<String>,
    /// Free-text retention duration.
    pub retention_period: String,
}

/// The risk-relevant fields of an activity, as fed to assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentInput {
    /// Activity title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Categories of personal data.
    pub data_categories: Vec<String>,
    /// Categories of data subjects.
    pub data_subjects: Vec<String>,
    /// Free-text retention duration.
    pub retention_period: String,
    /// Recipients of the data.
    pub recipients: Vec<String>,
}

impl From<&ProcessingActivity> for AssessmentInput {
    fn from(activity: &ProcessingActivity) -> Self {
        Self {
            title: activity.title.clone(),
            description: activity.description.clone(),
            data_categories: activity.data_categories.clone(),
            data_subjects: activity.data_subjects.clone(),
            retention_period: activity.retention_period.clone(),
            recipients: activity.recipients.clone(),
        }
    }
}

impl From<&ActivityDraft> for AssessmentInput {
    fn from(draft: &ActivityDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            data_categories: draft.data_categories.clone(),
            data_subjects: draft.data_subjects.clone(),
            retention_period: draft.retention_period.clone(),
            recipients: draft.recipients.clone(),
        }
    }
}

/// Outcome of a risk assessment. Computed fresh on every create/update
/// whose risk-relevant fields changed and replaced wholesale, never
/// patched in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Assessed tier.
    pub risk_level: RiskLevel,
    /// Numeric score (rule-based range 1-11).
    pub score: u32,
    /// Human-readable reasoning.
    pub reasoning: String,
    /// Whether the advisory service produced this result.
    #[serde(rename = "isAI")]
    pub is_ai: bool,
    /// Advisory recommendations, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

/// Data subject categories offered by the record forms.
pub const DATA_SUBJECTS: &[&str] = &[
    "Employees",
    "Customers",
    "Consultants",
    "Contractors",
    "Visitors",
    "Leads",
    "Prospects",
    "Dependents",
    "Minors",
    "Patients",
    "Students",
];

/// Personal data categories offered by the record forms.
pub const DATA_CATEGORIES: &[&str] = &[
    "Personal Information",
    "Financial Information",
    "Employment Details",
    "Contact Information",
    "Biometric Data",
    "Location Data",
    "Health Information",
    "Purchase History",
    "Browsing Behavior",
    "Government IDs",
    "Academic Records",
    "Video Footage",
];

/// Lawful bases recognized by the governing data-protection law.
pub const LAWFUL_BASIS: &[&str] = &[
    "Consent",
    "Legal Obligation",
    "Legitimate Interest",
    "Contract",
    "Vital Interest",
    "Public Task",
];

/// Common recipient categories.
pub const RECIPIENTS: &[&str] = &[
    "Internal Staff",
    "Bank",
    "BIR",
    "SSS",
    "PhilHealth",
    "Pag-IBIG",
    "Email Service Provider",
    "Analytics Platform",
    "Security Agency",
    "Law Enforcement",
    "Third-Party Processor",
    "Cloud Provider",
    "Marketing Agency",
];
