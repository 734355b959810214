//! Domain types for privacy-governance record keeping.
//!
//! Records of processing activities (ROPA), privacy impact assessments
//! (PIA), breach incidents, and the organizations and departments that
//! own them.

pub mod activity;
pub mod incident;
pub mod org;
pub mod pia;
pub mod register;
pub mod validate;

pub use activity::{
    ActivityDraft, AssessmentInput, ProcessStatus, ProcessingActivity, RiskAssessment, RiskLevel,
};
pub use incident::{Incident, IncidentSeverity, IncidentStatus};
pub use org::{Department, Organization};
pub use pia::{PiaAssessment, PiaStatus};
pub use register::{RiskRating, RiskRegisterEntry};
pub use validate::ValidationError;
