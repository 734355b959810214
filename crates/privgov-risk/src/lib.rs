//! Risk assessment engine.
//!
//! Assessment tries the advisory service first and falls back to
//! deterministic rule-based scoring on any failure. It never returns an
//! error to its caller: an unscored activity is worse than a mis-scored
//! one, since the risk tier gates downstream compliance workflows.

pub mod assessor;
pub mod scorer;
pub mod status;

pub use assessor::{conservative_default, rule_based, RiskAssessor};
pub use scorer::{rule_based_score, score_to_risk_level, ScoreBreakdown, SENSITIVE_CATEGORIES};
pub use status::AdvisoryStatus;
