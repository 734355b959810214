//! Client for the external legal-advisory consultation service.
//!
//! The advisory service answers free-text privacy-law questions and, for
//! risk analysis, may embed a structured JSON verdict anywhere in its
//! answer. Every failure here is expected and non-fatal: callers degrade
//! to rule-based scoring.

pub mod client;
pub mod parse;

pub use client::{AdvisoryApi, AdvisoryClient, AdvisoryConfig, AdvisoryError};
pub use parse::{extract_embedded_json, parse_risk_analysis, RiskAnalysis};
