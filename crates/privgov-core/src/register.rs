//! PIA risk register entries.

use serde::{Deserialize, Serialize};

/// Likelihood/impact rating used inside the PIA risk register.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
pub enum RiskRating {
    Low,
    Medium,
    High,
}

impl RiskRating {
    fn weight(self) -> u8 {
        match self {
            RiskRating::Low => 1,
            RiskRating::Medium => 2,
            RiskRating::High => 3,
        }
    }

    /// Combine likelihood and impact into the overall rating.
    pub fn combine(likelihood: RiskRating, impact: RiskRating) -> RiskRating {
        match likelihood.weight() + impact.weight() {
            total if total >= 5 => RiskRating::High,
            total if total >= 3 => RiskRating::Medium,
            _ => RiskRating::Low,
        }
    }
}

impl Default for RiskRating {
    fn default() -> Self {
        RiskRating::Medium
    }
}

/// One identified privacy risk inside a PIA.
///
/// `overall` is denormalized state: it is recomputed from `likelihood` and
/// `impact` whenever either changes and is never edited independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRegisterEntry {
    /// Entry identifier.
    pub id: String,
    /// Risk title.
    pub title: String,
    /// Where and how the risk arises.
    #[serde(default)]
    pub context: String,
    /// Likelihood of occurrence.
    #[serde(default)]
    pub likelihood: RiskRating,
    /// Impact on data subjects if it occurs.
    #[serde(default)]
    pub impact: RiskRating,
    /// Derived overall rating. Not authoritative; use [`Self::overall`].
    #[serde(default)]
    pub overall: RiskRating,
    /// Controls already in place.
    #[serde(default)]
    pub existing_controls: String,
    /// Additional controls recommended.
    #[serde(default)]
    pub recommended_controls: String,
    /// Who owns the mitigation.
    #[serde(default)]
    pub responsibility: String,
    /// Target date for the mitigation.
    #[serde(default)]
    pub target_date: String,
}

impl RiskRegisterEntry {
    /// The overall rating, derived on read so a stale stored value can
    /// never leak into reports.
    pub fn overall(&self) -> RiskRating {
        RiskRating::combine(self.likelihood, self.impact)
    }

    /// Set likelihood, recomputing the denormalized overall field.
    pub fn set_likelihood(&mut self, likelihood: RiskRating) {
        self.likelihood = likelihood;
        self.overall = self.overall();
    }

    /// Set impact, recomputing the denormalized overall field.
    pub fn set_impact(&mut self, impact: RiskRating) {
        self.impact = impact;
        self.overall = self.overall();
    }
}
