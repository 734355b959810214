//! Assessment orchestration: advisory first, rule-based fallback.

use crate::scorer::{rule_based_score, score_to_risk_level};
use crate::status::AdvisoryStatus;
use futures_util::FutureExt;
use privgov_advisory::{AdvisoryApi, RiskAnalysis};
use privgov_core::{AssessmentInput, RiskAssessment, RiskLevel};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Risk assessment orchestrator.
///
/// Owns the advisory circuit breaker and guarantees that assessment never
/// fails: every path resolves to a [`RiskAssessment`], in the worst case
/// the conservative medium default.
pub struct RiskAssessor<A> {
    advisory: A,
    status: Arc<AdvisoryStatus>,
}

impl<A: AdvisoryApi> RiskAssessor<A> {
    /// Create an assessor with a fresh circuit.
    pub fn new(advisory: A) -> Self {
        Self::with_status(advisory, Arc::new(AdvisoryStatus::new()))
    }

    /// Create an assessor sharing an existing circuit.
    pub fn with_status(advisory: A, status: Arc<AdvisoryStatus>) -> Self {
        Self { advisory, status }
    }

    /// The shared circuit, for status reporting and operator reset.
    pub fn status(&self) -> &Arc<AdvisoryStatus> {
        &self.status
    }

    /// Assess one activity. Infallible by design.
    pub async fn assess(&self, input: &AssessmentInput) -> RiskAssessment {
        match AssertUnwindSafe(self.assess_inner(input)).catch_unwind().await {
            Ok(assessment) => assessment,
            Err(_) => {
                tracing::error!(
                    title = %input.title,
                    "risk assessment panicked; returning conservative default"
                );
                conservative_default()
            }
        }
    }

    async fn assess_inner(&self, input: &AssessmentInput) -> RiskAssessment {
        if self.status.is_available() {
            match self.advisory.analyze_risk(input).await {
                Ok(Some(analysis)) => {
                    tracing::debug!(title = %input.title, "advisory verdict accepted");
                    return from_analysis(analysis);
                }
                Ok(None) => {
                    // The service answered but without a usable verdict.
                    // A one-off parse failure, not an outage: keep the
                    // circuit closed.
                    tracing::debug!(
                        title = %input.title,
                        "advisory answer had no parseable verdict, using rule-based scoring"
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        %error,
                        "advisory service unavailable, switching to rule-based scoring"
                    );
                    self.status.mark_unavailable();
                }
            }
        }

        rule_based(input)
    }
}

/// Build an assessment from an advisory verdict.
fn from_analysis(analysis: RiskAnalysis) -> RiskAssessment {
    let score = match analysis.risk_level {
        RiskLevel::High => 8,
        RiskLevel::Medium => 4,
        RiskLevel::Low => 1,
    };
    RiskAssessment {
        risk_level: analysis.risk_level,
        score,
        reasoning: analysis.reasoning,
        is_ai: true,
        recommendations: if analysis.recommendations.is_empty() {
            None
        } else {
            Some(analysis.recommendations)
        },
    }
}

/// Pure rule-based assessment. Always succeeds.
pub fn rule_based(input: &AssessmentInput) -> RiskAssessment {
    let breakdown = rule_based_score(
        &input.data_categories,
        &input.data_subjects,
        &input.retention_period,
        &input.recipients,
    );
    let score = breakdown.total();
    RiskAssessment {
        risk_level: score_to_risk_level(score),
        score,
        reasoning: breakdown.summary(),
        is_ai: false,
        recommendations: None,
    }
}

/// Last-resort assessment when everything else misbehaves. A conservative
/// medium keeps the activity in the review workflow instead of leaving it
/// unscored.
pub fn conservative_default() -> RiskAssessment {
    RiskAssessment {
        risk_level: RiskLevel::Medium,
        score: 4,
        reasoning: "Default medium risk assessment".to_string(),
        is_ai: false,
        recommendations: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use privgov_advisory::AdvisoryError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cctv_input() -> AssessmentInput {
        AssessmentInput {
            title: "CCTV Surveillance".to_string(),
            description: Some("Security monitoring of office premises".to_string()),
            data_categories: vec![
                "Biometric Data".to_string(),
                "Location Data".to_string(),
                "Video Footage".to_string(),
            ],
            data_subjects: vec![
                "Employees".to_string(),
                "Visitors".to_string(),
                "Contractors".to_string(),
            ],
            retention_period: "30 days".to_string(),
            recipients: vec!["Security Agency".to_string(), "Law Enforcement".to_string()],
        }
    }

    /// Scripted advisory double counting how often it is attempted.
    struct ScriptedAdvisory {
        attempts: AtomicUsize,
        behavior: Behavior,
    }

    enum Behavior {
        Verdict(&'static str),
        NoVerdict,
        Unreachable,
        Panic,
    }

    impl ScriptedAdvisory {
        fn new(behavior: Behavior) -> Self {
            Self {
                attempts: AtomicUsize::new(0),
                behavior,
            }
        }

        fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AdvisoryApi for ScriptedAdvisory {
        async fn consult(&self, _query: &str) -> Result<String, AdvisoryError> {
            Err(AdvisoryError::Timeout)
        }

        async fn analyze_risk(
            &self,
            _input: &AssessmentInput,
        ) -> Result<Option<RiskAnalysis>, AdvisoryError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Verdict(json) => Ok(Some(serde_json::from_str(json).unwrap())),
                Behavior::NoVerdict => Ok(None),
                Behavior::Unreachable => Err(AdvisoryError::Timeout),
                Behavior::Panic => panic!("scripted failure"),
            }
        }
    }

    #[tokio::test]
    async fn test_advisory_verdict_wins() {
        let assessor = RiskAssessor::new(ScriptedAdvisory::new(Behavior::Verdict(
            r#"{"riskLevel":"HIGH","reasoning":"biometric surveillance","recommendations":["limit retention"]}"#,
        )));
        let result = assessor.assess(&cctv_input()).await;
        assert!(result.is_ai);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.score, 8);
        assert_eq!(result.reasoning, "biometric surveillance");
        assert_eq!(
            result.recommendations.as_deref(),
            Some(&["limit retention".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_outage_flips_circuit_and_falls_back() {
        let advisory = ScriptedAdvisory::new(Behavior::Unreachable);
        let assessor = RiskAssessor::new(advisory);

        let result = assessor.assess(&cctv_input()).await;
        assert!(!result.is_ai);
        assert!(!result.reasoning.is_empty());
        assert_eq!(result.score, 7);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(!assessor.status().is_available());

        // Circuit open: the second assessment never touches the service.
        let _ = assessor.assess(&cctv_input()).await;
        assert_eq!(assessor.advisory.attempts(), 1);

        // Operator reset re-opens the path.
        assessor.status().reset();
        let _ = assessor.assess(&cctv_input()).await;
        assert_eq!(assessor.advisory.attempts(), 2);
    }

    #[tokio::test]
    async fn test_malformed_answer_does_not_flip_circuit() {
        let assessor = RiskAssessor::new(ScriptedAdvisory::new(Behavior::NoVerdict));

        let result = assessor.assess(&cctv_input()).await;
        assert!(!result.is_ai);
        assert!(assessor.status().is_available());

        // Still attempted on the next call.
        let _ = assessor.assess(&cctv_input()).await;
        assert_eq!(assessor.advisory.attempts(), 2);
    }

    #[tokio::test]
    async fn test_panic_resolves_to_conservative_default() {
        let assessor = RiskAssessor::new(ScriptedAdvisory::new(Behavior::Panic));
        let result = assessor.assess(&cctv_input()).await;
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.score, 4);
        assert_eq!(result.reasoning, "Default medium risk assessment");
        assert!(!result.is_ai);
    }

    #[tokio::test]
    async fn test_rule_based_reasoning_names_factors() {
        let result = rule_based(&cctv_input());
        assert!(result.reasoning.starts_with("Rule-based assessment:"));
        assert!(result.reasoning.contains("total=7"));
        assert!(result.recommendations.is_none());
    }
}
