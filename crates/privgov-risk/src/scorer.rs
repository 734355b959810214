//! Deterministic rule-based risk scoring.

use privgov_core::RiskLevel;

/// Category labels treated as sensitive. Matching is by substring against
/// the activity's category labels.
pub const SENSITIVE_CATEGORIES: &[&str] = &[
    "Biometric Data",
    "Health Information",
    "Financial Information",
    "Government IDs",
];

/// Per-factor score breakdown. Each factor is independent and capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// 3 if any category is sensitive, else 1. Never 0.
    pub data_sensitivity: u32,
    /// 2 if >=5 categories, 1 if >=3, else 0.
    pub categories_count: u32,
    /// 2 if >=4 subjects, 1 if >=2, else 0.
    pub subjects_count: u32,
    /// 2 if the leading integer is >5, 1 if >1, else 0.
    pub retention_period: u32,
    /// 2 if >=5 recipients, 1 if >=3, else 0.
    pub recipients: u32,
}

impl ScoreBreakdown {
    /// Sum of all factors.
    pub fn total(&self) -> u32 {
        self.data_sensitivity
            + self.categories_count
            + self.subjects_count
            + self.retention_period
            + self.recipients
    }

    /// Reasoning line presented to the privacy office.
    pub fn summary(&self) -> String {
        format!(
            "Rule-based assessment: dataSensitivity={}, categoriesCount={}, subjectsCount={}, \
retentionPeriod={}, recipients={} (total={})",
            self.data_sensitivity,
            self.categories_count,
            self.subjects_count,
            self.retention_period,
            self.recipients,
            self.total()
        )
    }
}

/// Score a processing activity from its risk-relevant attributes.
pub fn rule_based_score(
    data_categories: &[String],
    data_subjects: &[String],
    retention_period: &str,
    recipients: &[String],
) -> ScoreBreakdown {
    let has_sensitive = data_categories
        .iter()
        .any(|cat| SENSITIVE_CATEGORIES.iter().any(|s| cat.contains(s)));

    let retention_years = leading_integer(retention_period).unwrap_or(0);

    ScoreBreakdown {
        data_sensitivity: if has_sensitive { 3 } else { 1 },
        categories_count: count_factor(data_categories.len(), 5, 3),
        subjects_count: count_factor(data_subjects.len(), 4, 2),
        retention_period: if retention_years > 5 {
            2
        } else if retention_years > 1 {
            1
        } else {
            0
        },
        recipients: count_factor(recipients.len(), 5, 3),
    }
}

fn count_factor(count: usize, high: usize, low: usize) -> u32 {
    if count >= high {
        2
    } else if count >= low {
        1
    } else {
        0
    }
}

/// Extract the first integer token from free text.
///
/// The retention period is an uncontrolled string; the number is read as
/// years without validating the unit ("30 days" scores as 30 years). This
/// literal extraction is deliberate and must not be silently "fixed".
fn leading_integer(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    // A run longer than u64 still means "a very long retention".
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Map a score to its risk tier. Pure and user-visible; the boundaries
/// feed compliance reporting and must stay exact.
pub fn score_to_risk_level(score: u32) -> RiskLevel {
    if score <= 2 {
        RiskLevel::Low
    } else if score <= 6 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(score_to_risk_level(2), RiskLevel::Low);
        assert_eq!(score_to_risk_level(3), RiskLevel::Medium);
        assert_eq!(score_to_risk_level(6), RiskLevel::Medium);
        assert_eq!(score_to_risk_level(7), RiskLevel::High);
    }

    #[test]
    fn test_sensitivity_floor_is_one() {
        let sensitive = rule_based_score(&labels(&["Biometric Data"]), &[], "", &[]);
        assert_eq!(sensitive.data_sensitivity, 3);

        let benign = rule_based_score(&labels(&["Purchase History"]), &[], "", &[]);
        assert_eq!(benign.data_sensitivity, 1);
    }

    #[test]
    fn test_sensitivity_substring_match() {
        let padded = rule_based_score(
            &labels(&["Employee Health Information (clinic)"]),
            &[],
            "",
            &[],
        );
        assert_eq!(padded.data_sensitivity, 3);
    }

    #[test]
    fn test_retention_parsing() {
        let five = rule_based_score(&[], &[], "5 years after separation", &[]);
        assert_eq!(five.retention_period, 1);

        let ten = rule_based_score(&[], &[], "10 years", &[]);
        assert_eq!(ten.retention_period, 2);

        let none = rule_based_score(&[], &[], "no retention specified", &[]);
        assert_eq!(none.retention_period, 0);

        let one = rule_based_score(&[], &[], "1 year", &[]);
        assert_eq!(one.retention_period, 0);
    }

    #[test]
    fn test_retention_unit_not_validated() {
        // "30 days" reads as 30, scored as >5 years. Known ambiguity kept
        // on purpose.
        let days = rule_based_score(&[], &[], "30 days", &[]);
        assert_eq!(days.retention_period, 2);
    }

    #[test]
    fn test_breadth_factors() {
        let breakdown = rule_based_score(
            &labels(&["A", "B", "C", "D", "E"]),
            &labels(&["Employees", "Visitors"]),
            "",
            &labels(&["X", "Y", "Z"]),
        );
        assert_eq!(breakdown.categories_count, 2);
        assert_eq!(breakdown.subjects_count, 1);
        assert_eq!(breakdown.recipients, 1);
    }

    #[test]
    fn test_cctv_scenario() {
        let breakdown = rule_based_score(
            &labels(&["Biometric Data", "Location Data", "Video Footage"]),
            &labels(&["Employees", "Visitors", "Contractors"]),
            "30 days",
            &labels(&["Security Agency", "Law Enforcement"]),
        );
        assert_eq!(breakdown.data_sensitivity, 3);
        assert_eq!(breakdown.categories_count, 1);
        assert_eq!(breakdown.subjects_count, 1);
        assert_eq!(breakdown.retention_period, 2);
        assert_eq!(breakdown.recipients, 0);
        assert_eq!(breakdown.total(), 7);
        assert_eq!(score_to_risk_level(breakdown.total()), RiskLevel::High);

        // Same inputs, same tier, every time.
        for _ in 0..10 {
            let again = rule_based_score(
                &labels(&["Biometric Data", "Location Data", "Video Footage"]),
                &labels(&["Employees", "Visitors", "Contractors"]),
                "30 days",
                &labels(&["Security Agency", "Law Enforcement"]),
            );
            assert_eq!(again, breakdown);
        }
    }

    #[test]
    fn test_summary_format() {
        let breakdown = rule_based_score(
            &labels(&["Biometric Data", "Location Data", "Video Footage"]),
            &labels(&["Employees", "Visitors", "Contractors"]),
            "30 days",
            &labels(&["Security Agency"]),
        );
        assert_eq!(
            breakdown.summary(),
            "Rule-based assessment: dataSensitivity=3, categoriesCount=1, subjectsCount=1, \
retentionPeriod=2, recipients=0 (total=7)"
        );
    }

    proptest! {
        #[test]
        fn prop_score_in_range(
            categories in proptest::collection::vec("[A-Za-z ]{1,30}", 0..10),
            subjects in proptest::collection::vec("[A-Za-z ]{1,20}", 0..10),
            retention in "[A-Za-z0-9 ]{0,40}",
            recipients in proptest::collection::vec("[A-Za-z ]{1,20}", 0..10),
        ) {
            let total = rule_based_score(&categories, &subjects, &retention, &recipients).total();
            prop_assert!((1..=11).contains(&total));
        }

        #[test]
        fn prop_tier_monotonic(a in 0u32..20, b in 0u32..20) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(score_to_risk_level(lo) <= score_to_risk_level(hi));
        }
    }
}
