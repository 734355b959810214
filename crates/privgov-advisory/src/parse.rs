//! Soft-fail parsing of structured verdicts embedded in free text.

use privgov_core::RiskLevel;
use serde::{Deserialize, Serialize};

/// Structured risk verdict the advisory service may embed in an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    /// Assessed tier.
    pub risk_level: RiskLevel,
    /// Brief explanation.
    pub reasoning: String,
    /// Compliance requirements.
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Data-protection recommendations.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Locate the first balanced `{...}` substring in free text.
///
/// The answer format is not a strict contract; a JSON object may appear
/// anywhere, surrounded by prose. Brace tracking skips braces inside JSON
/// string literals so prose like `"{see} below"` cannot truncate the match.
pub fn extract_embedded_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse the risk verdict out of an advisory answer, if one is present
/// and well formed. Anything else is a soft failure, not an error.
pub fn parse_risk_analysis(answer: &str) -> Option<RiskAnalysis> {
    let candidate = extract_embedded_json(answer)?;
    serde_json::from_str(candidate).ok()
}
