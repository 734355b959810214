//! `privgov consult`.

use crate::cli::print_json;
use crate::error::CliError;
use clap::Args;
use privgov_advisory::{AdvisoryApi, AdvisoryClient, AdvisoryConfig, AdvisoryError};

/// Canned guidance returned when the advisory service answers with an
/// error status.
const STATUS_FALLBACK: &str = "If consent is not practical, consider legitimate interests \
or legal obligation; document the purpose, data minimization, and retention period aligned \
with the data privacy law's requirements.";

/// Canned guidance returned when the advisory service is unreachable.
const NETWORK_FALLBACK: &str = "Start with a lawful basis (consent, contract, legal \
obligation, vital interests, or legitimate interests). Ensure purpose limitation, data \
minimization, and a clear retention period under the data privacy law.";

/// Ask the advisory service a free-text question. Never fails: when the
/// service is down the answer is generic fallback guidance, marked as such.
#[derive(Debug, Args)]
pub struct ConsultCommand {
    /// The question
    query: String,
}

impl ConsultCommand {
    pub async fn run(&self) -> Result<(), CliError> {
        let client = AdvisoryClient::with_config(AdvisoryConfig::from_env())?;

        let answer = match client.consult(&self.query).await {
            Ok(answer) if !answer.is_empty() => serde_json::json!({
                "answer": answer,
                "source": "Advisory",
            }),
            Ok(_) => serde_json::json!({
                "answer": "No response from advisory service",
                "source": "Advisory",
            }),
            Err(error @ AdvisoryError::Status { .. }) => {
                tracing::warn!(%error, "advisory consult failed, returning canned guidance");
                serde_json::json!({
                    "answer": STATUS_FALLBACK,
                    "source": "RuleBased",
                    "error": error.to_string(),
                })
            }
            Err(error) => {
                tracing::warn!(%error, "advisory unreachable, returning canned guidance");
                serde_json::json!({
                    "answer": NETWORK_FALLBACK,
                    "source": "RuleBased",
                    "error": error.to_string(),
                })
            }
        };

        print_json(&answer)
    }
}
