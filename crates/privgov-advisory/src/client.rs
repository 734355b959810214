//! Advisory service HTTP client.

use crate::parse::{parse_risk_analysis, RiskAnalysis};
use async_trait::async_trait;
use privgov_core::AssessmentInput;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;

/// Advisory client configuration.
#[derive(Debug, Clone)]
pub struct AdvisoryConfig {
    /// Base URL of the advisory API.
    pub base_url: String,
    /// Whether advisory consultation is attempted at all.
    pub enabled: bool,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Wall-clock budget for a direct consultation.
    pub consult_timeout: Duration,
    /// Wall-clock budget for a structured risk analysis.
    pub analysis_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://advisory.privgov.dev/api".to_string(),
            enabled: true,
            connect_timeout: Duration::from_secs(10),
            consult_timeout: Duration::from_secs(12),
            analysis_timeout: Duration::from_secs(10),
            user_agent: format!("privgov/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AdvisoryConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PRIVGOV_ADVISORY_URL") {
            config.base_url = url;
        }
        if let Ok(enabled) = std::env::var("PRIVGOV_ADVISORY_ENABLED") {
            config.enabled = enabled.to_lowercase() != "false";
        }

        config
    }
}

/// Advisory call errors. All of these are the "service unavailable"
/// condition from the caller's point of view: expected, transient, and
/// handled by falling back to rule-based scoring.
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("failed to build advisory HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("advisory request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("advisory request timed out")]
    Timeout,

    #[error("advisory service error: {status}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for AdvisoryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AdvisoryError::Timeout
        } else {
            AdvisoryError::Request(e)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConsultResponse {
    answer: Option<String>,
    response: Option<String>,
}

impl ConsultResponse {
    /// `answer` is the preferred field; older deployments use `response`.
    fn into_answer(self) -> String {
        self.answer.or(self.response).unwrap_or_default()
    }
}

/// Boundary seam for advisory consultation, so the assessment
/// orchestrator can be exercised against scripted services.
#[async_trait]
pub trait AdvisoryApi: Send + Sync {
    /// Ask a free-text question, returning the answer text.
    async fn consult(&self, query: &str) -> Result<String, AdvisoryError>;

    /// Request a structured risk analysis for a processing activity.
    ///
    /// `Ok(None)` means the service answered but no well-formed verdict
    /// was embedded. That is a soft failure, distinct from the service
    /// being unreachable.
    async fn analyze_risk(
        &self,
        input: &AssessmentInput,
    ) -> Result<Option<RiskAnalysis>, AdvisoryError>;
}

/// HTTP client for the advisory service.
pub struct AdvisoryClient {
    http: reqwest::Client,
    config: AdvisoryConfig,
}

impl AdvisoryClient {
    /// Create a client with default config.
    pub fn new() -> Result<Self, AdvisoryError> {
        Self::with_config(AdvisoryConfig::default())
    }

    /// Create a client with custom config.
    pub fn with_config(config: AdvisoryConfig) -> Result<Self, AdvisoryError> {
        let http = reqwest::ClientBuilder::new()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(AdvisoryError::ClientBuild)?;
        Ok(Self { http, config })
    }

    /// Whether consultation is enabled by configuration.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    async fn post_consult(
        &self,
        query: &str,
        budget: Duration,
    ) -> Result<String, AdvisoryError> {
        let url = format!("{}/consult", self.config.base_url);
        tracing::debug!("Consulting advisory service: {}", url);

        // The budget covers the whole exchange, body read included. A
        // server that returns headers and then stalls the body must not
        // leave the caller pending.
        let exchange = async {
            let response = self
                .http
                .post(&url)
                .json(&serde_json::json!({ "query": query }))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AdvisoryError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: ConsultResponse = response.json().await?;
            Ok(parsed.into_answer())
        };

        match timeout(budget, exchange).await {
            Ok(result) => result,
            Err(_) => Err(AdvisoryError::Timeout),
        }
    }
}

#[async_trait]
impl AdvisoryApi for AdvisoryClient {
    async fn consult(&self, query: &str) -> Result<String, AdvisoryError> {
        self.post_consult(query, self.config.consult_timeout).await
    }

    async fn analyze_risk(
        &self,
        input: &AssessmentInput,
    ) -> Result<Option<RiskAnalysis>, AdvisoryError> {
        if !self.config.enabled {
            tracing::debug!("Advisory consultation disabled by config");
            return Ok(None);
        }

        let prompt = build_risk_prompt(input);
        let answer = self
            .post_consult(&prompt, self.config.analysis_timeout)
            .await?;

        Ok(parse_risk_analysis(&answer))
    }
}

/// Build the structured risk-analysis prompt for one activity.
pub fn build_risk_prompt(input: &AssessmentInput) -> String {
    format!(
        "As a Data Protection Officer expert, analyze this data processing activity \
under the national data privacy law and provide risk assessment.\n\n\
Process Title: {title}\n\
Description: {description}\n\
Data Categories: {categories}\n\
Data Subjects: {subjects}\n\n\
Provide:\n\
1. Risk Level (LOW/MEDIUM/HIGH)\n\
2. Key compliance requirements\n\
3. Data protection recommendations\n\
4. Retention period guidance\n\n\
Format as JSON:\n\
{{\n\
  \"riskLevel\": \"LOW|MEDIUM|HIGH\",\n\
  \"reasoning\": \"brief explanation\",\n\
  \"requirements\": [\"req 1\", \"req 2\"],\n\
  \"recommendations\": [\"rec 1\", \"rec 2\"]\n\
}}",
        title = input.title,
        description = input.description.as_deref().unwrap_or("No description provided"),
        categories = input.data_categories.join(", "),
        subjects = input.data_subjects.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> AssessmentInput {
        AssessmentInput {
            title: "CCTV Surveillance".to_string(),
            description: None,
            data_categories: vec!["Biometric Data".to_string(), "Video Footage".to_string()],
            data_subjects: vec!["Employees".to_string(), "Visitors".to_string()],
            retention_period: "30 days".to_string(),
            recipients: vec!["Security Agency".to_string()],
        }
    }

    #[test]
    fn test_default_config() {
        let config = AdvisoryConfig::default();
        assert!(config.enabled);
        assert_eq!(config.consult_timeout, Duration::from_secs(12));
        assert_eq!(config.analysis_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("privgov/"));
    }

    #[test]
    fn test_client_creation() {
        assert!(AdvisoryClient::new().is_ok());
    }

    #[test]
    fn test_risk_prompt_embeds_activity_fields() {
        let prompt = build_risk_prompt(&sample_input());
        assert!(prompt.contains("Process Title: CCTV Surveillance"));
        assert!(prompt.contains("Description: No description provided"));
        assert!(prompt.contains("Biometric Data, Video Footage"));
        assert!(prompt.contains("Employees, Visitors"));
        assert!(prompt.contains("\"riskLevel\": \"LOW|MEDIUM|HIGH\""));
    }

    #[test]
    fn test_consult_response_prefers_answer() {
        let both = ConsultResponse {
            answer: Some("from answer".to_string()),
            response: Some("from response".to_string()),
        };
        assert_eq!(both.into_answer(), "from answer");

        let only_response = ConsultResponse {
            answer: None,
            response: Some("from response".to_string()),
        };
        assert_eq!(only_response.into_answer(), "from response");

        let neither = ConsultResponse {
            answer: None,
            response: None,
        };
        assert_eq!(neither.into_answer(), "");
    }

    #[tokio::test]
    async fn test_stalled_body_read_hits_timeout() {
        use tokio::io::AsyncWriteExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Send 200 headers and a partial body, then hold the connection
        // open without ever finishing it.
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\n{\"answer\": \"par")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let config = AdvisoryConfig {
            base_url: format!("http://{addr}"),
            consult_timeout: Duration::from_millis(200),
            ..AdvisoryConfig::default()
        };
        let client = AdvisoryClient::with_config(config).unwrap();

        let result =
            tokio::time::timeout(Duration::from_secs(2), client.consult("test query")).await;
        let outcome = result.expect("consult must resolve within its configured budget");
        assert!(matches!(outcome, Err(AdvisoryError::Timeout)));

        server.abort();
    }

    #[tokio::test]
    async fn test_unreachable_service_is_error_not_panic() {
        let config = AdvisoryConfig {
            base_url: "http://127.0.0.1:1/api".to_string(),
            consult_timeout: Duration::from_millis(500),
            connect_timeout: Duration::from_millis(200),
            ..AdvisoryConfig::default()
        };
        let client = AdvisoryClient::with_config(config).unwrap();
        let result = client.consult("test query").await;
        assert!(result.is_err());
    }
}
