//! Generated document envelope and report errors.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// A generated report, ready to hand to a download endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    /// Suggested file name.
    pub file_name: String,
    /// Always "application/pdf".
    pub mime_type: String,
    /// Base64-encoded document bytes.
    pub base64: String,
}

impl GeneratedDocument {
    /// Wrap rendered PDF bytes.
    pub fn pdf(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: "application/pdf".to_string(),
            base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Decode back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(&self.base64)
    }
}

/// Report generation failure. A partially built document is never
/// returned; the whole call fails with the underlying message attached.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error while writing document: {0}")]
    Io(#[from] std::io::Error),
}
