//! Remote extraction service client
//!
//! Office formats and scanned PDFs are extracted by an external service
//! (format-specific parsers and an OCR pipeline) reached over HTTP. This
//! module only owns the wire call; recognition quality is the service's
//! problem.
//!
//! # Examples
//!
//! ```no_run
//! use docqa_extract::RemoteExtractor;
//!
//! let extractor = RemoteExtractor::new("http://localhost:8070");
//! // extract_async is the primary entry point; the TextExtractor impl
//! // wraps it for synchronous callers.
//! ```

use crate::ExtractError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use docqa_domain::traits::TextExtractor as TextExtractorTrait;
use docqa_domain::FileKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default extraction service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8070";

/// Default timeout for extraction requests (120 seconds; OCR is slow)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// HTTP client for the remote extraction service
pub struct RemoteExtractor {
    endpoint: String,
    client: reqwest::Client,
}

/// Request body for the extraction API
#[derive(Serialize)]
struct ExtractRequest {
    kind: String,
    data: String,
}

/// Response from the extraction API
#[derive(Deserialize)]
struct ExtractResponse {
    pages: Vec<String>,
}

/// Error body the service returns on extraction failure
#[derive(Deserialize)]
struct ExtractErrorBody {
    error: String,
}

impl RemoteExtractor {
    /// Create a client for the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Extract per-page text from file bytes of the declared kind
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Unsupported`] if the service has no handler for the kind
    /// - [`ExtractError::Failed`] if the service could not extract text
    /// - [`ExtractError::Communication`] on network failures
    /// - [`ExtractError::InvalidResponse`] on malformed responses
    pub async fn extract_async(
        &self,
        bytes: &[u8],
        kind: FileKind,
    ) -> Result<Vec<String>, ExtractError> {
        let url = format!("{}/v1/extract", self.endpoint);

        let request_body = ExtractRequest {
            kind: kind.to_string(),
            data: BASE64.encode(bytes),
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ExtractError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let body: ExtractResponse = response
                .json()
                .await
                .map_err(|e| ExtractError::InvalidResponse(format!("Bad body: {}", e)))?;
            return Ok(body.pages);
        }

        if status == reqwest::StatusCode::UNSUPPORTED_MEDIA_TYPE {
            return Err(ExtractError::Unsupported(kind.to_string()));
        }

        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            let reason = response
                .json::<ExtractErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| "extraction rejected".to_string());
            return Err(ExtractError::Failed(reason));
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ExtractError::Communication(format!(
            "HTTP {}: {}",
            status, error_text
        )))
    }
}

impl TextExtractorTrait for RemoteExtractor {
    type Error = ExtractError;

    fn extract(&self, bytes: &[u8], kind: FileKind) -> Result<Vec<String>, Self::Error> {
        // Blocking wrapper for async function
        tokio::runtime::Runtime::new()
            .map_err(|e| ExtractError::Communication(e.to_string()))?
            .block_on(async { self.extract_async(bytes, kind).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_extractor_creation() {
        let extractor = RemoteExtractor::new("http://localhost:8070");
        assert_eq!(extractor.endpoint(), "http://localhost:8070");
    }

    #[tokio::test]
    async fn test_remote_error_on_unreachable_endpoint() {
        let extractor =
            RemoteExtractor::with_timeout("http://127.0.0.1:1", Duration::from_millis(200));

        let result = extractor.extract_async(b"%PDF-1.4", FileKind::Pdf).await;
        assert!(matches!(result, Err(ExtractError::Communication(_))));
    }
}
