//! Addon client error types
//!
//! Common error enum and response utilities for the addon protocol client.

use thiserror::Error;

/// Maximum response body size for addon HTTP calls (8 MB).
/// Prevents OOM from malicious or misconfigured addons.
pub const MAX_RESPONSE_SIZE: usize = 8 * 1024 * 1024;

/// Error type for the addon HTTP client.
#[derive(Debug, Error)]
pub enum AddonError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Invalid addon locator: {0}")]
    InvalidLocator(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },
}

/// Read a response body with size limit and deserialize as JSON.
///
/// Checks `Content-Length` hint first (if available), then enforces the
/// limit on the actual body bytes before deserializing.
pub async fn json_with_limit<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AddonError> {
    if let Some(cl) = response.content_length() {
        if cl as usize > MAX_RESPONSE_SIZE {
            return Err(AddonError::ResponseTooLarge { size: cl });
        }
    }
    let bytes = response.bytes().await?;
    if bytes.len() > MAX_RESPONSE_SIZE {
        return Err(AddonError::ResponseTooLarge { size: bytes.len() as u64 });
    }
    serde_json::from_slice(&bytes).map_err(Into::into)
}

/// Check HTTP response status before processing body.
pub fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AddonError> {
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(AddonError::Http {
            status,
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

impl From<reqwest::Error> for AddonError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AddonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_network() {
        let err = AddonError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_display_http() {
        let err = AddonError::Http {
            status: reqwest::StatusCode::NOT_FOUND,
            url: "https://addon.example/catalog/movie/top.json".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error 404 Not Found for https://addon.example/catalog/movie/top.json"
        );
    }

    #[test]
    fn test_error_display_invalid_locator() {
        let err = AddonError::InvalidLocator("not a manifest URL".to_string());
        assert_eq!(err.to_string(), "Invalid addon locator: not a manifest URL");
    }

    #[test]
    fn test_error_display_response_too_large() {
        let err = AddonError::ResponseTooLarge { size: 20_000_000 };
        let msg = err.to_string();
        assert!(msg.contains("20000000"));
        assert!(msg.contains(&MAX_RESPONSE_SIZE.to_string()));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: AddonError = json_err.into();
        assert!(matches!(err, AddonError::Parse(_)));
    }
}
