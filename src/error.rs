//! Error types for SSO Relay
//!
//! This module defines the error type shared by the redirect initiator, the
//! callback verifier, and configuration loading, using `thiserror` for
//! ergonomic error handling.
//!
//! HTTP handlers return [`SsoError`] directly so that each failure maps to a
//! fixed status code. Everything else (configuration loading, the CLI) uses
//! the `anyhow`-backed [`Result`] alias.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Main error type for SSO Relay operations
///
/// Messages never contain the salt, the presented token, or the computed
/// digest, so any variant is safe to log.
#[derive(Error, Debug)]
pub enum SsoError {
    /// Configuration is missing, malformed, or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// The callback payload could not be decoded
    #[error("Callback decode error ({status}): {reason}")]
    Decode {
        /// Client-error status to answer with (400, 415 or 422)
        status: StatusCode,
        /// Decoder message, logged but never sent to the client
        reason: String,
    },

    /// The presented token does not match the digest for the claimed email
    #[error("Callback token rejected")]
    Unauthorized,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SsoError {
    /// Status code this error is surfaced with over HTTP.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SsoError::Decode { status, .. } => *status,
            SsoError::Unauthorized => StatusCode::UNAUTHORIZED,
            SsoError::Config(_) | SsoError::Io(_) | SsoError::Yaml(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for SsoError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            SsoError::Decode { reason, .. } => {
                tracing::debug!(%status, "Rejected undecodable SSO callback: {}", reason);
            }
            SsoError::Unauthorized => {}
            _ => tracing::error!(%status, "SSO request failed: {}", self),
        }

        // Only the canonical reason phrase goes back to the client.
        let body = status.canonical_reason().unwrap_or("Error");
        (status, body).into_response()
    }
}

/// Result type for fallible SSO operations with a concrete error
pub type SsoResult<T> = std::result::Result<T, SsoError>;

/// Result type alias for SSO Relay operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = SsoError::Config("salt is empty".to_string());
        assert_eq!(error.to_string(), "Configuration error: salt is empty");
    }

    #[test]
    fn test_decode_error_display() {
        let error = SsoError::Decode {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            reason: "missing field `email`".to_string(),
        };
        let s = error.to_string();
        assert!(s.contains("422"));
        assert!(s.contains("missing field `email`"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SsoError::Config("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(SsoError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            SsoError::Decode {
                status: StatusCode::BAD_REQUEST,
                reason: String::new(),
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_response_body_has_no_details() {
        let error = SsoError::Decode {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            reason: "missing field `token`".to_string(),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(body, "Unprocessable Entity");
        assert!(!body.contains("token"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: SsoError = io_error.into();
        assert!(matches!(error, SsoError::Io(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: SsoError = yaml_error.into();
        assert!(matches!(error, SsoError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SsoError>();
    }
}
