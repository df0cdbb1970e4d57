/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Failures surfaced by a launch data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream responded with status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("malformed payload: {0}")]
    MalformedData(String),
    #[error("invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl SourceError {
    /// True for network failures and non-success statuses other than 404.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SourceError::Transport(_) | SourceError::UpstreamStatus { .. }
        )
    }

    /// Stable classification code used in error envelopes
    pub fn code(&self) -> &'static str {
        let status = match self {
            SourceError::Transport(e) => e.status().map(|s| s.as_u16()),
            SourceError::UpstreamStatus { status, .. } => Some(*status),
            SourceError::NotFound { .. } => return "NOT_FOUND",
            SourceError::MalformedData(_) => return "MALFORMED_DATA",
            SourceError::InvalidBaseUrl { .. } => return "INVALID_CONFIG",
        };
        match status {
            Some(403) => "UPSTREAM_403",
            Some(404) => "UPSTREAM_404",
            Some(429) => "UPSTREAM_429",
            Some(500..=599) => "UPSTREAM_5XX",
            _ => "UPSTREAM_ERROR",
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    /// A view could not load; `message` is the generic text shown for that view.
    Upstream {
        message: &'static str,
        source: SourceError,
    },
    InvalidInput(String),
}

impl ApiError {
    pub fn upstream(message: &'static str, source: SourceError) -> Self {
        ApiError::Upstream { message, source }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Upstream { message, source } => write!(f, "{}: {}", message, source),
            ApiError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn to_body(&self) -> ErrorResponse {
        let (code, message, detail) = match self {
            ApiError::Upstream { message, source } => {
                (source.code(), message.to_string(), Some(source.to_string()))
            }
            ApiError::InvalidInput(msg) => ("INVALID_INPUT", msg.clone(), None),
        };

        ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: code.to_string(),
                message,
                detail,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Failures are reported in-band: HTTP 200 with ok=false
        (StatusCode::OK, Json(self.to_body())).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_transport() {
        let err = SourceError::NotFound {
            kind: "launch",
            id: "abc".to_string(),
        };
        assert!(!err.is_transport());
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "launch not found: abc");
    }

    #[test]
    fn test_upstream_status_codes() {
        let err = SourceError::UpstreamStatus {
            status: 503,
            url: "http://x/launches/query".to_string(),
        };
        assert!(err.is_transport());
        assert_eq!(err.code(), "UPSTREAM_5XX");

        let err = SourceError::UpstreamStatus {
            status: 429,
            url: "http://x".to_string(),
        };
        assert_eq!(err.code(), "UPSTREAM_429");
    }

    #[test]
    fn test_upstream_body_uses_view_message() {
        let err = ApiError::upstream(
            "Error loading mission details",
            SourceError::MalformedData("expected object".to_string()),
        );
        let body = err.to_body();
        assert!(!body.ok);
        assert_eq!(body.error.code, "MALFORMED_DATA");
        assert_eq!(body.error.message, "Error loading mission details");
        assert_eq!(
            body.error.detail.as_deref(),
            Some("malformed payload: expected object")
        );
    }

    #[test]
    fn test_invalid_input_body() {
        let body = ApiError::InvalidInput("pages must be at least 1".to_string()).to_body();
        assert_eq!(body.error.code, "INVALID_INPUT");
        assert!(body.error.detail.is_none());
    }
}
