use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use tracing::error;

use crate::api::response::ErrorResponse;

/// Failure of a single outbound call to the recipe API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request timed out: {0}")]
    Timeout(String),

    #[error("could not connect to upstream: {0}")]
    Connect(String),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid upstream response body: {0}")]
    Decode(String),

    #[error("upstream request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(err.to_string())
        } else if err.is_connect() {
            UpstreamError::Connect(err.to_string())
        } else if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            UpstreamError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            UpstreamError::Request(err.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(msg) => ErrorResponse::new(msg),
            AppError::Config(msg) => {
                error!(error = %msg, "configuration error");
                ErrorResponse::new(msg)
            }
            AppError::Upstream { context, source } => {
                error!(error = ?source, context, "upstream call failed");
                ErrorResponse::with_detail(context, source.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::Validation("Missing search query".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_and_config_map_to_server_error() {
        let upstream = AppError::Upstream {
            context: "Spoonacular request failed",
            source: UpstreamError::Status { status: 502, body: "bad gateway".into() },
        };
        assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            upstream.to_string(),
            "Spoonacular request failed: upstream returned status 502: bad gateway"
        );

        let config = AppError::Config("API key not configured".into());
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
