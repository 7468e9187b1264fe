// HTTP error type shared by all handlers
// Decision: Every failure becomes a status code plus `{"error": ...}`; details go to logs only
// Decision: Token failures of any kind map to one undifferentiated 401

use axum::{
    extract::rejection::{BytesRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ErrorResponse;

/// Errors surfaced at the HTTP boundary
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed client-supplied data
    #[error("{0}")]
    Input(String),

    /// Missing, malformed, forged, or expired session
    #[error("Not authenticated")]
    Unauthenticated,

    /// Wrong HTTP verb for the route
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Identity provider or webhook failure
    #[error("{0}")]
    Upstream(String),

    /// Required configuration is absent
    #[error("{0}")]
    Configuration(String),
}

impl ApiError {
    pub fn input(msg: impl Into<String>) -> Self {
        ApiError::Input(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        ApiError::Upstream(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        ApiError::Configuration(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Input(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Upstream(_) | ApiError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!("Rejected query string: {}", rejection.body_text());
        ApiError::input("Invalid query string")
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::input("Input exceeds allowed limits")
        } else {
            ApiError::input("Invalid request body")
        }
    }
}

/// Method fallback so wrong verbs get a JSON body instead of an empty 405
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
