//! Unified error handling for the HTTP surface.
//!
//! Every failure a handler or the authentication layer can produce ends up
//! here and is rendered as a JSON body with a single `message` field.

use crate::db::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to API callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or incorrect `X-API-Key`.
    #[error("invalid or missing API key")]
    Unauthorized,

    /// A path segment could not be decoded (e.g. invalid UTF-8).
    #[error("bad path: {0}")]
    BadPath(String),

    /// A scoped lookup matched no rows.
    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] DbError),
}

impl ApiError {
    /// Get a static error code string for log labelling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::BadPath(_) => "bad_path",
            Self::NotFound(_) => "not_found",
            Self::Store(e) => e.error_code(),
        }
    }

    /// HTTP status the error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadPath(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Store errors are not echoed back.
    fn public_message(&self) -> &str {
        match self {
            Self::Unauthorized => "Invalid or missing API key",
            Self::BadPath(message) => message.as_str(),
            Self::NotFound(message) => *message,
            Self::Store(e) if e.is_unavailable() => "Database unavailable",
            Self::Store(_) => "Database query failed",
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store(e) = &self {
            tracing::error!(code = self.error_code(), error = %e, "Store operation failed");
        }
        if let Self::BadPath(reason) = &self {
            tracing::debug!(reason = %reason, "Rejected undecodable path");
        }

        let body = ErrorBody {
            message: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
