//! Shared-secret authentication.

use super::AppState;
use crate::config::ApiKey;
use crate::error::ApiError;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Why a request was turned away. Only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingHeader,
    MalformedHeader,
    NoKeyConfigured,
    Mismatch,
}

impl Rejection {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingHeader => "missing header",
            Self::MalformedHeader => "header is not valid text",
            Self::NoKeyConfigured => "no API key configured",
            Self::Mismatch => "key mismatch",
        }
    }
}

/// Decide whether `headers` carry the configured secret.
///
/// An empty header never matches, and neither does anything when the
/// configured key is absent or empty.
pub fn check(headers: &HeaderMap, expected: Option<&ApiKey>) -> Result<(), Rejection> {
    let provided = headers
        .get(API_KEY_HEADER)
        .ok_or(Rejection::MissingHeader)?
        .to_str()
        .map_err(|_| Rejection::MalformedHeader)?;

    if provided.is_empty() {
        return Err(Rejection::MissingHeader);
    }

    let expected = match expected {
        Some(key) if !key.is_empty() => key,
        _ => return Err(Rejection::NoKeyConfigured),
    };

    if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(Rejection::Mismatch)
    }
}

/// Middleware gating every protected route.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(reason) = check(request.headers(), state.api_key.as_deref()) {
        tracing::warn!(
            path = %request.uri().path(),
            reason = reason.as_str(),
            "Rejected request"
        );
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
