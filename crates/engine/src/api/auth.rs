//! Caller identity.
//!
//! Authentication happens upstream. The authenticated user id arrives in the
//! `X-User-Id` header; requests without a numeric id there are rejected with 401.

use axum::{extract::FromRequestParts, http::request::Parts};
use petpals_domain::UserId;

use super::error::ApiError;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extractor for the calling user.
///
/// ```rust,ignore
/// async fn handler(Caller(user_id): Caller) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub UserId);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<UserId>().ok())
            .map(Caller)
            .ok_or_else(|| {
                ApiError::Unauthorized(format!("Missing or invalid {} header", USER_ID_HEADER))
            })
    }
}
