//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use petpals_shared::ErrorResponse;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::{AdoptionError, ManagementError, PetCareError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Forbidden(String),
    Unauthorized(String),
    BadRequest(String),
    Cooldown { message: String, remaining_ms: i64 },
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Cooldown { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg) => ErrorResponse::new(msg),
            ApiError::Cooldown {
                message,
                remaining_ms,
            } => ErrorResponse::cooldown(message, remaining_ms),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error while handling request");
                ErrorResponse::new("Internal error")
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            RepoError::ConstraintViolation(msg) => ApiError::Conflict(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<PetCareError> for ApiError {
    fn from(e: PetCareError) -> Self {
        match e {
            PetCareError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            PetCareError::Forbidden { .. } => ApiError::Forbidden(e.to_string()),
            PetCareError::InvalidInput(msg) => ApiError::BadRequest(msg),
            PetCareError::Cooldown(rejection) => ApiError::Cooldown {
                message: rejection.to_string(),
                remaining_ms: rejection.remaining_ms,
            },
            PetCareError::Repo(e) => e.into(),
        }
    }
}

impl From<ManagementError> for ApiError {
    fn from(e: ManagementError) -> Self {
        match e {
            ManagementError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            ManagementError::Forbidden { .. } => ApiError::Forbidden(e.to_string()),
            ManagementError::InvalidInput(msg) => ApiError::BadRequest(msg),
            ManagementError::Conflict(msg) => ApiError::Conflict(msg),
            ManagementError::Repo(e) => e.into(),
        }
    }
}

impl From<AdoptionError> for ApiError {
    fn from(e: AdoptionError) -> Self {
        match e {
            AdoptionError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            AdoptionError::Forbidden { .. } => ApiError::Forbidden(e.to_string()),
            AdoptionError::Conflict(msg) => ApiError::Conflict(msg),
            AdoptionError::Repo(e) => e.into(),
        }
    }
}
