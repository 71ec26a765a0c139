//! Response types and error handling for handlers
//!
//! Pages are rendered as a template name plus a JSON context. Guard denials
//! become redirects; everything else that fails is a JSON error body.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use club_common::AppError;
use club_core::{DenialReason, DomainError};
use club_service::{ServiceError, ServiceResult};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::routes::paths;

// ============================================================================
// Errors
// ============================================================================

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid form submission: {0}")]
    InvalidForm(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => e.status_code(),
            Self::InvalidPath(_) | Self::InvalidForm(_) => 400,
            Self::Internal(_) => 500,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidForm(_) => "INVALID_FORM",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid form error
    pub fn invalid_form(msg: impl Into<String>) -> Self {
        Self::InvalidForm(msg.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// Redirects
// ============================================================================

/// 302 Found with a `Location` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found(pub String);

impl Found {
    pub fn to(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn location(&self) -> &str {
        &self.0
    }
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        match HeaderValue::try_from(self.0) {
            Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            Err(e) => ApiError::internal(e).into_response(),
        }
    }
}

/// Where a refused caller is sent: the log-in page (remembering
/// `original_path`) when anonymous, otherwise the feed
pub fn denial_redirect(reason: DenialReason, original_path: &str) -> Found {
    match reason {
        DenialReason::NotAuthenticated => Found(paths::log_in_with_next(original_path)),
        DenialReason::NotAMember | DenialReason::Banned | DenialReason::InsufficientRole => {
            Found::to(paths::FEED)
        }
    }
}

/// Failure of a guarded handler
#[derive(Debug)]
pub enum Rejection {
    Redirect(Found),
    Error(ApiError),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(found) => found.into_response(),
            Self::Error(err) => err.into_response(),
        }
    }
}

impl Rejection {
    /// Guard denials become redirects; other service errors stay errors
    pub fn from_service(err: ServiceError, original_path: &str) -> Self {
        match err {
            ServiceError::Denied(reason) => Self::Redirect(denial_redirect(reason, original_path)),
            other => Self::Error(ApiError::Service(other)),
        }
    }
}

impl From<ApiError> for Rejection {
    fn from(err: ApiError) -> Self {
        Self::Error(err)
    }
}

/// Result type for handlers behind the access guard
pub type PageResult<T> = Result<T, Rejection>;

/// Turn guard denials into redirects, leaving other errors alone
pub trait OrRedirect<T> {
    fn or_redirect(self, original_path: &str) -> PageResult<T>;
}

impl<T> OrRedirect<T> for ServiceResult<T> {
    fn or_redirect(self, original_path: &str) -> PageResult<T> {
        self.map_err(|err| Rejection::from_service(err, original_path))
    }
}

// ============================================================================
// Pages
// ============================================================================

/// A rendered page: the template to use and its context
#[derive(Debug, Serialize)]
pub struct Page {
    pub template: &'static str,
    pub context: serde_json::Value,
}

impl Page {
    /// Serialize `context` for `template`
    pub fn render<T: Serialize>(template: &'static str, context: &T) -> ApiResult<Self> {
        let context = serde_json::to_value(context).map_err(ApiError::internal)?;
        Ok(Self { template, context })
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::invalid_path("user_id").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DomainError::ClubNotFound("Beatles".to_string())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DomainError::CannotLeaveOwnedClub).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_codes() {
        assert_eq!(ApiError::invalid_form("x").error_code(), "INVALID_FORM");
        assert_eq!(
            ApiError::from(ServiceError::not_found("Club", "Beatles")).error_code(),
            "NOT_FOUND"
        );
    }

    #[test]
    fn test_denial_redirects() {
        assert_eq!(
            denial_redirect(DenialReason::NotAuthenticated, "/applicants/Beatles/"),
            Found::to("/log_in/?next=/applicants/Beatles/")
        );
        for reason in [
            DenialReason::NotAMember,
            DenialReason::Banned,
            DenialReason::InsufficientRole,
        ] {
            assert_eq!(denial_redirect(reason, "/applicants/Beatles/").location(), "/feed/");
        }
    }

    #[test]
    fn test_or_redirect() {
        let denied: ServiceResult<()> = Err(ServiceError::Denied(DenialReason::Banned));
        assert!(matches!(
            denied.or_redirect("/club/Beatles/member_management/"),
            Err(Rejection::Redirect(found)) if found.location() == "/feed/"
        ));

        let failed: ServiceResult<()> = Err(ServiceError::internal("store unavailable"));
        assert!(matches!(
            failed.or_redirect("/"),
            Err(Rejection::Error(ApiError::Service(_)))
        ));
    }

    #[test]
    fn test_found_response() {
        let response = Found::to("/feed/").into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/feed/");
    }
}
