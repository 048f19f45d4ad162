//! Error handling - maps domain errors onto HTTP responses.

use std::collections::BTreeMap;
use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use quill_core::error::{DomainError, RepoError};
use quill_core::ports::AuthError;
use quill_shared::ErrorBody;

/// Application-level error type for handlers.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    Validation(BTreeMap<String, String>),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Domain(err) => write!(f, "{}", err),
            ApiError::Validation(fields) => write!(f, "Validation failed: {:?}", fields),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::PostNotFound(_)
        | DomainError::CategoryNotFound(_)
        | DomainError::TagNotFound(_)
        | DomainError::CommentNotFound
        | DomainError::UserNotFound
        | DomainError::CategoryNotOnPost { .. }
        | DomainError::TagNotOnPost { .. } => StatusCode::NOT_FOUND,
        DomainError::TitleAlreadyExists(_)
        | DomainError::CategoryAlreadyExists(_)
        | DomainError::TagAlreadyExists(_)
        | DomainError::CategoryAlreadyOnPost { .. }
        | DomainError::TagAlreadyOnPost { .. }
        | DomainError::EmailAlreadyExists
        | DomainError::PasswordMismatch => StatusCode::BAD_REQUEST,
        DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        DomainError::Auth(AuthError::HashingError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Auth(_) => StatusCode::UNAUTHORIZED,
        DomainError::Repo(RepoError::Constraint(_)) => StatusCode::BAD_REQUEST,
        DomainError::Repo(RepoError::NotFound) => StatusCode::NOT_FOUND,
        DomainError::Repo(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => domain_status(err),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let body = match self {
            ApiError::Domain(err) if status == StatusCode::INTERNAL_SERVER_ERROR => {
                // Log internals, never leak them to the client
                tracing::error!("Internal error: {}", err);
                ErrorBody::error("Internal server error")
            }
            ApiError::Domain(err) => ErrorBody::error(err.to_string()),
            ApiError::Validation(fields) => ErrorBody(fields.clone()),
        };

        HttpResponse::build(status).json(body)
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_family_maps_to_404() {
        assert_eq!(
            domain_status(&DomainError::PostNotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(domain_status(&DomainError::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            domain_status(&DomainError::CategoryNotOnPost {
                post: "p".into(),
                category: "c".into()
            }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_family_maps_to_400() {
        assert_eq!(
            domain_status(&DomainError::TitleAlreadyExists("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_status(&DomainError::PasswordMismatch),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_status(&DomainError::Repo(RepoError::Constraint("dup".into()))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_credentials_and_internals() {
        assert_eq!(
            domain_status(&DomainError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            domain_status(&DomainError::Repo(RepoError::Query("boom".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            domain_status(&DomainError::Auth(AuthError::HashingError("x".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
