//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, http::header};
use std::fmt;

use ya_core::error::{DomainError, RepoError};
use ya_core::ports::AuthError;
use ya_core::validation::FieldErrors;
use ya_shared::{ErrorResponse, FieldErrorMap};

use crate::routes::login_redirect;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    /// Anonymous request for a page that needs a user; answered with a
    /// redirect to the login page.
    LoginRequired { next: String },
    /// Missing or foreign resource.
    NotFound,
    BadRequest(String),
    Conflict(String),
    Invalid(FieldErrorMap),
    Internal(String),
}

impl AppError {
    /// Map a service error for the request being served.
    pub fn from_domain(err: DomainError, req: &HttpRequest) -> Self {
        match err {
            DomainError::AnonymousDenied => AppError::LoginRequired {
                next: req.path().to_string(),
            },
            DomainError::Forbidden => {
                tracing::debug!(path = %req.path(), "Foreign resource hidden as not found");
                AppError::NotFound
            }
            DomainError::NotFound { .. } => AppError::NotFound,
            DomainError::Validation(errors) => AppError::Invalid(field_error_map(&errors)),
            DomainError::Repo(e) => e.into(),
            DomainError::Auth(e) => e.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::LoginRequired { next } => write!(f, "Login required for {}", next),
            AppError::NotFound => write!(f, "Not found"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Invalid(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::LoginRequired { .. } => StatusCode::FOUND,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::LoginRequired { next } => {
                return HttpResponse::Found()
                    .insert_header((header::LOCATION, login_redirect(next)))
                    .finish();
            }
            AppError::NotFound => ErrorResponse::not_found(),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Invalid(errors) => ErrorResponse::unprocessable(errors.clone()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound,
            RepoError::Unique(msg) => AppError::Conflict(msg),
            RepoError::ForeignKey(msg) => {
                tracing::warn!("Dangling reference: {}", msg);
                AppError::Conflict("Referenced record no longer exists".to_string())
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Field errors in their wire form.
pub fn field_error_map(errors: &FieldErrors) -> FieldErrorMap {
    errors
        .iter()
        .map(|(field, messages)| (field.to_string(), messages.to_vec()))
        .collect()
}

/// Attach the current request to a service result.
pub trait ForRequest<T> {
    fn for_request(self, req: &HttpRequest) -> AppResult<T>;
}

impl<T> ForRequest<T> for Result<T, DomainError> {
    fn for_request(self, req: &HttpRequest) -> AppResult<T> {
        self.map_err(|e| AppError::from_domain(e, req))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
