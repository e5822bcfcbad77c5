/// Error handling for the web server
///
/// This module provides a unified error type that maps to HTTP responses.
/// Handlers return `Result<T, AppError>` which converts to an appropriate
/// status code at the boundary.
///
/// Expected failures (duplicate email, unknown task, owner mismatch, bad
/// credentials) are recovered inside the handlers as notices and redirects
/// and normally never reach this mapping; what does reach it is the
/// unexpected: a lost database connection, a render failure, a request for
/// a task id that does not exist.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

/// Handler result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error type
#[derive(Debug)]
pub enum AppError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404) - e.g., unknown task id
    NotFound(String),

    /// Conflict (409) - e.g., duplicate email
    Conflict(String),

    /// Internal server error (500)
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Html(format!(
            "<!doctype html><html><body><h1>{}</h1><p>{}</p></body></html>",
            status.as_u16(),
            crate::render::escape_html(&message)
        ));

        (status, body).into_response()
    }
}

/// Convert sqlx errors to application errors
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // The only unique column is users.email, so a unique
                // violation is always a duplicate registration
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Email already registered".to_string());
                }

                AppError::InternalError(format!("Database error: {}", db_err))
            }
            _ => AppError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to application errors
impl From<tarefas_shared::auth::password::PasswordError> for AppError {
    fn from(err: tarefas_shared::auth::password::PasswordError) -> Self {
        AppError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert session token errors to application errors
///
/// Only reached when a handler mints a token; validation failures are
/// handled by the session gate as a redirect to the login page.
impl From<tarefas_shared::auth::session::SessionError> for AppError {
    fn from(err: tarefas_shared::auth::session::SessionError) -> Self {
        match err {
            tarefas_shared::auth::session::SessionError::Expired => {
                AppError::Unauthorized("Session expired".to_string())
            }
            other => AppError::InternalError(format!("Session operation failed: {}", other)),
        }
    }
}

/// Convert render errors to application errors
impl From<crate::render::RenderError> for AppError {
    fn from(err: crate::render::RenderError) -> Self {
        AppError::InternalError(format!("Render failed: {}", err))
    }
}
