use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use skylab_auth::AuthError;
use skylab_database::DatabaseError;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// The one error type every handler returns: an HTTP status plus a message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(message) => Self::not_found(message),
            DatabaseError::Duplicate(message)
            | DatabaseError::Constraint(message)
            | DatabaseError::Validation(message) => Self::bad_request(message),
            other => {
                error!(error = ?other, "database error");
                Self::internal_server_error("Database operation failed")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::TokenExpired => Self::unauthorized("Token has expired"),
            AuthError::InvalidToken => Self::unauthorized("Invalid token"),
            AuthError::PasswordHash(_) | AuthError::MalformedHash | AuthError::TokenCreation(_) => {
                error!(error = ?error, "auth error");
                Self::internal_server_error(error.to_string())
            }
        }
    }
}
