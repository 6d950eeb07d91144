use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use rememberme_db::DbError;
use rememberme_types::api::ErrorResponse;

pub const LOGIN_FAILED: &str = "Login gagal";
pub const USERNAME_TAKEN: &str = "Username sudah terdaftar";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown username and wrong password are the same outcome.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Database(#[from] DbError),
    #[error("password hashing failed: {0}")]
    PasswordHash(argon2::password_hash::Error),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidCredentials => message(StatusCode::UNAUTHORIZED, LOGIN_FAILED),
            ApiError::Database(DbError::UsernameTaken) => message(StatusCode::BAD_REQUEST, USERNAME_TAKEN),
            other => {
                error!("Request failed: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse { message: message.to_string() })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::InvalidCredentials.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Database(DbError::UsernameTaken).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Database(DbError::Poisoned).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
