use argon2::{
    PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State};
use tracing::{debug, info};
use uuid::Uuid;

use rememberme_db::models::{NewUser, UserRow};
use rememberme_db::DbError;
use rememberme_types::api::{LoginRequest, SignupRequest, UserResponse};
use rememberme_types::models::User;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::{AppState, AppStateInner, run_blocking};

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(username = ?req.username, "POST /api/login");

    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(ApiError::InvalidCredentials);
    };

    let row = run_blocking(&state, move |app| {
        let row = app
            .db
            .get_user_by_username(&username)?
            .ok_or(ApiError::InvalidCredentials)?;

        verify_password(app, &password, row.password.as_deref())?;
        Ok(row)
    })
    .await?;

    Ok(Json(UserResponse {
        user: Some(user_from_row(row)),
    }))
}

pub async fn signup(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(username = ?req.username, email = ?req.email, "POST /api/signup");

    let row = run_blocking(&state, move |app| {
        // Cheap early exit before hashing; the unique index still decides races.
        if let Some(username) = req.username.as_deref() {
            if app.db.get_user_by_username(username)?.is_some() {
                return Err(DbError::UsernameTaken.into());
            }
        }

        let password_hash = req
            .password
            .as_deref()
            .map(|password| hash_password(app, password))
            .transpose()?;

        let id = Uuid::new_v4().to_string();
        let row = app.db.create_user(&NewUser {
            id: &id,
            name: req.name.as_deref(),
            email: req.email.as_deref(),
            username: req.username.as_deref(),
            password_hash: password_hash.as_deref(),
        })?;
        Ok(row)
    })
    .await?;

    info!("Registered user {}", row.id);
    Ok(Json(UserResponse {
        user: Some(user_from_row(row)),
    }))
}

/// Hash with Argon2id and a fresh random salt.
fn hash_password(state: &AppStateInner, password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = state
        .hasher
        .hash_password(password.as_bytes(), &salt)
        .map_err(ApiError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Accounts created without a password can never log in.
fn verify_password(state: &AppStateInner, password: &str, stored: Option<&str>) -> Result<(), ApiError> {
    let stored = stored.ok_or(ApiError::InvalidCredentials)?;
    let parsed = PasswordHash::new(stored).map_err(ApiError::PasswordHash)?;

    state
        .hasher
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| ApiError::InvalidCredentials)
}

pub(crate) fn user_from_row(row: UserRow) -> User {
    User {
        id: row.id,
        name: row.name,
        email: row.email,
        username: row.username,
        profile_pic: row.profile_pic,
    }
}
