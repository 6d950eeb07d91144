pub mod auth;
pub mod error;
pub mod extract;
pub mod memories;
pub mod profile;

use std::sync::Arc;

use argon2::Argon2;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use rememberme_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub hasher: Argon2<'static>,
}

impl AppStateInner {
    pub fn new(db: Database) -> Self {
        Self::with_hasher(db, Argon2::default())
    }

    pub fn with_hasher(db: Database, hasher: Argon2<'static>) -> Self {
        Self { db, hasher }
    }
}

/// Build the full HTTP surface: API routes, permissive CORS, request tracing
/// and a JSON body size limit.
pub fn router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/signup", post(auth::signup))
        .route("/api/memories", post(memories::create_memory))
        // GET takes a user id, PUT and DELETE a memory id
        .route(
            "/api/memories/{id}",
            get(memories::list_memories)
                .put(memories::update_memory)
                .delete(memories::delete_memory),
        )
        .route("/api/user/{id}", put(profile::update_profile))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health() -> &'static str {
    "ok"
}

/// Run blocking database (and hashing) work off the async runtime.
pub(crate) async fn run_blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppStateInner) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state)).await?
}
