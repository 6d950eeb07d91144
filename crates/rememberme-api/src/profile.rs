use axum::{
    Json,
    extract::{Path, State},
};
use tracing::debug;

use rememberme_db::models::ProfileUpdate;
use rememberme_types::api::{UpdateProfileRequest, UserResponse};

use crate::auth::user_from_row;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::{AppState, run_blocking};

/// Overwrites name, email, username and profilePic; a field missing from the
/// body is cleared. The password is not touched.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(%id, username = ?req.username, "PUT /api/user/{{id}}");

    let row = run_blocking(&state, move |app| {
        let update = ProfileUpdate {
            name: req.name.as_deref(),
            email: req.email.as_deref(),
            username: req.username.as_deref(),
            profile_pic: req.profile_pic.as_deref(),
        };
        Ok(app.db.update_user_profile(&id, &update)?)
    })
    .await?;

    Ok(Json(UserResponse {
        user: row.map(user_from_row),
    }))
}
