use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use rememberme_db::models::{MemoryContent, MemoryRow};
use rememberme_types::api::{
    CreateMemoryRequest, DeleteResponse, MemoryListResponse, MemoryResponse, UpdateMemoryRequest,
};
use rememberme_types::models::Memory;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::{AppState, run_blocking};

/// The path segment is a user id here; ownership is a plain string match.
pub async fn list_memories(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MemoryListResponse>, ApiError> {
    debug!(%user_id, "GET /api/memories/{{userId}}");

    let rows = run_blocking(&state, move |app| Ok(app.db.get_memories_for_user(&user_id)?)).await?;

    Ok(Json(MemoryListResponse {
        memories: rows.into_iter().map(memory_from_row).collect(),
    }))
}

pub async fn create_memory(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateMemoryRequest>,
) -> Result<Json<MemoryResponse>, ApiError> {
    debug!(user_id = ?req.user_id, title = ?req.title, "POST /api/memories");

    let row = run_blocking(&state, move |app| {
        let id = Uuid::new_v4().to_string();
        let photos = req.photos.unwrap_or_default();
        let content = MemoryContent {
            title: req.title.as_deref(),
            photos: &photos,
            date: req.date.as_deref(),
            notes: req.notes.as_deref(),
        };
        Ok(app.db.insert_memory(&id, req.user_id.as_deref(), &content)?)
    })
    .await?;

    Ok(Json(MemoryResponse {
        memory: Some(memory_from_row(row)),
    }))
}

/// Replaces title, photos, date and notes. An unknown id yields
/// `{"memory": null}` with 200, matching the rest of the API's not-found
/// handling.
pub async fn update_memory(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateMemoryRequest>,
) -> Result<Json<MemoryResponse>, ApiError> {
    debug!(%id, title = ?req.title, "PUT /api/memories/{{id}}");

    let row = run_blocking(&state, move |app| {
        let photos = req.photos.unwrap_or_default();
        let content = MemoryContent {
            title: req.title.as_deref(),
            photos: &photos,
            date: req.date.as_deref(),
            notes: req.notes.as_deref(),
        };
        Ok(app.db.update_memory(&id, &content)?)
    })
    .await?;

    Ok(Json(MemoryResponse {
        memory: row.map(memory_from_row),
    }))
}

/// Always reports success, whether or not the memory existed.
pub async fn delete_memory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    debug!(%id, "DELETE /api/memories/{{id}}");

    let log_id = id.clone();
    let removed = run_blocking(&state, move |app| Ok(app.db.delete_memory(&id)?)).await?;
    if !removed {
        debug!("Delete of unknown memory {}", log_id);
    }

    Ok(Json(DeleteResponse { success: true }))
}

fn memory_from_row(row: MemoryRow) -> Memory {
    let created_at = DateTime::parse_from_rfc3339(&row.created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on memory '{}': {}", row.created_at, row.id, e);
            DateTime::default()
        });

    Memory {
        id: row.id,
        user_id: row.user_id,
        title: row.title,
        photos: row.photos,
        date: row.date,
        notes: row.notes,
        created_at,
    }
}
