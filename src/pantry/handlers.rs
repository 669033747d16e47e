use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use super::repo::{self, BankEntry};
use super::services::{analyze_and_store, LabelUpload};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::StorageClient;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ingredient-bank", get(list_entries))
        .route("/ingredient-bank/:id", axum::routing::delete(delete_entry))
        .route(
            "/ingredient-bank/analyze",
            post(analyze_label).layer(DefaultBodyLimit::max(20 * 1024 * 1024)),
        )
}

#[instrument(skip(state))]
async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<BankEntry>>, ApiError> {
    Ok(Json(repo::list(&state.db, user_id).await?))
}

/// POST /ingredient-bank/analyze (multipart, field `file`); the service
/// layer rejects non-image uploads before touching storage or the AI.
#[instrument(skip(state, mp))]
async fn analyze_label(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<BankEntry>), ApiError> {
    let mut upload: Option<LabelUpload> = None;
    while let Ok(Some(field)) = mp.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_default();
        let body = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("invalid upload: {e}")))?;
        upload = Some(LabelUpload { body, content_type });
        break;
    }

    let upload = upload.ok_or_else(|| ApiError::Validation("file is required".into()))?;
    if upload.body.is_empty() {
        return Err(ApiError::Validation("file is empty".into()));
    }

    let entry = analyze_and_store(&state, user_id, upload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let key = repo::delete(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ingredient not found".into()))?;

    // best effort; a dangling object is not worth failing the delete
    if let Some(key) = key {
        if let Err(e) = state.storage.delete_object(&key).await {
            warn!(error = %e, %key, "failed to delete label object");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
