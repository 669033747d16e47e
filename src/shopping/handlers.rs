use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{AddItemRequest, CreateStoreRequest, ListQuery, ListResponse, PatchItemRequest};
use super::group::group_by_store;
use super::repo::{self, ShoppingItem, Store};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shopping-list", get(list_items).post(add_item))
        .route("/shopping-list/:id", patch(patch_item).delete(delete_item))
        .route("/stores", get(list_stores).post(create_store))
        .route("/stores/:id", delete(delete_store))
}

#[instrument(skip(state))]
async fn list_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let items = repo::list(&state.db, user_id).await?;
    let response = if query.group_by_store {
        ListResponse::Grouped {
            buckets: group_by_store(items),
        }
    } else {
        ListResponse::Flat { items }
    };
    Ok(Json(response))
}

#[instrument(skip(state, payload))]
async fn add_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<ShoppingItem>), ApiError> {
    let name = payload.ingredient_name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Ingredient name is required".into()));
    }
    let item = repo::insert_one(&state.db, user_id, name).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state, payload))]
async fn patch_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchItemRequest>,
) -> Result<Json<ShoppingItem>, ApiError> {
    if let Some(q) = payload.quantity {
        if !q.is_finite() || q < 0.0 {
            return Err(ApiError::Validation("Quantity must be non-negative".into()));
        }
    }

    let item = repo::patch(
        &state.db,
        user_id,
        id,
        payload.quantity,
        payload.unit.as_deref(),
        payload.is_purchased,
        payload.store.is_some(),
        payload.store.as_ref().and_then(|s| s.as_deref()),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Shopping item not found".into()))?;

    Ok(Json(item))
}

#[instrument(skip(state))]
async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let removed = repo::delete(&state.db, user_id, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Shopping item not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn list_stores(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Store>>, ApiError> {
    Ok(Json(repo::list_stores(&state.db, user_id).await?))
}

#[instrument(skip(state, payload))]
async fn create_store(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<Store>), ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Store name is required".into()));
    }

    let store = match repo::insert_store(&state.db, user_id, name).await {
        Ok(s) => s,
        Err(e) => {
            // unique (user_id, name)
            if let Some(db_err) = e.downcast_ref::<sqlx::Error>() {
                if matches!(db_err, sqlx::Error::Database(d) if d.is_unique_violation()) {
                    return Err(ApiError::Conflict("Store already exists".into()));
                }
            }
            return Err(e.into());
        }
    };

    info!(store_id = %store.id, "store created");
    Ok((StatusCode::CREATED, Json(store)))
}

#[instrument(skip(state))]
async fn delete_store(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let removed = repo::delete_store(&state.db, user_id, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Store not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
