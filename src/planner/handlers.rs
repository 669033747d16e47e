use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use time::{Date, OffsetDateTime};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{AddEntryRequest, AddEntryResponse, WeekEntry, WeekPlanResponse, WeekQuery};
use super::grid::{build_week_grid, day_index, slot_index, slot_sort_key, PlanEntry};
use super::repo;
use super::week::{format_week_range, shift_weeks, week_start, DAYS, ISO_DATE};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plan", get(get_week_plan).post(add_entry))
        .route("/meal-plan/:id", delete(remove_entry))
}

fn resolve_week(query: &WeekQuery) -> Result<Date, ApiError> {
    let date = match query.week.as_deref() {
        Some(raw) => Date::parse(raw, ISO_DATE)
            .map_err(|_| ApiError::Validation(format!("invalid week date: {raw}")))?,
        None => OffsetDateTime::now_utc().date(),
    };
    Ok(week_start(date))
}

#[instrument(skip(state))]
async fn get_week_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekPlanResponse>, ApiError> {
    let week = resolve_week(&query)?;

    let entries: Vec<PlanEntry> = repo::list_week(&state.db, user_id, week)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let days = build_week_grid(&entries);

    // stable sort keeps creation order inside a slot
    let mut flat: Vec<PlanEntry> = entries;
    flat.sort_by_key(|e| {
        (
            day_index(&e.day_of_week).unwrap_or(DAYS.len()),
            slot_sort_key(&e.meal_type),
        )
    });
    let flat = flat
        .into_iter()
        .map(|e| WeekEntry {
            id: e.entry_id,
            recipe_id: e.recipe_id,
            recipe_name: e.recipe_name,
            image_url: e.image_url,
            day_of_week: e.day_of_week,
            meal_type: e.meal_type,
        })
        .collect();

    Ok(Json(WeekPlanResponse {
        week_start: week,
        label: format_week_range(week),
        prev_week: shift_weeks(week, -1),
        next_week: shift_weeks(week, 1),
        days,
        entries: flat,
    }))
}

#[instrument(skip(state, payload))]
async fn add_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddEntryRequest>,
) -> Result<(StatusCode, Json<AddEntryResponse>), ApiError> {
    if payload.recipe_id.is_nil() {
        return Err(ApiError::Validation("recipe_id is required".into()));
    }
    let day = day_index(&payload.day_of_week)
        .ok_or_else(|| ApiError::Validation(format!("unknown day: {}", payload.day_of_week)))?;
    if slot_index(&payload.meal_type).is_none() {
        return Err(ApiError::Validation(format!(
            "unknown meal type: {}",
            payload.meal_type
        )));
    }

    let week = week_start(payload.week_start);
    let id = repo::insert(
        &state.db,
        user_id,
        payload.recipe_id,
        week,
        DAYS[day],
        &payload.meal_type.to_lowercase(),
    )
    .await?;

    info!(%id, %week, "meal plan entry added");
    Ok((
        StatusCode::CREATED,
        Json(AddEntryResponse {
            id,
            week_start: week,
        }),
    ))
}

/// Unconditional removal: deleting an entry that is already gone is a no-op,
/// not an error.
#[instrument(skip(state))]
async fn remove_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let removed = repo::delete(&state.db, user_id, id).await?;
    if removed == 0 {
        info!(%id, "meal plan entry already absent");
    }
    Ok(StatusCode::NO_CONTENT)
}
