use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::calories::estimate_calories;
use super::dto::{
    CreateRecipeRequest, ExpandedResponse, RecipeDetails, SearchRequest, SearchResponse,
};
use super::repo::{self, NewIngredient, NewRecipe, Recipe, RecipeListRow};
use super::services;
use crate::ai::dto::RecipeHit;
use crate::ai::AiGateway;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/search", post(search_recipes))
        .route("/recipes/import", post(import_recipe))
        .route("/recipes/:id", get(get_recipe).delete(delete_recipe))
        .route("/recipes/:id/shopping-list", post(expand_to_list))
}

#[instrument(skip(state))]
async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<RecipeListRow>>, ApiError> {
    Ok(Json(repo::list_by_user(&state.db, user_id).await?))
}

#[instrument(skip(state))]
async fn get_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeDetails>, ApiError> {
    let recipe = repo::get(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".into()))?;
    let ingredients = repo::ingredients(&state.db, id).await?;

    let estimated_calories = estimate_calories(
        ingredients
            .iter()
            .map(|i| (i.default_quantity, i.default_unit.as_deref())),
    );

    Ok(Json(RecipeDetails {
        recipe,
        ingredients,
        estimated_calories,
    }))
}

#[instrument(skip(state, payload))]
async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Recipe name is required".into()));
    }

    let new = NewRecipe {
        name: name.to_string(),
        description: payload.description,
        instructions: payload.instructions,
        image_url: payload.image_url,
        source_url: payload.source_url,
        ingredients: payload
            .ingredients
            .into_iter()
            .map(|i| NewIngredient {
                ingredient_name: i.ingredient_name,
                default_quantity: i.default_quantity,
                default_unit: i.default_unit,
            })
            .collect(),
    };

    let recipe = repo::create(&state.db, user_id, new).await?;
    info!(recipe_id = %recipe.id, "recipe created");
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[instrument(skip(state))]
async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let removed = repo::delete(&state.db, user_id, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Recipe not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn expand_to_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpandedResponse>, ApiError> {
    let added = services::add_recipe_to_list(&state, user_id, id).await?;
    Ok(Json(ExpandedResponse {
        recipe_id: id,
        added,
    }))
}

/// Proxy to the AI search endpoint. An empty query is rejected before any
/// network call; zero hits is a successful empty result, not an error.
#[instrument(skip(state, payload))]
async fn search_recipes(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = payload.query.trim();
    if query.is_empty() {
        return Err(ApiError::Validation("Query is required".into()));
    }

    let recipes = state.ai.search_recipes(query).await?;
    info!(count = recipes.len(), "recipe search completed");
    Ok(Json(SearchResponse { recipes }))
}

#[instrument(skip(state, payload))]
async fn import_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<RecipeHit>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Recipe name is required".into()));
    }

    let new = NewRecipe {
        name: payload.name.trim().to_string(),
        description: payload.description,
        instructions: payload.instructions,
        image_url: None,
        source_url: payload.source_url,
        ingredients: payload
            .ingredients
            .into_iter()
            .map(|i| NewIngredient {
                ingredient_name: i.ingredient_name,
                default_quantity: i.default_quantity,
                default_unit: i.default_unit,
            })
            .collect(),
    };

    let recipe = repo::create(&state.db, user_id, new).await?;
    info!(recipe_id = %recipe.id, "search hit imported");
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::dto::NutritionFacts;
    use crate::ai::AiError;
    use axum::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingGateway {
        searches: AtomicUsize,
    }

    #[async_trait]
    impl AiGateway for CountingGateway {
        async fn analyze_nutrition(&self, _image_url: &str) -> Result<NutritionFacts, AiError> {
            Ok(NutritionFacts::default())
        }
        async fn search_recipes(&self, _query: &str) -> Result<Vec<RecipeHit>, AiError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    fn state_with(gateway: Arc<CountingGateway>) -> AppState {
        let mut state = AppState::fake();
        state.ai = gateway;
        state
    }

    #[tokio::test]
    async fn blank_query_never_reaches_the_gateway() {
        let gateway = Arc::new(CountingGateway {
            searches: AtomicUsize::new(0),
        });
        let result = search_recipes(
            State(state_with(gateway.clone())),
            AuthUser(Uuid::new_v4()),
            Json(SearchRequest { query: "   ".into() }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(gateway.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_hit_search_is_a_successful_empty_result() {
        let gateway = Arc::new(CountingGateway {
            searches: AtomicUsize::new(0),
        });
        let Json(response) = search_recipes(
            State(state_with(gateway.clone())),
            AuthUser(Uuid::new_v4()),
            Json(SearchRequest {
                query: "thai curry".into(),
            }),
        )
        .await
        .expect("zero hits is a success");

        assert!(response.recipes.is_empty());
        assert_eq!(gateway.searches.load(Ordering::SeqCst), 1);
    }
}
