use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::{Recipe, RecipeIngredient};
use crate::ai::dto::RecipeHit;

#[derive(Debug, Deserialize)]
pub struct IngredientInput {
    pub ingredient_name: String,
    #[serde(default)]
    pub default_quantity: Option<f64>,
    #[serde(default)]
    pub default_unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
}

#[derive(Debug, Serialize)]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
    /// Ballpark heuristic; distinct from the ingredient bank's macro data.
    pub estimated_calories: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub recipes: Vec<RecipeHit>,
}

#[derive(Debug, Serialize)]
pub struct ExpandedResponse {
    pub recipe_id: Uuid,
    pub added: usize,
}
