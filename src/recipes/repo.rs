use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeIngredient {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub ingredient_name: String,
    pub default_quantity: Option<f64>,
    pub default_unit: Option<String>,
}

/// Library listing row; `ingredient_count` comes from the count-only join.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeListRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub created_at: OffsetDateTime,
    pub ingredient_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub ingredient_name: String,
    pub default_quantity: Option<f64>,
    pub default_unit: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub ingredients: Vec<NewIngredient>,
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<RecipeListRow>> {
    let rows = sqlx::query_as::<_, RecipeListRow>(
        r#"
        SELECT r.id, r.name, r.description, r.image_url, r.source_url, r.created_at,
               COUNT(ri.id) AS ingredient_count
        FROM recipes r
        LEFT JOIN recipe_ingredients ri ON ri.recipe_id = r.id
        WHERE r.user_id = $1
        GROUP BY r.id
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Recipe>> {
    let recipe = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT id, name, description, instructions, image_url, source_url, created_at
        FROM recipes
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(recipe)
}

pub async fn ingredients(db: &PgPool, recipe_id: Uuid) -> anyhow::Result<Vec<RecipeIngredient>> {
    let rows = sqlx::query_as::<_, RecipeIngredient>(
        r#"
        SELECT id, recipe_id, ingredient_name, default_quantity, default_unit
        FROM recipe_ingredients
        WHERE recipe_id = $1
        ORDER BY ingredient_name ASC
        "#,
    )
    .bind(recipe_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Recipe and its ingredient rows land in one transaction; a half-imported
/// recipe is never visible.
pub async fn create(db: &PgPool, user_id: Uuid, new: NewRecipe) -> anyhow::Result<Recipe> {
    let mut tx = db.begin().await?;

    let recipe = sqlx::query_as::<_, Recipe>(
        r#"
        INSERT INTO recipes (user_id, name, description, instructions, image_url, source_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, description, instructions, image_url, source_url, created_at
        "#,
    )
    .bind(user_id)
    .bind(&new.name)
    .bind(&new.description)
    .bind(&new.instructions)
    .bind(&new.image_url)
    .bind(&new.source_url)
    .fetch_one(&mut *tx)
    .await?;

    for ing in &new.ingredients {
        sqlx::query(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_name, default_quantity, default_unit)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(recipe.id)
        .bind(&ing.ingredient_name)
        .bind(ing.default_quantity)
        .bind(&ing.default_unit)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(recipe)
}

/// Ingredient rows and meal plan entries go with the recipe via ON DELETE
/// CASCADE.
pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
