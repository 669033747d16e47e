use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::ai::dto::NutritionFacts;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BankEntry {
    pub id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub serving_size: Option<String>,
    pub calories: f64,
    pub total_fat: f64,
    pub saturated_fat: f64,
    pub trans_fat: f64,
    pub cholesterol: f64,
    pub sodium: f64,
    pub total_carbs: f64,
    pub dietary_fiber: f64,
    pub total_sugars: f64,
    pub protein: f64,
    pub image_url: Option<String>,
    #[serde(skip_serializing)]
    pub s3_key: Option<String>,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, name, brand, serving_size, calories, total_fat, saturated_fat, \
                       trans_fat, cholesterol, sodium, total_carbs, dietary_fiber, \
                       total_sugars, protein, image_url, s3_key, created_at";

pub async fn list(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<BankEntry>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM ingredient_bank WHERE user_id = $1 ORDER BY created_at DESC"
    );
    let rows = sqlx::query_as::<_, BankEntry>(&sql)
        .bind(user_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    facts: &NutritionFacts,
    image_url: &str,
    s3_key: &str,
) -> anyhow::Result<BankEntry> {
    let sql = format!(
        r#"
        INSERT INTO ingredient_bank
            (user_id, name, brand, serving_size, calories, total_fat, saturated_fat,
             trans_fat, cholesterol, sodium, total_carbs, dietary_fiber, total_sugars,
             protein, image_url, s3_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING {COLUMNS}
        "#
    );
    let entry = sqlx::query_as::<_, BankEntry>(&sql)
        .bind(user_id)
        .bind(&facts.name)
        .bind(&facts.brand)
        .bind(&facts.serving_size)
        .bind(facts.calories)
        .bind(facts.total_fat)
        .bind(facts.saturated_fat)
        .bind(facts.trans_fat)
        .bind(facts.cholesterol)
        .bind(facts.sodium)
        .bind(facts.total_carbs)
        .bind(facts.dietary_fiber)
        .bind(facts.total_sugars)
        .bind(facts.protein)
        .bind(image_url)
        .bind(s3_key)
        .fetch_one(db)
        .await?;
    Ok(entry)
}

/// Removes the row and hands back the object key so the caller can clean up
/// storage.
pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Option<String>>> {
    let row: Option<(Option<String>,)> = sqlx::query_as(
        r#"
        DELETE FROM ingredient_bank
        WHERE id = $1 AND user_id = $2
        RETURNING s3_key
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(|(key,)| key))
}
