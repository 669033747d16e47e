use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

use super::grid::PlanEntry;

#[derive(Debug, Clone, FromRow)]
pub struct PlanRow {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub day_of_week: String,
    pub meal_type: String,
    pub recipe_name: String,
    pub image_url: Option<String>,
}

impl From<PlanRow> for PlanEntry {
    fn from(r: PlanRow) -> Self {
        PlanEntry {
            entry_id: r.id,
            recipe_id: r.recipe_id,
            recipe_name: r.recipe_name,
            image_url: r.image_url,
            day_of_week: r.day_of_week,
            meal_type: r.meal_type,
        }
    }
}

/// Entries for one week in creation order; the grid's first-encountered rule
/// depends on this ordering being stable.
pub async fn list_week(db: &PgPool, user_id: Uuid, week: Date) -> anyhow::Result<Vec<PlanRow>> {
    let rows = sqlx::query_as::<_, PlanRow>(
        r#"
        SELECT mp.id, mp.recipe_id, mp.day_of_week, mp.meal_type,
               r.name AS recipe_name, r.image_url
        FROM meal_plan mp
        JOIN recipes r ON r.id = mp.recipe_id
        WHERE mp.user_id = $1 AND mp.week_start = $2
        ORDER BY mp.created_at ASC, mp.id ASC
        "#,
    )
    .bind(user_id)
    .bind(week)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    recipe_id: Uuid,
    week: Date,
    day_of_week: &str,
    meal_type: &str,
) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO meal_plan (user_id, recipe_id, week_start, day_of_week, meal_type)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(recipe_id)
    .bind(week)
    .bind(day_of_week)
    .bind(meal_type)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM meal_plan WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
