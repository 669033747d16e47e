use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: String,
    pub store: Option<String>,
    pub is_purchased: bool,
    pub created_at: OffsetDateTime,
}

/// A shopping item produced by recipe expansion, before insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
}

/// Creation order ascending — the stable ordering the aggregator and the
/// flat view both rely on.
pub async fn list(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ShoppingItem>> {
    let rows = sqlx::query_as::<_, ShoppingItem>(
        r#"
        SELECT id, ingredient_name, quantity, unit, store, is_purchased, created_at
        FROM shopping_list
        WHERE user_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_one(
    db: &PgPool,
    user_id: Uuid,
    ingredient_name: &str,
) -> anyhow::Result<ShoppingItem> {
    let item = sqlx::query_as::<_, ShoppingItem>(
        r#"
        INSERT INTO shopping_list (user_id, ingredient_name)
        VALUES ($1, $2)
        RETURNING id, ingredient_name, quantity, unit, store, is_purchased, created_at
        "#,
    )
    .bind(user_id)
    .bind(ingredient_name)
    .fetch_one(db)
    .await?;
    Ok(item)
}

/// Single multi-row insert; atomic only as far as the store's insert call
/// is. A rejected batch surfaces to the caller unchanged.
pub async fn insert_drafts(db: &PgPool, user_id: Uuid, drafts: &[ItemDraft]) -> anyhow::Result<u64> {
    let names: Vec<String> = drafts.iter().map(|d| d.ingredient_name.clone()).collect();
    let quantities: Vec<f64> = drafts.iter().map(|d| d.quantity).collect();
    let units: Vec<String> = drafts.iter().map(|d| d.unit.clone()).collect();

    let result = sqlx::query(
        r#"
        INSERT INTO shopping_list (user_id, ingredient_name, quantity, unit)
        SELECT $1, t.name, t.qty, t.unit
        FROM UNNEST($2::text[], $3::double precision[], $4::text[]) AS t(name, qty, unit)
        "#,
    )
    .bind(user_id)
    .bind(&names)
    .bind(&quantities)
    .bind(&units)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

/// Field-level partial update: absent fields keep their stored value.
/// `store_touched`/`store` distinguish "leave the store alone" from
/// "clear the store".
pub async fn patch(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    quantity: Option<f64>,
    unit: Option<&str>,
    is_purchased: Option<bool>,
    store_touched: bool,
    store: Option<&str>,
) -> anyhow::Result<Option<ShoppingItem>> {
    let item = sqlx::query_as::<_, ShoppingItem>(
        r#"
        UPDATE shopping_list SET
            quantity     = COALESCE($3, quantity),
            unit         = COALESCE($4, unit),
            is_purchased = COALESCE($5, is_purchased),
            store        = CASE WHEN $6 THEN $7 ELSE store END
        WHERE id = $1 AND user_id = $2
        RETURNING id, ingredient_name, quantity, unit, store, is_purchased, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(quantity)
    .bind(unit)
    .bind(is_purchased)
    .bind(store_touched)
    .bind(store)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM shopping_list WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

// --- stores: plain grouping labels, not referentially enforced ---

pub async fn list_stores(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Store>> {
    let rows = sqlx::query_as::<_, Store>(
        r#"
        SELECT id, name, created_at
        FROM stores
        WHERE user_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_store(db: &PgPool, user_id: Uuid, name: &str) -> anyhow::Result<Store> {
    let store = sqlx::query_as::<_, Store>(
        r#"
        INSERT INTO stores (user_id, name)
        VALUES ($1, $2)
        RETURNING id, name, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(db)
    .await?;
    Ok(store)
}

pub async fn delete_store(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM stores WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
