use anyhow::Context;
use tracing::info;
use uuid::Uuid;

use super::repo::{self, RecipeIngredient};
use crate::error::ApiError;
use crate::shopping::repo::{insert_drafts, ItemDraft};
use crate::state::AppState;

/// Recipe-to-list expansion: one shopping item draft per ingredient row.
/// Name is copied verbatim; a missing or zero default quantity becomes 1 and
/// a missing or blank default unit becomes "pieces". Defaults are applied
/// here, at expansion time, never rewritten into the recipe rows.
pub fn expand_ingredients(rows: &[RecipeIngredient]) -> Vec<ItemDraft> {
    rows.iter()
        .map(|row| ItemDraft {
            ingredient_name: row.ingredient_name.clone(),
            quantity: row
                .default_quantity
                .filter(|q| q.is_finite() && *q != 0.0)
                .unwrap_or(1.0),
            unit: row
                .default_unit
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or("pieces")
                .to_string(),
        })
        .collect()
}

/// Expands a recipe's ingredients into the user's shopping list. The insert
/// is one batch call; if the store rejects it the error is surfaced as-is —
/// no retry, no partial-cleanup.
pub async fn add_recipe_to_list(
    state: &AppState,
    user_id: Uuid,
    recipe_id: Uuid,
) -> Result<usize, ApiError> {
    repo::get(&state.db, user_id, recipe_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".into()))?;

    let rows = repo::ingredients(&state.db, recipe_id).await?;
    let drafts = expand_ingredients(&rows);
    if drafts.is_empty() {
        return Ok(0);
    }

    insert_drafts(&state.db, user_id, &drafts)
        .await
        .context("batch insert shopping items")?;

    info!(%recipe_id, count = drafts.len(), "recipe expanded to shopping list");
    Ok(drafts.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, qty: Option<f64>, unit: Option<&str>) -> RecipeIngredient {
        RecipeIngredient {
            id: Uuid::new_v4(),
            recipe_id: Uuid::new_v4(),
            ingredient_name: name.into(),
            default_quantity: qty,
            default_unit: unit.map(Into::into),
        }
    }

    #[test]
    fn missing_defaults_become_one_piece() {
        let drafts = expand_ingredients(&[row("Flour", None, None)]);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].ingredient_name, "Flour");
        assert_eq!(drafts[0].quantity, 1.0);
        assert_eq!(drafts[0].unit, "pieces");
    }

    #[test]
    fn present_defaults_are_kept() {
        let drafts = expand_ingredients(&[row("Basmati Rice", Some(2.0), Some("cups"))]);
        assert_eq!(drafts[0].quantity, 2.0);
        assert_eq!(drafts[0].unit, "cups");
    }

    #[test]
    fn zero_quantity_and_blank_unit_are_treated_as_absent() {
        let drafts = expand_ingredients(&[row("Salt", Some(0.0), Some("  "))]);
        assert_eq!(drafts[0].quantity, 1.0);
        assert_eq!(drafts[0].unit, "pieces");
    }

    #[test]
    fn expands_each_row_in_order() {
        let drafts = expand_ingredients(&[
            row("Onion", Some(1.0), Some("pieces")),
            row("Garlic", Some(3.0), Some("cloves")),
        ]);
        assert_eq!(drafts[0].ingredient_name, "Onion");
        assert_eq!(drafts[1].ingredient_name, "Garlic");
    }
}
