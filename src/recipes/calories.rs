//! Rough per-unit calorie heuristic for recipe ingredient lists. This is a
//! shopping-level ballpark, not nutritional truth; the ingredient bank's
//! label-derived macro data is the authoritative source.

/// Calories assigned to a unit nobody recognizes (same as "pieces").
const DEFAULT_UNIT_CALORIES: f64 = 80.0;

fn unit_calories(unit: &str) -> f64 {
    match unit.to_lowercase().as_str() {
        "cup" | "cups" => 200.0,
        "tbsp" | "tablespoon" | "tablespoons" => 50.0,
        "tsp" | "teaspoon" | "teaspoons" => 15.0,
        "oz" | "ounce" | "ounces" => 60.0,
        "lb" | "lbs" | "pound" | "pounds" => 800.0,
        "piece" | "pieces" | "whole" => 80.0,
        "can" | "cans" => 250.0,
        "clove" | "cloves" => 5.0,
        "slice" | "slices" => 60.0,
        "g" | "gram" | "grams" => 1.5,
        "ml" => 0.5,
        "l" | "liter" | "liters" => 400.0,
        _ => DEFAULT_UNIT_CALORIES,
    }
}

fn contribution(quantity: Option<f64>, unit: Option<&str>) -> f64 {
    quantity.unwrap_or(1.0) * unit_calories(unit.unwrap_or(""))
}

/// Estimated total for a recipe's ingredient rows, rounded to the nearest
/// whole calorie.
pub fn estimate_calories<'a, I>(rows: I) -> i64
where
    I: IntoIterator<Item = (Option<f64>, Option<&'a str>)>,
{
    rows.into_iter()
        .map(|(qty, unit)| contribution(qty, unit))
        .sum::<f64>()
        .round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_known_units() {
        let total = estimate_calories(vec![
            (Some(2.0), Some("cups")),
            (Some(1.0), Some("tbsp")),
        ]);
        assert_eq!(total, 450);
    }

    #[test]
    fn unknown_unit_falls_back_to_pieces_constant() {
        assert_eq!(estimate_calories(vec![(Some(3.0), Some("bunch"))]), 240);
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        assert_eq!(estimate_calories(vec![(None, Some("cans"))]), 250);
    }

    #[test]
    fn missing_unit_defaults_too() {
        assert_eq!(estimate_calories(vec![(Some(2.0), None)]), 160);
    }

    #[test]
    fn unit_lookup_is_case_insensitive() {
        assert_eq!(estimate_calories(vec![(Some(1.0), Some("CUPS"))]), 200);
        assert_eq!(estimate_calories(vec![(Some(1.0), Some("Tablespoon"))]), 50);
    }

    #[test]
    fn fractional_totals_round_to_nearest() {
        // 300g * 1.5 + 0.5 tsp * 15 = 457.5 -> 458
        let total = estimate_calories(vec![
            (Some(300.0), Some("g")),
            (Some(0.5), Some("tsp")),
        ]);
        assert_eq!(total, 458);
    }

    #[test]
    fn empty_recipe_estimates_zero() {
        assert_eq!(estimate_calories(Vec::new()), 0);
    }
}
