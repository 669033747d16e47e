use serde::Serialize;
use uuid::Uuid;

use super::week::DAYS;

pub const MEAL_TYPES: [&str; 3] = ["breakfast", "lunch", "dinner"];

pub fn day_index(day: &str) -> Option<usize> {
    DAYS.iter().position(|d| d.eq_ignore_ascii_case(day))
}

pub fn slot_index(meal_type: &str) -> Option<usize> {
    MEAL_TYPES.iter().position(|m| m.eq_ignore_ascii_case(meal_type))
}

/// Sort key for flat listings: breakfast, lunch, dinner; anything
/// unrecognized sorts after the known slots.
pub fn slot_sort_key(meal_type: &str) -> usize {
    slot_index(meal_type).unwrap_or(MEAL_TYPES.len())
}

/// One week's meal entry with its resolved recipe.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub entry_id: Uuid,
    pub recipe_id: Uuid,
    pub recipe_name: String,
    pub image_url: Option<String>,
    pub day_of_week: String,
    pub meal_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotCell {
    pub entry_id: Uuid,
    pub recipe_id: Uuid,
    pub recipe_name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DayPlan {
    pub day: &'static str,
    pub breakfast: Option<SlotCell>,
    pub lunch: Option<SlotCell>,
    pub dinner: Option<SlotCell>,
}

/// Maps a week's flat entries onto the fixed Monday..Sunday ×
/// breakfast/lunch/dinner grid. There is no uniqueness constraint on a
/// (day, meal-type) slot, so a contested slot keeps the first entry in
/// input order; entries with an unrecognized day or meal type never occupy
/// a grid cell.
pub fn build_week_grid(entries: &[PlanEntry]) -> Vec<DayPlan> {
    let mut cells: [[Option<SlotCell>; 3]; 7] = Default::default();

    for entry in entries {
        let (Some(d), Some(s)) = (day_index(&entry.day_of_week), slot_index(&entry.meal_type))
        else {
            continue;
        };
        if cells[d][s].is_none() {
            cells[d][s] = Some(SlotCell {
                entry_id: entry.entry_id,
                recipe_id: entry.recipe_id,
                recipe_name: entry.recipe_name.clone(),
                image_url: entry.image_url.clone(),
            });
        }
    }

    cells
        .into_iter()
        .zip(DAYS)
        .map(|([breakfast, lunch, dinner], day)| DayPlan {
            day,
            breakfast,
            lunch,
            dinner,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, meal: &str, name: &str) -> PlanEntry {
        PlanEntry {
            entry_id: Uuid::new_v4(),
            recipe_id: Uuid::new_v4(),
            recipe_name: name.into(),
            image_url: None,
            day_of_week: day.into(),
            meal_type: meal.into(),
        }
    }

    #[test]
    fn grid_has_seven_days_monday_first() {
        let grid = build_week_grid(&[]);
        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0].day, "Monday");
        assert_eq!(grid[6].day, "Sunday");
        assert!(grid.iter().all(|d| d.breakfast.is_none()
            && d.lunch.is_none()
            && d.dinner.is_none()));
    }

    #[test]
    fn entries_land_in_their_slots() {
        let grid = build_week_grid(&[
            entry("Monday", "breakfast", "Oatmeal"),
            entry("Wednesday", "dinner", "Curry"),
        ]);
        assert_eq!(grid[0].breakfast.as_ref().unwrap().recipe_name, "Oatmeal");
        assert_eq!(grid[2].dinner.as_ref().unwrap().recipe_name, "Curry");
        assert!(grid[0].lunch.is_none());
    }

    #[test]
    fn contested_slot_keeps_first_entry() {
        let grid = build_week_grid(&[
            entry("Friday", "lunch", "Soup"),
            entry("Friday", "lunch", "Salad"),
        ]);
        assert_eq!(grid[4].lunch.as_ref().unwrap().recipe_name, "Soup");
    }

    #[test]
    fn unrecognized_meal_type_never_occupies_a_cell() {
        let grid = build_week_grid(&[entry("Tuesday", "brunch", "Pancakes")]);
        assert!(grid[1].breakfast.is_none());
        assert!(grid[1].lunch.is_none());
        assert!(grid[1].dinner.is_none());
    }

    #[test]
    fn slot_sort_key_orders_unknown_last() {
        let mut meals = vec!["dinner", "brunch", "breakfast", "lunch"];
        meals.sort_by_key(|m| slot_sort_key(m));
        assert_eq!(meals, vec!["breakfast", "lunch", "dinner", "brunch"]);
    }

    #[test]
    fn day_index_is_case_insensitive() {
        assert_eq!(day_index("monday"), Some(0));
        assert_eq!(day_index("Sunday"), Some(6));
        assert_eq!(day_index("Someday"), None);
    }
}
