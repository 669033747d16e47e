use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::grid::DayPlan;
use super::week::iso_date;

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    /// Any date within the wanted week; normalized to its Monday.
    pub week: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeekPlanResponse {
    #[serde(with = "iso_date")]
    pub week_start: Date,
    pub label: String,
    #[serde(with = "iso_date")]
    pub prev_week: Date,
    #[serde(with = "iso_date")]
    pub next_week: Date,
    pub days: Vec<DayPlan>,
    /// Same entries as `days`, flat, ordered day then meal slot. Carries
    /// rows the grid drops (contested slots, unrecognized meal types).
    pub entries: Vec<WeekEntry>,
}

#[derive(Debug, Serialize)]
pub struct WeekEntry {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub recipe_name: String,
    pub image_url: Option<String>,
    pub day_of_week: String,
    pub meal_type: String,
}

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub recipe_id: Uuid,
    #[serde(with = "iso_date")]
    pub week_start: Date,
    pub day_of_week: String,
    pub meal_type: String,
}

#[derive(Debug, Serialize)]
pub struct AddEntryResponse {
    pub id: Uuid,
    #[serde(with = "iso_date")]
    pub week_start: Date,
}
