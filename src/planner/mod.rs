mod dto;
pub mod grid;
mod handlers;
mod repo;
pub mod week;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
