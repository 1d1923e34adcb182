use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/habits", get(handlers::list_habits).post(handlers::create_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(state)
}
