use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/food/add", post(handlers::food_add))
        .route("/exercise/add", post(handlers::exercise_add))
        .route("/weight/update", post(handlers::weight_update))
        .route("/weight/goal", post(handlers::weight_goal))
        .route("/api/state", get(handlers::get_state))
        .route("/api/today", get(handlers::get_today))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/food", post(handlers::api_food))
        .route("/api/exercise", post(handlers::api_exercise))
        .route("/api/weight", post(handlers::api_weight))
        .route("/api/goal", put(handlers::api_goal))
        .route("/api/current", put(handlers::api_current))
        .route("/api/draft/food", put(handlers::api_food_draft))
        .route("/api/draft/exercise", put(handlers::api_exercise_draft))
        .with_state(state)
}
