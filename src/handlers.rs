use crate::errors::AppError;
use crate::models::{
    DailySummary, ExerciseDraftPatch, ExerciseForm, FoodDraftPatch, FoodForm, StateResponse,
    StatsResponse, SubmitResponse, ValueForm, ValueRequest, coerce_number,
};
use crate::state::AppState;
use crate::stats::{build_stats, daily_summary};
use crate::tracker::Action;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::State,
    response::{Html, Redirect},
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    let today = daily_summary(&session.snapshot);
    Html(render_index(&session.snapshot, &session.drafts, &today))
}

pub async fn food_add(
    State(state): State<AppState>,
    Form(form): Form<FoodForm>,
) -> Result<Redirect, AppError> {
    state.set_food_draft(form.into()).await;
    state.submit_food().await?;
    Ok(Redirect::to("/"))
}

pub async fn exercise_add(
    State(state): State<AppState>,
    Form(form): Form<ExerciseForm>,
) -> Result<Redirect, AppError> {
    state.set_exercise_draft(form.into()).await;
    state.submit_exercise().await?;
    Ok(Redirect::to("/"))
}

pub async fn weight_update(
    State(state): State<AppState>,
    Form(form): Form<ValueForm>,
) -> Result<Redirect, AppError> {
    state.update_weight(coerce_number(&form.value)).await?;
    Ok(Redirect::to("/"))
}

pub async fn weight_goal(
    State(state): State<AppState>,
    Form(form): Form<ValueForm>,
) -> Result<Redirect, AppError> {
    state.dispatch(Action::SetGoal(coerce_number(&form.value))).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(state.view().await)
}

pub async fn get_today(State(state): State<AppState>) -> Json<DailySummary> {
    let session = state.session.lock().await;
    Json(daily_summary(&session.snapshot))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let session = state.session.lock().await;
    Json(build_stats(&session.snapshot))
}

pub async fn api_food(State(state): State<AppState>) -> Result<Json<SubmitResponse>, AppError> {
    let accepted = state.submit_food().await?;
    Ok(Json(submitted(&state, accepted).await))
}

pub async fn api_exercise(
    State(state): State<AppState>,
) -> Result<Json<SubmitResponse>, AppError> {
    let accepted = state.submit_exercise().await?;
    Ok(Json(submitted(&state, accepted).await))
}

pub async fn api_weight(State(state): State<AppState>) -> Result<Json<SubmitResponse>, AppError> {
    let accepted = state.dispatch(Action::RecordWeight).await?;
    Ok(Json(submitted(&state, accepted).await))
}

pub async fn api_goal(
    State(state): State<AppState>,
    Json(payload): Json<ValueRequest>,
) -> Result<Json<StateResponse>, AppError> {
    state.dispatch(Action::SetGoal(payload.value.coerce())).await?;
    Ok(Json(state.view().await))
}

pub async fn api_current(
    State(state): State<AppState>,
    Json(payload): Json<ValueRequest>,
) -> Result<Json<StateResponse>, AppError> {
    state
        .dispatch(Action::SetCurrentWeight(payload.value.coerce()))
        .await?;
    Ok(Json(state.view().await))
}

pub async fn api_food_draft(
    State(state): State<AppState>,
    Json(patch): Json<FoodDraftPatch>,
) -> Json<StateResponse> {
    state.edit_food_draft(patch).await;
    Json(state.view().await)
}

pub async fn api_exercise_draft(
    State(state): State<AppState>,
    Json(patch): Json<ExerciseDraftPatch>,
) -> Json<StateResponse> {
    state.edit_exercise_draft(patch).await;
    Json(state.view().await)
}

async fn submitted(state: &AppState, accepted: bool) -> SubmitResponse {
    SubmitResponse {
        accepted,
        state: state.view().await,
    }
}
