use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use eventbite_core::goals::{Goal, NewGoal};
use eventbite_core::progress::GoalProgress;

use crate::{auth::Bearer, error::ApiResult, extract::ApiJson, main_lib::AppState};

#[utoipa::path(get, path = "/api/v1/events/{id}/goals", responses((status = 200, description = "Goals of the event")))]
pub async fn list_goals(
    Path(event_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals(&event_id)?;
    Ok(Json(goals))
}

#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/goals",
    responses(
        (status = 200, description = "Created goal"),
        (status = 400, description = "Invalid goal"),
        (status = 401, description = "Event admin token required")
    )
)]
pub async fn create_goal(
    Path(event_id): Path<String>,
    State(state): State<Arc<AppState>>,
    bearer: Bearer,
    ApiJson(mut goal): ApiJson<NewGoal>,
) -> ApiResult<Json<Goal>> {
    bearer.require_event_admin(&event_id)?;
    goal.event_id = event_id;
    let g = state.goal_service.create_goal(goal).await?;
    Ok(Json(g))
}

#[utoipa::path(delete, path = "/api/v1/goals/{id}", responses((status = 204), (status = 401), (status = 404)))]
pub async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    bearer: Bearer,
) -> ApiResult<StatusCode> {
    let goal = state.goal_service.get_goal(&id)?;
    bearer.require_event_admin(&goal.event_id)?;
    let _ = state.goal_service.delete_goal(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/v1/goals/{id}/progress", responses((status = 200, description = "Progress toward the target"), (status = 404)))]
pub async fn get_goal_progress(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<GoalProgress>> {
    let progress = state.goal_service.get_goal_progress(&id)?;
    Ok(Json(progress))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events/{id}/goals", get(list_goals).post(create_goal))
        .route("/goals/{id}", delete(delete_goal))
        .route("/goals/{id}/progress", get(get_goal_progress))
}
