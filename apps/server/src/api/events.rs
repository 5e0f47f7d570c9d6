use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use eventbite_core::directory::{Event, EventBoard, EventSnapshot, EventUpdate, NewEvent};

use crate::{auth::Bearer, error::ApiResult, extract::ApiJson, main_lib::AppState};

#[utoipa::path(get, path = "/api/v1/events", responses((status = 200, description = "All events")))]
pub async fn list_events(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Event>>> {
    let events = state.event_service.list_events()?;
    Ok(Json(events))
}

#[utoipa::path(
    post,
    path = "/api/v1/events",
    responses(
        (status = 200, description = "Created event"),
        (status = 400, description = "Missing name or password"),
        (status = 401, description = "Master token required")
    )
)]
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    bearer: Bearer,
    ApiJson(payload): ApiJson<NewEvent>,
) -> ApiResult<Json<Event>> {
    bearer.require_master(&state)?;
    let event = state.event_service.create_event(payload).await?;
    Ok(Json(event))
}

#[utoipa::path(get, path = "/api/v1/events/{id}", responses((status = 200, description = "Event"), (status = 404)))]
pub async fn get_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Event>> {
    let event = state.event_service.get_event(&id)?;
    Ok(Json(event))
}

#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    responses((status = 200, description = "Updated event"), (status = 401), (status = 404))
)]
pub async fn update_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    bearer: Bearer,
    ApiJson(payload): ApiJson<EventUpdate>,
) -> ApiResult<Json<Event>> {
    bearer.require_event_admin(&id)?;
    let event = state.event_service.update_event(&id, payload).await?;
    Ok(Json(event))
}

#[utoipa::path(delete, path = "/api/v1/events/{id}", responses((status = 204), (status = 401), (status = 404)))]
pub async fn delete_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    bearer: Bearer,
) -> ApiResult<StatusCode> {
    bearer.require_master(&state)?;
    let removed = state.event_service.delete_event(&id).await?;
    tracing::info!(event_id = %id, removed, "event deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/reset",
    responses((status = 200, description = "Event emptied and renamed"), (status = 401), (status = 404))
)]
pub async fn reset_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    bearer: Bearer,
) -> ApiResult<Json<Event>> {
    bearer.require_event_admin(&id)?;
    let event = state.event_service.reset_event(&id).await?;
    Ok(Json(event))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/snapshot",
    responses((status = 200, description = "Event with its goals and contributions"), (status = 404))
)]
pub async fn get_event_snapshot(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<EventSnapshot>> {
    let snapshot = state.event_service.get_event_snapshot(&id)?;
    Ok(Json(snapshot))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/board",
    responses((status = 200, description = "Goals with progress"), (status = 404))
)]
pub async fn get_event_board(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<EventBoard>> {
    let board = state.event_service.get_event_board(&id)?;
    Ok(Json(board))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/{id}/reset", post(reset_event))
        .route("/events/{id}/snapshot", get(get_event_snapshot))
        .route("/events/{id}/board", get(get_event_board))
}
