use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use eventbite_core::contributions::{Contribution, ContributionUpdate, NewContribution};

use crate::{error::ApiResult, extract::ApiJson, main_lib::AppState, models::FulfilledUpdate};

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/contributions",
    responses((status = 200, description = "Contributions to every goal of the event"))
)]
pub async fn list_event_contributions(
    Path(event_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Contribution>>> {
    let contributions = state.contribution_service.get_event_contributions(&event_id)?;
    Ok(Json(contributions))
}

#[utoipa::path(
    post,
    path = "/api/v1/contributions",
    responses(
        (status = 200, description = "Admitted contribution"),
        (status = 400, description = "Invalid name or quantity"),
        (status = 404, description = "Unknown goal"),
        (status = 409, description = "Goal complete or contributor already pledged")
    )
)]
pub async fn add_contribution(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewContribution>,
) -> ApiResult<Json<Contribution>> {
    let contribution = state.contribution_service.add_contribution(payload).await?;
    Ok(Json(contribution))
}

#[utoipa::path(
    put,
    path = "/api/v1/contributions/{id}",
    responses(
        (status = 200, description = "Edited contribution"),
        (status = 400),
        (status = 404),
        (status = 409, description = "Name taken by another contributor")
    )
)]
pub async fn update_contribution(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ContributionUpdate>,
) -> ApiResult<Json<Contribution>> {
    let contribution = state
        .contribution_service
        .update_contribution(&id, payload)
        .await?;
    Ok(Json(contribution))
}

#[utoipa::path(
    put,
    path = "/api/v1/contributions/{id}/fulfilled",
    request_body = FulfilledUpdate,
    responses((status = 200, description = "Contribution with the new flag"), (status = 404))
)]
pub async fn set_contribution_fulfilled(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<FulfilledUpdate>,
) -> ApiResult<Json<Contribution>> {
    let contribution = state
        .contribution_service
        .set_contribution_fulfilled(&id, payload.fulfilled)
        .await?;
    Ok(Json(contribution))
}

#[utoipa::path(delete, path = "/api/v1/contributions/{id}", responses((status = 204), (status = 404)))]
pub async fn delete_contribution(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.contribution_service.delete_contribution(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events/{id}/contributions", get(list_event_contributions))
        .route("/contributions", post(add_contribution))
        .route(
            "/contributions/{id}",
            put(update_contribution).delete(delete_contribution),
        )
        .route(
            "/contributions/{id}/fulfilled",
            put(set_contribution_fulfilled),
        )
}
