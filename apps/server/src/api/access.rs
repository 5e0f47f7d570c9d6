use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use eventbite_core::access::AccessToken;

use crate::{
    auth::TokenScope,
    error::ApiResult,
    extract::ApiJson,
    main_lib::AppState,
    models::{LoginRequest, MasterLoginRequest},
};

#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Admin token for the event"),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "Unknown event")
    )
)]
pub async fn login_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<AccessToken>> {
    let grant = state.access_gate.authorize_admin(&id, &payload.password)?;
    let token = state.auth.issue_token(TokenScope::Event(grant.event_id))?;
    Ok(Json(token))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/master",
    request_body = MasterLoginRequest,
    responses(
        (status = 200, description = "Master token"),
        (status = 401, description = "Wrong or unconfigured credential")
    )
)]
pub async fn login_master(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<MasterLoginRequest>,
) -> ApiResult<Json<AccessToken>> {
    state
        .access_gate
        .authorize_master(&payload.username, &payload.password)?;
    let token = state.auth.issue_token(TokenScope::Master)?;
    Ok(Json(token))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events/{id}/login", post(login_event))
        .route("/auth/master", post(login_master))
}
