use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::Config,
    main_lib::AppState,
    models::{FulfilledUpdate, LoginRequest, MasterLoginRequest},
};

mod access;
mod contributions;
mod events;
mod goals;
mod health;

pub use health::{healthz, readyz};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        health::readyz,
        events::list_events,
        events::create_event,
        events::get_event,
        events::update_event,
        events::delete_event,
        events::reset_event,
        events::get_event_snapshot,
        events::get_event_board,
        access::login_event,
        access::login_master,
        goals::list_goals,
        goals::create_goal,
        goals::delete_goal,
        goals::get_goal_progress,
        contributions::list_event_contributions,
        contributions::add_contribution,
        contributions::update_contribution,
        contributions::set_contribution_fulfilled,
        contributions::delete_contribution,
    ),
    components(schemas(LoginRequest, MasterLoginRequest, FulfilledUpdate)),
    tags((name = "eventbite"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Origins are checked when the configuration is loaded.
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect::<Vec<_>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .merge(health::router())
        .merge(events::router())
        .merge(access::router())
        .merge(goals::router())
        .merge(contributions::router());

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
