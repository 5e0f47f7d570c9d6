use std::sync::Arc;

use crate::{
    auth::AuthManager,
    config::{Config, LogFormat},
};
use eventbite_core::{
    access::{AccessGate, AccessGateTrait},
    contributions::{ContributionService, ContributionServiceTrait},
    directory::{EventRepositoryTrait, EventService, EventServiceTrait},
    goals::{GoalService, GoalServiceTrait},
};
use eventbite_storage_sqlite::{
    db, ContributionRepository, EventRepository, GoalRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub event_service: Arc<dyn EventServiceTrait + Send + Sync>,
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub contribution_service: Arc<dyn ContributionServiceTrait + Send + Sync>,
    pub access_gate: Arc<dyn AccessGateTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let event_repo = Arc::new(EventRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let contribution_repo = Arc::new(ContributionRepository::new(pool.clone(), writer.clone()));

    let event_service = Arc::new(EventService::new(event_repo.clone()));
    let goal_service = Arc::new(GoalService::new(
        goal_repo.clone(),
        event_repo.clone(),
        contribution_repo.clone(),
    ));
    let contribution_service = Arc::new(ContributionService::new(
        contribution_repo.clone(),
        goal_repo.clone(),
    ));

    let events_for_gate: Arc<dyn EventRepositoryTrait> = event_repo;
    let access_gate = Arc::new(AccessGate::new(events_for_gate, config.master.clone())?);
    if access_gate.has_master_credentials() {
        tracing::info!("Master credential configured; directory changes require a master token");
    } else {
        tracing::warn!("No master credential configured; anyone may create or delete events");
    }

    let auth = Arc::new(AuthManager::new(&config.secret_key, config.token_ttl));

    Ok(Arc::new(AppState {
        event_service,
        goal_service,
        contribution_service,
        access_gate,
        auth,
    }))
}
