use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;

use eventbite_core::access::AccessToken;
use eventbite_core::contributions::{Contribution, ContributionUpdate, NewContribution};
use eventbite_core::directory::{Event, EventBoard, EventSnapshot, EventUpdate, NewEvent};
use eventbite_core::errors::{AdmissionError, Error, ErrorKind, Result, ValidationError};
use eventbite_core::goals::{Goal, NewGoal};
use eventbite_core::progress::GoalProgress;
use eventbite_core::session::EventSnapshotSource;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const API_PREFIX: &str = "/api/v1";

/// Error payload returned by the server.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    code: Option<u16>,
    kind: Option<String>,
    message: Option<String>,
    details: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

#[derive(Serialize)]
struct MasterLoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct FulfilledUpdate {
    fulfilled: bool,
}

/// Client for the Eventbite REST API.
///
/// A successful login stores the issued bearer token on the client; it is
/// sent with every later request until `logout` or until the client is dropped.
pub struct EventbiteClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: RwLock<Option<HeaderValue>>,
}

impl EventbiteClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: RwLock::new(None),
        })
    }

    /// Attaches an already issued bearer token.
    pub fn with_token(self, access_token: &str) -> Result<Self> {
        let header = bearer(access_token)?;
        Ok(Self {
            auth_header: RwLock::new(Some(header)),
            ..self
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn has_token(&self) -> bool {
        self.auth_header.read().await.is_some()
    }

    /// Forgets the held token.
    pub async fn logout(&self) {
        *self.auth_header.write().await = None;
    }

    async fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth) = self.auth_header.read().await.as_ref() {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let url = self.url(path);
        debug!("[EventbiteApi] {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .headers(self.headers().await);
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.send().await.map_err(transport_error)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None).await?;
        self.parse_response(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.send(Method::POST, path, Some(to_json(body)?)).await?;
        self.parse_response(response).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.send(Method::PUT, path, Some(to_json(body)?)).await?;
        self.parse_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self.send(Method::DELETE, path, None).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.map_err(transport_error)?;
        Err(error_from_response(status, &body))
    }

    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::Unexpected(format!(
                "Failed to parse response: {} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }

    // Health

    /// True when the server answers its liveness probe.
    pub async fn healthz(&self) -> Result<bool> {
        let response = self.send(Method::GET, "/healthz", None).await?;
        Ok(response.status().is_success())
    }

    // Event directory

    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.get("/events").await
    }

    pub async fn create_event(&self, new_event: &NewEvent) -> Result<Event> {
        self.post("/events", new_event).await
    }

    pub async fn get_event(&self, event_id: &str) -> Result<Event> {
        self.get(&format!("/events/{}", event_id)).await
    }

    pub async fn update_event(&self, event_id: &str, update: &EventUpdate) -> Result<Event> {
        self.put(&format!("/events/{}", event_id), update).await
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.delete(&format!("/events/{}", event_id)).await
    }

    pub async fn reset_event(&self, event_id: &str) -> Result<Event> {
        self.post(&format!("/events/{}/reset", event_id), &serde_json::json!({}))
            .await
    }

    pub async fn get_event_snapshot(&self, event_id: &str) -> Result<EventSnapshot> {
        self.get(&format!("/events/{}/snapshot", event_id)).await
    }

    pub async fn get_event_board(&self, event_id: &str) -> Result<EventBoard> {
        self.get(&format!("/events/{}/board", event_id)).await
    }

    // Access

    /// Logs in as admin of one event and keeps the issued token.
    pub async fn login_event(&self, event_id: &str, password: &str) -> Result<AccessToken> {
        let token: AccessToken = self
            .post(
                &format!("/events/{}/login", event_id),
                &LoginRequest { password },
            )
            .await?;
        self.store_token(&token).await?;
        Ok(token)
    }

    /// Logs in with the master credential and keeps the issued token.
    pub async fn login_master(&self, username: &str, password: &str) -> Result<AccessToken> {
        let token: AccessToken = self
            .post("/auth/master", &MasterLoginRequest { username, password })
            .await?;
        self.store_token(&token).await?;
        Ok(token)
    }

    async fn store_token(&self, token: &AccessToken) -> Result<()> {
        let header = bearer(&token.access_token)?;
        *self.auth_header.write().await = Some(header);
        Ok(())
    }

    // Goals

    pub async fn list_goals(&self, event_id: &str) -> Result<Vec<Goal>> {
        self.get(&format!("/events/{}/goals", event_id)).await
    }

    pub async fn create_goal(&self, event_id: &str, new_goal: &NewGoal) -> Result<Goal> {
        self.post(&format!("/events/{}/goals", event_id), new_goal)
            .await
    }

    pub async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        self.delete(&format!("/goals/{}", goal_id)).await
    }

    pub async fn get_goal_progress(&self, goal_id: &str) -> Result<GoalProgress> {
        self.get(&format!("/goals/{}/progress", goal_id)).await
    }

    // Contributions

    pub async fn list_event_contributions(&self, event_id: &str) -> Result<Vec<Contribution>> {
        self.get(&format!("/events/{}/contributions", event_id))
            .await
    }

    pub async fn add_contribution(&self, input: &NewContribution) -> Result<Contribution> {
        self.post("/contributions", input).await
    }

    pub async fn update_contribution(
        &self,
        contribution_id: &str,
        update: &ContributionUpdate,
    ) -> Result<Contribution> {
        self.put(&format!("/contributions/{}", contribution_id), update)
            .await
    }

    pub async fn set_contribution_fulfilled(
        &self,
        contribution_id: &str,
        fulfilled: bool,
    ) -> Result<Contribution> {
        self.put(
            &format!("/contributions/{}/fulfilled", contribution_id),
            &FulfilledUpdate { fulfilled },
        )
        .await
    }

    pub async fn delete_contribution(&self, contribution_id: &str) -> Result<()> {
        self.delete(&format!("/contributions/{}", contribution_id))
            .await
    }
}

#[async_trait]
impl EventSnapshotSource for EventbiteClient {
    async fn fetch_snapshot(&self, event_id: &str) -> Result<EventSnapshot> {
        self.get_event_snapshot(event_id).await
    }
}

fn bearer(access_token: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(&format!("Bearer {}", access_token))
        .map_err(|e| Error::Unexpected(format!("Invalid access token format: {}", e)))
}

fn to_json<B: Serialize>(body: &B) -> Result<serde_json::Value> {
    serde_json::to_value(body)
        .map_err(|e| Error::Unexpected(format!("Failed to encode request: {}", e)))
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        Error::Connectivity(err.to_string())
    } else {
        Error::Unexpected(format!("Request failed: {}", err))
    }
}

/// Rebuilds the core error the server reported.
fn error_from_response(status: StatusCode, body: &str) -> Error {
    let parsed = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let kind = parsed
        .as_ref()
        .and_then(|b| b.kind.as_deref())
        .and_then(ErrorKind::parse)
        .unwrap_or_else(|| kind_for_status(status));
    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone())
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body.chars().take(200).collect::<String>()));
    let details = parsed.as_ref().and_then(|b| b.details.as_ref());

    if let Some(code) = parsed.as_ref().and_then(|b| b.code) {
        if code != status.as_u16() {
            warn!("[EventbiteApi] error body code {} differs from status {}", code, status);
        }
    }

    match kind {
        ErrorKind::InvalidInput => Error::Validation(ValidationError::InvalidInput(message)),
        ErrorKind::CapacityExceeded => {
            let field = |name: &str| details.and_then(|d| d.get(name));
            Error::Admission(AdmissionError::CapacityExceeded {
                goal: field("goal")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                total: field("total").and_then(|v| v.as_i64()).unwrap_or_default(),
                target: field("target")
                    .and_then(|v| v.as_i64())
                    .and_then(|v| i32::try_from(v).ok())
                    .unwrap_or_default(),
            })
        }
        ErrorKind::DuplicateContributor => {
            let field = |name: &str| {
                details
                    .and_then(|d| d.get(name))
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string()
            };
            Error::Admission(AdmissionError::DuplicateContributor {
                goal: field("goal"),
                contributor: field("contributor"),
            })
        }
        ErrorKind::Unauthorized => Error::Unauthorized(message),
        ErrorKind::NotFound => Error::not_found(message),
        ErrorKind::ConnectivityFailure => Error::Connectivity(message),
        ErrorKind::Internal => Error::Unexpected(message),
    }
}

fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::InvalidInput,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::Unauthorized,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        // The server answers 408 when its request timeout expires.
        StatusCode::REQUEST_TIMEOUT
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT
        | StatusCode::BAD_GATEWAY => ErrorKind::ConnectivityFailure,
        _ => ErrorKind::Internal,
    }
}
