use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use eventbite_core::errors::{AdmissionError, Error as CoreError, ErrorKind};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Core(e) => e.kind(),
            ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::Internal(_) => ErrorKind::Internal,
        }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::CapacityExceeded | ErrorKind::DuplicateContributor => StatusCode::CONFLICT,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ConnectivityFailure => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = status_for(kind);
        let details = match &self {
            ApiError::Core(CoreError::Admission(AdmissionError::CapacityExceeded {
                goal,
                total,
                target,
            })) => Some(json!({ "goal": goal, "total": total, "target": target })),
            ApiError::Core(CoreError::Admission(AdmissionError::DuplicateContributor {
                goal,
                contributor,
            })) => Some(json!({ "goal": goal, "contributor": contributor })),
            _ => None,
        };
        if status.is_server_error() {
            tracing::error!(kind = kind.as_str(), "request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            kind: kind.as_str(),
            message: self.to_string(),
            details,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
