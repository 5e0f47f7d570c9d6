use axum::extract::{rejection::JsonRejection, FromRequest};
use eventbite_core::errors::Error as CoreError;

use crate::error::ApiError;

/// JSON body extractor whose rejections are rendered as `INVALID_INPUT` errors.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Core(CoreError::invalid_input(rejection.body_text()))
    }
}
