use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::dav::DavError;
use crate::metadata::MetadataError;

/// Errors surfaced to HTTP clients.
///
/// Only the variant reaches the client; the wrapped cause is logged when the
/// response is built and never serialized.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid image name: {0}")]
    BadRequest(String),

    #[error("Album fetch failed: {0}")]
    Fetch(#[from] DavError),

    #[error("EXIF decode failed: {0}")]
    Decode(#[from] MetadataError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Fetch(_) | ApiError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "Invalid request",
            ApiError::Fetch(_) | ApiError::Decode(_) => "Failed to make request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BadRequest(reason) => tracing::debug!("Rejected request: {}", reason),
            ApiError::Fetch(e) if e.is_auth_failure() => tracing::error!(
                "{} (check DAV_USERNAME / DAV_PASSWORD)",
                self
            ),
            _ => tracing::error!("{}", self),
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
