use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error::ApiError;
use super::AppState;
use crate::metadata;

/// Album files are addressed by name and never rewritten in place.
const CACHE_CONTROL: &str = "public, max-age=600, immutable";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// `GET /images/{imageName}`: the album file's bytes, verbatim.
pub(super) async fn get_image(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let name = image_name(name)?;
    let image = state.store.fetch(&name).await?;

    let content_type = image
        .content_type
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        image.bytes,
    )
        .into_response())
}

/// `GET /exif/{imageName}`: capture date and orientation of the album file.
pub(super) async fn get_exif(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let name = image_name(name)?;
    let image = state.store.fetch(&name).await?;
    let tags = metadata::decode_tags(&image.bytes)?;
    let summary = metadata::normalize(&tags);

    tracing::debug!(
        name = %name,
        has_date = summary.date.is_some(),
        orientation = summary.orientation,
        "Normalized EXIF"
    );
    Ok(([(header::CACHE_CONTROL, CACHE_CONTROL)], Json(summary)).into_response())
}

/// `GET /images/` and `GET /exif/` without a name.
pub(super) async fn missing_image_name() -> ApiError {
    ApiError::BadRequest("missing image name".to_string())
}

/// Accept a single, plain file name. Anything that could step outside the
/// album (separators, dot segments) or failed to decode is rejected before
/// the album is contacted.
fn image_name(name: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    let Path(name) = name.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let is_plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control());
    if !is_plain {
        return Err(ApiError::BadRequest(format!("{:?}", name)));
    }
    Ok(name)
}
