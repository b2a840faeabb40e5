use thiserror::Error;

/// Failures talking to the WebDAV album.
#[derive(Debug, Error)]
pub enum DavError {
    #[error("HTTP error {status} fetching {path}")]
    HttpStatus { status: u16, path: String },

    #[error("HTTP error fetching {path}: {source}")]
    Http {
        source: reqwest::Error,
        path: String,
    },

    #[error("Cannot address {0} inside the album")]
    InvalidPath(String),
}

impl DavError {
    /// Whether the album answered but rejected our credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, DavError::HttpStatus { status: 401 | 403, .. })
    }
}
