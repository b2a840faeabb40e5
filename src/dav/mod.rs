//! Read-only WebDAV access to the configured Nextcloud album.
//!
//! Each fetch is a single authenticated GET; failures are returned as-is so
//! the HTTP layer can log them. There is no retry and no caching.

pub mod error;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

pub use error::DavError;

use crate::config::Config;

/// Raw image bytes as served by the album.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Source of album images, keyed by file name.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<FetchedImage, DavError>;
}

/// Nextcloud WebDAV album client.
pub struct DavClient {
    client: Client,
    album_url: Url,
    username: String,
    password: String,
}

impl std::fmt::Debug for DavClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DavClient")
            .field("album_url", &self.album_url.as_str())
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl DavClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            album_url: config.album_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// URL of `name` inside the album; `name` is encoded as one path segment.
    fn image_url(&self, name: &str) -> Result<Url, DavError> {
        let mut url = self.album_url.clone();
        url.path_segments_mut()
            .map_err(|_| DavError::InvalidPath(name.to_string()))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

#[async_trait]
impl ImageStore for DavClient {
    async fn fetch(&self, name: &str) -> Result<FetchedImage, DavError> {
        let url = self.image_url(name)?;
        tracing::debug!(%url, "Fetching image from album");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| DavError::Http {
                source: e,
                path: name.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DavError::HttpStatus {
                status: response.status().as_u16(),
                path: name.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(|e| DavError::Http {
            source: e,
            path: name.to_string(),
        })?;

        tracing::debug!(name, size = bytes.len(), "Fetched image");
        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}
