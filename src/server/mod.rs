//! HTTP surface: image bytes and normalized EXIF for files in the album.

pub mod error;
mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::dav::ImageStore;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ImageStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/images/{image_name}", get(handlers::get_image))
        .route("/exif/{image_name}", get(handlers::get_exif))
        .route("/images/", get(handlers::missing_image_name))
        .route("/exif/", get(handlers::missing_image_name))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use bytes::Bytes;
    use tower::ServiceExt;

    use crate::dav::{DavError, FetchedImage};
    use crate::metadata::decode::tests::sample_jpeg;

    enum Reply {
        Image(Vec<u8>, Option<&'static str>),
        Status(u16),
    }

    /// In-memory album that answers every fetch with the same reply and
    /// records the requested names.
    struct FakeAlbum {
        reply: Reply,
        requested: Mutex<Vec<String>>,
    }

    impl FakeAlbum {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                requested: Mutex::new(Vec::new()),
            })
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageStore for FakeAlbum {
        async fn fetch(&self, name: &str) -> Result<FetchedImage, DavError> {
            self.requested.lock().unwrap().push(name.to_string());
            match &self.reply {
                Reply::Image(bytes, content_type) => Ok(FetchedImage {
                    bytes: Bytes::from(bytes.clone()),
                    content_type: content_type.map(str::to_string),
                }),
                Reply::Status(status) => Err(DavError::HttpStatus {
                    status: *status,
                    path: name.to_string(),
                }),
            }
        }
    }

    async fn get(album: &Arc<FakeAlbum>, uri: &str) -> Response {
        let app = router(AppState::new(album.clone()));
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_image_bytes_served_with_cache_header() {
        let album = FakeAlbum::new(Reply::Image(b"\xff\xd8raw".to_vec(), Some("image/jpeg")));
        let response = get(&album, "/images/IMG_0001.jpg").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=600, immutable"
        );
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
        assert_eq!(&body_bytes(response).await[..], b"\xff\xd8raw");
        assert_eq!(album.requested(), vec!["IMG_0001.jpg"]);
    }

    #[tokio::test]
    async fn test_image_without_content_type() {
        let album = FakeAlbum::new(Reply::Image(b"raw".to_vec(), None));
        let response = get(&album, "/images/IMG_0001.jpg").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_image_name_is_percent_decoded() {
        let album = FakeAlbum::new(Reply::Image(b"raw".to_vec(), None));
        let response = get(&album, "/images/IMG%200001.jpg").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(album.requested(), vec!["IMG 0001.jpg"]);
    }

    #[tokio::test]
    async fn test_exif_summary() {
        let album = FakeAlbum::new(Reply::Image(sample_jpeg(), Some("image/jpeg")));
        let response = get(&album, "/exif/IMG_0001.jpg").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=600, immutable"
        );
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "date": {
                    "year": 2023, "month": 5, "day": 1,
                    "hour": 10, "minute": 0, "second": 0, "millisecond": 250
                },
                "orientation": 6
            })
        );
    }

    #[tokio::test]
    async fn test_exif_for_image_without_exif_block() {
        let album = FakeAlbum::new(Reply::Image(vec![0xff, 0xd8, 0xff, 0xd9], None));
        let response = get(&album, "/exif/plain.jpg").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!({ "orientation": 1 }));
    }

    #[tokio::test]
    async fn test_exif_decode_failure_is_generic_500() {
        let album = FakeAlbum::new(Reply::Image(b"definitely not an image".to_vec(), None));
        let response = get(&album, "/exif/notes.txt").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Failed to make request" })
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_hides_detail() {
        for uri in ["/images/missing.jpg", "/exif/missing.jpg"] {
            let album = FakeAlbum::new(Reply::Status(404));
            let response = get(&album, uri).await;

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(response.headers().get(header::CACHE_CONTROL).is_none());
            let body = body_bytes(response).await;
            let text = String::from_utf8_lossy(&body);
            assert!(!text.contains("404"), "leaked status: {}", text);
            assert!(!text.contains("missing.jpg"), "leaked path: {}", text);
            assert_eq!(
                serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
                serde_json::json!({ "error": "Failed to make request" })
            );
            assert_eq!(album.requested(), vec!["missing.jpg"]);
        }
    }

    #[tokio::test]
    async fn test_invalid_names_rejected_before_fetch() {
        for uri in [
            "/images/",
            "/exif/",
            "/images/%2E%2E",
            "/exif/%2E",
            "/images/a%2Fb.jpg",
            "/exif/a%5Cb.jpg",
            "/images/%FF.jpg",
            "/exif/line%0Abreak.jpg",
        ] {
            let album = FakeAlbum::new(Reply::Image(sample_jpeg(), None));
            let response = get(&album, uri).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
            assert_eq!(
                body_json(response).await,
                serde_json::json!({ "error": "Invalid request" })
            );
            assert!(album.requested().is_empty(), "fetched for {}", uri);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let album = FakeAlbum::new(Reply::Status(500));
        let response = get(&album, "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&body_bytes(response).await[..], b"OK");
        assert!(album.requested().is_empty());
    }
}
