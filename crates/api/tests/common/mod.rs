#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use lorebook_api::config::ServerConfig;
use lorebook_api::router::build_app_router;
use lorebook_api::state::AppState;
use lorebook_api::uploads::ImageUploads;
use lorebook_db::models::{Character, Place};
use lorebook_db::MemoryStore;

/// Build a test `ServerConfig` whose files all live under `root`.
pub fn test_config(root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        characters_file: root.join("data/characters.json"),
        places_file: root.join("data/places.json"),
        assets_dir: root.join("assets/images"),
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
    }
}

/// A router over file-backed stores in a temp directory.
///
/// The directory is removed when the `TestApp` is dropped.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub dir: TempDir,
}

impl TestApp {
    /// Start with empty resource files.
    pub async fn new() -> Self {
        Self::with_files("[]", "[]").await
    }

    /// Start with the given raw contents for the characters and places files.
    pub async fn with_files(characters: &str, places: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(config.characters_file.parent().unwrap()).unwrap();
        std::fs::write(&config.characters_file, characters).unwrap();
        std::fs::write(&config.places_file, places).unwrap();

        let state = AppState::open(config.clone()).await.unwrap();
        let router = build_app_router(state, &config);
        Self {
            router,
            config,
            dir,
        }
    }

    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// A router over in-memory stores seeded with the given records.
pub fn build_memory_app(characters: Vec<Character>, places: Vec<Place>) -> Router {
    let config = test_config(Path::new("/nonexistent"));
    let state = AppState {
        config: Arc::new(config.clone()),
        characters: Arc::new(MemoryStore::with_records(characters)),
        places: Arc::new(MemoryStore::with_records(places)),
        uploads: Arc::new(ImageUploads::new(&config.assets_dir)),
    };
    build_app_router(state, &config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PATCH, uri, body).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Ids of a JSON array of records, in order.
pub fn ids(json: &serde_json::Value) -> Vec<u64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|record| record["id"].as_u64().unwrap())
        .collect()
}

pub const BOUNDARY: &str = "lorebook-test-boundary";

/// One part of a hand-built multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

/// Encode `parts` as a `multipart/form-data` body delimited by [`BOUNDARY`].
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}
