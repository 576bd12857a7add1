// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for GET /saved_images/{filename}

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use std::sync::Arc;
use stability_relay::api::{create_app, AppState};
use stability_relay::{ImageStore, StabilityClient, UuidFileNames};
use tempfile::TempDir;
use tower::util::ServiceExt;

fn setup_state(dir: &TempDir) -> AppState {
    // Upstream is never reached by these tests
    let client = StabilityClient::new("http://127.0.0.1:9", "sk-test").unwrap();
    let store = ImageStore::new(dir.path().join("saved_images"), Arc::new(UuidFileNames)).unwrap();
    AppState::new(Arc::new(client), Arc::new(store))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_unknown_file_returns_404_with_error_body() {
    let dir = TempDir::new().unwrap();
    let app = create_app(setup_state(&dir));

    let response = app
        .oneshot(get_request("/saved_images/never-written.png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_saved_file_served_with_content_type() {
    let dir = TempDir::new().unwrap();
    let image_bytes: &[u8] = b"persisted-image-bytes";
    std::fs::create_dir_all(dir.path().join("saved_images")).unwrap();
    std::fs::write(dir.path().join("saved_images/known.png"), image_bytes).unwrap();

    let app = create_app(setup_state(&dir));
    let response = app
        .oneshot(get_request("/saved_images/known.png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], image_bytes);
}

#[tokio::test]
async fn test_path_traversal_is_rejected() {
    let dir = TempDir::new().unwrap();
    // The secret sits one level above the image directory
    std::fs::write(dir.path().join("secret.txt"), b"top secret").unwrap();

    let app = create_app(setup_state(&dir));
    let response = app
        .oneshot(get_request("/saved_images/..%2Fsecret.txt"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_encoded_deep_traversal_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = create_app(setup_state(&dir));

    let response = app
        .oneshot(get_request("/saved_images/..%2F..%2F..%2Fetc%2Fpasswd"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
