// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the StabilityClient against a stub upstream server

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use stability_relay::upstream::client::ClientError;
use stability_relay::StabilityClient;

async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_generate_sends_bearer_and_accept_headers() {
    let upstream = Router::new().route(
        "/v2beta/stable-image/generate/core",
        post(|headers: HeaderMap| async move {
            let authorized = headers
                .get("authorization")
                .map(|v| v == "Bearer sk-test")
                .unwrap_or(false);
            let accepts_images = headers
                .get("accept")
                .map(|v| v == "image/*")
                .unwrap_or(false);
            if authorized && accepts_images {
                b"generated-bytes".as_slice().into_response()
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    axum::Json(json!({"name": "unauthorized"})),
                )
                    .into_response()
            }
        }),
    );
    let base = spawn_upstream(upstream).await;

    let client = StabilityClient::new(&base, "sk-test").unwrap();
    let bytes = client.generate("a red fox").await.unwrap();
    assert_eq!(&bytes[..], b"generated-bytes");
}

#[tokio::test]
async fn test_generate_non_200_yields_status_and_parsed_body() {
    let upstream = Router::new().route(
        "/v2beta/stable-image/generate/core",
        post(|| async {
            (
                StatusCode::PAYMENT_REQUIRED,
                axum::Json(json!({"name": "payment_required"})),
            )
        }),
    );
    let base = spawn_upstream(upstream).await;

    let client = StabilityClient::new(&base, "sk-test").unwrap();
    let err = client.generate("a red fox").await.unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 402);
            assert_eq!(body, json!({"name": "payment_required"}));
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_non_json_error_body_wrapped_as_string() {
    let upstream = Router::new().route(
        "/v2beta/stable-image/generate/core",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream blew up") }),
    );
    let base = spawn_upstream(upstream).await;

    let client = StabilityClient::new(&base, "sk-test").unwrap();
    let err = client.generate("a red fox").await.unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, json!("upstream blew up"));
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_202_is_forwarded_not_saved_as_image() {
    // Only a 200 yields image bytes; a 2xx status other than 200 carries
    // an error payload and must surface with its status and body
    let upstream = Router::new().route(
        "/v2beta/stable-image/generate/core",
        post(|| async {
            (
                StatusCode::ACCEPTED,
                axum::Json(json!({"id": "pending-generation"})),
            )
        }),
    );
    let base = spawn_upstream(upstream).await;

    let client = StabilityClient::new(&base, "sk-test").unwrap();
    let err = client.generate("a red fox").await.unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 202);
            assert_eq!(body, json!({"id": "pending-generation"}));
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_source_non_200_success_status_is_download_error() {
    let upstream = Router::new().route(
        "/img.png",
        get(|| async { (StatusCode::ACCEPTED, b"not-yet-ready".as_slice()) }),
    );
    let base = spawn_upstream(upstream).await;

    let client = StabilityClient::new(&base, "sk-test").unwrap();
    let err = client
        .fetch_source(&format!("{}/img.png", base))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Download));
}

#[tokio::test]
async fn test_upscale_returns_image_bytes() {
    let upstream = Router::new().route(
        "/v2beta/stable-image/upscale/fast",
        post(|| async { b"upscaled-bytes".as_slice() }),
    );
    let base = spawn_upstream(upstream).await;

    let client = StabilityClient::new(&base, "sk-test").unwrap();
    let bytes = client
        .upscale(bytes::Bytes::from_static(b"source"))
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"upscaled-bytes");
}

#[tokio::test]
async fn test_fetch_source_returns_bytes_on_200() {
    let upstream = Router::new().route("/img.png", get(|| async { b"source-bytes".as_slice() }));
    let base = spawn_upstream(upstream).await;

    let client = StabilityClient::new(&base, "sk-test").unwrap();
    let bytes = client
        .fetch_source(&format!("{}/img.png", base))
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"source-bytes");
}

#[tokio::test]
async fn test_fetch_source_non_200_is_download_error() {
    let upstream = Router::new();
    let base = spawn_upstream(upstream).await;

    let client = StabilityClient::new(&base, "sk-test").unwrap();
    let err = client
        .fetch_source(&format!("{}/missing.png", base))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Download));
}
