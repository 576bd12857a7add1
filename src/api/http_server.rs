// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server wiring: shared state, router construction, startup

use axum::{
    http::{HeaderName, HeaderValue},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::generate_image::generate_image_handler;
use crate::api::saved_images::{serve_image_handler, SAVED_IMAGES_ROUTE};
use crate::api::upscale_image::upscale_image_handler;
use crate::config::RelayConfig;
use crate::storage::{ImageStore, UuidFileNames};
use crate::upstream::StabilityClient;
use crate::version;

/// Header flagging automated clients so the tunneling layer in front of
/// this service skips its browser interstitial page.
const TUNNEL_BYPASS_HEADER: &str = "ngrok-skip-browser-warning";

/// Shared state passed into every handler. Holds no mutable data; the
/// append-only image directory is the only cross-request state.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<StabilityClient>,
    pub store: Arc<ImageStore>,
}

impl AppState {
    pub fn new(client: Arc<StabilityClient>, store: Arc<ImageStore>) -> Self {
        Self { client, store }
    }
}

/// Build the relay router with all routes and cross-cutting layers.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/generate_image", post(generate_image_handler))
        .route("/upscale_image", post(upscale_image_handler))
        .route(
            &format!("{}/:filename", SAVED_IMAGES_ROUTE),
            get(serve_image_handler),
        )
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(TUNNEL_BYPASS_HEADER),
            HeaderValue::from_static("true"),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the relay server from a loaded configuration.
pub async fn start_server(config: RelayConfig) -> anyhow::Result<()> {
    let client = StabilityClient::new(&config.upstream_base, &config.api_key)?;
    let store = ImageStore::new(config.save_dir.clone(), Arc::new(UuidFileNames))?;
    let state = AppState::new(Arc::new(client), Arc::new(store));

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("relay listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler() -> Html<&'static str> {
    Html(
        "<h1>Stability AI Image API</h1>\
         <p>Use /generate_image and /upscale_image endpoints.</p>",
    )
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": version::VERSION_NUMBER,
    }))
}
