// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image upscale endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, warn};

use super::request::UpscaleImageRequest;
use crate::api::errors::ApiError;
use crate::api::generate_image::ImageUrlResponse;
use crate::api::http_server::AppState;
use crate::upstream::OUTPUT_FORMAT;

/// POST /upscale_image - Upscale a source image named by URL
///
/// Pipeline:
/// 1. Validate the image_url field (400 if missing)
/// 2. Fetch the source image (400 with a fixed message if that fails)
/// 3. Forward the bytes to the Stability upscale endpoint
/// 4. Persist and respond with the saved image's URL
pub async fn upscale_image_handler(
    State(state): State<AppState>,
    Json(request): Json<UpscaleImageRequest>,
) -> Result<Json<ImageUrlResponse>, ApiError> {
    let source_url = request.validate().map_err(|e| {
        warn!("upscale validation failed: {}", e);
        e
    })?;

    let source = state.client.fetch_source(source_url).await.map_err(|e| {
        warn!("source image fetch failed for {}: {}", source_url, e);
        ApiError::from(e)
    })?;
    debug!("fetched {} source bytes from {}", source.len(), source_url);

    let image = state.client.upscale(source).await.map_err(|e| {
        warn!("image upscale failed: {}", e);
        ApiError::from(e)
    })?;

    let file_name = state.store.save(&image, OUTPUT_FORMAT).await?;
    debug!("upscaled image persisted as {}", file_name);

    Ok(Json(ImageUrlResponse::for_file(&file_name)))
}
