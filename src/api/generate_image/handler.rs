// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, warn};

use super::request::GenerateImageRequest;
use super::response::ImageUrlResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::upstream::OUTPUT_FORMAT;

/// POST /generate_image - Generate an image from a text prompt
///
/// Pipeline:
/// 1. Validate the prompt (400 if missing or empty)
/// 2. Forward the prompt to the Stability generate endpoint
/// 3. Persist the returned bytes under a random file name
/// 4. Respond with the saved image's URL
pub async fn generate_image_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<ImageUrlResponse>, ApiError> {
    let prompt = request.validate().map_err(|e| {
        warn!("image generation validation failed: {}", e);
        e
    })?;

    debug!("image generation request: prompt_len={}", prompt.len());

    let image = state.client.generate(prompt).await.map_err(|e| {
        warn!("image generation failed: {}", e);
        ApiError::from(e)
    })?;

    let file_name = state.store.save(&image, OUTPUT_FORMAT).await?;
    debug!("generated image persisted as {}", file_name);

    Ok(Json(ImageUrlResponse::for_file(&file_name)))
}
