// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image upscale request types and validation
//!
//! The upscale endpoint accepts a JSON body naming a remote source image.
//! Raw multipart upload is deliberately not supported; the relay fetches
//! the source itself so the input contract stays a single JSON shape.

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// Request for image upscaling via POST /upscale_image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpscaleImageRequest {
    /// URL of the source image to upscale
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UpscaleImageRequest {
    /// Validate the request and return the source URL to fetch.
    pub fn validate(&self) -> Result<&str, ApiError> {
        match self.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(ApiError::Validation("image_url is required".to_string())),
        }
    }
}
