// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// Request for image generation via POST /generate_image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    /// Text prompt describing the desired image
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateImageRequest {
    /// Validate the request and return the prompt to forward upstream.
    /// A missing, empty, or whitespace-only prompt is rejected.
    pub fn validate(&self) -> Result<&str, ApiError> {
        match self.prompt.as_deref() {
            Some(prompt) if !prompt.trim().is_empty() => Ok(prompt),
            _ => Err(ApiError::Validation("Prompt is required".to_string())),
        }
    }
}
