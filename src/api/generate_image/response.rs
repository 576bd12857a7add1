// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image URL response shared by the generation and upscale endpoints

use serde::{Deserialize, Serialize};

use crate::api::saved_images::SAVED_IMAGES_ROUTE;

/// Successful response: the URL of the persisted image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrlResponse {
    pub image_url: String,
}

impl ImageUrlResponse {
    /// Build the response URL for a saved file name.
    pub fn for_file(file_name: &str) -> Self {
        Self {
            image_url: format!("{}/{}", SAVED_IMAGES_ROUTE, file_name),
        }
    }
}
