// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Stability API client for image generation and upscaling
//!
//! One outbound attempt per call: no retry, no backoff, no timeout
//! override beyond the reqwest defaults. Transient upstream failures are
//! surfaced directly to the caller.

use anyhow::Result;
use bytes::Bytes;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

/// Output format requested from the upstream API. The observed revisions
/// of this relay disagreed between webp and png; png is used throughout.
pub const OUTPUT_FORMAT: &str = "png";

const GENERATE_PATH: &str = "/v2beta/stable-image/generate/core";
const UPSCALE_PATH: &str = "/v2beta/stable-image/upscale/fast";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Upstream answered with a non-200 status; carries the status code
    /// and the parsed JSON error body
    #[error("upstream returned {status}")]
    Status {
        status: u16,
        body: serde_json::Value,
    },

    /// A caller-supplied source URL could not be fetched
    #[error("failed to download source image")]
    Download,

    /// Transport-level failure talking to upstream
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the Stability image API. Holds the bearer credential and a
/// shared reqwest client; cheap to share across handlers behind an Arc.
pub struct StabilityClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StabilityClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Stability client configured: base_url={}", base_url);
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Generate an image from a text prompt. A 200 yields the raw image
    /// bytes; any other status yields `ClientError::Status`.
    pub async fn generate(&self, prompt: &str) -> Result<Bytes, ClientError> {
        let form = Form::new()
            .text("prompt", prompt.to_string())
            .text("output_format", OUTPUT_FORMAT);

        let url = format!("{}{}", self.base_url, GENERATE_PATH);
        debug!("Stability generate POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "image/*")
            .multipart(form)
            .send()
            .await?;

        Self::image_or_error(response).await
    }

    /// Upscale a source image. Same success/error contract as `generate`.
    pub async fn upscale(&self, image: Bytes) -> Result<Bytes, ClientError> {
        let part = Part::bytes(image.to_vec()).file_name("image");
        let form = Form::new()
            .part("image", part)
            .text("output_format", OUTPUT_FORMAT);

        let url = format!("{}{}", self.base_url, UPSCALE_PATH);
        debug!("Stability upscale POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "image/*")
            .multipart(form)
            .send()
            .await?;

        Self::image_or_error(response).await
    }

    /// Fetch a caller-supplied source image by URL. Any failure, transport
    /// or non-200, reports as `ClientError::Download`.
    pub async fn fetch_source(&self, url: &str) -> Result<Bytes, ClientError> {
        debug!("fetching source image from {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|_| ClientError::Download)?;
        if response.status() != StatusCode::OK {
            return Err(ClientError::Download);
        }
        response.bytes().await.map_err(|_| ClientError::Download)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn image_or_error(response: reqwest::Response) -> Result<Bytes, ClientError> {
        let status = response.status();
        // Only a 200 carries image bytes; everything else, 2xx included,
        // is an error payload to forward
        if status == StatusCode::OK {
            return Ok(response.bytes().await?);
        }
        let text = response.text().await.unwrap_or_default();
        // Upstream errors are JSON; fall back to wrapping raw text
        let body = serde_json::from_str::<serde_json::Value>(&text).unwrap_or_else(|_| json!(text));
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
