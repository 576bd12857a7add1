// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error taxonomy for the relay's HTTP surface
//!
//! Every error is caught at the handler boundary and rendered as a JSON
//! body with an `error` field. Nothing here crashes the process; the only
//! fatal path in the system is the startup credential check.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field is missing or empty (400)
    #[error("{0}")]
    Validation(String),

    /// The Stability API answered with a non-200 status; the status and
    /// parsed error body are forwarded to the caller unmodified
    #[error("upstream returned {status}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    /// Fetching a caller-supplied source URL failed (400)
    #[error("Failed to download image from the provided URL")]
    Download,

    /// The requested saved image does not exist (404)
    #[error("image '{0}' not found")]
    NotFound(String),

    /// Unexpected fault: disk I/O, transport error (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Download => StatusCode::BAD_REQUEST,
            // An out-of-range upstream status falls back to 502
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_body(&self) -> serde_json::Value {
        match self {
            ApiError::Upstream { body, .. } => body.clone(),
            other => json!(other.to_string()),
        }
    }
}

impl From<crate::upstream::client::ClientError> for ApiError {
    fn from(err: crate::upstream::client::ClientError) -> Self {
        use crate::upstream::client::ClientError;
        match err {
            ClientError::Status { status, body } => ApiError::Upstream { status, body },
            ClientError::Download => ApiError::Download,
            ClientError::Transport(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<crate::storage::image_store::StoreError> for ApiError {
    fn from(err: crate::storage::image_store::StoreError) -> Self {
        use crate::storage::image_store::StoreError;
        match err {
            StoreError::NotFound(name) => ApiError::NotFound(name),
            StoreError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.error_body() });
        (status, Json(body)).into_response()
    }
}
