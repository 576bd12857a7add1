// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Saved image serving handler

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::storage::content_type_for;

/// GET /saved_images/{filename} - Serve a persisted image
///
/// The store resolves names strictly within its base directory; traversal
/// attempts report as 404 rather than being served.
pub async fn serve_image_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state.store.read(&filename).await?;
    debug!("serving {} ({} bytes)", filename, bytes.len());

    let content_type = content_type_for(&filename);
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
