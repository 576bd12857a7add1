// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod generate_image;
pub mod http_server;
pub mod saved_images;
pub mod upscale_image;

pub use errors::ApiError;
pub use http_server::{create_app, start_server, AppState};
