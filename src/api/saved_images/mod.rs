// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod handler;

pub use handler::serve_image_handler;

/// Route prefix under which persisted images are served
pub const SAVED_IMAGES_ROUTE: &str = "/saved_images";
