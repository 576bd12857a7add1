// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod image_store;

pub use image_store::{content_type_for, FileNameGenerator, ImageStore, UuidFileNames};
