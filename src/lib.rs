// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod storage;
pub mod upstream;
pub mod version;

// Re-export the pieces most callers need
pub use config::RelayConfig;
pub use storage::{FileNameGenerator, ImageStore, UuidFileNames};
pub use upstream::StabilityClient;
