// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay configuration loaded from the process environment

use anyhow::{bail, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default port the relay listens on
const DEFAULT_PORT: u16 = 8080;

/// Default directory for persisted images
const DEFAULT_SAVE_DIR: &str = "saved_images";

/// Default Stability API base URL
const DEFAULT_UPSTREAM_BASE: &str = "https://api.stability.ai";

/// Configuration for the relay, constructed once at startup and passed
/// into each component. There is no module-level global state.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Bearer credential for the Stability API
    pub api_key: String,
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Base directory for persisted images
    pub save_dir: PathBuf,
    /// Base URL of the upstream Stability API
    pub upstream_base: String,
}

impl RelayConfig {
    /// Load configuration from the process environment.
    ///
    /// `STABILITY_API_KEY` is required; a missing or empty key refuses
    /// startup rather than deferring the failure to the first request.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = match lookup("STABILITY_API_KEY") {
            Some(key) if !key.trim().is_empty() => key,
            _ => bail!("STABILITY_API_KEY is not set"),
        };

        let port = match lookup("RELAY_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("invalid RELAY_PORT '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        let save_dir = lookup("IMAGE_SAVE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_DIR));

        let upstream_base = lookup("STABILITY_API_BASE")
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE.to_string());

        Ok(Self {
            api_key,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            save_dir,
            upstream_base,
        })
    }
}
