// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use stability_relay::{api, config::RelayConfig, version};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a .env file before reading configuration
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("starting {}", version::get_version_string());

    // Fail fast on a missing credential; a misconfigured deployment must
    // never come up and silently serve error responses
    let config = RelayConfig::from_env()?;

    api::start_server(config).await
}
