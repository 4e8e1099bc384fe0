// ABOUTME: FitCoach API server binary
// ABOUTME: Initializes logging, loads configuration and resources, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # FitCoach API Server Binary
//!
//! Starts the FitCoach HTTP API: authentication, profiles, workout plan
//! generation and session history.

use anyhow::Result;
use clap::Parser;
use fitcoach_server::{
    config::{DatabaseUrl, ServerConfig},
    logging,
    resources::ServerResources,
    server,
};
use std::sync::Arc;
use tracing::{error, info};

/// Command-line overrides for the environment configuration
#[derive(Parser)]
#[command(name = "fitcoach-server")]
#[command(about = "FitCoach API - personalized workout plans for the FitCoach mobile app")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/fitcoach.db` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env may carry RUST_LOG and LOG_FORMAT, and config loading logs
    dotenvy::dotenv().ok();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = DatabaseUrl::parse_url(&database_url);
    }
    config.validate()?;

    info!("Starting FitCoach API");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config).await?);
    info!("Database ready: {}", resources.config.database.url);

    display_available_endpoints(&resources);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Log the endpoint table
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(resources: &ServerResources) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let port = resources.config.http_port;
    let base = format!("http://{host}:{port}{}", resources.config.base_path);

    info!("=== Available API Endpoints ===");
    info!("   Health Check:      GET  {base}/health");
    info!("   Readiness:         GET  {base}/ready");
    info!("   User Registration: POST {base}/register");
    info!("   User Login:        POST {base}/login");
    info!("   Profile:           GET  {base}/profile");
    info!("   Update Profile:    PUT  {base}/profile");
    info!("   Generate Workout:  POST {base}/workout");
    info!("   Workout History:   GET  {base}/workout/history");
    info!("   Workout Session:   GET  {base}/workout/{{id}}");
    info!("   Uploaded Photos:   GET  http://{host}:{port}/uploads/{{file}}");
    info!("=== End of Endpoint List ===");
}
