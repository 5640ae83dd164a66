// ABOUTME: FitPlan HTTP server binary
// ABOUTME: Loads environment configuration, initializes logging, and serves the plan API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # FitPlan Server Binary
//!
//! Starts the HTTP API for plan generation, images, quotes, and speech.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use fitplan_server::{
    config::environment::ServerConfig, logging, resources::ServerResources, server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitplan-server")]
#[command(about = "FitPlan - AI-generated weekly workout and diet plans")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    logging::init_from_env()?;

    info!("Starting FitPlan server");
    info!("{}", config.summary());

    fitplan_providers::initialize_shared_client(
        config.http_client.timeout_secs,
        config.http_client.connect_timeout_secs,
    );

    let resources = Arc::new(ServerResources::new(config));

    if let Err(e) = server::run(resources).await {
        error!(error = %e, "Server error");
        return Err(e);
    }
    Ok(())
}
