// ABOUTME: Server binary for the FitPlan fitness API
// ABOUTME: Loads configuration, initializes logging, database, and LLM provider, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # FitPlan Server Binary
//!
//! Command-line flags override the corresponding environment variables.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use fitplan_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    resources::ServerResources,
    server::FitPlanServer,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitplan-server")]
#[command(about = "FitPlan API - fitness profiles, options, and LLM-generated workout plans")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/fitplan.db` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = DatabaseUrl::parse_url(&database_url)?;
    }

    logging::init_from_env()?;

    info!("Starting FitPlan API");
    config.validate()?;
    info!("{}", config.summary());

    let config = Arc::new(config);
    let database = Database::connect(&config.database.url).await?;
    let resources = Arc::new(ServerResources::with_llm(database, Arc::clone(&config))?);

    if let Err(e) = FitPlanServer::new(resources).run().await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
