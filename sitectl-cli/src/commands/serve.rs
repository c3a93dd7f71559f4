//! HTTP server command
//!
//! Opens the store, brings the schema up to date, then serves the API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use sitectl_server::db::create_pool;
use sitectl_server::http::{run_server, ServerConfig};
use sitectl_server::migrations;

use crate::config::load_config;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "SITECTL_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (default: sqlite://data/database.sqlite)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Largest accepted image upload in bytes
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = load_config()?;

    let bind = match args.bind {
        Some(addr) => addr,
        None => config
            .bind()
            .parse()
            .with_context(|| format!("Invalid bind address in config: {}", config.bind()))?,
    };
    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database_url().to_string());

    tracing::info!(database = %database_url, "Opening store");
    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool)
        .await
        .context("Failed to apply migrations")?;

    let server_config = ServerConfig {
        bind_addr: bind,
        cors_permissive: args.cors_permissive || config.server.cors_permissive.unwrap_or(false),
        max_upload_bytes: args
            .max_upload_bytes
            .unwrap_or_else(|| config.max_upload_bytes()),
    };

    tracing::info!("Starting sitectl server on {}", bind);

    // Blocks until shutdown
    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
