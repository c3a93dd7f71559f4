//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use sitectl_server::db::{create_pool, open_pool};
use sitectl_server::migrations;

use crate::config::load_config;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (default: sqlite://data/database.sqlite)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// List applied migrations instead of applying pending ones
    #[arg(long)]
    pub status: bool,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let config = load_config()?;
    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database_url().to_string());

    if args.status {
        let pool = open_pool(&database_url)
            .await
            .with_context(|| format!("Failed to open database {}", database_url))?;
        let applied = migrations::status(&pool)
            .await
            .context("Failed to read migration history")?;
        for m in &applied {
            println!("{:>3}  {:<32} {}", m.version, m.name, m.applied_at);
        }
        let pending = migrations::MIGRATIONS.len().saturating_sub(applied.len());
        println!("{} applied, {} pending", applied.len(), pending);
        return Ok(());
    }

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    let applied = migrations::run(&pool)
        .await
        .context("Failed to apply migrations")?;

    if applied.is_empty() {
        println!("Schema is up to date");
    } else {
        println!("Applied {} migration(s): {:?}", applied.len(), applied);
    }
    Ok(())
}
