//! Environment and config file resolution
//!
//! Priority for every setting: CLI flag / env var (handled by clap) >
//! `~/.sitectl/config.toml` > built-in default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use sitectl_core::SiteConfig;
use tracing::{debug, info};

/// Load `.env` files into the process environment, returning the files
/// that were read.
///
/// Search order:
/// 1. Current directory (`./.env`)
/// 2. `~/.sitectl/.env`
///
/// Variables already set are never overwritten. Runs before argument
/// parsing so clap `env` fallbacks see the values, which is also before
/// tracing exists; call [`log_dotenv`] once it does.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    let env_file = sitectl_core::config::config_dir().join(".env");
    if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
        loaded_from.push(env_file);
    }

    loaded_from
}

pub fn log_dotenv(loaded_from: &[PathBuf]) {
    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.sitectl)");
    }
    for path in loaded_from {
        info!("Loaded .env from {}", path.display());
    }
}

/// `SITECTL_CONFIG` or `~/.sitectl/config.toml`, defaults when absent.
pub fn load_config() -> Result<SiteConfig> {
    let path = SiteConfig::config_path();
    SiteConfig::load_from(&path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Flag/env value, else the config file's endpoint.
pub fn resolve_endpoint(flag: Option<String>, config: &SiteConfig) -> String {
    flag.unwrap_or_else(|| config.endpoint().to_string())
        .trim_end_matches('/')
        .to_string()
}
