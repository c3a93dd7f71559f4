//! Site configuration file
//!
//! `~/.sitectl/config.toml` (or `SITECTL_CONFIG`) with `[server]` and
//! `[admin]` sections. Flags and environment variables win over the file.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::StaticCredentials;
use crate::error::{CoreError, Result};

pub const DEFAULT_BIND: &str = "127.0.0.1:3030";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/database.sqlite";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3030";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Settings read from `~/.sitectl/config.toml`
///
/// Every field is optional; flags and environment variables take priority
/// over anything set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub admin: AdminSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
    pub database_url: Option<String>,
    pub cors_permissive: Option<bool>,
    pub max_upload_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminSection {
    /// Base URL of the API the admin commands talk to
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SiteConfig {
    /// Load the config file, or defaults when it doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CoreError::config(path, e.to_string()))
    }

    /// `SITECTL_CONFIG`, else `~/.sitectl/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("SITECTL_CONFIG") {
            return PathBuf::from(path);
        }
        config_dir().join("config.toml")
    }

    pub fn bind(&self) -> &str {
        self.server.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn database_url(&self) -> &str {
        self.server
            .database_url
            .as_deref()
            .unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server
            .max_upload_bytes
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn endpoint(&self) -> &str {
        self.admin.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Admin credentials from the file, falling back to the built-in pair.
    pub fn credentials(&self) -> StaticCredentials {
        match (&self.admin.username, &self.admin.password) {
            (Some(user), Some(pass)) => StaticCredentials::new(user.clone(), pass.clone()),
            _ => StaticCredentials::default(),
        }
    }
}

/// `~/.sitectl`
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sitectl")
}
