//! Command implementations for the sitectl CLI

pub mod admin;
#[cfg(feature = "server")]
pub mod migrate;
pub mod news;
#[cfg(feature = "server")]
pub mod serve;

use clap::ValueEnum;

pub use admin::run_admin;
#[cfg(feature = "server")]
pub use migrate::run_migrate;
pub use news::run_news;
#[cfg(feature = "server")]
pub use serve::run_serve;

/// Output format shared by listing commands
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Keys only, one per line
    Quiet,
}
