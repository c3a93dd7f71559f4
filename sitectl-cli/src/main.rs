//! sitectl - content backend for the visa marketing site
//!
//! - `serve`: run the HTTP API (visas, investor visas, jobs, news, uploads)
//! - `migrate`: bring the SQLite schema up to date
//! - `news`: inspect the merged news catalog
//! - `admin`: manage records through the API

use anyhow::Result;
use clap::{Parser, Subcommand};

mod client;
mod commands;
mod config;
mod tracing_setup;
mod ui;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "sitectl",
    author,
    version,
    about = "Serve and manage visa, job and news content",
    long_about = "Runs the site's content API over SQLite and manages visas, investor visas, \
                  jobs and news articles through it."
)]
struct Cli {
    /// Suppress progress spinners (for scripts)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    #[cfg(feature = "server")]
    Serve(commands::serve::ServeArgs),
    /// Apply pending schema migrations
    #[cfg(feature = "server")]
    Migrate(commands::migrate::MigrateArgs),
    /// Inspect the merged news catalog (paths, article pages)
    News(commands::news::NewsArgs),
    /// Manage records (news, jobs, visas) through the API
    Admin(commands::admin::AdminArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_files = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();
    config::log_dotenv(&dotenv_files);
    ui::init_quiet_mode(cli.quiet);

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve(args) => commands::run_serve(args).await?,
        #[cfg(feature = "server")]
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::News(args) => commands::run_news(args).await?,
        Commands::Admin(args) => commands::run_admin(args).await?,
    }
    Ok(())
}
