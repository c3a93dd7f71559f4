//! Read-only views of the merged news catalog

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use sitectl_core::models::NewsItem;
use sitectl_core::PageMetadata;

use super::OutputFormat;
use crate::client::ApiClient;
use crate::config::{load_config, resolve_endpoint};

#[derive(Parser, Debug)]
pub struct NewsArgs {
    /// API endpoint (default: http://127.0.0.1:3030)
    #[arg(long, env = "SITECTL_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: NewsCommands,
}

#[derive(Subcommand, Debug)]
pub enum NewsCommands {
    /// Print the slug of every article page
    Paths,
    /// Show the article page for a slug
    Show(ShowArgs),
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Article slug
    pub slug: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ArticleView {
    story: NewsItem,
    other_stories: Vec<NewsItem>,
    metadata: PageMetadata,
}

pub async fn run_news(args: NewsArgs) -> Result<()> {
    let config = load_config()?;
    let client = ApiClient::new(&resolve_endpoint(args.endpoint, &config))?;

    match args.command {
        NewsCommands::Paths => {
            let paths: Vec<String> = client.get("/api/news/paths").await?;
            for slug in paths {
                println!("/news/{}", slug);
            }
        }
        NewsCommands::Show(show) => {
            let view: ArticleView = client.get(&format!("/api/news/{}", show.slug)).await?;
            match show.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
                OutputFormat::Quiet => println!("{}", view.story.computed_slug()),
                OutputFormat::Human => print_article(view),
            }
        }
    }
    Ok(())
}

fn print_article(view: ArticleView) {
    let meta = view.metadata;
    let story = view.story;

    println!("{}", meta.title);
    println!("{}", meta.description);
    println!();
    println!("{} · {} · {}", story.tag, story.time, story.read_time);
    println!("{}", story.title);
    if !story.summary.is_empty() {
        println!("{}", story.summary);
    }
    if !view.other_stories.is_empty() {
        println!();
        println!("Other stories:");
        for other in &view.other_stories {
            println!("  /news/{}  {}", other.computed_slug(), other.title);
        }
    }
}
