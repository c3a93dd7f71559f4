//! Admin commands - record management through the HTTP API
//!
//! Commands: news, jobs, visas (each: list, add, update, delete)
//!
//! Every command passes the credential check first. After a mutation the
//! full list is fetched again so what gets printed is the server's state.
//!
//! ```bash
//! sitectl admin -u admin -p 1234 news add --title "..." --content-file body.html --image-file hero.png
//! sitectl admin jobs delete 1718000000000
//! sitectl admin visas --investor add --file golden-visa.json
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use reqwest::Method;
use serde_json::{json, Value};

use sitectl_core::jobs::deleted_message;
use sitectl_core::models::{Job, NewsItem, Tags, Visa, VisaKind};
use sitectl_core::{slugify, CredentialVerifier, JobBoard};

use super::OutputFormat;
use crate::client::{ApiClient, Mutation};
use crate::config::{load_config, resolve_endpoint};
use crate::ui;

/// Literal that must be typed to delete an article
pub const CONFIRM_TOKEN: &str = "DELETE";

pub const NO_JOB_FOUND: &str = "No job found with this ID!";

// ============================================================================
// Main Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct AdminArgs {
    /// API endpoint (default: http://127.0.0.1:3030)
    #[arg(long, env = "SITECTL_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Admin username (prompted when omitted on a terminal)
    #[arg(long, short = 'u', env = "SITECTL_ADMIN_USER", global = true)]
    pub username: Option<String>,

    /// Admin password (prompted when omitted on a terminal)
    #[arg(
        long,
        short = 'p',
        env = "SITECTL_ADMIN_PASSWORD",
        global = true,
        hide_env_values = true
    )]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: AdminCommands,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Manage news articles
    News(NewsAdminArgs),
    /// Manage job listings
    Jobs(JobsAdminArgs),
    /// Manage visas (or investor visas with --investor)
    Visas(VisasAdminArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,
}

/// Where a record's image comes from
#[derive(Args, Debug, Default, Clone)]
pub struct ImageArgs {
    /// Upload a local image; the record stores the returned data URI
    #[arg(long, conflicts_with = "image_url")]
    pub image_file: Option<PathBuf>,

    /// Use an image URL as-is
    #[arg(long)]
    pub image_url: Option<String>,
}

impl ImageArgs {
    /// The image value to store, if one was given. A failed upload is an
    /// error so the record is never submitted without it.
    async fn resolve(&self, client: &ApiClient) -> Result<Option<String>> {
        if let Some(path) = &self.image_file {
            let uri = ui::with_spinner_async(
                format!("Uploading {}", path.display()),
                "Image uploaded",
                client.upload_image(path),
            )
            .await
            .context("Image upload failed; nothing was saved")?;
            return Ok(Some(uri));
        }
        Ok(self.image_url.clone())
    }
}

// ============================================================================
// News Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct NewsAdminArgs {
    #[command(subcommand)]
    pub command: NewsAdminCommands,
}

#[derive(Subcommand, Debug)]
pub enum NewsAdminCommands {
    /// List stored articles, newest first
    List(ListArgs),
    /// Add an article; its slug is derived from the title
    Add(ArticleFields),
    /// Edit an article; the slug never changes
    Update(UpdateArticleArgs),
    /// Delete an article (asks for the DELETE confirmation)
    Delete(DeleteArticleArgs),
}

#[derive(Args, Debug, Default)]
pub struct ArticleFields {
    /// Headline
    #[arg(long)]
    pub title: Option<String>,

    /// Short summary shown on cards and in page metadata
    #[arg(long)]
    pub summary: Option<String>,

    /// Category tag (e.g. Canada)
    #[arg(long)]
    pub tag: Option<String>,

    /// Display time (e.g. "2 days ago")
    #[arg(long)]
    pub time: Option<String>,

    /// Reading time (e.g. "4 min read")
    #[arg(long)]
    pub read_time: Option<String>,

    /// Inline HTML body
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the HTML body from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    #[command(flatten)]
    pub image: ImageArgs,
}

impl ArticleFields {
    /// Overwrite the fields that were given, leaving the rest alone.
    fn apply(&self, item: &mut NewsItem) -> Result<()> {
        set(&mut item.title, &self.title);
        set(&mut item.summary, &self.summary);
        set(&mut item.tag, &self.tag);
        set(&mut item.time, &self.time);
        set(&mut item.read_time, &self.read_time);
        set(&mut item.content, &self.content);
        if let Some(path) = &self.content_file {
            item.content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read content file: {}", path.display()))?;
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct UpdateArticleArgs {
    /// Slug of the article to edit
    pub slug: String,

    #[command(flatten)]
    pub fields: ArticleFields,
}

#[derive(Parser, Debug)]
pub struct DeleteArticleArgs {
    /// Slug of the article to delete
    pub slug: String,

    /// Confirmation token; must be exactly DELETE
    #[arg(long)]
    pub confirm: Option<String>,
}

// ============================================================================
// Jobs Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct JobsAdminArgs {
    #[command(subcommand)]
    pub command: JobsAdminCommands,
}

#[derive(Subcommand, Debug)]
pub enum JobsAdminCommands {
    /// List jobs grouped by country
    List(ListArgs),
    /// Add a job
    Add(JobFields),
    /// Edit a job by id
    Update(UpdateJobArgs),
    /// Delete a job by id
    Delete(DeleteJobArgs),
}

#[derive(Args, Debug, Default)]
pub struct JobFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub domain: Option<String>,
    /// Experience as shown (e.g. "3-5 years")
    #[arg(long)]
    pub experience: Option<String>,
    /// Minimum years of experience
    #[arg(long)]
    pub min_experience: Option<i64>,
    #[arg(long)]
    pub time: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    /// Employment type (e.g. Full-time)
    #[arg(long = "type")]
    pub job_type: Option<String>,
    #[arg(long)]
    pub level: Option<String>,
}

impl JobFields {
    fn apply(&self, job: &mut Job) {
        set(&mut job.title, &self.title);
        set(&mut job.company, &self.company);
        set(&mut job.location, &self.location);
        set(&mut job.country, &self.country);
        set(&mut job.city, &self.city);
        set(&mut job.domain, &self.domain);
        set(&mut job.experience, &self.experience);
        set(&mut job.time, &self.time);
        set(&mut job.salary, &self.salary);
        set(&mut job.job_type, &self.job_type);
        set(&mut job.level, &self.level);
        if let Some(years) = self.min_experience {
            job.min_experience = years;
        }
        if let Some(tags) = &self.tags {
            job.tags = Tags::parse(tags);
        }
    }
}

#[derive(Parser, Debug)]
pub struct UpdateJobArgs {
    /// Job id
    pub id: i64,

    #[command(flatten)]
    pub fields: JobFields,
}

#[derive(Parser, Debug)]
pub struct DeleteJobArgs {
    /// Job id
    pub id: i64,
}

// ============================================================================
// Visa Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct VisasAdminArgs {
    /// Work on investor visas instead of visas
    #[arg(long, global = true)]
    pub investor: bool,

    #[command(subcommand)]
    pub command: VisasAdminCommands,
}

#[derive(Subcommand, Debug)]
pub enum VisasAdminCommands {
    /// List visas
    List(ListArgs),
    /// Add a visa from a JSON file
    Add(VisaFileArgs),
    /// Replace a visa from a JSON file (must contain its id)
    Update(VisaFileArgs),
    /// Delete a visa by id
    Delete(DeleteVisaArgs),
}

#[derive(Parser, Debug)]
pub struct VisaFileArgs {
    /// JSON file with the visa's fields (camelCase keys)
    #[arg(long)]
    pub file: PathBuf,

    #[command(flatten)]
    pub image: ImageArgs,
}

#[derive(Parser, Debug)]
pub struct DeleteVisaArgs {
    /// Visa id
    pub id: i64,
}

// ============================================================================
// Main Dispatcher
// ============================================================================

pub async fn run_admin(args: AdminArgs) -> Result<()> {
    let config = load_config()?;
    authenticate(args.username, args.password, &config.credentials())?;

    let client = ApiClient::new(&resolve_endpoint(args.endpoint, &config))?;

    match args.command {
        AdminCommands::News(news) => run_news_admin(&client, news.command).await,
        AdminCommands::Jobs(jobs) => run_jobs_admin(&client, jobs.command).await,
        AdminCommands::Visas(visas) => {
            let kind = if visas.investor {
                VisaKind::Investor
            } else {
                VisaKind::Standard
            };
            run_visas_admin(&client, kind, visas.command).await
        }
    }
}

// ============================================================================
// Credential Gate
// ============================================================================

/// Check the credentials, prompting for whatever is missing when a
/// terminal is attached.
fn authenticate(
    username: Option<String>,
    password: Option<String>,
    verifier: &dyn CredentialVerifier,
) -> Result<()> {
    let (username, password) = match (username, password) {
        (Some(u), Some(p)) => (u, p),
        (username, password) if ui::is_interactive() => {
            let username = match username {
                Some(u) => u,
                None => inquire::Text::new("Username:").prompt()?,
            };
            let password = match password {
                Some(p) => p,
                None => inquire::Password::new("Password:")
                    .without_confirmation()
                    .prompt()?,
            };
            (username, password)
        }
        _ => bail!(
            "Admin credentials required: pass --username/--password or set \
             SITECTL_ADMIN_USER/SITECTL_ADMIN_PASSWORD"
        ),
    };

    if !verifier.verify(&username, &password) {
        bail!("Invalid credentials");
    }
    tracing::debug!(%username, "admin session started");
    Ok(())
}

// ============================================================================
// News Implementation
// ============================================================================

async fn run_news_admin(client: &ApiClient, command: NewsAdminCommands) -> Result<()> {
    match command {
        NewsAdminCommands::List(list) => {
            let items = fetch_news(client).await?;
            print_news(&items, list.output)
        }
        NewsAdminCommands::Add(fields) => add_article(client, fields).await,
        NewsAdminCommands::Update(update) => update_article(client, update).await,
        NewsAdminCommands::Delete(delete) => delete_article(client, delete).await,
    }
}

async fn fetch_news(client: &ApiClient) -> Result<Vec<NewsItem>> {
    client.get("/api/news").await
}

async fn add_article(client: &ApiClient, fields: ArticleFields) -> Result<()> {
    let mut item = NewsItem::default();
    fields.apply(&mut item)?;
    if item.title.trim().is_empty() || item.content.trim().is_empty() {
        bail!("Title and content are required");
    }

    let slug = slugify(&item.title);
    if slug.is_empty() {
        bail!("Title must contain at least one letter or digit");
    }
    item.slug = Some(slug.clone());

    if let Some(image) = fields.image.resolve(client).await? {
        item.image = image;
    }

    let created: Mutation<NewsItem> = client.send_json(Method::POST, "/api/news", &item).await?;
    println!("{}: /news/{}", created.message, slug);

    let items = fetch_news(client).await?;
    println!("{} stored article(s)", items.len());
    Ok(())
}

async fn update_article(client: &ApiClient, update: UpdateArticleArgs) -> Result<()> {
    let mut item = fetch_news(client)
        .await?
        .into_iter()
        .find(|n| n.stored_slug() == Some(update.slug.as_str()))
        .with_context(|| format!("No stored article with slug '{}'", update.slug))?;

    update.fields.apply(&mut item)?;
    if let Some(image) = update.fields.image.resolve(client).await? {
        item.image = image;
    }
    // The slug stays the one the article was created with
    item.slug = Some(update.slug.clone());

    let updated: Mutation<NewsItem> = client.send_json(Method::PUT, "/api/news", &item).await?;
    println!("{}: /news/{}", updated.message, update.slug);

    let items = fetch_news(client).await?;
    println!("{} stored article(s)", items.len());
    Ok(())
}

async fn delete_article(client: &ApiClient, delete: DeleteArticleArgs) -> Result<()> {
    confirm_delete(&delete.slug, delete.confirm)?;

    let deleted: Mutation<Value> = client
        .send_json(Method::DELETE, "/api/news", &json!({ "slug": delete.slug }))
        .await?;
    println!("{}: {}", deleted.message, delete.slug);

    let items = fetch_news(client).await?;
    println!("{} stored article(s)", items.len());
    Ok(())
}

/// Whether `token` is the exact confirmation literal.
pub fn is_confirmed(token: &str) -> bool {
    token == CONFIRM_TOKEN
}

fn confirm_delete(slug: &str, flag: Option<String>) -> Result<()> {
    let token = match flag {
        Some(token) => token,
        None if ui::is_interactive() => inquire::Text::new(&format!(
            "Type {} to delete '{}':",
            CONFIRM_TOKEN, slug
        ))
        .prompt()?,
        None => bail!(
            "Refusing to delete without confirmation: pass --confirm {}",
            CONFIRM_TOKEN
        ),
    };

    if !is_confirmed(&token) {
        bail!("Deletion cancelled: confirmation did not match {}", CONFIRM_TOKEN);
    }
    Ok(())
}

fn print_news(items: &[NewsItem], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Quiet => {
            for item in items {
                println!("{}", item.stored_slug().unwrap_or_default());
            }
        }
        OutputFormat::Human => {
            if items.is_empty() {
                println!("No stored articles");
            }
            for item in items {
                println!(
                    "{:<48} {:<10} {}",
                    item.stored_slug().unwrap_or("-"),
                    item.tag,
                    item.title
                );
            }
        }
    }
    Ok(())
}

// ============================================================================
// Jobs Implementation
// ============================================================================

async fn run_jobs_admin(client: &ApiClient, command: JobsAdminCommands) -> Result<()> {
    match command {
        JobsAdminCommands::List(list) => {
            let board = fetch_board(client).await?;
            print_board(&board, list.output)
        }
        JobsAdminCommands::Add(fields) => add_job(client, fields).await,
        JobsAdminCommands::Update(update) => update_job(client, update).await,
        JobsAdminCommands::Delete(delete) => delete_job(client, delete.id).await,
    }
}

async fn fetch_board(client: &ApiClient) -> Result<JobBoard> {
    let jobs: Vec<Job> = client.get("/api/jobs").await?;
    Ok(JobBoard::group(jobs))
}

async fn add_job(client: &ApiClient, fields: JobFields) -> Result<()> {
    let mut job = Job {
        id: Some(Utc::now().timestamp_millis()),
        ..Job::default()
    };
    fields.apply(&mut job);
    if job.title.trim().is_empty() || job.country.trim().is_empty() {
        bail!("Title and country are required");
    }

    let created: Mutation<Job> = client.send_json(Method::POST, "/api/jobs", &job).await?;
    println!(
        "{}: {} ({})",
        created.message,
        created.id.or(job.id).unwrap_or_default(),
        job.country
    );

    let board = fetch_board(client).await?;
    println!("{} job(s) in {} country group(s)", board.len(), board.groups().len());
    Ok(())
}

async fn update_job(client: &ApiClient, update: UpdateJobArgs) -> Result<()> {
    let board = fetch_board(client).await?;
    let country = board.locate(update.id).context(NO_JOB_FOUND)?.to_string();
    let mut job = board
        .country(&country)
        .and_then(|g| g.jobs.iter().find(|j| j.id == Some(update.id)))
        .cloned()
        .context(NO_JOB_FOUND)?;

    update.fields.apply(&mut job);

    let updated: Mutation<Job> = client.send_json(Method::PUT, "/api/jobs", &job).await?;
    println!("{}: {}", updated.message, update.id);

    let board = fetch_board(client).await?;
    println!("{} job(s) in {} country group(s)", board.len(), board.groups().len());
    Ok(())
}

/// Free-text delete: find the job in the grouped list, drop it from that
/// one country group, then ask the server to delete it.
async fn delete_job(client: &ApiClient, id: i64) -> Result<()> {
    let mut board = fetch_board(client).await?;
    let Some((country, _job)) = board.delete_by_id(id) else {
        bail!(NO_JOB_FOUND);
    };

    let _: Mutation<Value> = client
        .send_json(Method::DELETE, "/api/jobs", &json!({ "id": id }))
        .await?;
    println!("{}", deleted_message(id, &country));

    let board = fetch_board(client).await?;
    println!("{} job(s) in {} country group(s)", board.len(), board.groups().len());
    Ok(())
}

fn print_board(board: &JobBoard, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(board.groups())?),
        OutputFormat::Quiet => {
            for group in board.groups() {
                for job in &group.jobs {
                    println!("{}", job.id.unwrap_or_default());
                }
            }
        }
        OutputFormat::Human => {
            if board.is_empty() {
                println!("No jobs");
            }
            for group in board.groups() {
                println!("{} ({})", group.country, group.jobs.len());
                for job in &group.jobs {
                    println!(
                        "  {:<14} {} · {} · {}",
                        job.id.unwrap_or_default(),
                        job.title,
                        job.company,
                        job.city
                    );
                }
            }
        }
    }
    Ok(())
}

// ============================================================================
// Visa Implementation
// ============================================================================

async fn run_visas_admin(
    client: &ApiClient,
    kind: VisaKind,
    command: VisasAdminCommands,
) -> Result<()> {
    let path = format!("/api/{}", kind.route());

    match command {
        VisasAdminCommands::List(list) => {
            let visas: Vec<Visa> = client.get(&path).await?;
            print_visas(&visas, list.output)
        }
        VisasAdminCommands::Add(add) => {
            let mut visa = read_visa(&add).await?;
            if let Some(image) = add.image.resolve(client).await? {
                visa.image = image;
            }
            if visa.slug.trim().is_empty() {
                visa.slug = slugify(&visa.name);
            }

            let created: Mutation<Visa> = client.send_json(Method::POST, &path, &visa).await?;
            println!("{}: {}", created.message, visa.slug);
            reload_visas(client, &path, kind).await
        }
        VisasAdminCommands::Update(update) => {
            let mut visa = read_visa(&update).await?;
            if visa.id.is_none() {
                bail!("{} must include the id of the {} to update", update.file.display(), kind.label());
            }
            if let Some(image) = update.image.resolve(client).await? {
                visa.image = image;
            }

            let updated: Mutation<Visa> = client.send_json(Method::PUT, &path, &visa).await?;
            println!("{}: {}", updated.message, visa.slug);
            reload_visas(client, &path, kind).await
        }
        VisasAdminCommands::Delete(delete) => {
            let deleted: Mutation<Value> = client
                .send_json(Method::DELETE, &path, &json!({ "id": delete.id }))
                .await?;
            println!("{}: {}", deleted.message, delete.id);
            reload_visas(client, &path, kind).await
        }
    }
}

async fn read_visa(args: &VisaFileArgs) -> Result<Visa> {
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid visa JSON in {}", args.file.display()))
}

async fn reload_visas(client: &ApiClient, path: &str, kind: VisaKind) -> Result<()> {
    let visas: Vec<Visa> = client.get(path).await?;
    println!("{} {} record(s)", visas.len(), kind.label().to_lowercase());
    Ok(())
}

fn print_visas(visas: &[Visa], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(visas)?),
        OutputFormat::Quiet => {
            for visa in visas {
                println!("{}", visa.id.unwrap_or_default());
            }
        }
        OutputFormat::Human => {
            if visas.is_empty() {
                println!("No records");
            }
            for visa in visas {
                println!(
                    "{:<6} {:<40} {}",
                    visa.id.unwrap_or_default(),
                    visa.slug,
                    visa.page_title()
                );
            }
        }
    }
    Ok(())
}

fn set(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}
