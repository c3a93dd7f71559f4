//! News endpoints
//!
//! CRUD over stored articles, plus two read views over the merged catalog
//! (stored articles first, then the built-in ones).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use sitectl_core::models::NewsItem;
use sitectl_core::{NewsCatalog, PageMetadata};

use super::Mutation;
use crate::db::repos::NewsRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::{check_new_article, validation::require_text, SlugKey, ValidationError};

/// Article page payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub story: NewsItem,
    pub other_stories: Vec<NewsItem>,
    pub metadata: PageMetadata,
}

async fn catalog(state: &AppState) -> Result<NewsCatalog, ApiError> {
    let stored = NewsRepo::new(&state.pool).list().await?;
    Ok(NewsCatalog::new(stored, state.builtin_news.iter().cloned()))
}

/// GET /api/news - stored articles, newest first
async fn list_news(State(state): State<Arc<AppState>>) -> Result<Json<Vec<NewsItem>>, ApiError> {
    Ok(Json(NewsRepo::new(&state.pool).list().await?))
}

/// POST /api/news
async fn create_news(
    State(state): State<Arc<AppState>>,
    ApiJson(item): ApiJson<NewsItem>,
) -> Result<(StatusCode, Json<Mutation<NewsItem>>), ApiError> {
    let slug = check_new_article(&item)?;
    let created = NewsRepo::new(&state.pool).create(&slug, &item).await?;
    tracing::info!(%slug, "article created");

    Ok((
        StatusCode::CREATED,
        Json(Mutation::with_data("News added", created.id, created)),
    ))
}

/// PUT /api/news - addressed by the slug in the body, which is never changed
async fn update_news(
    State(state): State<Arc<AppState>>,
    ApiJson(item): ApiJson<NewsItem>,
) -> Result<Json<Mutation<NewsItem>>, ApiError> {
    let slug = item
        .stored_slug()
        .ok_or(ValidationError::Missing { field: "slug" })?
        .trim()
        .to_string();
    require_text("title", &item.title)?;

    let updated = NewsRepo::new(&state.pool).update(&slug, &item).await?;
    Ok(Json(Mutation::with_data("News updated", updated.id, updated)))
}

/// DELETE /api/news - body `{ "slug": ... }`
async fn delete_news(
    State(state): State<Arc<AppState>>,
    ApiJson(key): ApiJson<SlugKey>,
) -> Result<Json<Mutation>, ApiError> {
    let slug = key.require()?;
    NewsRepo::new(&state.pool).delete(slug).await?;
    tracing::info!(%slug, "article deleted");

    Ok(Json(Mutation::message("News deleted")))
}

/// GET /api/news/paths - slug of every article a page exists for
async fn news_paths(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(catalog(&state).await?.slugs()))
}

/// GET /api/news/{slug} - article page; unknown slugs get the first article
async fn news_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ArticleView>, ApiError> {
    let catalog = catalog(&state).await?;
    let story = catalog
        .resolve(&slug)
        .cloned()
        .ok_or_else(|| ApiError::NotFound {
            resource: "news",
            id: slug.clone(),
        })?;

    let other_stories = catalog
        .others(&slug)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ArticleView {
        metadata: catalog.metadata(&slug),
        story,
        other_stories,
    }))
}

/// News routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/news",
            get(list_news)
                .post(create_news)
                .put(update_news)
                .delete(delete_news),
        )
        .route("/api/news/paths", get(news_paths))
        .route("/api/news/{slug}", get(news_page))
}
