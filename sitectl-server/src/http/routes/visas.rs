//! Visa and investor visa endpoints
//!
//! Both tables share one set of handlers, picked by a marker type.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use sitectl_core::models::{Visa, VisaKind};

use super::Mutation;
use crate::db::repos::VisaRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::{check_visa, require_id, IdKey};

/// Which table a handler serves
pub trait VisaTable: Send + Sync + 'static {
    const KIND: VisaKind;
}

pub struct Standard;
pub struct Investor;

impl VisaTable for Standard {
    const KIND: VisaKind = VisaKind::Standard;
}

impl VisaTable for Investor {
    const KIND: VisaKind = VisaKind::Investor;
}

fn repo<K: VisaTable>(state: &AppState) -> VisaRepo<'_> {
    VisaRepo::new(&state.pool, K::KIND)
}

/// GET /api/{table}
async fn list<K: VisaTable>(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Visa>>, ApiError> {
    Ok(Json(repo::<K>(&state).list().await?))
}

/// GET /api/{table}/{slug}
async fn get_one<K: VisaTable>(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Visa>, ApiError> {
    Ok(Json(repo::<K>(&state).get_by_slug(&slug).await?))
}

/// POST /api/{table}
async fn create<K: VisaTable>(
    State(state): State<Arc<AppState>>,
    ApiJson(visa): ApiJson<Visa>,
) -> Result<(StatusCode, Json<Mutation<Visa>>), ApiError> {
    check_visa(&visa)?;
    let created = repo::<K>(&state).create(&visa).await?;
    tracing::info!(kind = %K::KIND, slug = %created.slug, "created");

    Ok((
        StatusCode::CREATED,
        Json(Mutation::with_data(
            format!("{} created", K::KIND.label()),
            created.id,
            created,
        )),
    ))
}

/// PUT /api/{table} - id travels in the body
async fn update<K: VisaTable>(
    State(state): State<Arc<AppState>>,
    ApiJson(visa): ApiJson<Visa>,
) -> Result<Json<Mutation<Visa>>, ApiError> {
    let id = require_id(visa.id)?;
    check_visa(&visa)?;
    let updated = repo::<K>(&state).update(id, &visa).await?;

    Ok(Json(Mutation::with_data(
        format!("{} updated", K::KIND.label()),
        Some(id),
        updated,
    )))
}

/// DELETE /api/{table} - body `{ "id": ... }`
async fn delete<K: VisaTable>(
    State(state): State<Arc<AppState>>,
    ApiJson(key): ApiJson<IdKey>,
) -> Result<Json<Mutation>, ApiError> {
    let id = key.require()?;
    repo::<K>(&state).delete(id).await?;
    tracing::info!(kind = %K::KIND, id, "deleted");

    Ok(Json(Mutation::message(format!("{} deleted", K::KIND.label()))))
}

fn table_router<K: VisaTable>() -> Router<Arc<AppState>> {
    let base = format!("/api/{}", K::KIND.route());
    Router::new()
        .route(
            &base,
            get(list::<K>)
                .post(create::<K>)
                .put(update::<K>)
                .delete(delete::<K>),
        )
        .route(&format!("{}/{{slug}}", base), get(get_one::<K>))
}

/// Visa routes for both tables
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(table_router::<Standard>())
        .merge(table_router::<Investor>())
}
