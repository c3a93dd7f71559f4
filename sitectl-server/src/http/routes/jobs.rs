//! Job endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use sitectl_core::models::Job;

use super::Mutation;
use crate::db::repos::JobRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::{check_job, require_id, IdKey};

/// GET /api/jobs
async fn list_jobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Job>>, ApiError> {
    Ok(Json(JobRepo::new(&state.pool).list().await?))
}

/// POST /api/jobs - the client usually picks the id
async fn create_job(
    State(state): State<Arc<AppState>>,
    ApiJson(job): ApiJson<Job>,
) -> Result<(StatusCode, Json<Mutation<Job>>), ApiError> {
    check_job(&job)?;
    let created = JobRepo::new(&state.pool).create(&job).await?;
    tracing::info!(id = ?created.id, country = %created.country, "job created");

    Ok((
        StatusCode::CREATED,
        Json(Mutation::with_data("Job created", created.id, created)),
    ))
}

/// PUT /api/jobs - id travels in the body
async fn update_job(
    State(state): State<Arc<AppState>>,
    ApiJson(job): ApiJson<Job>,
) -> Result<Json<Mutation<Job>>, ApiError> {
    let id = require_id(job.id)?;
    check_job(&job)?;
    let updated = JobRepo::new(&state.pool).update(id, &job).await?;

    Ok(Json(Mutation::with_data("Job updated", Some(id), updated)))
}

/// DELETE /api/jobs - body `{ "id": ... }`
async fn delete_job(
    State(state): State<Arc<AppState>>,
    ApiJson(key): ApiJson<IdKey>,
) -> Result<Json<Mutation>, ApiError> {
    let id = key.require()?;
    JobRepo::new(&state.pool).delete(id).await?;
    tracing::info!(id, "job deleted");

    Ok(Json(Mutation::message("Job deleted")))
}

/// Job routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/jobs",
        get(list_jobs)
            .post(create_job)
            .put(update_job)
            .delete(delete_job),
    )
}
