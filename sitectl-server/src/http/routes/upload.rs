//! Image upload endpoint
//!
//! The image is not stored anywhere: it comes back as a data URI that the
//! admin client writes into the record's image field.

use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::{extract::Multipart, routing::post, Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::ValidationError;

/// Used when the part carries no content type
pub const DEFAULT_MIME: &str = "image/jpeg";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// `data:<mime>;base64,<payload>`
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn invalid(reason: impl Into<String>) -> ApiError {
    ApiError::Validation(ValidationError::InvalidBody {
        reason: reason.into(),
    })
}

fn rejected(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge {
            message: e.body_text(),
        }
    } else {
        invalid(e.body_text())
    }
}

/// POST /api/uploadImage - multipart field `file`
async fn upload_image(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(rejected)? {
        if field.name() != Some("file") {
            continue;
        }

        let mime = field
            .content_type()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MIME)
            .to_string();
        let bytes = field.bytes().await.map_err(rejected)?;
        if bytes.len() > max_bytes {
            return Err(ApiError::PayloadTooLarge {
                message: format!("Image exceeds {} bytes", max_bytes),
            });
        }
        tracing::debug!(%mime, size = bytes.len(), "image uploaded");

        return Ok(Json(UploadResponse {
            url: data_uri(&mime, &bytes),
        }));
    }

    Err(invalid("No file uploaded"))
}

/// Upload routes, accepting images up to `max_bytes`
pub fn router(max_bytes: usize) -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/uploadImage",
        post(move |multipart: Multipart| upload_image(multipart, max_bytes)),
    )
}
