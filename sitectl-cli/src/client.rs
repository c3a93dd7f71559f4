//! HTTP client for the sitectl API

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Body of every create/update/delete response
#[derive(Deserialize, Debug)]
pub struct Mutation<T> {
    pub message: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize, Debug)]
struct UploadResponse {
    url: String,
}

/// Thin wrapper over `reqwest` bound to one API endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.base))?;
        handle_response(response).await
    }

    /// Send `body` as JSON with `method`.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(%method, path, "sending request");
        let response = self
            .http
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.base))?;
        handle_response(response).await
    }

    /// Upload an image file, returning the data URI the server built from it.
    pub async fn upload_image(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let mut part = Part::bytes(bytes).file_name(file_name);
        if let Some(mime) = mime_for(path) {
            part = part.mime_str(mime).context("Invalid image content type")?;
        }

        let response = self
            .http
            .post(self.url("/api/uploadImage"))
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.base))?;

        let uploaded: UploadResponse = handle_response(response).await?;
        Ok(uploaded.url)
    }
}

/// Content type guessed from the file extension. Unknown extensions are
/// sent without one and the server falls back to JPEG.
pub fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json::<T>().await.context("Failed to parse response")
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&error_text) {
            Err(anyhow!("{}: {}", status, error_resp.error))
        } else {
            Err(anyhow!("{}: {}", status, error_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for(Path::new("banner.PNG")), Some("image/png"));
        assert_eq!(mime_for(Path::new("a/b/photo.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for(Path::new("scan.tiff")), None);
        assert_eq!(mime_for(Path::new("no-extension")), None);
    }

    #[test]
    fn base_url_is_normalised() {
        let client = ApiClient::new("http://127.0.0.1:3030/").unwrap();
        assert_eq!(client.url("/api/jobs"), "http://127.0.0.1:3030/api/jobs");
    }
}
