//! End-to-end request tests against an in-memory store

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use sitectl_server::db::create_memory_pool;
use sitectl_server::{build_router, migrations, AppState, ServerConfig};

async fn app() -> Router {
    app_with(ServerConfig::default()).await
}

async fn app_with(config: ServerConfig) -> Router {
    let pool = create_memory_pool().await.unwrap();
    migrations::run(&pool).await.unwrap();
    let state = AppState::new(pool).unwrap();
    build_router(state, &config)
}

fn small_upload_cap() -> ServerConfig {
    ServerConfig {
        max_upload_bytes: 64 * 1024,
        ..ServerConfig::default()
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn multipart(field: &str, filename: &str, mime: Option<&str>, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "sitectl-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    if let Some(mime) = mime {
        body.extend_from_slice(format!("Content-Type: {}\r\n", mime).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (format!("multipart/form-data; boundary={}", boundary), body)
}

async fn upload(app: &Router, content_type: String, body: Vec<u8>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/uploadImage")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn visa_lifecycle() {
    let app = app().await;
    let visa = json!({
        "name": "UK Skilled Worker Visa",
        "slug": "uk-skilled-worker",
        "metaTitle": "Skilled Worker"
    });

    let (status, created) = send(&app, Method::POST, "/api/visas", Some(visa)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["data"]["slug"], "uk-skilled-worker");

    let (status, one) = send(&app, Method::GET, "/api/visas/uk-skilled-worker", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["metaTitle"], "Skilled Worker");

    let edit = json!({ "id": id, "name": "UK Skilled Worker", "slug": "uk-skilled-worker", "addonHeading": "Fees" });
    let (status, updated) = send(&app, Method::PUT, "/api/visas", Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["addonHeading"], "Fees");

    let (status, _) = send(&app, Method::DELETE, "/api/visas", Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, "/api/visas", Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn deleting_absent_visa_keeps_rows() {
    let app = app().await;
    for slug in ["a", "b"] {
        let visa = json!({ "name": slug, "slug": slug });
        send(&app, Method::POST, "/api/visas", Some(visa)).await;
    }

    let (status, _) = send(&app, Method::DELETE, "/api/visas", Some(json!({ "id": 4242 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, Method::GET, "/api/visas", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn investor_visas_use_their_own_table() {
    let app = app().await;
    let visa = json!({ "name": "Portugal Golden Visa", "slug": "portugal-golden-visa" });

    let (status, _) = send(&app, Method::POST, "/api/investorVisas", Some(visa.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/api/visas", Some(visa)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = send(&app, Method::GET, "/api/investorVisas", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn visa_without_slug_is_400() {
    let app = app().await;
    let (status, body) = send(&app, Method::POST, "/api/visas", Some(json!({ "name": "No slug" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "slug cannot be empty");
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/jobs")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn job_min_experience_text_round_trips_as_number() {
    let app = app().await;
    let job = json!({
        "id": 1700000000000i64,
        "title": "Welder",
        "country": "Germany",
        "minExperience": "2",
        "tags": "tig, mig"
    });
    let (status, _) = send(&app, Method::POST, "/api/jobs", Some(job)).await;
    assert_eq!(status, StatusCode::CREATED);

    let edit = json!({
        "id": "1700000000000",
        "title": "Welder",
        "country": "Germany",
        "minExperience": "5",
        "tags": ["tig", "mig"]
    });
    let (status, updated) = send(&app, Method::PUT, "/api/jobs", Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["minExperience"], 5);

    let (_, list) = send(&app, Method::GET, "/api/jobs", None).await;
    assert_eq!(list[0]["minExperience"], 5);
    assert_eq!(list[0]["tags"], json!(["tig", "mig"]));
}

#[tokio::test]
async fn job_delete_needs_id() {
    let app = app().await;
    let (status, body) = send(&app, Method::DELETE, "/api/jobs", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "id is required");
}

#[tokio::test]
async fn zero_id_is_400_not_404() {
    let app = app().await;
    let (status, body) = send(&app, Method::DELETE, "/api/visas", Some(json!({"id": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "id is required");
}

#[tokio::test]
async fn news_duplicate_slug_is_conflict() {
    let app = app().await;
    let article = json!({ "title": "Canada Express Entry Draw", "content": "<p>Draw</p>" });

    let (status, created) = send(&app, Method::POST, "/api/news", Some(article.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["slug"], "canada-express-entry-draw");

    let (status, body) = send(&app, Method::POST, "/api/news", Some(article)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (_, list) = send(&app, Method::GET, "/api/news", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn news_update_keeps_slug() {
    let app = app().await;
    let article = json!({ "title": "Old Headline", "content": "x" });
    send(&app, Method::POST, "/api/news", Some(article)).await;

    let edit = json!({ "slug": "old-headline", "title": "New Headline", "content": "y" });
    let (status, updated) = send(&app, Method::PUT, "/api/news", Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["slug"], "old-headline");
    assert_eq!(updated["data"]["title"], "New Headline");

    let (status, _) = send(&app, Method::DELETE, "/api/news", Some(json!({ "slug": "old-headline" }))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn news_page_prefers_stored_article() {
    let app = app().await;
    let (_, paths) = send(&app, Method::GET, "/api/news/paths", None).await;
    let builtin_slug = paths[0].as_str().unwrap().to_string();
    let builtin_count = paths.as_array().unwrap().len();

    let (_, builtin_page) = send(&app, Method::GET, &format!("/api/news/{}", builtin_slug), None).await;
    let title = builtin_page["story"]["title"].as_str().unwrap().to_string();

    let stored = json!({ "title": title, "content": "<p>Stored copy</p>", "summary": "Stored summary" });
    send(&app, Method::POST, "/api/news", Some(stored)).await;

    let (status, page) = send(&app, Method::GET, &format!("/api/news/{}", builtin_slug), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["story"]["content"], "<p>Stored copy</p>");
    assert!(page["story"]["id"].is_i64());
    assert_eq!(page["metadata"]["description"], "Stored summary");
    assert!(page["metadata"]["title"].as_str().unwrap().ends_with("| VJC Overseas"));

    let (_, paths) = send(&app, Method::GET, "/api/news/paths", None).await;
    assert_eq!(paths.as_array().unwrap().len(), builtin_count + 1);
}

#[tokio::test]
async fn unknown_news_slug_falls_back_to_first_article() {
    let app = app().await;
    let (status, page) = send(&app, Method::GET, "/api/news/no-such-article", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!page["story"]["title"].as_str().unwrap().is_empty());
    assert_eq!(page["metadata"]["title"], "Latest Visa & Immigration News | VJC Overseas");
}

#[tokio::test]
async fn fallback_story_stays_among_other_stories() {
    let app = app().await;
    let (_, all) = send(&app, Method::GET, "/api/news/paths", None).await;
    let (_, page) = send(&app, Method::GET, "/api/news/no-such-article", None).await;

    let others = page["otherStories"].as_array().unwrap();
    assert_eq!(others.len(), all.as_array().unwrap().len());
    assert!(others.iter().any(|o| o["title"] == page["story"]["title"]));
}

#[tokio::test]
async fn png_upload_becomes_data_uri() {
    let app = app().await;
    let (content_type, body) = multipart("file", "logo.png", Some("image/png"), b"\x89PNG\r\n");
    let (status, json) = upload(&app, content_type, body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["url"].as_str().unwrap().starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn upload_without_type_defaults_to_jpeg() {
    let app = app().await;
    let (content_type, body) = multipart("file", "photo", None, b"\xff\xd8\xff");
    let (_, json) = upload(&app, content_type, body).await;

    assert!(json["url"].as_str().unwrap().starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn upload_without_file_field_is_400() {
    let app = app().await;
    let (content_type, body) = multipart("other", "x.png", Some("image/png"), b"x");
    let (status, json) = upload(&app, content_type, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file uploaded");
}

#[tokio::test]
async fn image_at_the_cap_can_be_saved_on_a_record() {
    let config = small_upload_cap();
    let app = app_with(config.clone()).await;
    let image = vec![0xAB; config.max_upload_bytes];
    let (content_type, body) = multipart("file", "big.png", Some("image/png"), &image);

    let (status, json) = upload(&app, content_type, body).await;
    assert_eq!(status, StatusCode::OK);
    let url = json["url"].as_str().unwrap().to_string();
    assert!(url.len() > config.max_upload_bytes);

    let article = json!({"title": "Big Image", "content": "x", "image": url});
    let (status, created) = send(&app, Method::POST, "/api/news", Some(article)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", created);

    let (_, page) = send(&app, Method::GET, "/api/news/big-image", None).await;
    assert_eq!(page["story"]["image"].as_str().unwrap().len(), url.len());
}

#[tokio::test]
async fn image_over_the_cap_is_413() {
    let config = small_upload_cap();
    let app = app_with(config.clone()).await;
    let image = vec![0xAB; config.max_upload_bytes + 1];
    let (content_type, body) = multipart("file", "big.png", Some("image/png"), &image);

    let (status, json) = upload(&app, content_type, body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["status"], 413);
}

#[tokio::test]
async fn oversized_json_body_is_413() {
    let app = app_with(small_upload_cap()).await;
    let content = "x".repeat(1024 * 1024);
    let article = json!({"title": "Huge", "content": content});

    let (status, body) = send(&app, Method::POST, "/api/news", Some(article)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["status"], 413);
}
