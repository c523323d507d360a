//! Shared helpers for dashboard integration tests.
//!
//! Tests drive the real router, with the production middleware stack,
//! against an in-process fake cuts service. The fake records per-endpoint
//! request counts so tests can assert properties like "declining the delete
//! confirmation issues zero upstream requests".

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::TimeZone;
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use recorte_core::cut::{Cut, CutStatus};
use recorte_dashboard::config::DashboardConfig;
use recorte_dashboard::router::app_router;
use recorte_dashboard::state::AppState;

/// Opaque token accepted by every authed test request.
pub const TEST_TOKEN: &str = "test-id-token";

// ---------------------------------------------------------------------------
// Fake upstream cuts service
// ---------------------------------------------------------------------------

/// Per-endpoint request counts recorded by the fake upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpstreamCounters {
    pub list: usize,
    pub get: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

/// In-memory stand-in for the external cuts API.
#[derive(Clone)]
pub struct FakeUpstream {
    cuts: Arc<Mutex<Vec<Cut>>>,
    counters: Arc<Mutex<UpstreamCounters>>,
    failing: Arc<AtomicBool>,
}

impl FakeUpstream {
    fn new(seed: Vec<Cut>) -> Self {
        Self {
            cuts: Arc::new(Mutex::new(seed)),
            counters: Arc::new(Mutex::new(UpstreamCounters::default())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn counters(&self) -> UpstreamCounters {
        *self.counters.lock().unwrap()
    }

    /// When failing, every endpoint answers 500 with a JSON message.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn cuts(&self) -> Vec<Cut> {
        self.cuts.lock().unwrap().clone()
    }

    fn failure_response(&self) -> Option<Response<Body>> {
        self.failing.load(Ordering::SeqCst).then(|| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "upstream exploded" })),
            )
                .into_response()
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpstreamListParams {
    page: Option<i64>,
    limit: Option<i64>,
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
}

async fn upstream_list(
    State(upstream): State<FakeUpstream>,
    Query(params): Query<UpstreamListParams>,
) -> Response<Body> {
    upstream.counters.lock().unwrap().list += 1;
    if let Some(failure) = upstream.failure_response() {
        return failure;
    }

    let mut cuts = upstream.cuts();
    match params.sort_by.as_deref() {
        Some("modelName") => cuts.sort_by(|a, b| a.model_name.cmp(&b.model_name)),
        Some("displayOrder") => cuts.sort_by_key(|cut| cut.display_order),
        _ => {} // unknown keys are ignored, like the real API
    }

    let limit = params.limit.unwrap_or(10).max(1);
    let page = params.page.unwrap_or(1).max(1);
    let total = cuts.len() as i64;
    let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
    let data: Vec<Cut> = cuts
        .into_iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .collect();

    Json(json!({
        "data": data,
        "meta": { "page": page, "perPage": limit, "total": total, "totalPages": total_pages }
    }))
    .into_response()
}

async fn upstream_get(
    State(upstream): State<FakeUpstream>,
    Path(id): Path<i64>,
) -> Response<Body> {
    upstream.counters.lock().unwrap().get += 1;
    if let Some(failure) = upstream.failure_response() {
        return failure;
    }

    let cuts = upstream.cuts();
    match cuts.iter().find(|cut| cut.id == id) {
        Some(cut) => Json(cut).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Cut {id} not found") })),
        )
            .into_response(),
    }
}

async fn upstream_create(
    State(upstream): State<FakeUpstream>,
    multipart: Multipart,
) -> Response<Body> {
    upstream.counters.lock().unwrap().create += 1;
    if let Some(failure) = upstream.failure_response() {
        return failure;
    }

    let (fields, image) = read_multipart(multipart).await;
    let Some(image_name) = image else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "image part missing" })),
        )
            .into_response();
    };

    let mut cuts = upstream.cuts.lock().unwrap();
    let id = cuts.iter().map(|cut| cut.id).max().unwrap_or(0) + 1;
    let cut = cut_from_fields(id, &fields, &image_name);
    cuts.push(cut.clone());
    (StatusCode::CREATED, Json(cut)).into_response()
}

async fn upstream_update(
    State(upstream): State<FakeUpstream>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Response<Body> {
    upstream.counters.lock().unwrap().update += 1;
    if let Some(failure) = upstream.failure_response() {
        return failure;
    }

    let (fields, image) = read_multipart(multipart).await;

    let mut cuts = upstream.cuts.lock().unwrap();
    let Some(existing) = cuts.iter_mut().find(|cut| cut.id == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Cut {id} not found") })),
        )
            .into_response();
    };

    let mut updated = cut_from_fields(id, &fields, "ignored.png");
    // No image part: the stored image is kept.
    updated.image_url = match image {
        Some(image_name) => format!("https://cdn.example.com/cuts/{image_name}"),
        None => existing.image_url.clone(),
    };
    updated.user_id = existing.user_id.clone();
    updated.created_at = existing.created_at;
    *existing = updated.clone();
    Json(updated).into_response()
}

async fn upstream_delete(
    State(upstream): State<FakeUpstream>,
    Path(id): Path<i64>,
) -> Response<Body> {
    upstream.counters.lock().unwrap().delete += 1;
    if let Some(failure) = upstream.failure_response() {
        return failure;
    }

    let mut cuts = upstream.cuts.lock().unwrap();
    let before = cuts.len();
    cuts.retain(|cut| cut.id != id);
    if cuts.len() < before {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Cut {id} not found") })),
        )
            .into_response()
    }
}

/// Drain a multipart stream into scalar fields plus the image filename.
async fn read_multipart(mut multipart: Multipart) -> (HashMap<String, String>, Option<String>) {
    let mut fields = HashMap::new();
    let mut image = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or("").to_string();
        if name == "image" {
            let filename = field.file_name().unwrap_or("upload.png").to_string();
            let _ = field.bytes().await.unwrap();
            image = Some(filename);
        } else {
            fields.insert(name, field.text().await.unwrap());
        }
    }
    (fields, image)
}

fn cut_from_fields(id: i64, fields: &HashMap<String, String>, image_name: &str) -> Cut {
    let text = |key: &str| fields.get(key).cloned().unwrap_or_default();
    let at = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    Cut {
        id,
        sku: text("sku"),
        model_name: text("modelName"),
        cut_type: text("cutType"),
        position: text("position"),
        product_type: text("productType"),
        material: text("material"),
        material_color: fields.get("materialColor").cloned(),
        display_order: text("displayOrder").parse().unwrap_or(1),
        image_url: format!("https://cdn.example.com/cuts/{image_name}"),
        status: match text("status").as_str() {
            "PENDENTE" => CutStatus::Pendente,
            _ => CutStatus::Ativo,
        },
        user_id: "upstream-user".to_string(),
        created_at: at,
        updated_at: at,
    }
}

/// Start the fake upstream on an ephemeral port; returns its handle and URL.
pub async fn spawn_upstream(seed: Vec<Cut>) -> (FakeUpstream, String) {
    let upstream = FakeUpstream::new(seed);
    let router = Router::new()
        .route("/cuts", get(upstream_list).post(upstream_create))
        .route(
            "/cuts/{id}",
            get(upstream_get).put(upstream_update).delete(upstream_delete),
        )
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (upstream, format!("http://{addr}"))
}

// ---------------------------------------------------------------------------
// Dashboard app under test
// ---------------------------------------------------------------------------

/// Test configuration pointing the app at the given fake upstream.
pub fn test_config(upstream_url: &str) -> DashboardConfig {
    DashboardConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cuts_api_url: upstream_url.to_string(),
        default_page_size: 10,
    }
}

/// Build the full dashboard app with the production middleware stack.
///
/// Mirrors the layer ordering in `main.rs` so tests exercise the same
/// request-id, timeout, tracing, panic-recovery, and CORS stack.
pub fn build_test_app(upstream_url: &str) -> Router {
    let state = AppState::new(test_config(upstream_url));
    let request_id_header = HeaderName::from_static("x-request-id");

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse::<HeaderValue>().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    app_router(state)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
}

/// Spawn an upstream with `seed` and build the app against it.
pub async fn app_with_upstream(seed: Vec<Cut>) -> (Router, FakeUpstream) {
    let (upstream, url) = spawn_upstream(seed).await;
    (build_test_app(&url), upstream)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// GET with a bearer token.
pub async fn get_authed(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {TEST_TOKEN}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET without any Authorization header.
pub async fn get_anon(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A seeded cut with a derivable image key (`<sku lowercased>`).
pub fn seed_cut(id: i64, model_name: &str, sku: &str, display_order: i64) -> Cut {
    let at = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    Cut {
        id,
        sku: sku.to_string(),
        model_name: model_name.to_string(),
        cut_type: "Americano".to_string(),
        position: "Frente".to_string(),
        product_type: "Cap".to_string(),
        material: "Cotton".to_string(),
        material_color: None,
        display_order,
        image_url: format!("https://cdn.example.com/cuts/{}.png", sku.to_lowercase()),
        status: CutStatus::Ativo,
        user_id: "user-1".to_string(),
        created_at: at,
        updated_at: at,
    }
}

/// A minimal valid PNG, produced by the same codec the service validates with.
pub fn tiny_png() -> Vec<u8> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    image::RgbaImage::new(1, 1)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

/// Scalar fields of a valid create/update form.
pub fn valid_form_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("modelName", "Bone Aba Reta"),
        ("sku", "ABA-010"),
        ("cutType", "Americano"),
        ("position", "Frente"),
        ("productType", "Cap"),
        ("material", "Cotton"),
        ("displayOrder", "2"),
        ("status", "ATIVO"),
    ]
}

const MULTIPART_BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Build a multipart request in the shape the forms submit.
pub fn multipart_request(
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    image: Option<(&str, Vec<u8>)>,
    authed: bool,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(&bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder().method(method).uri(uri).header(
        "content-type",
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
    );
    if authed {
        builder = builder.header("authorization", format!("Bearer {TEST_TOKEN}"));
    }
    builder.body(Body::from(body)).unwrap()
}
