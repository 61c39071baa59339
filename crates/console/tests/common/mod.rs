//! In-process stub backend for driving the controller end to end.
//!
//! Mirrors the backend contract over an in-memory store on an ephemeral
//! port. Failure-injection flags force specific response shapes, and
//! per-route hit counters let tests assert that a local rejection never
//! produced a request.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Shared stub state: the log store plus injection flags and counters.
pub struct StubState {
    pub logs: Mutex<Vec<Value>>,
    pub next_id: AtomicI64,

    // Hit counters.
    pub list_hits: AtomicUsize,
    pub upload_hits: AtomicUsize,
    pub patch_hits: AtomicUsize,
    pub put_hits: AtomicUsize,
    pub delete_hits: AtomicUsize,

    // Failure injection.
    pub fail_list: AtomicBool,
    pub list_non_array: AtomicBool,
    pub upload_reject: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_operators: AtomicBool,
    pub fail_geometry: AtomicBool,

    /// `Content-Disposition` value the download route sends, if any.
    pub download_header: Mutex<Option<String>>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            list_hits: AtomicUsize::new(0),
            upload_hits: AtomicUsize::new(0),
            patch_hits: AtomicUsize::new(0),
            put_hits: AtomicUsize::new(0),
            delete_hits: AtomicUsize::new(0),
            fail_list: AtomicBool::new(false),
            list_non_array: AtomicBool::new(false),
            upload_reject: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            fail_operators: AtomicBool::new(false),
            fail_geometry: AtomicBool::new(false),
            download_header: Mutex::new(None),
        }
    }
}

impl StubState {
    /// Insert a log record directly into the store.
    pub fn seed_log(&self, id: i64, notes: &str) {
        self.logs.lock().unwrap().push(json!({
            "id": id,
            "recovery_status": "success",
            "parse_status": "success",
            "car": {"id": 1, "name": "GT3"},
            "notes": notes,
        }));
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
    }
}

/// A running stub backend.
pub struct StubServer {
    pub base_url: String,
    pub state: Arc<StubState>,
}

/// Bind an ephemeral port and serve the stub in the background.
pub async fn spawn() -> StubServer {
    let state = Arc::new(StubState::default());
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    StubServer {
        base_url: format!("http://{addr}"),
        state,
    }
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/mcap-logs/", get(list_logs).post(upload_log))
        .route(
            "/mcap-logs/{id}/",
            get(get_log).patch(patch_log).put(put_log).delete(delete_log),
        )
        .route("/mcap-logs/{id}/geojson", get(geometry))
        .route("/mcap-logs/{id}/download", get(download))
        .route("/cars/", get(cars))
        .route("/drivers/", get(drivers))
        .route("/event-types/", get(event_types))
        .route("/parse/summary/", post(summary))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Log routes
// ---------------------------------------------------------------------------

async fn list_logs(State(state): State<Arc<StubState>>) -> Response {
    state.list_hits.fetch_add(1, Ordering::SeqCst);
    if state.fail_list.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if state.list_non_array.load(Ordering::SeqCst) {
        return Json(json!({"unexpected": "shape"})).into_response();
    }
    Json(state.logs.lock().unwrap().clone()).into_response()
}

async fn upload_log(State(state): State<Arc<StubState>>, mut multipart: Multipart) -> Response {
    state.upload_hits.fetch_add(1, Ordering::SeqCst);
    if state.upload_reject.load(Ordering::SeqCst) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "upload rejected by backend"})),
        )
            .into_response();
    }

    let mut file_name = String::from("unknown");
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        if field.name() == Some("file") {
            file_name = field.file_name().unwrap_or("unknown").to_string();
            let _ = field.bytes().await.expect("field bytes");
        }
    }

    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    state.logs.lock().unwrap().push(json!({
        "id": id,
        "recovery_status": "success",
        "parse_status": "success",
        "notes": file_name,
    }));
    StatusCode::CREATED.into_response()
}

async fn get_log(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    let logs = state.logs.lock().unwrap();
    match logs.iter().find(|log| log["id"] == id) {
        Some(log) => Json(log.clone()).into_response(),
        None => not_found(),
    }
}

async fn patch_log(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    state.patch_hits.fetch_add(1, Ordering::SeqCst);
    apply_update(&state, id, body)
}

async fn put_log(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    state.put_hits.fetch_add(1, Ordering::SeqCst);
    apply_update(&state, id, body)
}

fn apply_update(state: &StubState, id: i64, body: Value) -> Response {
    if state.fail_update.load(Ordering::SeqCst) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"notes": ["too long"], "car": ["unknown id"]})),
        )
            .into_response();
    }

    let mut logs = state.logs.lock().unwrap();
    let Some(log) = logs.iter_mut().find(|log| log["id"] == id) else {
        return not_found();
    };
    for key in ["car", "driver", "event_type", "notes"] {
        if let Some(value) = body.get(key) {
            log[key] = value.clone();
        }
    }
    Json(log.clone()).into_response()
}

async fn delete_log(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    state.delete_hits.fetch_add(1, Ordering::SeqCst);
    let mut logs = state.logs.lock().unwrap();
    let before = logs.len();
    logs.retain(|log| log["id"] != id);
    if logs.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

// ---------------------------------------------------------------------------
// Geometry and download
// ---------------------------------------------------------------------------

async fn geometry(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    if state.fail_geometry.load(Ordering::SeqCst) {
        return not_found();
    }
    let _ = id;
    Json(json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[9.28, 45.62], [9.29, 45.63], [9.30, 45.61]]
            },
            "properties": {}
        }]
    }))
    .into_response()
}

async fn download(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    let _ = id;
    let body = b"mcap-bytes".to_vec();
    match state.download_header.lock().unwrap().clone() {
        Some(value) => ([(header::CONTENT_DISPOSITION, value)], body).into_response(),
        None => body.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Lookups and summary
// ---------------------------------------------------------------------------

async fn cars() -> Json<Value> {
    Json(json!([{"id": 1, "name": "GT3"}, {"id": 2, "name": "Rally-2"}]))
}

async fn drivers(State(state): State<Arc<StubState>>) -> Response {
    if state.fail_operators.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(json!([{"id": 10, "name": "A. Senna"}])).into_response()
}

async fn event_types() -> Json<Value> {
    Json(json!([{"id": 20, "name": "Shakedown"}]))
}

async fn summary(State(state): State<Arc<StubState>>) -> Json<Value> {
    let total = state.logs.lock().unwrap().len();
    Json(json!({"total_logs": total, "parse_success": total}))
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "No McapLog matches the given query."})),
    )
        .into_response()
}
