//! Mock console backend for integration tests
//!
//! Serves a small in-memory REST API on an ephemeral port and counts how many
//! times each route was actually reached.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use adbook::{ApiClient, Config};

// == Backend State ==
#[derive(Clone, Default)]
pub struct BackendState {
    hits: Arc<Mutex<HashMap<String, usize>>>,
    campaigns: Arc<Mutex<BTreeMap<u64, Value>>>,
    next_id: Arc<AtomicU64>,
}

impl BackendState {
    fn hit(&self, route: &str) -> usize {
        let mut hits = self.hits.lock().unwrap();
        let count = hits.entry(route.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Number of requests that reached `route`, e.g. `"GET /test"`.
    pub fn hits(&self, route: &str) -> usize {
        self.hits.lock().unwrap().get(route).copied().unwrap_or(0)
    }

    fn seed(&self) {
        let mut campaigns = self.campaigns.lock().unwrap();
        campaigns.insert(
            1,
            json!({"id": 1, "name": "Spring Sale", "status": "active", "category_id": 1}),
        );
        campaigns.insert(2, json!({"id": 2, "name": "Summer", "status": "draft"}));
        self.next_id.store(3, Ordering::SeqCst);
    }
}

// == Handlers ==
async fn get_test(State(state): State<BackendState>) -> Json<Value> {
    state.hit("GET /test");
    Json(json!({"message": "hello", "items": [1, 2, 3]}))
}

async fn post_test(State(state): State<BackendState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.hit("POST /test");
    (StatusCode::CREATED, Json(body))
}

async fn get_other(State(state): State<BackendState>) -> Json<Value> {
    state.hit("GET /other");
    Json(json!({"message": "other"}))
}

/// Fails the first time it is called, succeeds afterwards.
async fn get_flaky(State(state): State<BackendState>) -> Response {
    if state.hit("GET /flaky") == 1 {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
    } else {
        Json(json!({"recovered": true})).into_response()
    }
}

async fn list_categories(State(state): State<BackendState>) -> Json<Value> {
    state.hit("GET /categories");
    Json(json!([
        {"id": 1, "name": "Retail", "slug": "retail"},
        {"id": 2, "name": "Travel", "slug": "travel"}
    ]))
}

async fn list_campaigns(
    State(state): State<BackendState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.hit("GET /campaigns");
    let items: Vec<Value> = state.campaigns.lock().unwrap().values().cloned().collect();
    let total = items.len();
    let page = params
        .get("page")
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(1);
    Json(json!({"data": items, "total": total, "page": page}))
}

async fn create_campaign(
    State(state): State<BackendState>,
    Json(mut body): Json<Value>,
) -> impl IntoResponse {
    state.hit("POST /campaigns");
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    body["id"] = json!(id);
    state.campaigns.lock().unwrap().insert(id, body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn get_campaign(
    State(state): State<BackendState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    state.hit("GET /campaigns/:id");
    state
        .campaigns
        .lock()
        .unwrap()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_campaign(
    State(state): State<BackendState>,
    Path(id): Path<u64>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.hit("PUT /campaigns/:id");
    let mut campaigns = state.campaigns.lock().unwrap();
    if !campaigns.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    body["id"] = json!(id);
    campaigns.insert(id, body.clone());
    Ok(Json(body))
}

async fn delete_campaign(State(state): State<BackendState>, Path(id): Path<u64>) -> StatusCode {
    state.hit("DELETE /campaigns/:id");
    match state.campaigns.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

fn router(state: BackendState) -> Router {
    Router::new()
        .route("/test", get(get_test).post(post_test))
        .route("/other", get(get_other))
        .route("/flaky", get(get_flaky))
        .route("/categories", get(list_categories))
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route(
            "/campaigns/:id",
            get(get_campaign).put(update_campaign).delete(delete_campaign),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// == Mock Backend ==
pub struct MockBackend {
    pub base_url: String,
    pub state: BackendState,
}

impl MockBackend {
    /// Starts the backend on 127.0.0.1 with an OS-assigned port.
    pub async fn start() -> Self {
        let state = BackendState::default();
        state.seed();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            api_base_url: self.base_url.clone(),
            request_timeout: 5,
            ..Config::default()
        }
    }

    /// Client with a real reqwest transport and a fresh cache.
    pub fn client(&self) -> ApiClient {
        ApiClient::from_config(&self.config()).unwrap()
    }

    pub fn hits(&self, route: &str) -> usize {
        self.state.hits(route)
    }
}
