use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info};

/// A request as the mock server received it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

#[derive(Clone, Debug)]
pub struct AppState {
    auth_token: Arc<str>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl AppState {
    pub fn new(auth_token: &str) -> Self {
        Self {
            auth_token: Arc::from(auth_token),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Everything received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, request: RecordedRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/users/track", post(handle))
        .route("/users/reidentify", put(handle))
        .route("/users/edit", put(handle))
        .route("/users/tags/edit", put(handle))
        .route("/users/unsubscribe", post(handle))
        .route("/users/resubscribe", post(handle))
        .route("/events/track", post(handle))
        .route("/requests", get(list_requests))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock Vero API listening");
    }
    axum::serve(listener, app(state)).await
}

/// Fields the real API rejects a request without, besides `auth_token`.
fn required_fields(path: &str) -> &'static [&'static str] {
    match path {
        "/users/track" => &["id"],
        "/users/reidentify" => &["id", "new_id"],
        "/users/edit" => &["id", "changes"],
        "/users/tags/edit" => &["id", "add", "remove"],
        "/users/unsubscribe" | "/users/resubscribe" => &["id"],
        "/events/track" => &["identity", "event_name"],
        _ => &[],
    }
}

fn reply(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "status": status.as_u16(), "message": message })),
    )
}

async fn handle(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    debug!(%method, %path, "mock Vero API request");
    state.record(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        body: body.clone(),
    });

    if body.get("auth_token").and_then(Value::as_str) != Some(&*state.auth_token) {
        return reply(StatusCode::UNAUTHORIZED, "invalid token");
    }
    if let Some(missing) = required_fields(&path)
        .iter()
        .find(|field| body.get(**field).is_none_or(Value::is_null))
    {
        return reply(
            StatusCode::BAD_REQUEST,
            &format!("missing required field: {missing}"),
        );
    }
    reply(StatusCode::OK, "Success.")
}

async fn list_requests(State(state): State<AppState>) -> Json<Vec<RecordedRequest>> {
    Json(state.requests())
}
