use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use vero_mock_server::{app, AppState, RecordedRequest};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn state() -> AppState {
    AppState::new("AUTH_TOKEN")
}

// --- success ---

#[tokio::test]
async fn identify_returns_success() {
    let resp = app(state())
        .oneshot(json_request(
            "POST",
            "/users/track",
            r#"{"auth_token":"AUTH_TOKEN","id":"1234567890","data":{"email":"jeff@yourdomain.com"}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"status": 200, "message": "Success."}));
}

#[tokio::test]
async fn tags_accept_empty_lists() {
    let resp = app(state())
        .oneshot(json_request(
            "PUT",
            "/users/tags/edit",
            r#"{"auth_token":"AUTH_TOKEN","id":"1","add":[],"remove":[]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn track_event_returns_success() {
    let resp = app(state())
        .oneshot(json_request(
            "POST",
            "/events/track",
            r#"{"auth_token":"AUTH_TOKEN","identity":{"id":"123"},"event_name":"booking-request","data":{},"extras":{}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// --- rejections ---

#[tokio::test]
async fn wrong_token_returns_401_with_message() {
    let resp = app(state())
        .oneshot(json_request(
            "POST",
            "/users/unsubscribe",
            r#"{"auth_token":"WRONG","id":"1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "invalid token");
}

#[tokio::test]
async fn missing_token_returns_401() {
    let resp = app(state())
        .oneshot(json_request("POST", "/users/resubscribe", r#"{"id":"1"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_field_returns_400() {
    let resp = app(state())
        .oneshot(json_request(
            "PUT",
            "/users/reidentify",
            r#"{"auth_token":"AUTH_TOKEN","id":"1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "missing required field: new_id");
}

#[tokio::test]
async fn wrong_method_returns_405() {
    let resp = app(state())
        .oneshot(json_request(
            "POST",
            "/users/edit",
            r#"{"auth_token":"AUTH_TOKEN","id":"1","changes":{}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let resp = app(state())
        .oneshot(json_request("POST", "/users/track", "not json"))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
    assert!(!body_bytes(resp).await.is_empty());
}

// --- request log ---

#[tokio::test]
async fn requests_are_recorded_in_order() {
    let state = state();

    for (method, uri, body) in [
        ("POST", "/users/unsubscribe", r#"{"auth_token":"AUTH_TOKEN","id":"1"}"#),
        ("PUT", "/users/edit", r#"{"auth_token":"AUTH_TOKEN","id":"1","changes":{"city":"lisbon"}}"#),
        ("POST", "/users/resubscribe", r#"{"auth_token":"WRONG","id":"1"}"#),
    ] {
        app(state.clone())
            .oneshot(json_request(method, uri, body))
            .await
            .unwrap();
    }

    let resp = app(state.clone())
        .oneshot(Request::builder().uri("/requests").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let recorded: Vec<RecordedRequest> = body_json(resp).await;

    assert_eq!(recorded, state.requests());
    assert_eq!(recorded.len(), 3);
    assert_eq!(recorded[0].path, "/users/unsubscribe");
    assert_eq!(recorded[1].method, "PUT");
    assert_eq!(recorded[1].body["changes"], json!({"city": "lisbon"}));
    // Rejected requests are still recorded.
    assert_eq!(recorded[2].body["auth_token"], "WRONG");
}
