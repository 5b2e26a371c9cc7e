#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scada_api::config::{LogFormat, ServerConfig};
use scada_api::router::build_app_router;
use scada_api::state::AppState;
use scada_core::machine::{default_last_maintenance, MachineSimulator, MachineState};
use serde_json::Value;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as the only CORS origin and a fixed
/// simulator seed.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        service_name: "SCADA Monitoring System".to_string(),
        last_maintenance: default_last_maintenance(),
        rng_seed: Some(7),
        log_format: LogFormat::Text,
    }
}

/// Full application router plus a handle on its state, so tests can look
/// at the simulator without going through HTTP.
pub fn build_test_app() -> (Router, AppState) {
    let state = AppState::from_config(test_config());
    (build_app_router(state.clone()), state)
}

/// Same as [`build_test_app`] but starting the machine from `machine`.
pub fn build_test_app_with_machine(machine: MachineState) -> (Router, AppState) {
    let simulator = MachineSimulator::new(machine, StdRng::seed_from_u64(7));
    let state = AppState::new(test_config(), simulator);
    (build_app_router(state.clone()), state)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, None).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
