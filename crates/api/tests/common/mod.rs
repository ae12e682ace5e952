//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router (same middleware stack as
//! production) on top of a scripted compute backend, so tests exercise
//! the whole request path without touching the real service.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use agriburn_api::config::ServerConfig;
use agriburn_api::router::build_app_router;
use agriburn_api::state::AppState;
use agriburn_earthengine::{ComputeBackend, EarthEngineError, Expr};
use agriburn_pipeline::{BoundaryResolver, BurnScarDetector, LandcoverPolicy, ResultStore};

/// Build a test `ServerConfig` with safe defaults.
///
/// The Earth Engine URL points nowhere; tests always inject a
/// [`ScriptedBackend`] instead of a real client.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        ee_api_url: "http://127.0.0.1:0".to_string(),
        ee_project: "test-project".to_string(),
        ee_auth_token: None,
        landcover_policy: LandcoverPolicy::Skip,
    }
}

/// Compute backend that replays scripted responses.
///
/// Responses are queued per root function name and consumed in call
/// order. The pipeline's terminal call order is: boundary match count
/// and geometry (lookup mode only), pre-fire size, post-fire size,
/// land-cover size, sample.
#[derive(Default)]
pub struct ScriptedBackend {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, String>>>>,
}

impl ScriptedBackend {
    pub fn respond(self, function: &str, value: Value) -> Self {
        self.push(function, Ok(value));
        self
    }

    pub fn fail(self, function: &str) -> Self {
        self.push(function, Err("scripted fault".into()));
        self
    }

    fn push(&self, function: &str, response: Result<Value, String>) {
        self.responses
            .lock()
            .unwrap()
            .entry(function.to_string())
            .or_default()
            .push_back(response);
    }
}

#[async_trait]
impl ComputeBackend for ScriptedBackend {
    async fn compute(&self, expr: &Expr) -> Result<Value, EarthEngineError> {
        let function = expr.function().unwrap_or("<constant>").to_string();
        let response = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&function)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("unscripted compute call: {function}"));
        response.map_err(|body| EarthEngineError::Api { status: 500, body })
    }
}

/// Build the full application router over a scripted backend.
pub fn build_test_app(backend: Arc<ScriptedBackend>) -> Router {
    build_test_app_with_policy(backend, LandcoverPolicy::Skip)
}

/// Same as [`build_test_app`] with an explicit land-cover policy.
pub fn build_test_app_with_policy(
    backend: Arc<ScriptedBackend>,
    landcover_policy: LandcoverPolicy,
) -> Router {
    let mut config = test_config();
    config.landcover_policy = landcover_policy;

    let backend: Arc<dyn ComputeBackend> = backend;
    let state = AppState {
        boundary: Arc::new(BoundaryResolver::new(Arc::clone(&backend))),
        detector: Arc::new(BurnScarDetector::new(backend, landcover_policy)),
        store: Arc::new(ResultStore::new()),
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request must build"),
    )
    .await
    .expect("request must not fail at the transport level")
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request must build"),
    )
    .await
    .expect("request must not fail at the transport level")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body must be JSON")
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body must be UTF-8")
}
