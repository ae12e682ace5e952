//! REST client for the Earth Engine compute endpoint.
//!
//! Submits serialized expression graphs to the project-scoped
//! `value:compute` endpoint and unwraps the computed result. Calls are
//! synchronous from the caller's perspective: each terminal evaluation
//! blocks the request until the service answers (no retry or local
//! timeout layer).

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::ComputeBackend;
use crate::error::EarthEngineError;
use crate::expr::Expr;

/// HTTP client for one Earth Engine project.
pub struct EarthEngineClient {
    client: reqwest::Client,
    api_url: String,
    project: String,
    auth_token: Option<String>,
}

impl EarthEngineClient {
    /// Create a new client.
    ///
    /// * `api_url` - Base HTTPS URL, e.g. `https://earthengine.googleapis.com`.
    /// * `project` - Cloud project the computations are billed to.
    pub fn new(api_url: String, project: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            project,
            auth_token: None,
        }
    }

    /// Attach a bearer token sent with every compute call.
    pub fn with_auth_token(mut self, token: String) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across services).
    pub fn with_client(client: reqwest::Client, api_url: String, project: String) -> Self {
        Self {
            client,
            api_url,
            project,
            auth_token: None,
        }
    }

    /// Submit one expression graph for evaluation.
    ///
    /// Sends `POST /v1/projects/{project}/value:compute` with the
    /// serialized expression and returns the `result` payload.
    async fn compute_value(&self, expr: &Expr) -> Result<Value, EarthEngineError> {
        let body = serde_json::json!({ "expression": expr });

        let mut request = self
            .client
            .post(format!(
                "{}/v1/projects/{}/value:compute",
                self.api_url, self.project
            ))
            .json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(EarthEngineError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        match payload.get("result") {
            Some(result) => Ok(result.clone()),
            None => Err(EarthEngineError::Malformed(
                "compute response missing 'result'".into(),
            )),
        }
    }
}

#[async_trait]
impl ComputeBackend for EarthEngineClient {
    async fn compute(&self, expr: &Expr) -> Result<Value, EarthEngineError> {
        tracing::debug!(function = ?expr.function(), "Submitting expression for evaluation");
        self.compute_value(expr).await
    }
}
