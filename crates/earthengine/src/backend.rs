//! The compute seam.
//!
//! Everything above this trait builds expression graphs; everything below
//! it talks to the actual service. The pipeline holds an
//! `Arc<dyn ComputeBackend>` so integration tests can substitute a
//! scripted backend and exercise the full orchestration offline.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::EarthEngineError;
use crate::expr::Expr;

/// Evaluates expression graphs remotely. One call = one terminal
/// evaluation; intermediate expressions are never submitted on their own.
#[async_trait]
pub trait ComputeBackend: Send + Sync {
    async fn compute(&self, expr: &Expr) -> Result<Value, EarthEngineError>;
}

/// Evaluate an expression expected to yield a number.
pub async fn compute_number(
    backend: &dyn ComputeBackend,
    expr: &Expr,
) -> Result<f64, EarthEngineError> {
    let value = backend.compute(expr).await?;
    value
        .as_f64()
        .ok_or_else(|| EarthEngineError::Malformed(format!("expected a number, got {value}")))
}

/// Evaluate an expression expected to yield a GeoJSON feature collection,
/// returning its `features` array.
pub async fn compute_features(
    backend: &dyn ComputeBackend,
    expr: &Expr,
) -> Result<Vec<Value>, EarthEngineError> {
    let value = backend.compute(expr).await?;
    match value.get("features").and_then(Value::as_array) {
        Some(features) => Ok(features.clone()),
        None => Err(EarthEngineError::Malformed(format!(
            "expected a feature collection, got {value}"
        ))),
    }
}
