use std::sync::Arc;

use agriburn_pipeline::{BoundaryResolver, BurnScarDetector, ResultStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Region-of-interest resolver.
    pub boundary: Arc<BoundaryResolver>,
    /// The burn-scar pipeline.
    pub detector: Arc<BurnScarDetector>,
    /// Recent detection runs, keyed by run id for export.
    pub store: Arc<ResultStore>,
}
