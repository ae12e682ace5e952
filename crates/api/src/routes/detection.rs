//! Detection routes — mounted under `/api/v1`.
//!
//! ```text
//! POST /detections                 start_detection
//! GET  /detections/{id}/export     export_csv
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::detection;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/detections", post(detection::start_detection))
        .route("/detections/{id}/export", get(detection::export_csv))
}
