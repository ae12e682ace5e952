//! Route definitions.
//!
//! `health` mounts at the root; everything else nests under `/api/v1`
//! via [`api_routes`].

pub mod detection;
pub mod health;
pub mod regions;

use axum::Router;

use crate::state::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(regions::router()).merge(detection::router())
}
