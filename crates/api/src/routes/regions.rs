//! Region reference routes — mounted under `/api/v1`.
//!
//! ```text
//! GET /states                      list_states
//! GET /states/{state}/districts    list_districts
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::regions;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/states", get(regions::list_states))
        .route("/states/{state}/districts", get(regions::list_districts))
}
