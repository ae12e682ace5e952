//! Handlers for the static region reference data.
//!
//! Routes:
//! - `GET /states`                      — supported states
//! - `GET /states/{state}/districts`    — districts of one state

use axum::extract::Path;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use agriburn_core::error::CoreError;
use agriburn_core::regions;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;

/// Supported states, in display order.
#[derive(Debug, Serialize)]
pub struct StatesResponse {
    pub states: Vec<&'static str>,
}

/// Districts of one state, in display order.
#[derive(Debug, Serialize)]
pub struct DistrictsResponse {
    pub districts: Vec<&'static str>,
}

/// GET /api/v1/states
pub async fn list_states() -> impl IntoResponse {
    Json(DataResponse {
        data: StatesResponse {
            states: regions::states(),
        },
    })
}

/// GET /api/v1/states/{state}/districts
pub async fn list_districts(Path(state): Path<String>) -> AppResult<impl IntoResponse> {
    let districts = regions::districts_for(&state).ok_or(AppError::Core(CoreError::NotFound {
        entity: "State",
        name: state.clone(),
    }))?;

    Ok(Json(DataResponse {
        data: DistrictsResponse {
            districts: districts.to_vec(),
        },
    }))
}
