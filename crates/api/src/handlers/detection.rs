//! Handlers for detection runs and their CSV export.
//!
//! Routes:
//! - `POST /detections`                 — run burn-scar detection
//! - `GET  /detections/{id}/export`     — export one run as CSV

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use agriburn_core::detection::{DetectionStatus, DetectionSummary, Hotspot};
use agriburn_core::request::{DetectionRequest, RoiSelection};
use agriburn_core::types::RunId;
use agriburn_pipeline::boundary::{CUSTOM_DISTRICT_LABEL, CUSTOM_STATE_LABEL};
use agriburn_pipeline::{BoundaryError, DetectionRun};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Detection run payload returned to the caller.
///
/// `run_id` is the handle for the export endpoint; `status` separates
/// real empty results from degraded ones.
#[derive(Debug, Serialize)]
pub struct DetectionResponse {
    pub run_id: RunId,
    pub status: DetectionStatus,
    pub agricultural_mask_applied: bool,
    pub fire_hotspots: u32,
    pub fire_area_hectares: f64,
    pub max_dnbr: f64,
    /// Point feature collection of the hotspot set.
    pub hotspots_geojson: Value,
    /// Resolved region boundary for map display; `null` when the
    /// boundary could not be resolved.
    pub boundary_geojson: Value,
}

/// POST /api/v1/detections
///
/// Validates the request, resolves the region of interest, runs the
/// pipeline, stores the run for export, and returns the result. Remote
/// compute faults yield an empty `remote_fault` result, not an error
/// response; only malformed requests and unknown districts are errors.
pub async fn start_detection(
    State(state): State<AppState>,
    Json(request): Json<DetectionRequest>,
) -> AppResult<impl IntoResponse> {
    let validated = request.validate().map_err(AppError::Core)?;
    let date_range = validated.windows.post_fire.to_string();

    let boundary = match state.boundary.resolve(&validated.roi).await {
        Ok(boundary) => boundary,
        Err(BoundaryError::RegionNotFound { state, district }) => {
            return Err(AppError::Core(agriburn_core::error::CoreError::NotFound {
                entity: "District",
                name: format!("{district}, {state}"),
            }));
        }
        Err(BoundaryError::EarthEngine(e)) => {
            // The boundary dataset is part of the remote compute layer;
            // a fault here downgrades the whole run, same as a fault
            // mid-analysis.
            tracing::error!(error = %e, "Boundary resolution failed at the compute layer");
            let (region_state, region_district) = selection_labels(&validated.roi);
            let run = store_run(
                &state,
                region_state,
                region_district,
                date_range,
                DetectionStatus::RemoteFault,
                false,
                Vec::new(),
            )
            .await;
            return Ok(Json(DataResponse {
                data: DetectionResponse::from_run(&run, Value::Null),
            }));
        }
    };

    let result = state.detector.detect(&boundary.roi, &validated.windows).await;
    let run = store_run(
        &state,
        boundary.state,
        boundary.district,
        date_range,
        result.status,
        result.agricultural_mask_applied,
        result.hotspots,
    )
    .await;

    Ok(Json(DataResponse {
        data: DetectionResponse::from_run(&run, boundary.boundary_geojson),
    }))
}

/// GET /api/v1/detections/{id}/export
///
/// Renders one stored run as CSV, one row per hotspot. Unknown (or
/// evicted) run ids and runs with nothing to export are 404s.
pub async fn export_csv(
    State(state): State<AppState>,
    Path(run_id): Path<RunId>,
) -> AppResult<impl IntoResponse> {
    let run = state
        .store
        .get(run_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No detection run with id {run_id}")))?;

    if run.hotspots.is_empty() {
        return Err(AppError::NotFound("No data available to export".into()));
    }

    let mut csv_output = String::from("id,latitude,longitude,severity,dnbr,bai,dndvi\n");
    for spot in &run.hotspots {
        csv_output.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            spot.id,
            spot.latitude,
            spot.longitude,
            spot.severity.label(),
            spot.dnbr,
            spot.bai,
            spot.dndvi,
        ));
    }

    let filename = format!(
        "BurnScars_{}_{}_{}.csv",
        run.state.replace(' ', "_"),
        run.district.replace(' ', "_"),
        run.date_range.replace(' ', "_"),
    );

    Ok(axum::http::Response::builder()
        .header("Content-Type", "text/csv")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(axum::body::Body::from(csv_output))
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .into_response())
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

impl DetectionResponse {
    fn from_run(run: &DetectionRun, boundary_geojson: Value) -> Self {
        Self {
            run_id: run.id,
            status: run.status,
            agricultural_mask_applied: run.agricultural_mask_applied,
            fire_hotspots: run.summary.fire_hotspots,
            fire_area_hectares: run.summary.fire_area_hectares,
            max_dnbr: run.summary.max_dnbr,
            hotspots_geojson: feature_collection(&run.hotspots),
            boundary_geojson,
        }
    }
}

/// Region labels for runs whose boundary never resolved.
fn selection_labels(selection: &RoiSelection) -> (String, String) {
    match selection {
        RoiSelection::Drawn(_) => (CUSTOM_STATE_LABEL.into(), CUSTOM_DISTRICT_LABEL.into()),
        RoiSelection::District { state, district } => (state.clone(), district.clone()),
    }
}

/// Build and store a run, returning the stored copy.
async fn store_run(
    state: &AppState,
    region_state: String,
    region_district: String,
    date_range: String,
    status: DetectionStatus,
    agricultural_mask_applied: bool,
    hotspots: Vec<Hotspot>,
) -> DetectionRun {
    let run = DetectionRun {
        id: RunId::new_v4(),
        state: region_state,
        district: region_district,
        date_range,
        status,
        agricultural_mask_applied,
        summary: DetectionSummary::from_hotspots(&hotspots),
        hotspots,
    };
    state.store.insert(run.clone()).await;
    run
}

/// Render the hotspot set as a GeoJSON point feature collection.
fn feature_collection(hotspots: &[Hotspot]) -> Value {
    let features: Vec<Value> = hotspots
        .iter()
        .map(|spot| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [spot.longitude, spot.latitude],
                },
                "properties": spot,
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}
