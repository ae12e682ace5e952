//! Region-of-interest resolution.
//!
//! Draw mode uses the caller's polygon as-is. Lookup mode resolves a
//! (state, district) pair against the administrative boundary dataset by
//! exact name match -- a mismatch is a caller error, not something to
//! fuzzy-match around. Resolution always completes before the pipeline
//! runs.

use std::sync::Arc;

use agriburn_core::request::RoiSelection;
use agriburn_earthengine::{backend::compute_number, ComputeBackend, EarthEngineError, FeatureCollection, Geometry};
use serde_json::Value;

/// Administrative boundary dataset (level-2 districts).
pub const BOUNDARY_COLLECTION: &str = "FAO/GAUL/2015/level2";
/// State (first-level administrative unit) name property.
pub const STATE_PROPERTY: &str = "ADM1_NAME";
/// District (second-level administrative unit) name property.
pub const DISTRICT_PROPERTY: &str = "ADM2_NAME";

/// Region label used for user-drawn geometries.
pub const CUSTOM_STATE_LABEL: &str = "Custom";
/// Sub-region label used for user-drawn geometries.
pub const CUSTOM_DISTRICT_LABEL: &str = "ROI";

/// A resolved region of interest.
#[derive(Debug, Clone)]
pub struct ResolvedBoundary {
    /// ROI geometry consumed by the pipeline.
    pub roi: Geometry,
    /// Raw boundary polygon returned for map display.
    pub boundary_geojson: Value,
    pub state: String,
    pub district: String,
}

/// Errors from boundary resolution.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    /// No feature matched the (state, district) pair exactly.
    #[error("District not found: {district}, {state}")]
    RegionNotFound { state: String, district: String },

    /// The boundary dataset query itself failed.
    #[error(transparent)]
    EarthEngine(#[from] EarthEngineError),
}

/// Resolves ROI selections into geometries.
pub struct BoundaryResolver {
    backend: Arc<dyn ComputeBackend>,
}

impl BoundaryResolver {
    pub fn new(backend: Arc<dyn ComputeBackend>) -> Self {
        Self { backend }
    }

    pub async fn resolve(&self, selection: &RoiSelection) -> Result<ResolvedBoundary, BoundaryError> {
        match selection {
            RoiSelection::Drawn(geojson) => Ok(ResolvedBoundary {
                roi: Geometry::from_geojson(geojson.clone()),
                boundary_geojson: geojson.clone(),
                state: CUSTOM_STATE_LABEL.to_string(),
                district: CUSTOM_DISTRICT_LABEL.to_string(),
            }),
            RoiSelection::District { state, district } => self.lookup(state, district).await,
        }
    }

    /// Filter the boundary dataset by exact state and district names.
    async fn lookup(&self, state: &str, district: &str) -> Result<ResolvedBoundary, BoundaryError> {
        tracing::info!(state, district, "Resolving district boundary");

        let matches = FeatureCollection::load(BOUNDARY_COLLECTION)
            .filter_eq(STATE_PROPERTY, state)
            .filter_eq(DISTRICT_PROPERTY, district);

        let count = compute_number(self.backend.as_ref(), &matches.size()).await?;
        if count == 0.0 {
            return Err(BoundaryError::RegionNotFound {
                state: state.to_string(),
                district: district.to_string(),
            });
        }

        let boundary_geojson = self.backend.compute(&matches.geometry()).await?;
        Ok(ResolvedBoundary {
            roi: Geometry::from_geojson(boundary_geojson.clone()),
            boundary_geojson,
            state: state.to_string(),
            district: district.to_string(),
        })
    }
}
