//! Agricultural land-cover mask provider.
//!
//! The annual land-cover classification lags the present by a year or
//! more, so requested years clamp to the latest published year. The mask
//! keeps only cropland pixels and is self-masked: non-cropland pixels are
//! excluded outright rather than carried as `false`, so intersecting it
//! with the burn mask drops them from sampling.

use std::sync::Arc;

use agriburn_earthengine::{backend::compute_number, ComputeBackend, Image, ImageCollection};

/// Latest year with published land-cover data.
pub const LATEST_LANDCOVER_YEAR: i32 = 2023;
/// Annual land-cover classification collection.
pub const LANDCOVER_COLLECTION: &str = "MODIS/061/MCD12Q1";
/// Classification band.
pub const LANDCOVER_BAND: &str = "LC_Type1";
/// Cropland class code.
pub const CROPLAND_CLASS: i64 = 12;
/// Cropland/natural-vegetation mosaic class code.
pub const CROPLAND_MOSAIC_CLASS: i64 = 14;

/// What to do when no land-cover data exists for the analysis year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandcoverPolicy {
    /// Proceed with the spectral-only mask (results may include
    /// non-agricultural burns).
    Skip,
    /// Treat the run as having insufficient data.
    Require,
}

/// Clamp a requested year to the latest year with published data.
pub fn clamp_year(year: i32) -> i32 {
    year.min(LATEST_LANDCOVER_YEAR)
}

/// Resolves the binary agricultural mask for an analysis year.
pub struct LandcoverMaskProvider {
    backend: Arc<dyn ComputeBackend>,
}

impl LandcoverMaskProvider {
    pub fn new(backend: Arc<dyn ComputeBackend>) -> Self {
        Self { backend }
    }

    /// Agricultural mask for `year` (clamped), or `None` when the dataset
    /// has no record for the resolved year.
    ///
    /// A fault while probing availability also yields `None`: the mask is
    /// an enhancement, and the caller decides via [`LandcoverPolicy`]
    /// whether to continue without it.
    pub async fn agricultural_mask(&self, year: i32) -> Option<Image> {
        let resolved_year = clamp_year(year);
        let annual = ImageCollection::load(LANDCOVER_COLLECTION).filter_calendar_year(resolved_year);

        match compute_number(self.backend.as_ref(), &annual.size()).await {
            Ok(count) if count > 0.0 => {}
            Ok(_) => {
                tracing::warn!(year = resolved_year, "No land-cover record for year");
                return None;
            }
            Err(e) => {
                tracing::warn!(year = resolved_year, error = %e, "Land-cover availability probe failed");
                return None;
            }
        }

        let classification = annual.first().select(LANDCOVER_BAND);
        let cropland = classification
            .eq(CROPLAND_CLASS)
            .or(&classification.eq(CROPLAND_MOSAIC_CLASS));
        Some(cropland.self_mask())
    }
}
