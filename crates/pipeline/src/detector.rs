//! The orchestrating detector.
//!
//! One detection run is one pass through the full pipeline: query the
//! image archive for both date windows, short-circuit when either window
//! has no usable imagery, composite and difference the cloud-masked
//! scenes, intersect the triple-threshold burn mask with the agricultural
//! mask, and sample the survivors into classified hotspots.
//!
//! The expression graph stays local until the terminal calls: two
//! collection sizes, the land-cover availability probe, and the final
//! sample. A fault from the compute layer anywhere in between is caught
//! here, logged, and downgraded to an empty result with a `remote_fault`
//! status -- a stuck analysis must never crash the caller.

use std::sync::Arc;

use agriburn_core::detection::{DetectionStatus, Hotspot};
use agriburn_core::window::AnalysisWindows;
use agriburn_earthengine::backend::{compute_features, compute_number};
use agriburn_earthengine::image::SampleParams;
use agriburn_earthengine::{ComputeBackend, EarthEngineError, Geometry, Image, ImageCollection};
use serde_json::Value;

use crate::cloud_mask::mask_clouds;
use crate::indices::{self, BAI_BAND, DNBR_BAND, DNDVI_BAND};
use crate::landcover::{LandcoverMaskProvider, LandcoverPolicy};

/// Harmonized surface-reflectance image archive.
pub const IMAGE_COLLECTION: &str = "COPERNICUS/S2_SR_HARMONIZED";
/// Per-image cloud cover metadata property.
pub const CLOUD_COVER_PROPERTY: &str = "CLOUDY_PIXEL_PERCENTAGE";
/// Images at or above this cloud cover are never considered.
pub const MAX_CLOUD_COVER_PCT: f64 = 40.0;

/// dNBR must exceed this for a pixel to be a burn candidate.
pub const DNBR_THRESHOLD: f64 = 0.10;
/// BAI must exceed this for a pixel to be a burn candidate.
pub const BAI_THRESHOLD: f64 = 89.0;
/// dNDVI must exceed this for a pixel to be a burn candidate.
pub const DNDVI_THRESHOLD: f64 = 0.2;

/// Sampling ground resolution in meters.
pub const SAMPLE_SCALE_M: f64 = 20.0;
/// Statistical cap on sampled pixels per run; large regions are sampled,
/// not exhaustively enumerated.
pub const MAX_SAMPLE_PIXELS: u32 = 20_000;
/// Aggregation tile scale passed to the sampler.
pub const SAMPLE_TILE_SCALE: f64 = 4.0;

/// Outcome of one detection run.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub status: DetectionStatus,
    pub hotspots: Vec<Hotspot>,
    /// Whether the agricultural mask was part of the final mask. `false`
    /// in degraded (spectral-only) runs.
    pub agricultural_mask_applied: bool,
}

impl DetectionResult {
    fn empty(status: DetectionStatus) -> Self {
        Self {
            status,
            hotspots: Vec::new(),
            agricultural_mask_applied: false,
        }
    }
}

/// Composes and executes the burn-scar pipeline.
pub struct BurnScarDetector {
    backend: Arc<dyn ComputeBackend>,
    landcover: LandcoverMaskProvider,
    landcover_policy: LandcoverPolicy,
}

impl BurnScarDetector {
    pub fn new(backend: Arc<dyn ComputeBackend>, landcover_policy: LandcoverPolicy) -> Self {
        Self {
            landcover: LandcoverMaskProvider::new(Arc::clone(&backend)),
            backend,
            landcover_policy,
        }
    }

    /// Run the pipeline for a resolved ROI and window pair.
    ///
    /// Never returns an error: remote faults are downgraded to an empty
    /// [`DetectionStatus::RemoteFault`] result.
    pub async fn detect(&self, roi: &Geometry, windows: &AnalysisWindows) -> DetectionResult {
        match self.run(roi, windows).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Burn scar analysis failed at the compute layer");
                DetectionResult::empty(DetectionStatus::RemoteFault)
            }
        }
    }

    async fn run(
        &self,
        roi: &Geometry,
        windows: &AnalysisWindows,
    ) -> Result<DetectionResult, EarthEngineError> {
        tracing::info!(
            pre_fire = %windows.pre_fire,
            post_fire = %windows.post_fire,
            "Extracting burn scars (dNBR + BAI + dNDVI)",
        );

        let archive = ImageCollection::load(IMAGE_COLLECTION)
            .filter_bounds(roi)
            .filter_lt(CLOUD_COVER_PROPERTY, MAX_CLOUD_COVER_PCT);

        let pre_fire = archive.filter_date(windows.pre_fire.start, windows.pre_fire.exclusive_end());
        let post_fire =
            archive.filter_date(windows.post_fire.start, windows.post_fire.exclusive_end());

        let pre_count = compute_number(self.backend.as_ref(), &pre_fire.size()).await?;
        let post_count = compute_number(self.backend.as_ref(), &post_fire.size()).await?;
        tracing::info!(pre_count, post_count, "Archive query complete");

        if pre_count == 0.0 || post_count == 0.0 {
            tracing::info!("Not enough cloud-free imagery; skipping analysis");
            return Ok(DetectionResult::empty(DetectionStatus::InsufficientData));
        }

        let pre_composite = pre_fire.map(mask_clouds).median();
        let post_composite = post_fire.map(mask_clouds).median();

        let dnbr = indices::dnbr(&pre_composite, &post_composite);
        let bai = indices::bai(&post_composite);
        let dndvi = indices::dndvi(&pre_composite, &post_composite);

        let burn_mask = dnbr
            .gt(DNBR_THRESHOLD)
            .and(&bai.gt(BAI_THRESHOLD))
            .and(&dndvi.gt(DNDVI_THRESHOLD));

        let agri_mask = self.landcover.agricultural_mask(windows.analysis_year()).await;
        let (final_mask, mask_applied) = match agri_mask {
            Some(mask) => (burn_mask.and(&mask), true),
            None if self.landcover_policy == LandcoverPolicy::Require => {
                tracing::warn!("Agricultural mask unavailable and mandatory; aborting run");
                return Ok(DetectionResult::empty(DetectionStatus::InsufficientData));
            }
            None => {
                tracing::warn!("Agricultural mask unavailable; proceeding with spectral mask only");
                (burn_mask, false)
            }
        };

        let analysis = dnbr
            .add_bands(&bai)
            .add_bands(&dndvi)
            .update_mask(&final_mask);

        let sample = analysis.sample(
            roi,
            SampleParams {
                scale: SAMPLE_SCALE_M,
                num_pixels: MAX_SAMPLE_PIXELS,
                tile_scale: SAMPLE_TILE_SCALE,
            },
        );
        let features = compute_features(self.backend.as_ref(), &sample).await?;

        let hotspots: Vec<Hotspot> = features
            .iter()
            .filter_map(parse_feature)
            .enumerate()
            .map(|(i, (lat, lon, dnbr, bai, dndvi))| {
                Hotspot::from_sample(i as u32 + 1, lat, lon, dnbr, bai, dndvi)
            })
            .collect();

        tracing::info!(count = hotspots.len(), "Sampled agricultural burn scar pixels");

        Ok(DetectionResult {
            status: DetectionStatus::Complete,
            hotspots,
            agricultural_mask_applied: mask_applied,
        })
    }
}

/// Extract `(lat, lon, dnbr, bai, dndvi)` from one sampled feature.
///
/// Samples missing their geometry are skipped; missing index properties
/// default to zero.
fn parse_feature(feature: &Value) -> Option<(f64, f64, f64, f64, f64)> {
    let coordinates = feature
        .get("geometry")
        .and_then(|g| g.get("coordinates"))
        .and_then(Value::as_array)?;
    let longitude = coordinates.first().and_then(Value::as_f64)?;
    let latitude = coordinates.get(1).and_then(Value::as_f64)?;

    let property = |name: &str| {
        feature
            .get("properties")
            .and_then(|p| p.get(name))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    };

    Some((
        latitude,
        longitude,
        property(DNBR_BAND),
        property(BAI_BAND),
        property(DNDVI_BAND),
    ))
}
