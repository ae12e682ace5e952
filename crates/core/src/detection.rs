//! Detection records and run-level aggregates.

use serde::Serialize;

use crate::severity::Severity;

/// Ground area represented by one sampled pixel, in hectares.
///
/// Sampling runs at 20 m resolution, so each sample stands for a
/// 20 m x 20 m cell = 400 m^2 = 0.04 ha.
pub const PIXEL_AREA_HECTARES: f64 = 0.04;

/// One sampled burn-scar pixel.
///
/// `dnbr` and `dndvi` carry three decimals, `bai` two; severity is derived
/// from the unrounded dNBR at construction time and stored alongside.
#[derive(Debug, Clone, Serialize)]
pub struct Hotspot {
    /// 1-based sequential id in sample order.
    pub id: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub dnbr: f64,
    pub bai: f64,
    pub dndvi: f64,
    pub severity: Severity,
}

impl Hotspot {
    /// Build a hotspot from raw sampled index values.
    ///
    /// Applies the documented rounding and classifies severity from the
    /// raw (unrounded) dNBR.
    pub fn from_sample(id: u32, latitude: f64, longitude: f64, dnbr: f64, bai: f64, dndvi: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
            dnbr: round_dp(dnbr, 3),
            bai: round_dp(bai, 2),
            dndvi: round_dp(dndvi, 3),
            severity: Severity::from_dnbr(dnbr),
        }
    }
}

/// Run-level aggregates reported alongside the hotspot set.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DetectionSummary {
    /// Number of sampled burn-scar pixels.
    pub fire_hotspots: u32,
    /// `fire_hotspots * 0.04`, rounded to two decimals.
    pub fire_area_hectares: f64,
    /// Maximum dNBR across the hotspot set, `0.0` when empty.
    pub max_dnbr: f64,
}

impl DetectionSummary {
    pub fn from_hotspots(hotspots: &[Hotspot]) -> Self {
        let max_dnbr = hotspots.iter().map(|h| h.dnbr).fold(0.0, f64::max);
        Self {
            fire_hotspots: hotspots.len() as u32,
            fire_area_hectares: round_dp(hotspots.len() as f64 * PIXEL_AREA_HECTARES, 2),
            max_dnbr,
        }
    }
}

/// Outcome classification for one detection run.
///
/// Distinguishes "no qualifying data" from "the compute service failed",
/// so callers can tell an empty result apart from an outage even though
/// both surface as zero hotspots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStatus {
    /// The full pipeline ran; the hotspot set (possibly empty) is real.
    Complete,
    /// Not enough cloud-free imagery (or, when the agricultural mask is
    /// mandatory, no land-cover data) to analyze. Not a fault.
    InsufficientData,
    /// The remote compute layer failed mid-analysis; the empty result is
    /// a downgrade, not a finding.
    RemoteFault,
}

/// Round to `decimals` decimal places (half away from zero).
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
