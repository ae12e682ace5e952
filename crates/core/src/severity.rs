//! Burn severity classification from dNBR.
//!
//! Uses the USGS severity breakpoints. Boundary values belong to the
//! higher tier, so a dNBR of exactly 0.66 classifies as very high.

/// dNBR at or above which a burn is "Very High Severity".
pub const VERY_HIGH_DNBR: f64 = 0.66;
/// dNBR at or above which a burn is "High Severity" (below Very High).
pub const HIGH_DNBR: f64 = 0.44;
/// dNBR at or above which a burn is "Moderate Severity".
pub const MODERATE_DNBR: f64 = 0.27;
/// dNBR at or above which a burn is "Low Severity". Below this the pixel
/// is considered unburned or regrowing vegetation.
pub const LOW_DNBR: f64 = 0.10;

/// Five-level ordinal burn severity derived from dNBR.
///
/// Serialized using the full display labels (e.g. `"Very High Severity"`)
/// so API payloads and CSV exports agree with what the map legend shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    #[serde(rename = "Very High Severity")]
    VeryHigh,
    #[serde(rename = "High Severity")]
    High,
    #[serde(rename = "Moderate Severity")]
    Moderate,
    #[serde(rename = "Low Severity")]
    Low,
    #[serde(rename = "Unburned or Regrowth")]
    UnburnedOrRegrowth,
}

impl Severity {
    /// Classify a dNBR value into a severity tier.
    pub fn from_dnbr(dnbr: f64) -> Self {
        if dnbr >= VERY_HIGH_DNBR {
            Self::VeryHigh
        } else if dnbr >= HIGH_DNBR {
            Self::High
        } else if dnbr >= MODERATE_DNBR {
            Self::Moderate
        } else if dnbr >= LOW_DNBR {
            Self::Low
        } else {
            Self::UnburnedOrRegrowth
        }
    }

    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High Severity",
            Self::High => "High Severity",
            Self::Moderate => "Moderate Severity",
            Self::Low => "Low Severity",
            Self::UnburnedOrRegrowth => "Unburned or Regrowth",
        }
    }
}
