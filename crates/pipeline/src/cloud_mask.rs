//! Per-image cloud and cirrus masking.
//!
//! The quality band carries one bit per contamination class; a pixel is
//! kept only when both the cloud and cirrus bits are unset. Masked pixels
//! become no-data and are excluded from the median composite entirely --
//! there is no interpolation or substitution.

use agriburn_earthengine::Image;

/// Per-pixel quality-assurance bitfield band.
pub const QA_BAND: &str = "QA60";
/// Opaque cloud flag (bit 10).
pub const CLOUD_BIT_MASK: i64 = 1 << 10;
/// Cirrus flag (bit 11).
pub const CIRRUS_BIT_MASK: i64 = 1 << 11;
/// Integer reflectance encoding divisor; dividing yields unit fractional
/// reflectance, which the burned-area index formula expects.
pub const REFLECTANCE_SCALE: f64 = 10_000.0;

/// Mask cloud/cirrus-flagged pixels and rescale reflectance.
pub fn mask_clouds(image: Image) -> Image {
    let qa = image.select(QA_BAND);
    let clear = qa
        .bitwise_and(CLOUD_BIT_MASK)
        .eq(0)
        .and(&qa.bitwise_and(CIRRUS_BIT_MASK).eq(0));
    image.update_mask(&clear).divide_by(REFLECTANCE_SCALE)
}
