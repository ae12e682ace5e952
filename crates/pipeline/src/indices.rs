//! Spectral change indices.
//!
//! Three independent burn signals over the pre/post-fire composites. Each
//! builder returns a single-band image named after its index; the names
//! are what the sampled feature properties carry.

use agriburn_earthengine::Image;

/// Red band.
pub const RED_BAND: &str = "B4";
/// Near-infrared band.
pub const NIR_BAND: &str = "B8";
/// Shortwave-infrared band.
pub const SWIR2_BAND: &str = "B12";

/// Band name of the differenced normalized burn ratio.
pub const DNBR_BAND: &str = "dNBR";
/// Band name of the burned area index.
pub const BAI_BAND: &str = "BAI";
/// Band name of the differenced normalized vegetation index.
pub const DNDVI_BAND: &str = "dNDVI";

/// Burned area index formula over unit reflectance, anchored at the
/// reference spectral signature of freshly burned ground. Near-zero
/// denominators produce very large values; that is the published formula
/// behaving as intended, not an error.
pub const BAI_FORMULA: &str = "1.0 / ((0.1 - RED)**2 + (0.06 - NIR)**2)";

/// dNBR: pre-fire NBR minus post-fire NBR. Positive values indicate loss
/// of vegetation moisture (burn signature).
pub fn dnbr(pre_fire: &Image, post_fire: &Image) -> Image {
    pre_fire
        .normalized_difference(NIR_BAND, SWIR2_BAND)
        .subtract(&post_fire.normalized_difference(NIR_BAND, SWIR2_BAND))
        .rename(DNBR_BAND)
}

/// dNDVI: pre-fire NDVI minus post-fire NDVI.
pub fn dndvi(pre_fire: &Image, post_fire: &Image) -> Image {
    pre_fire
        .normalized_difference(NIR_BAND, RED_BAND)
        .subtract(&post_fire.normalized_difference(NIR_BAND, RED_BAND))
        .rename(DNDVI_BAND)
}

/// BAI over the post-fire composite only.
pub fn bai(post_fire: &Image) -> Image {
    let red = post_fire.select(RED_BAND);
    let nir = post_fire.select(NIR_BAND);
    Image::expression(BAI_FORMULA, [("RED", &red), ("NIR", &nir)]).rename(BAI_BAND)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn composites() -> (Image, Image) {
        (Image::placeholder("pre"), Image::placeholder("post"))
    }

    #[test]
    fn dnbr_differences_nir_swir() {
        let (pre, post) = composites();
        let index = dnbr(&pre, &post);

        assert_eq!(index.expr().function(), Some("Image.rename"));
        assert_eq!(
            index.expr().arg("names").unwrap().as_constant(),
            Some(&json!([DNBR_BAND]))
        );

        let diff = index.expr().arg("input").unwrap();
        assert_eq!(diff.function(), Some("Image.subtract"));
        for side in ["image1", "image2"] {
            let nd = diff.arg(side).unwrap();
            assert_eq!(nd.function(), Some("Image.normalizedDifference"));
            assert_eq!(
                nd.arg("bandNames").unwrap().as_constant(),
                Some(&json!([NIR_BAND, SWIR2_BAND]))
            );
        }
    }

    #[test]
    fn dndvi_differences_nir_red() {
        let (pre, post) = composites();
        let index = dndvi(&pre, &post);

        let diff = index.expr().arg("input").unwrap();
        let nd = diff.arg("image1").unwrap();
        assert_eq!(
            nd.arg("bandNames").unwrap().as_constant(),
            Some(&json!([NIR_BAND, RED_BAND]))
        );
    }

    #[test]
    fn bai_uses_post_fire_only() {
        let (_, post) = composites();
        let index = bai(&post);

        let expression = index.expr().arg("input").unwrap();
        assert_eq!(expression.function(), Some("Image.expression"));
        assert_eq!(
            expression.arg("expression").unwrap().as_constant(),
            Some(&json!(BAI_FORMULA))
        );

        // Both bindings select bands of the post-fire composite.
        let map = expression.arg("map").unwrap();
        let serialized = serde_json::to_value(map).unwrap().to_string();
        assert!(serialized.contains("\"post\""));
        assert!(!serialized.contains("\"pre\""));
    }
}
