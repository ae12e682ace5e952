//! Single-image expression builders.
//!
//! Every method is pure: it returns a new [`Image`] whose expression wraps
//! the receiver's. Band math helpers take either another image or a scalar
//! constant, matching the service's overloads.

use serde_json::{json, Value};

use crate::expr::Expr;
use crate::geometry::Geometry;

/// A server-side image, held locally as an expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Image(Expr);

/// Parameters for [`Image::sample`].
#[derive(Debug, Clone, Copy)]
pub struct SampleParams {
    /// Ground resolution in meters.
    pub scale: f64,
    /// Upper bound on the number of sampled pixels.
    pub num_pixels: u32,
    /// Aggregation tile scale factor; higher trades speed for memory.
    pub tile_scale: f64,
}

impl Image {
    pub fn from_expr(expr: Expr) -> Self {
        Self(expr)
    }

    /// Placeholder image bound to a named function argument, for use in
    /// mapped functions (see [`crate::collection::ImageCollection::map`]).
    pub fn placeholder(name: &str) -> Self {
        Self(Expr::argument(name))
    }

    pub fn expr(&self) -> &Expr {
        &self.0
    }

    pub fn into_expr(self) -> Expr {
        self.0
    }

    /// Select a single band.
    pub fn select(&self, band: &str) -> Image {
        Image(Expr::invoke(
            "Image.select",
            [
                ("input", self.0.clone()),
                ("bands", Expr::constant(json!([band]))),
            ],
        ))
    }

    /// Normalized difference of two bands: `(a - b) / (a + b)`.
    pub fn normalized_difference(&self, band_a: &str, band_b: &str) -> Image {
        Image(Expr::invoke(
            "Image.normalizedDifference",
            [
                ("input", self.0.clone()),
                ("bandNames", Expr::constant(json!([band_a, band_b]))),
            ],
        ))
    }

    /// Evaluate a band-math formula with named image bindings.
    pub fn expression<'a, I>(formula: &str, bindings: I) -> Image
    where
        I: IntoIterator<Item = (&'a str, &'a Image)>,
    {
        let map = Expr::Invocation {
            function: "Dictionary".into(),
            args: bindings
                .into_iter()
                .map(|(name, image)| (name.to_string(), image.0.clone()))
                .collect(),
        };
        Image(Expr::invoke(
            "Image.expression",
            [("expression", Expr::constant(formula)), ("map", map)],
        ))
    }

    pub fn subtract(&self, other: &Image) -> Image {
        self.binary("Image.subtract", other.0.clone())
    }

    pub fn divide_by(&self, divisor: f64) -> Image {
        self.binary("Image.divide", Expr::constant(json!(divisor)))
    }

    pub fn gt(&self, threshold: f64) -> Image {
        self.binary("Image.gt", Expr::constant(json!(threshold)))
    }

    pub fn eq(&self, value: i64) -> Image {
        self.binary("Image.eq", Expr::constant(json!(value)))
    }

    pub fn and(&self, other: &Image) -> Image {
        self.binary("Image.and", other.0.clone())
    }

    pub fn or(&self, other: &Image) -> Image {
        self.binary("Image.or", other.0.clone())
    }

    pub fn bitwise_and(&self, mask: i64) -> Image {
        self.binary("Image.bitwiseAnd", Expr::constant(json!(mask)))
    }

    /// Mask this image: pixels where `mask` is zero or masked become no-data.
    pub fn update_mask(&self, mask: &Image) -> Image {
        Image(Expr::invoke(
            "Image.updateMask",
            [("image", self.0.clone()), ("mask", mask.0.clone())],
        ))
    }

    /// Mask this image by its own values: zero-valued pixels become
    /// no-data, leaving a sparse presence raster.
    pub fn self_mask(&self) -> Image {
        Image(Expr::invoke("Image.selfMask", [("image", self.0.clone())]))
    }

    /// Append the bands of `other` to this image.
    pub fn add_bands(&self, other: &Image) -> Image {
        Image(Expr::invoke(
            "Image.addBands",
            [("dstImg", self.0.clone()), ("srcImg", other.0.clone())],
        ))
    }

    /// Rename the (single) band of this image.
    pub fn rename(&self, name: &str) -> Image {
        Image(Expr::invoke(
            "Image.rename",
            [("input", self.0.clone()), ("names", Expr::constant(json!([name])))],
        ))
    }

    /// Sample pixels within `region`, returning per-sample geometry and
    /// band values, with masked pixels dropped. Terminal once submitted
    /// to a compute backend.
    pub fn sample(&self, region: &Geometry, params: SampleParams) -> Expr {
        Expr::invoke(
            "Image.sample",
            [
                ("image", self.0.clone()),
                ("region", region.expr().clone()),
                ("scale", Expr::constant(json!(params.scale))),
                ("numPixels", Expr::constant(json!(params.num_pixels))),
                ("geometries", Expr::constant(Value::Bool(true))),
                ("dropNulls", Expr::constant(Value::Bool(true))),
                ("tileScale", Expr::constant(json!(params.tile_scale))),
            ],
        )
    }

    fn binary(&self, function: &'static str, operand: Expr) -> Image {
        Image(Expr::invoke(
            function,
            [("image1", self.0.clone()), ("image2", operand)],
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn select_wraps_input() {
        let image = Image::placeholder("image").select("QA60");

        assert_eq!(image.expr().function(), Some("Image.select"));
        assert_eq!(
            image.expr().arg("bands").unwrap().as_constant(),
            Some(&json!(["QA60"]))
        );
    }

    #[test]
    fn binary_ops_take_scalar_operands() {
        let image = Image::placeholder("image").gt(0.1);

        assert_eq!(image.expr().function(), Some("Image.gt"));
        assert_eq!(
            image.expr().arg("image2").unwrap().as_constant(),
            Some(&json!(0.1))
        );
    }

    #[test]
    fn expression_binds_named_images() {
        let post = Image::placeholder("post");
        let red = post.select("B4");
        let nir = post.select("B8");
        let bai = Image::expression(
            "1.0 / ((0.1 - RED)**2 + (0.06 - NIR)**2)",
            [("RED", &red), ("NIR", &nir)],
        );

        assert_eq!(bai.expr().function(), Some("Image.expression"));
        let map = bai.expr().arg("map").unwrap();
        assert_eq!(map.arg("RED").unwrap().function(), Some("Image.select"));
        assert_eq!(map.arg("NIR").unwrap().function(), Some("Image.select"));
    }

    #[test]
    fn sample_carries_all_parameters() {
        let region = Geometry::from_geojson(json!({"type": "Point", "coordinates": [0, 0]}));
        let expr = Image::placeholder("image").sample(
            &region,
            SampleParams {
                scale: 20.0,
                num_pixels: 20_000,
                tile_scale: 4.0,
            },
        );

        assert_eq!(expr.function(), Some("Image.sample"));
        assert_eq!(expr.arg("scale").unwrap().as_constant(), Some(&json!(20.0)));
        assert_eq!(expr.arg("numPixels").unwrap().as_constant(), Some(&json!(20_000)));
        assert_eq!(expr.arg("dropNulls").unwrap().as_constant(), Some(&json!(true)));
    }
}
