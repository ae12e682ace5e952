//! Image and feature collection expression builders.

use serde_json::json;

use crate::expr::Expr;
use crate::geometry::Geometry;
use crate::image::Image;

/// A server-side image collection, held locally as an expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCollection(Expr);

impl ImageCollection {
    /// Reference a catalog collection by its asset id.
    pub fn load(id: &str) -> Self {
        Self(Expr::invoke("ImageCollection.load", [("id", Expr::constant(id))]))
    }

    pub fn expr(&self) -> &Expr {
        &self.0
    }

    /// Keep images intersecting `geometry`.
    pub fn filter_bounds(&self, geometry: &Geometry) -> Self {
        Self(Expr::invoke(
            "Collection.filterBounds",
            [("collection", self.0.clone()), ("geometry", geometry.expr().clone())],
        ))
    }

    /// Keep images acquired within `[start, end)` (ISO dates).
    pub fn filter_date(&self, start: chrono::NaiveDate, end: chrono::NaiveDate) -> Self {
        Self(Expr::invoke(
            "Collection.filterDate",
            [
                ("collection", self.0.clone()),
                ("start", Expr::constant(start.to_string())),
                ("end", Expr::constant(end.to_string())),
            ],
        ))
    }

    /// Keep images whose metadata `property` is strictly below `value`.
    pub fn filter_lt(&self, property: &str, value: f64) -> Self {
        Self(Expr::invoke(
            "Collection.filterMetadata",
            [
                ("collection", self.0.clone()),
                ("property", Expr::constant(property)),
                ("operator", Expr::constant("less_than")),
                ("value", Expr::constant(json!(value))),
            ],
        ))
    }

    /// Keep images whose acquisition calendar year equals `year`.
    pub fn filter_calendar_year(&self, year: i32) -> Self {
        Self(Expr::invoke(
            "Collection.filterCalendarRange",
            [
                ("collection", self.0.clone()),
                ("start", Expr::constant(json!(year))),
                ("end", Expr::constant(json!(year))),
                ("field", Expr::constant("year")),
            ],
        ))
    }

    /// Apply a per-image transformation across the collection.
    ///
    /// The closure receives a placeholder image and builds the body of
    /// the mapped function; no remote work happens here.
    pub fn map(&self, transform: impl FnOnce(Image) -> Image) -> Self {
        let body = transform(Image::placeholder("image"));
        Self(Expr::invoke(
            "Collection.map",
            [
                ("collection", self.0.clone()),
                ("baseAlgorithm", Expr::mapping("image", body.into_expr())),
            ],
        ))
    }

    /// Per-pixel median composite across the collection.
    pub fn median(&self) -> Image {
        Image::from_expr(Expr::invoke(
            "ImageCollection.median",
            [("collection", self.0.clone())],
        ))
    }

    /// Number of images in the collection. Terminal once submitted.
    pub fn size(&self) -> Expr {
        Expr::invoke("Collection.size", [("collection", self.0.clone())])
    }

    /// First image of the collection.
    pub fn first(&self) -> Image {
        Image::from_expr(Expr::invoke("Collection.first", [("collection", self.0.clone())]))
    }
}

/// A server-side feature collection, held locally as an expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection(Expr);

impl FeatureCollection {
    /// Reference a catalog table by its asset id.
    pub fn load(id: &str) -> Self {
        Self(Expr::invoke("FeatureCollection.load", [("id", Expr::constant(id))]))
    }

    pub fn expr(&self) -> &Expr {
        &self.0
    }

    /// Keep features whose `property` equals `value` exactly.
    pub fn filter_eq(&self, property: &str, value: &str) -> Self {
        Self(Expr::invoke(
            "Collection.filterMetadata",
            [
                ("collection", self.0.clone()),
                ("property", Expr::constant(property)),
                ("operator", Expr::constant("equals")),
                ("value", Expr::constant(value)),
            ],
        ))
    }

    /// Number of features in the collection. Terminal once submitted.
    pub fn size(&self) -> Expr {
        Expr::invoke("Collection.size", [("collection", self.0.clone())])
    }

    /// The union geometry of all features. Terminal once submitted when
    /// the caller needs the GeoJSON; also usable as a further ROI input.
    pub fn geometry(&self) -> Expr {
        Expr::invoke("Collection.geometry", [("collection", self.0.clone())])
    }
}
