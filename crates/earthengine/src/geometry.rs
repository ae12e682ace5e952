//! Region geometries.

use serde_json::Value;

use crate::expr::Expr;

/// A server-side geometry, held locally as an expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry(Expr);

impl Geometry {
    /// Wrap a GeoJSON geometry object as a constant geometry expression.
    pub fn from_geojson(geojson: Value) -> Self {
        Self(Expr::invoke("Geometry", [("geoJson", Expr::constant(geojson))]))
    }

    pub fn from_expr(expr: Expr) -> Self {
        Self(expr)
    }

    pub fn expr(&self) -> &Expr {
        &self.0
    }

    pub fn into_expr(self) -> Expr {
        self.0
    }
}
