//! Typed client for the Earth Engine remote computation service.
//!
//! The service evaluates *descriptions* of raster and vector operations,
//! not local data: [`Image`], [`ImageCollection`], [`FeatureCollection`]
//! and [`Geometry`] are thin builders that accumulate an [`expr::Expr`]
//! graph. Nothing touches the network until a terminal call on a
//! [`backend::ComputeBackend`] submits the graph for evaluation and
//! returns the computed value.
//!
//! [`client::EarthEngineClient`] is the production backend (REST over
//! HTTPS); tests substitute scripted backends through the same trait.

pub mod backend;
pub mod client;
pub mod collection;
pub mod error;
pub mod expr;
pub mod geometry;
pub mod image;

pub use backend::ComputeBackend;
pub use client::EarthEngineClient;
pub use collection::{FeatureCollection, ImageCollection};
pub use error::EarthEngineError;
pub use expr::Expr;
pub use geometry::Geometry;
pub use image::Image;
