//! The burn-scar detection pipeline.
//!
//! Composes remote-sensing operations into one detection run: resolve the
//! region of interest, composite cloud-masked pre/post-fire imagery,
//! compute the three spectral change indices, intersect the threshold
//! masks with the agricultural land-cover mask, and sample the surviving
//! pixels into classified point detections. All raster math executes on
//! the remote compute service; this crate only describes it.

pub mod boundary;
pub mod cloud_mask;
pub mod detector;
pub mod indices;
pub mod landcover;
pub mod store;

pub use boundary::{BoundaryError, BoundaryResolver, ResolvedBoundary};
pub use detector::{BurnScarDetector, DetectionResult};
pub use landcover::LandcoverPolicy;
pub use store::{DetectionRun, ResultStore};
