//! Request handlers.
//!
//! Each submodule provides async handler functions for one concern.
//! Handlers delegate domain logic to `agriburn_core` / `agriburn_pipeline`
//! and map errors via [`crate::error::AppError`].

pub mod detection;
pub mod regions;
