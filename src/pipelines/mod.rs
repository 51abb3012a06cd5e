//! The geometry-to-raster pipeline stages.
//!
//! Each stage is an independent module of pure functions so the pipeline in
//! [`crate::render`] stays a linear composition: build geometry, compose the
//! view transform, cull redundant thin faces, fit onto the canvas, rasterize.

pub mod cull;
pub mod fit;
pub mod geometry;
pub mod raster;
pub mod transform;
