//! block-ngin
//!
//! A GPU-free renderer that turns declarative cuboid block/item models into
//! flat 2D inventory-style images. Model inheritance is flattened into
//! concrete instances, elements become oriented UV-mapped triangles, a
//! composed view transform frames them, and a software rasterizer with a
//! float depth buffer produces the final RGBA canvas, auto-fitted and
//! centered with padding.
//!
//! High-level modules
//! - `data_structures`: model schema, resolved instances and CPU textures
//! - `error`: typed resolution errors
//! - `resolver`: parent-chain flattening with a memoized instance cache
//! - `resources`: model definition loading and the shared texture store
//! - `pipelines`: the geometry / transform / cull / fit / raster stages
//! - `render`: the `Renderer` entry point composing the pipeline
//!

pub mod data_structures;
pub mod error;
pub mod pipelines;
pub mod render;
pub mod resolver;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use error::ResolveError;
pub use image::RgbaImage;
pub use render::{RenderOptions, Renderer};
