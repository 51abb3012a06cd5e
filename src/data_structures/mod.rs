//! Core data structures: model schema, resolved instances, and textures.
//!
//! - `model` contains the raw declarative model schema as parsed from JSON
//! - `instance` holds a model with its inheritance chain merged away
//! - `texture` contains the CPU RGBA texture wrapper and sub-rect framing

pub mod instance;
pub mod model;
pub mod texture;
