//! Typed errors for model resolution.
//!
//! Only two failure modes are fatal to a render call: an unknown model name
//! and a cycle in the `parent` chain. Missing textures are handled with a
//! placeholder instead (see [`crate::resources::texture`]), and degenerate
//! geometry is skipped per-triangle inside the rasterizer.

use std::fmt;

/// Failure while resolving a named model into a concrete instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The normalized model name is absent from the definition table.
    NotFound(String),
    /// Resolving the `parent` chain re-entered a name already on the
    /// resolution stack.
    CircularInheritance(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotFound(name) => write!(f, "model '{name}' not found"),
            ResolveError::CircularInheritance(name) => {
                write!(f, "circular inheritance while resolving model '{name}'")
            }
        }
    }
}

impl std::error::Error for ResolveError {}
