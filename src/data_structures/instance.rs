//! Resolved model instances.
//!
//! A [`ModelInstance`] is the result of flattening a definition's `parent`
//! chain: one merged texture table, one merged display map and the final
//! element list. Instances are built once per distinct normalized name,
//! cached for the process lifetime and never mutated by render calls.

use crate::data_structures::model::{Element, TransformDefinition};
use std::collections::HashMap;

/// A concrete model with its inheritance chain merged away.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    /// Normalized name this instance resolves.
    pub name: String,
    /// Ordered ancestor names, nearest parent first.
    pub parent_chain: Vec<String>,
    /// Merged texture symbol table.
    pub textures: HashMap<String, String>,
    /// Merged named display transforms.
    pub display: HashMap<String, TransformDefinition>,
    /// Final element list.
    pub elements: Vec<Element>,
}

impl ModelInstance {
    /// Display transform for a named context, if the model defines one.
    pub fn display_transform(&self, context: &str) -> Option<&TransformDefinition> {
        self.display.get(context)
    }
}
