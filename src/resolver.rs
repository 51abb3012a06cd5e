//! Model inheritance resolution.
//!
//! A [`Resolver`] owns the immutable definition table and flattens a named
//! model's `parent` chain into a [`ModelInstance`]: the parent is resolved
//! first, then the child's own textures and display entries overwrite the
//! inherited maps key by key, and the child's elements replace the inherited
//! list wholesale whenever the child defines any. Instances are memoized by
//! normalized name behind an `RwLock` so renders running in parallel can
//! share them; a lost race on first resolution recomputes the same value.

use crate::data_structures::instance::ModelInstance;
use crate::data_structures::model::ModelDefinition;
use crate::error::ResolveError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Resolves and memoizes model instances from a fixed definition table.
pub struct Resolver {
    definitions: HashMap<String, ModelDefinition>,
    cache: RwLock<HashMap<String, Arc<ModelInstance>>>,
}

/// Strip the namespace and path prefixes a model may be referenced by.
///
/// `minecraft:block/oak_planks`, `Block/oak_planks` and `oak_planks` all
/// normalize to `oak_planks`; the result doubles as the cache key.
pub fn normalize_name(name: &str) -> String {
    let mut name = name.trim().to_ascii_lowercase();
    if let Some(rest) = name.strip_prefix("minecraft:") {
        name = rest.to_string();
    }
    if let Some(rest) = name.strip_prefix("blocks/") {
        name = rest.to_string();
    } else if let Some(rest) = name.strip_prefix("block/") {
        name = rest.to_string();
    }
    name
}

impl Resolver {
    /// Build a resolver over a definition table; keys are normalized up front
    /// so lookups and `parent` references agree.
    pub fn new(definitions: HashMap<String, ModelDefinition>) -> Self {
        let definitions = definitions
            .into_iter()
            .map(|(name, def)| (normalize_name(&name), def))
            .collect();
        Self {
            definitions,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a model name into its flattened instance.
    pub fn resolve(&self, name: &str) -> Result<Arc<ModelInstance>, ResolveError> {
        let name = normalize_name(name);
        let mut stack = Vec::new();
        self.resolve_inner(&name, &mut stack)
    }

    /// Memoizing resolution step: every ancestor flattened on the way to
    /// `name` lands in the cache too, so deep inheritance chains shared by
    /// many models are only walked once.
    fn resolve_inner(
        &self,
        name: &str,
        stack: &mut Vec<String>,
    ) -> Result<Arc<ModelInstance>, ResolveError> {
        if let Some(cached) = self.cache.read().expect("resolver cache poisoned").get(name) {
            return Ok(Arc::clone(cached));
        }
        if stack.iter().any(|entry| entry == name) {
            return Err(ResolveError::CircularInheritance(name.to_string()));
        }
        let definition = self
            .definitions
            .get(name)
            .ok_or_else(|| ResolveError::NotFound(name.to_string()))?;

        stack.push(name.to_string());
        let resolved = match &definition.parent {
            Some(parent) => {
                let parent_name = normalize_name(parent);
                let parent = self.resolve_inner(&parent_name, stack)?;
                let mut parent_chain = vec![parent_name];
                parent_chain.extend(parent.parent_chain.iter().cloned());

                let mut textures = parent.textures.clone();
                textures.extend(definition.textures.clone());
                let mut display = parent.display.clone();
                display.extend(definition.display.clone());
                // Any child element list replaces inheritance wholesale; there
                // is no per-element merge.
                let elements = if definition.elements.is_empty() {
                    parent.elements.clone()
                } else {
                    definition.elements.clone()
                };

                ModelInstance {
                    name: name.to_string(),
                    parent_chain,
                    textures,
                    display,
                    elements,
                }
            }
            None => ModelInstance {
                name: name.to_string(),
                parent_chain: Vec::new(),
                textures: definition.textures.clone(),
                display: definition.display.clone(),
                elements: definition.elements.clone(),
            },
        };
        stack.pop();
        let resolved = Arc::new(resolved);
        self.cache
            .write()
            .expect("resolver cache poisoned")
            .insert(name.to_string(), Arc::clone(&resolved));
        Ok(resolved)
    }
}
