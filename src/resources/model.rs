//! Loading model definitions from external sources.
//!
//! Definitions arrive either from a directory of `*.json` model files or from
//! an in-memory map (the test path). Parsing happens once at renderer
//! construction; resolution and rendering never touch the filesystem.

use crate::data_structures::model::ModelDefinition;
use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parse a single model definition from JSON text.
pub fn parse_model(json: &str) -> anyhow::Result<ModelDefinition> {
    serde_json::from_str(json).context("invalid model JSON")
}

/// Load every `*.json` model file in a directory into a definition table.
///
/// File stems become model names (`oak_planks.json` loads as `oak_planks`).
/// Files that fail to parse are skipped with a warning so one bad model
/// cannot take down a whole pack.
pub fn load_model_dir(dir: impl AsRef<Path>) -> anyhow::Result<HashMap<String, ModelDefinition>> {
    let dir = dir.as_ref();
    let mut definitions = HashMap::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading model dir {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading model file {}", path.display()))?;
        match parse_model(&text) {
            Ok(definition) => {
                definitions.insert(name.to_string(), definition);
            }
            Err(err) => {
                log::warn!("skipping model file {}: {err:#}", path.display());
            }
        }
    }
    log::debug!("loaded {} model definitions from {}", definitions.len(), dir.display());
    Ok(definitions)
}
