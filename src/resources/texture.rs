//! Texture lookup and the shared texture store.
//!
//! The raster core never fails on a missing texture: [`TextureSource::get_texture`]
//! always returns something drawable, falling back to the reserved
//! magenta/black placeholder. [`TextureStore`] is the default in-memory
//! implementation; its map is behind an `RwLock` because multiple renders may
//! sample it in parallel.

use crate::data_structures::texture::Texture;
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Anything that can hand out decoded RGBA textures by id.
///
/// Implementations must be infallible; animated-texture frame extraction,
/// tinting and pack-overlay precedence are resolved before images land here.
pub trait TextureSource: Send + Sync {
    fn get_texture(&self, id: &str) -> Arc<Texture>;
}

/// Concurrency-safe in-memory texture map with a placeholder fallback.
pub struct TextureStore {
    textures: RwLock<HashMap<String, Arc<Texture>>>,
    placeholder: Arc<Texture>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            textures: RwLock::new(HashMap::new()),
            placeholder: Arc::new(Texture::placeholder()),
        }
    }

    /// Register a decoded image under a texture id, replacing any previous entry.
    pub fn insert(&self, id: impl Into<String>, image: RgbaImage) {
        self.textures
            .write()
            .expect("texture store poisoned")
            .insert(id.into(), Arc::new(Texture::from_image(image)));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.textures
            .read()
            .expect("texture store poisoned")
            .contains_key(id)
    }
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureSource for TextureStore {
    fn get_texture(&self, id: &str) -> Arc<Texture> {
        if let Some(texture) = self
            .textures
            .read()
            .expect("texture store poisoned")
            .get(id)
        {
            return Arc::clone(texture);
        }
        log::warn!("texture '{id}' not registered, using placeholder");
        Arc::clone(&self.placeholder)
    }
}
