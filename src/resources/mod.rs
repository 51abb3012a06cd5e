/**
 * This module contains all logic for loading model definitions and textures
 * from external sources.
 */
pub mod model;
pub mod texture;
