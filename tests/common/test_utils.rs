//! Shared fixtures for the integration tests: a reference cube with one
//! distinct solid colour per face, and pixel-level helpers for inspecting
//! rendered canvases.

use block_ngin::data_structures::model::ModelDefinition;
use block_ngin::resources::model::parse_model;
use block_ngin::resources::texture::TextureStore;
use block_ngin::{Renderer, RgbaImage};
use image::Rgba;
use std::collections::HashMap;
use std::sync::Arc;

pub const NORTH_COLOUR: Rgba<u8> = Rgba([220, 40, 40, 255]);
pub const SOUTH_COLOUR: Rgba<u8> = Rgba([40, 220, 40, 255]);
pub const WEST_COLOUR: Rgba<u8> = Rgba([40, 40, 220, 255]);
pub const EAST_COLOUR: Rgba<u8> = Rgba([220, 220, 40, 255]);
pub const UP_COLOUR: Rgba<u8> = Rgba([40, 220, 220, 255]);
pub const DOWN_COLOUR: Rgba<u8> = Rgba([220, 40, 220, 255]);

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn solid(colour: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(16, 16, colour)
}

/// A full 16^3 cube whose six faces each reference their own texture symbol.
pub fn cube_definitions() -> HashMap<String, ModelDefinition> {
    let cube = parse_model(
        r##"{
            "textures": {
                "north": "block/face_north",
                "south": "block/face_south",
                "west": "block/face_west",
                "east": "block/face_east",
                "up": "block/face_up",
                "down": "block/face_down"
            },
            "elements": [{
                "from": [0, 0, 0],
                "to": [16, 16, 16],
                "faces": {
                    "north": { "texture": "#north" },
                    "south": { "texture": "#south" },
                    "west": { "texture": "#west" },
                    "east": { "texture": "#east" },
                    "up": { "texture": "#up" },
                    "down": { "texture": "#down" }
                }
            }]
        }"##,
    )
    .expect("cube fixture must parse");
    HashMap::from([("cube".to_string(), cube)])
}

pub fn cube_textures() -> Arc<TextureStore> {
    let store = TextureStore::new();
    store.insert("block/face_north", solid(NORTH_COLOUR));
    store.insert("block/face_south", solid(SOUTH_COLOUR));
    store.insert("block/face_west", solid(WEST_COLOUR));
    store.insert("block/face_east", solid(EAST_COLOUR));
    store.insert("block/face_up", solid(UP_COLOUR));
    store.insert("block/face_down", solid(DOWN_COLOUR));
    Arc::new(store)
}

pub fn cube_renderer() -> Renderer {
    Renderer::new(cube_definitions(), cube_textures())
}

/// Squared distance between two colours after scaling each to unit
/// intensity, so comparisons are insensitive to uniform brightness.
pub fn colour_distance(a: Rgba<u8>, b: Rgba<u8>) -> f32 {
    let neutral = |c: Rgba<u8>| {
        let sum = (c[0] as f32 + c[1] as f32 + c[2] as f32).max(1.0);
        [c[0] as f32 / sum, c[1] as f32 / sum, c[2] as f32 / sum]
    };
    let (a, b) = (neutral(a), neutral(b));
    (0..3).map(|i| (a[i] - b[i]).powi(2)).sum()
}

/// Mean colour over the opaque pixels of a rectangular region, `None` when
/// the region is fully transparent.
pub fn mean_opaque_colour(
    image: &RgbaImage,
    x_range: std::ops::Range<u32>,
    y_range: std::ops::Range<u32>,
) -> Option<Rgba<u8>> {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for y in y_range {
        for x in x_range.clone() {
            let pixel = image.get_pixel(x, y);
            if pixel[3] > 0 {
                for i in 0..3 {
                    sums[i] += pixel[i] as u64;
                }
                count += 1;
            }
        }
    }
    if count == 0 {
        return None;
    }
    Some(Rgba([
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
        255,
    ]))
}

/// Inclusive pixel bounding box of all opaque pixels.
pub fn opaque_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }
    bounds
}
