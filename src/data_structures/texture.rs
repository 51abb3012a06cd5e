//! CPU-side textures and sub-rectangle framing.
//!
//! The raster core consumes decoded RGBA images only; file decoding and
//! texture-pack overlay resolution live upstream. [`Texture`] wraps an
//! [`image::RgbaImage`] together with helpers to pick the sub-rectangle the
//! rasterizer samples from, and to produce the reserved placeholder pattern
//! returned for unknown texture ids.

use image::{Rgba, RgbaImage};

/// Pixel-space sub-rectangle within a texture image.
///
/// Supports atlas framing and the first-frame extraction of vertical
/// animation strips; the rasterizer clamps all sampling to these bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TexRect {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// A decoded RGBA texture ready for sampling.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: RgbaImage,
}

impl Texture {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// The sub-rectangle a renderer should sample from.
    ///
    /// Vertical animation strips (height a whole multiple of width) yield
    /// their top square frame; everything else yields the full image.
    pub fn first_frame_rect(&self) -> TexRect {
        let (w, h) = self.image.dimensions();
        if w > 0 && h > w && h % w == 0 {
            TexRect::full(w, w)
        } else {
            TexRect::full(w, h)
        }
    }

    /// The reserved magenta/black checkerboard used for missing textures.
    pub fn placeholder() -> Self {
        let magenta = Rgba([255, 0, 255, 255]);
        let black = Rgba([0, 0, 0, 255]);
        let image = RgbaImage::from_fn(16, 16, |x, y| {
            // 2x2 checker cells over a 16x16 canvas
            if (x / 8 + y / 8) % 2 == 0 {
                magenta
            } else {
                black
            }
        });
        Self { image }
    }
}
