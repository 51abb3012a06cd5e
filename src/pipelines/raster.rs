//! Software triangle rasterization with a float depth buffer.
//!
//! Triangles arrive in screen space with their camera depth retained. They
//! are sorted back-to-front as a stabilizing base order and drawn strictly
//! one after another; correctness comes from the per-pixel depth test, with
//! a small draw-order-proportional bias resolving z-fighting between
//! coplanar triangles. Texturing is nearest-neighbour with binary alpha
//! cutout, never blending.
//!
//! Rows of one triangle's bounding box are dispatched to the rayon pool;
//! rows never overlap within a triangle, so intra-triangle parallelism is
//! safe while the shared depth buffer keeps triangles themselves sequential.

use crate::data_structures::texture::{TexRect, Texture};
use cgmath::{Vector2, Vector3};
use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

/// Sampled texels at or below this alpha are treated as fully transparent.
pub const ALPHA_CUTOFF: u8 = 10;
/// Negative barycentric tolerance avoiding seams along shared edges.
const INSIDE_EPS: f32 = 1e-4;
/// Slack on the depth comparison.
const DEPTH_EPS: f32 = 1e-6;
/// Per-triangle depth bias, proportional to draw order.
const DEPTH_BIAS_STEP: f32 = 1e-4;

/// One textured triangle ready for rasterization.
///
/// `positions` carry pixel-space x/y and camera depth in z; `rect` is the
/// pixel-space sub-rectangle of `texture` that UVs [0, 1] span.
pub struct Triangle {
    pub positions: [Vector3<f32>; 3],
    pub uvs: [Vector2<f32>; 3],
    pub texture: Arc<Texture>,
    pub rect: TexRect,
}

impl Triangle {
    fn mean_depth(&self) -> f32 {
        (self.positions[0].z + self.positions[1].z + self.positions[2].z) / 3.0
    }
}

/// Rasterize triangles onto a fresh square RGBA canvas.
pub fn rasterize(mut triangles: Vec<Triangle>, size: u32) -> RgbaImage {
    if size == 0 {
        return RgbaImage::new(0, 0);
    }

    // Back-to-front: larger z is farther away. The sort is stable, so
    // coplanar triangles keep build order and the bias stays meaningful.
    triangles.sort_by(|a, b| {
        b.mean_depth()
            .partial_cmp(&a.mean_depth())
            .unwrap_or(Ordering::Equal)
    });

    let mut color = vec![0u8; size as usize * size as usize * 4];
    let mut depth = vec![f32::INFINITY; size as usize * size as usize];
    for (order, triangle) in triangles.iter().enumerate() {
        draw_triangle(&mut color, &mut depth, size, triangle, order);
    }
    RgbaImage::from_raw(size, size, color).expect("canvas buffer matches dimensions")
}

fn draw_triangle(color: &mut [u8], depth: &mut [f32], size: u32, tri: &Triangle, order: usize) {
    let [a, b, c] = tri.positions;

    // Barycentric setup from the edge vectors; a vanishing denominator means
    // a zero-area triangle, which is skipped rather than aborting the render.
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < 1e-9 {
        log::debug!("skipping degenerate triangle at order {order}");
        return;
    }
    let inv_denom = 1.0 / denom;

    let limit = (size - 1) as f32;
    let min_xf = a.x.min(b.x).min(c.x).floor();
    let max_xf = a.x.max(b.x).max(c.x).ceil();
    let min_yf = a.y.min(b.y).min(c.y).floor();
    let max_yf = a.y.max(b.y).max(c.y).ceil();
    if max_xf < 0.0 || max_yf < 0.0 || min_xf > limit || min_yf > limit {
        return;
    }
    let min_x = min_xf.max(0.0) as usize;
    let max_x = max_xf.min(limit) as usize;
    let min_y = min_yf.max(0.0) as usize;
    let max_y = max_yf.min(limit) as usize;

    let bias = order as f32 * DEPTH_BIAS_STEP;
    let width = size as usize;
    let stride = width * 4;
    let [uv_a, uv_b, uv_c] = tri.uvs;

    color[min_y * stride..(max_y + 1) * stride]
        .par_chunks_mut(stride)
        .zip(depth[min_y * width..(max_y + 1) * width].par_chunks_mut(width))
        .enumerate()
        .for_each(|(row, (color_row, depth_row))| {
            let py = (min_y + row) as f32 + 0.5;
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let w0 = ((b.y - c.y) * (px - c.x) + (c.x - b.x) * (py - c.y)) * inv_denom;
                let w1 = ((c.y - a.y) * (px - c.x) + (a.x - c.x) * (py - c.y)) * inv_denom;
                let w2 = 1.0 - w0 - w1;
                if w0 < -INSIDE_EPS || w1 < -INSIDE_EPS || w2 < -INSIDE_EPS {
                    continue;
                }

                let z = w0 * a.z + w1 * b.z + w2 * c.z - bias;
                if z >= depth_row[x] - DEPTH_EPS {
                    continue;
                }

                let u = w0 * uv_a.x + w1 * uv_b.x + w2 * uv_c.x;
                let v = w0 * uv_a.y + w1 * uv_b.y + w2 * uv_c.y;
                let texel = sample(&tri.texture, tri.rect, u, v);
                if texel[3] <= ALPHA_CUTOFF {
                    continue;
                }

                depth_row[x] = z;
                color_row[x * 4..x * 4 + 4].copy_from_slice(&texel.0);
            }
        });
}

/// Nearest-neighbour sample inside a sub-rectangle, clamped to its bounds.
///
/// UV v grows upward in model space while image rows grow downward, so v is
/// flipped here.
fn sample(texture: &Texture, rect: TexRect, u: f32, v: f32) -> Rgba<u8> {
    if rect.width == 0 || rect.height == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let u = u.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let tx = rect.x + ((u * rect.width as f32) as u32).min(rect.width - 1);
    let ty = rect.y + (((1.0 - v) * rect.height as f32) as u32).min(rect.height - 1);
    *texture.image.get_pixel(tx, ty)
}
