//! Auto-fitting projected geometry onto the output canvas.
//!
//! Scale derives from the REFERENCE bounds: a unit cube pushed through the
//! same view matrix and projection as the model, so a full block and a thin
//! slab come out at comparable apparent size instead of each filling the
//! canvas. Centering derives from the CONTENT bounds, so asymmetric
//! geometry still lands visually centered.

use crate::pipelines::transform;
use cgmath::{Matrix4, Transform as _, Vector2, Vector3};

/// Axis-aligned 2D bounds of projected points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: Vector2<f32>,
    pub max: Vector2<f32>,
}

impl Bounds2 {
    /// Bounds of a non-empty point set; `None` when there are no points.
    pub fn of_points(points: impl IntoIterator<Item = Vector3<f32>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds2 {
            min: Vector2::new(first.x, first.y),
            max: Vector2::new(first.x, first.y),
        };
        for p in iter {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vector2<f32> {
        (self.min + self.max) / 2.0
    }
}

/// Projected bounds of the unit reference cube under a view matrix.
///
/// The reference excludes all per-element geometry: it anchors consistent
/// apparent scale across differently-shaped models.
pub fn reference_bounds(view: &Matrix4<f32>, perspective_amount: f32) -> Bounds2 {
    let corners = (0..8).map(|i| {
        let corner = Vector3::new(
            if i & 1 != 0 { 1.0 } else { 0.0 },
            if i & 2 != 0 { 1.0 } else { 0.0 },
            if i & 4 != 0 { 1.0 } else { 0.0 },
        );
        let viewed = view.transform_point(cgmath::Point3::new(corner.x, corner.y, corner.z));
        transform::project(Vector3::new(viewed.x, viewed.y, viewed.z), perspective_amount)
    });
    Bounds2::of_points(corners).expect("reference cube always has corners")
}

/// Scale and centering derived from reference and content bounds.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub scale: f32,
    content_center: Vector2<f32>,
    half_canvas: f32,
}

impl Placement {
    /// Derive the canvas placement for a render.
    ///
    /// `padding` is the fraction of the canvas left empty on each side,
    /// clamped to [0, 0.4].
    pub fn compute(size: u32, padding: f32, reference: &Bounds2, content: &Bounds2) -> Self {
        let padding = padding.clamp(0.0, 0.4);
        let extent = reference.width().max(reference.height()).max(1e-6);
        Placement {
            scale: size as f32 * (1.0 - 2.0 * padding) / extent,
            content_center: content.center(),
            half_canvas: size as f32 / 2.0,
        }
    }

    /// Map a projected point into pixel coordinates, flipping y so view-space
    /// up is image-space up. Depth passes through untouched.
    pub fn to_screen(&self, p: Vector3<f32>) -> Vector3<f32> {
        Vector3::new(
            self.half_canvas + (p.x - self.content_center.x) * self.scale,
            self.half_canvas - (p.y - self.content_center.y) * self.scale,
            p.z,
        )
    }
}
