//! Visibility culling for coincident thin double-sided faces.
//!
//! Paper-thin decorative elements (plants, rails, panes) carry two opposite
//! faces with the same texture occupying the same plane; without occlusion
//! testing both would rasterize over each other. [`cullable_directions`]
//! marks such pairs up front, and [`facing_away`] drops the back-side copy
//! after all transforms, leaving exactly one visible face per pair.

use crate::data_structures::model::{Axis, Direction, Element};
use crate::data_structures::instance::ModelInstance;
use crate::pipelines::geometry::{effective_uv_rect, resolve_texture};
use crate::pipelines::transform;
use cgmath::{InnerSpace, Vector3};
use std::collections::HashSet;

/// Thickness below which an element counts as a zero-thickness slab.
const THIN_EPS: f32 = 1e-4;
/// Dot-product threshold against camera forward beyond which a candidate
/// face is dropped. The sign convention is pinned by the thin-face fixtures
/// in `tests/culling_test.rs`.
const BACKFACE_DOT: f32 = 0.01;

/// The three opposite-face pairs and the axis each pair is thin along.
const OPPOSITE_PAIRS: [(Axis, Direction, Direction); 3] = [
    (Axis::Z, Direction::North, Direction::South),
    (Axis::X, Direction::West, Direction::East),
    (Axis::Y, Direction::Up, Direction::Down),
];

/// Directions of an element whose faces are redundant back-side duplicates.
///
/// A pair qualifies when the element has no thickness along the pair's axis
/// and both faces resolve to the same texture id with the same rotation and
/// the same effective UV rectangle; both directions are then candidates.
pub fn cullable_directions(element: &Element, instance: &ModelInstance) -> HashSet<Direction> {
    let mut cullable = HashSet::new();
    for (axis, a, b) in OPPOSITE_PAIRS {
        if element.thickness(axis) > THIN_EPS {
            continue;
        }
        let (Some(face_a), Some(face_b)) = (element.faces.get(&a), element.faces.get(&b)) else {
            continue;
        };
        if face_a.rotation != face_b.rotation {
            continue;
        }
        if resolve_texture(instance, &face_a.texture) != resolve_texture(instance, &face_b.texture)
        {
            continue;
        }
        if effective_uv_rect(face_a, element, a) != effective_uv_rect(face_b, element, b) {
            continue;
        }
        cullable.insert(a);
        cullable.insert(b);
    }
    cullable
}

/// Whether a transformed face normal points away from the viewer.
pub fn facing_away(normal: Vector3<f32>) -> bool {
    normal.dot(transform::CAMERA_FORWARD) > BACKFACE_DOT
}
