//! Raw block model schema.
//!
//! These types mirror the declarative JSON format: a model optionally names a
//! `parent`, maps texture symbols to literals or `#references`, carries named
//! display transforms for UI framing, and lists cuboid elements with
//! per-direction faces. Definitions are immutable once loaded; inheritance is
//! flattened later by [`crate::resolver::Resolver`].

use cgmath::Vector3;
use serde::Deserialize;
use std::collections::HashMap;

/// One of the six cuboid face directions.
///
/// North is -Z, south +Z, west -X, east +X, up +Y and down -Y, matching the
/// block-space conventions of the model format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Outward unit normal of an axis-aligned face in this direction.
    pub fn normal(self) -> Vector3<f32> {
        match self {
            Direction::Down => Vector3::new(0.0, -1.0, 0.0),
            Direction::Up => Vector3::new(0.0, 1.0, 0.0),
            Direction::North => Vector3::new(0.0, 0.0, -1.0),
            Direction::South => Vector3::new(0.0, 0.0, 1.0),
            Direction::West => Vector3::new(-1.0, 0.0, 0.0),
            Direction::East => Vector3::new(1.0, 0.0, 0.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }
}

/// Rotation axis for element-local rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A raw, unresolved model definition as loaded from its source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelDefinition {
    /// Name of the parent model whose textures/display/elements are inherited.
    pub parent: Option<String>,
    /// Texture symbol table: key to literal texture id or `#key` reference.
    #[serde(default)]
    pub textures: HashMap<String, String>,
    /// Named display transforms, e.g. `"gui"`.
    #[serde(default)]
    pub display: HashMap<String, TransformDefinition>,
    /// Cuboid elements; an empty list inherits the parent's elements.
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Rotation/translation/scale triplets for a named display context.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransformDefinition {
    /// Euler rotation in degrees, stored [x, y, z] and applied in Y, X, Z order.
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Translation in sixteenths of a block.
    #[serde(default)]
    pub translation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for TransformDefinition {
    fn default() -> Self {
        Self {
            rotation: [0.0, 0.0, 0.0],
            translation: [0.0, 0.0, 0.0],
            scale: default_scale(),
        }
    }
}

/// An axis-aligned cuboid sub-volume of a model.
///
/// Corners live in 16-unit block space; equal `from`/`to` components describe
/// a zero-thickness slab. A cuboid may carry an optional rotation about one
/// axis and up to six textured faces.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    pub from: [f32; 3],
    pub to: [f32; 3],
    #[serde(default)]
    pub rotation: Option<ElementRotation>,
    #[serde(default = "default_shade")]
    pub shade: bool,
    #[serde(default)]
    pub faces: HashMap<Direction, Face>,
}

fn default_shade() -> bool {
    true
}

impl Element {
    /// Extent of the element along the given rotation axis, in block units.
    pub fn thickness(&self, axis: Axis) -> f32 {
        let i = match axis {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        };
        (self.to[i] - self.from[i]).abs()
    }
}

/// Element-local rotation about a single axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementRotation {
    pub angle: f32,
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    pub axis: Axis,
    /// When set, the two perpendicular axes are scaled by `1/cos(angle)` so
    /// the rotated shape keeps its footprint within the parent volume.
    #[serde(default)]
    pub rescale: bool,
}

fn default_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

/// A single textured cuboid side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Face {
    /// Literal texture id, or `#symbol` reference into the texture table.
    pub texture: String,
    /// Explicit UV rectangle `[u0, v0, u1, v1]` in 16-unit texture space.
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
    /// Texture rotation in degrees, one of 0/90/180/270.
    #[serde(default)]
    pub rotation: i32,
    /// Tint slot consumed by upstream colour providers; unused by the raster core.
    #[serde(default, rename = "tintindex")]
    pub tint_index: Option<i32>,
    /// Occlusion hint consumed by world meshing; unused by the raster core.
    #[serde(default)]
    pub cullface: Option<Direction>,
}
