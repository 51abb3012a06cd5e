//! Cuboid geometry construction and UV mapping.
//!
//! Turns a model element into oriented, UV-mapped quads in unit block space.
//! Every helper here is a pure function over its inputs so each step (corner
//! layout, face winding, default UV derivation, rotation, `#symbol`
//! indirection) is unit-testable on its own.
//!
//! Corner indices encode the cuboid's `from`/`to` choice per axis as bits:
//! bit 0 is x, bit 1 is y, bit 2 is z; a set bit selects the `to` coordinate.
//! [`FACE_CORNERS`] lists each face's four corners in a cyclic order whose
//! outward normal is `cross(c3 - c0, c1 - c0)` before any rotation.

use crate::data_structures::instance::ModelInstance;
use crate::data_structures::model::{Axis, Direction, Element, ElementRotation, Face};
use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix4, Transform as _, Vector2, Vector3};
use std::collections::HashSet;

/// Sentinel texture id produced for unresolved or cyclic `#symbol` chains.
pub const MISSING_TEXTURE: &str = "missing";

/// Corner indices of each face, wound so the face normal points outward.
///
/// Quads split into triangles `(0, 2, 1)` and `(0, 3, 2)`.
pub const FACE_CORNERS: [(Direction, [usize; 4]); 6] = [
    (Direction::Down, [4, 5, 1, 0]),
    (Direction::Up, [2, 3, 7, 6]),
    (Direction::North, [3, 2, 0, 1]),
    (Direction::South, [6, 7, 5, 4]),
    (Direction::West, [2, 6, 4, 0]),
    (Direction::East, [7, 3, 1, 5]),
];

/// One textured, wound face quad in unit block space.
#[derive(Debug, Clone)]
pub struct FaceGeometry {
    pub direction: Direction,
    pub corners: [Vector3<f32>; 4],
    pub uvs: [Vector2<f32>; 4],
    /// Outward normal after element rotation, unit length.
    pub normal: Vector3<f32>,
    /// Fully resolved texture id.
    pub texture: String,
    /// Candidate for thin-pair backface culling (see [`crate::pipelines::cull`]).
    pub cullable: bool,
}

fn corner_indices(direction: Direction) -> [usize; 4] {
    FACE_CORNERS
        .iter()
        .find(|(dir, _)| *dir == direction)
        .map(|(_, indices)| *indices)
        .expect("all six directions are tabled")
}

/// The two corner-index bits spanning a face's UV plane: U first, V second.
///
/// U grows toward +X on north/south/up/down faces and toward +Z on east/west
/// faces; V grows toward +Y on side faces and toward +Z on up/down faces.
/// This per-direction assignment is what makes an un-rotated texture read
/// correctly in that face's canonical viewing orientation.
fn uv_axis_bits(direction: Direction) -> (usize, usize) {
    match direction {
        Direction::North | Direction::South => (0b001, 0b010),
        Direction::East | Direction::West => (0b100, 0b010),
        Direction::Up | Direction::Down => (0b001, 0b100),
    }
}

/// The element's 8 corner vertices in unit block space (block coords / 16).
pub fn element_corners(element: &Element) -> [Vector3<f32>; 8] {
    let from = Vector3::from(element.from) / 16.0;
    let to = Vector3::from(element.to) / 16.0;
    std::array::from_fn(|i| {
        Vector3::new(
            if i & 0b001 != 0 { to.x } else { from.x },
            if i & 0b010 != 0 { to.y } else { from.y },
            if i & 0b100 != 0 { to.z } else { from.z },
        )
    })
}

/// Default UV rectangle for a face: the element's extents projected on the
/// face's UV plane, in 16-unit texture space.
pub fn default_uv_rect(element: &Element, direction: Direction) -> [f32; 4] {
    let (u_bit, v_bit) = uv_axis_bits(direction);
    let axis = |bit: usize| match bit {
        0b001 => 0,
        0b010 => 1,
        _ => 2,
    };
    let (u, v) = (axis(u_bit), axis(v_bit));
    [element.from[u], element.from[v], element.to[u], element.to[v]]
}

/// The UV rectangle a face actually uses: explicit or derived.
pub fn effective_uv_rect(face: &Face, element: &Element, direction: Direction) -> [f32; 4] {
    face.uv.unwrap_or_else(|| default_uv_rect(element, direction))
}

/// Per-corner UVs for a face, rotated and normalized into [0, 1].
///
/// The base assignment gives the corner on the `to` side of the U axis the
/// rectangle's higher U (and likewise for V); the 0/90/180/270° face rotation
/// then cycles the assignment around the rectangle's centre.
pub fn face_uvs(face: &Face, element: &Element, direction: Direction) -> [Vector2<f32>; 4] {
    let rect = effective_uv_rect(face, element, direction);
    let (u_bit, v_bit) = uv_axis_bits(direction);
    let base: [Vector2<f32>; 4] = corner_indices(direction).map(|idx| {
        let u = if idx & u_bit != 0 { rect[2] } else { rect[0] };
        let v = if idx & v_bit != 0 { rect[3] } else { rect[1] };
        Vector2::new(u / 16.0, v / 16.0)
    });
    let steps = (((face.rotation / 90) % 4 + 4) % 4) as usize;
    std::array::from_fn(|i| base[(i + steps) % 4])
}

/// Transitively resolve a `#symbol` texture reference through the instance's
/// texture table. Misses and cycles yield [`MISSING_TEXTURE`]; this never fails.
pub fn resolve_texture(instance: &ModelInstance, reference: &str) -> String {
    let mut current = reference;
    let mut visited: HashSet<&str> = HashSet::new();
    while let Some(key) = current.strip_prefix('#') {
        if !visited.insert(key) {
            log::warn!("cyclic texture reference '#{key}' in model '{}'", instance.name);
            return MISSING_TEXTURE.to_string();
        }
        match instance.textures.get(key) {
            Some(next) => current = next,
            None => return MISSING_TEXTURE.to_string(),
        }
    }
    current.to_string()
}

/// Element-local rotation about `origin`, with optional rescale of the two
/// perpendicular axes by `1/cos(angle)`.
pub fn element_rotation_matrix(rotation: &ElementRotation) -> Matrix4<f32> {
    let origin = Vector3::from(rotation.origin) / 16.0;
    let angle = Deg(rotation.angle);
    let rotate = match rotation.axis {
        Axis::X => Matrix4::from_angle_x(angle),
        Axis::Y => Matrix4::from_angle_y(angle),
        Axis::Z => Matrix4::from_angle_z(angle),
    };
    let rescale = if rotation.rescale {
        let s = 1.0 / rotation.angle.to_radians().cos().abs().max(1e-6);
        match rotation.axis {
            Axis::X => Matrix4::from_nonuniform_scale(1.0, s, s),
            Axis::Y => Matrix4::from_nonuniform_scale(s, 1.0, s),
            Axis::Z => Matrix4::from_nonuniform_scale(s, s, 1.0),
        }
    } else {
        Matrix4::from_scale(1.0)
    };
    Matrix4::from_translation(origin) * rotate * rescale * Matrix4::from_translation(-origin)
}

/// Build all face quads of one element.
///
/// Faces listed in `cullable` are marked as thin-pair culling candidates.
/// Iteration follows [`Direction::ALL`] so output order is stable regardless
/// of map layout.
pub fn build_element(
    element: &Element,
    instance: &ModelInstance,
    cullable: &HashSet<Direction>,
) -> Vec<FaceGeometry> {
    let corners = element_corners(element);
    let rotation = element.rotation.as_ref().map(element_rotation_matrix);

    let mut faces = Vec::with_capacity(element.faces.len());
    for direction in Direction::ALL {
        let Some(face) = element.faces.get(&direction) else {
            continue;
        };
        let mut quad = corner_indices(direction).map(|idx| corners[idx]);
        let mut normal = direction.normal();
        if let Some(matrix) = &rotation {
            quad = quad.map(|corner| matrix.transform_point(cgmath::Point3::from_vec(corner)).to_vec());
            // Rotate the normal without the rescale shear; rescale is uniform
            // across the perpendicular plane so the direction is preserved.
            normal = matrix.transform_vector(normal).normalize();
        }
        faces.push(FaceGeometry {
            direction,
            corners: quad,
            uvs: face_uvs(face, element, direction),
            normal,
            texture: resolve_texture(instance, &face.texture),
            cullable: cullable.contains(&direction),
        });
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn assert_vec_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual - expected).magnitude() < 1e-5,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn element(json: &str) -> Element {
        serde_json::from_str(json).unwrap()
    }

    fn instance_with_textures(entries: &[(&str, &str)]) -> ModelInstance {
        ModelInstance {
            name: "test".into(),
            parent_chain: Vec::new(),
            textures: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            display: HashMap::new(),
            elements: Vec::new(),
        }
    }

    fn full_cube() -> Element {
        element(
            r##"{ "from": [0, 0, 0], "to": [16, 16, 16], "faces": {
                "north": { "texture": "#t" }, "south": { "texture": "#t" },
                "east": { "texture": "#t" }, "west": { "texture": "#t" },
                "up": { "texture": "#t" }, "down": { "texture": "#t" } } }"##,
        )
    }

    #[test]
    fn corners_divide_by_sixteen() {
        let corners = element_corners(&element(r##"{ "from": [0, 0, 0], "to": [16, 8, 4] }"##));
        assert_eq!(corners[0], Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(corners[0b111], Vector3::new(1.0, 0.5, 0.25));
        assert_eq!(corners[0b010], Vector3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn face_windings_point_outward() {
        let corners = element_corners(&full_cube());
        for (direction, indices) in FACE_CORNERS {
            let quad = indices.map(|idx| corners[idx]);
            let normal = (quad[3] - quad[0]).cross(quad[1] - quad[0]).normalize();
            assert_vec_eq(normal, direction.normal());
        }
    }

    #[test]
    fn uv_monotonicity_holds_for_all_rotations() {
        // For every direction and rotation, undoing the rotation must restore
        // the base rule: the corner on the `to` side of the U axis carries the
        // strictly higher U, and likewise for V.
        let cube = full_cube();
        for (direction, indices) in FACE_CORNERS {
            let (u_bit, v_bit) = match direction {
                Direction::North | Direction::South => (1, 2),
                Direction::East | Direction::West => (4, 2),
                Direction::Up | Direction::Down => (1, 4),
            };
            for rotation in [0, 90, 180, 270] {
                let face = Face {
                    texture: "t".into(),
                    uv: None,
                    rotation,
                    tint_index: None,
                    cullface: None,
                };
                let uvs = face_uvs(&face, &cube, direction);
                let steps = (rotation / 90) as usize;
                for (i, idx) in indices.iter().enumerate() {
                    // Compensate: base assignment i landed at slot (i - steps).
                    let uv = uvs[(i + 4 - steps) % 4];
                    if idx & u_bit != 0 {
                        assert!(uv.x > 0.5, "{direction:?} rot {rotation}: east-side U too low");
                    } else {
                        assert!(uv.x < 0.5);
                    }
                    if idx & v_bit != 0 {
                        assert!(uv.y > 0.5, "{direction:?} rot {rotation}: top-side V too low");
                    } else {
                        assert!(uv.y < 0.5);
                    }
                }
            }
        }
    }

    #[test]
    fn default_uv_rect_projects_extents() {
        let slab = element(r##"{ "from": [2, 0, 3], "to": [14, 8, 13] }"##);
        assert_eq!(default_uv_rect(&slab, Direction::North), [2.0, 0.0, 14.0, 8.0]);
        assert_eq!(default_uv_rect(&slab, Direction::East), [3.0, 0.0, 13.0, 8.0]);
        assert_eq!(default_uv_rect(&slab, Direction::Up), [2.0, 3.0, 14.0, 13.0]);
    }

    #[test]
    fn texture_chain_resolves_transitively() {
        let instance = instance_with_textures(&[
            ("all", "#base"),
            ("base", "block/stone"),
        ]);
        assert_eq!(resolve_texture(&instance, "#all"), "block/stone");
        assert_eq!(resolve_texture(&instance, "block/dirt"), "block/dirt");
    }

    #[test]
    fn texture_cycle_and_miss_yield_sentinel() {
        let instance = instance_with_textures(&[("a", "#b"), ("b", "#a")]);
        assert_eq!(resolve_texture(&instance, "#a"), MISSING_TEXTURE);
        assert_eq!(resolve_texture(&instance, "#nope"), MISSING_TEXTURE);
    }

    #[test]
    fn rescale_preserves_footprint() {
        // With rescale, a 45 degree Y rotation stretches the diagonal corner
        // back out: relative (0.5, _, 0.5) scales to sqrt(2)/2 per axis and
        // rotates onto (1.0, _, 0.0).
        let rotation = ElementRotation {
            angle: 45.0,
            origin: [8.0, 8.0, 8.0],
            axis: Axis::Y,
            rescale: true,
        };
        let matrix = element_rotation_matrix(&rotation);
        let corner = matrix.transform_point(cgmath::Point3::new(1.0, 1.0, 1.0));
        assert_vec_eq(corner.to_vec(), Vector3::new(1.5, 1.0, 0.5));
    }

    #[test]
    fn rotation_without_rescale_shrinks_extent() {
        let rotation = ElementRotation {
            angle: 45.0,
            origin: [8.0, 8.0, 8.0],
            axis: Axis::Y,
            rescale: false,
        };
        let matrix = element_rotation_matrix(&rotation);
        let corner = matrix.transform_point(cgmath::Point3::new(1.0, 0.0, 1.0));
        // Corner swings onto the rotation circle of radius sqrt(2)/2.
        let expected = 0.5 + core::f32::consts::SQRT_2 / 2.0;
        assert!((corner.x - expected).abs() < 1e-5);
        assert!((corner.z - 0.5).abs() < 1e-5);
    }

    #[test]
    fn build_element_emits_declared_faces_in_stable_order() {
        let instance = instance_with_textures(&[("t", "block/stone")]);
        let faces = build_element(&full_cube(), &instance, &HashSet::new());
        assert_eq!(faces.len(), 6);
        let order: Vec<Direction> = faces.iter().map(|f| f.direction).collect();
        assert_eq!(order, Direction::ALL.to_vec());
        assert!(faces.iter().all(|f| f.texture == "block/stone"));
        assert!(faces.iter().all(|f| !f.cullable));
    }

    #[test]
    fn rotated_element_rotates_normals() {
        let mut cube = full_cube();
        cube.rotation = Some(ElementRotation {
            angle: 90.0,
            origin: [8.0, 8.0, 8.0],
            axis: Axis::Y,
            rescale: false,
        });
        let instance = instance_with_textures(&[("t", "block/stone")]);
        let faces = build_element(&cube, &instance, &HashSet::new());
        let north = faces.iter().find(|f| f.direction == Direction::North).unwrap();
        // +90 degrees about Y carries -Z onto -X.
        assert_vec_eq(north.normal, Vector3::new(-1.0, 0.0, 0.0));
    }
}
