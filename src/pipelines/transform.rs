//! View transform composition and projection.
//!
//! One 4x4 matrix carries every vertex from unit block space into view space:
//! the named display transform, the caller's yaw/pitch/roll, an additional
//! uniform scale and translation, all pre-multiplied by a fixed 90 degree
//! orientation correction about Y so model north/south lands on the
//! renderer's forward axis.
//!
//! View-space conventions, pinned by the fixtures in `tests/`: the camera
//! looks along +X ([`CAMERA_FORWARD`]), larger view-space x is farther away,
//! screen right is -Z and screen up is +Y. With the correction in place a
//! model's north face looks at the camera at yaw 0 and its south face at
//! yaw 180.
//!
//! All Euler rotations in the crate go through [`rotation_y_x_z`] so display
//! transforms, caller rotation and any future render path agree on order and
//! sign conventions.

use crate::data_structures::instance::ModelInstance;
use crate::data_structures::model::TransformDefinition;
use cgmath::{Deg, Matrix4, Vector3};

/// The fixed camera-forward axis in view space.
pub const CAMERA_FORWARD: Vector3<f32> = Vector3::new(1.0, 0.0, 0.0);

/// Perspective blend below this amount renders purely orthographic.
pub const PERSPECTIVE_MIN: f32 = 0.01;

/// Pinhole camera distance back along the forward axis.
const CAMERA_DISTANCE: f32 = 2.5;
/// Pinhole focal length for the perspective blend.
const FOCAL_LENGTH: f32 = 2.2;

/// Caller-facing framing options consumed by the composer.
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs {
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    pub roll_deg: f32,
    pub gui_transform: bool,
    pub additional_scale: f32,
    /// Extra translation in sixteenths of a block.
    pub additional_translation: Vector3<f32>,
}

/// The one combined Euler rotation helper: Y, then X, then Z, in degrees.
pub fn rotation_y_x_z(y_deg: f32, x_deg: f32, z_deg: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Deg(y_deg))
        * Matrix4::from_angle_x(Deg(x_deg))
        * Matrix4::from_angle_z(Deg(z_deg))
}

/// The built-in GUI framing used when a model defines no `gui` entry.
pub fn default_gui_transform() -> TransformDefinition {
    TransformDefinition {
        rotation: [30.0, 45.0, 0.0],
        translation: [0.0, 0.0, 0.0],
        scale: [0.625, 0.625, 0.625],
    }
}

/// Matrix form of a display transform: translate, rotate (Y, X, Z), scale.
pub fn display_matrix(transform: &TransformDefinition) -> Matrix4<f32> {
    let [rx, ry, rz] = transform.rotation;
    let translation = Vector3::from(transform.translation) / 16.0;
    Matrix4::from_translation(translation)
        * rotation_y_x_z(ry, rx, rz)
        * Matrix4::from_nonuniform_scale(
            transform.scale[0],
            transform.scale[1],
            transform.scale[2],
        )
}

/// Compose the full view matrix for a model under the given inputs.
pub fn view_matrix(instance: &ModelInstance, inputs: &ViewInputs) -> Matrix4<f32> {
    let display = if inputs.gui_transform {
        instance
            .display_transform("gui")
            .cloned()
            .unwrap_or_else(default_gui_transform)
    } else {
        TransformDefinition::default()
    };
    // Yaw sign is negated on input so positive caller yaw turns the model the
    // same way in both framing modes.
    let caller = rotation_y_x_z(-inputs.yaw_deg, inputs.pitch_deg, inputs.roll_deg);
    let orientation_correction = Matrix4::from_angle_y(Deg(90.0));
    orientation_correction
        * display_matrix(&display)
        * caller
        * Matrix4::from_scale(inputs.additional_scale)
        * Matrix4::from_translation(inputs.additional_translation / 16.0)
}

/// Project a view-space point onto the image plane.
///
/// Returns (screen x, screen y, depth): screen right is -Z, screen up is +Y
/// and depth is the view-space distance along [`CAMERA_FORWARD`]. `amount`
/// linearly blends the orthographic projection into a fixed-focal pinhole
/// projection; at or below [`PERSPECTIVE_MIN`] the result is purely
/// orthographic.
pub fn project(point: Vector3<f32>, amount: f32) -> Vector3<f32> {
    let sx = -point.z;
    let sy = point.y;
    let depth = point.x;
    if amount <= PERSPECTIVE_MIN {
        return Vector3::new(sx, sy, depth);
    }
    let dist = (CAMERA_DISTANCE + depth).max(0.1);
    let scale = FOCAL_LENGTH / dist;
    Vector3::new(
        sx + (sx * scale - sx) * amount,
        sy + (sy * scale - sy) * amount,
        depth,
    )
}
