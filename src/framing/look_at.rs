//! Camera aiming.
//!
//! Conventions follow the usual content-creation tool camera: world up is `+Z`, the camera looks
//! down its local `-Z` axis and local `+Y` is screen-up. Orientations are stored as a rotation
//! matrix whose columns are the camera's local x (right), y (up) and z (back) axes in world space.

use crate::foundation::{
    core::{DMat3, DMat4, DQuat, DVec3, Position3},
    error::{DrumviewError, DrumviewResult},
};

/// World axis the camera's local up is kept closest to.
pub const WORLD_UP: DVec3 = DVec3::Z;

/// Up reference used when the look direction is parallel to [`WORLD_UP`].
pub const FALLBACK_UP: DVec3 = DVec3::Y;

const PARALLEL_EPS_SQ: f64 = 1e-12;

/// A pure camera rotation (no translation).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Orientation(DMat3);

impl Orientation {
    /// No rotation: looking down world `-Z` with `+Y` up.
    pub const IDENTITY: Self = Self(DMat3::IDENTITY);

    /// Wrap a rotation matrix (columns = local x, y, z in world space).
    pub fn from_mat3(m: DMat3) -> Self {
        Self(m)
    }

    /// Rotation matrix; columns are local right, up and back.
    pub fn matrix(&self) -> DMat3 {
        self.0
    }

    /// Unit quaternion of the same rotation.
    pub fn to_quat(&self) -> DQuat {
        DQuat::from_mat3(&self.0)
    }

    /// Camera-right in world space.
    pub fn right(&self) -> DVec3 {
        self.0.x_axis
    }

    /// Camera-up in world space.
    pub fn up(&self) -> DVec3 {
        self.0.y_axis
    }

    /// Viewing direction in world space.
    pub fn forward(&self) -> DVec3 {
        -self.0.z_axis
    }

    /// Apply an extra `roll` radians about the camera's own viewing axis.
    pub fn with_roll(self, roll: f64) -> Self {
        Self(self.0 * DMat3::from_rotation_z(roll))
    }

    /// 4x4 camera-to-world transform placing this orientation at `location`.
    pub fn to_world_matrix(&self, location: Position3) -> DMat4 {
        DMat4::from_cols(
            self.0.x_axis.extend(0.0),
            self.0.y_axis.extend(0.0),
            self.0.z_axis.extend(0.0),
            location.extend(1.0),
        )
    }

    /// Express a world-space point in camera space relative to `location`.
    pub fn world_to_camera(&self, location: Position3, p: Position3) -> DVec3 {
        self.0.transpose() * (p - location)
    }
}

/// Orientation that aims a camera at `camera_position` towards `target_position`.
///
/// Local `-Z` is mapped onto the look direction, local `+Y` stays as close to [`WORLD_UP`] as the
/// direction allows, and `roll` radians about the viewing axis are applied afterwards. The camera
/// location itself is not part of the result.
pub fn look_at(
    camera_position: Position3,
    target_position: Position3,
    roll: f64,
) -> DrumviewResult<Orientation> {
    let delta = target_position - camera_position;
    let len = delta.length();
    if !len.is_finite() || len <= 0.0 {
        return Err(DrumviewError::degenerate_direction(format!(
            "camera at {camera_position} cannot look at {target_position}"
        )));
    }

    let back = -(delta / len);
    let mut right = WORLD_UP.cross(back);
    if right.length_squared() < PARALLEL_EPS_SQ {
        right = FALLBACK_UP.cross(back);
    }
    let right = right.normalize();
    let up = back.cross(right);

    Ok(Orientation(DMat3::from_cols(right, up, back)).with_roll(roll))
}

#[cfg(test)]
#[path = "../../tests/unit/framing/look_at.rs"]
mod tests;
