use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::quaternion::Quaternion;

/// A rigid 3-D transform: position plus an axis-angle rotation with a
/// quaternion mirror kept in sync by every rotation setter.
///
/// Two operations are deliberately translational only, matching the planner
/// this type descends from:
///
/// - [`Pose::between`] computes only the position delta;
/// - [`Pose::interpolate`] interpolates only the position.
///
/// Angular change goes through [`Pose::rotate_local`], which composes
/// quaternions and re-canonicalizes the axis-angle form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    position: Vector3<f64>,
    axis: Vector3<f64>,
    angle: f64,
    quat: Quaternion,
}

impl Pose {
    /// A pose at the given position with rotation angle 0 about a zero axis.
    #[must_use]
    pub fn from_position(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            axis: Vector3::zeros(),
            angle: 0.0,
            quat: Quaternion::identity(),
        }
    }

    /// A pose at the given position vector, rotation at the identity.
    #[must_use]
    pub fn from_vector(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// The transform from `initial` to `final_`: position is the difference
    /// `final_ − initial`.
    ///
    /// The rotation is left at the identity; this constructor does not
    /// compute a rotational delta. Callers that need one compose rotations
    /// explicitly via [`Pose::rotate_local`].
    #[must_use]
    pub fn between(initial: &Self, final_: &Self) -> Self {
        Self {
            position: final_.position - initial.position,
            ..Self::default()
        }
    }

    /// Linear interpolation of the **position** between two poses.
    ///
    /// `factor` 0 yields `initial`'s position, 1 yields `final_`'s; values
    /// outside `[0, 1]` extrapolate along the same line. Rotation is not
    /// interpolated.
    #[must_use]
    pub fn interpolate(initial: &Self, final_: &Self, factor: f64) -> Self {
        Self {
            position: initial.position + (final_.position - initial.position) * factor,
            ..Self::default()
        }
    }

    /// A fraction of this transform: position and angle scaled by `factor`,
    /// axis unchanged. Expresses "part of a motion", not an orientation
    /// blend.
    #[must_use]
    pub fn fraction(&self, factor: f64) -> Self {
        let mut out = Self::from_vector(self.position * factor);
        out.set_rotation(self.axis, self.angle * factor);
        out
    }

    // ---- position ----

    /// Overwrite the position.
    pub fn set_position(&mut self, x: f64, y: f64, z: f64) {
        self.position = Vector3::new(x, y, z);
    }

    /// Shift the position by the given offsets.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.position += Vector3::new(dx, dy, dz);
    }

    #[must_use]
    pub const fn position(&self) -> Vector3<f64> {
        self.position
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Euclidean distance between this pose's position and another's.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (other.position - self.position).norm()
    }

    // ---- rotation ----

    /// Overwrite the rotation with the given axis-angle pair.
    ///
    /// The quaternion mirror is recomputed from the pair exactly as supplied;
    /// the axis is not normalized.
    pub fn set_rotation(&mut self, axis: Vector3<f64>, angle: f64) {
        self.axis = axis;
        self.angle = angle;
        self.quat = Quaternion::from_axis_angle(&axis, angle);
    }

    /// Compose an incremental rotation defined in this pose's local frame:
    /// `q_new = q_current ∘ q_delta`, converted back to canonical axis-angle
    /// with the angle in `(−π, π]`.
    ///
    /// A zero incremental angle, or a composition landing on the identity,
    /// leaves the stored axis untouched rather than producing an undefined
    /// axis.
    pub fn rotate_local(&mut self, axis: Vector3<f64>, angle: f64) {
        if angle == 0.0 {
            return;
        }
        let delta = Quaternion::from_axis_angle(&axis, angle);
        let composed = Quaternion::product(&self.quat, &delta);
        match composed.to_axis_angle() {
            Some((new_axis, new_angle)) => {
                self.axis = new_axis;
                self.angle = new_angle;
            }
            None => {
                // Identity result: keep the previous axis.
                self.angle = 0.0;
            }
        }
        self.quat = composed;
    }

    /// Apply a pose variation: shift by its position, then rotate locally by
    /// its axis-angle.
    pub fn compose(&mut self, variation: &Self) {
        self.position += variation.position;
        self.rotate_local(variation.axis, variation.angle);
    }

    #[must_use]
    pub const fn axis(&self) -> Vector3<f64> {
        self.axis
    }

    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// The axis-angle rotation as an `(axis, angle)` pair.
    #[must_use]
    pub const fn rotation(&self) -> (Vector3<f64>, f64) {
        (self.axis, self.angle)
    }

    #[must_use]
    pub const fn quaternion(&self) -> Quaternion {
        self.quat
    }
}
