use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Rotations numerically closer to the identity than this are reported as
/// the identity by [`Quaternion::to_axis_angle`].
const IDENTITY_EPS: f64 = 1e-12;

/// A rotation quaternion `w + i·x + j·y + k·z`.
///
/// Built from an axis/angle pair **as supplied**: the axis is not normalized
/// here, so a non-unit axis yields a non-unit quaternion. Callers that need
/// unit quaternions must pass a unit axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub i: f64,
    pub j: f64,
    pub k: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// The identity rotation.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            w: 1.0,
            i: 0.0,
            j: 0.0,
            k: 0.0,
        }
    }

    /// Build from an axis/angle pair: `(cos(angle/2), axis·sin(angle/2))`.
    #[must_use]
    pub fn from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Self {
        let half = angle / 2.0;
        let sin_half = half.sin();
        Self {
            w: half.cos(),
            i: axis.x * sin_half,
            j: axis.y * sin_half,
            k: axis.z * sin_half,
        }
    }

    /// Hamilton product `q1 ∘ q2`: apply `q2` in the frame already rotated
    /// by `q1`.
    #[must_use]
    pub fn product(q1: &Self, q2: &Self) -> Self {
        Self {
            w: q1.w * q2.w - q1.i * q2.i - q1.j * q2.j - q1.k * q2.k,
            i: q1.w * q2.i + q1.i * q2.w + q1.j * q2.k - q1.k * q2.j,
            j: q1.w * q2.j - q1.i * q2.k + q1.j * q2.w + q1.k * q2.i,
            k: q1.w * q2.k + q1.i * q2.j - q1.j * q2.i + q1.k * q2.w,
        }
    }

    /// Canonical axis-angle form, with the angle wrapped into `(−π, π]`.
    ///
    /// Returns `None` for rotations indistinguishable from the identity; the
    /// axis of an identity rotation is undefined and callers are expected to
    /// keep whatever axis they already had.
    #[must_use]
    pub fn to_axis_angle(&self) -> Option<(Vector3<f64>, f64)> {
        let sin_half = (self.i * self.i + self.j * self.j + self.k * self.k).sqrt();
        if sin_half < IDENTITY_EPS {
            return None;
        }
        let axis = Vector3::new(self.i, self.j, self.k) / sin_half;
        let mut angle = 2.0 * sin_half.atan2(self.w);
        // atan2 puts angle in [0, 2π]; fold the far half onto (−π, π].
        if angle > std::f64::consts::PI {
            angle -= 2.0 * std::f64::consts::PI;
        }
        Some((axis, angle))
    }
}
