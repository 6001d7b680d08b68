use serde::{Deserialize, Serialize};

/// Kinematic state of a single axis: position, velocity, acceleration.
///
/// Three of these compose the full pendulum-mass state (x, y, z). Only the
/// gait integrator mutates them; everything else treats them as values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisState {
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl AxisState {
    #[must_use]
    pub const fn new(position: f64, velocity: f64, acceleration: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration,
        }
    }

    /// A state at rest at the given position.
    #[must_use]
    pub const fn at_rest(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            acceleration: 0.0,
        }
    }
}
