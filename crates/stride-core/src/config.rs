use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_velocity() -> f64 {
    0.2
}
const fn default_min_segment_time() -> f64 {
    1.0
}
const fn default_gravity() -> f64 {
    9.81
}
const fn default_step_length() -> f64 {
    0.05
}
const fn default_pendulum_height() -> f64 {
    0.8
}
const fn default_step_time() -> f64 {
    1.2
}
const fn default_position_gain() -> f64 {
    1.0
}
const fn default_velocity_gain() -> f64 {
    0.1
}

// ---------------------------------------------------------------------------
// TrajectoryConfig
// ---------------------------------------------------------------------------

/// Timing parameters for distance-inferred waypoint insertion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    /// Tip velocity used to infer segment times from distance (m/s).
    #[serde(default = "default_velocity")]
    pub default_velocity: f64,

    /// Floor applied to inferred segment times (seconds). Keeps short hops
    /// from producing degenerate fast segments.
    #[serde(default = "default_min_segment_time")]
    pub min_segment_time: f64,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            default_velocity: default_velocity(),
            min_segment_time: default_min_segment_time(),
        }
    }
}

impl TrajectoryConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_velocity <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "trajectory.default_velocity".into(),
                message: format!("{} (must be > 0)", self.default_velocity),
            });
        }
        if self.min_segment_time < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "trajectory.min_segment_time".into(),
                message: format!("{} (must be >= 0)", self.min_segment_time),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GaitConfig
// ---------------------------------------------------------------------------

/// Inverted-pendulum engine parameters.
///
/// Step length and step time are surfaced here rather than hard-coded so a
/// caller can shape the stride without touching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaitConfig {
    /// Gravitational acceleration (m/s^2).
    #[serde(default = "default_gravity")]
    pub gravity: f64,

    /// Forward displacement of the swing foot per half step (meters).
    #[serde(default = "default_step_length")]
    pub step_length: f64,

    /// Nominal duration of one half step (seconds).
    #[serde(default = "default_step_time")]
    pub step_time: f64,

    /// Height of the pendulum mass above the support point at rest (meters).
    #[serde(default = "default_pendulum_height")]
    pub pendulum_height: f64,

    /// Proportional gain on mass position tracking.
    #[serde(default = "default_position_gain")]
    pub position_gain: f64,

    /// Derivative gain on mass velocity tracking.
    #[serde(default = "default_velocity_gain")]
    pub velocity_gain: f64,

    /// First angular-response coefficient.
    #[serde(default = "default_position_gain")]
    pub tilt_gain_1: f64,

    /// Second angular-response coefficient.
    #[serde(default = "default_velocity_gain")]
    pub tilt_gain_2: f64,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            step_length: default_step_length(),
            step_time: default_step_time(),
            pendulum_height: default_pendulum_height(),
            position_gain: default_position_gain(),
            velocity_gain: default_velocity_gain(),
            tilt_gain_1: default_position_gain(),
            tilt_gain_2: default_velocity_gain(),
        }
    }
}

impl GaitConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "gait.gravity".into(),
                message: format!("{} (must be > 0)", self.gravity),
            });
        }
        if self.step_length <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "gait.step_length".into(),
                message: format!("{} (must be > 0)", self.step_length),
            });
        }
        if self.step_time <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "gait.step_time".into(),
                message: format!("{} (must be > 0)", self.step_time),
            });
        }
        if self.pendulum_height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "gait.pendulum_height".into(),
                message: format!("{} (must be > 0)", self.pendulum_height),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PlannerConfig
// ---------------------------------------------------------------------------

/// Complete planner configuration loaded from TOML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
    #[serde(default)]
    pub gait: GaitConfig,
}

impl PlannerConfig {
    /// Validate both sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trajectory.validate()?;
        self.gait.validate()?;
        Ok(())
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
