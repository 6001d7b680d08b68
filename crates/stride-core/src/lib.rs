// stride-core: Errors, configuration, and kinematic state shared across the stride workspace.

pub mod config;
pub mod error;
pub mod state;

pub use config::{GaitConfig, PlannerConfig, TrajectoryConfig};
pub use error::{ConfigError, GaitError, StrideError, TrajectoryError};
pub use state::AxisState;
