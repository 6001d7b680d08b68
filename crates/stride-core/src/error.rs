use thiserror::Error;

/// Top-level error type for the stride workspace.
#[derive(Debug, Error)]
pub enum StrideError {
    #[error("Trajectory error: {0}")]
    Trajectory(#[from] TrajectoryError),

    #[error("Gait error: {0}")]
    Gait(#[from] GaitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Timeline sampling and waypoint access errors.
///
/// Copy + static payloads for cheap propagation in the sampling hot path.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("No waypoint for time {time}: trajectory ends at {duration}")]
    NoWaypointForTime { time: f64, duration: f64 },

    #[error("Time {time} brackets no segment: nothing precedes the origin waypoint")]
    BeforeFirstSegment { time: f64 },

    #[error("Waypoint index out of range: {index} >= {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Trajectory has no waypoints")]
    Empty,
}

/// Inverted-pendulum engine errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GaitError {
    #[error("ZMP reference contains no samples")]
    EmptyReference,

    #[error("ZMP channel length mismatch: x={x}, y={y}, z={z}")]
    ChannelLengthMismatch { x: usize, y: usize, z: usize },

    #[error("ZMP reference too short: {len} samples (need at least 2)")]
    ReferenceTooShort { len: usize },

    #[error("Tilt seed too short: {len} samples (need at least 2)")]
    SeedTooShort { len: usize },

    #[error("Invalid timestep: {0} (must be > 0)")]
    InvalidTimestep(f64),

    #[error("Invalid pendulum radius: {0} (must be > 0)")]
    InvalidRadius(f64),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
