//! Timed pose trajectories with cached playback sampling.
//!
//! A [`Timeline`] is an ordered sequence of [`Waypoint`]s (pose + arrival
//! time) that can be replayed by continuous-time sampling. Sequential
//! queries inside the current segment reuse a cached bracket in O(1);
//! out-of-bracket queries re-seek with a binary search over the cumulative
//! times.

pub mod export;
pub mod timeline;

pub use export::write_csv;
pub use timeline::{Timeline, Waypoint};
