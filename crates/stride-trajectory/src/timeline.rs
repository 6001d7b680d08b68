use serde::{Deserialize, Serialize};

use stride_core::config::TrajectoryConfig;
use stride_core::error::TrajectoryError;
use stride_pose::Pose;

/// A timed pose sample: one control point of a [`Timeline`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// The pose at this control point.
    pub pose: Pose,
    /// Delta time from the previous waypoint (0 for the origin).
    pub dt: f64,
    /// Cumulative arrival time; non-decreasing, starting at 0.
    pub time: f64,
}

/// An ordered, time-stamped sequence of poses with cached playback state.
///
/// Sampling mutates the cached bracket, so a `Timeline` follows a
/// single-writer discipline: concurrent queries from multiple contexts need
/// external mutual exclusion. Use [`Timeline::seek`] followed by reads of
/// [`Timeline::bracket`] when an explicit reposition without interpolation
/// is wanted.
#[derive(Debug, Clone)]
pub struct Timeline {
    waypoints: Vec<Waypoint>,
    config: TrajectoryConfig,

    // Playback cache: the segment [last_wp, next_wp] the previous sample
    // landed in, with its endpoint times and inter-waypoint delta pose.
    // last_wp == next_wp means no sample has seeked yet.
    last_wp: usize,
    next_wp: usize,
    last_time: f64,
    next_time: f64,
    segment: Pose,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// A timeline starting at the origin `(0, 0, 0)`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_origin(Pose::from_position(0.0, 0.0, 0.0))
    }

    /// A timeline whose origin waypoint is `initial` at time 0.
    #[must_use]
    pub fn with_origin(initial: Pose) -> Self {
        Self::with_config(initial, TrajectoryConfig::default())
    }

    /// A timeline with explicit timing configuration.
    #[must_use]
    pub fn with_config(initial: Pose, config: TrajectoryConfig) -> Self {
        Self {
            waypoints: vec![Waypoint {
                pose: initial,
                dt: 0.0,
                time: 0.0,
            }],
            config,
            last_wp: 0,
            next_wp: 0,
            last_time: 0.0,
            next_time: 0.0,
            segment: Pose::default(),
        }
    }

    // ---- construction ----

    /// (Re)define the origin waypoint at cumulative time 0.
    ///
    /// Later waypoints and their times are untouched; only the playback
    /// cache is invalidated, since a cached segment may start at the origin.
    pub fn set_initial_waypoint(&mut self, pose: Pose) {
        self.waypoints[0] = Waypoint {
            pose,
            dt: 0.0,
            time: 0.0,
        };
        self.invalidate_cache();
    }

    /// Append a waypoint `dt` after the previous one.
    ///
    /// A zero `dt` produces a degenerate zero-duration segment; the insert
    /// proceeds with a warning.
    pub fn add_timed_waypoint(&mut self, dt: f64, pose: Pose) {
        if dt == 0.0 {
            log::warn!("adding waypoint with zero delta time");
        }
        let time = self.last_waypoint().time + dt;
        self.waypoints.push(Waypoint { pose, dt, time });
    }

    /// Append a waypoint, inferring `dt` from the Euclidean distance to the
    /// last waypoint at the configured default velocity, floored at the
    /// configured minimum segment time. Returns the `dt` used.
    pub fn add_waypoint(&mut self, pose: Pose) -> f64 {
        let distance = self.last_waypoint().pose.distance_to(&pose);
        let dt = (distance / self.config.default_velocity).max(self.config.min_segment_time);
        self.add_timed_waypoint(dt, pose);
        dt
    }

    /// Shift the last pose by `(dx, dy, dz)` and append the result as a new
    /// waypoint. Returns the inferred `dt`.
    pub fn move_by(&mut self, dx: f64, dy: f64, dz: f64) -> f64 {
        let mut pose = self.last_waypoint().pose;
        pose.translate(dx, dy, dz);
        self.add_waypoint(pose)
    }

    // ---- sampling ----

    /// Reposition the playback cache onto the segment bracketing `time` and
    /// return the bracket indices `(last_wp, next_wp)`.
    ///
    /// Inside the currently cached bracket this is O(1); otherwise a binary
    /// search over the cumulative times recomputes the bracket and its
    /// inter-waypoint delta pose.
    pub fn seek(&mut self, time: f64) -> Result<(usize, usize), TrajectoryError> {
        let cached =
            self.next_wp != self.last_wp && time >= self.last_time && time <= self.next_time;
        if cached {
            return Ok((self.last_wp, self.next_wp));
        }

        // First waypoint arriving at or after the query time.
        let idx = self.waypoints.partition_point(|w| w.time < time);
        if idx >= self.waypoints.len() {
            return Err(TrajectoryError::NoWaypointForTime {
                time,
                duration: self.duration(),
            });
        }
        if idx == 0 {
            // A segment needs a previous waypoint; nothing precedes the origin.
            return Err(TrajectoryError::BeforeFirstSegment { time });
        }

        self.next_wp = idx;
        self.last_wp = idx - 1;
        self.next_time = self.waypoints[idx].time;
        self.last_time = self.waypoints[idx - 1].time;
        self.segment = Pose::between(
            &self.waypoints[self.last_wp].pose,
            &self.waypoints[self.next_wp].pose,
        );
        Ok((self.last_wp, self.next_wp))
    }

    /// The pose at `time`, by piecewise-linear translational interpolation
    /// between the two bracketing waypoints.
    pub fn sample(&mut self, time: f64) -> Result<Pose, TrajectoryError> {
        let (last, _next) = self.seek(time)?;
        let span = self.next_time - self.last_time;
        // A zero-duration segment collapses onto its end waypoint.
        let fraction = if span > 0.0 {
            (time - self.last_time) / span
        } else {
            1.0
        };
        let step = self.segment.fraction(fraction);
        let mut pose = self.waypoints[last].pose;
        pose.translate(step.x(), step.y(), step.z());
        Ok(pose)
    }

    /// The currently cached bracket, if any sample has seeked yet.
    #[must_use]
    pub const fn bracket(&self) -> Option<(usize, usize)> {
        if self.next_wp == self.last_wp {
            None
        } else {
            Some((self.last_wp, self.next_wp))
        }
    }

    // ---- accessors ----

    /// Direct waypoint access. Out-of-range indices are an error, never
    /// clamped.
    pub fn waypoint(&self, index: usize) -> Result<&Waypoint, TrajectoryError> {
        self.waypoints.get(index).ok_or(TrajectoryError::IndexOutOfRange {
            index,
            len: self.waypoints.len(),
        })
    }

    /// The most recently appended waypoint (the origin on a fresh timeline).
    #[must_use]
    pub fn last_waypoint(&self) -> &Waypoint {
        self.waypoints
            .last()
            .expect("timeline always holds an origin waypoint")
    }

    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Total duration: the last cumulative arrival time.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.last_waypoint().time
    }

    #[must_use]
    pub const fn default_velocity(&self) -> f64 {
        self.config.default_velocity
    }

    pub fn set_default_velocity(&mut self, velocity: f64) {
        self.config.default_velocity = velocity;
    }

    fn invalidate_cache(&mut self) {
        self.last_wp = 0;
        self.next_wp = 0;
        self.last_time = 0.0;
        self.next_time = 0.0;
        self.segment = Pose::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use stride_core::error::TrajectoryError;

    fn three_point_track() -> Timeline {
        // (0,0,0)@0 → (1,0,0)@2 → (1,1,0)@4
        let mut tl = Timeline::new();
        tl.add_timed_waypoint(2.0, Pose::from_position(1.0, 0.0, 0.0));
        tl.add_timed_waypoint(2.0, Pose::from_position(1.0, 1.0, 0.0));
        tl
    }

    // ---- construction ----

    #[test]
    fn new_timeline_has_origin_waypoint() {
        let tl = Timeline::new();
        assert_eq!(tl.len(), 1);
        assert_relative_eq!(tl.waypoint(0).unwrap().pose.position(), Vector3::zeros());
        assert_relative_eq!(tl.duration(), 0.0);
    }

    #[test]
    fn set_initial_waypoint_redefines_origin_in_place() {
        let mut tl = three_point_track();
        tl.set_initial_waypoint(Pose::from_position(0.5, 0.0, 0.0));
        // Origin moved; later waypoints and their times untouched.
        assert_relative_eq!(tl.waypoint(0).unwrap().pose.x(), 0.5);
        assert_relative_eq!(tl.waypoint(1).unwrap().time, 2.0);
        assert_relative_eq!(tl.waypoint(2).unwrap().time, 4.0);
        assert_eq!(tl.len(), 3);
    }

    #[test]
    fn set_initial_waypoint_invalidates_cache() {
        let mut tl = three_point_track();
        assert_relative_eq!(tl.sample(1.0).unwrap().x(), 0.5);
        tl.set_initial_waypoint(Pose::from_position(1.0, 0.0, 0.0));
        assert!(tl.bracket().is_none());
        // Re-sampled against the new origin: constant x segment.
        assert_relative_eq!(tl.sample(1.0).unwrap().x(), 1.0);
    }

    #[test]
    fn add_timed_waypoint_accumulates_time() {
        let tl = three_point_track();
        assert_relative_eq!(tl.waypoint(1).unwrap().dt, 2.0);
        assert_relative_eq!(tl.waypoint(1).unwrap().time, 2.0);
        assert_relative_eq!(tl.waypoint(2).unwrap().time, 4.0);
        assert_relative_eq!(tl.duration(), 4.0);
    }

    #[test]
    fn add_timed_waypoint_zero_dt_proceeds() {
        let mut tl = Timeline::new();
        tl.add_timed_waypoint(1.0, Pose::from_position(1.0, 0.0, 0.0));
        tl.add_timed_waypoint(0.0, Pose::from_position(2.0, 0.0, 0.0));
        assert_eq!(tl.len(), 3);
        assert_relative_eq!(tl.duration(), 1.0);
        // The bracket search picks the first waypoint arriving at the shared
        // time, so the sample lands on the segment ending there.
        assert_relative_eq!(tl.sample(1.0).unwrap().x(), 1.0);
    }

    #[test]
    fn add_waypoint_infers_dt_from_distance() {
        // From (0,0,0) to (2,0,0) at the default 0.2 m/s: dt = 10.
        let mut tl = Timeline::new();
        let dt = tl.add_waypoint(Pose::from_position(2.0, 0.0, 0.0));
        assert_relative_eq!(dt, 10.0, epsilon = 1e-12);
        assert_relative_eq!(tl.duration(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn add_waypoint_floors_short_hops() {
        // 0.1 m at 0.2 m/s would be 0.5 s; floored to 1 s.
        let mut tl = Timeline::new();
        let dt = tl.add_waypoint(Pose::from_position(0.1, 0.0, 0.0));
        assert_relative_eq!(dt, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn add_waypoint_respects_configured_velocity() {
        let mut tl = Timeline::new();
        tl.set_default_velocity(0.5);
        let dt = tl.add_waypoint(Pose::from_position(4.0, 0.0, 0.0));
        assert_relative_eq!(dt, 8.0, epsilon = 1e-12);
        assert_relative_eq!(tl.default_velocity(), 0.5);
    }

    #[test]
    fn move_by_appends_shifted_waypoint() {
        let mut tl = Timeline::new();
        let dt = tl.move_by(2.0, 0.0, 0.0);
        assert_relative_eq!(dt, 10.0, epsilon = 1e-12);
        assert_relative_eq!(tl.last_waypoint().pose.x(), 2.0);
        assert_eq!(tl.len(), 2);
    }

    // ---- sampling ----

    #[test]
    fn sample_at_waypoint_times_returns_waypoints() {
        let mut tl = three_point_track();
        assert_relative_eq!(
            tl.sample(2.0).unwrap().position(),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            tl.sample(4.0).unwrap().position(),
            Vector3::new(1.0, 1.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn sample_interpolates_between_waypoints() {
        let mut tl = three_point_track();
        assert_relative_eq!(
            tl.sample(1.0).unwrap().position(),
            Vector3::new(0.5, 0.0, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            tl.sample(3.0).unwrap().position(),
            Vector3::new(1.0, 0.5, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn sample_stays_on_segment_line() {
        let mut tl = three_point_track();
        // Strictly inside the second segment: x pinned at 1, y on the line.
        for t in [2.5, 3.0, 3.5] {
            let p = tl.sample(t).unwrap();
            assert_relative_eq!(p.x(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(p.y(), (t - 2.0) / 2.0, epsilon = 1e-12);
            assert_relative_eq!(p.z(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn sample_past_end_fails() {
        let mut tl = three_point_track();
        let err = tl.sample(5.0).unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::NoWaypointForTime {
                time: 5.0,
                duration: 4.0
            }
        );
    }

    #[test]
    fn sample_at_or_before_origin_fails() {
        let mut tl = three_point_track();
        assert_eq!(
            tl.sample(0.0).unwrap_err(),
            TrajectoryError::BeforeFirstSegment { time: 0.0 }
        );
        assert!(matches!(
            tl.sample(-1.0).unwrap_err(),
            TrajectoryError::BeforeFirstSegment { .. }
        ));
    }

    #[test]
    fn sequential_samples_reuse_bracket() {
        let mut tl = three_point_track();
        tl.sample(0.5).unwrap();
        assert_eq!(tl.bracket(), Some((0, 1)));
        // Monotonically increasing queries inside the segment keep the
        // bracket; crossing the boundary moves it.
        tl.sample(1.0).unwrap();
        tl.sample(1.9).unwrap();
        assert_eq!(tl.bracket(), Some((0, 1)));
        tl.sample(2.5).unwrap();
        assert_eq!(tl.bracket(), Some((1, 2)));
    }

    #[test]
    fn backward_jump_reseeks_correct_bracket() {
        let mut tl = three_point_track();
        tl.sample(3.5).unwrap();
        assert_eq!(tl.bracket(), Some((1, 2)));
        let p = tl.sample(0.5).unwrap();
        assert_eq!(tl.bracket(), Some((0, 1)));
        assert_relative_eq!(p.x(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn failed_sample_leaves_bracket_usable() {
        let mut tl = three_point_track();
        tl.sample(1.0).unwrap();
        assert!(tl.sample(9.0).is_err());
        assert_relative_eq!(tl.sample(1.0).unwrap().x(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn sample_after_appending_sees_new_segment() {
        let mut tl = three_point_track();
        assert!(tl.sample(5.0).is_err());
        tl.add_timed_waypoint(2.0, Pose::from_position(0.0, 1.0, 0.0));
        assert_relative_eq!(
            tl.sample(5.0).unwrap().position(),
            Vector3::new(0.5, 1.0, 0.0),
            epsilon = 1e-12
        );
    }

    // ---- accessors ----

    #[test]
    fn waypoint_out_of_range_is_error() {
        let tl = three_point_track();
        assert_eq!(
            tl.waypoint(3).unwrap_err(),
            TrajectoryError::IndexOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn last_waypoint_tracks_appends() {
        let mut tl = Timeline::new();
        tl.add_timed_waypoint(1.0, Pose::from_position(0.0, 2.0, 0.0));
        assert_relative_eq!(tl.last_waypoint().pose.y(), 2.0);
        assert_relative_eq!(tl.last_waypoint().time, 1.0);
    }
}
