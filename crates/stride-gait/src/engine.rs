use serde::{Deserialize, Serialize};

use stride_core::config::GaitConfig;
use stride_core::error::GaitError;
use stride_core::state::AxisState;
use stride_pose::Pose;
use stride_trajectory::Timeline;

use crate::tilt;

/// Which foot carries the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportFoot {
    Right,
    Left,
}

/// One integrated mass sample: support-relative position plus elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
}

/// Inverted-pendulum gait engine.
///
/// Holds the instantaneous center-of-mass state relative to the support
/// point (one [`AxisState`] per axis), the accumulated sample buffer, the
/// foot poses, and the support-side state machine. Integration is
/// fixed-step: the caller supplies `dt` on every call and is responsible
/// for choosing a step the model is stable at.
#[derive(Debug, Clone)]
pub struct LipmGait {
    mx: AxisState,
    my: AxisState,
    mz: AxisState,
    samples: Vec<MassSample>,
    elapsed: f64,

    mass: f64,
    right_foot: Pose,
    left_foot: Pose,
    support: SupportFoot,
    support_height: f64,

    config: GaitConfig,
    // Discrete tilt recurrence coefficients, cached by the last
    // angular-response run.
    k1: f64,
    k2: f64,
    // Mass-position tracking gains.
    kp: f64,
    kv: f64,
}

impl LipmGait {
    /// Build an engine from the initial support polygon and the pendulum
    /// mass. The right foot is the initial support; the mass starts at rest,
    /// centered between the feet at the configured pendulum height.
    #[must_use]
    pub fn new(right_foot: Pose, left_foot: Pose, mass: f64, config: GaitConfig) -> Self {
        let mid = (right_foot.position() + left_foot.position()) / 2.0;
        let support_height = right_foot.z();
        Self {
            mx: AxisState::at_rest(mid.x),
            my: AxisState::at_rest(mid.y),
            mz: AxisState::at_rest(support_height + config.pendulum_height),
            samples: Vec::new(),
            elapsed: 0.0,
            mass,
            right_foot,
            left_foot,
            support: SupportFoot::Right,
            support_height,
            config,
            k1: 0.0,
            k2: 0.0,
            kp: config.position_gain,
            kv: config.velocity_gain,
        }
    }

    // ---- initialization ----

    /// Overwrite the per-axis mass state.
    pub fn set_initial_state(&mut self, mx: AxisState, my: AxisState, mz: AxisState) {
        self.mx = mx;
        self.my = my;
        self.mz = mz;
    }

    /// Infer the mass state consistent with a ZMP reference at its first
    /// sample.
    ///
    /// Position comes from sample 0 of each channel; the initial velocity is
    /// solved so one integration step of the pendulum ODE lands on sample 1:
    /// `v0 = (w1 − w0)/dt − a0·dt/2` with `a0 = (g/h)·(p0 − zmp0)`. With the
    /// mass starting on the reference, `a0 = 0` and the expression reduces
    /// to the first difference.
    pub fn initial_state_from_reference(
        &mut self,
        xref: &[f64],
        yref: &[f64],
        zref: &[f64],
        dt: f64,
    ) -> Result<(), GaitError> {
        Self::check_reference(xref, yref, zref)?;
        if xref.len() < 2 {
            return Err(GaitError::ReferenceTooShort { len: xref.len() });
        }
        if dt <= 0.0 {
            return Err(GaitError::InvalidTimestep(dt));
        }

        self.support_height = zref[0];
        let height = self.config.pendulum_height;
        self.mx = AxisState::new(xref[0], (xref[1] - xref[0]) / dt, 0.0);
        self.my = AxisState::new(yref[0], (yref[1] - yref[0]) / dt, 0.0);
        self.mz = AxisState::new(zref[0] + height, (zref[1] - zref[0]) / dt, 0.0);
        Ok(())
    }

    // ---- integration ----

    /// Advance the mass one step of `dt` under the ZMP reference point
    /// `(xzmp, yzmp)`.
    ///
    /// Each horizontal channel follows `a = (g / h) · (p − zmp)` with
    /// `h` the mass height above the support; velocity is updated before
    /// position. A mass exactly over the ZMP sees zero acceleration and an
    /// unchanged velocity for the step. The new `(x, y, z, t)` sample is
    /// appended to the trajectory buffer.
    pub fn step_mass(&mut self, dt: f64, xzmp: f64, yzmp: f64) -> Result<(), GaitError> {
        if dt <= 0.0 {
            return Err(GaitError::InvalidTimestep(dt));
        }
        let height = self.mz.position - self.support_height;
        if height <= 0.0 {
            return Err(GaitError::InvalidRadius(height));
        }
        let omega2 = self.config.gravity / height;

        self.mx.acceleration = omega2 * (self.mx.position - xzmp);
        self.mx.velocity += self.mx.acceleration * dt;
        self.mx.position += self.mx.velocity * dt;

        self.my.acceleration = omega2 * (self.my.position - yzmp);
        self.my.velocity += self.my.acceleration * dt;
        self.my.position += self.my.velocity * dt;

        // Constant-height model: the vertical channel just coasts on its
        // (usually zero) velocity.
        self.mz.acceleration = 0.0;
        self.mz.position += self.mz.velocity * dt;

        self.elapsed += dt;
        self.samples.push(MassSample {
            x: self.mx.position,
            y: self.my.position,
            z: self.mz.position,
            t: self.elapsed,
        });
        Ok(())
    }

    /// Integrate an entire ZMP reference, one [`LipmGait::step_mass`] call
    /// per sample. The z channel sets the support height for each step.
    /// Returns the total simulated time.
    pub fn track_zmp(
        &mut self,
        xref: &[f64],
        yref: &[f64],
        zref: &[f64],
        dt: f64,
    ) -> Result<f64, GaitError> {
        Self::check_reference(xref, yref, zref)?;
        if dt <= 0.0 {
            return Err(GaitError::InvalidTimestep(dt));
        }
        for i in 0..xref.len() {
            self.support_height = zref[i];
            self.step_mass(dt, xref[i], yref[i])?;
        }
        Ok(xref.len() as f64 * dt)
    }

    /// [`LipmGait::track_zmp`], after first establishing the mass state from
    /// the reference's opening segment.
    pub fn track_zmp_with_init(
        &mut self,
        xref: &[f64],
        yref: &[f64],
        zref: &[f64],
        dt: f64,
    ) -> Result<f64, GaitError> {
        self.initial_state_from_reference(xref, yref, zref, dt)?;
        self.track_zmp(xref, yref, zref, dt)
    }

    /// PD acceleration steering an axis toward a target state, using the
    /// configured position/velocity gains.
    #[must_use]
    pub fn tracking_acceleration(&self, state: &AxisState, target: &AxisState) -> f64 {
        self.kp * (target.position - state.position) + self.kv * (target.velocity - state.velocity)
    }

    // ---- angular response ----

    /// Extend a seeded tilt sequence by `steps` samples using the pendulum
    /// oscillator with `ω = sqrt(g / radius)`.
    ///
    /// The discrete recurrence coefficients are cached on the engine and
    /// readable via [`LipmGait::tilt_coefficients`].
    pub fn angular_response(
        &mut self,
        tilt_seq: &mut Vec<f64>,
        steps: usize,
        dt: f64,
        radius: f64,
    ) -> Result<(), GaitError> {
        tilt::extend_tilt(tilt_seq, steps, dt, radius, self.config.gravity)?;
        let omega2 = self.config.gravity / radius;
        self.k1 = 2.0 - omega2 * dt * dt;
        self.k2 = -1.0;
        Ok(())
    }

    /// The `(k1, k2)` coefficients of the last angular-response run:
    /// `θ[n+1] = k1·θ[n] + k2·θ[n−1]`.
    #[must_use]
    pub const fn tilt_coefficients(&self) -> (f64, f64) {
        (self.k1, self.k2)
    }

    /// Lateral velocity that brings the mass back to `initial_y` after
    /// `swing_time` under the linearized pendulum around the support:
    /// `v0 = y0·ω·(1 − cosh(ωT)) / sinh(ωT)`.
    #[must_use]
    pub fn swing_initial_speed(&self, initial_y: f64, swing_time: f64) -> f64 {
        let height = self.mz.position - self.support_height;
        let omega = (self.config.gravity / height).sqrt();
        let wt = omega * swing_time;
        initial_y * omega * (1.0 - wt.cosh()) / wt.sinh()
    }

    // ---- footstep state machine ----

    /// Half step ending in left support: valid in `RightSupport`, where the
    /// left foot is swinging. The left foot advances by the configured step
    /// length and becomes the support. Returns whether the step was taken.
    pub fn half_step_forward_ls(&mut self) -> bool {
        if self.support != SupportFoot::Right {
            return false;
        }
        self.left_foot.translate(self.config.step_length, 0.0, 0.0);
        self.support = SupportFoot::Left;
        self.support_height = self.left_foot.z();
        true
    }

    /// Half step ending in right support: mirror of
    /// [`LipmGait::half_step_forward_ls`].
    pub fn half_step_forward_rs(&mut self) -> bool {
        if self.support != SupportFoot::Left {
            return false;
        }
        self.right_foot.translate(self.config.step_length, 0.0, 0.0);
        self.support = SupportFoot::Right;
        self.support_height = self.right_foot.z();
        true
    }

    // ---- frame conversion ----

    /// Re-express the accumulated support-relative mass trajectory in the
    /// robot base frame, as a [`Timeline`] of timed waypoints.
    ///
    /// The first sample becomes the timeline origin; later waypoints keep
    /// the recorded inter-sample intervals.
    pub fn convert_trajectory(&self, robot_origin: &Pose) -> Result<Timeline, GaitError> {
        let Some(first) = self.samples.first() else {
            return Err(GaitError::EmptyReference);
        };

        let base = robot_origin.position();
        let mut timeline = Timeline::with_origin(Pose::from_position(
            base.x + first.x,
            base.y + first.y,
            base.z + first.z,
        ));
        let mut prev_t = first.t;
        for s in &self.samples[1..] {
            timeline.add_timed_waypoint(
                s.t - prev_t,
                Pose::from_position(base.x + s.x, base.y + s.y, base.z + s.z),
            );
            prev_t = s.t;
        }
        Ok(timeline)
    }

    // ---- accessors ----

    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    #[must_use]
    pub const fn support(&self) -> SupportFoot {
        self.support
    }

    #[must_use]
    pub const fn right_foot(&self) -> &Pose {
        &self.right_foot
    }

    #[must_use]
    pub const fn left_foot(&self) -> &Pose {
        &self.left_foot
    }

    /// The per-axis mass state `(x, y, z)`.
    #[must_use]
    pub const fn state(&self) -> (AxisState, AxisState, AxisState) {
        (self.mx, self.my, self.mz)
    }

    #[must_use]
    pub fn samples(&self) -> &[MassSample] {
        &self.samples
    }

    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn check_reference(xref: &[f64], yref: &[f64], zref: &[f64]) -> Result<(), GaitError> {
        if xref.is_empty() && yref.is_empty() && zref.is_empty() {
            return Err(GaitError::EmptyReference);
        }
        if xref.len() != yref.len() || xref.len() != zref.len() {
            return Err(GaitError::ChannelLengthMismatch {
                x: xref.len(),
                y: yref.len(),
                z: zref.len(),
            });
        }
        Ok(())
    }
}
