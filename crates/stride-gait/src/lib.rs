//! Linear-inverted-pendulum gait engine.
//!
//! Models the robot's center of mass as a point mass on a massless rod
//! pivoting over the instantaneous zero-moment point (ZMP). Feeding the
//! engine a ZMP reference path yields a dynamically consistent mass
//! trajectory ([`LipmGait::track_zmp`]); the tilt of the pendulum follows a
//! separate two-sample recurrence ([`tilt_step`]); half-step advances move
//! the support pattern forward ([`LipmGait::half_step_forward_rs`] /
//! [`LipmGait::half_step_forward_ls`]).
//!
//! The accumulated mass trajectory is support-relative; convert it into the
//! robot base frame with [`LipmGait::convert_trajectory`] to obtain a
//! [`stride_trajectory::Timeline`] for playback.

pub mod engine;
pub mod tilt;

pub use engine::{LipmGait, MassSample, SupportFoot};
pub use tilt::{extend_tilt, tilt_step};
