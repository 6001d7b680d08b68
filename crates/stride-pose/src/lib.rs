//! Rigid-pose algebra for the stride workspace.
//!
//! A [`Pose`] is a 3-D position plus an axis-angle rotation with an internal
//! quaternion mirror. Composition and interpolation follow the conventions of
//! the original planner this crate descends from:
//!
//! - pose difference and pose interpolation are **translational only**;
//! - angular change goes through explicit quaternion composition
//!   ([`Pose::rotate_local`]);
//! - the quaternion is built from the axis/angle pair exactly as supplied,
//!   with no normalization of the caller's axis.

pub mod chain;
pub mod pose;
pub mod quaternion;

pub use chain::{Chain, Joint, Link};
pub use pose::Pose;
pub use quaternion::Quaternion;
