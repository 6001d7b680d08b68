//! Minimal serial kinematic chain.
//!
//! Joint motion is a closed set, so it is dispatched through a tagged
//! [`Joint`] variant and one `match` in [`Link::apply`] instead of trait
//! objects.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::pose::Pose;

/// Joint kind with its per-kind parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    /// Rotation about `axis`; the degree of freedom is an angle in radians.
    Revolute { axis: Vector3<f64> },
    /// Translation along `axis`; the degree of freedom is a distance.
    Prismatic { axis: Vector3<f64> },
}

impl Joint {
    /// Revolute joint about the Z axis, the common case for planar walkers.
    #[must_use]
    pub fn revolute_z() -> Self {
        Self::Revolute { axis: Vector3::z() }
    }
}

/// One link of a chain: the pose of its end (the joint with the next link),
/// its center of gravity, and the joint that moves it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    end: Pose,
    cog: Pose,
    joint: Joint,
}

impl Link {
    #[must_use]
    pub fn new(end: Pose, joint: Joint) -> Self {
        Self {
            end,
            cog: Pose::default(),
            joint,
        }
    }

    /// Move the link by setting its degree of freedom.
    ///
    /// Revolute joints overwrite the end rotation with `dof` radians about
    /// the joint axis; prismatic joints overwrite the end position with a
    /// `dof`-scaled displacement along it.
    pub fn apply(&mut self, dof: f64) {
        match self.joint {
            Joint::Revolute { axis } => self.end.set_rotation(axis, dof),
            Joint::Prismatic { axis } => {
                let p = axis * dof;
                self.end.set_position(p.x, p.y, p.z);
            }
        }
    }

    #[must_use]
    pub const fn end(&self) -> &Pose {
        &self.end
    }

    #[must_use]
    pub const fn cog(&self) -> &Pose {
        &self.cog
    }

    pub fn set_cog(&mut self, cog: Pose) {
        self.cog = cog;
    }

    #[must_use]
    pub const fn joint(&self) -> Joint {
        self.joint
    }
}

/// An ordered chain of links hanging off a base pose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    base: Pose,
    links: Vec<Link>,
}

impl Chain {
    #[must_use]
    pub fn new(base: Pose) -> Self {
        Self {
            base,
            links: Vec::new(),
        }
    }

    pub fn push(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Number of degrees of freedom (one per link).
    #[must_use]
    pub fn dof(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub const fn base(&self) -> &Pose {
        &self.base
    }

    pub fn set_base(&mut self, base: Pose) {
        self.base = base;
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Mutable access to one link, for driving its degree of freedom.
    pub fn link_mut(&mut self, index: usize) -> Option<&mut Link> {
        self.links.get_mut(index)
    }
}
