//! Flat text export of a timeline.
//!
//! One record per waypoint, comma-separated, no header:
//!
//! ```text
//! x,y,z,axis_i,axis_j,axis_k,angle
//! ```
//!
//! with the angle in radians. Any destination accepting sequential line
//! writes will do; the collaborating plotting and replay tools consume this
//! format directly.

use std::io::{self, Write};

use crate::timeline::Timeline;

/// Write every waypoint of `timeline` to `out` as one CSV record per line.
pub fn write_csv<W: Write>(timeline: &Timeline, mut out: W) -> io::Result<()> {
    for wp in timeline.waypoints() {
        let p = wp.pose.position();
        let (axis, angle) = wp.pose.rotation();
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            p.x, p.y, p.z, axis.x, axis.y, axis.z, angle
        )?;
    }
    Ok(())
}
