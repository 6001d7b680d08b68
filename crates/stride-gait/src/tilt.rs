//! Angular (tilt) response of the pendulum.
//!
//! The tilt angle is treated as a second-order oscillator with natural
//! frequency `ω = sqrt(g / radius)`, discretized with the small-angle
//! linearization `θ'' = −ω²·θ`:
//!
//! ```text
//! θ[n+1] = (2 − ω²·dt²)·θ[n] − θ[n−1]
//! ```
//!
//! The linear form is applied uniformly; it diverges from the full
//! `sin(θ)` pendulum for large tilt, where the discrete coefficients no
//! longer describe the motion. The recurrence is a pure function of the
//! rolling two-sample window; the caller owns the growing sequence.

use stride_core::error::GaitError;

/// One step of the discretized tilt oscillator.
///
/// Pure: no state beyond the two previous samples.
#[must_use]
pub fn tilt_step(prev2: f64, prev1: f64, omega: f64, dt: f64) -> f64 {
    (2.0 - omega * omega * dt * dt) * prev1 - prev2
}

/// Extend a seeded tilt sequence in place by `steps` samples.
///
/// `tilt` must hold at least the two seed samples. `radius` is the pendulum
/// length (distance from support point to mass).
pub fn extend_tilt(
    tilt: &mut Vec<f64>,
    steps: usize,
    dt: f64,
    radius: f64,
    gravity: f64,
) -> Result<(), GaitError> {
    if tilt.len() < 2 {
        return Err(GaitError::SeedTooShort { len: tilt.len() });
    }
    if dt <= 0.0 {
        return Err(GaitError::InvalidTimestep(dt));
    }
    if radius <= 0.0 {
        return Err(GaitError::InvalidRadius(radius));
    }
    let omega = (gravity / radius).sqrt();
    for _ in 0..steps {
        let n = tilt.len();
        tilt.push(tilt_step(tilt[n - 2], tilt[n - 1], omega, dt));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const G: f64 = 9.81;

    #[test]
    fn zero_seed_stays_at_equilibrium() {
        let mut tilt = vec![0.0, 0.0];
        extend_tilt(&mut tilt, 50, 0.01, 0.8, G).unwrap();
        assert_eq!(tilt.len(), 52);
        for theta in tilt {
            assert_relative_eq!(theta, 0.0);
        }
    }

    #[test]
    fn step_matches_recurrence_coefficients() {
        let omega = (G / 0.8_f64).sqrt();
        let dt = 0.01;
        let k1 = 2.0 - omega * omega * dt * dt;
        assert_relative_eq!(tilt_step(0.02, 0.03, omega, dt), k1 * 0.03 - 0.02, epsilon = 1e-15);
    }

    #[test]
    fn oscillation_stays_bounded() {
        // Seeded at rest off equilibrium; the discrete oscillator must not
        // grow over several periods.
        let mut tilt = vec![0.05, 0.05];
        extend_tilt(&mut tilt, 2000, 0.005, 0.8, G).unwrap();
        for theta in &tilt {
            assert!(theta.abs() < 0.06, "unbounded tilt: {theta}");
        }
    }

    #[test]
    fn quarter_period_zero_crossing() {
        // ω = sqrt(9.81/0.981) ≈ 3.162; period T = 2π/ω ≈ 1.987 s. Starting
        // at a positive extreme the sequence crosses zero near T/4.
        let radius = 0.981;
        let omega = (G / radius).sqrt();
        let dt = 0.001;
        let mut tilt = vec![0.1, 0.1];
        extend_tilt(&mut tilt, 1000, dt, radius, G).unwrap();

        let quarter = std::f64::consts::FRAC_PI_2 / omega;
        let crossing = tilt.iter().position(|t| *t <= 0.0).unwrap();
        let crossing_time = crossing as f64 * dt;
        assert_relative_eq!(crossing_time, quarter, epsilon = 0.05);
    }

    #[test]
    fn seed_too_short_is_error() {
        let mut tilt = vec![0.1];
        assert_eq!(
            extend_tilt(&mut tilt, 10, 0.01, 0.8, G).unwrap_err(),
            GaitError::SeedTooShort { len: 1 }
        );
    }

    #[test]
    fn invalid_timestep_is_error() {
        let mut tilt = vec![0.0, 0.0];
        assert_eq!(
            extend_tilt(&mut tilt, 10, 0.0, 0.8, G).unwrap_err(),
            GaitError::InvalidTimestep(0.0)
        );
    }

    #[test]
    fn invalid_radius_is_error() {
        let mut tilt = vec![0.0, 0.0];
        assert_eq!(
            extend_tilt(&mut tilt, 10, 0.01, -0.8, G).unwrap_err(),
            GaitError::InvalidRadius(-0.8)
        );
    }

    #[test]
    fn zero_steps_leaves_seed_untouched() {
        let mut tilt = vec![0.1, 0.2];
        extend_tilt(&mut tilt, 0, 0.01, 0.8, G).unwrap();
        assert_eq!(tilt, vec![0.1, 0.2]);
    }
}
