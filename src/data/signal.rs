//! Synthetic "true" velocity signal on a uniform time grid.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on the number of grid points of a single run.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Number of points of the grid over `[0, total_time)`, rejecting grids above [`MAX_SAMPLES`].
pub fn sample_count(total_time: f64, dt: f64) -> Result<usize> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::invalid("dt", format!("must be finite and > 0, got {dt}")));
    }
    if !total_time.is_finite() || total_time < 0.0 {
        return Err(Error::invalid(
            "total_time",
            format!("must be finite and >= 0, got {total_time}"),
        ));
    }
    let n = (total_time / dt).ceil();
    if !n.is_finite() || n > MAX_SAMPLES as f64 {
        return Err(Error::invalid(
            "total_time",
            format!("total_time / dt must not exceed {MAX_SAMPLES} samples, got {total_time} / {dt}"),
        ));
    }
    Ok(n as usize)
}

/// Uniform time grid `0, dt, 2*dt, ...` covering the half-open span `[0, total_time)`.
pub fn time_grid(total_time: f64, dt: f64) -> Result<Vec<f64>> {
    let n = sample_count(total_time, dt)?;
    Ok((0..n).map(|i| i as f64 * dt).collect())
}

/// Trapezoidal velocity profile: linear ramp up, constant cruise, linear ramp down.
///
/// The ramp down uses the same slope as the ramp up and is not clamped at zero,
/// so grids running past the stop point go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityProfile {
    /// End of the ramp-up phase (s).
    pub ramp_end_s: f64,
    /// End of the cruise phase (s).
    pub cruise_end_s: f64,
    /// Cruise velocity (m/s).
    pub cruise_velocity: f64,
}

impl Default for VelocityProfile {
    fn default() -> Self {
        Self {
            ramp_end_s: 2.0,
            cruise_end_s: 8.0,
            cruise_velocity: 2.0,
        }
    }
}

impl VelocityProfile {
    pub fn validate(&self) -> Result<()> {
        if !self.ramp_end_s.is_finite() || self.ramp_end_s <= 0.0 {
            return Err(Error::invalid(
                "ramp_end_s",
                format!("must be finite and > 0, got {}", self.ramp_end_s),
            ));
        }
        if !self.cruise_end_s.is_finite() || self.cruise_end_s < self.ramp_end_s {
            return Err(Error::invalid(
                "cruise_end_s",
                format!(
                    "must be >= ramp_end_s ({}), got {}",
                    self.ramp_end_s, self.cruise_end_s
                ),
            ));
        }
        if !self.cruise_velocity.is_finite() {
            return Err(Error::invalid("cruise_velocity", "must be finite"));
        }
        Ok(())
    }

    /// Acceleration of both ramps (m/s²).
    pub fn slope(&self) -> f64 {
        self.cruise_velocity / self.ramp_end_s
    }

    pub fn velocity_at(&self, t: f64) -> f64 {
        if t < self.ramp_end_s {
            t * self.slope()
        } else if t < self.cruise_end_s {
            self.cruise_velocity
        } else {
            self.cruise_velocity - (t - self.cruise_end_s) * self.slope()
        }
    }

    pub fn sample(&self, time: &[f64]) -> Vec<f64> {
        time.iter().map(|&t| self.velocity_at(t)).collect()
    }
}
