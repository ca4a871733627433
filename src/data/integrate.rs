//! Cumulative numerical integration of uniformly sampled rates.
//!
//! [`riemann_sum`] is the core transform: a left-to-right running total of
//! `sample * dt`. [`integrate`] dispatches on an [`IntegrationRule`] so the
//! alternative conventions can be compared against it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cumulative left-rectangle (forward Euler) integral of `samples`.
///
/// `out[i] = out[i - 1] + samples[i] * dt` with an implicit `out[-1] = 0`, so
/// `out[0] = samples[0] * dt`. The total is a single accumulator updated once
/// per element in order, which fixes the floating-point rounding behaviour.
/// Non-finite inputs are propagated as-is.
pub fn riemann_sum(samples: &[f64], dt: f64) -> Vec<f64> {
    samples
        .iter()
        .scan(0.0_f64, |area, &v| {
            *area += v * dt;
            Some(*area)
        })
        .collect()
}

/// Which accumulation convention to use for the cumulative integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationRule {
    /// Accumulate from the first sample: `out[0] = s[0] * dt`.
    #[default]
    LeftRectangle,
    /// Pin `out[0] = 0` and start accumulating at index 1.
    SeedZero,
    /// Trapezoidal rule on consecutive samples, `out[0] = 0`.
    Trapezoid,
}

impl IntegrationRule {
    pub const ALL: [IntegrationRule; 3] = [
        IntegrationRule::LeftRectangle,
        IntegrationRule::SeedZero,
        IntegrationRule::Trapezoid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IntegrationRule::LeftRectangle => "left-rectangle",
            IntegrationRule::SeedZero => "seed-zero",
            IntegrationRule::Trapezoid => "trapezoid",
        }
    }
}

impl fmt::Display for IntegrationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IntegrationRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "left-rectangle" | "riemann" => Ok(IntegrationRule::LeftRectangle),
            "seed-zero" | "seedzero" => Ok(IntegrationRule::SeedZero),
            "trapezoid" | "trapz" => Ok(IntegrationRule::Trapezoid),
            other => Err(format!(
                "unknown integration rule '{other}' (expected left, seed-zero or trapezoid)"
            )),
        }
    }
}

/// Integrate `samples` with the given rule. The output always has the same
/// length as the input.
pub fn integrate(samples: &[f64], dt: f64, rule: IntegrationRule) -> Vec<f64> {
    match rule {
        IntegrationRule::LeftRectangle => riemann_sum(samples, dt),
        IntegrationRule::SeedZero => {
            let mut out = Vec::with_capacity(samples.len());
            let mut area = 0.0_f64;
            for (i, &v) in samples.iter().enumerate() {
                if i > 0 {
                    area += v * dt;
                }
                out.push(area);
            }
            out
        }
        IntegrationRule::Trapezoid => {
            let mut out = Vec::with_capacity(samples.len());
            let mut area = 0.0_f64;
            let mut prev: Option<f64> = None;
            for &v in samples {
                if let Some(v0) = prev {
                    area += 0.5 * (v0 + v) * dt;
                }
                prev = Some(v);
                out.push(area);
            }
            out
        }
    }
}
