//! Sensor model: additive Gaussian noise and optional quantization.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Round `v` to the nearest multiple of `step`.
#[inline]
pub fn quantize(v: f64, step: f64) -> f64 {
    (v / step).round() * step
}

/// Parameters of the simulated velocity sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseModel {
    /// Standard deviation of the zero-mean Gaussian noise (m/s). `0` disables noise.
    pub std_dev: f64,
    /// Sensor resolution; readings are rounded to multiples of this step.
    pub quantization: Option<f64>,
    /// Fixed RNG seed for reproducible runs. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self {
            std_dev: 0.2,
            quantization: None,
            seed: None,
        }
    }
}

impl NoiseModel {
    pub fn validate(&self) -> Result<()> {
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(Error::invalid(
                "std_dev",
                format!("must be finite and >= 0, got {}", self.std_dev),
            ));
        }
        if let Some(q) = self.quantization {
            if !q.is_finite() || q <= 0.0 {
                return Err(Error::invalid(
                    "quantization",
                    format!("must be finite and > 0, got {q}"),
                ));
            }
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Produce a measured copy of `truth`, drawing one noise sample per element in order.
    pub fn apply(&self, truth: &[f64]) -> Result<Vec<f64>> {
        self.validate()?;
        let normal = Normal::new(0.0, self.std_dev)
            .map_err(|e| Error::invalid("std_dev", e.to_string()))?;
        let mut rng = self.rng();
        let measured = truth
            .iter()
            .map(|&v| {
                let noisy = v + normal.sample(&mut rng);
                match self.quantization {
                    Some(step) => quantize(noisy, step),
                    None => noisy,
                }
            })
            .collect();
        Ok(measured)
    }
}
