//! One batch run: truth, measurement and both integrals.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::integrate::{integrate, IntegrationRule};
use super::noise::NoiseModel;
use super::signal::{sample_count, time_grid, VelocityProfile};
use crate::error::Result;

/// Time base, velocity profile and integration convention of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sampling interval (s).
    pub dt: f64,
    /// Simulated duration (s); the grid covers `[0, total_time)`.
    pub total_time: f64,
    pub profile: VelocityProfile,
    pub rule: IntegrationRule,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            total_time: 10.0,
            profile: VelocityProfile::default(),
            rule: IntegrationRule::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        sample_count(self.total_time, self.dt)?;
        self.profile.validate()
    }
}

/// Every series produced by a run. All vectors share the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationRun {
    pub time: Vec<f64>,
    pub true_velocity: Vec<f64>,
    pub measured_velocity: Vec<f64>,
    pub true_position: Vec<f64>,
    pub estimated_position: Vec<f64>,
    pub dt: f64,
    pub rule: IntegrationRule,
}

/// Final values of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub true_distance: f64,
    pub estimated_distance: f64,
    /// `estimated_distance - true_distance`
    pub final_error: f64,
}

impl SimulationRun {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn summary(&self) -> RunSummary {
        let true_distance = self.true_position.last().copied().unwrap_or(0.0);
        let estimated_distance = self.estimated_position.last().copied().unwrap_or(0.0);
        RunSummary {
            true_distance,
            estimated_distance,
            final_error: estimated_distance - true_distance,
        }
    }

    /// Pointwise `estimated - true` position.
    pub fn position_error(&self) -> Vec<f64> {
        self.estimated_position
            .iter()
            .zip(&self.true_position)
            .map(|(est, truth)| est - truth)
            .collect()
    }

    /// Re-draw the measurement with another sensor model, keeping the reference series.
    pub fn with_fresh_noise(&self, noise: &NoiseModel) -> Result<SimulationRun> {
        let measured_velocity = noise.apply(&self.true_velocity)?;
        let estimated_position = integrate(&measured_velocity, self.dt, self.rule);
        Ok(SimulationRun {
            measured_velocity,
            estimated_position,
            ..self.clone()
        })
    }
}

/// Builds [`SimulationRun`]s from a configuration and a sensor model.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    pub config: SimulationConfig,
    pub noise: NoiseModel,
}

impl Simulation {
    pub fn new(config: SimulationConfig, noise: NoiseModel) -> Self {
        Self { config, noise }
    }

    pub fn run(&self) -> Result<SimulationRun> {
        self.config.validate()?;
        let cfg = &self.config;
        let time = time_grid(cfg.total_time, cfg.dt)?;
        let true_velocity = cfg.profile.sample(&time);
        let measured_velocity = self.noise.apply(&true_velocity)?;
        debug!(
            samples = time.len(),
            dt = cfg.dt,
            rule = %cfg.rule,
            std_dev = self.noise.std_dev,
            "integrating reference and measured velocity"
        );
        let true_position = integrate(&true_velocity, cfg.dt, cfg.rule);
        let estimated_position = integrate(&measured_velocity, cfg.dt, cfg.rule);
        Ok(SimulationRun {
            time,
            true_velocity,
            measured_velocity,
            true_position,
            estimated_position,
            dt: cfg.dt,
            rule: cfg.rule,
        })
    }
}
