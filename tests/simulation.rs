use driftplot::data::integrate::{riemann_sum, IntegrationRule};
use driftplot::data::noise::NoiseModel;
use driftplot::data::simulation::*;

fn seeded(seed: u64) -> Simulation {
    Simulation::new(
        SimulationConfig::default(),
        NoiseModel { seed: Some(seed), ..Default::default() },
    )
}

#[test]
fn default_run_has_one_hundred_samples() {
    let run = seeded(1).run().unwrap();
    assert_eq!(run.len(), 100);
    assert_eq!(run.true_velocity.len(), 100);
    assert_eq!(run.measured_velocity.len(), 100);
    assert_eq!(run.true_position.len(), 100);
    assert_eq!(run.estimated_position.len(), 100);
}

#[test]
fn positions_are_riemann_sums_of_velocities() {
    let run = seeded(5).run().unwrap();
    assert_eq!(run.true_position, riemann_sum(&run.true_velocity, 0.1));
    assert_eq!(run.estimated_position, riemann_sum(&run.measured_velocity, 0.1));
}

#[test]
fn noiseless_true_distance_matches_profile_area() {
    // left-rectangle sum of the default profile sampled on [0, 10) with dt = 0.1
    let sim = Simulation::new(
        SimulationConfig::default(),
        NoiseModel { std_dev: 0.0, ..Default::default() },
    );
    let s = sim.run().unwrap().summary();
    assert!((s.true_distance - 16.0).abs() < 1e-6, "{}", s.true_distance);
    assert_eq!(s.final_error, 0.0);
}

#[test]
fn summary_error_is_difference_of_final_positions() {
    let run = seeded(11).run().unwrap();
    let s = run.summary();
    assert_eq!(s.true_distance, *run.true_position.last().unwrap());
    assert_eq!(s.estimated_distance, *run.estimated_position.last().unwrap());
    assert_eq!(s.final_error, s.estimated_distance - s.true_distance);
    assert_eq!(*run.position_error().last().unwrap(), s.final_error);
}

#[test]
fn seeded_runs_are_reproducible() {
    assert_eq!(seeded(99).run().unwrap(), seeded(99).run().unwrap());
}

#[test]
fn fresh_noise_keeps_reference() {
    let run = seeded(1).run().unwrap();
    let other = run
        .with_fresh_noise(&NoiseModel { seed: Some(2), ..Default::default() })
        .unwrap();
    assert_eq!(other.true_velocity, run.true_velocity);
    assert_eq!(other.true_position, run.true_position);
    assert_ne!(other.measured_velocity, run.measured_velocity);
    assert_eq!(other.estimated_position, riemann_sum(&other.measured_velocity, run.dt));
}

#[test]
fn seed_zero_rule_starts_at_zero() {
    let cfg = SimulationConfig { rule: IntegrationRule::SeedZero, ..Default::default() };
    let run = Simulation::new(cfg, NoiseModel { seed: Some(4), ..Default::default() })
        .run()
        .unwrap();
    assert_eq!(run.true_position[0], 0.0);
    assert_eq!(run.estimated_position[0], 0.0);
}

#[test]
fn empty_run_summary_is_zero() {
    let cfg = SimulationConfig { total_time: 0.0, ..Default::default() };
    let run = Simulation::new(cfg, NoiseModel::default()).run().unwrap();
    assert!(run.is_empty());
    let s = run.summary();
    assert_eq!((s.true_distance, s.estimated_distance, s.final_error), (0.0, 0.0, 0.0));
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = SimulationConfig { dt: 0.0, ..Default::default() };
    assert!(Simulation::new(cfg, NoiseModel::default()).run().is_err());
}

#[test]
fn report_prints_three_lines() {
    let s = RunSummary { true_distance: 15.9, estimated_distance: 16.234, final_error: 0.334 };
    let text = s.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec![
        "True Distance:     15.90 m",
        "Calculated Dist:   16.23 m",
        "Final Error:       0.33 m",
    ]);
}
