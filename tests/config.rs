use driftplot::config::*;
use driftplot::data::integrate::IntegrationRule;
use driftplot::logging::LogLevel;

#[test]
fn defaults_match_reference_demo() {
    let cfg = DemoConfig::default();
    assert_eq!(cfg.simulation.dt, 0.1);
    assert_eq!(cfg.simulation.total_time, 10.0);
    assert_eq!(cfg.simulation.rule, IntegrationRule::LeftRectangle);
    assert_eq!(cfg.noise.std_dev, 0.2);
    assert_eq!(cfg.noise.quantization, None);
    assert!(cfg.output.show_window);
    assert!(cfg.validate().is_ok());
}

#[test]
fn json_round_trip() {
    let mut cfg = DemoConfig::default();
    cfg.noise.seed = Some(17);
    cfg.noise.quantization = Some(0.05);
    cfg.plot.font_size = 18.0;
    let json = cfg.to_json().unwrap();
    assert_eq!(DemoConfig::from_json(&json).unwrap(), cfg);
}

#[test]
fn yaml_round_trip() {
    let mut cfg = DemoConfig::default();
    cfg.simulation.rule = IntegrationRule::Trapezoid;
    cfg.logging.level = LogLevel::Debug;
    let yaml = cfg.to_yaml().unwrap();
    assert_eq!(DemoConfig::from_yaml(&yaml).unwrap(), cfg);
}

#[test]
fn partial_file_fills_defaults() {
    let cfg = DemoConfig::from_yaml("simulation:\n  dt: 0.05\nnoise:\n  seed: 3\n").unwrap();
    assert_eq!(cfg.simulation.dt, 0.05);
    assert_eq!(cfg.simulation.total_time, 10.0);
    assert_eq!(cfg.noise.seed, Some(3));
    assert_eq!(cfg.noise.std_dev, 0.2);
    assert_eq!(cfg.plot.width_px, 1000);
}

#[test]
fn rule_is_kebab_case_in_files() {
    let cfg = DemoConfig::from_json(r#"{"simulation": {"rule": "seed-zero"}}"#).unwrap();
    assert_eq!(cfg.simulation.rule, IntegrationRule::SeedZero);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(DemoConfig::from_json("{ not json").is_err());
}

#[test]
fn validation_catches_bad_values() {
    let mut cfg = DemoConfig::default();
    cfg.plot.font_size = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = DemoConfig::default();
    cfg.plot.grid_alpha = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = DemoConfig::default();
    cfg.noise.std_dev = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = DemoConfig::default();
    cfg.simulation.dt = -0.1;
    assert!(cfg.validate().is_err());

    let mut cfg = DemoConfig::default();
    cfg.simulation.total_time = 1e300;
    cfg.simulation.dt = 1e-300;
    assert!(cfg.validate().is_err());

    for width in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let mut cfg = DemoConfig::default();
        cfg.plot.line_width = width;
        assert!(cfg.validate().is_err(), "line_width {width} accepted");
    }
}

#[test]
fn save_and_load_by_extension() {
    let dir = std::env::temp_dir();
    let id = std::process::id();
    let mut cfg = DemoConfig::default();
    cfg.noise.seed = Some(5);

    for ext in ["json", "yaml"] {
        let path = dir.join(format!("driftplot_cfg_{id}.{ext}"));
        cfg.save(&path).unwrap();
        assert_eq!(DemoConfig::load(&path).unwrap(), cfg);
        let _ = std::fs::remove_file(&path);
    }
}

#[test]
fn missing_file_reports_path() {
    let err = DemoConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("here.json"));
}
