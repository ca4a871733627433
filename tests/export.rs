use driftplot::data::export::*;
use driftplot::data::noise::NoiseModel;
use driftplot::data::simulation::{Simulation, SimulationConfig, SimulationRun};
use driftplot::Error;

fn small_run() -> SimulationRun {
    let cfg = SimulationConfig { total_time: 1.0, ..Default::default() };
    Simulation::new(cfg, NoiseModel { seed: Some(8), ..Default::default() })
        .run()
        .unwrap()
}

#[test]
fn writes_header_and_one_row_per_sample() {
    let run = small_run();
    let mut buf = Vec::new();
    write_run_csv(&mut buf, &run).unwrap();
    let s = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = s.trim().split('\n').collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), run.len() + 1);
    assert!(lines[1].starts_with("0.000000000,0,"));
}

#[test]
fn rows_parse_back_to_series() {
    let run = small_run();
    let mut buf = Vec::new();
    write_run_csv(&mut buf, &run).unwrap();
    let s = String::from_utf8(buf).unwrap();
    for (i, line) in s.lines().skip(1).enumerate() {
        let cols: Vec<f64> = line.split(',').map(|c| c.parse().unwrap()).collect();
        assert_eq!(cols.len(), 5);
        assert_eq!(cols[2], run.measured_velocity[i]);
        assert_eq!(cols[4], run.estimated_position[i]);
    }
}

#[test]
fn empty_run_writes_header_only() {
    let mut buf = Vec::new();
    write_run_csv(&mut buf, &SimulationRun::default()).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), format!("{CSV_HEADER}\n"));
}

#[test]
fn save_to_file() {
    let path = std::env::temp_dir().join(format!("driftplot_export_{}.csv", std::process::id()));
    let run = small_run();
    save_run_csv(&path, &run).unwrap();
    let txt = std::fs::read_to_string(&path).unwrap();
    assert_eq!(txt.lines().count(), run.len() + 1);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn save_to_missing_directory_fails() {
    let path = std::env::temp_dir().join("driftplot_no_such_dir").join("x").join("run.csv");
    assert!(save_run_csv(&path, &small_run()).is_err());
}

#[cfg(target_os = "linux")]
#[test]
fn write_failure_reports_path() {
    // /dev/full accepts the open but fails every write
    match save_run_csv("/dev/full", &small_run()) {
        Err(Error::Io { path, .. }) => assert_eq!(path, std::path::PathBuf::from("/dev/full")),
        other => panic!("expected Io error with path, got {other:?}"),
    }
}
