use driftplot::data::noise::*;

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 * 0.1).collect()
}

#[test]
fn same_seed_same_measurement() {
    let model = NoiseModel { seed: Some(42), ..Default::default() };
    let truth = ramp(200);
    assert_eq!(model.apply(&truth).unwrap(), model.apply(&truth).unwrap());
}

#[test]
fn different_seeds_differ() {
    let truth = ramp(200);
    let a = NoiseModel { seed: Some(1), ..Default::default() }.apply(&truth).unwrap();
    let b = NoiseModel { seed: Some(2), ..Default::default() }.apply(&truth).unwrap();
    assert_ne!(a, b);
}

#[test]
fn zero_std_dev_leaves_signal_untouched() {
    let truth = ramp(50);
    let model = NoiseModel { std_dev: 0.0, seed: Some(7), ..Default::default() };
    assert_eq!(model.apply(&truth).unwrap(), truth);
}

#[test]
fn noise_statistics_match_std_dev() {
    let truth = vec![0.0; 20_000];
    let model = NoiseModel { std_dev: 0.2, seed: Some(1234), ..Default::default() };
    let m = model.apply(&truth).unwrap();
    let n = m.len() as f64;
    let mean = m.iter().sum::<f64>() / n;
    let var = m.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    assert!(mean.abs() < 0.01, "mean {mean}");
    assert!((var.sqrt() - 0.2).abs() < 0.01, "std {}", var.sqrt());
}

#[test]
fn quantized_readings_are_multiples_of_step() {
    let model = NoiseModel { std_dev: 0.2, quantization: Some(0.25), seed: Some(9) };
    for v in model.apply(&ramp(100)).unwrap() {
        let k = v / 0.25;
        assert!((k - k.round()).abs() < 1e-9, "{v} is not a multiple of 0.25");
    }
}

#[test]
fn quantize_rounds_to_nearest() {
    assert_eq!(quantize(0.74, 0.5), 0.5);
    assert_eq!(quantize(0.76, 0.5), 1.0);
    assert_eq!(quantize(-0.3, 0.5), -0.5);
}

#[test]
fn output_has_input_length() {
    let model = NoiseModel { seed: Some(3), ..Default::default() };
    assert!(model.apply(&[]).unwrap().is_empty());
    assert_eq!(model.apply(&ramp(17)).unwrap().len(), 17);
}

#[test]
fn invalid_parameters_are_rejected() {
    assert!(NoiseModel { std_dev: -0.1, ..Default::default() }.apply(&[1.0]).is_err());
    assert!(NoiseModel { std_dev: f64::NAN, ..Default::default() }.validate().is_err());
    assert!(NoiseModel { quantization: Some(0.0), ..Default::default() }.validate().is_err());
    assert!(NoiseModel { quantization: Some(-1.0), ..Default::default() }.validate().is_err());
}
