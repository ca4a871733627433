use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use driftplot::config::DemoConfig;
use driftplot::data::export::save_run_csv;
use driftplot::logging::{init_logging, LogConfig, LogLevel};
use driftplot::render::{save_png, save_svg};
use driftplot::{run_viewer, Error, IntegrationRule, Simulation, ViewerOptions};

#[derive(Parser, Debug)]
#[command(name = "driftplot")]
#[command(about = "Integrate a noisy velocity signal into position and plot the drift", long_about = None)]
struct Cli {
    /// JSON or YAML config file; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sampling interval in seconds
    #[arg(long)]
    dt: Option<f64>,

    /// Simulated duration in seconds
    #[arg(long)]
    total_time: Option<f64>,

    /// Standard deviation of the sensor noise (m/s)
    #[arg(long, value_name = "SIGMA")]
    noise: Option<f64>,

    /// Quantize sensor readings to multiples of this step (m/s)
    #[arg(long, value_name = "STEP")]
    quantization: Option<f64>,

    /// RNG seed for reproducible noise
    #[arg(long)]
    seed: Option<u64>,

    /// Integration rule: left, seed-zero or trapezoid
    #[arg(long)]
    rule: Option<IntegrationRule>,

    /// Write the figure as PNG
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,

    /// Write the figure as SVG
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Write all series as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Base font size of the plots in pixels
    #[arg(long, value_name = "PX")]
    font_size: Option<f32>,

    /// Do not open the interactive window
    #[arg(long, default_value_t = false)]
    no_window: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Print the effective configuration as JSON and exit
    #[arg(long, default_value_t = false)]
    dump_config: bool,
}

impl Cli {
    fn load_config(&self) -> driftplot::Result<DemoConfig> {
        let mut cfg = match &self.config {
            Some(path) => DemoConfig::load(path)?,
            None => DemoConfig::default(),
        };
        if let Some(dt) = self.dt {
            cfg.simulation.dt = dt;
        }
        if let Some(t) = self.total_time {
            cfg.simulation.total_time = t;
        }
        if let Some(rule) = self.rule {
            cfg.simulation.rule = rule;
        }
        if let Some(sigma) = self.noise {
            cfg.noise.std_dev = sigma;
        }
        if self.quantization.is_some() {
            cfg.noise.quantization = self.quantization;
        }
        if self.seed.is_some() {
            cfg.noise.seed = self.seed;
        }
        if let Some(size) = self.font_size {
            cfg.plot.font_size = size;
        }
        if self.png.is_some() {
            cfg.output.png = self.png.clone();
        }
        if self.svg.is_some() {
            cfg.output.svg = self.svg.clone();
        }
        if self.csv.is_some() {
            cfg.output.csv = self.csv.clone();
        }
        if self.no_window {
            cfg.output.show_window = false;
        }
        if let Some(level) = self.log_level {
            cfg.logging.level = level;
        }
        Ok(cfg)
    }
}

fn run(cfg: DemoConfig) -> driftplot::Result<()> {
    cfg.validate()?;

    let sim = Simulation::new(cfg.simulation.clone(), cfg.noise.clone());
    let run = sim.run()?;
    let summary = run.summary();
    println!("{summary}");
    info!(
        samples = run.len(),
        true_distance = summary.true_distance,
        estimated_distance = summary.estimated_distance,
        final_error = summary.final_error,
        "integration finished"
    );

    if let Some(path) = &cfg.output.csv {
        save_run_csv(path, &run)?;
        info!(path = %path.display(), "saved CSV");
    }
    if let Some(path) = &cfg.output.svg {
        save_svg(path, &run, &cfg.plot)?;
    }
    if let Some(path) = &cfg.output.png {
        save_png(path, &run, &cfg.plot)?;
    }

    if cfg.output.show_window {
        let opts = ViewerOptions {
            style: cfg.plot.clone(),
            noise: cfg.noise.clone(),
            ..Default::default()
        };
        run_viewer(run, opts).map_err(|e| Error::Render(e.to_string()))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let cfg = match cli.load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_logging(&LogConfig {
                level: cli.log_level.unwrap_or_default(),
                ..Default::default()
            });
            error!("failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&cfg.logging);

    if cli.dump_config {
        return match cfg.to_json() {
            Ok(txt) => {
                println!("{txt}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    match run(cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
