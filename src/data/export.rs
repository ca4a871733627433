use std::io::Write;
use std::path::Path;

use super::simulation::SimulationRun;
use crate::error::{Error, Result};

pub const CSV_HEADER: &str =
	"time_s,true_velocity,measured_velocity,true_position,estimated_position";

/// Write all series of `run` as CSV, one row per sample.
pub fn write_run_csv<W: Write>(mut w: W, run: &SimulationRun) -> Result<()> {
	writeln!(w, "{CSV_HEADER}")?;
	for i in 0..run.len() {
		writeln!(
			w,
			"{:.9},{},{},{},{}",
			run.time[i],
			run.true_velocity[i],
			run.measured_velocity[i],
			run.true_position[i],
			run.estimated_position[i]
		)?;
	}
	w.flush()?;
	Ok(())
}

pub fn save_run_csv<P: AsRef<Path>>(path: P, run: &SimulationRun) -> Result<()> {
	let path = path.as_ref();
	let f = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
	write_run_csv(std::io::BufWriter::new(f), run).map_err(|e| match e {
		Error::Write(e) => Error::io(path, e),
		other => other,
	})
}
