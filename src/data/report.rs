//! Console summary of a run.

use std::fmt;

use super::simulation::RunSummary;

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "True Distance:     {:.2} m", self.true_distance)?;
        writeln!(f, "Calculated Dist:   {:.2} m", self.estimated_distance)?;
        write!(f, "Final Error:       {:.2} m", self.final_error)
    }
}

impl RunSummary {
    /// Single-line variant used in the viewer header.
    pub fn one_line(&self) -> String {
        format!(
            "true {:.2} m  |  computed {:.2} m  |  error {:+.2} m",
            self.true_distance, self.estimated_distance, self.final_error
        )
    }
}
