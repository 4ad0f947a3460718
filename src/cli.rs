use clap::Parser;
use std::path::PathBuf;

use crate::error::AnalyzeError;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "loadplot",
    version,
    about = "Analyze elapsed times from any number of load-test result tables (uses only the 'elapsed' column)"
)]
pub struct Cli {
    /// Input table files (CSV or Excel), 1..N, in desired display order
    #[arg(long, num_args = 1.., required = true)]
    pub files: Vec<PathBuf>,

    /// Dataset labels, one per input file, paired positionally with --files
    #[arg(long, num_args = 1.., required = true)]
    pub labels: Vec<String>,

    /// Output directory, created if absent
    #[arg(long, default_value = "analysis_out")]
    pub out: PathBuf,

    /// Trim plot data per label by percentile (summary table remains raw)
    #[arg(long)]
    pub trim_plots: bool,

    /// Lower percentile for plot trimming
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pct_low: f64,

    /// Upper percentile for plot trimming
    #[arg(long, default_value_t = 99.0, allow_negative_numbers = true)]
    pub pct_high: f64,

    /// Custom plot/summary title (e.g. "Northwind API benchmark (ms)")
    #[arg(long)]
    pub title: Option<String>,

    /// Wrap the title at N characters per line (0 = disable)
    #[arg(long, default_value_t = 0)]
    pub title_width: usize,

    /// Figure size in inches for plots, e.g. --fig-size 12 6
    #[arg(long, num_args = 2, value_names = ["W", "H"])]
    pub fig_size: Option<Vec<f64>>,
}

impl Cli {
    /// Pre-pipeline validation; failures map to exit code 2.
    pub fn validate(&self) -> Result<(), AnalyzeError> {
        if self.files.len() != self.labels.len() {
            return Err(AnalyzeError::Args(format!(
                "--files count ({}) must match --labels count ({})",
                self.files.len(),
                self.labels.len()
            )));
        }
        if !(0.0 <= self.pct_low && self.pct_low < self.pct_high && self.pct_high <= 100.0) {
            return Err(AnalyzeError::Args(
                "percentiles must satisfy 0.0 <= pct-low < pct-high <= 100.0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fig_size_pair(&self) -> Option<(f64, f64)> {
        self.fig_size.as_ref().map(|v| (v[0], v[1]))
    }
}
