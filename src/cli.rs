use clap::Parser;
use std::path::PathBuf;

/// Command-line flags. Both are optional so `heatmaps.toml` and the
/// environment can supply values; the documented defaults apply otherwise.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "pmis_heatmaps")]
#[command(about = "Analyze PMIS Heatmap Data", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to CSV file [default: ./PMIS_2024_trimmed.csv]
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Threshold for N (number of points) [default: 5]
    #[arg(long, value_name = "INT")]
    pub n: Option<usize>,
}
