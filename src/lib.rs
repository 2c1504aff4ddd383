//! Heatmap coverage analysis for Texas PMIS pavement condition exports.
//!
//! Rows are grouped by highway and county; each group is one heatmap. For
//! every heatmap the analyzer checks whether any cell scores below the
//! low-score cutoff and whether it has too few valid points to be drawn,
//! then reports how many heatmaps fall into each bucket.

pub mod analysis;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod report;
