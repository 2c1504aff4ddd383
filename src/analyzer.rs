//! The heatmap analysis pipeline: load → clean → group → check → report.

use crate::analysis::groupings::group_by_heatmap;
use crate::analysis::summary::{summarize, HeatmapSummary};
use crate::config::AnalyzerConfig;
use crate::ingest::pmis_csv::load_records;
use crate::logging::{self, Stage};
use crate::model::AnalysisError;
use crate::report;

/// Load, group, and check every heatmap in the configured export.
///
/// Progress is logged at info level. Nothing is printed to the report
/// until the whole analysis has succeeded.
pub fn analyze_heatmaps(config: &AnalyzerConfig) -> Result<HeatmapSummary, AnalysisError> {
    logging::info(
        Stage::Load,
        None,
        &format!("Loading data from {}...", config.file.display()),
    );
    let export = load_records(&config.file, &config.score_column)?;
    logging::log_load_summary(
        export.stats.total_rows,
        export.stats.missing_key_rows,
        export.stats.missing_scores,
    );

    logging::info(Stage::Group, None, "Grouping by Highway and County...");
    let heatmaps = group_by_heatmap(export.records);

    logging::info(
        Stage::Analyze,
        None,
        &format!("Analyzing {} heatmaps...", heatmaps.len()),
    );
    Ok(summarize(&heatmaps, &config.thresholds()))
}

/// Run the analysis and print the summary.
///
/// A missing input file is reported on stdout alongside the progress lines
/// and treated as a finished run, so the caller sees `Ok(())`. Every other failure is returned.
pub fn run(config: &AnalyzerConfig) -> Result<(), AnalysisError> {
    match analyze_heatmaps(config) {
        Ok(summary) => {
            report::print_summary(&summary);
            Ok(())
        }
        Err(err @ AnalysisError::FileNotFound(_)) => {
            report::print_load_failure(&err);
            logging::debug(Stage::Load, None, &err.to_string());
            Ok(())
        }
        Err(err) => Err(err),
    }
}
