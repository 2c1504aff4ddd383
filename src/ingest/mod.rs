/// Input readers for the heatmap analyzer.
///
/// Submodules:
/// - `pmis_csv` — reads a PMIS condition export into typed `Record`s.

pub mod pmis_csv;
