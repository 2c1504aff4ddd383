/// Core data types for the PMIS heatmap analyzer.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond small accessors and the error type.

use std::fmt;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// PMIS column holding the signed highway roadbed identifier.
pub const COL_HIGHWAY_ID: &str = "TX_SIGNED_HIGHWAY_RDBD_ID";

/// PMIS column holding the county name or number.
pub const COL_COUNTY: &str = "COUNTY";

/// Default PMIS column holding the condition score (0-100).
pub const DEFAULT_SCORE_COLUMN: &str = "TX_CONDITION_SCORE";

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A single row of the PMIS export, reduced to the fields the analysis uses.
///
/// Any field may be `None`: identifiers when the cell is empty or an NA
/// token, the score when the cell is missing or not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub highway_id: Option<String>,
    pub county: Option<String>,
    pub score: Option<f64>,
}

impl Record {
    /// The grouping key, or `None` if either identifier is missing.
    pub fn heatmap_key(&self) -> Option<HeatmapKey> {
        match (&self.highway_id, &self.county) {
            (Some(highway_id), Some(county)) => Some(HeatmapKey {
                highway_id: highway_id.clone(),
                county: county.clone(),
            }),
            _ => None,
        }
    }
}

/// Identifies one heatmap: every row sharing a highway and county.
///
/// Ordered highway first, then county, so grouped output iterates the
/// same way on every run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeatmapKey {
    pub highway_id: String,
    pub county: String,
}

impl fmt::Display for HeatmapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.highway_id, self.county)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when configuring, loading, or analyzing a PMIS export.
#[derive(Debug)]
pub enum AnalysisError {
    /// The input CSV does not exist.
    FileNotFound(String),
    /// A required column is absent from the header row.
    MissingColumn { column: String, available: Vec<String> },
    /// The CSV itself is malformed (ragged rows, bad UTF-8, ...).
    Csv(String),
    /// Any other I/O failure while reading input or writing logs.
    Io(String),
    /// A configuration file or environment value could not be used.
    Config(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::FileNotFound(path) => write!(f, "File not found at {}", path),
            AnalysisError::MissingColumn { column, available } => write!(
                f,
                "Missing column '{}' (found: {})",
                column,
                available.join(", ")
            ),
            AnalysisError::Csv(msg) => write!(f, "CSV error: {}", msg),
            AnalysisError::Io(msg) => write!(f, "I/O error: {}", msg),
            AnalysisError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        AnalysisError::Csv(err.to_string())
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for AnalysisError {
    fn from(err: toml::de::Error) -> Self {
        AnalysisError::Config(err.to_string())
    }
}
