//! Analyzer configuration.
//!
//! Values are layered, later layers winning:
//!   1. built-in defaults
//!   2. a TOML file (`heatmaps.toml`, or the path in `HEATMAP_CONFIG`)
//!   3. environment variables, with `.env` loaded first
//!   4. command-line flags
//!
//! A missing `heatmaps.toml` is fine. A file named explicitly through
//! `HEATMAP_CONFIG` must exist and parse.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::analysis::thresholds::{HeatmapThresholds, DEFAULT_THRESHOLD_N, LOW_SCORE_CUTOFF};
use crate::cli::Cli;
use crate::logging::LogLevel;
use crate::model::{AnalysisError, DEFAULT_SCORE_COLUMN};

/// Config file read from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "heatmaps.toml";

/// Input CSV used when nothing else names one.
pub const DEFAULT_INPUT_FILE: &str = "./PMIS_2024_trimmed.csv";

// Environment variable names
pub const ENV_CONFIG: &str = "HEATMAP_CONFIG";
pub const ENV_FILE: &str = "HEATMAP_FILE";
pub const ENV_N: &str = "HEATMAP_N";
pub const ENV_SCORE_COLUMN: &str = "HEATMAP_SCORE_COLUMN";
pub const ENV_LOG_LEVEL: &str = "HEATMAP_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "HEATMAP_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// PMIS CSV export to analyze.
    pub file: PathBuf,
    /// Minimum valid points per heatmap (N).
    pub threshold_n: usize,
    /// Column holding the condition score.
    pub score_column: String,
    /// Scores strictly below this count as low.
    pub low_score_cutoff: f64,
    pub log_level: LogLevel,
    /// Append timestamped log entries here as well as to the console.
    pub log_file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_INPUT_FILE),
            threshold_n: DEFAULT_THRESHOLD_N,
            score_column: DEFAULT_SCORE_COLUMN.to_string(),
            low_score_cutoff: LOW_SCORE_CUTOFF,
            log_level: LogLevel::Info,
            log_file: None,
            console_timestamps: false,
        }
    }
}

impl AnalyzerConfig {
    /// Resolve the full configuration for a run.
    pub fn load(cli: &Cli) -> Result<Self, AnalysisError> {
        dotenv::dotenv().ok();
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    /// Layer file, environment, and flags over the defaults.
    ///
    /// `lookup` stands in for the process environment so tests do not
    /// have to mutate it.
    pub fn resolve<F>(cli: &Cli, lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(lookup)?;
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, AnalysisError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AnalysisError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, AnalysisError> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<(), AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(file) = lookup(ENV_FILE) {
            self.file = PathBuf::from(file);
        }
        if let Some(n) = lookup(ENV_N) {
            self.threshold_n = n.trim().parse().map_err(|_| {
                AnalysisError::Config(format!("{} must be a non-negative integer, got '{}'", ENV_N, n))
            })?;
        }
        if let Some(column) = lookup(ENV_SCORE_COLUMN) {
            self.score_column = column;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level
                .parse()
                .map_err(|e: String| AnalysisError::Config(format!("{}: {}", ENV_LOG_LEVEL, e)))?;
        }
        if let Some(log_file) = lookup(ENV_LOG_FILE) {
            self.log_file = Some(log_file);
        }
        Ok(())
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref file) = cli.file {
            self.file = file.clone();
        }
        if let Some(n) = cli.n {
            self.threshold_n = n;
        }
    }

    fn validate(&self) -> Result<(), AnalysisError> {
        if self.score_column.trim().is_empty() {
            return Err(AnalysisError::Config("score_column must not be empty".to_string()));
        }
        if !self.low_score_cutoff.is_finite() {
            return Err(AnalysisError::Config(format!(
                "low_score_cutoff must be finite, got {}",
                self.low_score_cutoff
            )));
        }
        Ok(())
    }

    /// The per-heatmap limits this configuration implies.
    pub fn thresholds(&self) -> HeatmapThresholds {
        HeatmapThresholds {
            low_score_cutoff: self.low_score_cutoff,
            min_valid_points: self.threshold_n,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn resolve_with(cli: &Cli, vars: &HashMap<String, String>) -> Result<AnalyzerConfig, AnalysisError> {
        AnalyzerConfig::resolve(cli, |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.file, PathBuf::from("./PMIS_2024_trimmed.csv"));
        assert_eq!(config.threshold_n, 5);
        assert_eq!(config.score_column, "TX_CONDITION_SCORE");
        assert_eq!(config.low_score_cutoff, 50.0);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_partial_toml_keeps_remaining_defaults() {
        let config = AnalyzerConfig::from_toml_str(
            r#"
            threshold_n = 8
            score_column = "TX_DISTRESS_SCORE"
            log_level = "debug"
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.threshold_n, 8);
        assert_eq!(config.score_column, "TX_DISTRESS_SCORE");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.file, PathBuf::from(DEFAULT_INPUT_FILE));
        assert_eq!(config.low_score_cutoff, LOW_SCORE_CUTOFF);
    }

    #[test]
    fn test_unknown_toml_keys_are_rejected() {
        let err = AnalyzerConfig::from_toml_str("threshold = 3").expect_err("typo'd key");
        assert!(matches!(err, AnalysisError::Config(_)));
    }

    #[test]
    fn test_bad_log_level_in_toml_is_rejected() {
        assert!(AnalyzerConfig::from_toml_str("log_level = \"loud\"").is_err());
    }

    #[test]
    fn test_explicit_config_file_must_exist() {
        let vars = env(&[(ENV_CONFIG, "/nonexistent/heatmaps.toml")]);
        let err = resolve_with(&Cli::default(), &vars).expect_err("named file is missing");
        assert!(err.to_string().contains("/nonexistent/heatmaps.toml"), "got: {}", err);
    }

    #[test]
    fn test_env_overrides_file_and_cli_overrides_env() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("heatmaps.toml");
        fs::write(&path, "threshold_n = 8\nfile = \"from_file.csv\"\n").expect("write config");

        let vars = env(&[
            (ENV_CONFIG, path.to_str().expect("utf-8 path")),
            (ENV_N, "9"),
            (ENV_SCORE_COLUMN, "TX_RIDE_SCORE"),
        ]);

        let config = resolve_with(&Cli::default(), &vars).expect("valid layers");
        assert_eq!(config.threshold_n, 9);
        assert_eq!(config.file, PathBuf::from("from_file.csv"));
        assert_eq!(config.score_column, "TX_RIDE_SCORE");

        let cli = Cli { file: Some(PathBuf::from("from_cli.csv")), n: Some(2) };
        let config = resolve_with(&cli, &vars).expect("valid layers");
        assert_eq!(config.threshold_n, 2);
        assert_eq!(config.file, PathBuf::from("from_cli.csv"));
    }

    #[test]
    fn test_non_numeric_env_n_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("heatmaps.toml");
        fs::write(&path, "").expect("write config");
        let vars = env(&[(ENV_CONFIG, path.to_str().expect("utf-8 path")), (ENV_N, "many")]);

        let err = resolve_with(&Cli::default(), &vars).expect_err("N must be numeric");
        assert!(err.to_string().contains(ENV_N));
    }

    #[test]
    fn test_empty_score_column_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("heatmaps.toml");
        fs::write(&path, "score_column = \"  \"\n").expect("write config");
        let vars = env(&[(ENV_CONFIG, path.to_str().expect("utf-8 path"))]);
        assert!(resolve_with(&Cli::default(), &vars).is_err());
    }

    #[test]
    fn test_thresholds_follow_config() {
        let config = AnalyzerConfig { threshold_n: 3, low_score_cutoff: 60.0, ..AnalyzerConfig::default() };
        assert_eq!(
            config.thresholds(),
            HeatmapThresholds { low_score_cutoff: 60.0, min_valid_points: 3 }
        );
    }
}
