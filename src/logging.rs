/// Structured logging for the heatmap analyzer
///
/// Provides stage-tagged logging with timestamps and severity levels.
/// Console output stays plain by default so progress lines read like the
/// report itself; an optional log file receives fully timestamped entries.

use chrono::Utc;
use serde::Deserialize;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Pipeline Stages
// ---------------------------------------------------------------------------

/// Which step of the pipeline a message comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Config,
    Load,
    Group,
    Analyze,
    System,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Config => write!(f, "CONFIG"),
            Stage::Load => write!(f, "LOAD"),
            Stage::Group => write!(f, "GROUP"),
            Stage::Analyze => write!(f, "ANALYZE"),
            Stage::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn format_entry(level: LogLevel, stage: &Stage, context: Option<&str>, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let context_part = context.map(|c| format!(" [{}]", c)).unwrap_or_default();
        format!("{} {} {}{}: {}", timestamp, level, stage, context_part, message)
    }

    fn log(&self, level: LogLevel, stage: &Stage, context: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let log_entry = Self::format_entry(level, stage, context, message);
        let context_part = context.map(|c| format!(" [{}]", c)).unwrap_or_default();

        // Console output
        if self.console_timestamps {
            match level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
                LogLevel::Info | LogLevel::Debug => println!("{}", log_entry),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("{}", message),
                LogLevel::Warning => eprintln!("⚠ {}{}: {}", stage, context_part, message),
                LogLevel::Info => println!("{}", message),
                LogLevel::Debug => println!("[DEBUG] {}{}: {}", stage, context_part, message),
            }
        }

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn dispatch(level: LogLevel, stage: Stage, context: Option<&str>, message: &str) {
    if let Ok(slot) = LOGGER.lock() {
        if let Some(logger) = slot.as_ref() {
            logger.log(level, &stage, context, message);
        }
    }
}

/// Log a general informational message
pub fn info(stage: Stage, context: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, stage, context, message);
}

/// Log a warning message
pub fn warn(stage: Stage, context: Option<&str>, message: &str) {
    dispatch(LogLevel::Warning, stage, context, message);
}

/// Log an error message
pub fn error(stage: Stage, context: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, stage, context, message);
}

/// Log a debug message
pub fn debug(stage: Stage, context: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, stage, context, message);
}

// ---------------------------------------------------------------------------
// Load Summary Logging
// ---------------------------------------------------------------------------

/// Log how many rows survived loading.
///
/// Dropped or scoreless rows are normal in PMIS exports, so they only raise
/// the level to a warning when nothing usable remains.
pub fn log_load_summary(total_rows: usize, dropped_rows: usize, missing_scores: usize) {
    let kept = total_rows.saturating_sub(dropped_rows);
    let message = format!(
        "Loaded {} rows: {} kept, {} missing highway/county, {} without a numeric score",
        total_rows, kept, dropped_rows, missing_scores
    );

    if total_rows > 0 && kept == 0 {
        warn(Stage::Load, None, &message);
    } else {
        debug(Stage::Load, None, &message);
    }
}
