use std::process::ExitCode;

use clap::Parser;

use pmis_heatmaps::analyzer;
use pmis_heatmaps::cli::Cli;
use pmis_heatmaps::config::AnalyzerConfig;
use pmis_heatmaps::logging::{self, Stage};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AnalyzerConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init_logger(
        config.log_level,
        config.log_file.as_deref(),
        config.console_timestamps,
    );
    logging::debug(Stage::Config, None, &format!("{:?}", config));

    match analyzer::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logging::error(Stage::System, None, &format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
