//! # Bootstrap Token CLI
//!
//! Operator tool for checking and converting cluster bootstrap tokens.

mod cli;
mod commands;
mod input;

use bootstrap_token::config::build_info;
use bootstrap_token::config::runtime::{CliPreferences, LogLevel};
use clap::Parser;
use log::{error, info, LevelFilter};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    let preferences = CliPreferences::from_env();

    init_logging(preferences.log_level.raised(args.verbose));
    info!(
        "bootstrap-token v{} ({})",
        env!("CARGO_PKG_VERSION"),
        build_info::source_info()
    );

    let options = output_options(&args, &preferences);
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match commands::execute(&args.command, &options, stdin, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("command failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(level: LogLevel) {
    let _ = env_logger::Builder::new()
        .filter_level(level_filter(level))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warning => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Either a flag or its environment preference enables a setting
fn output_options(args: &cli::Cli, preferences: &CliPreferences) -> commands::OutputOptions {
    commands::OutputOptions {
        json: args.json || preferences.json_output,
        reveal_secret: args.reveal || preferences.reveal_secret,
    }
}
