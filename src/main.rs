// src/main.rs

use anyhow::Context;
use clap::Parser;
use gta_teams_notify::{env_lookup, execute, load_env_file, CommandLineInput, RunOutcome};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::path::Path;
use std::process::ExitCode;

/// Builds the logging configuration.
///
/// Console output goes to stderr so `--print` keeps stdout clean for the
/// payload. A file appender is added only when `--log-file` asks for one.
fn logging_config(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<Config> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{d(%Y-%m-%d %H:%M:%S)} - {l} - {m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let mut builder =
        Config::builder().appender(Appender::builder().build("console", Box::new(console_appender)));
    let mut root = Root::builder().appender("console");

    if let Some(path) = log_file {
        let file_appender = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
            )))
            .build(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;

        builder = builder.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        );
        root = root.appender("file");
    }

    builder
        .build(root.build(log_level))
        .context("invalid logging configuration")
}

/// Sets up logging configuration.
fn setup_logging(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let config = logging_config(verbose, log_file)?;
    log4rs::init_config(config).context("logger already initialized")?;
    if let Some(path) = log_file {
        log::debug!("Logging initialized. Log file: {}", path.display());
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("FATAL: {:#}", e);
        return ExitCode::FAILURE;
    }

    match load_env_file(cli.env_file.as_deref()) {
        Ok(Some(path)) => log::debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            log::error!("FATAL: {}", e);
            return ExitCode::FAILURE;
        }
    }

    match execute(&cli, env_lookup).await {
        Ok(RunOutcome::Sent { records }) => {
            log::debug!("Posted {} intervention(s) to Teams", records);
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Suppressed | RunOutcome::DryRun { .. }) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("FATAL [{}]: {}", e.stage(), e);
            ExitCode::FAILURE
        }
    }
}
