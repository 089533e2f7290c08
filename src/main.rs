//! State Machine Visualizer

use anyhow::Context;
use clap::error::ErrorKind;
use state_machine_viz::{Config, Error, VERSION, cli, init_logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match cli::parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let rendered = err.to_string();
            let reason = rendered.split("\n\n").next().unwrap_or_default().trim_end();
            eprintln!("{}", reason);
            eprintln!("{}", cli::usage());
            return ExitCode::from(1);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(usage_err) = err.downcast_ref::<Error>().filter(|e| e.is_usage()) {
                eprintln!("error: {}", usage_err);
                eprintln!("{}", cli::usage());
                return ExitCode::from(1);
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: cli::Cli) -> anyhow::Result<()> {
    let (config, config_path) =
        Config::load(args.config.as_ref()).context("failed to load configuration")?;

    init_logging(&config.logging.level);

    tracing::info!("State Machine Visualizer v{}", VERSION);
    tracing::debug!("Parsed arguments: {:?}", args);
    match &config_path {
        Some(path) => tracing::debug!("Loaded configuration from {:?}: {:?}", path, config),
        None => tracing::debug!("No config file found, using defaults"),
    }

    let output_file = args.output_file.clone();
    cli::execute(args, &config).with_context(|| {
        format!(
            "failed to visualize state machines into {}",
            output_file.display()
        )
    })?;

    Ok(())
}
