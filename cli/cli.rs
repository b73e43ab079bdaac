mod cli_args;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use colored::*;
use log;
use std::process;

use cli_args::Cli;

fn main() {
    let cli_args = match Cli::try_parse() {
        Ok(cli_args) => cli_args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), usage_error_line(&e));
            process::exit(e.exit_code());
        }
    };

    setup_logging(cli_args.quiet, cli_args.verbose);
    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args) {
        Ok(_) => {
            log::info!("vcxgen finished successfully.");
            0
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            1
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

/// Clap's rendered error without the usage block, folded onto one line.
fn usage_error_line(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let message = rendered
        .lines()
        .take_while(|line| !line.trim().is_empty() && !line.starts_with("Usage:"))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    message
        .strip_prefix("error: ")
        .unwrap_or(&message)
        .to_string()
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        log::debug!("Printing completions for {}", shell);
        return commands::completion::handle_completion_command(shell);
    }

    let Some(path) = cli.path.as_deref() else {
        anyhow::bail!("A config path is required");
    };
    let path = commands::expand_path(path);

    if cli.clean {
        log::debug!("Executing clean...");
        commands::clean::handle_clean_command(&path, cli.output_dir.as_deref(), cli.quiet)
    } else if cli.plan {
        log::debug!("Executing plan...");
        commands::plan::handle_plan_command(&path, &cli)
    } else {
        log::debug!("Executing generate...");
        commands::generate::handle_generate_command(&path, &cli)
    }
}
