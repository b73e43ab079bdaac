use crate::cli_args::Cli;
use crate::commands::{detect_source, id_generator};
use crate::output;
use anyhow::{Context, Result};
use log;
use std::path::Path;
use vcxgen_core::{self as core, GenerateOptions, Settings};

pub fn handle_generate_command(path: &Path, cli: &Cli) -> Result<()> {
    let source = detect_source(path)?;
    let base_dir = source.base_dir();
    let settings = Settings::load(&base_dir, cli.settings.as_deref())
        .context("Failed to load generator settings")?;

    let mut ids = id_generator(cli.deterministic_ids);
    let solution = core::prepare(&source, ids.as_mut())
        .with_context(|| format!("Failed to load solution from {}", path.display()))?;

    let output_dir = cli.output_dir.clone().unwrap_or_else(|| base_dir.clone());
    log::info!("Writing solution files to {}", output_dir.display());
    let options = GenerateOptions {
        base_dir,
        output_dir,
        settings,
    };
    let report = core::generate(&solution, &options, ids.as_mut()).with_context(|| {
        format!(
            "Failed to write solution files to {}",
            options.output_dir.display()
        )
    })?;

    if !cli.quiet {
        output::print_generation_summary(&solution, &report);
    }
    Ok(())
}
