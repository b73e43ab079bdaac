use crate::commands::detect_source;
use crate::output;
use anyhow::{Context, Result};
use log;
use std::path::Path;
use vcxgen_core as core;

pub fn handle_clean_command(path: &Path, output_dir: Option<&Path>, quiet: bool) -> Result<()> {
    let source = detect_source(path)?;
    let dir = output_dir.map_or_else(|| source.base_dir(), Path::to_path_buf);
    // The build system rewrites delimited records on every run.
    let remove_config_inputs = source.is_delimited();
    log::debug!(
        "Cleaning {} (config inputs: {})",
        dir.display(),
        remove_config_inputs
    );

    let report = core::clean(&dir, remove_config_inputs)
        .with_context(|| format!("Failed to clean {}", dir.display()))?;

    if !quiet {
        output::print_clean_summary(&dir, &report);
    }
    Ok(())
}
