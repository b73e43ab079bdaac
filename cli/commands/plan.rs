use crate::cli_args::Cli;
use crate::commands::{detect_source, id_generator};
use crate::output;
use anyhow::{Context, Result};
use std::path::Path;
use vcxgen_core::{self as core, output_formats};

pub fn handle_plan_command(path: &Path, cli: &Cli) -> Result<()> {
    let source = detect_source(path)?;
    let mut ids = id_generator(cli.deterministic_ids);
    let solution = core::prepare(&source, ids.as_mut())
        .with_context(|| format!("Failed to load solution from {}", path.display()))?;

    match cli.format_output.format.as_str() {
        "json" => {
            let content = output_formats::serialize_solution_to_json(
                &solution,
                !cli.format_output.json_minify,
            )?;
            output::write_to_stdout(&content)
        }
        "yaml" => {
            let content = output_formats::serialize_solution_to_yaml(&solution)?;
            output::write_to_stdout(&content)
        }
        _ => output::print_plan_table(&solution),
    }
}
