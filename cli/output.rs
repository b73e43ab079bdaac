use anyhow::{Context, Result};
use colored::*;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets::UTF8_FULL};
use std::io::{self, Write};
use std::path::Path;
use vcxgen_core::{CleanReport, GenerationReport, Solution, format_guid};

pub fn print_generation_summary(solution: &Solution, report: &GenerationReport) {
    println!(
        "{} Generated '{}' ({} projects, {} files): {}",
        "✅".green(),
        solution.name.cyan(),
        solution.projects.len(),
        report.file_count(),
        report.solution_file.display().to_string().blue()
    );
}

pub fn print_clean_summary(dir: &Path, report: &CleanReport) {
    println!(
        "{} Removed {} items from {}",
        "🧹".green(),
        report.removed.len(),
        dir.display().to_string().blue()
    );
    if report.failed > 0 {
        println!(
            "{} {} items could not be removed (run with -v for details)",
            "⚠️".yellow(),
            report.failed.to_string().yellow()
        );
    }
}

pub fn print_plan_table(solution: &Solution) -> Result<()> {
    println!();
    println!("{}", " Solution ".green().bold().underline());
    println!("{:<20} {}", "Name:".green(), solution.name.cyan());
    println!(
        "{:<20} {}",
        "Root:".green(),
        solution.root_source_directory.cyan()
    );
    let variants: Vec<String> = solution.variants.iter().map(|v| v.to_string()).collect();
    println!("{:<20} {}", "Variants:".green(), variants.join(", ").cyan());

    println!("\n{}", " Projects ".green().bold().underline());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Project").fg(Color::Green),
        Cell::new("Kind").fg(Color::Green),
        Cell::new("Variants").fg(Color::Green),
        Cell::new("Sources").fg(Color::Green),
        Cell::new("Headers").fg(Color::Green),
        Cell::new("Other").fg(Color::Green),
        Cell::new("Filters").fg(Color::Green),
        Cell::new("GUID").fg(Color::Green),
    ]);
    for project in &solution.projects {
        let files = &project.files;
        let other = files.inlines.len() + files.texts.len() + files.natvis.len();
        let variants: Vec<String> = project.variants.iter().map(|v| v.key()).collect();
        table.add_row(vec![
            Cell::new(&project.name).fg(Color::Cyan),
            Cell::new(project.kind.configuration_type()),
            Cell::new(variants.join("\n")),
            Cell::new(files.sources.len()).set_alignment(CellAlignment::Right),
            Cell::new(files.headers.len()).set_alignment(CellAlignment::Right),
            Cell::new(other).set_alignment(CellAlignment::Right),
            Cell::new(files.directories.len()).set_alignment(CellAlignment::Right),
            Cell::new(format_guid(&project.id)).fg(Color::DarkGrey),
        ]);
    }
    println!("{table}");
    println!();
    Ok(())
}

pub fn write_to_stdout(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write newline to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
