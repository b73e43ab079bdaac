use crate::aggregate::{SEPARATOR, normalize_separators};
use crate::error::{AppError, Result};
use crate::ids::IdGenerator;
use crate::loader::{self, ConfigSource};
use crate::model::Solution;
use crate::settings::Settings;
use crate::writer::{is_rooted, render_filters, render_project, render_solution};
use log;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const SOLUTION_EXTENSION: &str = "sln";
pub const PROJECT_EXTENSION: &str = "vcxproj";
pub const FILTERS_EXTENSION: &str = "vcxproj.filters";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory the config source's relative root is resolved against.
    pub base_dir: PathBuf,
    pub output_dir: PathBuf,
    pub settings: Settings,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub solution_file: PathBuf,
    pub project_files: Vec<PathBuf>,
    /// Root source directory as written into project files.
    pub root_reference: String,
}

impl GenerationReport {
    pub fn file_count(&self) -> usize {
        self.project_files.len() + 1
    }
}

/// Loads a config source and runs the aggregator over every project.
pub fn prepare(source: &ConfigSource, ids: &mut dyn IdGenerator) -> Result<Solution> {
    let mut solution = loader::load(source, ids)?;
    solution.aggregate();
    Ok(solution)
}

/// Writes `<name>.sln` and, per project, `<project>/<project>.vcxproj(.filters)`.
/// Filter identifiers are drawn from `ids` in project order.
pub fn generate(
    solution: &Solution,
    options: &GenerateOptions,
    ids: &mut dyn IdGenerator,
) -> Result<GenerationReport> {
    let out = &options.output_dir;
    create_dir(out)?;

    let root_reference = rebase_root(
        &solution.root_source_directory,
        &options.base_dir,
        out,
    )?;
    if root_reference != solution.root_source_directory {
        log::info!(
            "Root source directory '{}' rebased to '{}' for output directory {}",
            solution.root_source_directory,
            root_reference,
            out.display()
        );
    }

    let solution_file = out.join(format!("{}.{}", solution.name, SOLUTION_EXTENSION));
    write_file(
        &solution_file,
        &render_solution(solution, &options.settings.solution),
    )?;

    let mut project_files = Vec::with_capacity(solution.projects.len() * 2);
    for project in &solution.projects {
        let project_dir = out.join(&project.name);
        create_dir(&project_dir)?;

        let project_file = project_dir.join(format!("{}.{}", project.name, PROJECT_EXTENSION));
        let content = render_project(project, &root_reference, &options.settings.project)?;
        write_file(&project_file, &content)?;
        project_files.push(project_file);

        let filters_file = project_dir.join(format!("{}.{}", project.name, FILTERS_EXTENSION));
        let content = render_filters(project, &root_reference, &options.settings.project, ids)?;
        write_file(&filters_file, &content)?;
        project_files.push(filters_file);
    }

    log::info!(
        "Generated solution '{}' with {} projects in {}",
        solution.name,
        solution.projects.len(),
        out.display()
    );
    Ok(GenerationReport {
        solution_file,
        project_files,
        root_reference,
    })
}

/// Re-expresses a relative root so it resolves the same way from `output_dir`
/// as it did from `base_dir`. Rooted or unchanged-location roots pass through.
fn rebase_root(root: &str, base_dir: &Path, output_dir: &Path) -> Result<String> {
    let root = normalize_separators(root);
    if is_rooted(&root) {
        return Ok(root);
    }
    let base = canonical(base_dir)?;
    let out = canonical(output_dir)?;
    if base == out {
        return Ok(root);
    }

    let target = root
        .split(SEPARATOR)
        .filter(|part| !part.is_empty() && *part != ".")
        .fold(base, |mut path, part| {
            if part == ".." {
                path.pop();
            } else {
                path.push(part);
            }
            path
        });
    let relative = pathdiff::diff_paths(&target, &out).ok_or_else(|| {
        AppError::InvalidArgument(format!(
            "Cannot express '{}' relative to output directory '{}'",
            target.display(),
            out.display()
        ))
    })?;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    Ok(parts.join(&SEPARATOR.to_string()))
}

fn canonical(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| AppError::DirCreation {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    log::debug!("Writing {}", path.display());
    fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
