//! Reader for the line-oriented records a build system drops next to the solution:
//! one `.vs_solution_config` file and one `.vs_project_config` file per project variant.

use super::{PROJECT_CONFIG_EXTENSION, SOLUTION_CONFIG_EXTENSION};
use crate::error::{AppError, Result};
use crate::ids::IdGenerator;
use crate::model::{MakeCommands, ProjectKind, ProjectVariant, Solution};
use log;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const LIST_DELIMITER: char = ';';

pub fn load_directory(dir: &Path, ids: &mut dyn IdGenerator) -> Result<Solution> {
    let solution_files = files_with_extension(dir, SOLUTION_CONFIG_EXTENSION)?;
    let project_files = files_with_extension(dir, PROJECT_CONFIG_EXTENSION)?;

    if solution_files.len() != 1 {
        return Err(AppError::ConfigSource(format!(
            "Expected exactly one .{} file in '{}', found {}",
            SOLUTION_CONFIG_EXTENSION,
            dir.display(),
            solution_files.len()
        )));
    }

    let mut solution = read_solution_file(&solution_files[0])?;
    log::debug!(
        "Reading {} project config files from {}",
        project_files.len(),
        dir.display()
    );
    for project_file in &project_files {
        read_project_file(project_file, &mut solution, ids)?;
    }
    Ok(solution)
}

/// Regular files directly inside `dir` with the given extension, sorted by path.
pub(crate) fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(extension)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

struct RecordReader<'a> {
    path: &'a Path,
    lines: std::str::Lines<'a>,
    line_number: usize,
}

impl<'a> RecordReader<'a> {
    fn new(path: &'a Path, content: &'a str) -> Self {
        Self {
            path,
            lines: content.lines(),
            line_number: 0,
        }
    }

    fn next_field(&mut self, field: &str) -> Result<&'a str> {
        self.line_number += 1;
        self.lines.next().ok_or_else(|| AppError::ConfigFormat {
            path: self.path.to_path_buf(),
            line: self.line_number,
            message: format!("missing {}", field),
        })
    }

    fn next_required(&mut self, field: &str) -> Result<String> {
        let value = self.next_field(field)?.trim();
        if value.is_empty() {
            return Err(self.error(format!("{} must not be empty", field)));
        }
        Ok(value.to_string())
    }

    fn next_list(&mut self, field: &str) -> Result<Vec<String>> {
        Ok(split_list(self.next_field(field)?))
    }

    fn next_flag(&mut self, field: &str) -> Result<bool> {
        match self.next_field(field)?.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(self.error(format!("{} must be '1' or '0', found '{}'", field, other))),
        }
    }

    fn error(&self, message: String) -> AppError {
        AppError::ConfigFormat {
            path: self.path.to_path_buf(),
            line: self.line_number,
            message,
        }
    }
}

fn split_list(line: &str) -> Vec<String> {
    line.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_solution_file(path: &Path) -> Result<Solution> {
    log::debug!("Reading solution config: {}", path.display());
    let content = read_to_string(path)?;
    let mut reader = RecordReader::new(path, &content);
    let name = reader.next_field("solution name")?.trim();
    if name.is_empty() {
        return Err(reader.error("solution name is empty".to_string()));
    }
    let root = reader.next_field("root source directory")?.trim();
    Solution::new(name, root)
}

fn read_project_file(path: &Path, solution: &mut Solution, ids: &mut dyn IdGenerator) -> Result<()> {
    log::debug!("Reading project config: {}", path.display());
    let content = read_to_string(path)?;
    let mut reader = RecordReader::new(path, &content);

    let name = reader.next_field("project name")?.trim();
    if name.is_empty() {
        return Err(reader.error("project name is empty".to_string()));
    }
    let configuration = reader.next_required("configuration")?;
    let platform = reader.next_required("platform")?;
    let build = reader.next_field("build command")?.to_string();
    let clean = reader.next_field("clean command")?.to_string();
    let rebuild = reader.next_field("rebuild command")?.to_string();
    let output = reader.next_field("output")?.trim().to_string();
    let defines = reader.next_list("defines")?;
    let sources = reader.next_list("source files")?;
    let include_directories = reader.next_list("include directories")?;
    let is_64_bit = reader.next_flag("64-bit flag")?;
    let is_debug = reader.next_flag("debug flag")?;

    let variant = ProjectVariant {
        configuration,
        platform,
        commands: Some(MakeCommands {
            build,
            clean,
            rebuild,
        }),
        output,
        defines,
        include_directories,
        is_64_bit,
        is_debug,
        ..Default::default()
    };

    let project = solution.project_entry(name, ProjectKind::Makefile, ids)?;
    let mut added = 0usize;
    for source in &sources {
        if project.add_raw_file(source) {
            added += 1;
        }
    }
    log::trace!(
        "Project '{}' {}: {} of {} source paths were new",
        project.name,
        variant.key(),
        added,
        sources.len()
    );
    project.add_variant(variant)
}
