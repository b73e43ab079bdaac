//! Best-effort removal of previously generated artifacts.

use crate::error::{AppError, Result};
use crate::generate::{PROJECT_EXTENSION, SOLUTION_EXTENSION};
use crate::loader::{PROJECT_CONFIG_EXTENSION, SOLUTION_CONFIG_EXTENSION};
use log;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IDE_STATE_DIR: &str = ".vs";
const BROWSE_DATABASE_SUFFIX: &str = ".VC.db";

#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    pub failed: usize,
}

/// Removes solutions, browse databases, the `.vs` directory and every project
/// directory `X` holding `X/X.vcxproj` directly inside `dir`. With
/// `remove_config_inputs`, the delimited config records go too.
///
/// Individual failures are logged and counted; only a missing `dir` is an error.
pub fn clean(dir: &Path, remove_config_inputs: bool) -> Result<CleanReport> {
    clean_with(dir, remove_config_inputs, |path, is_dir| {
        if is_dir {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    })
}

fn clean_with<F>(dir: &Path, remove_config_inputs: bool, mut remove: F) -> Result<CleanReport>
where
    F: FnMut(&Path, bool) -> io::Result<()>,
{
    if !dir.is_dir() {
        return Err(AppError::InvalidArgument(format!(
            "Directory to clean does not exist: {}",
            dir.display()
        )));
    }
    log::info!("Cleaning generated files in {}", dir.display());

    let mut report = CleanReport::default();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry during clean: {}", e);
                report.failed += 1;
                continue;
            }
        };
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();

        let is_dir = entry.file_type().is_dir();
        let generated = if is_dir {
            name == IDE_STATE_DIR || is_project_dir(path, &name)
        } else {
            is_generated_file(path, &name, remove_config_inputs)
        };
        let outcome = generated.then(|| remove(path, is_dir));

        match outcome {
            Some(Ok(())) => {
                log::debug!("Removed {}", path.display());
                report.removed.push(path.to_path_buf());
            }
            Some(Err(e)) => {
                log::warn!("Failed to remove {}: {}", path.display(), e);
                report.failed += 1;
            }
            None => log::trace!("Keeping {}", path.display()),
        }
    }

    log::info!(
        "Clean finished: {} removed, {} failed",
        report.removed.len(),
        report.failed
    );
    Ok(report)
}

fn is_project_dir(path: &Path, name: &str) -> bool {
    path.join(format!("{}.{}", name, PROJECT_EXTENSION)).is_file()
}

fn is_generated_file(path: &Path, name: &str, remove_config_inputs: bool) -> bool {
    if name.ends_with(BROWSE_DATABASE_SUFFIX) {
        return true;
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(SOLUTION_EXTENSION) => true,
        Some(SOLUTION_CONFIG_EXTENSION) | Some(PROJECT_CONFIG_EXTENSION) => remove_config_inputs,
        _ => false,
    }
}
