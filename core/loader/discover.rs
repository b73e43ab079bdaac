use crate::aggregate::{FileKind, SEPARATOR};
use crate::error::{AppError, Result};
use log;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Recursively lists files under `root/dir` with a recognized extension.
///
/// Returned paths are relative to `root` and use `\` separators. Entries are visited
/// in file-name order so repeated runs over the same tree list files identically.
pub fn discover_sources(root: &Path, dir: &str) -> Result<Vec<String>> {
    let start = root.join(dir);
    if !start.is_dir() {
        return Err(AppError::ConfigSource(format!(
            "Source directory not found: {}",
            start.display()
        )));
    }
    log::debug!("Walking source directory: {}", start.display());

    let mut files = Vec::new();
    for entry in WalkDir::new(&start).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(relative) = pathdiff::diff_paths(entry.path(), root) else {
            log::warn!("Could not get relative path for: {}", entry.path().display());
            continue;
        };
        let relative = to_project_path(&relative);
        if FileKind::classify(&relative).is_some() {
            log::trace!("Discovered: {}", relative);
            files.push(relative);
        } else {
            log::trace!("Skipping non-source file: {}", relative);
        }
    }
    log::debug!("Discovered {} files under {}", files.len(), start.display());
    Ok(files)
}

fn to_project_path(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        let part = match component {
            Component::Normal(name) => name.to_string_lossy(),
            Component::ParentDir => "..".into(),
            _ => continue,
        };
        if !out.is_empty() {
            out.push(SEPARATOR);
        }
        out.push_str(&part);
    }
    out
}
