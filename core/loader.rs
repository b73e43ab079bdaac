use crate::error::{AppError, Result};
use crate::ids::IdGenerator;
use crate::model::Solution;
use log;
use std::path::{Path, PathBuf};

pub mod delimited;
pub mod discover;
pub mod manifest;

pub const SOLUTION_CONFIG_EXTENSION: &str = "vs_solution_config";
pub const PROJECT_CONFIG_EXTENSION: &str = "vs_project_config";
pub const MANIFEST_EXTENSION: &str = "xml";

/// Where a solution description comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A directory of `.vs_solution_config` / `.vs_project_config` records.
    Delimited { dir: PathBuf },
    /// A single XML manifest.
    Manifest { path: PathBuf },
}

impl ConfigSource {
    pub fn detect(path: &Path) -> Result<Self> {
        if path.is_dir() {
            log::debug!("Config source is a delimited directory: {}", path.display());
            return Ok(ConfigSource::Delimited {
                dir: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(AppError::InvalidArgument(format!(
                "Config path does not exist: {}",
                path.display()
            )));
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(SOLUTION_CONFIG_EXTENSION) => {
                let dir = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => PathBuf::from("."),
                };
                log::debug!("Config source is a delimited directory: {}", dir.display());
                Ok(ConfigSource::Delimited { dir })
            }
            Some(MANIFEST_EXTENSION) => {
                log::debug!("Config source is an XML manifest: {}", path.display());
                Ok(ConfigSource::Manifest {
                    path: path.to_path_buf(),
                })
            }
            _ => Err(AppError::InvalidArgument(format!(
                "Unrecognized config source '{}': expected a directory, a .{} file or a .{} manifest",
                path.display(),
                SOLUTION_CONFIG_EXTENSION,
                MANIFEST_EXTENSION
            ))),
        }
    }

    /// Directory that relative config paths resolve against; also the default output directory.
    pub fn base_dir(&self) -> PathBuf {
        match self {
            ConfigSource::Delimited { dir } => dir.clone(),
            ConfigSource::Manifest { path } => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }

    pub fn is_delimited(&self) -> bool {
        matches!(self, ConfigSource::Delimited { .. })
    }
}

pub fn load(source: &ConfigSource, ids: &mut dyn IdGenerator) -> Result<Solution> {
    let solution = match source {
        ConfigSource::Delimited { dir } => delimited::load_directory(dir, ids)?,
        ConfigSource::Manifest { path } => manifest::load_manifest(path, ids)?,
    };
    solution.validate()?;
    log::info!(
        "Loaded solution '{}' with {} projects",
        solution.name,
        solution.projects.len()
    );
    Ok(solution)
}
