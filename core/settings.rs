use crate::error::{AppError, Result};
use log;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SETTINGS_FILENAME: &str = "vcxgen.toml";

/// Template constants for the generated files, optionally overridden by `vcxgen.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub solution: SolutionSettings,
    #[serde(default)]
    pub project: ProjectSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SolutionSettings {
    #[serde(default = "default_format_version")]
    pub format_version: String,
    #[serde(default = "default_visual_studio_version")]
    pub visual_studio_version: String,
    #[serde(default = "default_minimum_visual_studio_version")]
    pub minimum_visual_studio_version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectSettings {
    #[serde(default = "default_tools_version")]
    pub tools_version: String,
    #[serde(default = "default_filters_tools_version")]
    pub filters_tools_version: String,
    #[serde(default = "default_platform_toolset")]
    pub platform_toolset: String,
    #[serde(default = "default_character_set")]
    pub character_set: String,
    #[serde(default = "default_warning_level")]
    pub warning_level: String,
    #[serde(default = "default_defines")]
    pub default_defines: Vec<String>,
    #[serde(default = "default_include_directories")]
    pub default_include_directories: Vec<String>,
}

fn default_format_version() -> String {
    "12.00".to_string()
}
fn default_visual_studio_version() -> String {
    "14.0.24720.0".to_string()
}
fn default_minimum_visual_studio_version() -> String {
    "10.0.40219.1".to_string()
}
fn default_tools_version() -> String {
    "14.0".to_string()
}
fn default_filters_tools_version() -> String {
    "4.0".to_string()
}
fn default_platform_toolset() -> String {
    "v140".to_string()
}
fn default_character_set() -> String {
    "MultiByte".to_string()
}
fn default_warning_level() -> String {
    "Level3".to_string()
}
fn default_defines() -> Vec<String> {
    vec!["$(NMakePreprocessorDefinitions)".to_string()]
}
fn default_include_directories() -> Vec<String> {
    vec!["$(NMakeIncludeSearchPath)".to_string()]
}

impl Default for SolutionSettings {
    fn default() -> Self {
        Self {
            format_version: default_format_version(),
            visual_studio_version: default_visual_studio_version(),
            minimum_visual_studio_version: default_minimum_visual_studio_version(),
        }
    }
}
impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            tools_version: default_tools_version(),
            filters_tools_version: default_filters_tools_version(),
            platform_toolset: default_platform_toolset(),
            character_set: default_character_set(),
            warning_level: default_warning_level(),
            default_defines: default_defines(),
            default_include_directories: default_include_directories(),
        }
    }
}

impl Settings {
    pub fn resolve_path(base_dir: &Path, cli_settings: Option<&Path>) -> Result<Option<PathBuf>> {
        match cli_settings {
            Some(path) => {
                if !path.is_file() {
                    return Err(AppError::Settings(format!(
                        "Specified settings file not found at path: {}",
                        path.display()
                    )));
                }
                log::debug!("Using specified settings file: {}", path.display());
                Ok(Some(path.to_path_buf()))
            }
            None => {
                let default_path = base_dir.join(DEFAULT_SETTINGS_FILENAME);
                if default_path.is_file() {
                    log::debug!("Using settings file next to config: {}", default_path.display());
                    Ok(Some(default_path))
                } else {
                    log::debug!(
                        "No settings file at {}, using built-in defaults",
                        default_path.display()
                    );
                    Ok(None)
                }
            }
        }
    }

    pub fn load_from_path(settings_path: &Path) -> Result<Self> {
        log::info!("Loading settings from: {}", settings_path.display());
        let toml_content = fs::read_to_string(settings_path).map_err(|e| AppError::FileRead {
            path: settings_path.to_path_buf(),
            source: e,
        })?;
        toml::from_str::<Settings>(&toml_content).map_err(|e| {
            AppError::TomlParse(format!(
                "Error parsing settings file '{}': {}. Check TOML syntax and structure.",
                settings_path.display(),
                e
            ))
        })
    }

    pub fn load(base_dir: &Path, cli_settings: Option<&Path>) -> Result<Self> {
        match Self::resolve_path(base_dir, cli_settings)? {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[project]
platform_toolset = "v143"
"#,
        )
        .unwrap();
        assert_eq!(settings.project.platform_toolset, "v143");
        assert_eq!(settings.project.tools_version, "14.0");
        assert_eq!(settings.solution, SolutionSettings::default());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = toml::from_str::<Settings>("[project]\ntoolset = \"v143\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_cli_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Settings::resolve_path(dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, AppError::Settings(_)));
    }

    #[test]
    fn test_default_settings_file_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::resolve_path(dir.path(), None).unwrap(), None);

        fs::write(
            dir.path().join(DEFAULT_SETTINGS_FILENAME),
            "[solution]\nformat_version = \"12.00\"\nvisual_studio_version = \"17.0\"\n",
        )
        .unwrap();
        let settings = Settings::load(dir.path(), None).unwrap();
        assert_eq!(settings.solution.visual_studio_version, "17.0");
        assert_eq!(
            settings.project.default_defines,
            vec!["$(NMakePreprocessorDefinitions)"]
        );
    }
}
