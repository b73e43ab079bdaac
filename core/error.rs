use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("Settings Error: {0}")]
    Settings(String),

    #[error("TOML Parsing Error: {0}")]
    TomlParse(String),

    #[error("Config Format Error: '{path}' line {line}: {message}")]
    ConfigFormat {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Config Source Error: {0}")]
    ConfigSource(String),

    #[error("Manifest Error: '{path}': {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("Duplicate project '{0}'")]
    DuplicateProject(String),

    #[error("Project '{project}' declares variant '{variant}' more than once")]
    DuplicateVariant { project: String, variant: String },

    #[error("Invalid Project: {0}")]
    InvalidProject(String),

    #[error("JSON Serialization Error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("YAML Serialization Error: {0}")]
    YamlError(#[from] serde_yml::Error),

    #[error("XML Write Error: {0}")]
    XmlWrite(String),

    #[error("File Read Error: Path '{path}', Error: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Write Error: Path '{path}', Error: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory Creation Error: Path '{path}', Error: {source}")]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("WalkDir Error: {0}")]
    WalkDir(String),

    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),
}

impl From<walkdir::Error> for AppError {
    fn from(err: walkdir::Error) -> Self {
        AppError::WalkDir(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for AppError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        AppError::XmlWrite(format!("UTF-8 encoding error: {}", err))
    }
}
