use crate::error::{AppError, Result};
use serde::Serialize;

pub fn serialize_solution_to_json<T: Serialize>(solution: &T, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(solution).map_err(AppError::JsonSerialize)
    } else {
        serde_json::to_string(solution).map_err(AppError::JsonSerialize)
    }
}

pub fn serialize_solution_to_yaml<T: Serialize>(solution: &T) -> Result<String> {
    serde_yml::to_string(solution).map_err(AppError::YamlError)
}
