pub mod clean;
pub mod completion;
pub mod generate;
pub mod plan;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use vcxgen_core::{ConfigSource, IdGenerator, RandomIds, SequentialIds};

/// Expands a leading `~` in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::tilde(raw);
    log::trace!("Expanded path '{}' to '{}'", raw, expanded);
    PathBuf::from(expanded.as_ref())
}

pub fn detect_source(path: &Path) -> Result<ConfigSource> {
    ConfigSource::detect(path)
        .with_context(|| format!("Failed to determine config source for {}", path.display()))
}

pub fn id_generator(deterministic: bool) -> Box<dyn IdGenerator> {
    if deterministic {
        log::debug!("Using sequential GUIDs");
        Box::new(SequentialIds::new())
    } else {
        Box::new(RandomIds)
    }
}
