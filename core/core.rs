pub mod aggregate;
pub mod clean;
pub mod error;
pub mod generate;
pub mod ids;
pub mod loader;
pub mod model;
pub mod output_formats;
pub mod settings;
pub mod writer;

pub use aggregate::{FileKind, FileSet};
pub use clean::{CleanReport, clean};
pub use error::{AppError, Result};
pub use generate::{GenerateOptions, GenerationReport, generate, prepare};
pub use ids::{IdGenerator, RandomIds, SequentialIds, format_guid};
pub use loader::ConfigSource;
pub use model::{MakeCommands, Project, ProjectKind, ProjectVariant, Solution, SolutionVariant};
pub use settings::Settings;
