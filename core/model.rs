use crate::aggregate::{FileSet, normalize_separators};
use crate::error::{AppError, Result};
use crate::ids::{IdGenerator, format_guid};
use indexmap::IndexSet;
use log;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub name: String,
    pub root_source_directory: String,
    pub projects: Vec<Project>,
    pub variants: Vec<SolutionVariant>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(serialize_with = "serialize_guid")]
    pub id: Uuid,
    pub kind: ProjectKind,
    pub variants: Vec<ProjectVariant>,
    #[serde(skip)]
    raw_files: IndexSet<String>,
    pub files: FileSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectKind {
    /// Build, clean and rebuild are delegated to external commands.
    #[default]
    Makefile,
    Application,
    StaticLibrary,
    DynamicLibrary,
}

impl ProjectKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "makefile" => Some(ProjectKind::Makefile),
            "application" => Some(ProjectKind::Application),
            "staticLibrary" => Some(ProjectKind::StaticLibrary),
            "dynamicLibrary" => Some(ProjectKind::DynamicLibrary),
            _ => None,
        }
    }

    /// `ConfigurationType` value in the project file.
    pub fn configuration_type(self) -> &'static str {
        match self {
            ProjectKind::Makefile => "Makefile",
            ProjectKind::Application => "Application",
            ProjectKind::StaticLibrary => "StaticLibrary",
            ProjectKind::DynamicLibrary => "DynamicLibrary",
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ProjectKind::Makefile => "MakeFileProj",
            _ => "Win32Proj",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeCommands {
    pub build: String,
    pub clean: String,
    pub rebuild: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectVariant {
    pub configuration: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<MakeCommands>,
    pub output: String,
    pub defines: Vec<String>,
    pub include_directories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub library_directories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compiler_options: Vec<String>,
    pub is_64_bit: bool,
    pub is_debug: bool,
}

impl ProjectVariant {
    /// `Configuration|Platform`, the identity key of a variant.
    pub fn key(&self) -> String {
        variant_key(&self.configuration, &self.platform)
    }

    pub fn condition(&self) -> String {
        format!("'$(Configuration)|$(Platform)'=='{}'", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionVariant {
    pub configuration: String,
    pub platform: String,
}

impl SolutionVariant {
    pub fn key(&self) -> String {
        variant_key(&self.configuration, &self.platform)
    }
}

impl fmt::Display for SolutionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.configuration, self.platform)
    }
}

fn variant_key(configuration: &str, platform: &str) -> String {
    format!("{}|{}", configuration, platform)
}

fn serialize_guid<S: Serializer>(id: &Uuid, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_guid(id))
}

impl Project {
    pub fn new(name: &str, kind: ProjectKind, ids: &mut dyn IdGenerator) -> Result<Self> {
        validate_project_name(name)?;
        let id = ids.next_id();
        log::debug!("New project '{}' ({})", name, format_guid(&id));
        Ok(Self {
            name: name.to_string(),
            id,
            kind,
            variants: Vec::new(),
            raw_files: IndexSet::new(),
            files: FileSet::default(),
        })
    }

    pub fn add_variant(&mut self, variant: ProjectVariant) -> Result<()> {
        if self.find_variant(&variant.configuration, &variant.platform).is_some() {
            return Err(AppError::DuplicateVariant {
                project: self.name.clone(),
                variant: variant.key(),
            });
        }
        log::trace!("Project '{}': variant {}", self.name, variant.key());
        self.variants.push(variant);
        Ok(())
    }

    pub fn find_variant(&self, configuration: &str, platform: &str) -> Option<&ProjectVariant> {
        self.variants
            .iter()
            .find(|v| v.configuration == configuration && v.platform == platform)
    }

    pub fn builds_variant(&self, variant: &SolutionVariant) -> bool {
        self.find_variant(&variant.configuration, &variant.platform)
            .is_some()
    }

    /// Records a candidate path; returns `false` if it was already present.
    pub fn add_raw_file(&mut self, path: &str) -> bool {
        self.raw_files.insert(normalize_separators(path))
    }

    pub fn raw_files(&self) -> impl Iterator<Item = &str> {
        self.raw_files.iter().map(String::as_str)
    }
}

fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidProject(
            "project name must not be empty".to_string(),
        ));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(AppError::InvalidProject(format!(
            "project name '{}' cannot be used as a directory name",
            name
        )));
    }
    Ok(())
}

impl Solution {
    pub fn new(name: &str, root_source_directory: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidProject(
                "solution name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            root_source_directory: root_source_directory.to_string(),
            projects: Vec::new(),
            variants: Vec::new(),
        })
    }

    /// Returns the project called `name`, creating it (and assigning its id) on first sight.
    pub fn project_entry(
        &mut self,
        name: &str,
        kind: ProjectKind,
        ids: &mut dyn IdGenerator,
    ) -> Result<&mut Project> {
        let index = match self.projects.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.projects.push(Project::new(name, kind, ids)?);
                self.projects.len() - 1
            }
        };
        Ok(&mut self.projects[index])
    }

    pub fn add_project(&mut self, project: Project) -> Result<()> {
        if self.projects.iter().any(|p| p.name == project.name) {
            return Err(AppError::DuplicateProject(project.name));
        }
        self.projects.push(project);
        Ok(())
    }

    /// Runs the aggregator over every project and derives the solution-wide variant list.
    pub fn aggregate(&mut self) {
        log::debug!("Aggregating files for {} projects...", self.projects.len());
        for project in &mut self.projects {
            project.files = FileSet::aggregate(project.raw_files.iter());
            log::debug!(
                "Project '{}': {} files, {} filters",
                project.name,
                project.files.file_count(),
                project.files.directories.len()
            );
        }
        self.variants = collect_solution_variants(&self.projects);
        log::debug!("Solution variants: {}", self.variants.len());
    }

    pub fn validate(&self) -> Result<()> {
        if self.projects.is_empty() {
            return Err(AppError::InvalidProject(format!(
                "solution '{}' declares no projects",
                self.name
            )));
        }
        if let Some(project) = self.projects.iter().find(|p| p.variants.is_empty()) {
            return Err(AppError::InvalidProject(format!(
                "project '{}' declares no configurations",
                project.name
            )));
        }
        Ok(())
    }
}

pub fn collect_solution_variants(projects: &[Project]) -> Vec<SolutionVariant> {
    let mut variants: IndexSet<SolutionVariant> = IndexSet::new();
    for variant in projects.iter().flat_map(|p| p.variants.iter()) {
        variants.insert(SolutionVariant {
            configuration: variant.configuration.clone(),
            platform: variant.platform.clone(),
        });
    }
    variants.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    fn variant(configuration: &str, platform: &str) -> ProjectVariant {
        ProjectVariant {
            configuration: configuration.to_string(),
            platform: platform.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_solution_variants_are_distinct_pairs_in_first_seen_order() {
        let mut ids = SequentialIds::new();
        let mut solution = Solution::new("Wave", "source").unwrap();

        let engine = solution
            .project_entry("engine", ProjectKind::Makefile, &mut ids)
            .unwrap();
        engine.add_variant(variant("Debug", "x64")).unwrap();
        engine.add_variant(variant("Release", "x64")).unwrap();

        let compiler = solution
            .project_entry("compiler", ProjectKind::Makefile, &mut ids)
            .unwrap();
        compiler.add_variant(variant("Release", "x64")).unwrap();
        compiler.add_variant(variant("Debug", "Win32")).unwrap();
        compiler.add_variant(variant("Debug", "x64")).unwrap();

        solution.aggregate();
        let keys: Vec<String> = solution.variants.iter().map(|v| v.key()).collect();
        assert_eq!(keys, vec!["Debug|x64", "Release|x64", "Debug|Win32"]);
    }

    #[test]
    fn test_duplicate_variant_is_rejected() {
        let mut ids = SequentialIds::new();
        let mut project = Project::new("engine", ProjectKind::Makefile, &mut ids).unwrap();
        project.add_variant(variant("Debug", "x64")).unwrap();
        let err = project.add_variant(variant("Debug", "x64")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateVariant { .. }));
    }

    #[test]
    fn test_project_entry_reuses_existing_project_and_id() {
        let mut ids = SequentialIds::new();
        let mut solution = Solution::new("Wave", "").unwrap();
        let first_id = solution
            .project_entry("engine", ProjectKind::Makefile, &mut ids)
            .unwrap()
            .id;
        let second_id = solution
            .project_entry("engine", ProjectKind::Makefile, &mut ids)
            .unwrap()
            .id;
        assert_eq!(first_id, second_id);
        assert_eq!(solution.projects.len(), 1);
        assert_eq!(ids.issued(), 1);
    }

    #[test]
    fn test_raw_files_deduplicate_on_normalized_path() {
        let mut ids = SequentialIds::new();
        let mut project = Project::new("engine", ProjectKind::Makefile, &mut ids).unwrap();
        assert!(project.add_raw_file("a/b.cpp"));
        assert!(!project.add_raw_file("a\\b.cpp"));
        assert_eq!(project.raw_files().collect::<Vec<_>>(), vec!["a\\b.cpp"]);
    }

    #[test]
    fn test_invalid_project_names() {
        let mut ids = SequentialIds::new();
        assert!(Project::new("", ProjectKind::Makefile, &mut ids).is_err());
        assert!(Project::new("a/b", ProjectKind::Makefile, &mut ids).is_err());
        assert!(Project::new("..", ProjectKind::Makefile, &mut ids).is_err());
    }

    #[test]
    fn test_condition_string() {
        let v = variant("Debug", "x64");
        assert_eq!(v.condition(), "'$(Configuration)|$(Platform)'=='Debug|x64'");
    }

    #[test]
    fn test_validate_requires_projects_and_variants() {
        let mut ids = SequentialIds::new();
        let mut solution = Solution::new("Wave", "").unwrap();
        assert!(solution.validate().is_err());
        solution
            .project_entry("engine", ProjectKind::Makefile, &mut ids)
            .unwrap();
        assert!(solution.validate().is_err());
        solution.projects[0]
            .add_variant(variant("Debug", "x64"))
            .unwrap();
        assert!(solution.validate().is_ok());
    }
}
