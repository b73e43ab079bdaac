//! Reader for the XML manifest form of a solution description.
//!
//! ```xml
//! <solution name="Wave" root="source">
//!   <project name="engine" type="makefile">
//!     <variant configuration="Debug" platform="x64" debug="true" x64="true">
//!       <build>scons debug</build>
//!       <define>DEBUG</define>
//!     </variant>
//!     <sourceDirectory>engine</sourceDirectory>
//!     <file>common/common.h</file>
//!   </project>
//! </solution>
//! ```

use super::discover::discover_sources;
use crate::error::{AppError, Result};
use crate::ids::IdGenerator;
use crate::model::{MakeCommands, Project, ProjectKind, ProjectVariant, Solution};
use log;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename = "solution")]
struct ManifestSolution {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@root")]
    root: String,
    #[serde(rename = "project", default)]
    projects: Vec<ManifestProject>,
}

#[derive(Debug, Deserialize)]
struct ManifestProject {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@type", default)]
    kind: Option<String>,
    #[serde(rename = "variant", default)]
    variants: Vec<ManifestVariant>,
    #[serde(rename = "sourceDirectory", default)]
    source_directories: Vec<String>,
    #[serde(rename = "file", default)]
    files: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestVariant {
    #[serde(rename = "@configuration")]
    configuration: String,
    #[serde(rename = "@platform")]
    platform: String,
    #[serde(rename = "@debug", default)]
    debug: bool,
    #[serde(rename = "@x64", default)]
    x64: bool,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    build: Option<String>,
    #[serde(default)]
    clean: Option<String>,
    #[serde(default)]
    rebuild: Option<String>,
    #[serde(rename = "define", default)]
    defines: Vec<String>,
    #[serde(rename = "include", default)]
    include_directories: Vec<String>,
    #[serde(rename = "library", default)]
    libraries: Vec<String>,
    #[serde(rename = "libraryDirectory", default)]
    library_directories: Vec<String>,
    #[serde(rename = "option", default)]
    compiler_options: Vec<String>,
}

pub fn load_manifest(path: &Path, ids: &mut dyn IdGenerator) -> Result<Solution> {
    log::debug!("Reading manifest: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_manifest(&content, path, base_dir, ids)
}

/// Parses manifest text; `base_dir` is where the `root` attribute is resolved for directory walks.
pub fn parse_manifest(
    content: &str,
    path: &Path,
    base_dir: &Path,
    ids: &mut dyn IdGenerator,
) -> Result<Solution> {
    let manifest: ManifestSolution =
        quick_xml::de::from_str(content).map_err(|e| AppError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut solution = Solution::new(manifest.name.trim(), manifest.root.trim())?;
    let walk_root = base_dir.join(&solution.root_source_directory);

    for declared in manifest.projects {
        let kind = match declared.kind.as_deref().map(str::trim) {
            None | Some("") => ProjectKind::default(),
            Some(value) => ProjectKind::parse(value).ok_or_else(|| AppError::Manifest {
                path: path.to_path_buf(),
                message: format!(
                    "project '{}' has unknown type '{}' (expected makefile, application, staticLibrary or dynamicLibrary)",
                    declared.name, value
                ),
            })?,
        };

        let mut project = Project::new(declared.name.trim(), kind, ids)?;
        for variant in declared.variants {
            let variant = convert_variant(variant, &project.name, kind, path)?;
            project.add_variant(variant)?;
        }

        for file in &declared.files {
            project.add_raw_file(file.trim());
        }
        for dir in &declared.source_directories {
            for file in discover_sources(&walk_root, dir.trim())? {
                project.add_raw_file(&file);
            }
        }
        log::debug!(
            "Manifest project '{}': {} variants, {} candidate files",
            project.name,
            project.variants.len(),
            project.raw_files().count()
        );
        solution.add_project(project)?;
    }

    Ok(solution)
}

fn convert_variant(
    variant: ManifestVariant,
    project: &str,
    kind: ProjectKind,
    path: &Path,
) -> Result<ProjectVariant> {
    let configuration = variant.configuration.trim().to_string();
    let platform = variant.platform.trim().to_string();
    if configuration.is_empty() || platform.is_empty() {
        return Err(AppError::Manifest {
            path: path.to_path_buf(),
            message: format!(
                "project '{}' has a variant with an empty configuration or platform",
                project
            ),
        });
    }

    let commands = match kind {
        ProjectKind::Makefile => {
            let build = variant.build.ok_or_else(|| AppError::Manifest {
                path: path.to_path_buf(),
                message: format!(
                    "makefile project '{}' variant '{}|{}' has no <build> command",
                    project, configuration, platform
                ),
            })?;
            Some(MakeCommands {
                rebuild: variant.rebuild.unwrap_or_else(|| build.clone()),
                clean: variant.clean.unwrap_or_default(),
                build,
            })
        }
        _ => None,
    };

    Ok(ProjectVariant {
        configuration,
        platform,
        commands,
        output: variant.output.unwrap_or_default(),
        defines: variant.defines,
        include_directories: variant.include_directories,
        libraries: variant.libraries,
        library_directories: variant.library_directories,
        compiler_options: variant.compiler_options,
        is_64_bit: variant.x64,
        is_debug: variant.debug,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    fn parse(content: &str, base_dir: &Path) -> Result<Solution> {
        let mut ids = SequentialIds::new();
        parse_manifest(content, Path::new("test.xml"), base_dir, &mut ids)
    }

    #[test]
    fn test_parses_interleaved_variant_elements() {
        let xml = r#"
<solution name="Wave" root=".">
  <project name="compiler" type="application">
    <variant configuration="Debug" platform="x64" debug="true" x64="true">
      <define>DEBUG</define>
      <include>source</include>
      <define>WAVE_COMPILER</define>
      <library>winmm.lib</library>
      <option>/arch:AVX2</option>
      <output>bin</output>
    </variant>
    <variant configuration="Release" platform="x64" x64="true"/>
    <file>compiler/lexer.cpp</file>
    <file>compiler/lexer.h</file>
  </project>
</solution>"#;
        let dir = tempfile::tempdir().unwrap();
        let solution = parse(xml, dir.path()).unwrap();
        assert_eq!(solution.name, "Wave");
        let project = &solution.projects[0];
        assert_eq!(project.kind, ProjectKind::Application);
        assert_eq!(project.variants.len(), 2);

        let debug = &project.variants[0];
        assert_eq!(debug.defines, vec!["DEBUG", "WAVE_COMPILER"]);
        assert_eq!(debug.include_directories, vec!["source"]);
        assert_eq!(debug.libraries, vec!["winmm.lib"]);
        assert_eq!(debug.compiler_options, vec!["/arch:AVX2"]);
        assert!(debug.is_debug && debug.is_64_bit);
        assert!(debug.commands.is_none());

        let release = &project.variants[1];
        assert!(!release.is_debug);
        assert_eq!(
            project.raw_files().collect::<Vec<_>>(),
            vec!["compiler\\lexer.cpp", "compiler\\lexer.h"]
        );
    }

    #[test]
    fn test_makefile_variant_requires_build_command() {
        let xml = r#"
<solution name="Wave" root=".">
  <project name="engine">
    <variant configuration="Debug" platform="x64"/>
  </project>
</solution>"#;
        let dir = tempfile::tempdir().unwrap();
        let err = parse(xml, dir.path()).unwrap_err();
        assert!(err.to_string().contains("<build>"));
    }

    #[test]
    fn test_makefile_rebuild_defaults_to_build() {
        let xml = r#"
<solution name="Wave" root=".">
  <project name="engine">
    <variant configuration="Debug" platform="x64">
      <build>scons debug</build>
    </variant>
  </project>
</solution>"#;
        let dir = tempfile::tempdir().unwrap();
        let solution = parse(xml, dir.path()).unwrap();
        let commands = solution.projects[0].variants[0].commands.clone().unwrap();
        assert_eq!(commands.build, "scons debug");
        assert_eq!(commands.rebuild, "scons debug");
        assert_eq!(commands.clean, "");
    }

    #[test]
    fn test_unknown_project_type_is_rejected() {
        let xml = r#"
<solution name="Wave" root=".">
  <project name="engine" type="utility">
    <variant configuration="Debug" platform="x64"/>
  </project>
</solution>"#;
        let dir = tempfile::tempdir().unwrap();
        let err = parse(xml, dir.path()).unwrap_err();
        assert!(err.to_string().contains("unknown type 'utility'"));
    }

    #[test]
    fn test_duplicate_project_names_are_rejected() {
        let xml = r#"
<solution name="Wave" root=".">
  <project name="engine" type="application"><variant configuration="Debug" platform="x64"/></project>
  <project name="engine" type="application"><variant configuration="Release" platform="x64"/></project>
</solution>"#;
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            parse(xml, dir.path()),
            Err(AppError::DuplicateProject(_))
        ));
    }

    #[test]
    fn test_missing_required_attribute_is_rejected() {
        let xml = r#"<solution name="Wave"><project name="engine"/></solution>"#;
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            parse(xml, dir.path()),
            Err(AppError::Manifest { .. })
        ));
    }

    #[test]
    fn test_source_directories_are_walked_after_explicit_files() {
        let dir = tempfile::tempdir().unwrap();
        let engine = dir.path().join("src").join("engine");
        fs::create_dir_all(&engine).unwrap();
        fs::write(engine.join("executor.cpp"), "").unwrap();
        fs::write(engine.join("executor.h"), "").unwrap();

        let xml = r#"
<solution name="Wave" root="src">
  <project name="engine" type="staticLibrary">
    <variant configuration="Debug" platform="x64"/>
    <file>engine/executor.h</file>
    <sourceDirectory>engine</sourceDirectory>
  </project>
</solution>"#;
        let solution = parse(xml, dir.path()).unwrap();
        assert_eq!(
            solution.projects[0].raw_files().collect::<Vec<_>>(),
            vec!["engine\\executor.h", "engine\\executor.cpp"]
        );
    }
}
