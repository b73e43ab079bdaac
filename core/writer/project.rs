use super::{MSBUILD_NAMESPACE, XmlDocument, inherited_list, item_path, property_list};
use crate::error::Result;
use crate::ids::format_guid;
use crate::model::{Project, ProjectKind, ProjectVariant};
use crate::settings::ProjectSettings;
use log;

const DEFAULT_PROPS: &str = r"$(VCTargetsPath)\Microsoft.Cpp.Default.props";
const CPP_PROPS: &str = r"$(VCTargetsPath)\Microsoft.Cpp.props";
const CPP_TARGETS: &str = r"$(VCTargetsPath)\Microsoft.Cpp.targets";
const USER_PROPS: &str = r"$(UserRootDir)\Microsoft.Cpp.$(Platform).user.props";

/// Renders `<project>.vcxproj`. `root` is the source root as seen from the output directory.
pub fn render_project(project: &Project, root: &str, settings: &ProjectSettings) -> Result<String> {
    log::debug!("Rendering project file for '{}'", project.name);
    let mut doc = XmlDocument::new()?;
    doc.start(
        "Project",
        &[
            ("DefaultTargets", "Build"),
            ("ToolsVersion", &settings.tools_version),
            ("xmlns", MSBUILD_NAMESPACE),
        ],
    )?;

    doc.start("ItemGroup", &[("Label", "ProjectConfigurations")])?;
    for variant in &project.variants {
        let key = variant.key();
        doc.start("ProjectConfiguration", &[("Include", &key)])?;
        doc.text_element("Configuration", &variant.configuration)?;
        doc.text_element("Platform", &variant.platform)?;
        doc.end("ProjectConfiguration")?;
    }
    doc.end("ItemGroup")?;

    doc.start("PropertyGroup", &[("Label", "Globals")])?;
    doc.text_element("ProjectGuid", &format_guid(&project.id))?;
    doc.text_element("RootNamespace", &project.name)?;
    doc.text_element("Keyword", project.kind.keyword())?;
    doc.end("PropertyGroup")?;

    doc.empty("Import", &[("Project", DEFAULT_PROPS)])?;

    for variant in &project.variants {
        let condition = variant.condition();
        doc.start(
            "PropertyGroup",
            &[("Condition", &condition), ("Label", "Configuration")],
        )?;
        doc.text_element("ConfigurationType", project.kind.configuration_type())?;
        doc.text_element("UseDebugLibraries", bool_text(variant.is_debug))?;
        doc.text_element("PlatformToolset", &settings.platform_toolset)?;
        if project.kind != ProjectKind::Makefile {
            doc.text_element("CharacterSet", &settings.character_set)?;
        }
        doc.end("PropertyGroup")?;
    }

    doc.empty("Import", &[("Project", CPP_PROPS)])?;
    doc.empty("ImportGroup", &[("Label", "ExtensionSettings")])?;

    for variant in &project.variants {
        let condition = variant.condition();
        doc.start(
            "ImportGroup",
            &[("Label", "PropertySheets"), ("Condition", &condition)],
        )?;
        let exists = format!("exists('{}')", USER_PROPS);
        doc.empty(
            "Import",
            &[
                ("Project", USER_PROPS),
                ("Condition", &exists),
                ("Label", "LocalAppDataPlatform"),
            ],
        )?;
        doc.end("ImportGroup")?;
    }

    doc.empty("PropertyGroup", &[("Label", "UserMacros")])?;

    for variant in &project.variants {
        let condition = variant.condition();
        doc.start("PropertyGroup", &[("Condition", &condition)])?;
        match &variant.commands {
            Some(commands) if project.kind == ProjectKind::Makefile => {
                doc.text_element("NMakeBuildCommandLine", &commands.build)?;
                doc.text_element("NMakeRebuildCommandLine", &commands.rebuild)?;
                doc.text_element("NMakeCleanCommandLine", &commands.clean)?;
                doc.text_element("NMakeOutput", &variant.output)?;
                doc.text_element(
                    "NMakePreprocessorDefinitions",
                    &property_list(variant.defines.iter().chain(&settings.default_defines)),
                )?;
                doc.text_element(
                    "NMakeIncludeSearchPath",
                    &property_list(
                        variant
                            .include_directories
                            .iter()
                            .chain(&settings.default_include_directories),
                    ),
                )?;
            }
            _ => {
                doc.text_element("OutDir", &variant.output)?;
            }
        }
        doc.end("PropertyGroup")?;
    }

    if project.kind != ProjectKind::Makefile {
        for variant in &project.variants {
            write_item_definitions(&mut doc, project.kind, variant, settings)?;
        }
    }

    for (kind, files) in project.files.buckets() {
        doc.start("ItemGroup", &[])?;
        for file in files {
            doc.empty(kind.item_type(), &[("Include", &item_path(root, file))])?;
        }
        doc.end("ItemGroup")?;
    }

    doc.empty("Import", &[("Project", CPP_TARGETS)])?;
    doc.empty("ImportGroup", &[("Label", "ExtensionTargets")])?;
    doc.end("Project")?;
    doc.finish()
}

fn write_item_definitions(
    doc: &mut XmlDocument,
    kind: ProjectKind,
    variant: &ProjectVariant,
    settings: &ProjectSettings,
) -> Result<()> {
    let condition = variant.condition();
    doc.start("ItemDefinitionGroup", &[("Condition", &condition)])?;

    doc.start("ClCompile", &[])?;
    doc.text_element("WarningLevel", &settings.warning_level)?;
    doc.text_element(
        "Optimization",
        if variant.is_debug { "Disabled" } else { "MaxSpeed" },
    )?;
    doc.text_element(
        "PreprocessorDefinitions",
        &inherited_list(&variant.defines, "PreprocessorDefinitions"),
    )?;
    doc.text_element(
        "AdditionalIncludeDirectories",
        &inherited_list(&variant.include_directories, "AdditionalIncludeDirectories"),
    )?;
    if !variant.compiler_options.is_empty() {
        doc.text_element("AdditionalOptions", &variant.compiler_options.join(" "))?;
    }
    doc.end("ClCompile")?;

    let machine = if variant.is_64_bit {
        "MachineX64"
    } else {
        "MachineX86"
    };
    let dependencies = inherited_list(&variant.libraries, "AdditionalDependencies");
    let library_directories =
        inherited_list(&variant.library_directories, "AdditionalLibraryDirectories");

    if kind == ProjectKind::StaticLibrary {
        doc.start("Lib", &[])?;
    } else {
        doc.start("Link", &[])?;
        doc.text_element("GenerateDebugInformation", bool_text(variant.is_debug))?;
    }
    doc.text_element("AdditionalDependencies", &dependencies)?;
    doc.text_element("AdditionalLibraryDirectories", &library_directories)?;
    doc.text_element("TargetMachine", machine)?;
    doc.end(if kind == ProjectKind::StaticLibrary {
        "Lib"
    } else {
        "Link"
    })?;

    doc.end("ItemDefinitionGroup")
}

fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
