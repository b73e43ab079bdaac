use super::{MSBUILD_NAMESPACE, XmlDocument, item_path};
use crate::aggregate::parent_directory;
use crate::error::Result;
use crate::ids::{IdGenerator, format_guid};
use crate::model::Project;
use crate::settings::ProjectSettings;
use log;

/// Renders `<project>.vcxproj.filters`: one filter per aggregated directory, each
/// with a fresh identifier from `ids`, and every file mapped to its directory.
pub fn render_filters(
    project: &Project,
    root: &str,
    settings: &ProjectSettings,
    ids: &mut dyn IdGenerator,
) -> Result<String> {
    log::debug!(
        "Rendering {} filters for '{}'",
        project.files.directories.len(),
        project.name
    );
    let mut doc = XmlDocument::new()?;
    doc.start(
        "Project",
        &[
            ("ToolsVersion", &settings.filters_tools_version),
            ("xmlns", MSBUILD_NAMESPACE),
        ],
    )?;

    doc.start("ItemGroup", &[])?;
    for dir in &project.files.directories {
        doc.start("Filter", &[("Include", dir)])?;
        doc.text_element("UniqueIdentifier", &format_guid(&ids.next_id()))?;
        doc.text_element("Extensions", "*")?;
        doc.end("Filter")?;
    }
    doc.end("ItemGroup")?;

    for (kind, files) in project.files.buckets() {
        doc.start("ItemGroup", &[])?;
        for file in files {
            let include = item_path(root, file);
            let filter = parent_directory(file);
            if filter.is_empty() {
                doc.empty(kind.item_type(), &[("Include", &include)])?;
            } else {
                doc.start(kind.item_type(), &[("Include", &include)])?;
                doc.text_element("Filter", filter)?;
                doc.end(kind.item_type())?;
            }
        }
        doc.end("ItemGroup")?;
    }

    doc.end("Project")?;
    doc.finish()
}
