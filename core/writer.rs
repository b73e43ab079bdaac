use crate::aggregate::{SEPARATOR, normalize_separators};
use crate::error::{AppError, Result};
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use std::borrow::Cow;

pub mod filters;
pub mod project;
pub mod solution;

pub use filters::render_filters;
pub use project::render_project;
pub use solution::render_solution;

pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

/// Indented MSBuild XML document built in memory.
pub(crate) struct XmlDocument {
    writer: Writer<Vec<u8>>,
}

impl XmlDocument {
    pub(crate) fn new() -> Result<Self> {
        let mut doc = Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        };
        doc.write(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        Ok(doc)
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| AppError::XmlWrite(e.to_string()))
    }

    pub(crate) fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Start(element(name, attributes)))
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    pub(crate) fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Empty(element(name, attributes)))
    }

    /// `<name>text</name>`, or `<name />` when `text` is empty.
    pub(crate) fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        if text.is_empty() {
            return self.empty(name, &[]);
        }
        self.start(name, &[])?;
        self.write(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        self.end(name)
    }

    pub(crate) fn finish(self) -> Result<String> {
        let mut content = String::from_utf8(self.writer.into_inner())?;
        content.push('\n');
        Ok(content)
    }
}

fn element<'a>(name: &'a str, attributes: &[(&'a str, &str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attributes {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_attribute(value).into_bytes()),
        });
    }
    start
}

// Apostrophes stay literal so MSBuild conditions read naturally.
fn escape_attribute(value: &str) -> String {
    partial_escape(value).replace('"', "&quot;")
}

/// `a;b;c`, the MSBuild list form.
pub(crate) fn property_list<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(";")
}

/// `a;b;%(Name)`: the list followed by the inherited value of item metadata `Name`.
pub(crate) fn inherited_list(items: &[String], metadata: &str) -> String {
    let inherited = format!("%({})", metadata);
    property_list(items.iter().chain([&inherited]))
}

pub(crate) fn is_rooted(path: &str) -> bool {
    path.starts_with(SEPARATOR) || path.as_bytes().get(1) == Some(&b':')
}

/// Path of a source file as seen from `<out>/<project>/`: `..\<root>\<file>`.
///
/// A rooted `root` (or `file`) discards what precedes it.
pub fn item_path(root: &str, file: &str) -> String {
    let mut path = String::from("..");
    for part in [normalize_separators(root), normalize_separators(file)] {
        if part.is_empty() {
            continue;
        }
        if is_rooted(&part) {
            path = part;
            continue;
        }
        if !path.ends_with(SEPARATOR) {
            path.push(SEPARATOR);
        }
        path.push_str(&part);
    }
    path
}
