//! File-set aggregation and filter derivation.
//!
//! Takes a flat, ordered list of source paths and produces the typed buckets a
//! project file lists plus the ancestor-closed directory list a filter file
//! declares. Paths are compared after separator normalization; the first
//! occurrence of a path wins and every output list keeps first-seen order.

use indexmap::IndexSet;
use log;
use serde::Serialize;

/// Separator used in every path written to project and filter files.
pub const SEPARATOR: char = '\\';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileKind {
    Source,
    Header,
    Inline,
    Text,
    Natvis,
}

// Exact, case-sensitive suffixes.
const EXTENSIONS: [(&str, FileKind); 6] = [
    (".c", FileKind::Source),
    (".cpp", FileKind::Source),
    (".h", FileKind::Header),
    (".inl", FileKind::Inline),
    (".txt", FileKind::Text),
    (".natvis", FileKind::Natvis),
];

impl FileKind {
    /// Order in which buckets are emitted into project and filter files.
    pub const EMIT_ORDER: [FileKind; 5] = [
        FileKind::Header,
        FileKind::Source,
        FileKind::Inline,
        FileKind::Text,
        FileKind::Natvis,
    ];

    pub fn classify(path: &str) -> Option<FileKind> {
        EXTENSIONS
            .iter()
            .find(|(suffix, _)| path.ends_with(suffix))
            .map(|(_, kind)| *kind)
    }

    /// MSBuild item element name.
    pub fn item_type(self) -> &'static str {
        match self {
            FileKind::Source => "ClCompile",
            FileKind::Header => "ClInclude",
            FileKind::Inline => "None",
            FileKind::Text => "Text",
            FileKind::Natvis => "Natvis",
        }
    }
}

pub fn normalize_separators(path: &str) -> String {
    path.replace('/', "\\")
}

/// Text before the last separator, or `""` for a bare file name.
pub fn parent_directory(path: &str) -> &str {
    path.rfind(SEPARATOR).map_or("", |pos| &path[..pos])
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSet {
    pub sources: Vec<String>,
    pub headers: Vec<String>,
    pub inlines: Vec<String>,
    pub texts: Vec<String>,
    pub natvis: Vec<String>,
    pub directories: Vec<String>,
}

impl FileSet {
    pub fn aggregate<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: IndexSet<String> = IndexSet::new();
        let mut directories: IndexSet<String> = IndexSet::new();
        let mut set = FileSet::default();

        for raw in paths {
            let path = normalize_separators(raw.as_ref());
            if seen.contains(&path) {
                log::trace!("Skipping duplicate path: {}", path);
                continue;
            }

            // Unknown extensions still contribute their directories.
            let mut current = parent_directory(&path);
            while !current.is_empty() {
                if directories.insert(current.to_string()) {
                    log::trace!("New filter: {}", current);
                }
                current = parent_directory(current);
            }

            match FileKind::classify(&path) {
                Some(kind) => set.bucket_mut(kind).push(path.clone()),
                None => log::trace!("Ignoring file with unknown extension: {}", path),
            }
            seen.insert(path);
        }

        set.directories = directories.into_iter().collect();
        set
    }

    pub fn bucket(&self, kind: FileKind) -> &[String] {
        match kind {
            FileKind::Source => &self.sources,
            FileKind::Header => &self.headers,
            FileKind::Inline => &self.inlines,
            FileKind::Text => &self.texts,
            FileKind::Natvis => &self.natvis,
        }
    }

    fn bucket_mut(&mut self, kind: FileKind) -> &mut Vec<String> {
        match kind {
            FileKind::Source => &mut self.sources,
            FileKind::Header => &mut self.headers,
            FileKind::Inline => &mut self.inlines,
            FileKind::Text => &mut self.texts,
            FileKind::Natvis => &mut self.natvis,
        }
    }

    /// Non-empty buckets in emission order.
    pub fn buckets(&self) -> impl Iterator<Item = (FileKind, &[String])> {
        FileKind::EMIT_ORDER
            .into_iter()
            .map(|kind| (kind, self.bucket(kind)))
            .filter(|(_, files)| !files.is_empty())
    }

    pub fn file_count(&self) -> usize {
        FileKind::EMIT_ORDER
            .iter()
            .map(|kind| self.bucket(*kind).len())
            .sum()
    }
}
