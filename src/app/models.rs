use std::fmt;
use std::path::PathBuf;

/// Engine a discovered project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProjectKind {
    Unity,
    Unreal,
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKind::Unity => f.write_str("Unity"),
            ProjectKind::Unreal => f.write_str("Unreal"),
        }
    }
}

/// A single project folder discovered during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub path: PathBuf,
    pub kind: ProjectKind,
}

impl ProjectInfo {
    pub fn new(path: PathBuf, kind: ProjectKind) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path, kind }
    }
}

/// Represents the final scan configuration after merging settings, presets and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Directory levels below the root to visit. `None` walks the whole tree.
    pub max_depth: Option<usize>,
    pub include_hidden: bool,
    pub exclude: Vec<String>,
    pub report_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            include_hidden: true,
            exclude: Vec::new(),
            report_progress: false,
        }
    }
}

/// Sort key hook for the presentation layer: case-insensitive project name.
pub fn sort_by_name(projects: &mut [ProjectInfo]) {
    projects.sort_by_cached_key(|p| p.name.to_lowercase());
}

/// Stable grouping, Unity projects first.
pub fn group_by_type(projects: &mut [ProjectInfo]) {
    projects.sort_by_key(|p| p.kind);
}
