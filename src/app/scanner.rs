use crate::app::models::{ProjectInfo, ProjectKind, ScanOptions};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const UNITY_ASSETS_DIR: &str = "Assets";
const UNITY_SETTINGS_DIR: &str = "ProjectSettings";
const UNREAL_PROJECT_EXT: &str = "uproject";
const PROGRESS_INTERVAL: usize = 250;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Root directory does not exist: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("Root path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),
    /// The walk stopped early. Projects found before the failure are kept.
    #[error("Error scanning: {message}")]
    Walk {
        partial: Vec<ProjectInfo>,
        message: String,
    },
}

impl ScanError {
    /// Projects accumulated before the failure (empty for root errors).
    pub fn partial(&self) -> &[ProjectInfo] {
        match self {
            ScanError::Walk { partial, .. } => partial.as_slice(),
            _ => &[],
        }
    }
}

pub struct Scanner {
    root: PathBuf,
    max_depth: Option<usize>,
    include_hidden: bool,
    exclude_set: GlobSet,
    report_progress: bool,
}

impl Scanner {
    pub fn new(root: PathBuf, options: &ScanOptions) -> Result<Self> {
        Ok(Self {
            root,
            max_depth: options.max_depth,
            include_hidden: options.include_hidden,
            exclude_set: build_globset(&options.exclude)?,
            report_progress: options.report_progress,
        })
    }

    /// Walks the tree below the root and classifies every directory.
    ///
    /// Output order is the walker's traversal order. The filesystem is only read.
    pub fn scan(&self) -> Result<Vec<ProjectInfo>, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::RootNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::RootNotDirectory(self.root.clone()));
        }

        let candidates = self.build_walker().filter_map(candidate_dir);
        self.collect_projects(candidates)
    }

    /// Classifies candidate directories in order and stops at the first error.
    fn collect_projects<I>(&self, candidates: I) -> Result<Vec<ProjectInfo>, ScanError>
    where
        I: IntoIterator<Item = Result<PathBuf, ignore::Error>>,
    {
        let mut projects = Vec::new();
        let mut visited = 0usize;

        for result in candidates {
            let dir = match result {
                Ok(dir) => dir,
                Err(err) => {
                    log::warn!("Error walking entry: {}", err);
                    return Err(ScanError::Walk {
                        partial: projects,
                        message: err.to_string(),
                    });
                }
            };

            visited += 1;
            if self.report_progress && visited % PROGRESS_INTERVAL == 0 {
                log::info!(
                    "Scanned {} directories, {} projects so far",
                    visited,
                    projects.len()
                );
            }

            match classify_dir(&dir) {
                Ok(Some(kind)) => {
                    log::debug!("Found {} project at {}", kind, dir.display());
                    projects.push(ProjectInfo::new(dir, kind));
                }
                Ok(None) => {}
                Err(err) => {
                    log::warn!("Error reading {}: {}", dir.display(), err);
                    return Err(ScanError::Walk {
                        message: format!("{}: {}", dir.display(), err),
                        partial: projects,
                    });
                }
            }
        }

        let summary = format!(
            "Scan of {} finished: {} directories, {} projects",
            self.root.display(),
            visited,
            projects.len()
        );
        if self.report_progress {
            log::info!("{}", summary);
        } else {
            log::debug!("{}", summary);
        }

        Ok(projects)
    }

    fn build_walker(&self) -> ignore::Walk {
        let mut builder = WalkBuilder::new(&self.root);
        // No gitignore semantics here, every directory is a candidate
        builder
            .standard_filters(false)
            .hidden(!self.include_hidden)
            .follow_links(false)
            .max_depth(self.max_depth);

        if !self.exclude_set.is_empty() {
            let root = self.root.clone();
            let exclude_set = self.exclude_set.clone();
            builder.filter_entry(move |entry| {
                match diff_paths(entry.path(), &root) {
                    Some(relative) if !relative.as_os_str().is_empty() => {
                        !exclude_set.is_match(&relative)
                    }
                    _ => true,
                }
            });
        }

        builder.build()
    }
}

/// Keeps directories below the root. Symlinks to directories are classified
/// too, but the walker does not descend through them.
fn candidate_dir(
    result: Result<ignore::DirEntry, ignore::Error>,
) -> Option<Result<PathBuf, ignore::Error>> {
    let entry = match result {
        Ok(entry) => entry,
        Err(err) => return Some(Err(err)),
    };
    // The root itself is never a candidate
    if entry.depth() == 0 {
        return None;
    }
    let is_dir = entry
        .file_type()
        .is_some_and(|ft| ft.is_dir() || (ft.is_symlink() && entry.path().is_dir()));
    is_dir.then(|| Ok(entry.into_path()))
}

/// Unity wins over Unreal when a directory carries both markers.
pub fn classify_dir(dir: &Path) -> io::Result<Option<ProjectKind>> {
    if dir.join(UNITY_ASSETS_DIR).is_dir() && dir.join(UNITY_SETTINGS_DIR).is_dir() {
        return Ok(Some(ProjectKind::Unity));
    }

    for child in fs::read_dir(dir)? {
        let path = child?.path();
        let is_uproject = path
            .extension()
            .is_some_and(|ext| ext == UNREAL_PROJECT_EXT);
        if is_uproject && path.is_file() {
            return Ok(Some(ProjectKind::Unreal));
        }
    }

    Ok(None)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).context(format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
