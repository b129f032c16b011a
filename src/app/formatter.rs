use crate::app::models::{self, ProjectInfo, ProjectKind};
use crate::app::settings::Settings;
use pathdiff::diff_paths;
use std::path::Path;

/// Presentation preferences taken from the settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingStyle {
    pub show_type: bool,
    pub show_path: bool,
    pub compact: bool,
    pub sort_by_name: bool,
    pub group_by_type: bool,
}

impl From<&Settings> for ListingStyle {
    fn from(settings: &Settings) -> Self {
        Self {
            show_type: settings.show_project_type,
            show_path: settings.show_project_path,
            compact: settings.use_compact_mode,
            sort_by_name: settings.sort_projects_by_name,
            group_by_type: settings.group_by_type,
        }
    }
}

pub struct OutputGenerator;

impl OutputGenerator {
    /// Puts projects in display order. Listing numbers refer to this order.
    pub fn arrange(projects: &mut [ProjectInfo], style: ListingStyle) {
        if style.sort_by_name {
            models::sort_by_name(projects);
        }
        if style.group_by_type {
            models::group_by_type(projects);
        }
    }

    pub fn generate_listing(projects: &[ProjectInfo], root: &Path, style: ListingStyle) -> String {
        if projects.is_empty() {
            return "No Unity or Unreal projects found.".to_string();
        }

        let mut output = format!("Found {} projects:\n", projects.len());
        let mut current_group: Option<ProjectKind> = None;

        for (index, project) in projects.iter().enumerate() {
            if style.group_by_type && !style.compact && current_group != Some(project.kind) {
                current_group = Some(project.kind);
                let count = projects.iter().filter(|p| p.kind == project.kind).count();
                output.push_str(&format!("\n{} ({})\n", project.kind, count));
            }

            let mut line = format!("{:>3}. {}", index + 1, project.name);
            if style.show_type {
                line.push_str(&format!(" [{}]", project.kind));
            }
            if style.show_path {
                let shown = if style.compact {
                    diff_paths(&project.path, root).unwrap_or_else(|| project.path.clone())
                } else {
                    project.path.clone()
                };
                line.push_str(&format!("  {}", shown.display()));
            }
            output.push_str(&line);
            output.push('\n');
        }

        output.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn sample() -> Vec<ProjectInfo> {
        vec![
            ProjectInfo::new(PathBuf::from("/games/work/Racer"), ProjectKind::Unreal),
            ProjectInfo::new(PathBuf::from("/games/Shooter"), ProjectKind::Unity),
            ProjectInfo::new(PathBuf::from("/games/Arena"), ProjectKind::Unreal),
        ]
    }

    fn plain() -> ListingStyle {
        ListingStyle {
            show_type: true,
            show_path: false,
            compact: false,
            sort_by_name: false,
            group_by_type: false,
        }
    }

    #[test]
    fn empty_listing_message() {
        let out = OutputGenerator::generate_listing(&[], Path::new("/games"), plain());
        assert_eq!(out, "No Unity or Unreal projects found.");
    }

    #[test]
    fn keeps_traversal_order_without_sorting() {
        let out = OutputGenerator::generate_listing(&sample(), Path::new("/games"), plain());
        assert_eq!(
            out,
            "Found 3 projects:\n  1. Racer [Unreal]\n  2. Shooter [Unity]\n  3. Arena [Unreal]"
        );
    }

    #[test]
    fn arrange_sorts_then_groups() {
        let mut projects = sample();
        let style = ListingStyle {
            sort_by_name: true,
            group_by_type: true,
            ..plain()
        };
        OutputGenerator::arrange(&mut projects, style);
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Shooter", "Arena", "Racer"]);

        let out = OutputGenerator::generate_listing(&projects, Path::new("/games"), style);
        assert_eq!(
            out,
            "Found 3 projects:\n\nUnity (1)\n  1. Shooter [Unity]\n\nUnreal (2)\n  2. Arena [Unreal]\n  3. Racer [Unreal]"
        );
    }

    #[test]
    fn compact_paths_are_relative_to_root() {
        let style = ListingStyle {
            show_type: false,
            show_path: true,
            compact: true,
            ..plain()
        };
        let out = OutputGenerator::generate_listing(&sample()[..1], Path::new("/games"), style);
        assert_eq!(out, "Found 1 projects:\n  1. Racer  work/Racer");
    }

    #[test]
    fn full_paths_when_not_compact() {
        let style = ListingStyle {
            show_path: true,
            ..plain()
        };
        let out = OutputGenerator::generate_listing(&sample()[1..2], Path::new("/games"), style);
        assert_eq!(out, "Found 1 projects:\n  1. Shooter [Unity]  /games/Shooter");
    }
}
