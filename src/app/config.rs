use crate::app::models::ScanOptions;
use crate::app::settings::Settings;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const PRESETS_FILE: &str = "presets.toml";

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, ScanPreset>,
}

/// Named scan overrides, e.g. per drive or per studio folder.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPreset {
    pub exclude: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub include_hidden: Option<bool>,
}

/// Scan flags given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ScanOverrides {
    pub preset: Option<String>,
    pub depth: Option<usize>,
    pub unbounded: bool,
    pub hidden: bool,
    pub exclude: Option<Vec<String>>,
}

/// Reads `presets.toml` from the config directory. A missing file means no presets.
pub fn load_presets(config_dir: &Path) -> Result<HashMap<String, ScanPreset>> {
    let config_path = config_dir.join(PRESETS_FILE);

    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read presets at {:?}", config_path))?;

    parse_presets(&content).context(format!("Failed to parse {:?}", config_path))
}

fn parse_presets(content: &str) -> Result<HashMap<String, ScanPreset>> {
    let parsed: PresetsFile = toml::from_str(content)?;
    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Builds the scan options. CLI flag > preset > settings record.
pub fn resolve_scan_options(
    settings: &Settings,
    presets: &HashMap<String, ScanPreset>,
    overrides: ScanOverrides,
    root_name: Option<&str>,
) -> Result<ScanOptions> {
    // Preset to use: CLI flag > root folder name > none
    let preset = match overrides.preset.as_deref() {
        Some(name) => presets
            .get(name)
            .cloned()
            .with_context(|| format!("Unknown preset '{}'", name))?,
        None => root_name
            .and_then(|k| presets.get(k))
            .cloned()
            .unwrap_or_default(),
    };

    // A depth of 0 means unbounded, same as scanDepth
    let max_depth = match overrides.depth.or(preset.max_depth) {
        _ if overrides.unbounded => None,
        Some(depth) => Some(depth).filter(|d| *d > 0),
        None => settings.scan_depth_limit(),
    };

    Ok(ScanOptions {
        max_depth,
        include_hidden: overrides.hidden
            || preset.include_hidden.unwrap_or(settings.show_hidden_files),
        exclude: merge_vecs(preset.exclude, overrides.exclude),
        report_progress: settings.show_scan_progress,
    })
}
