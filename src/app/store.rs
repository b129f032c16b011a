use crate::app::settings::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "project-navigator";
const LAST_DIRECTORY_FILE: &str = "last_directory";
const SETTINGS_SUFFIX: &str = ".settings";

/// Persists the last scanned root and the settings record in a per-user directory.
///
/// All IO here is best effort: reads fall back to defaults and failed writes are
/// logged and dropped.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    /// Uses `dir` as the configuration directory, creating it if needed.
    pub fn new(dir: PathBuf) -> Self {
        if let Err(err) = fs::create_dir_all(&dir) {
            log::warn!("Could not create config directory {:?}: {}", dir, err);
        }
        Self { dir }
    }

    /// Resolves the platform's per-user config directory.
    pub fn open_default() -> Result<Self> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .context("Could not determine a configuration directory")?;
        Ok(Self::new(base.join(APP_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn last_directory_path(&self) -> PathBuf {
        self.dir.join(LAST_DIRECTORY_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}{}", LAST_DIRECTORY_FILE, SETTINGS_SUFFIX))
    }

    pub fn load_last_directory(&self) -> String {
        let path = self.last_directory_path();
        match fs::read_to_string(&path) {
            Ok(content) => {
                let line = content.lines().next().unwrap_or_default();
                if line.is_empty() {
                    default_directory()
                } else {
                    line.to_string()
                }
            }
            Err(err) => {
                log::debug!("No last directory at {:?}: {}", path, err);
                default_directory()
            }
        }
    }

    pub fn save_last_directory(&self, dir: &str) {
        let path = self.last_directory_path();
        if let Err(err) = fs::write(&path, format!("{}\n", dir)) {
            log::warn!("Could not save last directory to {:?}: {}", path, err);
        }
    }

    /// Compiled-in defaults overlaid with whatever the settings file recognizes.
    pub fn load_settings(&self) -> Settings {
        let path = self.settings_path();
        match fs::read_to_string(&path) {
            Ok(content) => Settings::parse(&content),
            Err(err) => {
                log::debug!("Using default settings, {:?} unreadable: {}", path, err);
                Settings::default()
            }
        }
    }

    pub fn save_settings(&self, settings: &Settings) {
        let path = self.settings_path();
        if let Err(err) = fs::write(&path, settings.to_file_string()) {
            log::warn!("Could not save settings to {:?}: {}", path, err);
        }
    }

    /// Writes the defaults back and returns them.
    pub fn reset_settings(&self) -> Settings {
        let defaults = Settings::default();
        self.save_settings(&defaults);
        defaults
    }
}

/// Starting directory when nothing has been scanned yet.
pub fn default_directory() -> String {
    if cfg!(windows) {
        return "C:\\".to_string();
    }
    dirs::home_dir()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|| "/".to_string())
}
