// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod launcher;
pub mod models;
pub mod scanner;
pub mod settings;
pub mod store;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use self::cli::{Cli, Command, ScanArgs, SettingsAction};
use self::config::{load_presets, resolve_scan_options, ScanOverrides};
use self::formatter::{ListingStyle, OutputGenerator};
use self::models::ProjectInfo;
use self::scanner::Scanner;
use self::settings::{FieldParse, Settings};
use self::store::SettingsStore;

/// Application state: the settings record and the last scan result.
pub struct App {
    store: SettingsStore,
    settings: Settings,
    projects: Vec<ProjectInfo>,
}

impl App {
    pub fn new(store: SettingsStore) -> Self {
        let settings = store.load_settings();
        Self {
            store,
            settings,
            projects: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn projects(&self) -> &[ProjectInfo] {
        &self.projects
    }

    /// Scans `root` and prints the listing.
    ///
    /// On success the project list is replaced and `root` becomes the last
    /// directory. On failure the error and any partial results are printed, and
    /// both the list and the last directory stay as they were.
    pub fn scan(&mut self, root: &Path, overrides: ScanOverrides) -> Result<bool> {
        let root = absolute(root)?;
        let root_name = root.file_name().and_then(|n| n.to_str());

        let presets = load_presets(self.store.dir()).unwrap_or_else(|err| {
            log::warn!("Ignoring presets: {:#}", err);
            HashMap::new()
        });
        let options = resolve_scan_options(&self.settings, &presets, overrides, root_name)?;
        log::debug!("Scanning {} with {:?}", root.display(), options);

        let scanner = Scanner::new(root.clone(), &options)?;
        let style = ListingStyle::from(&self.settings);

        match scanner.scan() {
            Ok(mut projects) => {
                OutputGenerator::arrange(&mut projects, style);
                println!("{}", OutputGenerator::generate_listing(&projects, &root, style));
                self.projects = projects;
                self.store.save_last_directory(&root.to_string_lossy());
                Ok(true)
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                let mut partial = err.partial().to_vec();
                if !partial.is_empty() {
                    OutputGenerator::arrange(&mut partial, style);
                    eprintln!("Partial results before the error:");
                    println!("{}", OutputGenerator::generate_listing(&partial, &root, style));
                }
                Ok(false)
            }
        }
    }

    /// Reveals the project at `number` (1-based, as listed).
    pub fn open_project(&self, number: usize) -> Result<()> {
        let project = number
            .checked_sub(1)
            .and_then(|i| self.projects.get(i))
            .with_context(|| format!("No project number {} in the last listing", number))?;
        launcher::reveal_in_file_manager(&project.path)
    }

    fn startup(&mut self) -> Result<()> {
        let has_last = self.store.last_directory_path().is_file();
        if self.settings.auto_scan_on_start && has_last {
            let root = PathBuf::from(self.store.load_last_directory());
            log::info!("Auto-scanning {}", root.display());
            self.scan(&root, ScanOverrides::default())?;
        } else {
            println!(
                "Run `project-navigator scan <ROOT>` to look for projects (last folder: {}).",
                self.store.load_last_directory()
            );
        }
        Ok(())
    }

    fn scan_command(&mut self, args: ScanArgs) -> Result<()> {
        let root = args
            .root
            .unwrap_or_else(|| PathBuf::from(self.store.load_last_directory()));
        let overrides = ScanOverrides {
            preset: args.preset,
            depth: args.depth,
            unbounded: args.unbounded,
            hidden: args.hidden,
            exclude: args.exclude,
        };

        let succeeded = self.scan(&root, overrides)?;
        if let Some(number) = args.open {
            if !succeeded {
                bail!("Scan failed, nothing to open");
            }
            self.open_project(number)?;
        }
        Ok(())
    }

    fn settings_command(&mut self, action: SettingsAction) -> Result<()> {
        match action {
            SettingsAction::Show => print!("{}", self.settings.to_file_string()),
            SettingsAction::Path => println!("{}", self.store.settings_path().display()),
            SettingsAction::Reset => {
                self.settings = self.store.reset_settings();
                println!("Settings reset to defaults.");
            }
            SettingsAction::Set { key, values } => {
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                self.apply_setting(&key, &values)?;
                println!("{} {}", key, values.join(" "));
            }
        }
        Ok(())
    }

    /// Changes one field and saves the whole record.
    pub fn apply_setting(&mut self, key: &str, values: &[&str]) -> Result<()> {
        match self.settings.set(key, values) {
            FieldParse::Applied => {
                self.store.save_settings(&self.settings);
                Ok(())
            }
            FieldParse::Malformed => bail!("Invalid value for '{}': {}", key, values.join(" ")),
            FieldParse::Unknown | FieldParse::Empty => bail!("Unknown setting '{}'", key),
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    Ok(current_dir.join(path))
}

/// Parses arguments and dispatches to the requested command.
pub fn run() -> Result<()> {
    let args = Cli::parse();

    let store = SettingsStore::open_default()?;
    let mut app = App::new(store);

    match args.command {
        None => app.startup(),
        Some(Command::Scan(scan)) => app.scan_command(scan),
        Some(Command::Open { path }) => launcher::reveal_in_file_manager(&path),
        Some(Command::Settings { action }) => app.settings_command(action),
        Some(Command::LastDir) => {
            println!("{}", app.store.load_last_directory());
            Ok(())
        }
    }
}
