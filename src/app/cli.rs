use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find Unity and Unreal projects below a folder and open them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a folder for projects (defaults to the last scanned folder)
    Scan(ScanArgs),

    /// Reveal a folder in the system file manager
    Open {
        path: PathBuf,
    },

    /// Inspect or change persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Print the last successfully scanned folder
    LastDir,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Root folder to scan
    pub root: Option<PathBuf>,

    /// Use a named preset from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Maximum folder depth below the root, 0 for no limit (overrides scanDepth)
    #[arg(long, conflicts_with = "unbounded")]
    pub depth: Option<usize>,

    /// Walk the whole tree regardless of scanDepth
    #[arg(long)]
    pub unbounded: bool,

    /// Also look inside hidden folders
    #[arg(long)]
    pub hidden: bool,

    /// Patterns for folders to skip, relative to the root (e.g., '**/Library')
    #[arg(long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Open the N-th listed project after scanning
    #[arg(long, value_name = "N")]
    pub open: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print every setting in file format
    Show,
    /// Print the settings file location
    Path,
    /// Restore and save the defaults
    Reset,
    /// Change one setting, e.g. `set windowSize 1600 900`
    Set {
        key: String,
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<String>,
    },
}
