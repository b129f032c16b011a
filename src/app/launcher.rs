// Reveal a project folder in the system file manager.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

fn file_manager_command() -> &'static str {
    if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Spawns the file manager without waiting for it and without a shell in between.
pub fn reveal_in_file_manager(path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("Not a directory: {}", path.display());
    }

    let program = file_manager_command();
    Command::new(program)
        .arg(path)
        .spawn()
        .with_context(|| format!("Failed to run {} for {}", program, path.display()))?;

    log::info!("Opened {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn refuses_missing_folder() {
        let dir = tempdir().unwrap();
        let err = reveal_in_file_manager(&dir.path().join("gone")).unwrap_err();
        assert!(err.to_string().starts_with("Not a directory"));
    }
}
