use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the per-vault configuration directory
pub const CONFIG_DIR_NAME: &str = ".quadrant";

/// Get the config directory - checks for a local .quadrant first (walking up
/// from the vault root), then falls back to the global config dir
pub fn get_config_dir(vault_root: &Path) -> Result<PathBuf> {
    if let Some(local_dir) = find_local_config(vault_root) {
        return Ok(local_dir);
    }

    let config = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config.join("quadrant"))
}

/// Find local .quadrant directory by walking up the directory tree
fn find_local_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let config_dir = current.join(CONFIG_DIR_NAME);
        if config_dir.is_dir() {
            return Some(config_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the config directory exists
pub fn ensure_config_dir(vault_root: &Path) -> Result<PathBuf> {
    let dir = get_config_dir(vault_root)?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .quadrant directory in the vault root
pub fn init_local_config(vault_root: &Path) -> Result<PathBuf> {
    let config_dir = vault_root.join(CONFIG_DIR_NAME);

    if config_dir.exists() {
        anyhow::bail!("Config directory already exists: {}", config_dir.display());
    }

    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory: {}", config_dir.display()))?;

    Ok(config_dir)
}

/// Path to settings.json
pub fn settings_file(vault_root: &Path) -> Result<PathBuf> {
    Ok(get_config_dir(vault_root)?.join("settings.json"))
}

/// Path to the log file used while the terminal UI owns the screen
pub fn log_file(vault_root: &Path) -> Result<PathBuf> {
    Ok(ensure_config_dir(vault_root)?.join("quadrant.log"))
}

/// Path to the weekly report for the week ending on `date`
pub fn report_file(vault_root: &Path, date: chrono::NaiveDate) -> Result<PathBuf> {
    let filename = format!("report-{}.md", date.format("%Y-%m-%d"));
    Ok(ensure_config_dir(vault_root)?.join(filename))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    // Create temp file in the same directory
    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    // Atomically rename temp file to target
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_config_dir_found_from_subfolder() {
        let temp_dir = tempfile::tempdir().unwrap();
        let vault = temp_dir.path();
        init_local_config(vault).unwrap();
        fs::create_dir_all(vault.join("Projects/2025")).unwrap();

        let dir = get_config_dir(&vault.join("Projects/2025")).unwrap();
        assert_eq!(dir, vault.join(CONFIG_DIR_NAME));
    }

    #[test]
    fn test_init_twice_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        init_local_config(temp_dir.path()).unwrap();
        assert!(init_local_config(temp_dir.path()).is_err());
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("settings.json");

        atomic_write(&test_file, "{}").unwrap();
        atomic_write(&test_file, "{\"use_emoji\": false}").unwrap();

        let read_content = fs::read_to_string(&test_file).unwrap();
        assert_eq!(read_content, "{\"use_emoji\": false}");
    }

    #[test]
    fn test_report_file_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        init_local_config(temp_dir.path()).unwrap();

        let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        let path = report_file(temp_dir.path(), date).unwrap();
        assert_eq!(path, temp_dir.path().join(CONFIG_DIR_NAME).join("report-2025-06-08.md"));
    }
}
