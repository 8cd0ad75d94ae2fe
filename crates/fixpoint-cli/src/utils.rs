//! Utility functions shared across the CLI.

use anyhow::{Context, Result};
use colored::Colorize;
use fixpoint_utils::{CONFIG_FILE, Config};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a source file.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Module name for a source file: its file stem.
pub fn module_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("module")
        .to_string()
}

/// Writes a default fixpoint.toml into `dir`, named after the directory.
///
/// # Errors
/// Returns an error if the file already exists or cannot be written.
pub fn write_default_config(dir: &Path) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{CONFIG_FILE} already exists in {}", dir.display());
    }

    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(fixpoint_ir::optimizer::DEFAULT_PIPELINE);

    Config::new(name).save(&config_path)?;
    Ok(config_path)
}

/// Prints a status message with colored output.
///
/// Status goes to stderr so optimized output on stdout stays clean.
pub fn print_status(status: &str, message: &str) {
    eprintln!("{:>12} {message}", status.green().bold());
}
