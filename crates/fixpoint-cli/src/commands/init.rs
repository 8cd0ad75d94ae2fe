//! Implementation of the `fixpoint init` command.

use crate::utils::{print_status, write_default_config};
use anyhow::{Context, Result};

/// Executes the `init` command to write a fixpoint.toml in the current directory.
///
/// # Errors
/// Returns an error if fixpoint.toml already exists or cannot be written.
pub fn execute() -> Result<()> {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    let config_path = write_default_config(&current_dir)?;

    print_status("Created", &config_path.display().to_string());
    println!();
    println!("To optimize a file:");
    println!("  fixpoint opt <FILE>");

    Ok(())
}
