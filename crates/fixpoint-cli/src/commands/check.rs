//! Implementation of the `fixpoint check` command.

use crate::pipeline::parse_module;
use crate::utils::{module_name, print_status, read_source};
use anyhow::Result;
use std::path::Path;

/// Executes the `check` command to validate a source file without optimizing it.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn execute(file: &Path) -> Result<()> {
    let source = read_source(file)?;
    let file_name = file.display().to_string();
    let module = parse_module(&source, &file_name, &module_name(file))?;

    print_status(
        "Checked",
        &format!(
            "{file_name} ({} function(s), {} statement(s))",
            module.functions.len(),
            module.statement_count()
        ),
    );

    Ok(())
}
