//! Implementation of the `fixpoint opt` command.

use crate::pipeline::{optimize_reported, parse_module, resolve_pipeline};
use crate::utils::{module_name, print_status, read_source};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for `fixpoint opt`.
pub struct OptArgs {
    pub file: PathBuf,
    pub config: Option<PathBuf>,
    pub passes: Option<Vec<String>>,
    pub once: bool,
    pub output: Option<PathBuf>,
}

/// Executes the `opt` command: parse, optimize, and print the module.
///
/// # Errors
/// Returns an error if the file cannot be parsed or a pass fails.
pub fn execute(args: &OptArgs) -> Result<()> {
    let source = read_source(&args.file)?;
    let file_name = args.file.display().to_string();
    let mut module = parse_module(&source, &file_name, &module_name(&args.file))?;

    let search_from = args
        .file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let pipeline = resolve_pipeline(
        args.passes.as_deref(),
        args.config.as_deref(),
        args.once,
        search_from,
    )?;

    let before = module.statement_count();
    let outcome = optimize_reported(&mut module, &pipeline, &file_name, &source)?;

    let optimized = module.to_string();
    match &args.output {
        Some(path) => fs::write(path, &optimized)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{optimized}"),
    }

    let status = if outcome.changed { "Optimized" } else { "Unchanged" };
    print_status(
        status,
        &format!(
            "{file_name} with '{}' ({} round(s), {before} -> {} statements)",
            pipeline.name,
            outcome.rounds,
            module.statement_count()
        ),
    );

    Ok(())
}
