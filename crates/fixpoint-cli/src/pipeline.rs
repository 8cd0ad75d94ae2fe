//! Parsing and optimization stages driven by the CLI.

use anyhow::Result;
use fixpoint_core::Error;
use fixpoint_ir::Module;
use fixpoint_pass::Pass;
use fixpoint_utils::{Config, PipelineConfig, bounded};
use miette::NamedSource;
use std::path::Path;

/// Name given to pipelines assembled from `--passes`.
pub const COMMAND_LINE_PIPELINE: &str = "command-line";

/// Result of optimizing a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optimized {
    pub changed: bool,
    /// Pipeline rounds executed, including the final unchanged one.
    pub rounds: usize,
}

fn report(error: Error, file_name: &str, source: &str) {
    let report = miette::Report::new(error)
        .with_source_code(NamedSource::new(file_name, source.to_string()));
    eprintln!("{report:?}");
}

/// Tokenizes and parses `source`, printing a diagnostic on failure.
///
/// # Errors
/// Returns an error if lexing or parsing fails.
pub fn parse_module(source: &str, file_name: &str, module_name: &str) -> Result<Module> {
    fixpoint_parser::parse_source(source, module_name).map_err(|e| {
        let kind = match e {
            Error::Lexer(..) => "Lexical analysis failed",
            _ => "Parsing failed",
        };
        report(e, file_name, source);
        anyhow::anyhow!(kind)
    })
}

/// Picks the pipeline to run.
///
/// `--passes` wins over `--config`, which wins over the nearest fixpoint.toml
/// found from `search_from`. Without any of those the default pipeline runs.
/// `once` turns off the pipeline-level fixed point.
///
/// # Errors
/// Returns an error if a configuration file cannot be loaded or names an
/// unknown pass.
pub fn resolve_pipeline(
    passes: Option<&[String]>,
    config: Option<&Path>,
    once: bool,
    search_from: &Path,
) -> Result<PipelineConfig> {
    let mut pipeline = if let Some(passes) = passes {
        PipelineConfig::from_names(COMMAND_LINE_PIPELINE, passes)
    } else if let Some(path) = config {
        Config::load(path)?.pipeline
    } else if let Some(path) = Config::locate(search_from) {
        tracing::debug!(config = %path.display(), "using configuration");
        Config::load(path)?.pipeline
    } else {
        Config::default().pipeline
    };

    if once {
        pipeline.fixed_point = false;
        pipeline.max_iterations = None;
    }

    pipeline.validate()?;
    Ok(pipeline)
}

/// Runs `pipeline` over `module`.
///
/// # Errors
/// Returns the first error raised by a pass, or an iteration limit error.
pub fn optimize(module: &mut Module, pipeline: &PipelineConfig) -> fixpoint_core::Result<Optimized> {
    let mut round = pipeline.build_round()?;

    if pipeline.fixed_point {
        let mut driver = bounded(round, pipeline.max_iterations);
        let changed = driver.run(module)?;
        Ok(Optimized {
            changed,
            rounds: driver.last_iterations(),
        })
    } else {
        let changed = round.run(module)?;
        Ok(Optimized { changed, rounds: 1 })
    }
}

/// Like [`optimize`], printing a diagnostic on failure.
///
/// # Errors
/// Returns an error if any pass fails.
pub fn optimize_reported(
    module: &mut Module,
    pipeline: &PipelineConfig,
    file_name: &str,
    source: &str,
) -> Result<Optimized> {
    optimize(module, pipeline).map_err(|e| {
        report(e, file_name, source);
        anyhow::anyhow!("Optimization failed")
    })
}
