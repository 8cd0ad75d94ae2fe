//! Configuration file handling for fixpoint projects.

use anyhow::{Context, Result};
use fixpoint_core::Error;
use fixpoint_ir::{Module, optimizer};
use fixpoint_pass::{FixedPoint, Pass, PassPipeline};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up by [`Config::find`].
pub const CONFIG_FILE: &str = "fixpoint.toml";

/// Represents the fixpoint.toml configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub pipeline: PipelineConfig,
}

/// The pass pipeline to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_pipeline_name")]
    pub name: String,
    /// Repeat the whole pipeline until a round changes nothing.
    #[serde(default = "default_true")]
    pub fixed_point: bool,
    /// Upper bound on pipeline rounds when `fixed_point` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub passes: Vec<PassConfig>,
}

/// One pass in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassConfig {
    pub name: String,
    /// Run this pass to its own fixed point every time the pipeline reaches it.
    #[serde(default)]
    pub fixed_point: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
}

fn default_pipeline_name() -> String {
    optimizer::DEFAULT_PIPELINE.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Creates a configuration running every registered pass.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            pipeline: PipelineConfig::from_names(name, optimizer::AVAILABLE_PASSES),
        }
    }

    /// Loads configuration from a fixpoint.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;

        let config: Self =
            toml::from_str(&contents).with_context(|| format!("Failed to parse {CONFIG_FILE}"))?;
        config.pipeline.validate()?;
        Ok(config)
    }

    /// Saves configuration to a fixpoint.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration")?;

        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))
    }

    /// Finds the fixpoint.toml file starting from the current directory.
    ///
    /// # Errors
    /// Returns an error if no fixpoint.toml is found in the current or parent directories.
    pub fn find() -> Result<(Self, PathBuf)> {
        let current_dir =
            std::env::current_dir().with_context(|| "Failed to get current directory")?;
        Self::find_from(current_dir)
    }

    /// Finds the fixpoint.toml file starting from `start` and walking up.
    ///
    /// # Errors
    /// Returns an error if no fixpoint.toml is found in `start` or its parents.
    pub fn find_from(start: impl Into<PathBuf>) -> Result<(Self, PathBuf)> {
        let Some(config_path) = Self::locate(start) else {
            anyhow::bail!("Could not find {CONFIG_FILE} in current directory or any parent directory");
        };

        let config = Self::load(&config_path)?;
        let mut project_dir = config_path;
        project_dir.pop();
        Ok((config, project_dir))
    }

    /// Returns the path of the nearest fixpoint.toml in `start` or its parents.
    ///
    /// A relative `start` is resolved against the current directory first.
    pub fn locate(start: impl Into<PathBuf>) -> Option<PathBuf> {
        let mut current_dir = std::path::absolute(start.into()).ok()?;

        loop {
            let config_path = current_dir.join(CONFIG_FILE);
            if config_path.is_file() {
                return Some(config_path);
            }

            if !current_dir.pop() {
                return None;
            }
        }
    }
}

impl PipelineConfig {
    /// A pipeline running the named passes once per round, to a fixed point.
    pub fn from_names<S: AsRef<str>>(name: impl Into<String>, passes: &[S]) -> Self {
        Self {
            name: name.into(),
            fixed_point: true,
            max_iterations: None,
            passes: passes
                .iter()
                .map(|pass| PassConfig {
                    name: pass.as_ref().to_string(),
                    fixed_point: false,
                    max_iterations: None,
                })
                .collect(),
        }
    }

    /// Checks that every pass exists and every limit is usable.
    ///
    /// # Errors
    /// Returns [`Error::UnknownPass`] or [`Error::Config`].
    pub fn validate(&self) -> fixpoint_core::Result<()> {
        check_limit(&self.name, self.fixed_point, self.max_iterations)?;

        for pass in &self.passes {
            if !optimizer::AVAILABLE_PASSES.contains(&pass.name.as_str()) {
                return Err(Error::UnknownPass(pass.name.clone()));
            }
            check_limit(&pass.name, pass.fixed_point, pass.max_iterations)?;
        }

        Ok(())
    }

    /// Builds the configured pipeline.
    ///
    /// # Errors
    /// Returns an error if the configuration does not validate.
    pub fn build(&self) -> fixpoint_core::Result<Box<dyn Pass<Module>>> {
        let round = self.build_round()?;

        if self.fixed_point {
            Ok(Box::new(bounded(round, self.max_iterations)))
        } else {
            Ok(Box::new(round))
        }
    }

    /// Builds a single round of the pipeline, ignoring the pipeline-level
    /// `fixed_point` setting. Per-pass fixed points are still applied.
    ///
    /// # Errors
    /// Returns an error if the configuration does not validate.
    pub fn build_round(&self) -> fixpoint_core::Result<PassPipeline<Module>> {
        self.validate()?;

        let mut pipeline = PassPipeline::new(self.name.as_str());
        for pass in &self.passes {
            let instance = optimizer::create_pass(&pass.name)?;
            if pass.fixed_point {
                pipeline.add_boxed(Box::new(bounded(instance, pass.max_iterations)));
            } else {
                pipeline.add_boxed(instance);
            }
        }

        Ok(pipeline)
    }
}

/// Wraps `pass` in a fixed point, bounded when a limit is given.
pub fn bounded<P>(pass: P, max_iterations: Option<usize>) -> FixedPoint<P> {
    match max_iterations {
        Some(limit) => FixedPoint::with_max_iterations(pass, limit),
        None => FixedPoint::new(pass),
    }
}

fn check_limit(
    name: &str,
    fixed_point: bool,
    max_iterations: Option<usize>,
) -> fixpoint_core::Result<()> {
    match max_iterations {
        Some(0) => Err(Error::Config(format!(
            "'{name}': max_iterations must be at least 1"
        ))),
        Some(_) if !fixed_point => Err(Error::Config(format!(
            "'{name}': max_iterations requires fixed_point = true"
        ))),
        _ => Ok(()),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(optimizer::DEFAULT_PIPELINE)
    }
}
