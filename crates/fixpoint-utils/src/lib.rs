//! Shared utilities: project configuration and building pipelines from it.

pub mod config;

pub use config::{CONFIG_FILE, Config, PassConfig, PipelineConfig, bounded};
