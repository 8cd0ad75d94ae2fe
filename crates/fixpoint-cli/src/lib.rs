//! Fixpoint CLI library for testing and reusability.

pub mod pipeline;
pub mod utils;

pub use fixpoint_utils::Config;
pub use pipeline::{Optimized, optimize, parse_module, resolve_pipeline};
