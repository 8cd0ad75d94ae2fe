//! Optimization passes over [`Module`] and the registry that builds them by name.

mod algebraic_simplification;
mod constant_folding;
mod constant_propagation;
mod dead_code_elimination;

pub use algebraic_simplification::AlgebraicSimplification;
pub use constant_folding::ConstantFolding;
pub use constant_propagation::ConstantPropagation;
pub use dead_code_elimination::DeadCodeElimination;

use fixpoint_core::{Error, Result};
use fixpoint_pass::{FixedPoint, Pass, PassPipeline};

use crate::Module;

/// Name of the pipeline built by [`default_pipeline`].
pub const DEFAULT_PIPELINE: &str = "default";

/// Names accepted by [`create_pass`], in default pipeline order.
pub const AVAILABLE_PASSES: &[&str] = &[
    "algebraic-simplification",
    "constant-propagation",
    "constant-folding",
    "dead-code-elimination",
];

/// Creates a pass by name.
///
/// # Errors
/// Returns [`Error::UnknownPass`] if no pass has that name.
pub fn create_pass(name: &str) -> Result<Box<dyn Pass<Module>>> {
    let pass: Box<dyn Pass<Module>> = match name {
        "algebraic-simplification" => Box::new(AlgebraicSimplification),
        "constant-propagation" => Box::new(ConstantPropagation),
        "constant-folding" => Box::new(ConstantFolding),
        "dead-code-elimination" => Box::new(DeadCodeElimination),
        _ => return Err(Error::UnknownPass(name.to_string())),
    };
    Ok(pass)
}

/// Builds a pipeline running the named passes once each, in order.
///
/// # Errors
/// Returns [`Error::UnknownPass`] for the first unknown name.
pub fn pipeline_from_names<S: AsRef<str>>(
    name: &str,
    passes: &[S],
) -> Result<PassPipeline<Module>> {
    let mut pipeline = PassPipeline::new(name);
    for pass in passes {
        pipeline.add_boxed(create_pass(pass.as_ref())?);
    }
    Ok(pipeline)
}

/// Builds the standard optimization pipeline, repeated until nothing changes.
#[must_use]
pub fn default_pipeline() -> FixedPoint<PassPipeline<Module>> {
    let mut pipeline = PassPipeline::new(DEFAULT_PIPELINE);
    pipeline
        .add_pass(AlgebraicSimplification)
        .add_pass(ConstantPropagation)
        .add_pass(ConstantFolding)
        .add_pass(DeadCodeElimination);
    FixedPoint::new(pipeline)
}
