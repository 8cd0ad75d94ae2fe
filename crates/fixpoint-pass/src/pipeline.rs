//! Ordered sequences of passes.

use fixpoint_core::Result;

use crate::{FixedPoint, Pass};

/// Outcome of a single pass inside a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRun {
    pub pass: String,
    pub changed: bool,
}

/// What happened during the most recent pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Passes that completed, in execution order.
    pub runs: Vec<PassRun>,
    /// Name of the pass that failed and stopped the pipeline.
    pub failed: Option<String>,
}

impl PipelineReport {
    /// Returns true if any completed pass changed the module.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.runs.iter().any(|run| run.changed)
    }

    /// Names of the passes that changed the module.
    pub fn changed_passes(&self) -> impl Iterator<Item = &str> {
        self.runs
            .iter()
            .filter(|run| run.changed)
            .map(|run| run.pass.as_str())
    }
}

/// Runs a list of passes in order, stopping at the first failure.
///
/// A pipeline is a [`Pass`] too: it can be nested in other pipelines, and
/// wrapping it in a [`FixedPoint`] repeats the whole sequence until a full
/// round leaves the module untouched.
pub struct PassPipeline<M: ?Sized> {
    name: String,
    passes: Vec<Box<dyn Pass<M>>>,
    report: PipelineReport,
}

impl<M: ?Sized> PassPipeline<M> {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passes: Vec::new(),
            report: PipelineReport::default(),
        }
    }

    /// Appends a pass that runs once per pipeline run.
    pub fn add_pass<P>(&mut self, pass: P) -> &mut Self
    where
        P: Pass<M> + 'static,
    {
        self.add_boxed(Box::new(pass))
    }

    /// Appends a pass that runs to its own fixed point on every pipeline run.
    pub fn add_fixed_point<P>(&mut self, pass: P) -> &mut Self
    where
        P: Pass<M> + 'static,
    {
        self.add_boxed(Box::new(FixedPoint::new(pass)))
    }

    /// Appends an already boxed pass.
    pub fn add_boxed(&mut self, pass: Box<dyn Pass<M>>) -> &mut Self {
        self.passes.push(pass);
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Names of the passes in execution order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Report of the most recent run.
    pub fn report(&self) -> &PipelineReport {
        &self.report
    }
}

impl<M: ?Sized> Pass<M> for PassPipeline<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&mut self, module: &mut M) -> Result<bool> {
        self.report = PipelineReport::default();
        let mut changed = false;

        for pass in &mut self.passes {
            tracing::debug!(pipeline = %self.name, pass = pass.name(), "running pass");

            match pass.run(module) {
                Ok(pass_changed) => {
                    if pass_changed {
                        tracing::info!(pipeline = %self.name, pass = pass.name(), "pass changed module");
                    }
                    self.report.runs.push(PassRun {
                        pass: pass.name().to_string(),
                        changed: pass_changed,
                    });
                    changed |= pass_changed;
                }
                Err(err) => {
                    tracing::error!(
                        pipeline = %self.name,
                        pass = pass.name(),
                        error = %err,
                        "pass failed"
                    );
                    self.report.failed = Some(pass.name().to_string());
                    return Err(err);
                }
            }
        }

        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass_fn;

    #[test]
    fn test_empty_pipeline() {
        let mut pipeline = PassPipeline::<Vec<i32>>::new("empty");
        assert!(pipeline.is_empty());
        assert!(!pipeline.run(&mut Vec::new()).unwrap());
        assert!(pipeline.report().runs.is_empty());
    }

    #[test]
    fn test_pass_names_in_order() {
        let mut pipeline = PassPipeline::<Vec<i32>>::new("names");
        pipeline
            .add_pass(pass_fn("first", |_: &mut Vec<i32>| Ok(false)))
            .add_fixed_point(pass_fn("second", |_: &mut Vec<i32>| Ok(false)));

        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.pass_names(), vec!["first", "second"]);
    }
}
