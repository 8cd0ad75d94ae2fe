//! Running a pass until it stops changing the module.

use fixpoint_core::{Error, Result};

use crate::Pass;

/// Reruns the wrapped pass until a run reports no change.
///
/// The driver is itself a [`Pass`], reports the wrapped pass's name, and
/// returns `true` if any iteration changed the module. The first error ends
/// the loop and is returned as is.
///
/// Without an iteration limit the driver relies on the wrapped pass to
/// converge; a pass that keeps reporting changes loops forever. Use
/// [`FixedPoint::with_max_iterations`] to bound it.
#[derive(Debug)]
pub struct FixedPoint<P> {
    pass: P,
    max_iterations: Option<usize>,
    last_iterations: usize,
}

impl<P> FixedPoint<P> {
    /// Wraps `pass` without an iteration limit.
    #[must_use]
    pub fn new(pass: P) -> Self {
        Self {
            pass,
            max_iterations: None,
            last_iterations: 0,
        }
    }

    /// Wraps `pass`, failing with [`Error::IterationLimit`] if it still
    /// reports changes after `limit` iterations. A limit of zero is treated
    /// as one.
    #[must_use]
    pub fn with_max_iterations(pass: P, limit: usize) -> Self {
        Self::new(pass).max_iterations(limit)
    }

    /// Sets the iteration limit.
    #[must_use]
    pub fn max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit.max(1));
        self
    }

    /// Returns the iteration limit, if any.
    pub fn iteration_limit(&self) -> Option<usize> {
        self.max_iterations
    }

    /// Number of times the wrapped pass ran during the most recent `run`.
    pub fn last_iterations(&self) -> usize {
        self.last_iterations
    }

    pub fn inner(&self) -> &P {
        &self.pass
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.pass
    }

    pub fn into_inner(self) -> P {
        self.pass
    }
}

impl<P: Default> Default for FixedPoint<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<P> From<P> for FixedPoint<P> {
    fn from(pass: P) -> Self {
        Self::new(pass)
    }
}

impl<M: ?Sized, P: Pass<M>> Pass<M> for FixedPoint<P> {
    fn name(&self) -> &str {
        self.pass.name()
    }

    fn run(&mut self, module: &mut M) -> Result<bool> {
        let mut changed = false;
        self.last_iterations = 0;

        loop {
            if let Some(limit) = self.max_iterations {
                if self.last_iterations == limit {
                    tracing::warn!(
                        pass = self.pass.name(),
                        limit,
                        "fixed point not reached within iteration limit"
                    );
                    return Err(Error::IterationLimit {
                        pass: self.pass.name().to_string(),
                        limit,
                    });
                }
            }

            self.last_iterations += 1;
            let changed_this_iteration = self.pass.run(module)?;
            tracing::trace!(
                pass = self.pass.name(),
                iteration = self.last_iterations,
                changed = changed_this_iteration,
                "fixed point iteration"
            );

            changed |= changed_this_iteration;
            if !changed_this_iteration {
                break;
            }
        }

        tracing::debug!(
            pass = self.pass.name(),
            iterations = self.last_iterations,
            changed,
            "fixed point reached"
        );
        Ok(changed)
    }
}
