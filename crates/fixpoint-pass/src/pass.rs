//! The pass contract.

use fixpoint_core::Result;

use crate::FixedPoint;

/// A named transformation over a module of type `M`.
///
/// A pass borrows the module exclusively for one call to [`Pass::run`] and
/// never keeps a reference to it afterwards. Passes are owned by whatever
/// composes them (a pipeline or a driver) and are not meant to be cloned.
pub trait Pass<M: ?Sized> {
    /// Returns the name of the pass, used for diagnostics only.
    fn name(&self) -> &str;

    /// Runs the pass on a module.
    ///
    /// Returns `Ok(true)` if the module was modified and `Ok(false)` otherwise.
    /// A pass that reports `Ok(false)` must report `Ok(false)` again when rerun
    /// on the same, untouched module.
    ///
    /// # Errors
    /// Returns an error if the module cannot be rewritten into a well-defined
    /// state. The module contents are unspecified after a failure.
    fn run(&mut self, module: &mut M) -> Result<bool>;
}

impl<M: ?Sized, P: Pass<M> + ?Sized> Pass<M> for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&mut self, module: &mut M) -> Result<bool> {
        (**self).run(module)
    }
}

impl<M: ?Sized, P: Pass<M> + ?Sized> Pass<M> for &mut P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&mut self, module: &mut M) -> Result<bool> {
        (**self).run(module)
    }
}

/// A pass backed by a closure.
pub struct FnPass<F> {
    name: String,
    func: F,
}

impl<F> FnPass<F> {
    /// Creates a named pass that calls `func` on every run.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<M: ?Sized, F> Pass<M> for FnPass<F>
where
    F: FnMut(&mut M) -> Result<bool>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&mut self, module: &mut M) -> Result<bool> {
        (self.func)(module)
    }
}

/// Creates a [`FnPass`], letting the compiler infer the module type from `func`.
pub fn pass_fn<M: ?Sized, F>(name: impl Into<String>, func: F) -> FnPass<F>
where
    F: FnMut(&mut M) -> Result<bool>,
{
    FnPass::new(name, func)
}

/// Combinators available on every pass.
pub trait PassExt<M: ?Sized>: Pass<M> + Sized {
    /// Wraps the pass so that it runs until it stops changing the module.
    fn fixed_point(self) -> FixedPoint<Self> {
        FixedPoint::new(self)
    }

    /// Erases the concrete pass type.
    fn boxed<'a>(self) -> Box<dyn Pass<M> + 'a>
    where
        Self: 'a,
    {
        Box::new(self)
    }
}

impl<M: ?Sized, P: Pass<M>> PassExt<M> for P {}
