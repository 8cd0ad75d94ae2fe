//! Constant propagation pass.
//!
//! Replaces reads of variables bound to a literal with the literal itself:
//!
//! ```text
//! let a = 4;          let a = 4;
//! print a + 1;   =>   print 4 + 1;
//! ```
//!
//! Bindings are visited in statement order, so shadowing works as expected.
//! Reading a variable that is neither a parameter nor bound earlier in the
//! function is an error.

use std::collections::HashMap;

use fixpoint_core::{Error, Result};
use fixpoint_pass::Pass;

use crate::{Expression, Function, Module, Statement};

const NAME: &str = "constant-propagation";

/// What is known about a variable at a given point in the function
enum Binding {
    /// Bound to a literal
    Constant(Expression),
    /// Parameter or non-literal binding
    Opaque,
}

/// Constant propagation pass
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstantPropagation;

impl Pass<Module> for ConstantPropagation {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&mut self, module: &mut Module) -> Result<bool> {
        let mut changed = false;

        for function in &mut module.functions {
            changed |= propagate_function(function)?;
        }

        Ok(changed)
    }
}

fn propagate_function(function: &mut Function) -> Result<bool> {
    let mut bindings: HashMap<String, Binding> = function
        .parameters
        .iter()
        .map(|name| (name.clone(), Binding::Opaque))
        .collect();
    let mut changed = false;

    for statement in &mut function.body {
        if let Some(expr) = statement.expression_mut() {
            changed |= substitute(expr, &bindings).map_err(|(name, span)| {
                Error::pass(
                    NAME,
                    format!(
                        "undefined variable '{name}' at {span} in function '{}'",
                        function.name
                    ),
                )
            })?;
        }

        if let Statement::Let { name, value, .. } = statement {
            let binding = if value.is_literal() {
                Binding::Constant(value.clone())
            } else {
                Binding::Opaque
            };
            bindings.insert(name.clone(), binding);
        }
    }

    Ok(changed)
}

/// Substitutes known constants, returning the first unbound variable on failure
fn substitute(
    expr: &mut Expression,
    bindings: &HashMap<String, Binding>,
) -> std::result::Result<bool, (String, fixpoint_core::Span)> {
    match expr {
        Expression::Variable { name, span } => match bindings.get(name.as_str()) {
            Some(Binding::Constant(literal)) => {
                let mut literal = literal.clone();
                set_span(&mut literal, *span);
                *expr = literal;
                Ok(true)
            }
            Some(Binding::Opaque) => Ok(false),
            None => Err((name.clone(), *span)),
        },
        Expression::Binary { left, right, .. } => {
            let left_changed = substitute(left, bindings)?;
            Ok(substitute(right, bindings)? | left_changed)
        }
        Expression::Unary { operand, .. } => substitute(operand, bindings),
        Expression::Int { .. } | Expression::Bool { .. } => Ok(false),
    }
}

/// Points a copied literal at the variable it replaces
fn set_span(literal: &mut Expression, new_span: fixpoint_core::Span) {
    if let Expression::Int { span, .. } | Expression::Bool { span, .. } = literal {
        *span = new_span;
    }
}
