//! Constant folding pass.
//!
//! Evaluates operations whose operands are literals.
//! Example: `2 + 3 * 4` becomes `14`

use fixpoint_core::{Error, Result, Span};
use fixpoint_pass::Pass;

use crate::{BinaryOp, Expression, Module, UnaryOp};

const NAME: &str = "constant-folding";

/// Constant folding pass
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstantFolding;

impl Pass<Module> for ConstantFolding {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&mut self, module: &mut Module) -> Result<bool> {
        let mut changed = false;

        for function in &mut module.functions {
            for statement in &mut function.body {
                if let Some(expr) = statement.expression_mut() {
                    changed |= fold_expression(expr).map_err(|message| {
                        Error::pass(NAME, format!("{message} in function '{}'", function.name))
                    })?;
                }
            }
        }

        Ok(changed)
    }
}

/// Folds constants in an expression (returns true if changed)
fn fold_expression(expr: &mut Expression) -> std::result::Result<bool, String> {
    match expr {
        Expression::Binary {
            op,
            left,
            right,
            span,
        } => {
            let mut changed = fold_expression(left)?;
            changed |= fold_expression(right)?;

            if let Some(folded) = try_fold_binary(*op, left, right, *span)? {
                *expr = folded;
                return Ok(true);
            }

            Ok(changed)
        }

        Expression::Unary { op, operand, span } => {
            let changed = fold_expression(operand)?;

            if let Some(folded) = try_fold_unary(*op, operand, *span) {
                *expr = folded;
                return Ok(true);
            }

            Ok(changed)
        }

        // Literals and variables don't need folding
        Expression::Int { .. } | Expression::Bool { .. } | Expression::Variable { .. } => {
            Ok(false)
        }
    }
}

/// Tries to fold a binary operation if both operands are literals.
///
/// Overflowing arithmetic is left alone; a literal zero divisor is an error.
fn try_fold_binary(
    op: BinaryOp,
    left: &Expression,
    right: &Expression,
    span: Span,
) -> std::result::Result<Option<Expression>, String> {
    use Expression::{Bool, Int};

    let folded = match (left, right) {
        (Int { value: l, .. }, Int { value: r, .. }) => {
            let (l, r) = (*l, *r);
            if r == 0 && op == BinaryOp::Divide {
                return Err(format!("division by zero at {span}"));
            }
            if r == 0 && op == BinaryOp::Modulo {
                return Err(format!("remainder by zero at {span}"));
            }
            match op {
                BinaryOp::Add => l.checked_add(r).map(|value| Expression::int(value, span)),
                BinaryOp::Subtract => l.checked_sub(r).map(|value| Expression::int(value, span)),
                BinaryOp::Multiply => l.checked_mul(r).map(|value| Expression::int(value, span)),
                BinaryOp::Divide => l.checked_div(r).map(|value| Expression::int(value, span)),
                BinaryOp::Modulo => l.checked_rem(r).map(|value| Expression::int(value, span)),
                BinaryOp::Equal => Some(Expression::bool(l == r, span)),
                BinaryOp::NotEqual => Some(Expression::bool(l != r, span)),
                BinaryOp::LessThan => Some(Expression::bool(l < r, span)),
                BinaryOp::LessEqual => Some(Expression::bool(l <= r, span)),
                BinaryOp::GreaterThan => Some(Expression::bool(l > r, span)),
                BinaryOp::GreaterEqual => Some(Expression::bool(l >= r, span)),
                BinaryOp::And | BinaryOp::Or => None,
            }
        }

        (Bool { value: l, .. }, Bool { value: r, .. }) => {
            let value = match op {
                BinaryOp::And => *l && *r,
                BinaryOp::Or => *l || *r,
                BinaryOp::Equal => l == r,
                BinaryOp::NotEqual => l != r,
                _ => return Ok(None),
            };
            Some(Expression::bool(value, span))
        }

        _ => None,
    };

    Ok(folded)
}

/// Tries to fold a unary operation if the operand is a literal
fn try_fold_unary(op: UnaryOp, operand: &Expression, span: Span) -> Option<Expression> {
    match (op, operand) {
        (UnaryOp::Negate, Expression::Int { value, .. }) => {
            value.checked_neg().map(|value| Expression::int(value, span))
        }
        (UnaryOp::Not, Expression::Bool { value, .. }) => Some(Expression::bool(!value, span)),
        _ => None,
    }
}
