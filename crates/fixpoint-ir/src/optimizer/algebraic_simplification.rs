//! Algebraic simplification pass.
//!
//! Rewrites identities that hold for any operand:
//! - `x + 0`, `0 + x`, `x - 0`, `x * 1`, `1 * x`, `x / 1` become `x`
//! - `x * 0` and `0 * x` become `0`
//! - `--x` and `!!x` become `x`
//! - `x && true`, `true && x`, `x || false`, `false || x` become `x`
//! - `false && x` becomes `false`, `true || x` becomes `true`

use fixpoint_core::Result;
use fixpoint_pass::Pass;

use crate::{BinaryOp, Expression, Module, UnaryOp};

/// Algebraic simplification pass
#[derive(Debug, Default, Clone, Copy)]
pub struct AlgebraicSimplification;

impl Pass<Module> for AlgebraicSimplification {
    fn name(&self) -> &str {
        "algebraic-simplification"
    }

    fn run(&mut self, module: &mut Module) -> Result<bool> {
        let mut changed = false;

        for function in &mut module.functions {
            for statement in &mut function.body {
                if let Some(expr) = statement.expression_mut() {
                    changed |= simplify_expression(expr);
                }
            }
        }

        Ok(changed)
    }
}

/// Simplifies an expression bottom-up (returns true if changed)
fn simplify_expression(expr: &mut Expression) -> bool {
    let changed = match expr {
        Expression::Binary { left, right, .. } => {
            let left_changed = simplify_expression(left);
            simplify_expression(right) | left_changed
        }
        Expression::Unary { operand, .. } => simplify_expression(operand),
        Expression::Int { .. } | Expression::Bool { .. } | Expression::Variable { .. } => false,
    };

    match try_simplify(expr) {
        Some(simplified) => {
            *expr = simplified;
            true
        }
        None => changed,
    }
}

fn try_simplify(expr: &Expression) -> Option<Expression> {
    match expr {
        Expression::Binary {
            op,
            left,
            right,
            span,
        } => {
            let (left, right) = (left.as_ref(), right.as_ref());
            match op {
                BinaryOp::Add if right.is_int(0) => Some(left.clone()),
                BinaryOp::Add if left.is_int(0) => Some(right.clone()),
                BinaryOp::Subtract if right.is_int(0) => Some(left.clone()),
                BinaryOp::Multiply if left.is_int(0) || right.is_int(0) => {
                    Some(Expression::int(0, *span))
                }
                BinaryOp::Multiply if right.is_int(1) => Some(left.clone()),
                BinaryOp::Multiply if left.is_int(1) => Some(right.clone()),
                BinaryOp::Divide if right.is_int(1) => Some(left.clone()),
                BinaryOp::And if left.is_bool(false) => Some(Expression::bool(false, *span)),
                BinaryOp::And if right.is_bool(true) => Some(left.clone()),
                BinaryOp::And if left.is_bool(true) => Some(right.clone()),
                BinaryOp::Or if left.is_bool(true) => Some(Expression::bool(true, *span)),
                BinaryOp::Or if right.is_bool(false) => Some(left.clone()),
                BinaryOp::Or if left.is_bool(false) => Some(right.clone()),
                _ => None,
            }
        }

        Expression::Unary { op, operand, .. } => match operand.as_ref() {
            Expression::Unary {
                op: inner_op,
                operand: inner,
                ..
            } if inner_op == op => Some(inner.as_ref().clone()),
            _ => None,
        },

        Expression::Int { .. } | Expression::Bool { .. } | Expression::Variable { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixpoint_core::Span;

    fn span() -> Span {
        Span::from_range(0, 1)
    }

    fn var(name: &str) -> Expression {
        Expression::variable(name, span())
    }

    fn int(value: i64) -> Expression {
        Expression::int(value, span())
    }

    #[test]
    fn test_additive_identity() {
        let mut expr = Expression::binary(BinaryOp::Add, int(0), var("x"));

        assert!(simplify_expression(&mut expr));
        assert_eq!(expr, var("x"));
    }

    #[test]
    fn test_multiply_by_zero_drops_operand() {
        let mut expr = Expression::binary(
            BinaryOp::Multiply,
            Expression::binary(BinaryOp::Add, var("a"), var("b")),
            int(0),
        );

        assert!(simplify_expression(&mut expr));
        assert!(expr.is_int(0));
    }

    #[test]
    fn test_nested_identities_in_one_run() {
        // (x * 1) + 0 becomes x
        let mut expr = Expression::binary(
            BinaryOp::Add,
            Expression::binary(BinaryOp::Multiply, var("x"), int(1)),
            int(0),
        );

        assert!(simplify_expression(&mut expr));
        assert_eq!(expr, var("x"));
    }

    #[test]
    fn test_double_negation() {
        let mut expr = Expression::unary(
            UnaryOp::Not,
            Expression::unary(UnaryOp::Not, var("flag"), span()),
            span(),
        );

        assert!(simplify_expression(&mut expr));
        assert_eq!(expr, var("flag"));
    }

    #[test]
    fn test_mixed_unary_is_kept() {
        let mut expr = Expression::unary(
            UnaryOp::Negate,
            Expression::unary(UnaryOp::Not, var("flag"), span()),
            span(),
        );

        assert!(!simplify_expression(&mut expr));
    }

    #[test]
    fn test_short_circuit_constants() {
        let mut and = Expression::binary(BinaryOp::And, Expression::bool(false, span()), var("p"));
        let mut or = Expression::binary(BinaryOp::Or, var("p"), Expression::bool(false, span()));

        assert!(simplify_expression(&mut and));
        assert!(and.is_bool(false));
        assert!(simplify_expression(&mut or));
        assert_eq!(or, var("p"));
    }

    #[test]
    fn test_subtraction_from_zero_is_kept() {
        let mut expr = Expression::binary(BinaryOp::Subtract, int(0), var("x"));

        assert!(!simplify_expression(&mut expr));
    }
}
