//! Expression types.

use fixpoint_core::Span;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,

    // Logical
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl BinaryOp {
    /// Returns true if this is an arithmetic operator
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo
        )
    }

    /// Returns true if this is a comparison operator
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::LessThan
                | Self::LessEqual
                | Self::GreaterThan
                | Self::GreaterEqual
        )
    }

    /// Returns true if this is a logical operator
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// A side-effect free expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Integer literal
    Int { value: i64, span: Span },

    /// Boolean literal
    Bool { value: bool, span: Span },

    /// Variable reference
    Variable { name: String, span: Span },

    /// Binary operation
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
        span: Span,
    },

    /// Unary operation
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
        span: Span,
    },
}

impl Expression {
    #[must_use]
    pub const fn int(value: i64, span: Span) -> Self {
        Self::Int { value, span }
    }

    #[must_use]
    pub const fn bool(value: bool, span: Span) -> Self {
        Self::Bool { value, span }
    }

    #[must_use]
    pub fn variable(name: impl Into<String>, span: Span) -> Self {
        Self::Variable {
            name: name.into(),
            span,
        }
    }

    #[must_use]
    pub fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        let span = left.span().merge(right.span());
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        }
    }

    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self, span: Span) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
            span,
        }
    }

    /// Returns the source span of the expression.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Int { span, .. }
            | Self::Bool { span, .. }
            | Self::Variable { span, .. }
            | Self::Binary { span, .. }
            | Self::Unary { span, .. } => *span,
        }
    }

    /// Returns true for integer and boolean literals.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Int { .. } | Self::Bool { .. })
    }

    /// Returns true if this is the integer literal `value`.
    #[must_use]
    pub const fn is_int_literal(&self) -> bool {
        matches!(self, Self::Int { .. })
    }

    #[must_use]
    pub const fn is_int(&self, expected: i64) -> bool {
        matches!(self, Self::Int { value, .. } if *value == expected)
    }

    /// Returns true if this is the boolean literal `value`.
    #[must_use]
    pub const fn is_bool(&self, expected: bool) -> bool {
        matches!(self, Self::Bool { value, .. } if *value == expected)
    }

    /// Calls `visit` with the name of every variable the expression reads.
    pub fn for_each_variable(&self, visit: &mut impl FnMut(&str)) {
        match self {
            Self::Variable { name, .. } => visit(name),
            Self::Binary { left, right, .. } => {
                left.for_each_variable(visit);
                right.for_each_variable(visit);
            }
            Self::Unary { operand, .. } => operand.for_each_variable(visit),
            Self::Int { .. } | Self::Bool { .. } => {}
        }
    }

    /// Returns true if the expression reads the variable `name`.
    #[must_use]
    pub fn reads(&self, name: &str) -> bool {
        let mut found = false;
        self.for_each_variable(&mut |used| found |= used == name);
        found
    }

    /// Number of nodes in the expression tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Int { .. } | Self::Bool { .. } | Self::Variable { .. } => 1,
            Self::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Self::Unary { operand, .. } => 1 + operand.node_count(),
        }
    }
}
