//! Statement types.

use fixpoint_core::Span;

use crate::Expression;

/// A statement in a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Immutable binding: `let name = value;`
    Let {
        name: String,
        value: Expression,
        span: Span,
    },

    /// Observable output: `print value;`
    Print { value: Expression, span: Span },

    /// Function exit: `return value;` or `return;`
    Return {
        value: Option<Expression>,
        span: Span,
    },
}

impl Statement {
    /// Returns the source span of the statement.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Let { span, .. } | Self::Print { span, .. } | Self::Return { span, .. } => *span,
        }
    }

    /// Returns the expression evaluated by the statement, if any.
    #[must_use]
    pub const fn expression(&self) -> Option<&Expression> {
        match self {
            Self::Let { value, .. } | Self::Print { value, .. } => Some(value),
            Self::Return { value, .. } => value.as_ref(),
        }
    }

    /// Mutable access to the expression evaluated by the statement, if any.
    pub fn expression_mut(&mut self) -> Option<&mut Expression> {
        match self {
            Self::Let { value, .. } | Self::Print { value, .. } => Some(value),
            Self::Return { value, .. } => value.as_mut(),
        }
    }

    /// Returns the name bound by a `let`.
    #[must_use]
    pub fn binding(&self) -> Option<&str> {
        match self {
            Self::Let { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns true if the statement reads the variable `name`.
    #[must_use]
    pub fn reads(&self, name: &str) -> bool {
        self.expression().is_some_and(|expr| expr.reads(name))
    }

    #[must_use]
    pub const fn is_return(&self) -> bool {
        matches!(self, Self::Return { .. })
    }
}
