//! Error types and result aliases shared across fixpoint crates.

use crate::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main error type for parsing and running passes.
///
/// Pass drivers treat this type as opaque: whatever a pass returns is handed
/// back to the caller untouched.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lexer error: {0}")]
    #[diagnostic(code(fixpoint::lexer))]
    Lexer(String, #[label("here")] Span),

    #[error("Parser error: {0}")]
    #[diagnostic(code(fixpoint::parser))]
    Parser(String, #[label("here")] Span),

    /// A pass could not rewrite the module into a well-defined state.
    #[error("Pass '{pass}' failed: {message}")]
    #[diagnostic(code(fixpoint::pass))]
    Pass { pass: String, message: String },

    /// A bounded fixed point did not converge within its iteration budget.
    #[error("Pass '{pass}' did not reach a fixed point within {limit} iterations")]
    #[diagnostic(
        code(fixpoint::iteration_limit),
        help("raise `max_iterations` or check that the pass is idempotent once converged")
    )]
    IterationLimit { pass: String, limit: usize },

    #[error("Unknown pass: '{0}'")]
    #[diagnostic(code(fixpoint::unknown_pass))]
    UnknownPass(String),
}

impl Error {
    /// Builds a [`Error::Pass`] attributed to the named pass.
    pub fn pass(pass: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pass {
            pass: pass.into(),
            message: message.into(),
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start.offset..span.end.offset)
    }
}

/// Result type alias using the fixpoint Error type.
pub type Result<T> = std::result::Result<T, Error>;
