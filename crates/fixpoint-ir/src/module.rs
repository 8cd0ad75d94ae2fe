//! Module structure - the unit every pass rewrites.

use fixpoint_core::Span;

use crate::Statement;

/// A complete program: a named list of functions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// Module name, usually the source file stem
    pub name: String,
    /// All functions in the module
    pub functions: Vec<Function>,
}

impl Module {
    /// Creates a new empty module
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
        }
    }

    /// Adds a function to the module
    pub fn add_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    /// Finds a function by name
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Total number of statements across all functions
    #[must_use]
    pub fn statement_count(&self) -> usize {
        self.functions.iter().map(|f| f.body.len()).sum()
    }
}

/// A function: parameters and a straight-line body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Statement>,
    pub span: Span,
}

impl Function {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<String>,
        body: Vec<Statement>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            body,
            span,
        }
    }
}
