//! Parser for the module text format.
//!
//! This crate turns token streams into [`fixpoint_ir::Module`]s.

mod parser;

pub use parser::Parser;

use fixpoint_core::{Result, Span};
use fixpoint_ir::Module;
use fixpoint_lexer::{Token, tokenize};

/// Parses a slice of tokens into a module called `name`.
///
/// # Errors
/// Returns an error if the token stream contains syntax errors
pub fn parse(tokens: &[(Token, Span)], name: &str) -> Result<Module> {
    let mut parser = Parser::new(tokens);
    parser.parse_module(name)
}

/// Tokenizes and parses source text in one step.
///
/// # Errors
/// Returns a lexer or parser error
///
/// # Examples
/// ```
/// use fixpoint_parser::parse_source;
///
/// let module = parse_source("fn main() { print 1 + 2; }", "demo").unwrap();
/// assert_eq!(module.functions[0].body.len(), 1);
/// ```
pub fn parse_source(source: &str, name: &str) -> Result<Module> {
    let tokens = tokenize(source)?;
    parse(&tokens, name)
}
