//! Lexical analysis for the module text format.
//!
//! This crate turns source text into a stream of tokens with resolved spans.

mod token;

pub use token::{Token, TokenKind};

use fixpoint_core::{Error, Location, Result, Span};
use logos::Logos;

/// Tokenizes source text into a vector of tokens.
///
/// # Errors
/// Returns an error if the source contains invalid tokens
///
/// # Examples
/// ```
/// use fixpoint_lexer::tokenize;
///
/// let tokens = tokenize("let x = 42;").unwrap();
/// assert_eq!(tokens.len(), 5);
/// assert_eq!(tokens[1].1.start.column, 5);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let lines = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = lines.span(range.start, range.end);

        let kind = result.map_err(|()| {
            Error::Lexer(format!("Invalid token '{}'", lexer.slice()), span)
        })?;

        tokens.push((
            Token {
                kind,
                text: lexer.slice().to_string(),
            },
            span,
        ));
    }

    Ok(tokens)
}

/// Byte offsets of line starts, for turning offsets into line and column.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn location(&self, offset: usize) -> Location {
        let line = self.starts.partition_point(|start| *start <= offset);
        let line_start = self.starts[line.saturating_sub(1)];
        Location::new(line, offset - line_start + 1, offset)
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.location(start), self.location(end))
    }
}
