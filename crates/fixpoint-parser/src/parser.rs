//! Recursive descent parser implementation.

use fixpoint_core::{Error, Result, Span};
use fixpoint_ir::{BinaryOp, Expression, Function, Module, Statement, UnaryOp};
use fixpoint_lexer::{Token, TokenKind};

/// Parser for module source text.
pub struct Parser<'a> {
    tokens: &'a [(Token, Span)],
    current: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given token stream.
    pub fn new(tokens: &'a [(Token, Span)]) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parses a complete module.
    pub fn parse_module(&mut self, name: &str) -> Result<Module> {
        let mut module = Module::new(name);

        while !self.is_at_end() {
            let function = self.parse_function()?;
            if module.function(&function.name).is_some() {
                return Err(Error::Parser(
                    format!("Duplicate function '{}'", function.name),
                    function.span,
                ));
            }
            module.add_function(function);
        }

        Ok(module)
    }

    /// Parses a function declaration.
    fn parse_function(&mut self) -> Result<Function> {
        let start_span = self.expect(&TokenKind::Fn)?;
        let name = self.expect_identifier()?;

        self.expect(&TokenKind::LeftParen)?;
        let parameters = self.parse_parameter_list()?;
        self.expect(&TokenKind::RightParen)?;

        self.expect(&TokenKind::LeftBrace)?;
        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(Error::Parser(
                    format!("Unclosed body of function '{name}'"),
                    start_span,
                ));
            }
            body.push(self.parse_statement()?);
        }
        let end_span = self.expect(&TokenKind::RightBrace)?;

        Ok(Function::new(name, parameters, body, start_span.merge(end_span)))
    }

    /// Parses a comma separated parameter list.
    fn parse_parameter_list(&mut self) -> Result<Vec<String>> {
        let mut parameters: Vec<String> = Vec::new();

        if !self.check(&TokenKind::RightParen) {
            loop {
                let span = self.current_span();
                let name = self.expect_identifier()?;
                if parameters.contains(&name) {
                    return Err(Error::Parser(
                        format!("Duplicate parameter '{name}'"),
                        span,
                    ));
                }
                parameters.push(name);

                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        Ok(parameters)
    }

    /// Parses a statement.
    fn parse_statement(&mut self) -> Result<Statement> {
        let start = self.current_span();

        let statement = match self.peek_kind() {
            Some(TokenKind::Let) => {
                self.advance();
                let name = self.expect_identifier()?;
                self.expect(&TokenKind::Equal)?;
                let value = self.parse_expression()?;
                let end = self.expect(&TokenKind::Semicolon)?;
                Statement::Let {
                    name,
                    value,
                    span: start.merge(end),
                }
            }
            Some(TokenKind::Print) => {
                self.advance();
                let value = self.parse_expression()?;
                let end = self.expect(&TokenKind::Semicolon)?;
                Statement::Print {
                    value,
                    span: start.merge(end),
                }
            }
            Some(TokenKind::Return) => {
                self.advance();
                let value = if self.check(&TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                let end = self.expect(&TokenKind::Semicolon)?;
                Statement::Return {
                    value,
                    span: start.merge(end),
                }
            }
            _ => {
                return Err(Error::Parser(
                    format!("Expected statement, found '{}'", self.found()),
                    start,
                ));
            }
        };

        Ok(statement)
    }

    /// Parses an expression.
    fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut expr = self.parse_and()?;

        while self.match_token(&TokenKind::PipePipe) {
            let right = self.parse_and()?;
            expr = Expression::binary(BinaryOp::Or, expr, right);
        }

        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut expr = self.parse_equality()?;

        while self.match_token(&TokenKind::AmpersandAmpersand) {
            let right = self.parse_equality()?;
            expr = Expression::binary(BinaryOp::And, expr, right);
        }

        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<Expression> {
        let mut expr = self.parse_comparison()?;

        while let Some(op) = self.match_operator(&[
            (TokenKind::EqualEqual, BinaryOp::Equal),
            (TokenKind::BangEqual, BinaryOp::NotEqual),
        ]) {
            let right = self.parse_comparison()?;
            expr = Expression::binary(op, expr, right);
        }

        Ok(expr)
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let mut expr = self.parse_term()?;

        while let Some(op) = self.match_operator(&[
            (TokenKind::Less, BinaryOp::LessThan),
            (TokenKind::LessEqual, BinaryOp::LessEqual),
            (TokenKind::Greater, BinaryOp::GreaterThan),
            (TokenKind::GreaterEqual, BinaryOp::GreaterEqual),
        ]) {
            let right = self.parse_term()?;
            expr = Expression::binary(op, expr, right);
        }

        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expression> {
        let mut expr = self.parse_factor()?;

        while let Some(op) = self.match_operator(&[
            (TokenKind::Plus, BinaryOp::Add),
            (TokenKind::Minus, BinaryOp::Subtract),
        ]) {
            let right = self.parse_factor()?;
            expr = Expression::binary(op, expr, right);
        }

        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<Expression> {
        let mut expr = self.parse_unary()?;

        while let Some(op) = self.match_operator(&[
            (TokenKind::Star, BinaryOp::Multiply),
            (TokenKind::Slash, BinaryOp::Divide),
            (TokenKind::Percent, BinaryOp::Modulo),
        ]) {
            let right = self.parse_unary()?;
            expr = Expression::binary(op, expr, right);
        }

        Ok(expr)
    }

    /// Parses a unary expression. A minus sign directly before an integer
    /// literal is part of the literal, so `i64::MIN` can be written.
    fn parse_unary(&mut self) -> Result<Expression> {
        let start = self.current_span();

        if self.match_token(&TokenKind::Minus) {
            if self.check(&TokenKind::Integer) {
                let text = format!("-{}", self.found());
                let span = start.merge(self.current_span());
                self.advance();
                return parse_integer(&text, span);
            }
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span());
            return Ok(Expression::unary(UnaryOp::Negate, operand, span));
        }

        if self.match_token(&TokenKind::Bang) {
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span());
            return Ok(Expression::unary(UnaryOp::Not, operand, span));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let span = self.current_span();

        match self.peek_kind() {
            Some(TokenKind::Integer) => {
                let text = self.found().to_string();
                self.advance();
                parse_integer(&text, span)
            }
            Some(TokenKind::True) => {
                self.advance();
                Ok(Expression::bool(true, span))
            }
            Some(TokenKind::False) => {
                self.advance();
                Ok(Expression::bool(false, span))
            }
            Some(TokenKind::Identifier) => {
                let name = self.found().to_string();
                self.advance();
                Ok(Expression::variable(name, span))
            }
            Some(TokenKind::LeftParen) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(expr)
            }
            _ => Err(Error::Parser(
                format!("Expected expression, found '{}'", self.found()),
                span,
            )),
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek_token(&self) -> Option<&(Token, Span)> {
        self.tokens.get(self.current)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek_token().map(|(token, _)| &token.kind)
    }

    /// Text of the current token, for error messages.
    fn found(&self) -> &str {
        self.peek_token()
            .map_or("end of input", |(token, _)| token.text.as_str())
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_operator(&mut self, table: &[(TokenKind, BinaryOp)]) -> Option<BinaryOp> {
        let op = table
            .iter()
            .find(|(kind, _)| self.check(kind))
            .map(|(_, op)| *op)?;
        self.advance();
        Some(op)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Span> {
        let span = self.current_span();
        if self.match_token(kind) {
            Ok(span)
        } else {
            Err(Error::Parser(
                format!("Expected '{}', found '{}'", kind, self.found()),
                span,
            ))
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        if self.check(&TokenKind::Identifier) {
            let name = self.found().to_string();
            self.advance();
            Ok(name)
        } else {
            Err(Error::Parser(
                format!("Expected identifier, found '{}'", self.found()),
                self.current_span(),
            ))
        }
    }

    /// Span of the current token, or an empty span just past the last one.
    fn current_span(&self) -> Span {
        match self.peek_token() {
            Some((_, span)) => *span,
            None => self
                .tokens
                .last()
                .map(|(_, span)| Span::new(span.end, span.end))
                .unwrap_or_default(),
        }
    }
}

fn parse_integer(text: &str, span: Span) -> Result<Expression> {
    text.parse::<i64>()
        .map(|value| Expression::int(value, span))
        .map_err(|_| Error::Parser(format!("Integer literal '{text}' out of range"), span))
}
