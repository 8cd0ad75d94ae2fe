//! Core types and utilities shared by every fixpoint crate.
//!
//! This crate provides source spans and the error type that flows through the
//! lexer, the parser and every transformation pass.

pub mod error;
pub mod span;

pub use error::{Error, Result};
pub use span::{Location, Span};
