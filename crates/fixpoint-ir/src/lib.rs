//! Reference intermediate representation for fixpoint pipelines.
//!
//! The IR is deliberately small: a module is a list of functions, a function
//! is a straight-line list of statements, and every expression is pure. It
//! exists to give the pass machinery something real to rewrite.
//!
//! # Example
//!
//! ```rust
//! use fixpoint_core::Span;
//! use fixpoint_ir::{BinaryOp, Expression, Function, Module, Statement, optimizer};
//! use fixpoint_pass::Pass;
//!
//! let span = Span::default();
//! let mut module = Module::new("demo");
//! module.add_function(Function::new(
//!     "main",
//!     vec![],
//!     vec![Statement::Print {
//!         value: Expression::binary(
//!             BinaryOp::Add,
//!             Expression::int(2, span),
//!             Expression::int(3, span),
//!         ),
//!         span,
//!     }],
//!     span,
//! ));
//!
//! assert!(optimizer::default_pipeline().run(&mut module).unwrap());
//! assert_eq!(module.to_string(), "fn main() {\n    print 5;\n}\n");
//! ```

mod display;
mod expression;
mod module;
pub mod optimizer;
mod statement;

pub use expression::{BinaryOp, Expression, UnaryOp};
pub use module::{Function, Module};
pub use statement::Statement;
