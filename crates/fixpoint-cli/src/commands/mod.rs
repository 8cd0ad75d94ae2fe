//! Command implementations for the fixpoint CLI.

pub mod check;
pub mod init;
pub mod opt;
pub mod passes;
