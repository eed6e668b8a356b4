//! Subcommand implementations.

pub mod check;
pub mod repl;
pub mod show;
