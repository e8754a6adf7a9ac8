//! A small interactive shell with fallback search directories.
//!
//! This crate implements a line-oriented command interpreter: each input
//! line is tokenized, dispatched either to a builtin (`cd`, `pwd`,
//! `history`, `exit`) or to an external program, and recorded in a bounded
//! command history. External commands are resolved first through the
//! operating system's own program-path search and then, if that fails,
//! through an ordered list of fallback directories supplied on the command
//! line at startup.
//!
//! The main entry point is [`Interpreter`], which owns the shell state
//! ([`env::Environment`]) and a chain of pluggable command factories. The
//! public modules [`command`], [`env`] and [`history`] expose the traits
//! and types needed to implement your own commands or inspect shell state.

mod builtin;
pub mod command;
pub mod env;
mod external;
pub mod history;
mod interpreter;
mod lexer;

/// Convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, LineOutcome};
