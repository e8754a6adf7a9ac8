use crate::history::HistoryLog;
use std::env as stdenv;
use std::path::PathBuf;

/// The single shell-state structure threaded through the dispatch loop.
///
/// It contains:
/// - `current_dir`: the working directory for command execution, altered
///   only by the `cd` builtin and observed by `pwd` and by relative
///   fallback-path resolution.
/// - `search_paths`: the ordered fallback directories supplied at startup,
///   immutable for the process lifetime.
/// - `history`: the bounded log of submitted command lines, mutated only
///   by the dispatch loop's record step.
/// - `should_exit`: a flag the REPL loop checks to know when to terminate.
///
/// Note: fields are public for simplicity to keep the crate small.
/// Production code would prefer accessor methods over public fields.
#[derive(Debug)]
pub struct Environment {
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// Fallback directories searched, in order, after the OS path lookup fails.
    pub search_paths: Vec<PathBuf>,
    /// Bounded FIFO log of submitted command lines.
    pub history: HistoryLog,
    /// When set to true, indicates that the interactive loop should exit.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the current process state into a new `Environment`.
    ///
    /// `current_dir` is initialized from `std::env::current_dir()`, the
    /// history starts empty and `should_exit` is `false`. The fallback
    /// directory list is fixed here for the lifetime of the shell.
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            current_dir,
            search_paths,
            history: HistoryLog::new(),
            should_exit: false,
        }
    }
}
