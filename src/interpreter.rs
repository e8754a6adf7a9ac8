use crate::command::{CommandFactory, ExitCode};
use crate::env::Environment;
use crate::lexer;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;
use std::path::PathBuf;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only support commands defined in this crate — BuiltinCommand and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// What the dispatch loop should do after handling one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Keep reading input.
    Continue,
    /// An exit was requested; stop reading.
    Exit,
}

/// The shell's dispatch loop: reads lines, records them in the history and
/// routes them to a builtin or to the external command launcher.
///
/// The interpreter owns the shell state ([`Environment`]) and a list of
/// [`CommandFactory`] objects that are queried in order to create commands
/// by name; the external launcher sits last as a catch-all. See
/// [`Interpreter::with_search_paths`] for the factories included out of
/// the box.
///
/// Example
/// ```
/// use pathsh::Interpreter;
/// let mut sh = Interpreter::with_search_paths(Vec::new());
/// let code = sh.run("pwd", &[]).unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter over `env` with a custom set of command factories.
    pub fn new(env: Environment, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { env, commands }
    }

    /// Create an interpreter with the default set of commands:
    /// - builtins: `pwd`, `cd`, `history`, `exit`
    /// - the external command launcher, which falls back to `search_paths`
    ///   (in order) when the OS program-path lookup fails.
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        use crate::builtin::*;
        use crate::external::ExternalCommand;
        Self::new(
            Environment::new(search_paths),
            vec![
                Box::new(Factory::<Pwd>::default()),
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<History>::default()),
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<ExternalCommand>::default()),
            ],
        )
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Returns the command's exit code or an error if the command cannot be
    /// created or fails to execute.
    pub fn run(&mut self, name: &str, args: &[&str]) -> Result<ExitCode> {
        self.run_with_output(name, args, &mut std::io::stdout().lock())
    }

    fn run_with_output(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
    ) -> Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args) {
                return cmd.execute(stdout, &mut self.env);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// Handle one submitted line: record it, tokenize it and dispatch it.
    ///
    /// A whitespace-only line is discarded before it reaches the history or
    /// the tokenizer. Per-command errors are reported on stderr and do not
    /// stop the loop; only an `exit` request ends it.
    pub fn dispatch_line(&mut self, line: &str) -> LineOutcome {
        self.dispatch_line_with_output(line, &mut std::io::stdout().lock())
    }

    fn dispatch_line_with_output(&mut self, line: &str, stdout: &mut dyn Write) -> LineOutcome {
        if line.trim().is_empty() {
            return LineOutcome::Continue;
        }

        // Recording happens before dispatch, so `history` lists itself.
        self.env.history.record(line);

        let tokens = lexer::tokenize(line);
        let Some((name, rest)) = tokens.split_first() else {
            return LineOutcome::Continue;
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        if let Err(e) = self.run_with_output(name, &args, stdout) {
            eprintln!("{:#}", e);
        }

        if self.env.should_exit {
            LineOutcome::Exit
        } else {
            LineOutcome::Continue
        }
    }

    /// The interactive Read-Eval-Print Loop.
    ///
    /// Reads lines with a `"$ "` prompt until end-of-input or an `exit`
    /// request. Ctrl-C discards the pending line and re-prompts. Submitted
    /// lines are also added to rustyline's editor history for arrow-key
    /// recall; that history is separate from the shell's own log.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline("$ ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    if self.dispatch_line(&line) == LineOutcome::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}
