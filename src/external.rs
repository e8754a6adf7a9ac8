use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::Result;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Why a single launch attempt failed.
#[derive(Debug)]
pub enum LaunchError {
    /// The candidate could not be spawned (not found, not executable, ...).
    Spawn(io::Error),
    /// The child was spawned but waiting on it failed.
    Wait(io::Error),
}

/// Tagged result of resolving and launching one external command.
#[derive(Debug)]
pub enum ExitOutcome {
    /// A candidate ran to completion with this exit code.
    Exited(ExitCode),
    /// No candidate could be spawned.
    NotFound,
    /// A candidate was spawned but the synchronous wait failed.
    WaitFailed(io::Error),
}

/// Launch primitive behind [`run_external`], injectable for tests.
pub trait Launch {
    /// Spawn `program` with `args` and synchronously wait for it.
    fn launch(&mut self, program: &Path, args: &[String]) -> Result<ExitCode, LaunchError>;
}

/// Candidate paths to attempt for `name`, in resolution-priority order.
///
/// The first candidate is the bare name: handed to the OS as-is, it goes
/// through the standard program-path search when it contains no separator.
/// After that come direct paths `dir/name` for each fallback directory in
/// startup order, with no further search applied.
pub fn candidates<'a>(
    name: &'a str,
    fallback_dirs: &'a [PathBuf],
) -> impl Iterator<Item = PathBuf> + 'a {
    std::iter::once(PathBuf::from(name)).chain(fallback_dirs.iter().map(move |dir| dir.join(name)))
}

/// Try each candidate for `args[0]` in order until one launches.
///
/// A spawn failure moves on to the next candidate; a fallback directory
/// that does not exist simply yields a failed candidate like any other.
/// A wait failure stops the chain, since the child already ran. An empty
/// `args` never occurs in practice (the dispatch loop filters empty
/// argument vectors) and resolves to nothing.
pub fn run_external(
    args: &[String],
    fallback_dirs: &[PathBuf],
    launcher: &mut dyn Launch,
) -> ExitOutcome {
    let Some((name, rest)) = args.split_first() else {
        return ExitOutcome::NotFound;
    };
    for candidate in candidates(name, fallback_dirs) {
        match launcher.launch(&candidate, rest) {
            Ok(code) => return ExitOutcome::Exited(code),
            Err(LaunchError::Spawn(_)) => continue,
            Err(LaunchError::Wait(e)) => return ExitOutcome::WaitFailed(e),
        }
    }
    ExitOutcome::NotFound
}

/// Real launch primitive: spawn a child with inherited stdio and block
/// until it terminates.
pub struct ProcessLauncher {
    current_dir: PathBuf,
}

impl ProcessLauncher {
    pub fn new(current_dir: PathBuf) -> Self {
        Self { current_dir }
    }
}

impl Launch for ProcessLauncher {
    fn launch(&mut self, program: &Path, args: &[String]) -> Result<ExitCode, LaunchError> {
        let mut child = std::process::Command::new(program)
            .args(args)
            .current_dir(&self.current_dir)
            .spawn()
            .map_err(LaunchError::Spawn)?;
        let exit_status = child.wait().map_err(LaunchError::Wait)?;
        match exit_status.code() {
            Some(x) => Ok(x),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Command that is not a builtin.
pub struct ExternalCommand {
    argv: Vec<String>,
}

impl ExternalCommand {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    /// Catch-all: accepts every name, so this factory must be last.
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(name.to_owned());
        argv.extend(args.iter().map(|x| x.to_string()));
        Some(Box::new(ExternalCommand::new(argv)))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let mut launcher = ProcessLauncher::new(env.current_dir.clone());
        match run_external(&self.argv, &env.search_paths, &mut launcher) {
            ExitOutcome::Exited(code) => Ok(code),
            ExitOutcome::NotFound => Err(anyhow::anyhow!("{}: command not found", self.argv[0])),
            ExitOutcome::WaitFailed(e) => {
                Err(anyhow::anyhow!("wait for {} failed: {}", self.argv[0], e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Launcher that records every attempted candidate and fails or
    /// succeeds according to a script.
    struct ScriptedLauncher {
        attempts: Vec<PathBuf>,
        succeed_on: Option<PathBuf>,
        exit_code: ExitCode,
    }

    impl ScriptedLauncher {
        fn failing() -> Self {
            Self {
                attempts: Vec::new(),
                succeed_on: None,
                exit_code: 0,
            }
        }

        fn succeeding_on(path: impl Into<PathBuf>, exit_code: ExitCode) -> Self {
            Self {
                attempts: Vec::new(),
                succeed_on: Some(path.into()),
                exit_code,
            }
        }
    }

    impl Launch for ScriptedLauncher {
        fn launch(&mut self, program: &Path, _args: &[String]) -> Result<ExitCode, LaunchError> {
            self.attempts.push(program.to_owned());
            match &self.succeed_on {
                Some(p) if p == program => Ok(self.exit_code),
                _ => Err(LaunchError::Spawn(io::Error::from(
                    io::ErrorKind::NotFound,
                ))),
            }
        }
    }

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_candidates_bare_name_first_then_fallbacks_in_order() {
        let dirs = vec![PathBuf::from("/opt/a"), PathBuf::from("/opt/b")];
        let got: Vec<PathBuf> = candidates("foo", &dirs).collect();
        assert_eq!(
            got,
            vec![
                PathBuf::from("foo"),
                PathBuf::from("/opt/a/foo"),
                PathBuf::from("/opt/b/foo"),
            ]
        );
    }

    #[test]
    fn test_all_candidates_failing_is_not_found() {
        let mut launcher = ScriptedLauncher::failing();
        let dirs = vec![PathBuf::from("/opt/tools")];
        let outcome = run_external(&argv(&["foo"]), &dirs, &mut launcher);
        assert!(matches!(outcome, ExitOutcome::NotFound));
        assert_eq!(
            launcher.attempts,
            vec![PathBuf::from("foo"), PathBuf::from("/opt/tools/foo")]
        );
    }

    #[test]
    fn test_fallback_candidate_used_after_path_miss() {
        let mut launcher = ScriptedLauncher::succeeding_on("/opt/tools/foo", 7);
        let dirs = vec![PathBuf::from("/opt/tools")];
        let outcome = run_external(&argv(&["foo", "--bar"]), &dirs, &mut launcher);
        assert!(matches!(outcome, ExitOutcome::Exited(7)));
        assert_eq!(
            launcher.attempts,
            vec![PathBuf::from("foo"), PathBuf::from("/opt/tools/foo")]
        );
    }

    #[test]
    fn test_success_on_bare_name_skips_fallbacks() {
        let mut launcher = ScriptedLauncher::succeeding_on("ls", 0);
        let dirs = vec![PathBuf::from("/opt/tools")];
        let outcome = run_external(&argv(&["ls"]), &dirs, &mut launcher);
        assert!(matches!(outcome, ExitOutcome::Exited(0)));
        assert_eq!(launcher.attempts, vec![PathBuf::from("ls")]);
    }

    #[test]
    #[cfg(unix)]
    fn test_process_launcher_reports_exit_code() {
        let mut launcher = ProcessLauncher::new(std::env::current_dir().unwrap());
        let code = launcher
            .launch(Path::new("/bin/sh"), &argv(&["-c", "exit 7"]))
            .expect("sh should launch");
        assert_eq!(code, 7);
    }

    #[test]
    #[cfg(unix)]
    fn test_process_launcher_spawn_failure() {
        let mut launcher = ProcessLauncher::new(std::env::current_dir().unwrap());
        let res = launcher.launch(Path::new("/bin/definitely_not_here"), &[]);
        assert!(matches!(res, Err(LaunchError::Spawn(_))));
    }

    #[test]
    #[cfg(unix)]
    fn test_real_fallback_resolution() {
        use std::os::unix::fs::PermissionsExt;

        // Executable present only in a fallback directory, absent from PATH.
        let tmp_base =
            std::env::temp_dir().join(format!("external_tests_{}_fb", std::process::id()));
        let _ = fs::remove_dir_all(&tmp_base);
        fs::create_dir_all(&tmp_base).expect("create temp dir");
        let name = format!("fallback_only_{}", std::process::id());
        let script = tmp_base.join(&name);
        fs::write(&script, "#!/bin/sh\nexit 0\n").expect("write script");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");

        let mut launcher = ProcessLauncher::new(std::env::current_dir().unwrap());
        let outcome = run_external(&argv(&[&name]), &[tmp_base.clone()], &mut launcher);
        assert!(
            matches!(outcome, ExitOutcome::Exited(0)),
            "expected fallback launch to succeed, got {:?}",
            outcome
        );

        let _ = fs::remove_dir_all(tmp_base);
    }

    #[test]
    fn test_nonexistent_fallback_dir_is_tried_transparently() {
        let mut launcher = ScriptedLauncher::succeeding_on("/opt/real/foo", 0);
        let dirs = vec![PathBuf::from("/no/such/dir"), PathBuf::from("/opt/real")];
        let outcome = run_external(&argv(&["foo"]), &dirs, &mut launcher);
        assert!(matches!(outcome, ExitOutcome::Exited(0)));
        assert_eq!(launcher.attempts.len(), 3);
    }
}
