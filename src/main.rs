use argh::FromArgs;
use pathsh::Interpreter;
use std::path::PathBuf;

#[derive(FromArgs)]
/// An interactive shell with fallback search directories.
struct ShellArgs {
    #[argh(positional, greedy)]
    /// directories searched, in the order given, when the OS program-path
    /// lookup fails to find a command.
    fallback_dirs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args: ShellArgs = argh::from_env();
    let mut shell = Interpreter::with_search_paths(args.fallback_dirs);
    shell.repl()
}
