use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// Signal returned by every execution path telling the loop driver whether
/// to keep reading input.
///
/// Built-ins and external launches both produce one of these; only the
/// `exit` built-in ever yields [`Continuation::Terminate`]. Failures of
/// external commands are reported but still continue the loop, mirroring
/// the convention of interactive shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Keep prompting for input.
    Continue,
    /// Leave the read-eval loop and exit cleanly.
    Terminate,
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// This is implemented by built-ins via a blanket impl and by external
/// commands. `stderr` is the diagnostic stream for the current iteration;
/// commands never write to standard output themselves (that stream belongs
/// to spawned children and the prompt).
pub trait ExecutableCommand {
    /// Executes the command, consuming it.
    fn execute(
        self: Box<Self>,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Continuation>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. Built-in
/// factories match the name exactly (case-sensitive, no prefix matching);
/// the external-command factory resolves the name against PATH.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
