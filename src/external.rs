use crate::command::{CommandFactory, Continuation, ExecutableCommand};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::Result;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Command that is not a builtin.
///
/// Holds the resolved executable path and the argument list; the child is
/// spawned with inherited standard streams and waited for to completion.
pub struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: OsString, args: Vec<OsString>) -> Self {
        Self { program, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let search_paths = env.get_var("PATH")?;
        let executable = find_command_path(OsStr::new(&search_paths), Path::new(name))?;
        Some(Box::new(ExternalCommand::new(
            executable.as_os_str().to_owned(),
            args.iter().map(|x| x.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Continuation> {
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&env.current_dir)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                // Nothing was started, so there is nothing to wait for.
                writeln!(stderr, "jash: {}: {}", self.program.to_string_lossy(), e)?;
                return Ok(Continuation::Continue);
            }
        };

        // Blocks until the child exits or is killed by a signal; a child
        // that is merely stopped keeps the wait alive. The exit status is
        // deliberately not inspected: a failing external command never
        // terminates the shell.
        if let Err(e) = child.wait() {
            writeln!(stderr, "jash: {}: {}", self.program.to_string_lossy(), e)?;
        }

        Ok(Continuation::Continue)
    }
}

/// Resolve a command path the way a typical shell would.
///
/// Behavior:
/// - Absolute path: returns it if it exists.
/// - Any path containing a separator (e.g., `bin/sh` or `./foo`): returns it
///   if it exists relative to the working directory.
/// - Single path component: search each directory in `search_paths` (PATH)
///   and return the first existing match.
/// - Empty path: returns `None`.
///
/// Returns either a borrowed reference to the provided `path` or an owned
/// `PathBuf` when the result is discovered via PATH lookup.
pub fn find_command_path<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.as_os_str().is_empty() {
        return None;
    }

    if path.is_absolute() {
        return path.exists().then_some(Cow::Borrowed(path));
    }

    let has_separator = path.components().nth(1).is_some();
    if has_separator {
        return path.exists().then_some(Cow::Borrowed(path));
    }

    find_in_path(search_paths, path.as_os_str()).map(Cow::Owned)
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(cmd))
        .find(|candidate| candidate.exists())
}
