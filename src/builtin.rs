use crate::command::{CommandFactory, Continuation, ExecutableCommand};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "exit".
    fn name() -> &'static str;

    /// Executes the command using the provided diagnostic stream and environment.
    ///
    /// Errors returned here are reported to the diagnostic stream by the
    /// caller and never terminate the loop.
    fn execute(self, stderr: &mut dyn Write, env: &mut Environment) -> Result<Continuation>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Continuation> {
        match T::execute(*self, stderr, env) {
            Ok(signal) => Ok(signal),
            Err(e) => {
                writeln!(stderr, "jash: {:#}", e)?;
                Ok(Continuation::Continue)
            }
        }
    }
}

/// Produced when argh rejects the argument list (or `--help` was requested).
struct InvalidArgs {
    output: String,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Continuation> {
        writeln!(stderr, "{}", self.output.trim_end())?;
        Ok(Continuation::Continue)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status: _ }) => Box::new(InvalidArgs { output }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: Option<String>,

    #[argh(positional, greedy)]
    /// anything after the target is accepted and ignored
    pub _rest: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stderr: &mut dyn Write, env: &mut Environment) -> Result<Continuation> {
        let target = match &self.target {
            Some(t) if !t.is_empty() => PathBuf::from(t),
            _ => return Err(anyhow::anyhow!("expected argument to \"cd\"")),
        };

        let new_dir = if target.is_absolute() {
            target
        } else {
            env.current_dir.join(target)
        };

        let canonical = fs::canonicalize(&new_dir)
            .with_context(|| format!("cd: {}", new_dir.display()))?;

        env::set_current_dir(&canonical)
            .with_context(|| format!("cd: {}", canonical.display()))?;
        env.current_dir = canonical;
        Ok(Continuation::Continue)
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// arguments are accepted and ignored
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stderr: &mut dyn Write, _env: &mut Environment) -> Result<Continuation> {
        Ok(Continuation::Terminate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::lock_current_dir;
    use std::collections::HashMap;
    use std::env as stdenv;
    use std::io;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_unique_temp_dir() -> io::Result<PathBuf> {
        let mut p = stdenv::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("jash_test_cd_{}_{}", std::process::id(), nanos));
        fs::create_dir_all(&p)?;
        Ok(p)
    }

    fn run_boxed(
        cmd: Box<dyn ExecutableCommand>,
        env: &mut Environment,
    ) -> (Continuation, String) {
        let mut err = Vec::new();
        let signal = cmd.execute(&mut err, env).unwrap();
        (signal, String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_cd_without_argument_reports_usage_and_continues() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment {
            vars: HashMap::new(),
            current_dir: orig.clone(),
        };

        let cmd: Box<dyn ExecutableCommand> = Box::new(Cd {
            target: None,
            _rest: Vec::new(),
        });
        let (signal, err) = run_boxed(cmd, &mut env);

        assert_eq!(signal, Continuation::Continue);
        assert!(err.starts_with("jash: "), "diagnostic was {:?}", err);
        assert!(err.contains("expected argument to \"cd\""));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
        assert_eq!(env.current_dir, orig);
    }

    #[test]
    fn test_cd_nonexistent_path_reports_os_error_and_continues() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment {
            vars: HashMap::new(),
            current_dir: orig.clone(),
        };

        let name = format!("/nonexistent-path-xyz-{}", std::process::id());
        let cmd: Box<dyn ExecutableCommand> = Box::new(Cd {
            target: Some(name.clone()),
            _rest: Vec::new(),
        });
        let (signal, err) = run_boxed(cmd, &mut env);

        assert_eq!(signal, Continuation::Continue);
        assert!(err.starts_with("jash: "), "diagnostic was {:?}", err);
        assert!(err.contains(&name));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
        assert_eq!(env.current_dir, orig);
    }

    #[test]
    fn test_cd_changes_both_process_and_tracked_directory() {
        let _lock = lock_current_dir();
        let temp = make_unique_temp_dir().expect("failed to create temp dir");
        let canonical_temp = fs::canonicalize(&temp).expect("canonicalize failed");

        // save original cwd to restore later
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment {
            vars: HashMap::new(),
            current_dir: orig.clone(),
        };

        let cmd = Cd {
            target: Some(canonical_temp.to_string_lossy().to_string()),
            _rest: Vec::new(),
        };
        let mut err = Vec::new();
        let res = BuiltinCommand::execute(cmd, &mut err, &mut env);

        assert!(res.is_ok());
        assert_eq!(res.unwrap(), Continuation::Continue);

        let new_canonical = fs::canonicalize(stdenv::current_dir().unwrap()).unwrap();
        assert_eq!(new_canonical, canonical_temp);
        assert_eq!(env.current_dir, canonical_temp);
        assert!(err.is_empty());

        stdenv::set_current_dir(orig).expect("failed to restore cwd");

        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn test_cd_extra_arguments_are_ignored() {
        let mut env = Environment::new();

        // Created through the factory so the real argh parse runs.
        let factory = Factory::<Cd>::default();
        let cmd = factory.try_create(&env, "cd", &["first", "second", "third"]);
        assert!(cmd.is_some(), "extra positional arguments must parse");

        // A bogus first target still reports and continues.
        let (signal, err) = run_boxed(cmd.unwrap(), &mut env);
        assert_eq!(signal, Continuation::Continue);
        assert!(err.starts_with("jash: "));
    }

    #[test]
    fn test_exit_terminates_with_and_without_arguments() {
        let mut env = Environment::new();
        let mut err = Vec::new();

        let bare = Exit { _args: Vec::new() };
        assert_eq!(
            BuiltinCommand::execute(bare, &mut err, &mut env).unwrap(),
            Continuation::Terminate
        );

        let noisy = Exit {
            _args: vec!["now".to_string(), "please".to_string()],
        };
        assert_eq!(
            BuiltinCommand::execute(noisy, &mut err, &mut env).unwrap(),
            Continuation::Terminate
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_factory_matches_names_exactly() {
        let env = Environment::new();

        let cd = Factory::<Cd>::default();
        assert!(cd.try_create(&env, "cd", &[]).is_some());
        assert!(cd.try_create(&env, "CD", &[]).is_none());
        assert!(cd.try_create(&env, "cdx", &[]).is_none());
        assert!(cd.try_create(&env, "c", &[]).is_none());

        let exit = Factory::<Exit>::default();
        assert!(exit.try_create(&env, "exit", &[]).is_some());
        assert!(exit.try_create(&env, "exit!", &[]).is_none());
    }
}
