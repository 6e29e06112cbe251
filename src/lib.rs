//! A small interactive shell built around a command prefix.
//!
//! This crate implements `jash`, a line-oriented shell front-end. Each input
//! line is tokenized into an argument vector and dispatched either to a
//! built-in command executed in-process or to an external program which is
//! spawned and waited for. The unusual part is the *command prefix*: a value
//! supplied at startup that is prepended to every typed line before
//! tokenization, unless the line opens with the escape marker `\`.
//!
//! The main entry point is [`Interpreter`], which owns the environment, the
//! configured prefix and a set of pluggable [`command::CommandFactory`]
//! objects queried to create commands by name. The public modules
//! [`command`] and [`env`] expose the traits and types needed to implement
//! your own commands.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
mod lexer;
pub mod prompt;

/// Convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use command::Continuation;
pub use interpreter::Interpreter;

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, MutexGuard, OnceLock};

    /// Serializes tests that read or change the process working directory.
    pub(crate) fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        MUTEX.get_or_init(|| Mutex::new(())).lock().unwrap()
    }
}
