use crate::command::{CommandFactory, Continuation};
use crate::env::Environment;
use crate::lexer;
use crate::prompt::PromptSource;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io;

/// Leading character that disables prefixing for a single line.
///
/// A line starting with the marker has exactly that one character stripped
/// and is tokenized verbatim.
pub const ESCAPE_MARKER: char = '\\';

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — BuiltinCommand and ExternalCommand.
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

/// The shell's dispatcher and loop driver.
///
/// The interpreter maintains an [`Environment`], the configured command
/// prefix and a list of [`CommandFactory`] objects that are queried in
/// registration order to create commands by name. See
/// [`Interpreter::with_default_commands`] for the factories included out of
/// the box.
///
/// Example
/// ```
/// use jash::{Continuation, Interpreter};
/// let mut sh = Interpreter::with_default_commands("myshell");
/// let signal = sh.dispatch(&["exit".to_string()]).unwrap();
/// assert_eq!(signal, Continuation::Terminate);
/// ```
pub struct Interpreter {
    env: Environment,
    prefix: String,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    ///
    /// `prefix` is the command placed in front of every non-escaped input
    /// line; it is required configuration, supplied at startup.
    pub fn new(prefix: impl Into<String>, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            prefix: prefix.into(),
            commands,
        }
    }

    /// Create an interpreter with the default set of commands:
    /// - built-ins: `cd`, `exit`
    /// - external command launcher
    pub fn with_default_commands(prefix: impl Into<String>) -> Self {
        use crate::builtin::{Cd, Exit};
        use crate::external::ExternalCommand;
        Self::new(
            prefix,
            vec![
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<ExternalCommand>::default()),
            ],
        )
    }

    /// Apply the prefix policy to a raw input line.
    ///
    /// An escaped line loses its marker and passes through verbatim. Any
    /// other line, including an empty one, gets the prefix and a single
    /// separating space put in front of it.
    fn effective_line(&self, line: &str) -> String {
        match line.strip_prefix(ESCAPE_MARKER) {
            Some(rest) => rest.to_owned(),
            None => format!("{} {}", self.prefix, line),
        }
    }

    /// Shape, tokenize and dispatch one raw input line.
    pub fn interpret_line(&mut self, line: &str) -> Result<Continuation> {
        let argv = lexer::split_into_tokens(&self.effective_line(line));
        self.dispatch(&argv)
    }

    /// Run a single parsed argument vector.
    ///
    /// An empty vector is a no-op that continues the loop. Otherwise the
    /// factories are queried in order; the first match executes and its
    /// signal is returned. A name no factory recognizes is an error the
    /// loop reports and survives.
    pub fn dispatch(&mut self, argv: &[String]) -> Result<Continuation> {
        let Some((name, rest)) = argv.split_first() else {
            return Ok(Continuation::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, &args) {
                return cmd.execute(&mut io::stderr(), &mut self.env);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// The read-eval loop.
    ///
    /// Renders the prompt, reads a line, interprets it and repeats until a
    /// command signals termination or input ends. Per-line errors are
    /// reported and the loop keeps going; only reader failures other than
    /// end-of-input and interrupt are returned to the caller.
    pub fn repl(&mut self, prompt: &dyn PromptSource) -> Result<()> {
        let mut editor = DefaultEditor::new()?;

        loop {
            match editor.readline(&prompt.render()) {
                Ok(line) => match self.interpret_line(&line) {
                    Ok(Continuation::Continue) => {}
                    Ok(Continuation::Terminate) => break,
                    Err(e) => eprintln!("jash: {:#}", e),
                },
                // Ctrl-C drops the pending line and prompts again.
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }
}
