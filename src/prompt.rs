//! Prompt construction for the interactive loop.
//!
//! The loop driver only needs something that can produce a prompt string
//! before each read; everything about what the prompt looks like lives
//! here, outside the dispatch core.

use std::env;
use std::path::Path;

/// Collaborator that produces the prompt shown before each read.
pub trait PromptSource {
    /// Render the prompt string for the upcoming input line.
    fn render(&self) -> String;
}

/// The default jash prompt.
///
/// Shows the last component of the working directory followed by the
/// configured command prefix, e.g. `jash /src: myshell `.
pub struct CwdPrompt {
    prefix: String,
}

impl CwdPrompt {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl PromptSource for CwdPrompt {
    fn render(&self) -> String {
        let cwd = env::current_dir().ok();
        let tail = cwd
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("jash /{}: {} ", tail, self.prefix)
    }
}
