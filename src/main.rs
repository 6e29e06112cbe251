use anyhow::Result;
use argh::FromArgs;
use jash::Interpreter;
use jash::prompt::CwdPrompt;

#[derive(FromArgs)]
/// An interactive shell that places a configured command in front of every
/// line it reads. Start a line with `\` to run it verbatim.
struct JashArgs {
    #[argh(positional)]
    /// command put in front of every non-escaped input line
    prefix: String,
}

fn main() -> Result<()> {
    // A missing prefix is fatal before the loop starts: argh reports usage
    // on stderr and exits with a non-zero status.
    let args: JashArgs = argh::from_env();

    let prompt = CwdPrompt::new(args.prefix.clone());
    let mut interpreter = Interpreter::with_default_commands(args.prefix);
    interpreter.repl(&prompt)
}
